// storage/src/tree.rs

use std::marker::PhantomData;

use bincode::{
    config::{self, BigEndian, Configuration, Fixint},
    serde::{decode_from_slice, encode_to_vec},
};
use serde::{de::DeserializeOwned, Serialize};
use sled::{Db, Tree};
use uuid::Uuid;

use models::errors::ClinicResult;

/// Provides a standard bincode configuration.
pub(crate) fn bincode_config() -> Configuration<BigEndian, Fixint> {
    config::standard()
        .with_big_endian()
        .with_fixed_int_encoding()
}

/// A sled tree holding one document collection, keyed by UUID bytes.
pub(crate) struct DocTree<T> {
    tree: Tree,
    config: Configuration<BigEndian, Fixint>,
    _marker: PhantomData<T>,
}

impl<T> DocTree<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn open(db: &Db, name: &str) -> ClinicResult<Self> {
        let tree = db.open_tree(name)?;
        Ok(Self {
            tree,
            config: bincode_config(),
            _marker: PhantomData,
        })
    }

    /// Inserts or overwrites the document under its id.
    pub fn put(&self, id: &Uuid, doc: &T) -> ClinicResult<()> {
        let bytes = encode_to_vec(doc, self.config.clone())?;
        self.tree.insert(id.as_bytes(), bytes)?;
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> ClinicResult<Option<T>> {
        match self.tree.get(id.as_bytes())? {
            Some(value_ivec) => {
                let (doc, _): (T, usize) = decode_from_slice(&value_ivec, self.config.clone())?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Removes the document. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> ClinicResult<bool> {
        Ok(self.tree.remove(id.as_bytes())?.is_some())
    }

    /// Decodes every document in the tree.
    pub fn all(&self) -> ClinicResult<Vec<T>> {
        let mut docs = Vec::with_capacity(self.tree.len());
        for item in self.tree.iter() {
            let (_key_ivec, value_ivec) = item?;
            let (doc, _): (T, usize) = decode_from_slice(&value_ivec, self.config.clone())?;
            docs.push(doc);
        }
        Ok(docs)
    }

    /// Full-scan filter. Secondary lookups go through here; the collections
    /// are small enough that no secondary index is kept.
    pub fn filter<F>(&self, mut pred: F) -> ClinicResult<Vec<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut docs = Vec::new();
        for item in self.tree.iter() {
            let (_key_ivec, value_ivec) = item?;
            let (doc, _): (T, usize) = decode_from_slice(&value_ivec, self.config.clone())?;
            if pred(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    /// First document matching the predicate, if any.
    pub fn find<F>(&self, mut pred: F) -> ClinicResult<Option<T>>
    where
        F: FnMut(&T) -> bool,
    {
        for item in self.tree.iter() {
            let (_key_ivec, value_ivec) = item?;
            let (doc, _): (T, usize) = decode_from_slice(&value_ivec, self.config.clone())?;
            if pred(&doc) {
                return Ok(Some(doc));
            }
        }
        Ok(None)
    }

    pub fn count(&self) -> u64 {
        self.tree.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::DocTree;
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        id: Uuid,
        label: String,
    }

    fn temp_db() -> sled::Db {
        sled::Config::new().temporary(true).open().unwrap()
    }

    #[test]
    fn should_round_trip_document() {
        let db = temp_db();
        let tree: DocTree<Doc> = DocTree::open(&db, "docs").unwrap();
        let doc = Doc {
            id: Uuid::new_v4(),
            label: "hello".to_string(),
        };
        tree.put(&doc.id, &doc).unwrap();
        assert_eq!(tree.get(&doc.id).unwrap(), Some(doc));
    }

    #[test]
    fn should_report_missing_document_as_none() {
        let db = temp_db();
        let tree: DocTree<Doc> = DocTree::open(&db, "docs").unwrap();
        assert_eq!(tree.get(&Uuid::new_v4()).unwrap(), None);
        assert!(!tree.remove(&Uuid::new_v4()).unwrap());
    }

    #[test]
    fn should_filter_with_predicate() {
        let db = temp_db();
        let tree: DocTree<Doc> = DocTree::open(&db, "docs").unwrap();
        for label in ["a", "b", "a"] {
            let doc = Doc {
                id: Uuid::new_v4(),
                label: label.to_string(),
            };
            tree.put(&doc.id, &doc).unwrap();
        }
        assert_eq!(tree.filter(|d| d.label == "a").unwrap().len(), 2);
        assert_eq!(tree.count(), 3);
    }
}

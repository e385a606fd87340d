// server/src/config.rs

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8081;

/// Settings under the `server:` key of the YAML config file. CLI flags
/// override individual values after loading.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub port: u16,
    pub data_directory: String,
    pub upload_directory: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            data_directory: "clinic_data".to_string(),
            upload_directory: "clinic_uploads".to_string(),
        }
    }
}

// Matches the top-level `server:` key in the YAML file.
#[derive(Debug, Deserialize)]
struct ServerConfigWrapper {
    server: ServerConfig,
}

/// Loads the server configuration. An explicitly given path must exist;
/// without one, the `clinic_config.yaml` next to the crate is used when
/// present, and the built-in defaults otherwise.
pub fn load_server_config(config_file_path: Option<PathBuf>) -> Result<ServerConfig> {
    let path = match config_file_path {
        Some(path) => path,
        None => {
            let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("clinic_config.yaml");
            if !bundled.exists() {
                return Ok(ServerConfig::default());
            }
            bundled
        }
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let wrapper: ServerConfigWrapper = serde_yaml2::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;
    Ok(wrapper.server)
}

#[cfg(test)]
mod tests {
    use super::{load_server_config, ServerConfig, DEFAULT_PORT};

    #[test]
    fn should_parse_wrapped_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic_config.yaml");
        std::fs::write(
            &path,
            "server:\n  port: 9090\n  data_directory: clinic-data\n  upload_directory: clinic-uploads\n",
        )
        .unwrap();

        let config = load_server_config(Some(path)).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.data_directory, "clinic-data");
        assert_eq!(config.upload_directory, "clinic-uploads");
    }

    #[test]
    fn should_fail_on_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_server_config(Some(dir.path().join("absent.yaml"))).is_err());
    }

    #[test]
    fn should_fail_on_content_without_server_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic_config.yaml");
        std::fs::write(&path, "port: 9090\n").unwrap();
        assert!(load_server_config(Some(path)).is_err());
    }

    #[test]
    fn defaults_cover_local_development() {
        let config = ServerConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.data_directory.is_empty());
        assert!(!config.upload_directory.is_empty());
    }
}

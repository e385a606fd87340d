// rest_api/src/state.rs

use std::path::PathBuf;
use std::sync::Arc;

use security::JwtKeys;
use storage::db::ClinicDb;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<ClinicDb>,
    pub jwt: JwtKeys,
    /// Where uploaded patient images land on disk.
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db: Arc<ClinicDb>, jwt: JwtKeys, upload_dir: PathBuf) -> Self {
        AppState {
            db,
            jwt,
            upload_dir: Arc::new(upload_dir),
        }
    }
}

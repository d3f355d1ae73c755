//! Application state shared with every handler as `web::Data`.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppState {
    /// SQLite file holding the stored templates. Each request opens its own
    /// connection to it.
    pub db_path: PathBuf,
}

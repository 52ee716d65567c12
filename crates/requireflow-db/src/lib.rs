//! RequireFlow Storage Layer
//!
//! Every collection is a single JSON array document on disk. Reads load the
//! whole document; writes replace it wholesale.

pub mod collection;
pub mod error;

pub use collection::JsonCollection;
pub use error::{DbError, DbResult};

use std::path::Path;

/// Create the data directory if it does not exist yet.
pub async fn ensure_data_dir(dir: &Path) -> DbResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| DbError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

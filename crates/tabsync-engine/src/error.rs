use thiserror::Error;

use tabsync_store::StoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("missing table: {0}")]
    MissingTable(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SyncError>;

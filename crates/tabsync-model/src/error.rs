use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid business key: {0:?}")]
    InvalidKey(String),
    #[error("invalid editor name: {0:?}")]
    InvalidEditor(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

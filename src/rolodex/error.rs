use crate::lifecycle::Phase;
use crate::model::RecordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    #[error("Record {0} not found locally")]
    RecordNotFound(RecordId),

    #[error("Record has no id; it must be saved by the backend first")]
    MissingId,

    #[error("Invalid request transition: {from} -> {to}")]
    InvalidTransition { from: Phase, to: Phase },

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RolodexError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported schema_version {0} (expected 1)")]
    UnsupportedVersion(u32),

    #[error("Invalid field name {name:?} at {path:?}")]
    InvalidName { path: String, name: String },

    #[error("Duplicate field {0:?}")]
    DuplicateField(String),

    #[error("Field {0:?} declares children but is not an object")]
    UnexpectedChildren(String),
}

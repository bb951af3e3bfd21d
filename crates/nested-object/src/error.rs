use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjectError {
    #[error("NOT_A_CONTAINER")]
    NotAContainer,
    #[error("NOT_A_SEQUENCE")]
    NotASequence,
    #[error("JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ObjectError {
    fn from(err: serde_json::Error) -> Self {
        ObjectError::Json(err.to_string())
    }
}

use crate::validate::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid dashboard JSON: {0}")]
    Input(#[from] serde_json::Error),

    #[error("PNG conversion failed: {message}")]
    Conversion { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

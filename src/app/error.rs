use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] minreq::Error),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("No API key configured")]
    MissingKey,

    #[error("Image error: {0}")]
    Image(String),

    #[error("QR service error: {0}")]
    Qr(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

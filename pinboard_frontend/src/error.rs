use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("image {0} is no longer available")]
    UnknownImage(String),
    #[error("download cancelled")]
    DownloadCancelled,
}

pub type Result<T> = std::result::Result<T, GalleryError>;

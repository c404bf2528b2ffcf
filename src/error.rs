use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraffitiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required environment variables: {0}")]
    MissingEnv(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("No images found in {0}")]
    NoImagesFound(String),

    #[error("Drive API call failed: {0}")]
    ApiCall(String),

    #[error("Failed to parse Drive API response: {0}")]
    ApiParse(String),

    #[error("Map runtime unavailable: {0}")]
    MapRuntime(String),

    #[error("Map rendering failed: {0}")]
    RenderFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraffitiError>;

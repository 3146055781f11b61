use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "png")]
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse relocation plan: {0}")]
    PlanParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The relocation destination is missing and could not be created.
    #[error("{source}")]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ToolError {
    pub fn config(message: impl Into<String>) -> Self {
        ToolError::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

use std::path::PathBuf;
use thiserror::Error;

/// Library error type for image stack setup.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration values that cannot produce a usable scene.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No image files in the given directory, or none of them loaded.
    #[error("no images found in {}", .0.display())]
    NoImages(PathBuf),

    /// An image file could not be decoded or uploaded as a texture.
    #[error("failed to load texture {}: {reason}", path.display())]
    Texture { path: PathBuf, reason: String },

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

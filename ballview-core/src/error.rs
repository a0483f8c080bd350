/// Error types shared across the viewer
use thiserror::Error;

/// Main error type for the viewer
#[derive(Error, Debug)]
pub enum Error {
    /// Problems with the loaded asset's content
    #[error("Asset error: {0}")]
    Asset(String),

    /// glTF import failures (missing file, parse error, bad buffers)
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or drawing errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias using the viewer's Error type
pub type Result<T> = std::result::Result<T, Error>;

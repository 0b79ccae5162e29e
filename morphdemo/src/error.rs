//! Error types for the demo application

use morphdemo_io::IoError;
use morphdemo_morph::MorphError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the demo
#[derive(Debug, Error)]
pub enum DemoError {
    /// The source image could not be read or decoded
    #[error("could not load image '{}': {source}", path.display())]
    ImageLoad { path: PathBuf, source: IoError },

    /// Settings out of range
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Morphology failed on a loaded image
    #[error("morphology error: {0}")]
    Morph(#[from] MorphError),

    /// Core image error
    #[error("image error: {0}")]
    Core(#[from] morphdemo_core::Error),

    /// The display backend failed
    #[error("GUI error: {0}")]
    Gui(String),
}

impl DemoError {
    /// Process exit status for this error.
    ///
    /// A load failure reports 255, the byte value of -1; everything else
    /// reports 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            DemoError::ImageLoad { .. } => 255,
            _ => 1,
        }
    }
}

/// Result type for the demo
pub type DemoResult<T> = Result<T, DemoError>;

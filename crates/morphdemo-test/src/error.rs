//! Error types for the test helpers

use thiserror::Error;

/// Errors raised while preparing test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic image
    #[error("failed to build test image: {0}")]
    Build(#[from] morphdemo_core::Error),
}

/// Result type for test helpers
pub type TestResult<T> = Result<T, TestError>;

//! morphdemo-morph - Morphological operations for image processing
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) in rectangle, ellipse and cross shapes
//! - Grayscale morphology: erosion, dilation, opening, closing for 8-bpp images
//! - Color morphology: the same operations per channel for 32-bpp images
//! - Morphological gradient, top-hat, and bottom-hat (black-hat) transforms
//! - Depth-dispatching entry points and a run-time operation selector

pub mod color;
mod error;
pub mod grayscale;
pub mod ops;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{ElementShape, Sel, SelElement, SelRun};

// Re-export commonly used grayscale morphology functions
pub use grayscale::{
    bottom_hat_gray, close_gray, dilate_gray, erode_gray, gradient_gray, open_gray, top_hat_gray,
};

// Re-export commonly used color morphology functions
pub use color::{
    bottom_hat_color, close_color, dilate_color, erode_color, gradient_color, open_color,
    top_hat_color,
};

pub use ops::{
    MorphOp, bottom_hat, close, dilate, erode, gradient, morphology_ex, morphology_ex_into, open,
    top_hat,
};

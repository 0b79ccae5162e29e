//! morphdemo - Interactive morphology demo
//!
//! Loads one image and shows four live previews, each driven by an
//! "iterations" slider:
//!
//! - Open/Close
//! - Erode/Dilate
//! - Gradient
//! - TopHat/BlackHat
//!
//! The structuring element shape is chosen from the keyboard (`r`, `e`,
//! `c`, or Space to cycle) and ESC quits.
//!
//! The [`controller`] holds the demo state and talks to the display only
//! through the [`highgui::Highgui`] trait, so the same logic runs in the
//! `egui` viewer (feature `gui`) and headless in tests.
//!
//! # Example
//!
//! ```
//! use morphdemo::controller::{PreviewKind, resolve_element, signed_radius};
//! use morphdemo::morph::{ElementShape, MorphOp};
//!
//! // Slider at 7 with max_iters 10: radius -3, a 7x7 element, opening
//! assert_eq!(signed_radius(7, 10), -3);
//! let sel = resolve_element(7, 10, ElementShape::Ellipse).unwrap();
//! assert_eq!(sel.width(), 7);
//! assert_eq!(PreviewKind::OpenClose.op(-3), MorphOp::Open);
//! ```

pub mod app;
pub mod config;
pub mod controller;
mod error;
pub mod highgui;
#[cfg(feature = "gui")]
pub mod viewer;

pub use morphdemo_core::{Pix, PixelDepth};
pub use morphdemo_io as io;
pub use morphdemo_morph as morph;

pub use app::{load_source, run_demo};
pub use config::{Args, DemoConfig};
pub use controller::{MorphController, PreviewKind};
pub use error::{DemoError, DemoResult};
pub use highgui::{Event, EventSource, Highgui, LoopState};

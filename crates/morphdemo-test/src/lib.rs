//! morphdemo-test - Regression test helpers for the morphology demo
//!
//! [`RegParams`] numbers every check of a `*_reg` test, records the
//! failures and reports them together at the end, so one run shows every
//! mismatch instead of stopping at the first. Inputs are generated
//! procedurally by the `make_*` functions.
//!
//! # Usage
//!
//! ```ignore
//! use morphdemo_test::{RegParams, make_gray_spots};
//!
//! let mut rp = RegParams::new("graymorph");
//! let pixs = make_gray_spots(64, 48).unwrap();
//! rp.compare_values(64.0, pixs.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod images;
mod params;

pub use error::{TestError, TestResult};
pub use images::{make_gray_ramp, make_gray_spots, make_rgb_blocks};
pub use params::RegParams;

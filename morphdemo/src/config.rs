//! Command line and run-time configuration

use crate::{DemoError, DemoResult};
use argh::FromArgs;
use morphdemo_morph::ElementShape;
use std::path::PathBuf;

/// Image loaded when no path is given
pub const DEFAULT_IMAGE: &str = "lena.jpg";

/// Default largest radius reachable on each slider
pub const DEFAULT_MAX_ITERS: u32 = 10;

/// Upper bound accepted for `max_iters`
pub const MAX_ITERS_LIMIT: u32 = 255;

fn parse_max_iters(value: &str) -> Result<u32, String> {
    let n: u32 = value
        .parse()
        .map_err(|e| format!("invalid max iterations '{value}': {e}"))?;
    if n > MAX_ITERS_LIMIT {
        return Err(format!("max iterations must be at most {MAX_ITERS_LIMIT}, got {n}"));
    }
    Ok(n)
}

#[derive(FromArgs, Debug)]
/// Interactive morphology demo: open/close, erode/dilate, gradient and
/// top-hat/black-hat previews driven by sliders.
pub struct Args {
    /// image to load (default: lena.jpg)
    #[argh(positional, default = "PathBuf::from(DEFAULT_IMAGE)")]
    pub image: PathBuf,

    /// largest radius reachable on each slider, at most 255 (default: 10)
    #[argh(
        option,
        short = 'm',
        default = "DEFAULT_MAX_ITERS",
        from_str_fn(parse_max_iters)
    )]
    pub max_iters: u32,

    /// initial structuring element: rect, ellipse, cross (default: ellipse)
    #[argh(option, short = 's', default = "ElementShape::Ellipse")]
    pub shape: ElementShape,
}

/// Settings the demo runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Image to load at startup
    pub image_path: PathBuf,
    /// Slider positions span `[0, 2 * max_iters + 1]`
    pub max_iters: u32,
    /// Shape selected before any key is pressed
    pub initial_shape: ElementShape,
}

impl DemoConfig {
    /// Highest slider position
    pub fn slider_max(&self) -> u32 {
        self.max_iters.saturating_mul(2).saturating_add(1)
    }

    /// Reject settings the controller cannot run with.
    pub fn validate(&self) -> DemoResult<()> {
        if self.max_iters > MAX_ITERS_LIMIT {
            return Err(DemoError::Config(format!(
                "max_iters {} exceeds {}",
                self.max_iters, MAX_ITERS_LIMIT
            )));
        }
        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            image_path: PathBuf::from(DEFAULT_IMAGE),
            max_iters: DEFAULT_MAX_ITERS,
            initial_shape: ElementShape::Ellipse,
        }
    }
}

impl From<Args> for DemoConfig {
    fn from(args: Args) -> Self {
        DemoConfig {
            image_path: args.image,
            max_iters: args.max_iters,
            initial_shape: args.shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DemoConfig, argh::EarlyExit> {
        Args::from_args(&["morphdemo"], args).map(DemoConfig::from)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.slider_max(), 21);
    }

    #[test]
    fn test_all_options() {
        let config = parse(&["baboon.png", "--max-iters", "4", "--shape", "cross"]).unwrap();
        assert_eq!(config.image_path, PathBuf::from("baboon.png"));
        assert_eq!(config.max_iters, 4);
        assert_eq!(config.initial_shape, ElementShape::Cross);
        assert_eq!(config.slider_max(), 9);
    }

    #[test]
    fn test_max_iters_bound() {
        let config = parse(&["--max-iters", "255"]).unwrap();
        assert_eq!(config.slider_max(), 511);
        assert!(config.validate().is_ok());
        assert!(parse(&["--max-iters", "256"]).is_err());
        assert!(parse(&["--max-iters", "40000"]).is_err());
        assert!(parse(&["-m", "-1"]).is_err());

        let config = DemoConfig {
            max_iters: 40_000,
            ..DemoConfig::default()
        };
        assert!(matches!(config.validate(), Err(DemoError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_shape() {
        assert!(parse(&["--shape", "disk"]).is_err());
        assert!(parse(&["a.png", "b.png"]).is_err());
    }
}

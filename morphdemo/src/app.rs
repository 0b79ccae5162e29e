//! Demo entry points

use crate::config::DemoConfig;
use crate::controller::MorphController;
use crate::highgui::{EventSource, Highgui};
use crate::{DemoError, DemoResult};
use log::info;
use morphdemo_core::Pix;
use std::path::Path;

/// Usage and hot-key summary printed at startup
pub const HELP: &str = "\
This program demonstrates the morphology operators: open, close, erode,
dilate, gradient, top-hat and black-hat. Each window has an 'iterations'
slider; positions left of the middle use the first operation in the window
title, positions right of it the second.

You can play with elliptical, rectangular and cross-shaped structuring
elements.

Call:
    morphdemo [image_name -- default lena.jpg] [--max-iters N] [--shape SHAPE]

Hot keys:
    ESC   - quit the program
    r     - use rectangle structuring element
    e     - use elliptic structuring element
    c     - use cross-shaped structuring element
    SPACE - loop through all the options
";

/// Load the source image and promote it to 32 bpp.
///
/// Any read or decode failure becomes [`DemoError::ImageLoad`].
pub fn load_source(path: &Path) -> DemoResult<Pix> {
    let pix = morphdemo_io::read_image(path).map_err(|source| DemoError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "loaded {} ({}x{}, {} bpp, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.depth().bits(),
        pix.informat()
    );
    Ok(pix.convert_to_32()?)
}

fn print_help() {
    print!("{HELP}");
}

/// Run the demo against any display and event source.
///
/// The image is loaded before any window is created, so a load failure
/// leaves the display untouched.
pub fn run_demo(
    config: &DemoConfig,
    events: &mut dyn EventSource,
    display: &mut dyn Highgui,
) -> DemoResult<()> {
    let src = load_source(&config.image_path)?;
    print_help();
    let mut controller = MorphController::new(&src, config)?;
    controller.run(events, display)
}

/// Run the demo in the `egui` viewer.
#[cfg(feature = "gui")]
pub fn launch(config: DemoConfig) -> DemoResult<()> {
    let src = load_source(&config.image_path)?;
    print_help();
    let controller = MorphController::new(&src, &config)?;
    crate::viewer::run_viewer(controller)
}

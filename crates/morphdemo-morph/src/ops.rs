//! Depth-dispatching morphology
//!
//! The functions here pick the grayscale or color implementation from the
//! depth of the input, so callers can treat 8 bpp and 32 bpp images alike.
//! [`morphology_ex`] selects the operation at run time; the `_into`
//! variant writes the result into an existing image of the same geometry.

use crate::{MorphResult, Sel, color, grayscale};
use morphdemo_core::{Pix, PixelDepth};
use std::fmt;

/// Morphological operation selector for [`morphology_ex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// Minimum over the element
    Erode,
    /// Maximum over the element
    Dilate,
    /// Erosion followed by dilation
    Open,
    /// Dilation followed by erosion
    Close,
    /// Dilation minus erosion
    Gradient,
    /// Source minus opening
    TopHat,
    /// Closing minus source
    BlackHat,
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MorphOp::Erode => "erode",
            MorphOp::Dilate => "dilate",
            MorphOp::Open => "open",
            MorphOp::Close => "close",
            MorphOp::Gradient => "gradient",
            MorphOp::TopHat => "tophat",
            MorphOp::BlackHat => "blackhat",
        };
        f.write_str(name)
    }
}

macro_rules! dispatch_by_depth {
    ($(#[$doc:meta])* $name:ident => $gray:path, $color:path) => {
        $(#[$doc])*
        pub fn $name(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
            match pix.depth() {
                PixelDepth::Bit8 => $gray(pix, sel),
                PixelDepth::Bit32 => $color(pix, sel),
            }
        }
    };
}

dispatch_by_depth!(
    /// Erode an 8 bpp or 32 bpp image
    erode => grayscale::erode_gray, color::erode_color
);
dispatch_by_depth!(
    /// Dilate an 8 bpp or 32 bpp image
    dilate => grayscale::dilate_gray, color::dilate_color
);
dispatch_by_depth!(
    /// Open an 8 bpp or 32 bpp image
    open => grayscale::open_gray, color::open_color
);
dispatch_by_depth!(
    /// Close an 8 bpp or 32 bpp image
    close => grayscale::close_gray, color::close_color
);
dispatch_by_depth!(
    /// Morphological gradient of an 8 bpp or 32 bpp image
    gradient => grayscale::gradient_gray, color::gradient_color
);
dispatch_by_depth!(
    /// Top-hat transform of an 8 bpp or 32 bpp image
    top_hat => grayscale::top_hat_gray, color::top_hat_color
);
dispatch_by_depth!(
    /// Bottom-hat (black-hat) transform of an 8 bpp or 32 bpp image
    bottom_hat => grayscale::bottom_hat_gray, color::bottom_hat_color
);

/// Apply the selected operation
pub fn morphology_ex(pix: &Pix, sel: &Sel, op: MorphOp) -> MorphResult<Pix> {
    match op {
        MorphOp::Erode => erode(pix, sel),
        MorphOp::Dilate => dilate(pix, sel),
        MorphOp::Open => open(pix, sel),
        MorphOp::Close => close(pix, sel),
        MorphOp::Gradient => gradient(pix, sel),
        MorphOp::TopHat => top_hat(pix, sel),
        MorphOp::BlackHat => bottom_hat(pix, sel),
    }
}

/// Apply the selected operation, overwriting `dst`
///
/// `dst` must have the size and depth of `pix`. Its buffer is reused when
/// `dst` is the only handle to it.
pub fn morphology_ex_into(pix: &Pix, sel: &Sel, op: MorphOp, dst: &mut Pix) -> MorphResult<()> {
    let result = morphology_ex(pix, sel, op)?;
    dst.copy_from(&result)?;
    Ok(())
}

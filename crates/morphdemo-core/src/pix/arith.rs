//! Pixel arithmetic
//!
//! Saturating subtraction, used by the morphological gradient and the
//! top-hat / black-hat transforms. 32 bpp images are processed per color
//! channel; alpha is taken from the minuend.

use super::{Pix, PixelDepth, check_same_geometry};
use crate::error::Result;

impl Pix {
    /// Compute `self - other`, clipping each sample at 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the images differ in size or depth.
    pub fn arith_subtract(&self, other: &Pix) -> Result<Pix> {
        let mut out = self.deep_clone();
        out.arith_subtract_inplace(other)?;
        Ok(out)
    }

    /// In-place version of [`Pix::arith_subtract`].
    pub fn arith_subtract_inplace(&mut self, other: &Pix) -> Result<()> {
        check_same_geometry(self, other)?;
        let depth = self.depth();
        for (a, &b) in self.data_mut().iter_mut().zip(other.data()) {
            *a = match depth {
                // Packed bytes and RGB channels both subtract lane-wise;
                // alpha (lowest byte of a 32 bpp pixel) is preserved.
                PixelDepth::Bit8 => sub_lanes(*a, b, 0xffff_ffff),
                PixelDepth::Bit32 => sub_lanes(*a, b, 0xffff_ff00) | (*a & 0xff),
            };
        }
        Ok(())
    }
}

/// Saturating per-byte subtraction over the lanes selected by `mask`.
#[inline]
fn sub_lanes(a: u32, b: u32, mask: u32) -> u32 {
    let mut out = 0u32;
    for shift in [24u32, 16, 8, 0] {
        if (mask >> shift) & 0xff == 0 {
            continue;
        }
        let va = (a >> shift) & 0xff;
        let vb = (b >> shift) & 0xff;
        out |= va.saturating_sub(vb) << shift;
    }
    out
}

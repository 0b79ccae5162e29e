//! Depth conversion
//!
//! The demo always works on 32 bpp RGB; grayscale inputs are replicated
//! into the three color channels on load.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::Result;

impl Pix {
    /// Convert an 8 bpp grayscale image to 32 bpp RGB.
    ///
    /// Each gray value is replicated into R, G and B; alpha is 255.
    /// A 32 bpp input is returned as a shared clone.
    pub fn convert_to_32(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit32 => Ok(self.clone()),
            PixelDepth::Bit8 => self.convert_8_to_32(),
        }
    }

    fn convert_8_to_32(&self) -> Result<Pix> {
        let mut out = Pix::new(self.width(), self.height(), PixelDepth::Bit32)?.to_mut();
        out.set_informat(self.informat());
        for y in 0..self.height() {
            let src = self.row_data(y);
            let dst = out.row_data_mut(y);
            for (x, word) in dst.iter_mut().enumerate() {
                let g = super::get_data_byte(src, x as u32);
                *word = color::compose_rgb(g, g, g);
            }
        }
        Ok(out.into())
    }
}

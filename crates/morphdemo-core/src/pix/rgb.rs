//! RGB component extraction and recombination
//!
//! Color morphology works one channel at a time: split a 32 bpp image into
//! 8 bpp planes, process each, then recombine.

use super::{Pix, PixelDepth, check_same_geometry};
use crate::color;
use crate::error::{Error, Result};

/// Color component selector for 32 bpp images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RgbComponent {
    /// Red channel
    Red,
    /// Green channel
    Green,
    /// Blue channel
    Blue,
}

impl RgbComponent {
    /// All color components, in storage order.
    pub const ALL: [RgbComponent; 3] = [Self::Red, Self::Green, Self::Blue];

    fn shift(self) -> u32 {
        match self {
            Self::Red => color::RED_SHIFT,
            Self::Green => color::GREEN_SHIFT,
            Self::Blue => color::BLUE_SHIFT,
        }
    }
}

impl Pix {
    /// Extract one color component as an 8 bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 32 bpp.
    pub fn get_rgb_component(&self, comp: RgbComponent) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let shift = comp.shift();
        let mut out = Pix::new(self.width(), self.height(), PixelDepth::Bit8)?.to_mut();
        for y in 0..self.height() {
            let src = self.row_data(y);
            let dst = out.row_data_mut(y);
            for (x, &pixel) in src.iter().enumerate() {
                super::set_data_byte(dst, x as u32, ((pixel >> shift) & 0xff) as u8);
            }
        }
        Ok(out.into())
    }

    /// Combine three 8 bpp planes into a 32 bpp RGB image (alpha = 255).
    ///
    /// # Errors
    ///
    /// Returns an error if the planes are not 8 bpp or differ in size.
    pub fn create_rgb_image(pix_r: &Pix, pix_g: &Pix, pix_b: &Pix) -> Result<Pix> {
        if pix_r.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(pix_r.depth().bits()));
        }
        check_same_geometry(pix_r, pix_g)?;
        check_same_geometry(pix_r, pix_b)?;

        let mut out = Pix::new(pix_r.width(), pix_r.height(), PixelDepth::Bit32)?.to_mut();
        for y in 0..pix_r.height() {
            let (lr, lg, lb) = (pix_r.row_data(y), pix_g.row_data(y), pix_b.row_data(y));
            let dst = out.row_data_mut(y);
            for (x, word) in dst.iter_mut().enumerate() {
                let x = x as u32;
                *word = color::compose_rgb(
                    super::get_data_byte(lr, x),
                    super::get_data_byte(lg, x),
                    super::get_data_byte(lb, x),
                );
            }
        }
        Ok(out.into())
    }
}

//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels,
//! plus bulk conversion between 8 bpp rasters and byte buffers.
//!
//! # Pixel packing
//!
//! 8 bpp pixels are packed MSB-to-LSB within each 32-bit word, so
//! pixel 0 of a row occupies bits 31..24 of the first word.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` (x is not validated against the width).
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_pixel(self.row_data(y), x, self.depth())
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Copy an 8 bpp raster into a row-major byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non-8 bpp images.
    pub fn get_gray_data(&self) -> Result<Vec<u8>> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let w = self.width();
        let mut out = Vec::with_capacity((w * self.height()) as usize);
        for y in 0..self.height() {
            let line = self.row_data(y);
            out.extend((0..w).map(|x| get_data_byte(line, x)));
        }
        Ok(out)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let start = (y * self.wpl()) as usize;
        let line = &self.data()[start..start + self.wpl() as usize];
        read_pixel(line, x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        let line = self.row_data_mut(y);
        match depth {
            PixelDepth::Bit8 => set_data_byte(line, x, val as u8),
            PixelDepth::Bit32 => line[x as usize] = val,
        }
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Fill an 8 bpp raster from a row-major byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non-8 bpp images and
    /// [`Error::InvalidParameter`] if `bytes` has the wrong length.
    pub fn set_gray_data(&mut self, bytes: &[u8]) -> Result<()> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let w = self.width();
        let expected = (w * self.height()) as usize;
        if bytes.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "gray buffer has {} bytes, expected {}",
                bytes.len(),
                expected
            )));
        }
        for (y, row) in bytes.chunks_exact(w as usize).enumerate() {
            let line = self.row_data_mut(y as u32);
            for (x, &v) in row.iter().enumerate() {
                set_data_byte(line, x as u32, v);
            }
        }
        Ok(())
    }
}

#[inline]
fn read_pixel(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit8 => get_data_byte(line, x) as u32,
        PixelDepth::Bit32 => line[x as usize],
    }
}

/// Get an 8-bit pixel value.
///
/// Four pixels per word, pixel 0 in the most significant byte.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u8 {
    let word = line[(x >> 2) as usize];
    let shift = 24 - 8 * (x & 3);
    ((word >> shift) & 0xff) as u8
}

/// Set an 8-bit pixel value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u8) {
    let word = &mut line[(x >> 2) as usize];
    let shift = 24 - 8 * (x & 3);
    *word = (*word & !(0xff << shift)) | ((val as u32) << shift);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_byte_packing() {
        let mut line = [0u32; 2];
        set_data_byte(&mut line, 0, 0x11);
        set_data_byte(&mut line, 3, 0x44);
        set_data_byte(&mut line, 4, 0x55);
        assert_eq!(line[0], 0x1100_0044);
        assert_eq!(line[1], 0x5500_0000);
        assert_eq!(get_data_byte(&line, 0), 0x11);
        assert_eq!(get_data_byte(&line, 1), 0);
        assert_eq!(get_data_byte(&line, 3), 0x44);
        assert_eq!(get_data_byte(&line, 4), 0x55);

        set_data_byte(&mut line, 0, 0x22);
        assert_eq!(line[0], 0x2200_0044);
    }

    #[test]
    fn test_get_set_gray() {
        let pix = Pix::new(6, 3, PixelDepth::Bit8).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_pixel(5, 2, 200).unwrap();
        pm.set_pixel(0, 0, 1).unwrap();
        assert!(pm.set_pixel(6, 0, 1).is_err());
        assert!(pm.set_pixel(0, 3, 1).is_err());
        assert_eq!(pm.get_pixel(5, 2), Some(200));

        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(5, 2), Some(200));
        assert_eq!(pix.get_pixel(0, 0), Some(1));
        assert_eq!(pix.get_pixel(4, 2), Some(0));
        assert_eq!(pix.get_pixel(6, 2), None);
        assert_eq!(pix.get_rgb(0, 0), None);
    }

    #[test]
    fn test_get_set_rgb() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_rgb(1, 1, 10, 20, 30).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(1, 1), Some((10, 20, 30)));
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_set_rgb_rejects_gray() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit8).unwrap().to_mut();
        assert!(pm.set_rgb(0, 0, 1, 2, 3).is_err());
    }

    #[test]
    fn test_gray_data_roundtrip() {
        let bytes: Vec<u8> = (0..35).collect();
        let mut pm = Pix::new(7, 5, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_gray_data(&bytes).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(6, 4), Some(34));
        assert_eq!(pix.get_gray_data().unwrap(), bytes);
    }

    #[test]
    fn test_set_gray_data_wrong_len() {
        let mut pm = Pix::new(7, 5, PixelDepth::Bit8).unwrap().to_mut();
        assert!(pm.set_gray_data(&[0u8; 34]).is_err());
    }
}

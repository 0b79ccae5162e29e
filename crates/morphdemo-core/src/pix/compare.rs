//! Image comparison operations
//!
//! - Pixel equality checks
//! - Pixel difference counting

use super::{Pix, PixelDepth, check_same_geometry};
use crate::color;
use crate::error::Result;

/// Result of counting pixel differences between two images
#[derive(Debug, Clone)]
pub struct PixelDiffResult {
    /// Number of pixels that differ
    pub n_diff: u64,
    /// Fraction of pixels that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Maximum per-sample difference
    pub max_diff: u32,
}

impl Pix {
    /// Count the number of pixels that differ between two images.
    ///
    /// For 32 bpp images the color samples are compared; alpha is ignored.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn count_pixel_diffs(&self, other: &Pix) -> Result<PixelDiffResult> {
        check_same_geometry(self, other)?;
        let mut n_diff = 0u64;
        let mut max_diff = 0u32;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let d = sample_diff(
                    self.get_pixel_unchecked(x, y),
                    other.get_pixel_unchecked(x, y),
                    self.depth(),
                );
                if d > 0 {
                    n_diff += 1;
                    max_diff = max_diff.max(d);
                }
            }
        }
        let total = u64::from(self.width()) * u64::from(self.height());
        Ok(PixelDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total as f64,
            max_diff,
        })
    }

    /// Check if two images are exactly equal.
    ///
    /// Images of different size or depth are never equal. Padding bits at
    /// the end of 8 bpp rows are not compared.
    pub fn equals(&self, other: &Pix) -> bool {
        self.count_pixel_diffs(other)
            .map(|r| r.n_diff == 0)
            .unwrap_or(false)
    }

    /// Check whether every sample is zero.
    pub fn is_zero(&self) -> bool {
        (0..self.height()).all(|y| {
            (0..self.width()).all(|x| {
                let p = self.get_pixel_unchecked(x, y);
                match self.depth() {
                    PixelDepth::Bit8 => p == 0,
                    PixelDepth::Bit32 => color::extract_rgb(p) == (0, 0, 0),
                }
            })
        })
    }
}

fn sample_diff(a: u32, b: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit8 => a.abs_diff(b),
        PixelDepth::Bit32 => {
            let (ra, ga, ba) = color::extract_rgb(a);
            let (rb, gb, bb) = color::extract_rgb(b);
            ra.abs_diff(rb).max(ga.abs_diff(gb)).max(ba.abs_diff(bb)) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_gray() {
        let a = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
        assert!(a.equals(&a.deep_clone()));
        let mut b = a.to_mut();
        b.set_pixel(4, 4, 3).unwrap();
        let b: Pix = b.into();
        assert!(!a.equals(&b));

        let r = a.count_pixel_diffs(&b).unwrap();
        assert_eq!(r.n_diff, 1);
        assert_eq!(r.max_diff, 3);
        assert!((r.fract_diff - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_equals_ignores_alpha() {
        let mut a = Pix::new(1, 1, PixelDepth::Bit32).unwrap().to_mut();
        let mut b = Pix::new(1, 1, PixelDepth::Bit32).unwrap().to_mut();
        a.set_pixel(0, 0, color::compose_rgba(1, 2, 3, 0)).unwrap();
        b.set_pixel(0, 0, color::compose_rgba(1, 2, 3, 255)).unwrap();
        let (a, b): (Pix, Pix) = (a.into(), b.into());
        assert!(a.equals(&b));
    }

    #[test]
    fn test_equals_different_geometry() {
        let a = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        let b = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        let c = Pix::new(3, 2, PixelDepth::Bit8).unwrap();
        assert!(!a.equals(&b));
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_is_zero() {
        let a = Pix::new(3, 3, PixelDepth::Bit32).unwrap();
        assert!(a.is_zero());
        let mut b = a.to_mut();
        b.set_rgb(1, 1, 0, 0, 1).unwrap();
        let b: Pix = b.into();
        assert!(!b.is_zero());
    }
}

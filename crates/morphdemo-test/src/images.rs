//! Synthetic test images
//!
//! The regression tests build their inputs procedurally so no image data
//! has to be checked in.

use crate::TestResult;
use morphdemo_core::{Pix, PixelDepth, color};

/// 8 bpp horizontal/vertical ramp: `(3x + 5y) mod 256`.
pub fn make_gray_ramp(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, (3 * x + 5 * y) % 256);
        }
    }
    Ok(pm.into())
}

/// 8 bpp mid-gray field with small bright and dark spots.
///
/// Bright 3x3 spots sit on a 16-pixel grid, dark 3x3 spots on the same
/// grid offset by 8. Top-hat picks up the former, black-hat the latter.
pub fn make_gray_spots(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            let (gx, gy) = (x % 16, y % 16);
            let val = if (4..7).contains(&gx) && (4..7).contains(&gy) {
                230
            } else if (12..15).contains(&gx) && (12..15).contains(&gy) {
                20
            } else {
                128
            };
            pm.set_pixel_unchecked(x, y, val);
        }
    }
    Ok(pm.into())
}

/// 32 bpp image of colored rectangles with a one-pixel noise pattern.
pub fn make_rgb_blocks(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit32)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            let r = if x < width / 2 { 200 } else { 40 };
            let g = if y < height / 2 { 180 } else { 60 };
            let b = ((x * 7 + y * 13) % 97) as u8 + if (x + y) % 11 == 0 { 150 } else { 0 };
            pm.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
        }
    }
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_ramp() {
        let pix = make_gray_ramp(10, 4).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.get_pixel(2, 1), Some(11));
    }

    #[test]
    fn test_gray_spots() {
        let pix = make_gray_spots(32, 32).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(128));
        assert_eq!(pix.get_pixel(5, 5), Some(230));
        assert_eq!(pix.get_pixel(13, 13), Some(20));
    }

    #[test]
    fn test_rgb_blocks() {
        let pix = make_rgb_blocks(8, 8).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        let (r, g, _) = pix.get_rgb(0, 0).unwrap();
        assert_eq!((r, g), (200, 180));
        let (r, g, _) = pix.get_rgb(7, 7).unwrap();
        assert_eq!((r, g), (40, 60));
    }
}

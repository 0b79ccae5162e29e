//! Color morphological operations
//!
//! Implements erosion, dilation, opening, closing, gradient, top-hat and
//! black-hat for 32-bpp color images.
//!
//! # Algorithm
//!
//! Color morphology applies the grayscale operation separately to each RGB
//! channel, then recombines the results. Alpha is not carried over; the
//! output is opaque RGB.

use crate::grayscale::{self, Extremum};
use crate::{MorphError, MorphResult, Sel};
use morphdemo_core::{Pix, PixelDepth, RgbComponent};

fn check_color(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(MorphError::UnsupportedDepth {
            expected: "32 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

fn morph_color(pix: &Pix, sel: &Sel, ext: Extremum) -> MorphResult<Pix> {
    check_color(pix)?;
    let mut planes = Vec::with_capacity(3);
    for comp in RgbComponent::ALL {
        let channel = pix.get_rgb_component(comp)?;
        let data = channel.get_gray_data()?;
        let out = grayscale::morph_plane(&data, pix.width(), pix.height(), sel, ext);
        let mut pm = channel.create_template().to_mut();
        pm.set_gray_data(&out)?;
        planes.push(Pix::from(pm));
    }
    Ok(Pix::create_rgb_image(&planes[0], &planes[1], &planes[2])?)
}

/// Dilate a color image, channel by channel
pub fn dilate_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    morph_color(pix, sel, Extremum::Max)
}

/// Erode a color image, channel by channel
pub fn erode_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    morph_color(pix, sel, Extremum::Min)
}

/// Open a color image (erosion followed by dilation)
pub fn open_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode_color(pix, sel)?;
    dilate_color(&eroded, sel)
}

/// Close a color image (dilation followed by erosion)
pub fn close_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate_color(pix, sel)?;
    erode_color(&dilated, sel)
}

/// Color morphological gradient (dilation - erosion)
pub fn gradient_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate_color(pix, sel)?;
    let eroded = erode_color(pix, sel)?;
    Ok(dilated.arith_subtract(&eroded)?)
}

/// Color top-hat transform (original - opening)
pub fn top_hat_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let opened = open_color(pix, sel)?;
    Ok(pix.arith_subtract(&opened)?)
}

/// Color bottom-hat transform (closing - original)
pub fn bottom_hat_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let closed = close_color(pix, sel)?;
    Ok(closed.arith_subtract(pix)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphdemo_core::color;

    fn two_tone() -> Pix {
        // Left half red-ish, right half blue-ish, one bright green dot
        let mut pm = Pix::new(8, 6, PixelDepth::Bit32).unwrap().to_mut();
        for y in 0..6 {
            for x in 0..8 {
                let (r, b) = if x < 4 { (200, 10) } else { (30, 220) };
                pm.set_rgb(x, y, r, 50, b).unwrap();
            }
        }
        pm.set_rgb(6, 3, 30, 250, 220).unwrap();
        pm.into()
    }

    #[test]
    fn test_channels_are_independent() {
        let pix = two_tone();
        let sel = Sel::create_brick(3, 3).unwrap();
        let d = dilate_color(&pix, &sel).unwrap();
        // On the boundary column, red comes from the left and blue from the right
        assert_eq!(d.get_rgb(3, 0), Some((200, 50, 220)));
        assert_eq!(d.get_rgb(5, 2), Some((30, 250, 220)));

        let e = erode_color(&pix, &sel).unwrap();
        assert_eq!(e.get_rgb(4, 0), Some((30, 50, 10)));
        assert_eq!(e.get_rgb(6, 3), Some((30, 50, 220)));
    }

    #[test]
    fn test_top_hat_finds_dot() {
        let pix = two_tone();
        let sel = Sel::create_brick(3, 3).unwrap();
        let th = top_hat_color(&pix, &sel).unwrap();
        assert_eq!(th.get_rgb(6, 3), Some((0, 200, 0)));
        assert_eq!(th.get_rgb(1, 1), Some((0, 0, 0)));
        let p = th.get_pixel(6, 3).unwrap();
        assert_eq!(color::alpha(p), 255);
    }

    #[test]
    fn test_rejects_gray() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let sel = Sel::create_brick(3, 3).unwrap();
        assert!(matches!(
            dilate_color(&pix, &sel),
            Err(MorphError::UnsupportedDepth { actual: 8, .. })
        ));
    }
}

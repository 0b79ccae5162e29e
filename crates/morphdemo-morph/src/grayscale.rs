//! Grayscale morphological operations
//!
//! Implements erosion, dilation, opening, closing, gradient, top-hat and
//! black-hat for 8-bpp grayscale images with an arbitrary structuring
//! element.
//!
//! # Algorithm
//!
//! - **Dilation**: maximum pixel value over the hits of the SEL
//! - **Erosion**: minimum pixel value over the hits of the SEL
//! - **Opening**: erosion followed by dilation (removes small bright features)
//! - **Closing**: dilation followed by erosion (fills small dark features)
//!
//! Neighbors that fall outside the image are ignored, so the border never
//! darkens a dilation or brightens an erosion.
//!
//! The SEL is split into horizontal runs of hits. For every distinct run
//! length a sliding-window extremum of each image row is computed with the
//! van Herk/Gil-Werman recurrence (three comparisons per pixel whatever the
//! length), and each output pixel combines one precomputed value per run.

use crate::{MorphError, MorphResult, Sel};
use morphdemo_core::{Pix, PixelDepth};
use std::collections::HashMap;

/// Which extremum a pass computes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extremum {
    Min,
    Max,
}

impl Extremum {
    /// Value that never wins the comparison; stands in for outside pixels.
    #[inline]
    fn identity(self) -> u8 {
        match self {
            Extremum::Min => u8::MAX,
            Extremum::Max => 0,
        }
    }

    #[inline]
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Extremum::Min => a.min(b),
            Extremum::Max => a.max(b),
        }
    }
}

/// Sliding-window extremum over one row, with the row padded by
/// `len - 1` identity values on both sides.
///
/// Entry `k` of the result covers source columns `[k - (len - 1), k]`, so
/// there are `width + len - 1` entries.
fn window_extrema(row: &[u8], len: usize, ext: Extremum) -> Vec<u8> {
    let id = ext.identity();
    let pad = len - 1;
    let total = row.len() + 2 * pad;
    let at = |i: usize| -> u8 {
        if i < pad || i >= pad + row.len() {
            id
        } else {
            row[i - pad]
        }
    };

    // Block-wise prefix (g) and suffix (h) extrema
    let mut g = vec![id; total];
    let mut h = vec![id; total];
    for i in 0..total {
        g[i] = if i % len == 0 {
            at(i)
        } else {
            ext.pick(g[i - 1], at(i))
        };
    }
    for i in (0..total).rev() {
        h[i] = if i % len == len - 1 || i == total - 1 {
            at(i)
        } else {
            ext.pick(h[i + 1], at(i))
        };
    }

    (0..row.len() + pad)
        .map(|k| ext.pick(h[k], g[k + pad]))
        .collect()
}

/// Apply erosion or dilation to a row-major byte plane.
pub(crate) fn morph_plane(
    src: &[u8],
    width: u32,
    height: u32,
    sel: &Sel,
    ext: Extremum,
) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let id = ext.identity();
    let runs = sel.row_runs();

    // One table of window extrema per distinct run length, per row
    let mut tables: HashMap<u32, Vec<Vec<u8>>> = HashMap::new();
    for run in &runs {
        tables.entry(run.len).or_insert_with(|| {
            src.chunks_exact(w)
                .map(|row| window_extrema(row, run.len as usize, ext))
                .collect()
        });
    }

    let mut dst = vec![id; w * h];
    for run in &runs {
        let table = &tables[&run.len];
        let pad = run.len as i64 - 1;
        for y in 0..h {
            let sy = y as i64 + run.dy as i64;
            if sy < 0 || sy >= h as i64 {
                continue;
            }
            let line = &table[sy as usize];
            let out = &mut dst[y * w..(y + 1) * w];
            for (x, d) in out.iter_mut().enumerate() {
                // Window end column in padded coordinates
                let k = x as i64 + run.dx as i64 + pad;
                if k < 0 || k >= line.len() as i64 {
                    continue;
                }
                *d = ext.pick(*d, line[k as usize]);
            }
        }
    }
    dst
}

fn check_gray(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

fn morph_gray(pix: &Pix, sel: &Sel, ext: Extremum) -> MorphResult<Pix> {
    check_gray(pix)?;
    let plane = pix.get_gray_data()?;
    let out = morph_plane(&plane, pix.width(), pix.height(), sel, ext);
    let mut pm = pix.create_template().to_mut();
    pm.set_gray_data(&out)?;
    Ok(pm.into())
}

/// Dilate a grayscale image
///
/// Dilation computes the maximum pixel value in the SE neighborhood,
/// which expands bright regions and shrinks dark regions.
pub fn dilate_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    morph_gray(pix, sel, Extremum::Max)
}

/// Erode a grayscale image
///
/// Erosion computes the minimum pixel value in the SE neighborhood,
/// which shrinks bright regions and expands dark regions.
pub fn erode_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    morph_gray(pix, sel, Extremum::Min)
}

/// Open a grayscale image (erosion followed by dilation)
///
/// Opening removes small bright features while preserving the overall shape.
pub fn open_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode_gray(pix, sel)?;
    dilate_gray(&eroded, sel)
}

/// Close a grayscale image (dilation followed by erosion)
///
/// Closing fills small dark features while preserving the overall shape.
pub fn close_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate_gray(pix, sel)?;
    erode_gray(&dilated, sel)
}

/// Grayscale morphological gradient (dilation - erosion)
///
/// Highlights edges and boundaries in the image.
pub fn gradient_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate_gray(pix, sel)?;
    let eroded = erode_gray(pix, sel)?;
    Ok(dilated.arith_subtract(&eroded)?)
}

/// Grayscale top-hat transform (original - opening)
///
/// Extracts bright features smaller than the structuring element.
pub fn top_hat_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let opened = open_gray(pix, sel)?;
    Ok(pix.arith_subtract(&opened)?)
}

/// Grayscale bottom-hat transform (closing - original)
///
/// Extracts dark features smaller than the structuring element. Also
/// known as black-hat.
pub fn bottom_hat_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let closed = close_gray(pix, sel)?;
    Ok(closed.arith_subtract(pix)?)
}

//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale files
//! decode to 8 bpp, color files to 32 bpp RGB.
//!
//! Writing is not supported; `jpeg-decoder` is decode-only.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use morphdemo_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for 16-bit and CMYK files.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (depth, samples) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1usize),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    let expected = width as usize * height as usize * samples;
    if pixels.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            pixels.len(),
            expected
        )));
    }

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    pix_mut.set_informat(ImageFormat::Jpeg);

    for (y, row) in pixels
        .chunks_exact(width as usize * samples)
        .take(height as usize)
        .enumerate()
    {
        for x in 0..width {
            let idx = x as usize * samples;
            let pixel = if samples == 1 {
                row[idx] as u32
            } else {
                color::compose_rgb(row[idx], row[idx + 1], row[idx + 2])
            };
            pix_mut.set_pixel_unchecked(x, y as u32, pixel);
        }
    }

    Ok(pix_mut.into())
}

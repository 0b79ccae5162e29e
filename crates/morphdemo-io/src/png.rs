//! PNG image format support

use crate::{IoError, IoResult};
use morphdemo_core::{ImageFormat, Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Palettes are expanded and 16-bit samples stripped, so the result is
/// 8 bpp for plain grayscale and 32 bpp for everything else.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (pix_depth, spp) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1),
        ColorType::GrayscaleAlpha | ColorType::Rgba => (PixelDepth::Bit32, 4),
        ColorType::Rgb => (PixelDepth::Bit32, 3),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "unexpanded PNG palette".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..bytes_per_row];
        for x in 0..width {
            let pixel = match color_type {
                ColorType::Grayscale => row[x as usize] as u32,
                ColorType::GrayscaleAlpha => {
                    let idx = x as usize * 2;
                    let g = row[idx];
                    color::compose_rgba(g, g, g, row[idx + 1])
                }
                ColorType::Rgb => {
                    let idx = x as usize * 3;
                    color::compose_rgb(row[idx], row[idx + 1], row[idx + 2])
                }
                _ => {
                    let idx = x as usize * 4;
                    color::compose_rgba(row[idx], row[idx + 1], row[idx + 2], row[idx + 3])
                }
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1usize),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, 4),
        PixelDepth::Bit32 => (ColorType::Rgb, 3),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * samples;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..][..bytes_per_row];
        for x in 0..width {
            let pixel = pix.get_pixel_unchecked(x, y);
            let idx = x as usize * samples;
            match color_type {
                ColorType::Grayscale => row[idx] = pixel as u8,
                ColorType::Rgb => {
                    let (r, g, b) = color::extract_rgb(pixel);
                    row[idx..idx + 3].copy_from_slice(&[r, g, b]);
                }
                _ => {
                    let (r, g, b, a) = color::extract_rgba(pixel);
                    row[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

//! BMP image format support
//!
//! Reads and writes uncompressed Windows Bitmap (BMP) files.
//! 8-bit palette images decode to 8 bpp when the palette is pure gray
//! and to 32 bpp RGB otherwise; 24 and 32-bit images decode to 32 bpp.

use crate::{IoError, IoResult};
use morphdemo_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn skip<R: Read>(reader: &mut R, n: usize) -> IoResult<()> {
    let mut buf = vec![0u8; n];
    reader.read_exact(&mut buf)?;
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_u32(&info_header, 4) as i32;
    let height = le_u32(&info_header, 8) as i32;

    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    // BI_RGB, or BI_BITFIELDS with the default masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    if !matches!(bits_per_pixel, 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    skip(&mut reader, (header_size - BMP_INFO_HEADER_SIZE) as usize)?;

    let mut palette: Vec<(u8, u8, u8)> = Vec::new();
    if bits_per_pixel == 8 {
        let num_colors = if colors_used == 0 || colors_used > 256 {
            256
        } else {
            colors_used
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw)?;
        palette = raw.chunks_exact(4).map(|c| (c[2], c[1], c[0])).collect();
    }

    let current_pos = BMP_FILE_HEADER_SIZE + header_size as usize + palette.len() * 4;
    if pixel_offset > current_pos {
        skip(&mut reader, pixel_offset - current_pos)?;
    }

    let gray_palette = !palette.is_empty()
        && palette
            .iter()
            .enumerate()
            .all(|(i, &(r, g, b))| r == g && g == b && r as usize == i);
    let depth = if gray_palette {
        PixelDepth::Bit8
    } else {
        PixelDepth::Bit32
    };

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    pix_mut.set_informat(ImageFormat::Bmp);

    // BMP rows are 4-byte aligned
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let mut row_buffer = vec![0u8; row_stride];

    for row in 0..height {
        reader.read_exact(&mut row_buffer)?;
        let y = if top_down { row } else { height - 1 - row };

        for x in 0..width {
            let pixel = match bits_per_pixel {
                8 => {
                    let index = row_buffer[x as usize];
                    if gray_palette {
                        index as u32
                    } else {
                        let (r, g, b) = palette.get(index as usize).copied().ok_or_else(|| {
                            IoError::InvalidData(format!("palette index {} out of range", index))
                        })?;
                        color::compose_rgb(r, g, b)
                    }
                }
                24 => {
                    let idx = x as usize * 3;
                    color::compose_rgb(row_buffer[idx + 2], row_buffer[idx + 1], row_buffer[idx])
                }
                _ => {
                    let idx = x as usize * 4;
                    color::compose_rgb(row_buffer[idx + 2], row_buffer[idx + 1], row_buffer[idx])
                }
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write a BMP image
///
/// 8 bpp images are written with a gray palette, 32 bpp images as
/// 24-bit RGB.
pub fn write_bmp<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let depth = pix.depth();

    let bits_per_pixel: u16 = match depth {
        PixelDepth::Bit8 => 8,
        PixelDepth::Bit32 => 24,
    };

    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let pixel_data_size = row_stride * height as usize;
    let colormap_size = if depth == PixelDepth::Bit8 { 256 * 4 } else { 0 };

    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + colormap_size;
    let file_size = pixel_offset + pixel_data_size;

    let mut header = Vec::with_capacity(pixel_offset);
    header.extend_from_slice(b"BM");
    header.extend_from_slice(&(file_size as u32).to_le_bytes());
    header.extend_from_slice(&[0u8; 4]); // Reserved
    header.extend_from_slice(&(pixel_offset as u32).to_le_bytes());

    header.extend_from_slice(&BMP_INFO_HEADER_SIZE.to_le_bytes());
    header.extend_from_slice(&(width as i32).to_le_bytes());
    header.extend_from_slice(&(height as i32).to_le_bytes()); // Bottom-up
    header.extend_from_slice(&1u16.to_le_bytes()); // Planes
    header.extend_from_slice(&bits_per_pixel.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes()); // Compression
    header.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    header.extend_from_slice(&0i32.to_le_bytes()); // X pixels per meter
    header.extend_from_slice(&0i32.to_le_bytes()); // Y pixels per meter
    header.extend_from_slice(&0u32.to_le_bytes()); // Colors used
    header.extend_from_slice(&0u32.to_le_bytes()); // Important colors

    if depth == PixelDepth::Bit8 {
        for i in 0..=255u8 {
            header.extend_from_slice(&[i, i, i, 0]);
        }
    }
    writer.write_all(&header)?;

    let mut row_buffer = vec![0u8; row_stride];
    for row in 0..height {
        let y = height - 1 - row;
        for x in 0..width {
            let pixel = pix.get_pixel_unchecked(x, y);
            match depth {
                PixelDepth::Bit8 => row_buffer[x as usize] = pixel as u8,
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(pixel);
                    let idx = x as usize * 3;
                    row_buffer[idx..idx + 3].copy_from_slice(&[b, g, r]);
                }
            }
        }
        writer.write_all(&row_buffer)?;
    }

    Ok(())
}

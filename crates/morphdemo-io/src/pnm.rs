//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with
//! maxval up to 255. Writes P5 for 8 bpp and P6 for 32 bpp.

use crate::{IoError, IoResult};
use morphdemo_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{BufRead, Write};

/// Header token reader that understands `#` comments.
struct Tokens<R> {
    reader: R,
}

impl<R: BufRead> Tokens<R> {
    fn next_byte(&mut self) -> IoResult<Option<u8>> {
        let buf = self.reader.fill_buf()?;
        let Some(&b) = buf.first() else {
            return Ok(None);
        };
        self.reader.consume(1);
        Ok(Some(b))
    }

    /// Read the next whitespace-delimited token.
    ///
    /// Exactly one whitespace byte after the token is consumed, which is
    /// what the binary variants require after maxval.
    fn token(&mut self) -> IoResult<String> {
        let mut tok = String::new();
        loop {
            match self.next_byte()? {
                None if tok.is_empty() => {
                    return Err(IoError::InvalidData("unexpected end of PNM data".to_string()));
                }
                None => return Ok(tok),
                Some(b'#') if tok.is_empty() => {
                    while !matches!(self.next_byte()?, None | Some(b'\n')) {}
                }
                Some(b) if b.is_ascii_whitespace() => {
                    if !tok.is_empty() {
                        return Ok(tok);
                    }
                }
                Some(b) => tok.push(b as char),
            }
        }
    }

    fn number(&mut self) -> IoResult<u32> {
        let tok = self.token()?;
        tok.parse()
            .map_err(|_| IoError::InvalidData(format!("bad PNM number: {:?}", tok)))
    }
}

/// Read a PNM image from a reader.
///
/// # Returns
/// A `Pix` at 8 bpp (PGM) or 32 bpp (PPM). Samples are rescaled to
/// 0..=255 when maxval is below 255.
pub fn read_pnm<R: BufRead>(reader: R) -> IoResult<Pix> {
    let mut tokens = Tokens { reader };
    let magic = tokens.token()?;
    let (ascii, samples) = match magic.as_str() {
        "P2" => (true, 1usize),
        "P3" => (true, 3),
        "P5" => (false, 1),
        "P6" => (false, 3),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                other
            )));
        }
    };

    let width = tokens.number()?;
    let height = tokens.number()?;
    let maxval = tokens.number()?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {}",
            maxval
        )));
    }

    let count = width as usize * height as usize * samples;
    let raw = if ascii {
        (0..count)
            .map(|_| {
                let v = tokens.number()?;
                if v > maxval {
                    return Err(IoError::InvalidData(format!(
                        "PNM sample {} exceeds maxval {}",
                        v, maxval
                    )));
                }
                Ok(v as u8)
            })
            .collect::<IoResult<Vec<u8>>>()?
    } else {
        let mut buf = vec![0u8; count];
        tokens.reader.read_exact(&mut buf)?;
        buf
    };

    let scale = |v: u8| -> u8 {
        if maxval == 255 {
            v
        } else {
            ((v as u32).min(maxval) * 255 / maxval) as u8
        }
    };

    let depth = if samples == 1 {
        PixelDepth::Bit8
    } else {
        PixelDepth::Bit32
    };
    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    pix_mut.set_informat(ImageFormat::Pnm);

    for y in 0..height {
        for x in 0..width {
            let idx = (y as usize * width as usize + x as usize) * samples;
            let pixel = if samples == 1 {
                scale(raw[idx]) as u32
            } else {
                color::compose_rgb(scale(raw[idx]), scale(raw[idx + 1]), scale(raw[idx + 2]))
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P5 (8 bpp grayscale) or P6 (32 bpp RGB) based on the
/// pixel depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let (magic, samples) = match pix.depth() {
        PixelDepth::Bit8 => ("P5", 1usize),
        PixelDepth::Bit32 => ("P6", 3),
    };
    write!(writer, "{}\n{} {}\n255\n", magic, pix.width(), pix.height())?;

    let mut row = vec![0u8; pix.width() as usize * samples];
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let pixel = pix.get_pixel_unchecked(x, y);
            let idx = x as usize * samples;
            if samples == 1 {
                row[idx] = pixel as u8;
            } else {
                let (r, g, b) = color::extract_rgb(pixel);
                row[idx..idx + 3].copy_from_slice(&[r, g, b]);
            }
        }
        writer.write_all(&row)?;
    }
    Ok(())
}

//! morphdemo-io - Image I/O for the morphology demo
//!
//! Reads BMP, JPEG, PNG and PNM files into [`Pix`] images and writes
//! BMP, PNG and PNM. The format of an input file is detected from its
//! magic number, never from its extension.
//!
//! Each format is behind a cargo feature (`bmp`, `pnm`, `png-format`,
//! `jpeg`); all of them are on by default.

mod error;
pub mod format;

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_extension};
pub use morphdemo_core::ImageFormat;

use morphdemo_core::Pix;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened, and a decode or
/// format error if its contents are not a readable image.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "reading {:?} is not enabled",
            other
        ))),
    }
}

/// Write an image to a file path in the given format.
///
/// [`ImageFormat::Unknown`] picks the format from the path's extension.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let format = match format {
        ImageFormat::Unknown => format_from_extension(&path),
        f => f,
    };
    // Encode first so an unsupported format leaves no empty file behind
    let bytes = write_image_mem(pix, format)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(pix, &mut buf, format)?;
    Ok(buf)
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(pix, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            other
        ))),
    }
}

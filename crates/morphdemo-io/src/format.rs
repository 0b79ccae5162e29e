//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.

use crate::{IoError, IoResult};
use morphdemo_core::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// PNM graymap and pixmap, ASCII and binary
    pub const PNM: [&[u8]; 4] = [b"P2", b"P3", b"P5", b"P6"];
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 12];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }
    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }
    if magic::PNM.iter().any(|m| data.starts_with(m)) {
        return Ok(ImageFormat::Pnm);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

/// Guess the output format from a file extension.
///
/// Returns [`ImageFormat::Unknown`] for anything unrecognized.
pub fn format_from_extension<P: AsRef<Path>>(path: P) -> ImageFormat {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("bmp") => ImageFormat::Bmp,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        Some("png") => ImageFormat::Png,
        Some("pnm" | "pgm" | "ppm") => ImageFormat::Pnm,
        _ => ImageFormat::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_magic() {
        assert_eq!(
            detect_format_from_bytes(b"BM\0\0\0\0").unwrap(),
            ImageFormat::Bmp
        );
        assert_eq!(
            detect_format_from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0]).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            detect_format_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(
            detect_format_from_bytes(b"P6\n4 4\n255\n").unwrap(),
            ImageFormat::Pnm
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format_from_bytes(b"GIF89a"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"P"),
            Err(IoError::InvalidData(_))
        ));
        // PBM bitmaps are not decoded
        assert!(detect_format_from_bytes(b"P4\n").is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension("a/lena.JPG"), ImageFormat::Jpeg);
        assert_eq!(format_from_extension("x.ppm"), ImageFormat::Pnm);
        assert_eq!(format_from_extension("x.png"), ImageFormat::Png);
        assert_eq!(format_from_extension("noext"), ImageFormat::Unknown);
    }
}

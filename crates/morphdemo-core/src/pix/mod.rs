//! PIX - The main image container
//!
//! The `Pix` structure is the image type passed between decoders,
//! morphology routines and displays.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - 8 bpp pixels are packed MSB to LSB, four per word
//! - For 32-bit images, color order is RGBA (red in MSB)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To build new pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.
//! A uniquely owned `Pix` can also be overwritten in place through
//! [`Pix::data_mut`], which only copies when the buffer is shared.

mod access;
pub mod arith;
pub mod compare;
pub mod convert;
mod rgb;

pub use access::*;
pub use compare::PixelDiffResult;
pub use rgb::RgbComponent;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 8 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(PixelDepth::Bit8),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// BMP format
    Bmp,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// PNM format
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    /// Input file format
    informat: ImageFormat,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn zeroed(width: u32, height: u32, depth: PixelDepth) -> Self {
        let wpl = Pix::compute_wpl(width, depth);
        let spp = match depth {
            PixelDepth::Bit32 => 3, // Default to RGB
            PixelDepth::Bit8 => 1,
        };
        PixData {
            width,
            height,
            depth,
            spp,
            wpl,
            informat: ImageFormat::Unknown,
            data: vec![0u32; (wpl as usize) * (height as usize)],
        }
    }
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use morphdemo_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Pix {
            inner: Arc::new(PixData::zeroed(width, height, depth)),
        })
    }

    /// Compute words per line for given width and depth.
    ///
    /// # Panics
    ///
    /// Panics if the result would exceed `u32::MAX`.
    #[inline]
    fn compute_wpl(width: u32, depth: PixelDepth) -> u32 {
        let bits_per_line = u64::from(width) * u64::from(depth.bits());
        let wpl = bits_per_line.div_ceil(32);
        u32::try_from(wpl).unwrap_or_else(|_| {
            panic!(
                "image row too large: width={} depth={:?} requires {} words",
                width, depth, wpl
            )
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data, overwriting in place.
    ///
    /// The buffer is copied first only if another `Pix` shares it.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut Arc::make_mut(&mut self.inner).data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Create a new PIX with the same dimensions and metadata as the source.
    ///
    /// The image data is initialized to zero.
    pub fn create_template(&self) -> Self {
        let mut inner = PixData::zeroed(self.inner.width, self.inner.height, self.inner.depth);
        inner.spp = self.inner.spp;
        inner.informat = self.inner.informat;
        Pix {
            inner: Arc::new(inner),
        }
    }

    /// Check if two PIX have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Overwrite this image's pixels with those of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSizes`] or [`Error::IncompatibleDepths`]
    /// if the geometry differs.
    pub fn copy_from(&mut self, src: &Pix) -> Result<()> {
        check_same_geometry(self, src)?;
        let spp = src.spp();
        self.data_mut().copy_from_slice(src.data());
        Arc::make_mut(&mut self.inner).spp = spp;
        Ok(())
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Return an error unless both images have the same size and depth.
pub(crate) fn check_same_geometry(a: &Pix, b: &Pix) -> Result<()> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(Error::IncompatibleSizes(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }
    if a.depth() != b.depth() {
        return Err(Error::IncompatibleDepths(
            a.depth().bits(),
            b.depth().bits(),
        ));
    }
    Ok(())
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Set the samples per pixel.
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// Set the input file format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable raw access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_depth() {
        assert_eq!(PixelDepth::from_bits(8).unwrap(), PixelDepth::Bit8);
        assert_eq!(PixelDepth::from_bits(32).unwrap(), PixelDepth::Bit32);
        assert!(PixelDepth::from_bits(1).is_err());
        assert!(PixelDepth::from_bits(16).is_err());

        assert_eq!(PixelDepth::Bit8.bits(), 8);
    }

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.spp(), 1);

        // 100 * 8 = 800 bits = 25 words
        assert_eq!(pix.wpl(), 25);

        let pix = Pix::new(3, 2, PixelDepth::Bit32).unwrap();
        assert_eq!(pix.spp(), 3);
        assert_eq!(pix.wpl(), 3);
        assert_eq!(pix.data().len(), 6);
    }

    #[test]
    fn test_pix_creation_invalid() {
        assert!(Pix::new(0, 100, PixelDepth::Bit8).is_err());
        assert!(Pix::new(100, 0, PixelDepth::Bit8).is_err());
    }

    #[test]
    fn test_wpl_rounds_up_for_gray() {
        // 5 gray pixels need 2 words
        let pix = Pix::new(5, 1, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.wpl(), 2);
    }

    #[test]
    fn test_clone_shares_data() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let other = pix.clone();
        assert_eq!(pix.ref_count(), 2);
        drop(other);
        assert_eq!(pix.ref_count(), 1);

        let deep = pix.deep_clone();
        assert_eq!(deep.ref_count(), 1);
        assert_eq!(pix.ref_count(), 1);
    }

    #[test]
    fn test_data_mut_in_place_when_unique() {
        let mut pix = Pix::new(4, 1, PixelDepth::Bit8).unwrap();
        let before = pix.data().as_ptr();
        pix.data_mut()[0] = 0x01020304;
        assert_eq!(pix.data().as_ptr(), before);
        assert_eq!(pix.data()[0], 0x01020304);
    }

    #[test]
    fn test_data_mut_copies_when_shared() {
        let mut pix = Pix::new(4, 1, PixelDepth::Bit8).unwrap();
        let shared = pix.clone();
        pix.data_mut()[0] = 7;
        assert_eq!(pix.data()[0], 7);
        assert_eq!(shared.data()[0], 0);
    }

    #[test]
    fn test_try_into_mut() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        let shared = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);
        let pm = pix.try_into_mut().unwrap();
        assert_eq!(pm.width(), 2);
    }

    #[test]
    fn test_create_template() {
        let pix = Pix::new(7, 3, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_spp(4);
        pm.data_mut().fill(0xffffffff);
        let pix: Pix = pm.into();

        let t = pix.create_template();
        assert!(t.sizes_equal(&pix));
        assert_eq!(t.spp(), 4);
        assert!(t.data().iter().all(|&w| w == 0));
    }

    #[test]
    fn test_copy_from() {
        let mut dst = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        let mut src = Pix::new(3, 3, PixelDepth::Bit8).unwrap().to_mut();
        src.data_mut().fill(0xabababab);
        let src: Pix = src.into();

        dst.copy_from(&src).unwrap();
        assert_eq!(dst.data(), src.data());

        let wrong = Pix::new(4, 3, PixelDepth::Bit8).unwrap();
        assert!(dst.copy_from(&wrong).is_err());
        let wrong = Pix::new(3, 3, PixelDepth::Bit32).unwrap();
        assert!(dst.copy_from(&wrong).is_err());
    }
}

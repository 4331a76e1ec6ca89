use std::fmt::{Debug, Formatter};

use kivo_core::image::ImageErrors;
use kivo_inflate::errors::InflateDecodeErrors;

pub enum PngDecodeErrors
{
    /// The 8 byte magic did not match, not a png
    BadSignature,
    /// IHDR carries a bit depth other than 8
    UnsupportedDepth(u8),
    /// IHDR carries a color type outside {0, 2, 4, 6}
    UnsupportedColorType(u8),
    /// IHDR declares Adam7 interlacing
    UnsupportedInterlace,
    /// A scanline starts with a filter byte outside 0..=4
    InvalidFilter(u8),
    /// Stored and computed chunk crc disagree
    ///
    /// Only raised when crc confirmation is enabled
    BadCrc(u32, u32),
    GenericStatic(&'static str),
    Generic(String),
    ZlibDecodeErrors(InflateDecodeErrors),
    Image(ImageErrors)
}

impl Debug for PngDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::UnsupportedDepth(depth) =>
            {
                writeln!(f, "Unsupported bit depth {depth}, only 8 is supported")
            }
            Self::UnsupportedColorType(color) =>
            {
                writeln!(f, "Unsupported color type {color}")
            }
            Self::UnsupportedInterlace =>
            {
                writeln!(f, "Interlaced images are not supported")
            }
            Self::InvalidFilter(filter) => writeln!(f, "Unknown filter type {filter}"),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected} but found {found}"
            ),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::ZlibDecodeErrors(err) =>
            {
                writeln!(f, "Error decoding idat chunks {err:?}")
            }
            Self::Image(err) => writeln!(f, "{err:?}")
        }
    }
}

impl From<&'static str> for PngDecodeErrors
{
    fn from(val: &'static str) -> Self
    {
        Self::GenericStatic(val)
    }
}

impl From<String> for PngDecodeErrors
{
    fn from(val: String) -> Self
    {
        Self::Generic(val)
    }
}

impl From<InflateDecodeErrors> for PngDecodeErrors
{
    fn from(val: InflateDecodeErrors) -> Self
    {
        Self::ZlibDecodeErrors(val)
    }
}

impl From<ImageErrors> for PngDecodeErrors
{
    fn from(val: ImageErrors) -> Self
    {
        Self::Image(val)
    }
}

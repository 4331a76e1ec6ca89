use std::fmt::{Debug, Formatter};

use kivo_core::image::ImageErrors;

/// Errors occurring during encoding
pub enum JpegEncodeErrors
{
    /// SOF0 frames dimensions as u16, larger images cannot be
    /// represented in a baseline file
    TooLargeDimensions(u32, u32),
    Static(&'static str),
    Image(ImageErrors)
}

impl Debug for JpegEncodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::TooLargeDimensions(width, height) => writeln!(
                f,
                "Image dimensions {width}x{height} exceed the 65535 baseline JPEG limit"
            ),
            Self::Static(reason) => writeln!(f, "{reason}"),
            Self::Image(err) => writeln!(f, "{err:?}")
        }
    }
}

impl From<ImageErrors> for JpegEncodeErrors
{
    fn from(val: ImageErrors) -> Self
    {
        Self::Image(val)
    }
}

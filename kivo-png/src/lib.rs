//! A PNG decoder for the subset the transcoder consumes
//!
//! Supports 8-bit, non-interlaced images in grayscale, RGB,
//! grayscale+alpha and RGBA, decoding straight to RGB pixels
//! (alpha is dropped). Chunk CRC verification is opt-in through
//! [`kivo_core::options::DecoderOptions`].
pub use decoder::PngDecoder;

mod constants;
mod crc;
mod decoder;
mod enums;
pub mod error;
mod filters;
mod headers;

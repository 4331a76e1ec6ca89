//! A baseline JPEG encoder
//!
//! Produces sequential, 8-bit, YCbCr JFIF files with 1:1:1
//! sampling (no chroma subsampling) and the standard Annex K
//! quantization and huffman tables.
pub use encoder::JpegEncoder;

mod bitstream;
mod encoder;
pub mod errors;
mod fdct;
mod huffman;
mod tables;

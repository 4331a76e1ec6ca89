//! A zlib/DEFLATE decompressor
//!
//! Decodes zlib wrapped DEFLATE streams (RFC 1950/1951) the way
//! png IDAT payloads carry them. Adler-32 verification is opt-in
//! through [`kivo_core::options::DecoderOptions`].
pub use crate::decoder::DeflateDecoder;

mod bitstream;
mod checksum;
mod constants;
mod decoder;
pub mod errors;
mod huffman;

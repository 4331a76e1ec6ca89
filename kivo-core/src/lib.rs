//! Shared types for the kivo codec crates.
//!
//! This crate holds the small pieces every codec needs,
//! it's put here to minimize code reuse
//!
//! - A bounds checked RGB pixel container, produced by the png
//!   decoder and consumed read-only by the jpeg encoder
//! - A byte-stream reader over a borrowed slice
//! - Decoder and encoder options

pub mod bytestream;
pub mod image;
pub mod options;

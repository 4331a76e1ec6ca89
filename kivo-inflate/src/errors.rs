use std::fmt::{Debug, Formatter};

/// Errors arising when decompression fails
pub enum InflateDecodeErrors
{
    /// Input data is not enough to construct
    /// a full output
    InsufficientData,
    /// A block carried the reserved block type
    InvalidBlockType(u8),
    /// Bits did not decode to any symbol in the
    /// active huffman table
    InvalidCode,
    /// Input data was malformed
    CorruptData(&'static str),
    /// Output adler does not match the stored adler
    ///
    /// Only raised when adler confirmation is enabled
    MismatchedAdler(u32, u32),
    /// Anything else that isn't significant
    Generic(&'static str),
    GenericStr(String)
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::InsufficientData => writeln!(f, "Insufficient data"),
            Self::InvalidBlockType(block_type) =>
            {
                writeln!(f, "Invalid deflate block type {block_type}")
            }
            Self::InvalidCode => writeln!(f, "Invalid huffman code"),
            Self::CorruptData(reason) => writeln!(f, "Corrupt data: {reason}"),
            Self::MismatchedAdler(expected, found) =>
            {
                writeln!(f, "Mismatched adler, expected {expected} but found {found}")
            }
            Self::Generic(reason) => writeln!(f, "{reason}"),
            Self::GenericStr(reason) => writeln!(f, "{reason}")
        }
    }
}

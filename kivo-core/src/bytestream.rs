//! A simple byte-stream reader over a borrowed slice.
//!
//! Chunked formats such as PNG read their containers through
//! this, bit-oriented payloads use their own bit readers.

static ERROR_MSG: &str = "No more bytes";

/// An encapsulation of a byte stream
///
/// The lifetime parameter refers to the buffer the stream
/// reads from, which the caller owns.
pub struct ByteReader<'a>
{
    stream:   &'a [u8],
    position: usize
}

enum Mode
{
    // Big endian
    BE,
    // Little endian
    LE
}

impl<'a> ByteReader<'a>
{
    pub fn new(buf: &'a [u8]) -> ByteReader<'a>
    {
        ByteReader {
            stream:   buf,
            position: 0
        }
    }

    /// Skip `bytes` ahead of the stream
    pub fn skip(&mut self, bytes: usize)
    {
        self.position = self.position.saturating_add(bytes);
    }

    /// Move the stream `bytes` backwards
    pub fn rewind(&mut self, bytes: usize)
    {
        self.position = self.position.saturating_sub(bytes);
    }

    /// Return true if the stream can satisfy `bytes` more reads
    pub fn has(&self, bytes: usize) -> bool
    {
        self.position.saturating_add(bytes) <= self.stream.len()
    }

    pub const fn remaining(&self) -> usize
    {
        self.stream.len().saturating_sub(self.position)
    }

    pub const fn get_position(&self) -> usize
    {
        self.position
    }

    /// Look at `num_bytes` bytes starting `position` bytes past the
    /// cursor without advancing the stream
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], &'static str>
    {
        let start = self.position.saturating_add(position);
        let end = start.saturating_add(num_bytes);

        self.stream.get(start..end).ok_or(ERROR_MSG)
    }

    /// Return the next `num_bytes` bytes and advance the cursor
    /// past them
    pub fn get(&mut self, num_bytes: usize) -> Result<&'a [u8], &'static str>
    {
        let end = self.position.saturating_add(num_bytes);
        let bytes = self.stream.get(self.position..end).ok_or(ERROR_MSG)?;

        self.position = end;

        Ok(bytes)
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a>
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, &'static str>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL)
                {
                    Some(position) =>
                    {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode
                        {
                            Mode::LE => Ok($int_type::from_le_bytes(space)),
                            Mode::BE => Ok($int_type::from_be_bytes(space))
                        }
                    }
                    None => Err(ERROR_MSG)
                }
            }

            /// Read a big-endian value, erroring when the stream
            /// is exhausted
            pub fn $name2(&mut self) -> Result<$int_type, &'static str>
            {
                self.$name(Mode::BE)
            }

            /// Read a big-endian value, returning zero when the
            /// stream is exhausted
            pub fn $name3(&mut self) -> $int_type
            {
                self.$name(Mode::BE).unwrap_or(0)
            }

            /// Read a little-endian value, returning zero when the
            /// stream is exhausted
            #[allow(dead_code)]
            pub fn $name4(&mut self) -> $int_type
            {
                self.$name(Mode::LE).unwrap_or(0)
            }
        }
    };
}

get_single_type!(get_u8_inner, get_u8_err, get_u8, get_u8_le, u8);
get_single_type!(get_u16_inner, get_u16_be_err, get_u16_be, get_u16_le, u16);
get_single_type!(get_u32_inner, get_u32_be_err, get_u32_be, get_u32_le, u32);
get_single_type!(get_u64_inner, get_u64_be_err, get_u64_be, get_u64_le, u64);

//! Canonical huffman table construction and symbol decoding.
//!
//! A table is fully determined by its per-symbol code length
//! vector: codes of length `len` are assigned in ascending symbol
//! order starting from `(first_code[len - 1] + count[len - 1]) << 1`.
//! Decoding walks the length strata one bit at a time, checking the
//! accumulated code against the interval of codes at that length.

use crate::bitstream::BitStreamReader;
use crate::constants::DEFLATE_MAX_CODEWORD_LENGTH;
use crate::errors::InflateDecodeErrors;

pub struct HuffmanTree
{
    /// number of codes of each length, `counts[0]` unused
    counts:   [u16; DEFLATE_MAX_CODEWORD_LENGTH + 1],
    /// symbols sorted by (code length, symbol index), which is
    /// exactly canonical code order
    symbols:  Vec<u16>,
    max_bits: usize
}

impl HuffmanTree
{
    /// Build a canonical table from a vector of code lengths,
    /// zero meaning the symbol is unused.
    ///
    /// Over-subscribed length vectors are rejected, incomplete ones
    /// are allowed since a dynamic block need not use every code.
    pub fn build(code_lengths: &[u8]) -> Result<HuffmanTree, InflateDecodeErrors>
    {
        let mut counts = [0_u16; DEFLATE_MAX_CODEWORD_LENGTH + 1];
        let mut max_bits = 0_usize;

        for len in code_lengths
        {
            let len = usize::from(*len);

            if len > DEFLATE_MAX_CODEWORD_LENGTH
            {
                return Err(InflateDecodeErrors::CorruptData("code length above 15"));
            }
            if len > 0
            {
                counts[len] += 1;
                max_bits = max_bits.max(len);
            }
        }

        // reject codes that overflow the codespace, a codeword of
        // length n claims 1/2^n of it
        let mut codespace_used = 0_u32;

        for len in 1..=max_bits
        {
            codespace_used = (codespace_used << 1) + u32::from(counts[len]);
        }

        if max_bits > 0 && codespace_used > 1 << max_bits
        {
            return Err(InflateDecodeErrors::CorruptData("over-subscribed code"));
        }

        // sort symbols by length then index, offsets[len] is where
        // the run of length len symbols starts
        let mut offsets = [0_usize; DEFLATE_MAX_CODEWORD_LENGTH + 2];

        for len in 1..=max_bits
        {
            offsets[len + 1] = offsets[len] + usize::from(counts[len]);
        }

        let mut symbols = vec![0_u16; offsets[max_bits + 1]];

        for (symbol, len) in code_lengths.iter().enumerate()
        {
            let len = usize::from(*len);

            if len > 0
            {
                symbols[offsets[len]] = symbol as u16;
                offsets[len] += 1;
            }
        }

        Ok(HuffmanTree {
            counts,
            symbols,
            max_bits
        })
    }

    /// Decode one symbol from the stream.
    ///
    /// Fails with [`InflateDecodeErrors::InvalidCode`] when no code
    /// matches within `max_bits` bits, which includes every read on
    /// an empty table.
    pub fn decode_symbol(&self, stream: &mut BitStreamReader)
        -> Result<usize, InflateDecodeErrors>
    {
        let mut code = 0_usize;
        // first canonical code of the current length
        let mut first = 0_usize;
        // index of that code's symbol in the sorted array
        let mut index = 0_usize;

        for len in 1..=self.max_bits
        {
            code |= stream.get_bits(1)? as usize;

            let count = usize::from(self.counts[len]);

            if code < first + count
            {
                return Ok(usize::from(self.symbols[index + (code - first)]));
            }

            index += count;
            first = (first + count) << 1;
            code <<= 1;
        }

        Err(InflateDecodeErrors::InvalidCode)
    }
}

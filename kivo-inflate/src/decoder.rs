use kivo_core::options::DecoderOptions;

use crate::bitstream::BitStreamReader;
use crate::checksum::adler32;
use crate::constants::{
    DEFLATE_BLOCKTYPE_DYNAMIC, DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED,
    DEFLATE_NUM_PRECODE_SYMS, DEFLATE_PRECODE_LENS_PERMUTATION, DIST_BASE, DIST_EXTRA,
    LENGTH_BASE, LENGTH_EXTRA
};
use crate::errors::InflateDecodeErrors;
use crate::huffman::HuffmanTree;

/// A zlib stream decoder
///
/// The decoder borrows the compressed bytes for its whole
/// lifetime and materializes the full output in one call.
pub struct DeflateDecoder<'a>
{
    data:    &'a [u8],
    options: DecoderOptions
}

impl<'a> DeflateDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a>
    {
        DeflateDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> DeflateDecoder<'a>
    {
        DeflateDecoder { data, options }
    }

    /// Decode a zlib wrapped deflate stream.
    ///
    /// The two byte header and four byte adler trailer are skipped
    /// unchecked unless adler confirmation was enabled in the
    /// options.
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        if self.data.len()
            < 2 /* zlib header */
            + 4
        /* adler trailer */
        {
            return Err(InflateDecodeErrors::InsufficientData);
        }

        if self.options.inflate_get_confirm_adler()
        {
            // See https://www.ietf.org/rfc/rfc1950.txt
            let cmf = self.data[0];
            let flg = self.data[1];

            let cm = cmf & 0xF;
            let cinfo = cmf >> 4;

            if cm != 8
            {
                return Err(InflateDecodeErrors::GenericStr(format!(
                    "Unknown zlib compression method {cm}"
                )));
            }
            if cinfo > 7
            {
                return Err(InflateDecodeErrors::GenericStr(format!(
                    "Unknown cinfo `{cinfo}` greater than 7, not allowed"
                )));
            }

            let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

            if flag_checks % 31 != 0
            {
                return Err(InflateDecodeErrors::Generic(
                    "FCHECK integrity not preserved"
                ));
            }
        }

        let payload = &self.data[2..self.data.len() - 4];

        let output = self.decode_deflate(payload)?;

        if self.options.inflate_get_confirm_adler()
        {
            let mut trailer = [0_u8; 4];
            trailer.copy_from_slice(&self.data[self.data.len() - 4..]);

            let expected = u32::from_be_bytes(trailer);
            let found = adler32(&output);

            if expected != found
            {
                return Err(InflateDecodeErrors::MismatchedAdler(expected, found));
            }
        }

        Ok(output)
    }

    /// Decode a raw deflate stream with no zlib wrapper around it
    fn decode_deflate(&self, payload: &[u8]) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let mut stream = BitStreamReader::new(payload);
        let mut output = Vec::new();

        loop
        {
            let is_last_block = stream.get_bits(1)? == 1;
            let block_type = stream.get_bits(2)? as u8;

            match block_type
            {
                DEFLATE_BLOCKTYPE_UNCOMPRESSED =>
                {
                    Self::decode_stored(&mut stream, &mut output)?;
                }
                DEFLATE_BLOCKTYPE_STATIC =>
                {
                    let (litlen_tree, dist_tree) = Self::build_static_trees()?;

                    Self::decode_block(&mut stream, &litlen_tree, &dist_tree, &mut output)?;
                }
                DEFLATE_BLOCKTYPE_DYNAMIC =>
                {
                    let (litlen_tree, dist_tree) = Self::read_dynamic_header(&mut stream)?;

                    Self::decode_block(&mut stream, &litlen_tree, &dist_tree, &mut output)?;
                }
                _ => return Err(InflateDecodeErrors::InvalidBlockType(block_type))
            }

            if is_last_block
            {
                break;
            }
        }

        Ok(output)
    }

    /// Copy a stored block to the output.
    ///
    /// LEN is byte aligned little endian, NLEN is carried in the
    /// stream but discarded.
    fn decode_stored(
        stream: &mut BitStreamReader, output: &mut Vec<u8>
    ) -> Result<(), InflateDecodeErrors>
    {
        stream.align_to_byte();

        let len = stream.get_bits(16)? as usize;
        let _nlen = stream.get_bits(16)?;

        let raw = stream.get_slice(len)?;

        output.extend_from_slice(raw);

        Ok(())
    }

    /// The fixed trees of RFC 1951 §3.2.6: 288 literal/length
    /// symbols with lengths 8/9/7/8 and 32 distance symbols of
    /// length 5
    fn build_static_trees() -> Result<(HuffmanTree, HuffmanTree), InflateDecodeErrors>
    {
        let mut litlen_lengths = [0_u8; 288];

        litlen_lengths[0..144].fill(8);
        litlen_lengths[144..256].fill(9);
        litlen_lengths[256..280].fill(7);
        litlen_lengths[280..288].fill(8);

        let litlen_tree = HuffmanTree::build(&litlen_lengths)?;
        let dist_tree = HuffmanTree::build(&[5_u8; 32])?;

        Ok((litlen_tree, dist_tree))
    }

    /// Read a dynamic block header and build its two trees
    fn read_dynamic_header(
        stream: &mut BitStreamReader
    ) -> Result<(HuffmanTree, HuffmanTree), InflateDecodeErrors>
    {
        let hlit = stream.get_bits(5)? as usize + 257;
        let hdist = stream.get_bits(5)? as usize + 1;
        let hclen = stream.get_bits(4)? as usize + 4;

        let mut precode_lens = [0_u8; DEFLATE_NUM_PRECODE_SYMS];

        for i in DEFLATE_PRECODE_LENS_PERMUTATION.iter().take(hclen)
        {
            precode_lens[usize::from(*i)] = stream.get_bits(3)? as u8;
        }

        let precode_tree = HuffmanTree::build(&precode_lens)?;

        // the repeat codes may overrun the requested count, the
        // excess is dropped below
        let total = hlit + hdist;
        let mut lens = Vec::with_capacity(total + 138);

        while lens.len() < total
        {
            let presym = precode_tree.decode_symbol(stream)?;

            match presym
            {
                0..=15 => lens.push(presym as u8),
                16 =>
                {
                    // repeat the previous length 3 to 6 times
                    let previous = *lens.last().ok_or(InflateDecodeErrors::CorruptData(
                        "repeat code 16 with no previous length"
                    ))?;
                    let repeat = 3 + stream.get_bits(2)? as usize;

                    lens.resize(lens.len() + repeat, previous);
                }
                17 =>
                {
                    // repeat zero 3 to 10 times
                    let repeat = 3 + stream.get_bits(3)? as usize;

                    lens.resize(lens.len() + repeat, 0);
                }
                _ =>
                {
                    // repeat zero 11 to 138 times
                    let repeat = 11 + stream.get_bits(7)? as usize;

                    lens.resize(lens.len() + repeat, 0);
                }
            }
        }
        lens.truncate(total);

        let litlen_tree = HuffmanTree::build(&lens[..hlit])?;
        let dist_tree = HuffmanTree::build(&lens[hlit..])?;

        Ok((litlen_tree, dist_tree))
    }

    /// The literal/length decode loop shared by the fixed and
    /// dynamic block types
    fn decode_block(
        stream: &mut BitStreamReader, litlen_tree: &HuffmanTree, dist_tree: &HuffmanTree,
        output: &mut Vec<u8>
    ) -> Result<(), InflateDecodeErrors>
    {
        loop
        {
            let symbol = litlen_tree.decode_symbol(stream)?;

            if symbol < 256
            {
                output.push(symbol as u8);
            }
            else if symbol == 256
            {
                // end of block
                return Ok(());
            }
            else
            {
                let length_index = symbol - 257;

                if length_index >= LENGTH_BASE.len()
                {
                    return Err(InflateDecodeErrors::CorruptData("invalid length symbol"));
                }

                let length = usize::from(LENGTH_BASE[length_index])
                    + stream.get_bits(LENGTH_EXTRA[length_index])? as usize;

                let dist_symbol = dist_tree.decode_symbol(stream)?;

                if dist_symbol >= DIST_BASE.len()
                {
                    return Err(InflateDecodeErrors::CorruptData("invalid distance symbol"));
                }

                let distance = usize::from(DIST_BASE[dist_symbol])
                    + stream.get_bits(DIST_EXTRA[dist_symbol])? as usize;

                if distance > output.len()
                {
                    return Err(InflateDecodeErrors::CorruptData(
                        "distance exceeds bytes produced so far"
                    ));
                }

                // sequential byte copy so overlapping references
                // replicate the run they step through
                let start = output.len() - distance;

                for i in 0..length
                {
                    let byte = output[start + i];
                    output.push(byte);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    /// Incrementally build a deflate bit stream for tests.
    ///
    /// Header fields and extra bits go in LSB first, huffman codes
    /// go in MSB first, matching RFC 1951 §3.1.1.
    struct BitSink
    {
        bytes: Vec<u8>,
        bit:   u8
    }

    impl BitSink
    {
        fn new() -> BitSink
        {
            BitSink {
                bytes: vec![0],
                bit:   0
            }
        }

        fn push_bit(&mut self, value: u32)
        {
            if value & 1 == 1
            {
                *self.bytes.last_mut().unwrap() |= 1 << self.bit;
            }
            self.bit += 1;
            if self.bit == 8
            {
                self.bit = 0;
                self.bytes.push(0);
            }
        }

        /// Push a header field or extra bits, LSB first
        fn push_bits(&mut self, value: u32, count: u8)
        {
            for i in 0..count
            {
                self.push_bit(value >> i);
            }
        }

        /// Push a huffman code, MSB first
        fn push_code(&mut self, code: u32, count: u8)
        {
            for i in (0..count).rev()
            {
                self.push_bit(code >> i);
            }
        }

        fn into_bytes(self) -> Vec<u8>
        {
            self.bytes
        }
    }

    /// Wrap a raw deflate payload into a zlib stream with a valid
    /// adler trailer
    fn zlib_wrap(payload: &[u8], decompressed: &[u8]) -> Vec<u8>
    {
        let mut out = vec![0x78, 0x01];

        out.extend_from_slice(payload);
        out.extend_from_slice(&adler32(decompressed).to_be_bytes());
        out
    }

    fn stored_stream(data: &[u8]) -> Vec<u8>
    {
        let mut sink = BitSink::new();

        // BFINAL=1, BTYPE=00, then align
        sink.push_bits(1, 1);
        sink.push_bits(0, 2);

        let mut payload = sink.into_bytes();
        // the sink always has a trailing in-progress byte, which
        // here is the alignment padding
        assert_eq!(payload.len(), 1);

        let len = data.len() as u16;

        payload.extend_from_slice(&len.to_le_bytes());
        payload.extend_from_slice(&(!len).to_le_bytes());
        payload.extend_from_slice(data);

        zlib_wrap(&payload, data)
    }

    #[test]
    fn stored_block_roundtrip()
    {
        let data = b"stored blocks copy their payload verbatim";
        let stream = stored_stream(data);

        let mut decoder = DeflateDecoder::new(&stream);

        assert_eq!(decoder.decode_zlib().unwrap(), data);
    }

    #[test]
    fn stored_block_roundtrip_large()
    {
        // one megabyte split across stored blocks of maximum size
        let data: Vec<u8> = (0..1_048_576_u32).map(|i| (i * 31 % 255) as u8).collect();

        let mut payload = Vec::new();

        let chunks: Vec<&[u8]> = data.chunks(65535).collect();

        for (i, chunk) in chunks.iter().enumerate()
        {
            let is_last = i + 1 == chunks.len();
            // each stored block starts on a byte boundary, so the
            // three header bits plus alignment are one byte
            payload.push(u8::from(is_last));

            let len = chunk.len() as u16;

            payload.extend_from_slice(&len.to_le_bytes());
            payload.extend_from_slice(&(!len).to_le_bytes());
            payload.extend_from_slice(chunk);
        }

        let stream = zlib_wrap(&payload, &data);
        let mut decoder = DeflateDecoder::new(&stream);

        assert_eq!(decoder.decode_zlib().unwrap(), data);
    }

    #[test]
    fn fixed_block_with_backreference()
    {
        let mut sink = BitSink::new();

        // BFINAL=1, BTYPE=01
        sink.push_bits(1, 1);
        sink.push_bits(1, 2);

        // fixed code for a literal below 144 is 0x30 + symbol in
        // eight bits
        for byte in b"abc"
        {
            sink.push_code(0x30 + u32::from(*byte), 8);
        }

        // length 6 = symbol 260, no extra bits; codes 256..279 are
        // seven bits starting at zero
        sink.push_code(260 - 256, 7);
        // distance 3 = symbol 2, five bits
        sink.push_code(2, 5);

        // end of block
        sink.push_code(0, 7);

        let payload = sink.into_bytes();
        let expected = b"abcabcabc";
        let stream = zlib_wrap(&payload, expected);

        let mut decoder = DeflateDecoder::new(&stream);

        assert_eq!(decoder.decode_zlib().unwrap(), expected);
    }

    #[test]
    fn dynamic_block_roundtrip()
    {
        // a dynamic block whose literal/length code assigns one bit
        // codes to 'a' (97) and end-of-block, using repeat code 18
        // for the zero runs
        let mut sink = BitSink::new();

        // BFINAL=1, BTYPE=10
        sink.push_bits(1, 1);
        sink.push_bits(2, 2);

        // HLIT=257, HDIST=1, HCLEN=18
        sink.push_bits(0, 5);
        sink.push_bits(0, 5);
        sink.push_bits(18 - 4, 4);

        // precode lengths in permutation order
        // [16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1]:
        // symbol 18 and symbol 1 get length one, the rest zero
        for i in 0..18
        {
            let len = match i
            {
                2 | 17 => 1,
                _ => 0
            };
            sink.push_bits(len, 3);
        }

        // canonical precode: symbol 1 -> code 0, symbol 18 -> code 1
        let emit_len_one = |sink: &mut BitSink| sink.push_code(0, 1);
        let emit_zero_run = |sink: &mut BitSink, run: u32| {
            sink.push_code(1, 1);
            sink.push_bits(run - 11, 7);
        };

        // literal/length lengths: 97 zeros, len(97)=1, 158 zeros,
        // len(256)=1
        emit_zero_run(&mut sink, 97);
        emit_len_one(&mut sink);
        emit_zero_run(&mut sink, 138);
        emit_zero_run(&mut sink, 20);
        emit_len_one(&mut sink);
        // single distance length
        emit_len_one(&mut sink);

        // canonical litlen: 'a' -> 0, 256 -> 1, both one bit
        sink.push_code(0, 1);
        sink.push_code(0, 1);
        sink.push_code(0, 1);
        sink.push_code(1, 1);

        let payload = sink.into_bytes();
        let stream = zlib_wrap(&payload, b"aaa");

        let mut decoder = DeflateDecoder::new(&stream);

        assert_eq!(decoder.decode_zlib().unwrap(), b"aaa");
    }

    #[test]
    fn reserved_block_type_is_rejected()
    {
        // BFINAL=1, BTYPE=11 -> 0b111
        let stream = zlib_wrap(&[0b0000_0111], b"");
        let mut decoder = DeflateDecoder::new(&stream);

        assert!(matches!(
            decoder.decode_zlib(),
            Err(InflateDecodeErrors::InvalidBlockType(3))
        ));
    }

    #[test]
    fn truncated_stream_is_insufficient_data()
    {
        let data = b"will be cut short";
        let mut stream = stored_stream(data);

        // drop the last deflate bytes and the trailer
        stream.truncate(stream.len() - 12);
        // keep a fake trailer so the wrapper split still happens
        stream.extend_from_slice(&[0, 0, 0, 0]);

        let mut decoder = DeflateDecoder::new(&stream);

        assert!(matches!(
            decoder.decode_zlib(),
            Err(InflateDecodeErrors::InsufficientData)
        ));
    }

    #[test]
    fn repeat_code_sixteen_first_is_corrupt()
    {
        let mut sink = BitSink::new();

        // BFINAL=1, BTYPE=10
        sink.push_bits(1, 1);
        sink.push_bits(2, 2);

        // HLIT=257, HDIST=1, HCLEN=4 covering [16, 17, 18, 0]:
        // symbols 16 and 0 get length one
        sink.push_bits(0, 5);
        sink.push_bits(0, 5);
        sink.push_bits(0, 4);

        sink.push_bits(1, 3);
        sink.push_bits(0, 3);
        sink.push_bits(0, 3);
        sink.push_bits(1, 3);

        // canonical: symbol 0 -> code 0, symbol 16 -> code 1;
        // decoding 16 first has no previous length to repeat
        sink.push_code(1, 1);
        sink.push_bits(0, 2);

        let payload = sink.into_bytes();
        let stream = zlib_wrap(&payload, b"");

        let mut decoder = DeflateDecoder::new(&stream);

        assert!(matches!(
            decoder.decode_zlib(),
            Err(InflateDecodeErrors::CorruptData(_))
        ));
    }

    #[test]
    fn distance_past_start_is_corrupt()
    {
        let mut sink = BitSink::new();

        // BFINAL=1, BTYPE=01, then immediately a match of length 3
        // at distance 1 with no bytes produced yet
        sink.push_bits(1, 1);
        sink.push_bits(1, 2);
        sink.push_code(257 - 256, 7);
        sink.push_code(0, 5);

        let payload = sink.into_bytes();
        let stream = zlib_wrap(&payload, b"");

        let mut decoder = DeflateDecoder::new(&stream);

        assert!(matches!(
            decoder.decode_zlib(),
            Err(InflateDecodeErrors::CorruptData(_))
        ));
    }

    #[test]
    fn adler_mismatch_ignored_by_default()
    {
        let data = b"tolerant by default";
        let mut stream = stored_stream(data);

        let len = stream.len();
        // corrupt the trailer
        stream[len - 1] ^= 0xFF;

        let mut decoder = DeflateDecoder::new(&stream);

        assert_eq!(decoder.decode_zlib().unwrap(), data);
    }

    #[test]
    fn adler_mismatch_rejected_in_strict_mode()
    {
        let data = b"strict mode verifies";
        let mut stream = stored_stream(data);

        let len = stream.len();
        stream[len - 1] ^= 0xFF;

        let options = DecoderOptions::default().inflate_set_confirm_adler(true);
        let mut decoder = DeflateDecoder::new_with_options(&stream, options);

        assert!(matches!(
            decoder.decode_zlib(),
            Err(InflateDecodeErrors::MismatchedAdler(_, _))
        ));
    }
}

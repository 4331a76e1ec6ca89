use kivo_core::bytestream::ByteReader;
use kivo_core::image::{Image, Pixel};
use kivo_core::options::DecoderOptions;
use log::{trace, warn};

use crate::constants::PNG_SIGNATURE;
use crate::enums::{FilterType, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::{handle_avg, handle_paeth, handle_sub, handle_up};

#[derive(Copy, Clone)]
pub(crate) struct PngChunk
{
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    pub crc:        u32
}

#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo
{
    pub width:  usize,
    pub height: usize,
    pub depth:  u8,
    pub color:  PngColor
}

pub struct PngDecoder<'a>
{
    pub(crate) seen_hdr:    bool,
    pub(crate) stream:      ByteReader<'a>,
    pub(crate) options:     DecoderOptions,
    pub(crate) png_info:    PngInfo,
    pub(crate) idat_chunks: Vec<u8>
}

impl<'a> PngDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> PngDecoder<'a>
    {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a>
    {
        PngDecoder {
            seen_hdr: false,
            stream: ByteReader::new(data),
            options,
            png_info: PngInfo::default(),
            idat_chunks: Vec::new()
        }
    }

    /// Dimensions of the image, present once the header has
    /// been parsed
    pub const fn get_dimensions(&self) -> Option<(usize, usize)>
    {
        if !self.seen_hdr
        {
            return None;
        }

        Some((self.png_info.width, self.png_info.height))
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors>
    {
        // Format is length - chunk type - [data] - crc
        let chunk_length = self.stream.get_u32_be_err()? as usize;
        let chunk_type_int = self.stream.get_u32_be_err()?.to_be_bytes();

        let mut crc_bytes = [0; 4];

        let crc_ref = self.stream.peek_at(chunk_length, 4)?;

        crc_bytes.copy_from_slice(crc_ref);

        let crc = u32::from_be_bytes(crc_bytes);

        let chunk_type = match &chunk_type_int
        {
            b"IHDR" => PngChunkType::IHDR,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,

            _ => PngChunkType::unkn
        };

        if !self.stream.has(chunk_length + 4 /* crc bytes */)
        {
            let err = format!(
                "Not enough bytes for chunk {:?}, bytes requested are {}, but bytes present are {}",
                chunk_type,
                chunk_length + 4,
                self.stream.remaining()
            );

            return Err(PngDecodeErrors::Generic(err));
        }

        if self.options.png_get_confirm_crc()
        {
            use crate::crc::crc32;

            // go back and point to the chunk type
            self.stream.rewind(4);
            // the crc covers chunk type + chunk data
            let bytes = self.stream.peek_at(0, chunk_length + 4)?;

            let calc_crc = crc32(bytes);

            if crc != calc_crc
            {
                return Err(PngDecodeErrors::BadCrc(crc, calc_crc));
            }
            // point back past the chunk type, the parsers expect
            // the stream at the start of the chunk data
            self.stream.skip(4);
        }

        Ok(PngChunk {
            length: chunk_length,
            chunk: chunk_type_int,
            chunk_type,
            crc
        })
    }

    /// Decode the image, returning its RGB pixels.
    ///
    /// Alpha channels are dropped and grayscale is replicated
    /// across the three channels on the way out.
    pub fn decode(&mut self) -> Result<Image, PngDecodeErrors>
    {
        let signature = self.stream.get_u64_be_err()?;

        if signature != PNG_SIGNATURE
        {
            return Err(PngDecodeErrors::BadSignature);
        }

        // IHDR must come directly after the signature
        if self.stream.peek_at(4, 4)? != b"IHDR"
        {
            return Err(PngDecodeErrors::GenericStatic(
                "First chunk not IHDR, Corrupt PNG"
            ));
        }

        loop
        {
            let header = self.read_chunk_header()?;

            match header.chunk_type
            {
                PngChunkType::IHDR =>
                {
                    self.parse_ihdr(header)?;
                }
                PngChunkType::IDAT =>
                {
                    self.parse_idat(header)?;
                }
                PngChunkType::IEND =>
                {
                    break;
                }
                _ => self.skip_unknown_chunk(header)?
            }
        }

        let deflate_data = self.inflate()?;
        // done with the idat chunks, reclaim their memory before
        // the unfiltered copy is made
        self.idat_chunks = Vec::new();

        let unfiltered = self.unfilter_scanlines(&deflate_data)?;

        self.project_pixels(&unfiltered)
    }

    /// Chunks the decoder does not act on are skipped whole,
    /// critical ones get a louder log line since dropping them
    /// may change the rendered image
    fn skip_unknown_chunk(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        let chunk_name = core::str::from_utf8(&chunk.chunk).unwrap_or("XXXX");

        if chunk.chunk[0] & (1 << 5) == 0
        {
            warn!("Skipping unhandled critical chunk {:?}", chunk_name);
        }
        else
        {
            trace!("Skipping unknown chunk {:?}, length {}", chunk_name, chunk.length);
        }

        self.stream.skip(chunk.length + 4);

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, png_chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        // collect the raw stream, all idat payloads concatenated in
        // file order form one zlib stream handed to inflate at IEND
        let idat_stream = self.stream.get(png_chunk.length)?;

        self.idat_chunks.extend_from_slice(idat_stream);

        // skip crc
        self.stream.skip(4);

        Ok(())
    }

    /// Undo deflate encoding on the collected idat chunks
    fn inflate(&mut self) -> Result<Vec<u8>, PngDecodeErrors>
    {
        let mut decoder =
            kivo_inflate::DeflateDecoder::new_with_options(&self.idat_chunks, self.options);

        decoder
            .decode_zlib()
            .map_err(PngDecodeErrors::ZlibDecodeErrors)
    }

    /// Undo scanline filtering on the whole decompressed buffer
    ///
    /// Each input row is one filter byte followed by
    /// `width * bytes_per_pixel` filtered bytes.
    fn unfilter_scanlines(&self, deflate_data: &[u8]) -> Result<Vec<u8>, PngDecodeErrors>
    {
        let info = &self.png_info;

        let components = info.color.bytes_per_pixel();
        let stride = info.width * components;

        let image_len = (stride + 1) * info.height;

        if deflate_data.len() < image_len
        {
            let msg = format!(
                "Not enough pixel data, expected {} but found {}",
                image_len,
                deflate_data.len()
            );
            return Err(PngDecodeErrors::Generic(msg));
        }

        let mut out = vec![0_u8; stride * info.height];
        // the row above the first one reads as zeroes
        let mut prev_row = vec![0_u8; stride];

        let rows = deflate_data.chunks_exact(stride + 1).take(info.height);

        for (current, in_stride) in out.chunks_exact_mut(stride).zip(rows)
        {
            let filter_byte = in_stride[0];
            let raw = &in_stride[1..];

            let filter = FilterType::from_int(filter_byte)
                .ok_or(PngDecodeErrors::InvalidFilter(filter_byte))?;

            match filter
            {
                FilterType::None => current.copy_from_slice(raw),

                FilterType::Sub => handle_sub(raw, current, components),

                FilterType::Up => handle_up(&prev_row, raw, current),

                FilterType::Average => handle_avg(&prev_row, raw, current, components),

                FilterType::Paeth => handle_paeth(&prev_row, raw, current, components)
            }

            prev_row.copy_from_slice(current);
        }

        Ok(out)
    }

    /// Project unfiltered bytes into RGB pixels, replicating
    /// luma and dropping alpha
    fn project_pixels(&self, data: &[u8]) -> Result<Image, PngDecodeErrors>
    {
        let info = &self.png_info;

        let components = info.color.bytes_per_pixel();
        let count = info.width * info.height;

        let mut pixels = Vec::with_capacity(count);

        for chunk in data.chunks_exact(components).take(count)
        {
            let pixel = match info.color
            {
                PngColor::Luma | PngColor::LumaA => Pixel::new(chunk[0], chunk[0], chunk[0]),

                PngColor::RGB | PngColor::RGBA => Pixel::new(chunk[0], chunk[1], chunk[2]),

                PngColor::Unknown => unreachable!()
            };

            pixels.push(pixel);
        }

        let image = Image::from_pixels(info.width as u32, info.height as u32, pixels)?;

        Ok(image)
    }
}

use kivo_core::image::Image;
use kivo_core::options::EncoderOptions;
use log::info;

use crate::bitstream::BitWriter;
use crate::errors::JpegEncodeErrors;
use crate::fdct::forward_dct;
use crate::huffman::HuffmanTable;
use crate::tables::{
    AC_CHROMINANCE_BITS, AC_CHROMINANCE_VALUES, AC_LUMINANCE_BITS, AC_LUMINANCE_VALUES,
    CHROMINANCE_QUANT_TABLE, DC_CHROMINANCE_BITS, DC_CHROMINANCE_VALUES, DC_LUMINANCE_BITS,
    DC_LUMINANCE_VALUES, LUMINANCE_QUANT_TABLE, ZIGZAG
};

/// A baseline JPEG encoder
///
/// Borrows the image for its whole lifetime and materializes
/// the complete file in one [`encode`](JpegEncoder::encode)
/// call.
pub struct JpegEncoder<'a>
{
    image:   &'a Image,
    options: EncoderOptions
}

impl<'a> JpegEncoder<'a>
{
    pub fn new(image: &'a Image) -> JpegEncoder<'a>
    {
        JpegEncoder::new_with_options(image, EncoderOptions::default())
    }

    pub fn new_with_options(image: &'a Image, options: EncoderOptions) -> JpegEncoder<'a>
    {
        JpegEncoder { image, options }
    }

    /// Encode the image into a complete JFIF byte stream
    pub fn encode(&self) -> Result<Vec<u8>, JpegEncodeErrors>
    {
        let width = self.image.width();
        let height = self.image.height();

        if width == 0 || height == 0
        {
            return Err(JpegEncodeErrors::Static("Cannot encode an empty image"));
        }

        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX)
        {
            return Err(JpegEncodeErrors::TooLargeDimensions(width, height));
        }

        let quality = u32::from(self.options.get_quality());

        info!("Encoding {width}x{height} image at quality {quality}");

        let luma_quant = scale_quant_table(&LUMINANCE_QUANT_TABLE, quality);
        let chroma_quant = scale_quant_table(&CHROMINANCE_QUANT_TABLE, quality);

        // a rough guess, the writer grows as needed
        let mut writer =
            BitWriter::with_capacity(1024 + (width as usize) * (height as usize) / 2);

        // SOI
        writer.write_marker(0xD8);

        write_app0(&mut writer);
        write_dqt(&mut writer, &luma_quant, 0);
        write_dqt(&mut writer, &chroma_quant, 1);
        write_sof0(&mut writer, width as u16, height as u16);
        write_dht(&mut writer, &DC_LUMINANCE_BITS, &DC_LUMINANCE_VALUES, 0x00);
        write_dht(&mut writer, &AC_LUMINANCE_BITS, &AC_LUMINANCE_VALUES, 0x10);
        write_dht(&mut writer, &DC_CHROMINANCE_BITS, &DC_CHROMINANCE_VALUES, 0x01);
        write_dht(&mut writer, &AC_CHROMINANCE_BITS, &AC_CHROMINANCE_VALUES, 0x11);
        write_sos(&mut writer);

        self.encode_scan(&mut writer, &luma_quant, &chroma_quant)?;

        // EOI
        writer.write_marker(0xD9);

        Ok(writer.into_bytes())
    }

    /// The entropy coded segment: one Y, Cb and Cr block per MCU
    /// in row-major MCU order
    fn encode_scan(
        &self, writer: &mut BitWriter, luma_quant: &[i32; 64], chroma_quant: &[i32; 64]
    ) -> Result<(), JpegEncodeErrors>
    {
        let dc_luma = HuffmanTable::from_spec(&DC_LUMINANCE_BITS, &DC_LUMINANCE_VALUES);
        let ac_luma = HuffmanTable::from_spec(&AC_LUMINANCE_BITS, &AC_LUMINANCE_VALUES);
        let dc_chroma = HuffmanTable::from_spec(&DC_CHROMINANCE_BITS, &DC_CHROMINANCE_VALUES);
        let ac_chroma = HuffmanTable::from_spec(&AC_CHROMINANCE_BITS, &AC_CHROMINANCE_VALUES);

        let width = self.image.width();
        let height = self.image.height();

        // tile dimensions rounded up to whole blocks
        let padded_width = (width + 7) / 8 * 8;
        let padded_height = (height + 7) / 8 * 8;

        // per component DC predictors, starting at zero each image
        let mut prev_dc = [0_i32; 3];

        let mut y_block = [[0.0_f32; 8]; 8];
        let mut cb_block = [[0.0_f32; 8]; 8];
        let mut cr_block = [[0.0_f32; 8]; 8];

        for block_y in (0..padded_height).step_by(8)
        {
            for block_x in (0..padded_width).step_by(8)
            {
                for y in 0..8_u32
                {
                    for x in 0..8_u32
                    {
                        // replicate the last row/column beyond the
                        // image edge
                        let px = (block_x + x).min(width - 1);
                        let py = (block_y + y).min(height - 1);

                        let pixel = self.image.at(px, py)?;

                        let (luma, cb, cr) = rgb_to_ycbcr(pixel.r, pixel.g, pixel.b);

                        // level shift before the transform
                        y_block[y as usize][x as usize] = luma - 128.0;
                        cb_block[y as usize][x as usize] = cb - 128.0;
                        cr_block[y as usize][x as usize] = cr - 128.0;
                    }
                }

                forward_dct(&mut y_block);
                forward_dct(&mut cb_block);
                forward_dct(&mut cr_block);

                let y_quant = quantize(&y_block, luma_quant);
                let cb_quant = quantize(&cb_block, chroma_quant);
                let cr_quant = quantize(&cr_block, chroma_quant);

                encode_block(writer, &y_quant, &mut prev_dc[0], &dc_luma, &ac_luma);
                encode_block(writer, &cb_quant, &mut prev_dc[1], &dc_chroma, &ac_chroma);
                encode_block(writer, &cr_quant, &mut prev_dc[2], &dc_chroma, &ac_chroma);
            }
        }

        writer.flush();

        Ok(())
    }
}

/// The JFIF YCbCr transform
fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (f32, f32, f32)
{
    let r = f32::from(r);
    let g = f32::from(g);
    let b = f32::from(b);

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;

    (y, cb, cr)
}

/// Scale an Annex K table by the quality factor, every entry
/// clamped to 1..=255
fn scale_quant_table(table: &[i32; 64], quality: u32) -> [i32; 64]
{
    let quality = quality as i32;
    let scale = if quality < 50 { 5000 / quality } else { 200 - quality * 2 };

    let mut scaled = [0_i32; 64];

    for (out, q) in scaled.iter_mut().zip(table.iter())
    {
        *out = ((q * scale + 50) / 100).clamp(1, 255);
    }
    scaled
}

/// Divide the transformed block by the quantization table,
/// producing coefficients already in zig-zag scan order
fn quantize(block: &[[f32; 8]; 8], quant_table: &[i32; 64]) -> [i32; 64]
{
    let mut out = [0_i32; 64];

    for (i, coefficient) in out.iter_mut().enumerate()
    {
        let natural = ZIGZAG[i];

        let value = block[natural / 8][natural % 8];

        *coefficient = (value / quant_table[natural] as f32).round() as i32;
    }
    out
}

/// Bits needed to represent the magnitude of `value`, zero for
/// zero; the index into the DC/AC magnitude families
fn category(value: i32) -> u8
{
    (32 - value.unsigned_abs().leading_zeros()) as u8
}

/// The low `cat` bits written after a huffman code: the value
/// itself for positive numbers, its ones complement (`value - 1`
/// masked) for negative ones
fn magnitude_bits(value: i32, cat: u8) -> u32
{
    let value = if value < 0 { value - 1 } else { value };

    (value as u32) & ((1_u32 << cat) - 1)
}

/// Entropy code one quantized block: DC differentially, AC as
/// (run, size) pairs with ZRL and EOB escapes
fn encode_block(
    writer: &mut BitWriter, block: &[i32; 64], prev_dc: &mut i32, dc_table: &HuffmanTable,
    ac_table: &HuffmanTable
)
{
    let dc_diff = block[0] - *prev_dc;
    *prev_dc = block[0];

    let dc_cat = category(dc_diff);
    let (code, size) = dc_table.code(dc_cat);

    writer.write_bits(u32::from(code), size);

    if dc_cat > 0
    {
        writer.write_bits(magnitude_bits(dc_diff, dc_cat), dc_cat);
    }

    let mut zero_run = 0_u8;

    for coefficient in &block[1..]
    {
        if *coefficient == 0
        {
            zero_run += 1;
            continue;
        }

        while zero_run >= 16
        {
            // ZRL, sixteen zeros without a closing coefficient
            let (code, size) = ac_table.code(0xF0);

            writer.write_bits(u32::from(code), size);
            zero_run -= 16;
        }

        let cat = category(*coefficient);
        let symbol = (zero_run << 4) | cat;

        let (code, size) = ac_table.code(symbol);

        writer.write_bits(u32::from(code), size);
        writer.write_bits(magnitude_bits(*coefficient, cat), cat);

        zero_run = 0;
    }

    if zero_run > 0
    {
        // EOB, the rest of the block is zero
        let (code, size) = ac_table.code(0x00);

        writer.write_bits(u32::from(code), size);
    }
}

fn write_app0(writer: &mut BitWriter)
{
    writer.write_marker(0xE0);
    writer.write_u16_be(16);
    writer.write_all(b"JFIF\0");
    // version 1.1
    writer.write_u8(0x01);
    writer.write_u8(0x01);
    // no density units, 1x1 aspect, no thumbnail
    writer.write_u8(0x00);
    writer.write_u16_be(1);
    writer.write_u16_be(1);
    writer.write_u8(0x00);
    writer.write_u8(0x00);
}

fn write_dqt(writer: &mut BitWriter, table: &[i32; 64], table_id: u8)
{
    writer.write_marker(0xDB);
    writer.write_u16_be(67);
    // 8-bit precision, table id in the low nibble
    writer.write_u8(table_id);

    // entries go out in zig-zag scan order
    for i in 0..64
    {
        writer.write_u8(table[ZIGZAG[i]] as u8);
    }
}

fn write_sof0(writer: &mut BitWriter, width: u16, height: u16)
{
    writer.write_marker(0xC0);
    writer.write_u16_be(17);
    // sample precision
    writer.write_u8(8);
    writer.write_u16_be(height);
    writer.write_u16_be(width);
    // three components, all 1x1 sampling: Y quantizes with
    // table 0, the chroma pair with table 1
    writer.write_u8(3);
    for (id, quant_table) in [(1_u8, 0_u8), (2, 1), (3, 1)]
    {
        writer.write_u8(id);
        writer.write_u8(0x11);
        writer.write_u8(quant_table);
    }
}

fn write_dht(writer: &mut BitWriter, bits: &[u8; 16], values: &[u8], class_and_id: u8)
{
    writer.write_marker(0xC4);
    writer.write_u16_be(19 + values.len() as u16);
    writer.write_u8(class_and_id);
    writer.write_all(bits);
    writer.write_all(values);
}

fn write_sos(writer: &mut BitWriter)
{
    writer.write_marker(0xDA);
    writer.write_u16_be(12);
    writer.write_u8(3);
    // Y reads DC/AC tables 0, the chroma pair tables 1
    for (id, tables) in [(1_u8, 0x00_u8), (2, 0x11), (3, 0x11)]
    {
        writer.write_u8(id);
        writer.write_u8(tables);
    }
    // spectral selection 0..63, no successive approximation
    writer.write_u8(0);
    writer.write_u8(63);
    writer.write_u8(0);
}

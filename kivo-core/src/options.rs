//! Decoder and encoder options
//!
//! All decoders in the pipeline share one `DecoderOptions`,
//! so strictness configured once at the top applies to the
//! png chunk walker and the inflate core alike.

use bitflags::bitflags;

fn tolerant_flags() -> DecoderFlags
{
    DecoderFlags::empty()
}

fn strict_flags() -> DecoderFlags
{
    let mut flags = DecoderFlags::empty();

    flags.set(DecoderFlags::INFLATE_CONFIRM_ADLER, true);
    flags.set(DecoderFlags::PNG_CONFIRM_CRC, true);

    flags
}

bitflags! {
    /// Decoder options that are flags
    pub struct DecoderFlags: u32 {
        /// Whether the inflate decoder should confirm and report
        /// adler mismatch
        const INFLATE_CONFIRM_ADLER = 0b0000_0001;
        /// Whether the png decoder should confirm chunk crcs
        const PNG_CONFIRM_CRC       = 0b0000_0010;
    }
}

/// Decoder options
///
/// The default is tolerant: checksums are carried in the file
/// formats but not verified, matching what most consumers of
/// damaged-but-decodable files expect. [`DecoderOptions::new_strict`]
/// turns verification on.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions
{
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width
    max_width:  usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    max_height: usize,

    flags: DecoderFlags
}

impl Default for DecoderOptions
{
    fn default() -> Self
    {
        Self {
            max_width:  1 << 14,
            max_height: 1 << 14,
            flags:      tolerant_flags()
        }
    }
}

impl DecoderOptions
{
    /// Create options with every checksum verification enabled
    pub fn new_strict() -> DecoderOptions
    {
        DecoderOptions {
            flags: strict_flags(),
            ..Default::default()
        }
    }

    /// Get maximum width configured for the decoder
    pub const fn get_max_width(&self) -> usize
    {
        self.max_width
    }

    /// Get maximum height configured for the decoder
    pub const fn get_max_height(&self) -> usize
    {
        self.max_height
    }

    pub fn set_max_width(mut self, width: usize) -> Self
    {
        self.max_width = width;
        self
    }

    pub fn set_max_height(mut self, height: usize) -> Self
    {
        self.max_height = height;
        self
    }

    /// Set or clear every checksum verification at once
    pub fn set_strict_mode(mut self, yes: bool) -> Self
    {
        let flags = DecoderFlags::INFLATE_CONFIRM_ADLER | DecoderFlags::PNG_CONFIRM_CRC;

        self.flags.set(flags, yes);
        self
    }

    /// Whether the inflate decoder should confirm
    /// adler checksums
    pub const fn inflate_get_confirm_adler(&self) -> bool
    {
        self.flags.contains(DecoderFlags::INFLATE_CONFIRM_ADLER)
    }

    /// Set whether the inflate decoder should confirm
    /// adler checksums
    pub fn inflate_set_confirm_adler(mut self, yes: bool) -> Self
    {
        self.flags.set(DecoderFlags::INFLATE_CONFIRM_ADLER, yes);
        self
    }

    /// Whether the png decoder should confirm
    /// crc 32 checksums
    pub const fn png_get_confirm_crc(&self) -> bool
    {
        self.flags.contains(DecoderFlags::PNG_CONFIRM_CRC)
    }

    /// Set whether the png decoder should confirm
    /// crc 32 checksums
    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self
    {
        self.flags.set(DecoderFlags::PNG_CONFIRM_CRC, yes);
        self
    }
}

/// Encoder options
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions
{
    /// The quality expected for the image
    ///
    /// Higher values, good visual quality/larger file,
    /// lower values bad visual quality/smaller file
    quality: u8
}

impl Default for EncoderOptions
{
    fn default() -> Self
    {
        Self { quality: 85 }
    }
}

impl EncoderOptions
{
    pub const fn get_quality(&self) -> u8
    {
        self.quality
    }

    /// Set the encode quality, values outside `1..=100`
    /// are clamped into that range
    pub fn set_quality(mut self, quality: u8) -> Self
    {
        self.quality = quality.clamp(1, 100);
        self
    }
}

/// Chunk types the decoder acts on, everything else is
/// handled as unknown
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PngChunkType
{
    IHDR,
    IDAT,
    IEND,
    unkn
}

/// Color layouts of the supported IHDR color types
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
pub enum PngColor
{
    /// Color type 0
    Luma,
    /// Color type 2
    RGB,
    /// Color type 4
    LumaA,
    /// Color type 6
    RGBA,
    #[default]
    Unknown
}

impl PngColor
{
    pub fn from_int(int: u8) -> Option<PngColor>
    {
        match int
        {
            0 => Some(PngColor::Luma),
            2 => Some(PngColor::RGB),
            4 => Some(PngColor::LumaA),
            6 => Some(PngColor::RGBA),
            _ => None
        }
    }

    /// Bytes per pixel, which is also the distance the filters
    /// look back for their left neighbor
    pub const fn bytes_per_pixel(&self) -> usize
    {
        match self
        {
            Self::Luma => 1,
            Self::LumaA => 2,
            Self::RGB => 3,
            Self::RGBA => 4,
            Self::Unknown => 0
        }
    }
}

/// Scanline filter types of the PNG specification
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterType
{
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterType
{
    pub fn from_int(int: u8) -> Option<FilterType>
    {
        match int
        {
            0 => Some(FilterType::None),
            1 => Some(FilterType::Sub),
            2 => Some(FilterType::Up),
            3 => Some(FilterType::Average),
            4 => Some(FilterType::Paeth),
            _ => None
        }
    }
}

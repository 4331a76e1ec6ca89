use log::info;

use crate::decoder::PngChunk;
use crate::enums::PngColor;
use crate::error::PngDecodeErrors;
use crate::PngDecoder;

impl<'a> PngDecoder<'a>
{
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.seen_hdr
        {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != 13
        {
            return Err(PngDecodeErrors::GenericStatic("BAD IHDR length"));
        }

        self.png_info.width = self.stream.get_u32_be() as usize;
        self.png_info.height = self.stream.get_u32_be() as usize;

        if self.png_info.width == 0 || self.png_info.height == 0
        {
            return Err(PngDecodeErrors::GenericStatic(
                "Width or height cannot be zero"
            ));
        }

        if self.png_info.width > self.options.get_max_width()
        {
            return Err(PngDecodeErrors::Generic(format!(
                "Image width {}, larger than maximum configured width {}, aborting",
                self.png_info.width,
                self.options.get_max_width()
            )));
        }

        if self.png_info.height > self.options.get_max_height()
        {
            return Err(PngDecodeErrors::Generic(format!(
                "Image height {}, larger than maximum configured height {}, aborting",
                self.png_info.height,
                self.options.get_max_height()
            )));
        }

        self.png_info.depth = self.stream.get_u8();

        if self.png_info.depth != 8
        {
            return Err(PngDecodeErrors::UnsupportedDepth(self.png_info.depth));
        }

        let color = self.stream.get_u8();

        match PngColor::from_int(color)
        {
            Some(img_color) => self.png_info.color = img_color,
            None => return Err(PngDecodeErrors::UnsupportedColorType(color))
        }

        if self.stream.get_u8() != 0
        {
            return Err(PngDecodeErrors::GenericStatic("Unknown compression method"));
        }

        if self.stream.get_u8() != 0
        {
            return Err(PngDecodeErrors::GenericStatic("Unknown filter method"));
        }

        let interlace_method = self.stream.get_u8();

        if interlace_method != 0
        {
            return Err(PngDecodeErrors::UnsupportedInterlace);
        }

        // skip crc
        self.stream.skip(4);

        info!("Width: {}", self.png_info.width);
        info!("Height: {}", self.png_info.height);
        info!("Depth: {:?}", self.png_info.depth);
        info!("Color type: {:?}", self.png_info.color);

        self.seen_hdr = true;

        Ok(())
    }
}

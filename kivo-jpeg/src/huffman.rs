//! Canonical code generation for the encode side.
//!
//! A DHT specification is sixteen per-length counts followed by
//! the symbol values in code order. Codes are assigned counting
//! up within a length and shifting left when moving to the next,
//! which is the same canonical rule the decode side uses.

pub struct HuffmanTable
{
    codes: [u16; 256],
    sizes: [u8; 256]
}

impl HuffmanTable
{
    /// Expand a (bits, values) specification into per-symbol
    /// codes and sizes
    pub fn from_spec(bits: &[u8; 16], values: &[u8]) -> HuffmanTable
    {
        let mut codes = [0_u16; 256];
        let mut sizes = [0_u8; 256];

        let mut code = 0_u16;
        let mut k = 0_usize;

        for (i, count) in bits.iter().enumerate()
        {
            for _ in 0..*count
            {
                let value = usize::from(values[k]);

                sizes[value] = i as u8 + 1;
                codes[value] = code;

                code += 1;
                k += 1;
            }
            code <<= 1;
        }

        HuffmanTable { codes, sizes }
    }

    /// The (code, size) pair for a symbol; size zero means the
    /// table does not encode it
    #[inline(always)]
    pub fn code(&self, symbol: u8) -> (u16, u8)
    {
        (self.codes[usize::from(symbol)], self.sizes[usize::from(symbol)])
    }
}

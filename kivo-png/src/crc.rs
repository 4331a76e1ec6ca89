//! CRC-32 over chunk type and data, used when crc confirmation
//! is enabled.

const fn make_table() -> [u32; 256]
{
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256
    {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8
        {
            c = if c & 1 == 1 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_table();

/// Compute the crc32 of `data` as PNG defines it (polynomial
/// 0xEDB88320, pre and post conditioned with all ones)
pub fn crc32(data: &[u8]) -> u32
{
    let mut c = u32::MAX;

    for byte in data
    {
        c = CRC_TABLE[((c ^ u32::from(*byte)) & 0xFF) as usize] ^ (c >> 8);
    }

    !c
}

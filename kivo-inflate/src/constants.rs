/// Stored (uncompressed) block
pub const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u8 = 0;

/// Block compressed with the fixed huffman codes of RFC 1951 §3.2.6
pub const DEFLATE_BLOCKTYPE_STATIC: u8 = 1;

/// Block carrying its own huffman code lengths
pub const DEFLATE_BLOCKTYPE_DYNAMIC: u8 = 2;

/// Maximum codeword length across all codes
pub const DEFLATE_MAX_CODEWORD_LENGTH: usize = 15;

/// Number of symbols in the precode (code length code)
pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;

/// Order in which precode lengths are stored
pub static DEFLATE_PRECODE_LENS_PERMUTATION: [u8; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Base match length for the literal/length symbols 257..=285
pub static LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/// Extra bits read after each length symbol
pub static LENGTH_EXTRA: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Base match distance for the distance symbols 0..=29
pub static DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Extra bits read after each distance symbol
pub static DIST_EXTRA: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

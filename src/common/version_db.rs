// Per-version literal tables, indexed by `version - 1`.
//------------------------------------------------------------------------------

/// Error correction layout of one version at one level: EC codewords shared by every block,
/// plus one or two `(block count, data codewords per block)` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ECBlocks {
    pub ec_per_block: usize,
    pub groups: &'static [(usize, usize)],
}

impl ECBlocks {
    const fn new(ec_per_block: usize, groups: &'static [(usize, usize)]) -> Self {
        Self { ec_per_block, groups }
    }
}

pub static ALIGNMENT_PATTERN_CENTERS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Levels ordered L, M, Q, H
pub static EC_BLOCKS: [[ECBlocks; 4]; 40] = [
    [
        ECBlocks::new(7, &[(1, 19)]),
        ECBlocks::new(10, &[(1, 16)]),
        ECBlocks::new(13, &[(1, 13)]),
        ECBlocks::new(17, &[(1, 9)]),
    ],
    [
        ECBlocks::new(10, &[(1, 34)]),
        ECBlocks::new(16, &[(1, 28)]),
        ECBlocks::new(22, &[(1, 22)]),
        ECBlocks::new(28, &[(1, 16)]),
    ],
    [
        ECBlocks::new(15, &[(1, 55)]),
        ECBlocks::new(26, &[(1, 44)]),
        ECBlocks::new(18, &[(2, 17)]),
        ECBlocks::new(22, &[(2, 13)]),
    ],
    [
        ECBlocks::new(20, &[(1, 80)]),
        ECBlocks::new(18, &[(2, 32)]),
        ECBlocks::new(26, &[(2, 24)]),
        ECBlocks::new(16, &[(4, 9)]),
    ],
    [
        ECBlocks::new(26, &[(1, 108)]),
        ECBlocks::new(24, &[(2, 43)]),
        ECBlocks::new(18, &[(2, 15), (2, 16)]),
        ECBlocks::new(22, &[(2, 11), (2, 12)]),
    ],
    [
        ECBlocks::new(18, &[(2, 68)]),
        ECBlocks::new(16, &[(4, 27)]),
        ECBlocks::new(24, &[(4, 19)]),
        ECBlocks::new(28, &[(4, 15)]),
    ],
    [
        ECBlocks::new(20, &[(2, 78)]),
        ECBlocks::new(18, &[(4, 31)]),
        ECBlocks::new(18, &[(2, 14), (4, 15)]),
        ECBlocks::new(26, &[(4, 13), (1, 14)]),
    ],
    [
        ECBlocks::new(24, &[(2, 97)]),
        ECBlocks::new(22, &[(2, 38), (2, 39)]),
        ECBlocks::new(22, &[(4, 18), (2, 19)]),
        ECBlocks::new(26, &[(4, 14), (2, 15)]),
    ],
    [
        ECBlocks::new(30, &[(2, 116)]),
        ECBlocks::new(22, &[(3, 36), (2, 37)]),
        ECBlocks::new(20, &[(4, 16), (4, 17)]),
        ECBlocks::new(24, &[(4, 12), (4, 13)]),
    ],
    [
        ECBlocks::new(18, &[(2, 68), (2, 69)]),
        ECBlocks::new(26, &[(4, 43), (1, 44)]),
        ECBlocks::new(24, &[(6, 19), (2, 20)]),
        ECBlocks::new(28, &[(6, 15), (2, 16)]),
    ],
    [
        ECBlocks::new(20, &[(4, 81)]),
        ECBlocks::new(30, &[(1, 50), (4, 51)]),
        ECBlocks::new(28, &[(4, 22), (4, 23)]),
        ECBlocks::new(24, &[(3, 12), (8, 13)]),
    ],
    [
        ECBlocks::new(24, &[(2, 92), (2, 93)]),
        ECBlocks::new(22, &[(6, 36), (2, 37)]),
        ECBlocks::new(26, &[(4, 20), (6, 21)]),
        ECBlocks::new(28, &[(7, 14), (4, 15)]),
    ],
    [
        ECBlocks::new(26, &[(4, 107)]),
        ECBlocks::new(22, &[(8, 37), (1, 38)]),
        ECBlocks::new(24, &[(8, 20), (4, 21)]),
        ECBlocks::new(22, &[(12, 11), (4, 12)]),
    ],
    [
        ECBlocks::new(30, &[(3, 115), (1, 116)]),
        ECBlocks::new(24, &[(4, 40), (5, 41)]),
        ECBlocks::new(20, &[(11, 16), (5, 17)]),
        ECBlocks::new(24, &[(11, 12), (5, 13)]),
    ],
    [
        ECBlocks::new(22, &[(5, 87), (1, 88)]),
        ECBlocks::new(24, &[(5, 41), (5, 42)]),
        ECBlocks::new(30, &[(5, 24), (7, 25)]),
        ECBlocks::new(24, &[(11, 12), (7, 13)]),
    ],
    [
        ECBlocks::new(24, &[(5, 98), (1, 99)]),
        ECBlocks::new(28, &[(7, 45), (3, 46)]),
        ECBlocks::new(24, &[(15, 19), (2, 20)]),
        ECBlocks::new(30, &[(3, 15), (13, 16)]),
    ],
    [
        ECBlocks::new(28, &[(1, 107), (5, 108)]),
        ECBlocks::new(28, &[(10, 46), (1, 47)]),
        ECBlocks::new(28, &[(1, 22), (15, 23)]),
        ECBlocks::new(28, &[(2, 14), (17, 15)]),
    ],
    [
        ECBlocks::new(30, &[(5, 120), (1, 121)]),
        ECBlocks::new(26, &[(9, 43), (4, 44)]),
        ECBlocks::new(28, &[(17, 22), (1, 23)]),
        ECBlocks::new(28, &[(2, 14), (19, 15)]),
    ],
    [
        ECBlocks::new(28, &[(3, 113), (4, 114)]),
        ECBlocks::new(26, &[(3, 44), (11, 45)]),
        ECBlocks::new(26, &[(17, 21), (4, 22)]),
        ECBlocks::new(26, &[(9, 13), (16, 14)]),
    ],
    [
        ECBlocks::new(28, &[(3, 107), (5, 108)]),
        ECBlocks::new(26, &[(3, 41), (13, 42)]),
        ECBlocks::new(30, &[(15, 24), (5, 25)]),
        ECBlocks::new(28, &[(15, 15), (10, 16)]),
    ],
    [
        ECBlocks::new(28, &[(4, 116), (4, 117)]),
        ECBlocks::new(26, &[(17, 42)]),
        ECBlocks::new(28, &[(17, 22), (6, 23)]),
        ECBlocks::new(30, &[(19, 16), (6, 17)]),
    ],
    [
        ECBlocks::new(28, &[(2, 111), (7, 112)]),
        ECBlocks::new(28, &[(17, 46)]),
        ECBlocks::new(30, &[(7, 24), (16, 25)]),
        ECBlocks::new(24, &[(34, 13)]),
    ],
    [
        ECBlocks::new(30, &[(4, 121), (5, 122)]),
        ECBlocks::new(28, &[(4, 47), (14, 48)]),
        ECBlocks::new(30, &[(11, 24), (14, 25)]),
        ECBlocks::new(30, &[(16, 15), (14, 16)]),
    ],
    [
        ECBlocks::new(30, &[(6, 117), (4, 118)]),
        ECBlocks::new(28, &[(6, 45), (14, 46)]),
        ECBlocks::new(30, &[(11, 24), (16, 25)]),
        ECBlocks::new(30, &[(30, 16), (2, 17)]),
    ],
    [
        ECBlocks::new(26, &[(8, 106), (4, 107)]),
        ECBlocks::new(28, &[(8, 47), (13, 48)]),
        ECBlocks::new(30, &[(7, 24), (22, 25)]),
        ECBlocks::new(30, &[(22, 15), (13, 16)]),
    ],
    [
        ECBlocks::new(28, &[(10, 114), (2, 115)]),
        ECBlocks::new(28, &[(19, 46), (4, 47)]),
        ECBlocks::new(28, &[(28, 22), (6, 23)]),
        ECBlocks::new(30, &[(33, 16), (4, 17)]),
    ],
    [
        ECBlocks::new(30, &[(8, 122), (4, 123)]),
        ECBlocks::new(28, &[(22, 45), (3, 46)]),
        ECBlocks::new(30, &[(8, 23), (26, 24)]),
        ECBlocks::new(30, &[(12, 15), (28, 16)]),
    ],
    [
        ECBlocks::new(30, &[(3, 117), (10, 118)]),
        ECBlocks::new(28, &[(3, 45), (23, 46)]),
        ECBlocks::new(30, &[(4, 24), (31, 25)]),
        ECBlocks::new(30, &[(11, 15), (31, 16)]),
    ],
    [
        ECBlocks::new(30, &[(7, 116), (7, 117)]),
        ECBlocks::new(28, &[(21, 45), (7, 46)]),
        ECBlocks::new(30, &[(1, 23), (37, 24)]),
        ECBlocks::new(30, &[(19, 15), (26, 16)]),
    ],
    [
        ECBlocks::new(30, &[(5, 115), (10, 116)]),
        ECBlocks::new(28, &[(19, 47), (10, 48)]),
        ECBlocks::new(30, &[(15, 24), (25, 25)]),
        ECBlocks::new(30, &[(23, 15), (25, 16)]),
    ],
    [
        ECBlocks::new(30, &[(13, 115), (3, 116)]),
        ECBlocks::new(28, &[(2, 46), (29, 47)]),
        ECBlocks::new(30, &[(42, 24), (1, 25)]),
        ECBlocks::new(30, &[(23, 15), (28, 16)]),
    ],
    [
        ECBlocks::new(30, &[(17, 115)]),
        ECBlocks::new(28, &[(10, 46), (23, 47)]),
        ECBlocks::new(30, &[(10, 24), (35, 25)]),
        ECBlocks::new(30, &[(19, 15), (35, 16)]),
    ],
    [
        ECBlocks::new(30, &[(17, 115), (1, 116)]),
        ECBlocks::new(28, &[(14, 46), (21, 47)]),
        ECBlocks::new(30, &[(29, 24), (19, 25)]),
        ECBlocks::new(30, &[(11, 15), (46, 16)]),
    ],
    [
        ECBlocks::new(30, &[(13, 115), (6, 116)]),
        ECBlocks::new(28, &[(14, 46), (23, 47)]),
        ECBlocks::new(30, &[(44, 24), (7, 25)]),
        ECBlocks::new(30, &[(59, 16), (1, 17)]),
    ],
    [
        ECBlocks::new(30, &[(12, 121), (7, 122)]),
        ECBlocks::new(28, &[(12, 47), (26, 48)]),
        ECBlocks::new(30, &[(39, 24), (14, 25)]),
        ECBlocks::new(30, &[(22, 15), (41, 16)]),
    ],
    [
        ECBlocks::new(30, &[(6, 121), (14, 122)]),
        ECBlocks::new(28, &[(6, 47), (34, 48)]),
        ECBlocks::new(30, &[(46, 24), (10, 25)]),
        ECBlocks::new(30, &[(2, 15), (64, 16)]),
    ],
    [
        ECBlocks::new(30, &[(17, 122), (4, 123)]),
        ECBlocks::new(28, &[(29, 46), (14, 47)]),
        ECBlocks::new(30, &[(49, 24), (10, 25)]),
        ECBlocks::new(30, &[(24, 15), (46, 16)]),
    ],
    [
        ECBlocks::new(30, &[(4, 122), (18, 123)]),
        ECBlocks::new(28, &[(13, 46), (32, 47)]),
        ECBlocks::new(30, &[(48, 24), (14, 25)]),
        ECBlocks::new(30, &[(42, 15), (32, 16)]),
    ],
    [
        ECBlocks::new(30, &[(20, 117), (4, 118)]),
        ECBlocks::new(28, &[(40, 47), (7, 48)]),
        ECBlocks::new(30, &[(43, 24), (22, 25)]),
        ECBlocks::new(30, &[(10, 15), (67, 16)]),
    ],
    [
        ECBlocks::new(30, &[(19, 118), (6, 119)]),
        ECBlocks::new(28, &[(18, 47), (31, 48)]),
        ECBlocks::new(30, &[(34, 24), (34, 25)]),
        ECBlocks::new(30, &[(20, 15), (61, 16)]),
    ],
];

// Masked format information words, paired with their 5-bit payload (EC bits << 3 | mask).
pub static FORMAT_INFOS: [(u32, u8); 32] = [
    (0x5412, 0x00),
    (0x5125, 0x01),
    (0x5E7C, 0x02),
    (0x5B4B, 0x03),
    (0x45F9, 0x04),
    (0x40CE, 0x05),
    (0x4F97, 0x06),
    (0x4AA0, 0x07),
    (0x77C4, 0x08),
    (0x72F3, 0x09),
    (0x7DAA, 0x0A),
    (0x789D, 0x0B),
    (0x662F, 0x0C),
    (0x6318, 0x0D),
    (0x6C41, 0x0E),
    (0x6976, 0x0F),
    (0x1689, 0x10),
    (0x13BE, 0x11),
    (0x1CE7, 0x12),
    (0x19D0, 0x13),
    (0x0762, 0x14),
    (0x0255, 0x15),
    (0x0D0C, 0x16),
    (0x083B, 0x17),
    (0x355F, 0x18),
    (0x3068, 0x19),
    (0x3F31, 0x1A),
    (0x3A06, 0x1B),
    (0x24B4, 0x1C),
    (0x2183, 0x1D),
    (0x2EDA, 0x1E),
    (0x2BED, 0x1F),
];

// Version information words for versions 7 through 40.
pub static VERSION_INFOS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762,
    0x0D847, 0x0E60D, 0x0F928, 0x10B78, 0x1145D, 0x12A17,
    0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4,
    0x191E1, 0x1AFAB, 0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75,
    0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];

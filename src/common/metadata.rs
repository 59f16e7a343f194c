use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use super::bit_matrix::BitMatrix;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::version_db::{ECBlocks, ALIGNMENT_PATTERN_CENTERS, EC_BLOCKS, FORMAT_INFOS, VERSION_INFOS};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two bit code written into format information.
    pub const fn bits(self) -> u8 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.bits() == bits)
    }

    /// Approximate share of codewords that can be restored.
    pub const fn percent(self) -> u8 {
        match self {
            Self::L => 7,
            Self::M => 15,
            Self::Q => 25,
            Self::H => 30,
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(QRError::invalid_argument(format!("Unknown error correction level {s:?}"))),
        }
    }
}


// Version
//------------------------------------------------------------------------------

/// Symbol version 1 to 40. Module grid is `17 + 4 * version` wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Version {
    pub const MIN: usize = 1;
    pub const MAX: usize = 40;

    pub fn new(version: usize) -> QRResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&version) {
            return Err(QRError::invalid_argument(format!(
                "Version must be between 1 and 40, got {version}"
            )));
        }
        Ok(Self(version))
    }

    /// Deduces the version from a symbol's module dimension.
    pub fn from_dimension(dimension: usize) -> QRResult<Self> {
        if dimension % 4 != 1 || dimension < 21 {
            return Err(QRError::invalid_format(format!(
                "Dimension {dimension} is not 17 + 4 * version"
            )));
        }
        Self::new((dimension - 17) / 4)
            .map_err(|e| QRError::invalid_format(format!("Dimension {dimension}: {e}")))
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN..=Self::MAX).map(Version)
    }

    pub const fn width(self) -> usize {
        17 + 4 * self.0
    }

    pub fn alignment_pattern(self) -> &'static [usize] {
        ALIGNMENT_PATTERN_CENTERS[self.0 - 1]
    }

    pub fn ec_blocks(self, ecl: ECLevel) -> &'static ECBlocks {
        &EC_BLOCKS[self.0 - 1][ecl as usize]
    }

    pub fn total_codewords(self) -> usize {
        let ecb = self.ec_blocks(ECLevel::L);
        ecb.groups.iter().map(|(count, dlen)| count * (dlen + ecb.ec_per_block)).sum()
    }

    pub fn ec_per_block(self, ecl: ECLevel) -> usize {
        self.ec_blocks(ecl).ec_per_block
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        self.ec_blocks(ecl).groups.iter().map(|(count, _)| count).sum()
    }

    pub fn total_ec_codewords(self, ecl: ECLevel) -> usize {
        self.ec_per_block(ecl) * self.block_count(ecl)
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.total_ec_codewords(ecl)
    }

    pub fn max_data_bits(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    /// `(data codewords, ec codewords)` of block `block_id`. The first
    /// `block_count - total % block_count` blocks are one data codeword shorter than the rest.
    pub fn block_capacity(self, block_id: usize, ecl: ECLevel) -> QRResult<(usize, usize)> {
        let total = self.total_codewords();
        let data = self.data_codewords(ecl);
        let blocks = self.block_count(ecl);

        if block_id >= blocks {
            return Err(QRError::invalid_argument(format!(
                "Block id {block_id} out of range for {blocks} blocks"
            )));
        }

        let group2_blocks = total % blocks;
        let group1_blocks = blocks - group2_blocks;
        let group1_total = total / blocks;
        let group2_total = group1_total + 1;
        let group1_data = data / blocks;
        let group2_data = group1_data + 1;
        let group1_ec = group1_total - group1_data;
        let group2_ec = group2_total - group2_data;

        if group1_ec != group2_ec {
            return Err(QRError::internal(format!(
                "Mismatched ec codewords between groups: {group1_ec} vs {group2_ec}"
            )));
        }
        let computed = group1_total * group1_blocks + group2_total * group2_blocks;
        if computed != total {
            return Err(QRError::internal(format!(
                "Mismatched total codewords: {computed} vs {total}"
            )));
        }

        if block_id < group1_blocks {
            Ok((group1_data, group1_ec))
        } else {
            Ok((group2_data, group2_ec))
        }
    }

    /// True when `bits`, rounded up to a whole codeword, fit in the data capacity.
    pub fn will_fit(self, ecl: ECLevel, bits: usize) -> bool {
        (bits + 7) >> 3 <= self.data_codewords(ecl)
    }

    /// Smallest version, starting from `min` when given, whose capacity holds `bits(version)`.
    /// The bit count depends on the version because character count widths do.
    pub fn find(
        min: Option<Version>,
        ecl: ECLevel,
        bits: impl Fn(Version) -> usize,
    ) -> QRResult<Version> {
        let start = min.map_or(Self::MIN, |v| v.0);
        (start..=Self::MAX).map(Version).find(|&v| v.will_fit(ecl, bits(v))).ok_or_else(|| {
            QRError::invalid_format(format!(
                "Data too big for any version from {start} at level {ecl:?}: {} bits needed at \
                 version 40, {} available",
                bits(Version(Self::MAX)),
                Version(Self::MAX).max_data_bits(ecl)
            ))
        })
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert_eq!(*Version::new(7).unwrap(), 7);
        assert!(matches!(Version::new(0), Err(QRError::InvalidArgument(_))));
        assert!(matches!(Version::new(41), Err(QRError::InvalidArgument(_))));
    }

    #[test_case(21, 1)]
    #[test_case(45, 7)]
    #[test_case(177, 40)]
    fn test_from_dimension(dimension: usize, version: usize) {
        assert_eq!(*Version::from_dimension(dimension).unwrap(), version);
    }

    #[test_case(22)]
    #[test_case(17)]
    #[test_case(181)]
    fn test_from_bad_dimension(dimension: usize) {
        assert!(matches!(Version::from_dimension(dimension), Err(QRError::InvalidFormat(_))));
    }

    #[test_case(1, 26)]
    #[test_case(5, 134)]
    #[test_case(7, 196)]
    #[test_case(40, 3706)]
    fn test_total_codewords(v: usize, total: usize) {
        assert_eq!(Version::new(v).unwrap().total_codewords(), total);
    }

    #[test]
    fn test_block_totals_match() {
        for v in Version::all() {
            for ecl in ECLevel::ALL {
                let ecb = v.ec_blocks(ecl);
                let sum: usize =
                    ecb.groups.iter().map(|(count, dlen)| count * (dlen + ecb.ec_per_block)).sum();
                assert_eq!(sum, v.total_codewords(), "Version {v} {ecl:?}");
            }
        }
    }

    #[test]
    fn test_block_capacity_matches_table() {
        for v in Version::all() {
            for ecl in ECLevel::ALL {
                let ecb = v.ec_blocks(ecl);
                let mut id = 0;
                for &(count, dlen) in ecb.groups {
                    for _ in 0..count {
                        assert_eq!(v.block_capacity(id, ecl).unwrap(), (dlen, ecb.ec_per_block));
                        id += 1;
                    }
                }
                assert!(matches!(v.block_capacity(id, ecl), Err(QRError::InvalidArgument(_))));
            }
        }
    }

    #[test]
    fn test_max_data_bits() {
        let v = Version::new(1).unwrap();
        assert_eq!(v.max_data_bits(ECLevel::L), 152);
        assert_eq!(v.max_data_bits(ECLevel::M), 128);
        assert_eq!(v.max_data_bits(ECLevel::Q), 104);
        assert_eq!(v.max_data_bits(ECLevel::H), 72);
    }

    #[test]
    fn test_will_fit_boundary() {
        let v = Version::new(1).unwrap();
        assert!(v.will_fit(ECLevel::L, 152));
        assert!(v.will_fit(ECLevel::L, 145));
        assert!(!v.will_fit(ECLevel::L, 153));
    }

    #[test]
    fn test_find() {
        let v = Version::find(None, ECLevel::L, |_| 153).unwrap();
        assert_eq!(*v, 2);
        let v = Version::find(Version::new(5).ok(), ECLevel::L, |_| 10).unwrap();
        assert_eq!(*v, 5);
        let res = Version::find(None, ECLevel::H, |_| 30000);
        assert!(matches!(res, Err(QRError::InvalidFormat(_))));
    }
}

// Format & version information
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;
pub const FORMAT_INFO_POLY: u32 = 0x537;
pub const FORMAT_MASK: u32 = 0x5412;
pub const VERSION_INFO_BIT_LEN: usize = 18;
pub const VERSION_INFO_POLY: u32 = 0x1F25;
pub const INFO_DECODE_TOLERANCE: u32 = 3;

fn bit_width(value: u32) -> u32 {
    u32::BITS - value.leading_zeros()
}

/// Remainder of `value * x^(deg poly)` divided by `poly` over GF(2).
pub fn bch_remainder(value: u32, poly: u32) -> u32 {
    debug_assert!(poly != 0, "BCH generator must be nonzero");
    let msb = bit_width(poly);
    let mut rem = value << (msb - 1);
    while bit_width(rem) >= msb {
        rem ^= poly << (bit_width(rem) - msb);
    }
    rem
}

pub fn hamming_distance(a: u32, b: u32) -> u32 {
    (a ^ b).count_ones()
}

/// Index of the table entry closest to `info`, if within `tolerance` bits.
pub fn rectify_info(info: u32, valid_numbers: &[u32], tolerance: u32) -> Option<usize> {
    let (i, dist) = valid_numbers
        .iter()
        .enumerate()
        .map(|(i, &n)| (i, hamming_distance(info, n)))
        .min_by_key(|&(_, d)| d)?;
    (dist <= tolerance).then_some(i)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
}

impl FormatInfo {
    pub fn new(ec_level: ECLevel, mask: MaskPattern) -> Self {
        Self { ec_level, mask }
    }

    /// Five bit payload: ec level bits followed by mask index.
    pub fn payload(self) -> u32 {
        ((self.ec_level.bits() as u32) << 3) | *self.mask as u32
    }

    /// 15 bit masked word: payload followed by its BCH(15, 5) residue.
    pub fn encode(self) -> u32 {
        let payload = self.payload();
        ((payload << 10) | bch_remainder(payload, FORMAT_INFO_POLY)) ^ FORMAT_MASK
    }

    fn from_payload(payload: u8) -> Option<Self> {
        let ec_level = ECLevel::from_bits((payload >> 3) & 0b11)?;
        let mask = MaskPattern::new(payload & 0b111).ok()?;
        Some(Self { ec_level, mask })
    }

    /// Resolves two read copies of format information, tolerating up to three wrong bits.
    /// Also retries with the mask removed for symbols that skip masking their format words.
    pub fn decode(info_a: u32, info_b: u32) -> Option<Self> {
        Self::lookup(info_a, info_b)
            .or_else(|| Self::lookup(info_a ^ FORMAT_MASK, info_b ^ FORMAT_MASK))
    }

    fn lookup(info_a: u32, info_b: u32) -> Option<Self> {
        let (dist, payload) = FORMAT_INFOS
            .iter()
            .flat_map(|&(code, payload)| {
                [(hamming_distance(info_a, code), payload), (hamming_distance(info_b, code), payload)]
            })
            .min_by_key(|&(d, _)| d)?;
        if dist > INFO_DECODE_TOLERANCE {
            return None;
        }
        Self::from_payload(payload)
    }
}

impl Version {
    /// 18 bit version word, only defined from version 7 up.
    pub fn info(self) -> Option<u32> {
        if self.0 < 7 {
            return None;
        }
        let v = self.0 as u32;
        Some((v << 12) | bch_remainder(v, VERSION_INFO_POLY))
    }

    /// Resolves a read version word to the nearest valid version within three bits.
    pub fn decode_info(info: u32) -> Option<Version> {
        rectify_info(info, &VERSION_INFOS, INFO_DECODE_TOLERANCE).map(|i| Version(i + 7))
    }

    /// Marks every module that is not available for data.
    pub fn function_pattern(self) -> BitMatrix {
        let w = self.width();
        let mut m = BitMatrix::square(w);

        // Finder patterns, separators and format information
        m.set_region(0, 0, 9, 9);
        m.set_region(0, w - 8, 9, 8);
        m.set_region(w - 8, 0, 8, 9);

        let centers = self.alignment_pattern();
        let n = centers.len();
        for (i, &r) in centers.iter().enumerate() {
            for (j, &c) in centers.iter().enumerate() {
                if (i == 0 && (j == 0 || j == n - 1)) || (i == n - 1 && j == 0) {
                    continue;
                }
                m.set_region(r - 2, c - 2, 5, 5);
            }
        }

        // Timing patterns
        m.set_region(9, 6, w - 17, 1);
        m.set_region(6, 9, 1, w - 17);

        if self.0 >= 7 {
            m.set_region(0, w - 11, 6, 3);
            m.set_region(w - 11, 0, 3, 6);
        }
        m
    }
}

#[cfg(test)]
mod info_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::{bch_remainder, FormatInfo, Version, FORMAT_INFO_POLY, FORMAT_MASK};
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::ECLevel;
    use crate::common::version_db::{FORMAT_INFOS, VERSION_INFOS};

    #[test]
    fn test_bch_remainder() {
        // M, mask 5: payload 0b00101
        assert_eq!(bch_remainder(0b00101, FORMAT_INFO_POLY), 0b0011011100);
    }

    #[test_case(ECLevel::M, 0, 0x5412)]
    #[test_case(ECLevel::M, 5, 0x40CE)]
    #[test_case(ECLevel::L, 0, 0x77C4)]
    #[test_case(ECLevel::H, 7, 0x083B)]
    #[test_case(ECLevel::Q, 3, 0x3A06)]
    fn test_format_info(ecl: ECLevel, mask: u8, exp: u32) {
        let fi = FormatInfo::new(ecl, MaskPattern::new(mask).unwrap());
        assert_eq!(fi.encode(), exp);
        assert_eq!(FormatInfo::decode(exp, exp), Some(fi));
    }

    #[test]
    fn test_format_table_matches_bch() {
        for &(code, payload) in FORMAT_INFOS.iter() {
            let p = payload as u32;
            assert_eq!(((p << 10) | bch_remainder(p, FORMAT_INFO_POLY)) ^ FORMAT_MASK, code);
        }
    }

    #[test]
    fn test_version_info() {
        assert_eq!(Version::new(6).unwrap().info(), None);
        assert_eq!(Version::new(7).unwrap().info(), Some(0x07C94));
        for v in 7..=40 {
            let ver = Version::new(v).unwrap();
            assert_eq!(ver.info(), Some(VERSION_INFOS[v - 7]));
            assert_eq!(Version::decode_info(VERSION_INFOS[v - 7]), Some(ver));
        }
    }

    #[test]
    fn test_format_decode_unmasked() {
        let fi = FormatInfo::new(ECLevel::Q, MaskPattern::new(6).unwrap());
        let unmasked = fi.encode() ^ FORMAT_MASK;
        assert_eq!(FormatInfo::decode(unmasked, unmasked), Some(fi));
    }

    #[test]
    fn test_format_decode_second_copy() {
        let fi = FormatInfo::new(ECLevel::H, MaskPattern::new(2).unwrap());
        assert_eq!(FormatInfo::decode(0, fi.encode()), Some(fi));
    }

    #[test]
    fn test_function_pattern() {
        let v1 = Version::new(1).unwrap().function_pattern();
        // 208 data modules in version 1
        assert_eq!(21 * 21 - v1.count_dark(), 208);
        let v7 = Version::new(7).unwrap().function_pattern();
        assert_eq!(45 * 45 - v7.count_dark(), 196 * 8);
        assert!(v7.get(0, 34) && v7.get(34, 0) && v7.get(22, 22));
        assert!(!v7.get(22, 9));
    }

    proptest! {
        #[test]
        fn proptest_format_tolerance(
            ecl in 0u8..4,
            mask in 0u8..8,
            flips in proptest::sample::subsequence((0..15).collect::<Vec<u32>>(), 0..=3),
        ) {
            let fi = FormatInfo::new(ECLevel::ALL[ecl as usize], MaskPattern::new(mask).unwrap());
            let corrupted = flips.iter().fold(fi.encode(), |acc, b| acc ^ (1 << b));
            prop_assert_eq!(FormatInfo::decode(corrupted, corrupted), Some(fi));
        }

        #[test]
        fn proptest_version_tolerance(
            v in 7usize..=40,
            flips in proptest::sample::subsequence((0..18).collect::<Vec<u32>>(), 0..=3),
        ) {
            let corrupted = flips.iter().fold(VERSION_INFOS[v - 7], |acc, b| acc ^ (1 << b));
            prop_assert_eq!(Version::decode_info(corrupted), Some(Version::new(v).unwrap()));
        }
    }
}

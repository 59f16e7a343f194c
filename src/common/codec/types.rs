use super::charset::CharacterSet;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

/// Segment mode. The discriminant is the 4 bit mode indicator.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Terminator = 0b0000,
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    StructuredAppend = 0b0011,
    Byte = 0b0100,
    Fnc1FirstPosition = 0b0101,
    Eci = 0b0111,
    Kanji = 0b1000,
    Fnc1SecondPosition = 0b1001,
}

pub const MODE_INDICATOR_BITS: usize = 4;

impl Mode {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        use Mode::*;
        [
            Terminator,
            Numeric,
            Alphanumeric,
            StructuredAppend,
            Byte,
            Fnc1FirstPosition,
            Eci,
            Kanji,
            Fnc1SecondPosition,
        ]
        .into_iter()
        .find(|m| m.bits() == bits)
    }

    /// Width of the character count field, which grows for versions 10 and 27.
    pub fn char_cnt_bits(self, ver: Version) -> usize {
        let tier = match *ver {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        let widths = match self {
            Self::Numeric => [10, 12, 14],
            Self::Alphanumeric => [9, 11, 13],
            Self::Byte => [8, 16, 16],
            Self::Kanji => [8, 10, 12],
            Self::Terminator
            | Self::StructuredAppend
            | Self::Fnc1FirstPosition
            | Self::Eci
            | Self::Fnc1SecondPosition => [0, 0, 0],
        };
        widths[tier]
    }

    /// Whether every character of `content` can be carried by this mode.
    pub fn supports(self, content: &str) -> bool {
        match self {
            Self::Numeric => content.bytes().all(|b| Self::Numeric.contains(b)),
            Self::Alphanumeric => content.bytes().all(|b| Self::Alphanumeric.contains(b)),
            Self::Byte => true,
            Self::Kanji => CharacterSet::ShiftJis
                .encode(content)
                .is_ok_and(|sjis| sjis.len() == content.chars().count() * 2 && kanji_pairs_valid(&sjis)),
            Self::Terminator
            | Self::StructuredAppend
            | Self::Fnc1FirstPosition
            | Self::Eci
            | Self::Fnc1SecondPosition => false,
        }
    }

    pub fn contains(self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => alphanumeric_code(byte).is_some(),
            Self::Byte => true,
            _ => false,
        }
    }

    /// Payload bit length for `len` characters, or bytes in byte mode.
    pub fn encoded_len(self, len: usize) -> usize {
        match self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
            _ => 0,
        }
    }

    /// Packs a numeric group of up to three digits or an alphanumeric pair.
    pub fn encode_chunk(self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + alphanumeric_digit(*b))
            }
            _ => unreachable!("{self:?} mode carries no character data"),
        }
    }
}

#[inline]
fn numeric_digit(char: u8) -> u16 {
    debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
    (char - b'0') as u16
}

#[inline]
fn alphanumeric_digit(char: u8) -> u16 {
    debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
    alphanumeric_code(char).unwrap_or_default() as u16
}

pub fn alphanumeric_code(char: u8) -> Option<u8> {
    match char {
        b'0'..=b'9' => Some(char - b'0'),
        b'A'..=b'Z' => Some(char - b'A' + 10),
        b' ' => Some(36),
        b'$' => Some(37),
        b'%' => Some(38),
        b'*' => Some(39),
        b'+' => Some(40),
        b'-' => Some(41),
        b'.' => Some(42),
        b'/' => Some(43),
        b':' => Some(44),
        _ => None,
    }
}

// Kanji
//------------------------------------------------------------------------------

const KANJI_RANGE_1: (u16, u16, u16) = (0x8140, 0x9FFC, 0x8140);
const KANJI_RANGE_2: (u16, u16, u16) = (0xE040, 0xEBBF, 0xC140);

/// 13 bit value of one Shift JIS double byte character.
pub fn kanji_value(hi: u8, lo: u8) -> QRResult<u16> {
    let code = u16::from_be_bytes([hi, lo]);
    let offset = [KANJI_RANGE_1, KANJI_RANGE_2]
        .into_iter()
        .find(|&(start, end, _)| (start..=end).contains(&code))
        .map(|(_, _, offset)| offset)
        .ok_or_else(|| {
            QRError::invalid_format(format!("Shift JIS code 0x{code:04X} is outside the kanji ranges"))
        })?;
    let sub = code - offset;
    Ok((sub >> 8) * 0xC0 + (sub & 0xFF))
}

fn kanji_pairs_valid(sjis: &[u8]) -> bool {
    sjis.len() % 2 == 0 && sjis.chunks_exact(2).all(|p| kanji_value(p[0], p[1]).is_ok())
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode::*;
    use super::{alphanumeric_digit, kanji_value, numeric_digit, Mode};
    use crate::common::error::QRError;
    use crate::common::metadata::Version;

    #[test]
    fn test_bits() {
        assert_eq!(Numeric.bits(), 0b0001);
        assert_eq!(Eci.bits(), 0b0111);
        assert_eq!(Fnc1SecondPosition.bits(), 0b1001);
        assert_eq!(Mode::from_bits(8), Some(Kanji));
        assert_eq!(Mode::from_bits(6), None);
    }

    #[test_case(Numeric, [10, 12, 14])]
    #[test_case(Alphanumeric, [9, 11, 13])]
    #[test_case(Byte, [8, 16, 16])]
    #[test_case(Kanji, [8, 10, 12])]
    #[test_case(Eci, [0, 0, 0])]
    fn test_char_cnt_bits(mode: Mode, exp: [usize; 3]) {
        for (ver, exp) in [(1, 9), (10, 26), (27, 40)].iter().zip(exp) {
            assert_eq!(mode.char_cnt_bits(Version::new(ver.0).unwrap()), exp);
            assert_eq!(mode.char_cnt_bits(Version::new(ver.1).unwrap()), exp);
        }
    }

    #[test]
    fn test_numeric_digit() {
        assert_eq!(numeric_digit(b'0'), 0);
        assert_eq!(numeric_digit(b'9'), 9);
    }

    #[test]
    #[should_panic]
    fn test_invalid_numeric_digit() {
        numeric_digit(b'A');
    }

    #[test]
    fn test_alphanumeric_digit() {
        assert_eq!(alphanumeric_digit(b'0'), 0);
        assert_eq!(alphanumeric_digit(b'9'), 9);
        assert_eq!(alphanumeric_digit(b'A'), 10);
        assert_eq!(alphanumeric_digit(b'Z'), 35);
        assert_eq!(alphanumeric_digit(b' '), 36);
        assert_eq!(alphanumeric_digit(b':'), 44);
    }

    #[test]
    #[should_panic]
    fn test_invalid_alphanumeric_digit() {
        alphanumeric_digit(b'a');
    }

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Numeric.encode_chunk("012".as_bytes()), 0b0000001100);
        assert_eq!(Numeric.encode_chunk("345".as_bytes()), 0b0101011001);
        assert_eq!(Numeric.encode_chunk("901".as_bytes()), 0b1110000101);
        assert_eq!(Numeric.encode_chunk("67".as_bytes()), 0b1000011);
        assert_eq!(Numeric.encode_chunk("8".as_bytes()), 0b1000);
    }

    #[test]
    #[should_panic]
    fn test_invalid_numeric_encoding() {
        Numeric.encode_chunk("1234".as_bytes());
    }

    #[test]
    fn test_alphanumeric_encoding() {
        assert_eq!(Alphanumeric.encode_chunk("AC".as_bytes()), 0b00111001110);
        assert_eq!(Alphanumeric.encode_chunk("-4".as_bytes()), 0b11100111001);
        assert_eq!(Alphanumeric.encode_chunk("2".as_bytes()), 0b000010);
    }

    #[test]
    #[should_panic]
    fn test_invalid_alphanumeric_encoding() {
        Alphanumeric.encode_chunk("1234".as_bytes());
    }

    #[test]
    #[should_panic(expected = "carries no character data")]
    fn test_byte_chunk_unsupported() {
        Byte.encode_chunk(b"a");
    }

    #[test]
    fn test_is_alphanumeric() {
        for b in b"09AZ $%*+-./:" {
            assert!(Alphanumeric.contains(*b));
        }
        assert!(!Alphanumeric.contains(b'@'));
        assert!(!Alphanumeric.contains(b'('));
        assert!(!Alphanumeric.contains(b'a'));
        assert!(!Numeric.contains(b' '));
    }

    #[test_case(Numeric, "0123456789", true)]
    #[test_case(Numeric, "12a", false)]
    #[test_case(Alphanumeric, "HELLO WORLD", true)]
    #[test_case(Alphanumeric, "Hello", false)]
    #[test_case(Byte, "anything \u{1F30F}", true)]
    #[test_case(Kanji, "\u{70B9}\u{8317}", true)]
    #[test_case(Kanji, "\u{70B9}A", false)]
    #[test_case(Kanji, "\u{FF71}", false)]
    #[test_case(Eci, "", false)]
    fn test_supports(mode: Mode, content: &str, exp: bool) {
        assert_eq!(mode.supports(content), exp);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Numeric.encoded_len(3), 10);
        assert_eq!(Numeric.encoded_len(2), 7);
        assert_eq!(Numeric.encoded_len(1), 4);
        assert_eq!(Numeric.encoded_len(8), 27);
        assert_eq!(Alphanumeric.encoded_len(2), 11);
        assert_eq!(Alphanumeric.encoded_len(1), 6);
        assert_eq!(Byte.encoded_len(1), 8);
        assert_eq!(Kanji.encoded_len(2), 26);
    }

    #[test]
    fn test_kanji_value() {
        // 点 is 0x935F, 茗 is 0xE4AA in Shift JIS
        assert_eq!(kanji_value(0x93, 0x5F).unwrap(), 0x0D9F);
        assert_eq!(kanji_value(0xE4, 0xAA).unwrap(), 0x1AAA);
        assert!(matches!(kanji_value(0xA0, 0x40), Err(QRError::InvalidFormat(_))));
        assert!(matches!(kanji_value(0xEC, 0x40), Err(QRError::InvalidFormat(_))));
    }
}

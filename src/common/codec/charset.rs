use std::fmt::{Display, Formatter};
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::common::error::{QRError, QRResult};

// Character set
//------------------------------------------------------------------------------

/// Character sets that can be announced with an Extended Channel Interpretation header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    Ascii,
    Cp437,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    Iso8859_11,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Cp1250,
    Cp1251,
    Cp1252,
    Cp1256,
    Utf16Be,
    Utf8,
    Big5,
    ShiftJis,
    Gb18030,
    EucKr,
}

impl CharacterSet {
    /// Character set assumed by readers when no ECI header is present.
    pub const DEFAULT: Self = Self::Iso8859_1;

    pub const ALL: [Self; 27] = [
        Self::Ascii,
        Self::Cp437,
        Self::Iso8859_1,
        Self::Iso8859_2,
        Self::Iso8859_3,
        Self::Iso8859_4,
        Self::Iso8859_5,
        Self::Iso8859_6,
        Self::Iso8859_7,
        Self::Iso8859_8,
        Self::Iso8859_9,
        Self::Iso8859_10,
        Self::Iso8859_11,
        Self::Iso8859_13,
        Self::Iso8859_14,
        Self::Iso8859_15,
        Self::Iso8859_16,
        Self::Cp1250,
        Self::Cp1251,
        Self::Cp1252,
        Self::Cp1256,
        Self::Utf16Be,
        Self::Utf8,
        Self::Big5,
        Self::ShiftJis,
        Self::Gb18030,
        Self::EucKr,
    ];

    /// Assignment values; the first one is written into ECI headers.
    pub fn eci_values(self) -> &'static [u32] {
        match self {
            Self::Ascii => &[27, 170],
            Self::Cp437 => &[0, 2],
            Self::Iso8859_1 => &[1, 3],
            Self::Iso8859_2 => &[4],
            Self::Iso8859_3 => &[5],
            Self::Iso8859_4 => &[6],
            Self::Iso8859_5 => &[7],
            Self::Iso8859_6 => &[8],
            Self::Iso8859_7 => &[9],
            Self::Iso8859_8 => &[10],
            Self::Iso8859_9 => &[11],
            Self::Iso8859_10 => &[12],
            Self::Iso8859_11 => &[13],
            Self::Iso8859_13 => &[15],
            Self::Iso8859_14 => &[16],
            Self::Iso8859_15 => &[17],
            Self::Iso8859_16 => &[18],
            Self::ShiftJis => &[20],
            Self::Cp1250 => &[21],
            Self::Cp1251 => &[22],
            Self::Cp1252 => &[23],
            Self::Cp1256 => &[24],
            Self::Utf16Be => &[25],
            Self::Utf8 => &[26],
            Self::Big5 => &[28],
            Self::Gb18030 => &[29],
            Self::EucKr => &[30],
        }
    }

    pub fn eci(self) -> u32 {
        self.eci_values()[0]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "US-ASCII",
            Self::Cp437 => "Cp437",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Iso8859_2 => "ISO-8859-2",
            Self::Iso8859_3 => "ISO-8859-3",
            Self::Iso8859_4 => "ISO-8859-4",
            Self::Iso8859_5 => "ISO-8859-5",
            Self::Iso8859_6 => "ISO-8859-6",
            Self::Iso8859_7 => "ISO-8859-7",
            Self::Iso8859_8 => "ISO-8859-8",
            Self::Iso8859_9 => "ISO-8859-9",
            Self::Iso8859_10 => "ISO-8859-10",
            Self::Iso8859_11 => "ISO-8859-11",
            Self::Iso8859_13 => "ISO-8859-13",
            Self::Iso8859_14 => "ISO-8859-14",
            Self::Iso8859_15 => "ISO-8859-15",
            Self::Iso8859_16 => "ISO-8859-16",
            Self::Cp1250 => "windows-1250",
            Self::Cp1251 => "windows-1251",
            Self::Cp1252 => "windows-1252",
            Self::Cp1256 => "windows-1256",
            Self::Utf16Be => "UnicodeBig",
            Self::Utf8 => "UTF-8",
            Self::Big5 => "Big-5",
            Self::ShiftJis => "Shift_JIS",
            Self::Gb18030 => "GB2312",
            Self::EucKr => "EUC-KR",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Ascii => &["ASCII"],
            Self::Cp437 => &["IBM437"],
            Self::Iso8859_1 => &["ISO8859_1", "Latin1"],
            Self::Cp1250 => &["Cp1250"],
            Self::Cp1251 => &["Cp1251"],
            Self::Cp1252 => &["Cp1252"],
            Self::Cp1256 => &["Cp1256"],
            Self::Utf16Be => &["UTF-16BE", "UnicodeBigUnmarked"],
            Self::Utf8 => &["UTF8"],
            Self::Big5 => &["Big5"],
            Self::ShiftJis => &["SJIS", "Shift-JIS"],
            Self::Gb18030 => &["GB18030", "EUC_CN", "GBK"],
            Self::EucKr => &["EUC_KR"],
            _ => &[],
        }
    }

    /// Case insensitive lookup over canonical names and aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|cs| {
            cs.name().eq_ignore_ascii_case(name)
                || cs.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    /// `None` for unassigned values, an error for values outside the ECI range.
    pub fn from_eci(value: u32) -> QRResult<Option<Self>> {
        if value >= 900 {
            return Err(QRError::invalid_format(format!("ECI value {value} out of range")));
        }
        Ok(Self::ALL.into_iter().find(|cs| cs.eci_values().contains(&value)))
    }

    fn encoding(self) -> Option<&'static Encoding> {
        let enc = match self {
            Self::Iso8859_2 => encoding_rs::ISO_8859_2,
            Self::Iso8859_3 => encoding_rs::ISO_8859_3,
            Self::Iso8859_4 => encoding_rs::ISO_8859_4,
            Self::Iso8859_5 => encoding_rs::ISO_8859_5,
            Self::Iso8859_6 => encoding_rs::ISO_8859_6,
            Self::Iso8859_7 => encoding_rs::ISO_8859_7,
            Self::Iso8859_8 => encoding_rs::ISO_8859_8,
            Self::Iso8859_9 => encoding_rs::WINDOWS_1254,
            Self::Iso8859_10 => encoding_rs::ISO_8859_10,
            Self::Iso8859_11 => encoding_rs::WINDOWS_874,
            Self::Iso8859_13 => encoding_rs::ISO_8859_13,
            Self::Iso8859_14 => encoding_rs::ISO_8859_14,
            Self::Iso8859_15 => encoding_rs::ISO_8859_15,
            Self::Iso8859_16 => encoding_rs::ISO_8859_16,
            Self::Cp1250 => encoding_rs::WINDOWS_1250,
            Self::Cp1251 => encoding_rs::WINDOWS_1251,
            Self::Cp1252 => encoding_rs::WINDOWS_1252,
            Self::Cp1256 => encoding_rs::WINDOWS_1256,
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Big5 => encoding_rs::BIG5,
            Self::ShiftJis => encoding_rs::SHIFT_JIS,
            Self::Gb18030 => encoding_rs::GB18030,
            Self::EucKr => encoding_rs::EUC_KR,
            Self::Ascii | Self::Cp437 | Self::Iso8859_1 | Self::Utf16Be => return None,
        };
        Some(enc)
    }

    /// Encodes `content` into this character set. Characters with no mapping are a format
    /// error; a character set without an available encoder is an argument error.
    pub fn encode(self, content: &str) -> QRResult<Vec<u8>> {
        let unmappable = |c: char| {
            QRError::invalid_format(format!("Character {c:?} cannot be encoded in {}", self.name()))
        };
        match self {
            Self::Ascii => content
                .chars()
                .map(|c| if c.is_ascii() { Ok(c as u8) } else { Err(unmappable(c)) })
                .collect(),
            Self::Iso8859_1 => content
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| unmappable(c)))
                .collect(),
            Self::Utf16Be => Ok(content.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Cp437 => Err(QRError::invalid_argument(format!(
                "No encoder available for {}",
                self.name()
            ))),
            _ => {
                let enc = self.encoding().ok_or_else(|| {
                    QRError::internal(format!("Missing encoder for {}", self.name()))
                })?;
                let (bytes, _, had_errors) = enc.encode(content);
                if had_errors {
                    return Err(QRError::invalid_format(format!(
                        "Content {content:?} cannot be encoded in {}",
                        self.name()
                    )));
                }
                // Windows supersets stand in for these two; their extra C1 range is off limits
                if matches!(self, Self::Iso8859_9 | Self::Iso8859_11)
                    && bytes.iter().any(|b| (0x80..0xA0).contains(b))
                {
                    return Err(QRError::invalid_format(format!(
                        "Content {content:?} cannot be encoded in {}",
                        self.name()
                    )));
                }
                Ok(bytes.into_owned())
            }
        }
    }
}

impl Default for CharacterSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for CharacterSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterSet {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| QRError::invalid_argument(format!("Unknown character set {s:?}")))
    }
}

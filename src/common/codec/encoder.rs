use tracing::{debug, trace};

use super::charset::CharacterSet;
use super::types::{Mode, MODE_INDICATOR_BITS};
use crate::common::bitstream::BitStream;
use crate::common::ec::{interleave, Block, ReedSolomonEncoder};
use crate::common::error::{QRError, QRResult};
use crate::common::galois::QR_CODE_FIELD_256;
use crate::common::metadata::{ECLevel, Version};

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

const ECI_VALUE_BITS: usize = 8;
const MAX_TERMINATOR_BITS: usize = 4;

// Encoded data
//------------------------------------------------------------------------------

/// Output of the bit stream stage, ready for placement into a matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedData {
    pub mode: Mode,
    pub version: Version,
    pub ec_level: ECLevel,
    /// Data codewords after termination and padding, before error correction.
    pub data: Vec<u8>,
    /// Interleaved data codewords followed by interleaved error correction codewords.
    pub codewords: Vec<u8>,
}

/// Encodes `content` into the final codeword sequence. `charset` is the caller requested
/// character set, `version` the requested minimum version.
pub fn encode_data(
    content: &str,
    ecl: ECLevel,
    charset: Option<CharacterSet>,
    version: Option<Version>,
) -> QRResult<EncodedData> {
    if content.is_empty() {
        return Err(QRError::invalid_argument("Found empty contents"));
    }

    let mode = select_mode(content, charset);
    debug!(?mode, ?charset, "Selected encoding mode");

    let mut header = BitStream::new();
    push_header(mode, charset, &mut header);

    let (payload, char_cnt) = encode_payload(content, mode, charset)?;

    let bits_for = |v: Version| header.len() + mode.char_cnt_bits(v) + payload.len();
    let ver = Version::find(version, ecl, &bits_for)?;
    if let Some(req) = version.filter(|&req| req != ver) {
        debug!(requested = *req, resolved = *ver, "Requested version too small");
    }
    debug!(version = *ver, ?ecl, bits = bits_for(ver), "Resolved version");

    let mut bs = BitStream::with_capacity(ver.max_data_bits(ecl));
    bs.append(&header);
    push_char_count(char_cnt, mode, ver, &mut bs)?;
    bs.append(&payload);
    terminate_and_pad(&mut bs, ver, ecl)?;

    let data = bs.to_bytes(0, bs.size_in_bytes())?;
    let codewords = error_correct_and_interleave(&data, ver, ecl)?;
    Ok(EncodedData { mode, version: ver, ec_level: ecl, data, codewords })
}

// Mode selection
//------------------------------------------------------------------------------

/// First of kanji, numeric, alphanumeric that carries the whole content, else byte. Kanji is
/// considered only when Shift JIS was asked for.
pub fn select_mode(content: &str, charset: Option<CharacterSet>) -> Mode {
    if charset == Some(CharacterSet::ShiftJis) && Mode::Kanji.supports(content) {
        return Mode::Kanji;
    }
    [Mode::Numeric, Mode::Alphanumeric]
        .into_iter()
        .find(|m| m.supports(content))
        .unwrap_or(Mode::Byte)
}


// Writer for encoded data
//------------------------------------------------------------------------------

/// ECI header, only for byte mode with a non default character set, then the mode indicator.
pub fn push_header(mode: Mode, charset: Option<CharacterSet>, out: &mut BitStream) {
    if let Some(cs) = charset.filter(|&cs| mode == Mode::Byte && cs != CharacterSet::DEFAULT) {
        out.push_bits(Mode::Eci.bits(), MODE_INDICATOR_BITS);
        out.push_bits(cs.eci(), ECI_VALUE_BITS);
    }
    out.push_bits(mode.bits(), MODE_INDICATOR_BITS);
}

pub fn push_char_count(count: usize, mode: Mode, ver: Version, out: &mut BitStream) -> QRResult<()> {
    let len_bits = mode.char_cnt_bits(ver);
    if count >= 1 << len_bits {
        return Err(QRError::invalid_format(format!(
            "Character count {count} exceeds the {len_bits} bit field of {mode:?} mode at version \
             {ver}"
        )));
    }
    out.push_bits(count as u32, len_bits);
    Ok(())
}

/// Mode specific payload and the character count written ahead of it.
pub fn encode_payload(
    content: &str,
    mode: Mode,
    charset: Option<CharacterSet>,
) -> QRResult<(BitStream, usize)> {
    let mut out = BitStream::new();
    let count = match mode {
        Mode::Numeric => {
            push_numeric_data(content.as_bytes(), &mut out);
            content.len()
        }
        Mode::Alphanumeric => {
            push_alphanumeric_data(content.as_bytes(), &mut out);
            content.len()
        }
        Mode::Byte => {
            let bytes = charset.unwrap_or_default().encode(content)?;
            push_byte_data(&bytes, &mut out);
            bytes.len()
        }
        Mode::Kanji => {
            let bytes = CharacterSet::ShiftJis.encode(content)?;
            push_kanji_data(&bytes, &mut out)?;
            bytes.len() / 2
        }
        _ => return Err(QRError::invalid_argument(format!("Cannot encode content in {mode:?} mode"))),
    };
    debug_assert_eq!(out.len(), mode.encoded_len(count), "Payload length mismatch");
    Ok((out, count))
}

fn push_numeric_data(data: &[u8], out: &mut BitStream) {
    for chunk in data.chunks(3) {
        let len = Mode::Numeric.encoded_len(chunk.len());
        let data = Mode::Numeric.encode_chunk(chunk);
        out.push_bits(data, len);
    }
}

fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
    for chunk in data.chunks(2) {
        let len = Mode::Alphanumeric.encoded_len(chunk.len());
        let data = Mode::Alphanumeric.encode_chunk(chunk);
        out.push_bits(data, len);
    }
}

fn push_byte_data(data: &[u8], out: &mut BitStream) {
    out.extend(data);
}

fn push_kanji_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
    if data.len() % 2 != 0 {
        return Err(QRError::invalid_format("Kanji data must be double byte"));
    }
    for pair in data.chunks_exact(2) {
        let value = super::types::kanji_value(pair[0], pair[1])?;
        out.push_bits(value, 13);
    }
    Ok(())
}

/// Terminator, zero bits to the byte boundary, then alternating pad codewords up to the data
/// capacity of `ver` at `ecl`.
pub fn terminate_and_pad(out: &mut BitStream, ver: Version, ecl: ECLevel) -> QRResult<()> {
    let capacity = ver.max_data_bits(ecl);
    if out.len() > capacity {
        return Err(QRError::invalid_format(format!(
            "Data bits exceed capacity: {} > {capacity}",
            out.len()
        )));
    }

    let term_len = MAX_TERMINATOR_BITS.min(capacity - out.len());
    out.push_bits(0u8, term_len);

    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0u8, 8 - offset);
    }

    let pad_count = capacity.saturating_sub(out.len()) >> 3;
    trace!(term_len, pad_count, "Padding data codewords");
    PADDING_CODEWORDS.iter().cycle().take(pad_count).for_each(|&pc| out.push_bits(pc, 8));

    if out.len() != capacity {
        return Err(QRError::invalid_format(format!(
            "Padded length doesn't match capacity: {} != {capacity}",
            out.len()
        )));
    }
    Ok(())
}


// Error correction and interleaving
//------------------------------------------------------------------------------

/// Splits `data` into the blocks of `ver` at `ecl`, appends error correction to each and
/// interleaves data codewords followed by error correction codewords.
pub fn error_correct_and_interleave(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<Vec<u8>> {
    let block_count = ver.block_count(ecl);
    let mut rs = ReedSolomonEncoder::new(&QR_CODE_FIELD_256);
    let mut blocks = Vec::with_capacity(block_count);
    let mut offset = 0;
    for id in 0..block_count {
        let (dlen, ec_len) = ver.block_capacity(id, ecl)?;
        let raw = data.get(offset..offset + dlen).ok_or_else(|| {
            QRError::invalid_format(format!(
                "Data ends before block {id}: {} codewords for {} needed",
                data.len(),
                offset + dlen
            ))
        })?;
        blocks.push(Block::new(raw, ec_len, &mut rs)?);
        offset += dlen;
    }
    if offset != data.len() {
        return Err(QRError::invalid_format(format!(
            "Data bytes don't match block capacity: {} != {offset}",
            data.len()
        )));
    }
    debug!(
        blocks = block_count,
        ec_per_block = ver.ec_per_block(ecl),
        generators = rs.cached_degrees(),
        "Computed error correction"
    );

    let data_parts: Vec<&[u8]> = blocks.iter().map(Block::data).collect();
    let ecc_parts: Vec<&[u8]> = blocks.iter().map(Block::ecc).collect();
    let mut res = interleave(&data_parts);
    res.extend(interleave(&ecc_parts));

    let total = ver.total_codewords();
    if res.len() != total {
        return Err(QRError::invalid_format(format!(
            "Interleaved length doesn't match total codewords: {} != {total}",
            res.len()
        )));
    }
    Ok(res)
}

#[cfg(test)]
mod encode_tests {
    use super::{encode_data, error_correct_and_interleave};
    use crate::common::codec::{CharacterSet, Mode};
    use crate::common::error::QRError;
    use crate::common::metadata::{ECLevel, Version};

    const HELLO_WORLD_1M: &[u8] = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";

    #[test]
    fn test_hello_world_1m() {
        let enc = encode_data("HELLO WORLD", ECLevel::M, None, None).unwrap();
        assert_eq!(enc.mode, Mode::Alphanumeric);
        assert_eq!(*enc.version, 1);
        assert_eq!(enc.data, HELLO_WORLD_1M);
        assert_eq!(&enc.codewords[..16], HELLO_WORLD_1M);
        assert_eq!(&enc.codewords[16..], b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_hello_world_1q() {
        let enc = encode_data("HELLO WORLD", ECLevel::Q, None, None).unwrap();
        assert_eq!(*enc.version, 1);
        assert_eq!(enc.data, &HELLO_WORLD_1M[..13]);
        assert_eq!(&enc.codewords[13..], b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_requested_version() {
        let v5 = Version::new(5).ok();
        let enc = encode_data("HELLO WORLD", ECLevel::L, None, v5).unwrap();
        assert_eq!(*enc.version, 5);
        assert_eq!(enc.codewords.len(), 134);

        let content = "A".repeat(100);
        let v1 = Version::new(1).ok();
        let enc = encode_data(&content, ECLevel::L, None, v1).unwrap();
        assert_eq!(*enc.version, 4);
    }

    #[test]
    fn test_byte_capacity_boundary() {
        let enc = encode_data(&"a".repeat(17), ECLevel::L, None, None).unwrap();
        assert_eq!(*enc.version, 1);
        let enc = encode_data(&"a".repeat(18), ECLevel::L, None, None).unwrap();
        assert_eq!(*enc.version, 2);
        assert!(encode_data(&"a".repeat(2953), ECLevel::L, None, None).is_ok());
        let res = encode_data(&"a".repeat(2954), ECLevel::L, None, None);
        assert!(matches!(res, Err(QRError::InvalidFormat(_))));
    }

    #[test]
    fn test_numeric_exact_capacity() {
        // 4 + 14 + 23630 bits is exactly the 2956 codewords of 40-L
        let enc = encode_data(&"7".repeat(7089), ECLevel::L, None, None).unwrap();
        assert_eq!(*enc.version, 40);
        assert_eq!(enc.data.len(), 2956);
        let res = encode_data(&"7".repeat(7090), ECLevel::L, None, None);
        assert!(matches!(res, Err(QRError::InvalidFormat(_))));
    }

    #[test]
    fn test_eci_byte_mode() {
        let enc = encode_data("caf\u{e9}", ECLevel::L, Some(CharacterSet::Utf8), None).unwrap();
        assert_eq!(enc.mode, Mode::Byte);
        // ECI 26, byte mode, count 5, then the utf-8 bytes
        assert_eq!(&enc.data[..8], &[0x71, 0xA4, 0x05, 0x63, 0x61, 0x66, 0xC3, 0xA9]);
    }

    #[test]
    fn test_kanji_mode() {
        let sjis = Some(CharacterSet::ShiftJis);
        let enc = encode_data("\u{70B9}\u{8317}", ECLevel::L, sjis, None).unwrap();
        assert_eq!(enc.mode, Mode::Kanji);
        // Mode 1000, count 00000010, then 0x0D9F and 0x1AAA in 13 bits each
        assert_eq!(&enc.data[..5], &[0x80, 0x26, 0xCF, 0xEA, 0xA8]);
    }

    #[test]
    fn test_unencodable_content() {
        let res = encode_data("\u{1F30F}", ECLevel::L, None, None);
        assert!(matches!(res, Err(QRError::InvalidFormat(_))));
        let res = encode_data("", ECLevel::L, None, None);
        assert!(matches!(res, Err(QRError::InvalidArgument(_))));
        let res = encode_data("a", ECLevel::L, Some(CharacterSet::Cp437), None);
        assert!(matches!(res, Err(QRError::InvalidArgument(_))));
    }

    #[test]
    fn test_interleave_5q() {
        let ver = Version::new(5).unwrap();
        let data: Vec<u8> = (0..62).collect();
        let res = error_correct_and_interleave(&data, ver, ECLevel::Q).unwrap();
        assert_eq!(res.len(), 134);
        // Blocks hold 15, 15, 16, 16 data codewords
        assert_eq!(&res[..8], &[0, 15, 30, 46, 1, 16, 31, 47]);
        assert_eq!(&res[56..62], &[14, 29, 44, 60, 45, 61]);
    }

    #[test]
    fn test_interleave_length_mismatch() {
        let ver = Version::new(5).unwrap();
        let res = error_correct_and_interleave(&[0; 61], ver, ECLevel::Q);
        assert!(matches!(res, Err(QRError::InvalidFormat(_))));
        let res = error_correct_and_interleave(&[0; 63], ver, ECLevel::Q);
        assert!(matches!(res, Err(QRError::InvalidFormat(_))));
    }
}

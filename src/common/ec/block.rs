use std::ops::Deref;

use super::ReedSolomonEncoder;
use crate::common::error::QRResult;

// Block
//------------------------------------------------------------------------------

/// One Reed-Solomon block: data codewords followed by their error correction codewords.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    data: Vec<u8>,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], ec_len: usize, rs: &mut ReedSolomonEncoder<'_, 256>) -> QRResult<Self> {
        let ecc = rs.ecc(raw, ec_len)?;
        let mut data = Vec::with_capacity(raw.len() + ec_len);
        data.extend_from_slice(raw);
        data.extend_from_slice(&ecc);
        Ok(Self { data, dlen: raw.len() })
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..]
    }
}

// Interleave
//------------------------------------------------------------------------------

/// Column-wise interleave: index 0 of every block, then index 1, and so on. Shorter blocks
/// drop out once exhausted.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

#[cfg(test)]
mod block_tests {
    use super::{interleave, Block};
    use crate::common::ec::ReedSolomonEncoder;
    use crate::common::galois::QR_CODE_FIELD_256;

    #[test]
    fn test_block_layout() {
        let mut rs = ReedSolomonEncoder::new(&QR_CODE_FIELD_256);
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let block = Block::new(msg, 10, &mut rs).unwrap();
        assert_eq!(block.data(), msg);
        assert_eq!(block.ecc(), b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17");
        assert_eq!(block.data().len() + block.ecc().len(), 26);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    #[test]
    fn test_interleave_empty() {
        let blocks: Vec<Vec<u8>> = vec![];
        assert!(interleave(&blocks).is_empty());
    }
}

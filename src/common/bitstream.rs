use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

use super::error::{QRError, QRResult};

// Bit stream
//------------------------------------------------------------------------------

/// Growable, MSB-first sequence of bits. Writers push at the end; readers consume from an
/// internal cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0, cursor: 0 }
    }

    pub fn from(inp: &[u8]) -> Self {
        Self { data: inp.to_vec(), len: inp.len() << 3, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn size_in_bytes(&self) -> usize {
        (self.len + 7) >> 3
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "Bit index out of range: Index {i}, Length {}", self.len);
        (self.data[i >> 3] >> (7 - (i & 7))) & 1 == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }

    /// Bits not yet consumed through [`BitStream::take_bit`].
    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    /// Appends the lowest `size` bits of `bits`, most significant first.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Cannot push {size} bits from a {max_bits} bit value");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    pub fn append(&mut self, other: &BitStream) {
        if self.len & 7 == 0 && other.len & 7 == 0 {
            self.extend(&other.data);
            return;
        }
        other.iter().for_each(|b| self.push(b));
    }

    pub fn extend(&mut self, arr: &[u8]) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(arr);
            self.len += arr.len() << 3;
        } else {
            arr.iter().for_each(|&b| self.push_bits(b, 8));
        }
    }

    /// Packs `num_bytes` bytes starting at `bit_offset`.
    pub fn to_bytes(&self, bit_offset: usize, num_bytes: usize) -> QRResult<Vec<u8>> {
        let end = bit_offset + (num_bytes << 3);
        if end > self.len {
            return Err(QRError::invalid_argument(format!(
                "Requested bits {bit_offset}..{end} exceed stream length {}",
                self.len
            )));
        }
        let bytes = (0..num_bytes)
            .map(|i| {
                let start = bit_offset + (i << 3);
                (start..start + 8).fold(0u8, |acc, j| (acc << 1) | self.get(j) as u8)
            })
            .collect();
        Ok(bytes)
    }
}

#[cfg(test)]
mod bit_stream_push_tests {
    use super::BitStream;
    use crate::common::error::QRError;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new();
        assert_eq!(bs.len(), 0);
        bs.push_bits(0, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 16);
        bs.push_bits(0b1111111, 7);
        assert_eq!(bs.len(), 23);
        bs.push_bits(0b111111111111u16, 12);
        assert_eq!(bs.len(), 35);
        bs.push_bits(0b1111111111111u16, 13);
        assert_eq!(bs.len(), 48);
        assert_eq!(bs.size_in_bytes(), 6);
    }

    #[test]
    #[should_panic]
    fn test_invalid_len() {
        let mut bs = BitStream::new();
        bs.push_bits(256u32, 8);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new();
        bs.push(false);
        assert_eq!(bs.data(), &[0b00000000]);
        bs.push(true);
        assert_eq!(bs.data(), &[0b01000000]);
    }

    #[test]
    fn test_push_bits() {
        let exp_vec = [210, 52, 141, 35, 72, 210, 183, 42, 7, 219, 91, 14, 253, 68, 120, 193];
        let mut inp = BitStream::from(&exp_vec);
        let mut out = BitStream::new();
        for n in [0, 1, 2, 3, 4, 5, 6, 7, 8, 4, 8, 9, 11, 15, 16, 5, 16] {
            let bits = inp.take_bits(n).unwrap();
            out.push_bits(bits, n);
            let out_off = out.len() & 7;
            let len = out.len() >> 3;
            assert_eq!(out.data()[..len], exp_vec[..len], "n {n}");
            if out_off > 0 {
                assert_eq!(out.data()[len] >> (8 - out_off), exp_vec[len] >> (8 - out_off));
            }
        }
    }

    #[test]
    fn test_append_unaligned() {
        let mut a = BitStream::new();
        a.push_bits(0b101u8, 3);
        let mut b = BitStream::new();
        b.push_bits(0b11001u8, 5);
        b.push_bits(0b1u8, 1);
        a.append(&b);
        assert_eq!(a.len(), 9);
        assert_eq!(a.iter().collect::<Vec<_>>(), [true, false, true, true, true, false, false, true, true]);
    }

    #[test]
    fn test_extend_unaligned() {
        let mut bs = BitStream::new();
        bs.push(true);
        bs.extend(&[0xFF, 0x00]);
        assert_eq!(bs.len(), 17);
        assert_eq!(bs.data(), &[0xFF, 0x80, 0x00]);
    }

    #[test]
    fn test_to_bytes() {
        let mut bs = BitStream::new();
        bs.push_bits(0b0001u8, 4);
        bs.extend(&[0xAB, 0xCD]);
        assert_eq!(bs.to_bytes(4, 2).unwrap(), vec![0xAB, 0xCD]);
        assert_eq!(bs.to_bytes(0, 2).unwrap(), vec![0x1A, 0xBC]);
        assert!(matches!(bs.to_bytes(4, 3), Err(QRError::InvalidArgument(_))));
    }
}

// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take_bits(&mut self, n: usize) -> Option<u32> {
        debug_assert!(n <= 32, "Cannot take more than 32 bits: N {n}");

        if self.cursor + n > self.len {
            return None;
        }
        let res = (self.cursor..self.cursor + n).fold(0u32, |acc, i| (acc << 1) | self.get(i) as u32);
        self.cursor += n;
        Some(res)
    }

    pub fn take_bit(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }
        let bit = self.get(self.cursor);
        self.cursor += 1;
        Some(bit)
    }
}


// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take_bit()
    }
}

use std::fmt::{Display, Formatter};

use super::error::{QRError, QRResult};
use super::poly::Polynomial;

// Galois field
//------------------------------------------------------------------------------

/// GF(N) for N a power of two, backed by exponent and logarithm tables built at compile time
/// from a primitive polynomial. `base` is the exponent of the first root used when building
/// Reed-Solomon generators over this field.
#[derive(Debug)]
pub struct GaloisField<const N: usize> {
    exp: [u16; N],
    log: [u16; N],
    primitive: u32,
    base: usize,
}

pub static QR_CODE_FIELD_256: GaloisField<256> = GaloisField::new(0x011D, 0);
pub static DATA_MATRIX_FIELD_256: GaloisField<256> = GaloisField::new(0x012D, 1);
pub static AZTEC_DATA_12: GaloisField<4096> = GaloisField::new(0x1069, 1);
pub static AZTEC_DATA_10: GaloisField<1024> = GaloisField::new(0x0409, 1);
pub static AZTEC_DATA_6: GaloisField<64> = GaloisField::new(0x0043, 1);
pub static AZTEC_PARAM: GaloisField<16> = GaloisField::new(0x0013, 1);
pub static AZTEC_DATA_8: &GaloisField<256> = &DATA_MATRIX_FIELD_256;
pub static MAXICODE_FIELD_64: &GaloisField<64> = &AZTEC_DATA_6;

impl<const N: usize> GaloisField<N> {
    pub const fn new(primitive: u32, base: usize) -> Self {
        assert!(N.is_power_of_two() && N >= 4, "Field size must be a power of two");

        let mut exp = [0u16; N];
        let mut log = [0u16; N];
        let mut x: u32 = 1;
        let mut i = 0;
        while i < N {
            exp[i] = x as u16;
            x <<= 1;
            if x >= N as u32 {
                x ^= primitive;
                x &= N as u32 - 1;
            }
            i += 1;
        }
        // log[0] stays unset; zero has no logarithm
        let mut i = 0;
        while i < N - 1 {
            log[exp[i] as usize] = i as u16;
            i += 1;
        }

        Self { exp, log, primitive, base }
    }

    pub const fn size(&self) -> usize {
        N
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    pub const fn primitive(&self) -> u32 {
        self.primitive
    }

    pub fn zero(&self) -> Polynomial<'_, N> {
        Polynomial::zero(self)
    }

    pub fn one(&self) -> Polynomial<'_, N> {
        Polynomial::one(self)
    }

    /// Builds `coefficient * x^degree`.
    pub fn build_monomial(&self, degree: usize, coefficient: u16) -> Polynomial<'_, N> {
        Polynomial::monomial(self, degree, coefficient)
    }
}

// Field arithmetic
//------------------------------------------------------------------------------

impl<const N: usize> GaloisField<N> {
    /// Addition and subtraction coincide in characteristic 2.
    #[inline]
    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// `alpha^power`. The exponent wraps around the multiplicative group order.
    #[inline]
    pub fn exp(&self, power: usize) -> u16 {
        self.exp[power % (N - 1)]
    }

    pub fn log(&self, a: u16) -> QRResult<usize> {
        debug_assert!((a as usize) < N, "Element {a} outside GF({N})");
        if a == 0 {
            return Err(QRError::invalid_argument("Logarithm of 0 is undefined"));
        }
        Ok(self.log[a as usize] as usize)
    }

    pub fn inverse(&self, a: u16) -> QRResult<u16> {
        debug_assert!((a as usize) < N, "Element {a} outside GF({N})");
        if a == 0 {
            return Err(QRError::invalid_argument("Multiplicative inverse of 0 is undefined"));
        }
        Ok(self.exp[N - 1 - self.log[a as usize] as usize])
    }

    #[inline]
    pub fn multiply(&self, a: u16, b: u16) -> u16 {
        debug_assert!((a as usize) < N && (b as usize) < N, "Operands {a}, {b} outside GF({N})");
        if a == 0 || b == 0 {
            return 0;
        }
        let power = (self.log[a as usize] as usize + self.log[b as usize] as usize) % (N - 1);
        self.exp[power]
    }
}

impl<const N: usize> PartialEq for GaloisField<N> {
    fn eq(&self, other: &Self) -> bool {
        self.primitive == other.primitive && self.base == other.base
    }
}

impl<const N: usize> Eq for GaloisField<N> {}

impl<const N: usize> Display for GaloisField<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GF(0x{:x},{N})", self.primitive)
    }
}

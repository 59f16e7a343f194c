use crate::common::error::{QRError, QRResult};
use crate::common::galois::GaloisField;
use crate::common::poly::Polynomial;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Reed-Solomon encoder over a fixed field. Generator polynomials are cached by degree and the
/// cache only ever grows, so a single encoder can serve every block of one symbol. Each encode
/// call owns its encoder; nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder<'f, const N: usize> {
    field: &'f GaloisField<N>,
    generators: Vec<Polynomial<'f, N>>,
}

impl<'f, const N: usize> ReedSolomonEncoder<'f, N> {
    pub fn new(field: &'f GaloisField<N>) -> Self {
        Self { field, generators: vec![Polynomial::one(field)] }
    }

    pub fn cached_degrees(&self) -> usize {
        self.generators.len()
    }

    /// Returns `g(x) = (x + a^b)(x + a^(b+1))...(x + a^(b+degree-1))`, extending the cache with
    /// every missing lower degree first.
    pub fn build_generator(&mut self, degree: usize) -> QRResult<&Polynomial<'f, N>> {
        while self.generators.len() <= degree {
            let d = self.generators.len();
            let root = self.field.exp(d - 1 + self.field.base());
            let factor = Polynomial::new(self.field, &[1, root])?;
            let next = self.generators[d - 1].multiply(&factor)?;
            self.generators.push(next);
        }
        Ok(&self.generators[degree])
    }

    /// Computes `ec_len` error correction codewords for `codeword[..len - ec_len]` and writes
    /// them into the trailing `ec_len` slots.
    pub fn encode(&mut self, codeword: &mut [u16], ec_len: usize) -> QRResult<()> {
        if ec_len == 0 {
            return Err(QRError::invalid_argument("No error correction codewords requested"));
        }
        let data_len = match codeword.len().checked_sub(ec_len) {
            Some(n) if n > 0 => n,
            _ => {
                return Err(QRError::invalid_argument(format!(
                    "No data codewords: Length {}, EC length {ec_len}",
                    codeword.len()
                )))
            }
        };

        let field = self.field;
        let generator = self.build_generator(ec_len)?;
        let info = Polynomial::new(field, &codeword[..data_len])?.multiply_by_monomial(ec_len, 1);
        let (_, remainder) = info.divide(generator)?;

        let coeffs = remainder.coefficients();
        let pad = ec_len - coeffs.len();
        codeword[data_len..data_len + pad].fill(0);
        codeword[data_len + pad..].copy_from_slice(coeffs);
        Ok(())
    }

    /// True when the full codeword is divisible by the generator of degree `ec_len`.
    pub fn is_codeword(&mut self, codeword: &[u16], ec_len: usize) -> QRResult<bool> {
        let field = self.field;
        let generator = self.build_generator(ec_len)?;
        let (_, remainder) = Polynomial::new(field, codeword)?.divide(generator)?;
        Ok(remainder.is_zero())
    }
}

// Byte oriented helper for 256 element fields
//------------------------------------------------------------------------------

impl ReedSolomonEncoder<'_, 256> {
    pub fn ecc(&mut self, data: &[u8], ec_len: usize) -> QRResult<Vec<u8>> {
        let mut codeword: Vec<u16> = data.iter().map(|&b| b as u16).collect();
        codeword.resize(data.len() + ec_len, 0);
        self.encode(&mut codeword, ec_len)?;
        Ok(codeword[data.len()..].iter().map(|&c| c as u8).collect())
    }
}

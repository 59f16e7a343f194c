use super::error::{QRError, QRResult};
use super::galois::GaloisField;

// Polynomial over a Galois field
//------------------------------------------------------------------------------

/// Immutable polynomial with coefficients in GF(N), most significant first. Leading zeros are
/// stripped on construction, so only the zero polynomial starts with a zero coefficient.
#[derive(Debug, Clone)]
pub struct Polynomial<'f, const N: usize> {
    field: &'f GaloisField<N>,
    coeffs: Vec<u16>,
}

impl<'f, const N: usize> Polynomial<'f, N> {
    pub fn new(field: &'f GaloisField<N>, coeffs: &[u16]) -> QRResult<Self> {
        if coeffs.is_empty() {
            return Err(QRError::invalid_argument("Polynomial needs at least one coefficient"));
        }
        if let Some(c) = coeffs.iter().find(|&&c| c as usize >= N) {
            return Err(QRError::invalid_argument(format!("Coefficient {c} outside GF({N})")));
        }
        Ok(Self::from_vec(field, coeffs.to_vec()))
    }

    fn from_vec(field: &'f GaloisField<N>, mut coeffs: Vec<u16>) -> Self {
        let first_nonzero = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len() - 1);
        coeffs.drain(..first_nonzero);
        Self { field, coeffs }
    }

    pub fn zero(field: &'f GaloisField<N>) -> Self {
        Self { field, coeffs: vec![0] }
    }

    pub fn one(field: &'f GaloisField<N>) -> Self {
        Self { field, coeffs: vec![1] }
    }

    pub fn monomial(field: &'f GaloisField<N>, degree: usize, coefficient: u16) -> Self {
        if coefficient == 0 {
            return Self::zero(field);
        }
        let mut coeffs = vec![0; degree + 1];
        coeffs[0] = coefficient;
        Self { field, coeffs }
    }

    pub fn field(&self) -> &'f GaloisField<N> {
        self.field
    }

    pub fn coefficients(&self) -> &[u16] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs[0] == 0
    }

    /// Coefficient of the `x^degree` term.
    pub fn coefficient(&self, degree: usize) -> u16 {
        match self.degree().checked_sub(degree) {
            Some(i) => self.coeffs[i],
            None => 0,
        }
    }

    pub fn evaluate(&self, x: u16) -> u16 {
        match x {
            0 => self.coefficient(0),
            1 => self.coeffs.iter().fold(0, |acc, &c| self.field.add(acc, c)),
            _ => self
                .coeffs
                .iter()
                .fold(0, |acc, &c| self.field.add(self.field.multiply(acc, x), c)),
        }
    }

    fn check_field(&self, other: &Self) -> QRResult<()> {
        if self.field != other.field {
            return Err(QRError::invalid_argument(format!(
                "Polynomials are over different fields: {} vs {}",
                self.field, other.field
            )));
        }
        Ok(())
    }
}

// Polynomial arithmetic
//------------------------------------------------------------------------------

impl<'f, const N: usize> Polynomial<'f, N> {
    pub fn add(&self, other: &Self) -> QRResult<Self> {
        self.check_field(other)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        let (longer, shorter) = if self.coeffs.len() >= other.coeffs.len() {
            (&self.coeffs, &other.coeffs)
        } else {
            (&other.coeffs, &self.coeffs)
        };
        let diff = longer.len() - shorter.len();
        let mut sum = longer.clone();
        for (s, &c) in sum[diff..].iter_mut().zip(shorter.iter()) {
            *s = self.field.add(*s, c);
        }
        Ok(Self::from_vec(self.field, sum))
    }

    pub fn subtract(&self, other: &Self) -> QRResult<Self> {
        self.add(other)
    }

    pub fn multiply(&self, other: &Self) -> QRResult<Self> {
        self.check_field(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero(self.field));
        }

        let mut product = vec![0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                product[i + j] = self.field.add(product[i + j], self.field.multiply(a, b));
            }
        }
        Ok(Self::from_vec(self.field, product))
    }

    pub fn scale(&self, scalar: u16) -> Self {
        match scalar {
            0 => Self::zero(self.field),
            1 => self.clone(),
            _ => {
                let coeffs = self.coeffs.iter().map(|&c| self.field.multiply(c, scalar)).collect();
                Self::from_vec(self.field, coeffs)
            }
        }
    }

    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u16) -> Self {
        if coefficient == 0 || self.is_zero() {
            return Self::zero(self.field);
        }
        let mut coeffs = Vec::with_capacity(self.coeffs.len() + degree);
        coeffs.extend(self.coeffs.iter().map(|&c| self.field.multiply(c, coefficient)));
        coeffs.resize(self.coeffs.len() + degree, 0);
        Self::from_vec(self.field, coeffs)
    }

    /// Long division. Returns `(quotient, remainder)`.
    pub fn divide(&self, other: &Self) -> QRResult<(Self, Self)> {
        self.check_field(other)?;
        if other.is_zero() {
            return Err(QRError::invalid_argument("Division by the zero polynomial"));
        }

        let mut quotient = Self::zero(self.field);
        let mut remainder = self.clone();
        let inv_lead = self.field.inverse(other.coefficient(other.degree()))?;

        while !remainder.is_zero() && remainder.degree() >= other.degree() {
            let deg_diff = remainder.degree() - other.degree();
            let scale = self.field.multiply(remainder.coefficient(remainder.degree()), inv_lead);
            let term = other.multiply_by_monomial(deg_diff, scale);
            quotient = quotient.add(&Self::monomial(self.field, deg_diff, scale))?;
            remainder = remainder.add(&term)?;
        }

        Ok((quotient, remainder))
    }
}

impl<const N: usize> PartialEq for Polynomial<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.coeffs == other.coeffs
    }
}

impl<const N: usize> Eq for Polynomial<'_, N> {}

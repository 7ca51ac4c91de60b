//! 2x2 matrices over `GF(q)` acting on the projective line by Möbius
//! transformations `z -> (b00 z + b01) / (b10 z + b11)`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{FieldElement, FieldError, GaloisField};

/// Point of the projective line `GF(q) ∪ {∞}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectivePoint {
    Finite(FieldElement),
    Infinity,
}

/// Row-major 2x2 matrix `[[b00, b01], [b10, b11]]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MobiusMatrix {
    entries: [FieldElement; 4],
}

impl fmt::Debug for MobiusMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[[{}, {}], [{}, {}]]",
            self.entries[0], self.entries[1], self.entries[2], self.entries[3]
        )
    }
}

impl MobiusMatrix {
    pub const fn new(entries: [FieldElement; 4]) -> Self {
        Self { entries }
    }

    pub const fn identity() -> Self {
        Self::new([
            FieldElement::ONE,
            FieldElement::ZERO,
            FieldElement::ZERO,
            FieldElement::ONE,
        ])
    }

    /// Rebuilds a matrix from the coefficient lists of its four row-major
    /// entries.
    pub fn from_coefficients(
        field: &GaloisField,
        coefficients: &[Vec<u16>; 4],
    ) -> Result<Self, FieldError> {
        let mut entries = [FieldElement::ZERO; 4];
        for (slot, entry) in entries.iter_mut().zip(coefficients.iter()) {
            *slot = field.from_coefficients(entry)?;
        }
        Ok(Self::new(entries))
    }

    /// Entries as coefficient lists over the prime field, row-major.
    pub fn to_coefficients(&self, field: &GaloisField) -> [Vec<u16>; 4] {
        self.entries.map(|entry| field.coefficients(entry))
    }

    pub fn entries(&self) -> [FieldElement; 4] {
        self.entries
    }

    pub fn entry(&self, row: usize, col: usize) -> FieldElement {
        self.entries[row * 2 + col]
    }

    pub fn det(&self, field: &GaloisField) -> FieldElement {
        let [a, b, c, d] = self.entries;
        field.sub(field.mul(a, d), field.mul(b, c))
    }

    pub fn is_invertible(&self, field: &GaloisField) -> bool {
        !self.det(field).is_zero()
    }

    pub fn mul(&self, field: &GaloisField, rhs: &Self) -> Self {
        let [a, b, c, d] = self.entries;
        let [e, f, g, h] = rhs.entries;
        Self::new([
            field.add(field.mul(a, e), field.mul(b, g)),
            field.add(field.mul(a, f), field.mul(b, h)),
            field.add(field.mul(c, e), field.mul(d, g)),
            field.add(field.mul(c, f), field.mul(d, h)),
        ])
    }

    /// Square-and-multiply exponentiation.
    pub fn pow(&self, field: &GaloisField, mut exponent: u64) -> Self {
        let mut result = Self::identity();
        let mut base = *self;
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.mul(field, &base);
            }
            base = base.mul(field, &base);
            exponent >>= 1;
        }
        result
    }

    /// Adjugate `[[b11, -b01], [-b10, b00]]`; as a Möbius map it is the inverse.
    pub fn adjugate(&self, field: &GaloisField) -> Self {
        let [a, b, c, d] = self.entries;
        Self::new([d, field.neg(b), field.neg(c), a])
    }

    /// Returns `true` when the matrix is `λ·I` for some `λ` (possibly zero).
    pub fn is_scalar(&self) -> bool {
        let [a, b, c, d] = self.entries;
        b.is_zero() && c.is_zero() && a == d
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Applies the Möbius map to a finite value, `None` when the value is sent
    /// to the point at infinity.
    pub fn step(&self, field: &GaloisField, value: FieldElement) -> Option<FieldElement> {
        let [a, b, c, d] = self.entries;
        let numerator = field.add(field.mul(a, value), b);
        let denominator = field.add(field.mul(c, value), d);
        field.div(numerator, denominator)
    }

    /// Applies the Möbius map to a point of the projective line.
    pub fn apply(&self, field: &GaloisField, point: ProjectivePoint) -> ProjectivePoint {
        let [a, _, c, _] = self.entries;
        match point {
            ProjectivePoint::Infinity => match field.div(a, c) {
                Some(value) => ProjectivePoint::Finite(value),
                None => ProjectivePoint::Infinity,
            },
            ProjectivePoint::Finite(value) => match self.step(field, value) {
                Some(image) => ProjectivePoint::Finite(image),
                None => ProjectivePoint::Infinity,
            },
        }
    }

    /// Returns `true` when some point of `GF(q) ∪ {∞}` is left in place.
    pub fn fixes_rational_point(&self, field: &GaloisField) -> bool {
        if self.apply(field, ProjectivePoint::Infinity) == ProjectivePoint::Infinity {
            return true;
        }
        field
            .elements()
            .any(|z| self.step(field, z) == Some(z))
    }
}

//! Finite places of the rational function field `GF(q)(x)`.
//!
//! A finite place is identified with the monic irreducible polynomial that
//! vanishes on it. Rational places are the linear polynomials `x - c`; the
//! degree-2 places come from the monic irreducible quadratics.

use crate::field::{FieldElement, GaloisField, Polynomial};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Place {
    polynomial: Polynomial,
}

impl Place {
    /// The rational place `x = value`.
    pub fn rational(field: &GaloisField, value: FieldElement) -> Self {
        Self {
            polynomial: Polynomial::linear(FieldElement::ONE, field.neg(value)),
        }
    }

    /// Place defined by a monic irreducible polynomial. The caller vouches for
    /// irreducibility.
    pub fn from_polynomial(polynomial: Polynomial) -> Self {
        Self { polynomial }
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    pub fn degree(&self) -> usize {
        self.polynomial.degree().unwrap_or(0)
    }

    pub fn is_rational(&self) -> bool {
        self.degree() == 1
    }

    /// Constant coefficient of the defining polynomial; for `x - c` this is
    /// `-c`. Places are looked up by this key.
    pub fn key(&self) -> FieldElement {
        self.polynomial.coefficient(0)
    }

    /// Coordinate `c` of a rational place `x - c`.
    pub fn rational_value(&self, field: &GaloisField) -> Option<FieldElement> {
        self.is_rational().then(|| field.neg(self.key()))
    }
}

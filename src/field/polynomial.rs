//! Dense univariate polynomials over a [`GaloisField`].
//!
//! Coefficients are stored in ascending order and trimmed, so the zero
//! polynomial has no coefficients and structural equality is polynomial
//! equality. Every operation takes the field explicitly; a polynomial carries
//! no reference to the field it was built over.

use super::galois::{FieldError, GaloisField};
use super::FieldElement;

/// Dense polynomial represented by coefficients in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Polynomial {
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// Constructs a polynomial from raw coefficients, dropping trailing zeros.
    pub fn new(mut coefficients: Vec<FieldElement>) -> Self {
        while coefficients.last().is_some_and(|c| c.is_zero()) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: FieldElement) -> Self {
        Self::new(vec![value])
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::new(vec![FieldElement::ZERO, FieldElement::ONE])
    }

    /// The polynomial `slope * x + offset`.
    pub fn linear(slope: FieldElement, offset: FieldElement) -> Self {
        Self::new(vec![offset, slope])
    }

    /// The monic quadratic `x^2 + a1 * x + a0`.
    pub fn monic_quadratic(a1: FieldElement, a0: FieldElement) -> Self {
        Self::new(vec![a0, a1, FieldElement::ONE])
    }

    /// Rebuilds a polynomial from coefficient indices, validating each one.
    pub fn from_indices(field: &GaloisField, indices: &[u16]) -> Result<Self, FieldError> {
        let coefficients = indices
            .iter()
            .map(|index| field.element(u32::from(*index)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(coefficients))
    }

    pub fn coefficients(&self) -> &[FieldElement] {
        &self.coefficients
    }

    /// Coefficient of `x^power`, zero beyond the degree.
    pub fn coefficient(&self, power: usize) -> FieldElement {
        self.coefficients
            .get(power)
            .copied()
            .unwrap_or(FieldElement::ZERO)
    }

    /// Returns the degree of the polynomial or `None` if the polynomial is zero.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn leading(&self) -> Option<FieldElement> {
        self.coefficients.last().copied()
    }

    pub fn is_monic(&self) -> bool {
        self.leading() == Some(FieldElement::ONE)
    }

    /// Evaluates the polynomial at the provided point using Horner's method.
    pub fn evaluate(&self, field: &GaloisField, point: FieldElement) -> FieldElement {
        let mut result = FieldElement::ZERO;
        for coeff in self.coefficients.iter().rev() {
            result = field.add(field.mul(result, point), *coeff);
        }
        result
    }

    pub fn add(&self, field: &GaloisField, rhs: &Self) -> Self {
        let len = self.coefficients.len().max(rhs.coefficients.len());
        Self::new(
            (0..len)
                .map(|i| field.add(self.coefficient(i), rhs.coefficient(i)))
                .collect(),
        )
    }

    pub fn sub(&self, field: &GaloisField, rhs: &Self) -> Self {
        let len = self.coefficients.len().max(rhs.coefficients.len());
        Self::new(
            (0..len)
                .map(|i| field.sub(self.coefficient(i), rhs.coefficient(i)))
                .collect(),
        )
    }

    pub fn scale(&self, field: &GaloisField, factor: FieldElement) -> Self {
        Self::new(
            self.coefficients
                .iter()
                .map(|c| field.mul(*c, factor))
                .collect(),
        )
    }

    pub fn mul(&self, field: &GaloisField, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        let mut product =
            vec![FieldElement::ZERO; self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in rhs.coefficients.iter().enumerate() {
                product[i + j] = field.add(product[i + j], field.mul(*a, *b));
            }
        }
        Self::new(product)
    }

    pub fn pow(&self, field: &GaloisField, exponent: u32) -> Self {
        let mut result = Self::constant(FieldElement::ONE);
        for _ in 0..exponent {
            result = result.mul(field, self);
        }
        result
    }

    /// Euclidean division, `None` when dividing by the zero polynomial.
    pub fn div_rem(&self, field: &GaloisField, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_degree = divisor.degree()?;
        let lead_inv = field.inv(divisor.leading()?)?;
        let mut remainder = self.coefficients.clone();
        let mut quotient =
            vec![FieldElement::ZERO; remainder.len().saturating_sub(divisor_degree)];

        while remainder.len() > divisor_degree {
            let Some(top) = remainder.last().copied() else {
                break;
            };
            let shift = remainder.len() - 1 - divisor_degree;
            if !top.is_zero() {
                let factor = field.mul(top, lead_inv);
                quotient[shift] = factor;
                for (i, d) in divisor.coefficients.iter().enumerate() {
                    remainder[shift + i] = field.sub(remainder[shift + i], field.mul(factor, *d));
                }
            }
            remainder.pop();
        }
        Some((Self::new(quotient), Self::new(remainder)))
    }

    pub fn rem(&self, field: &GaloisField, divisor: &Self) -> Option<Self> {
        self.div_rem(field, divisor).map(|(_, r)| r)
    }

    /// Returns `true` when `self` is nonzero and divides `other`.
    pub fn divides(&self, field: &GaloisField, other: &Self) -> bool {
        other.rem(field, self).is_some_and(|r| r.is_zero())
    }

    /// Scales the polynomial so its leading coefficient is one.
    pub fn monic(&self, field: &GaloisField) -> Self {
        match self.leading().and_then(|lead| field.inv(lead)) {
            Some(inverse) => self.scale(field, inverse),
            None => self.clone(),
        }
    }

    /// Monic greatest common divisor.
    pub fn gcd(field: &GaloisField, a: &Self, b: &Self) -> Self {
        let mut a = a.clone();
        let mut b = b.clone();
        while !b.is_zero() {
            let r = a.rem(field, &b).unwrap_or_default();
            a = b;
            b = r;
        }
        a.monic(field)
    }

    /// Field elements at which the polynomial vanishes.
    pub fn roots(&self, field: &GaloisField) -> Vec<FieldElement> {
        field
            .elements()
            .filter(|point| self.evaluate(field, *point).is_zero())
            .collect()
    }

    /// Irreducibility for degrees up to three, where it reduces to having no root.
    pub fn is_irreducible_low_degree(&self, field: &GaloisField) -> Option<bool> {
        match self.degree()? {
            0 => Some(false),
            1 => Some(true),
            2 | 3 => Some(self.roots(field).is_empty()),
            _ => None,
        }
    }
}

/// All monic irreducible quadratics over `field`, ordered by linear then
/// constant coefficient index.
pub fn monic_irreducible_quadratics(field: &GaloisField) -> Vec<Polynomial> {
    let mut quadratics = Vec::new();
    for a1 in field.elements() {
        for a0 in field.elements() {
            let candidate = Polynomial::monic_quadratic(a1, a0);
            if candidate.is_irreducible_low_degree(field) == Some(true) {
                quadratics.push(candidate);
            }
        }
    }
    quadratics
}

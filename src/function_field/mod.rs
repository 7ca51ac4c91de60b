//! Algebra provider for the code search.
//!
//! The search core only needs a handful of operations from the underlying
//! function field: its places, the pull-back of a place polynomial along a
//! Möbius automorphism, Riemann–Roch bases of effective divisors and the
//! evaluation of functions at rational places. They are collected in the
//! [`AlgebraProvider`] trait. [`RationalFunctionField`] implements it for the
//! genus-0 field `GF(q)(x)`, which is the only function field the search uses.

use core::fmt;
use std::collections::HashMap;

pub mod divisor;
pub mod mobius;
pub mod place;
pub mod rational;

pub use divisor::Divisor;
pub use mobius::{MobiusMatrix, ProjectivePoint};
pub use place::Place;
pub use rational::RationalFunction;

use crate::field::{monic_irreducible_quadratics, FieldElement, FieldError, GaloisField, Polynomial};

/// Failures of the algebra layer. None of them is fatal to a search; callers
/// drop the affected automorphism, orbit or basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgebraError {
    /// The matrix does not induce an automorphism of the function field.
    NotAutomorphism,
    /// A function was evaluated at one of its poles.
    PoleAtPlace,
    /// Evaluation was requested at a place of degree other than one.
    NonRationalPlace { degree: usize },
    /// The divisor contains a place without a monic defining polynomial.
    DegenerateDivisor,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgebraError::NotAutomorphism => write!(f, "matrix does not define an automorphism"),
            AlgebraError::PoleAtPlace => write!(f, "function has a pole at the place"),
            AlgebraError::NonRationalPlace { degree } => {
                write!(f, "cannot evaluate at a place of degree {degree}")
            }
            AlgebraError::DegenerateDivisor => write!(f, "divisor is not effective on finite places"),
        }
    }
}

impl std::error::Error for AlgebraError {}

/// Operations the search consumes from the function-field layer.
pub trait AlgebraProvider {
    /// Constant field `GF(q)`.
    fn field(&self) -> &GaloisField;

    /// Monic irreducible quadratics, i.e. the degree-2 finite places.
    fn monic_irreducible_quadratics(&self) -> &[Polynomial];

    /// Rational place whose defining polynomial has constant coefficient `key`.
    fn place_by_key(&self, key: FieldElement) -> Option<&Place>;

    /// `polynomial(σ(x))` for `σ(x) = (b00 x + b01) / (b10 x + b11)`, as a
    /// reduced fraction.
    fn pullback(
        &self,
        polynomial: &Polynomial,
        sigma: &MobiusMatrix,
    ) -> Result<RationalFunction, AlgebraError>;

    /// Basis of the Riemann–Roch space `L(D)`.
    fn riemann_roch_basis(&self, divisor: &Divisor) -> Result<Vec<RationalFunction>, AlgebraError>;

    /// Value of `function` at a rational place.
    fn evaluate(&self, function: &RationalFunction, place: &Place)
        -> Result<FieldElement, AlgebraError>;
}

/// The rational function field `GF(q)(x)` together with its finite places of
/// degree one and two.
#[derive(Debug, Clone)]
pub struct RationalFunctionField {
    field: GaloisField,
    quadratics: Vec<Polynomial>,
    rational_places: Vec<Place>,
    by_key: HashMap<FieldElement, usize>,
}

impl RationalFunctionField {
    pub fn new(field: GaloisField) -> Self {
        let quadratics = monic_irreducible_quadratics(&field);
        let rational_places: Vec<Place> = field
            .elements()
            .map(|value| Place::rational(&field, value))
            .collect();
        let by_key = rational_places
            .iter()
            .enumerate()
            .map(|(index, place)| (place.key(), index))
            .collect();
        Self {
            field,
            quadratics,
            rational_places,
            by_key,
        }
    }

    /// Rebuilds the provider from the field order alone.
    pub fn from_order(order: u32) -> Result<Self, FieldError> {
        GaloisField::new(order).map(Self::new)
    }

    /// Rational place `x = value`.
    pub fn rational_place(&self, value: FieldElement) -> Option<&Place> {
        self.place_by_key(self.field.neg(value))
    }
}

impl AlgebraProvider for RationalFunctionField {
    fn field(&self) -> &GaloisField {
        &self.field
    }

    fn monic_irreducible_quadratics(&self) -> &[Polynomial] {
        &self.quadratics
    }

    fn place_by_key(&self, key: FieldElement) -> Option<&Place> {
        self.by_key
            .get(&key)
            .and_then(|index| self.rational_places.get(*index))
    }

    fn pullback(
        &self,
        polynomial: &Polynomial,
        sigma: &MobiusMatrix,
    ) -> Result<RationalFunction, AlgebraError> {
        let field = &self.field;
        if !sigma.is_invertible(field) {
            return Err(AlgebraError::NotAutomorphism);
        }
        let top = Polynomial::linear(sigma.entry(0, 0), sigma.entry(0, 1));
        let bottom = Polynomial::linear(sigma.entry(1, 0), sigma.entry(1, 1));
        let degree = polynomial.degree().unwrap_or(0) as u32;

        // Homogenise: Σ c_i top^i bottom^(d - i) over bottom^d.
        let mut numerator = Polynomial::zero();
        for (power, coefficient) in polynomial.coefficients().iter().enumerate() {
            let power = power as u32;
            let term = top
                .pow(field, power)
                .mul(field, &bottom.pow(field, degree - power))
                .scale(field, *coefficient);
            numerator = numerator.add(field, &term);
        }
        let denominator = bottom.pow(field, degree);
        RationalFunction::new(field, numerator, denominator).ok_or(AlgebraError::NotAutomorphism)
    }

    fn riemann_roch_basis(&self, divisor: &Divisor) -> Result<Vec<RationalFunction>, AlgebraError> {
        let field = &self.field;
        if divisor
            .terms()
            .iter()
            .any(|(place, _)| !place.polynomial().is_monic() || place.degree() == 0)
        {
            return Err(AlgebraError::DegenerateDivisor);
        }
        // In genus 0, L(D) = { g / Π pol^m : deg g ≤ deg D }.
        let poles = divisor.pole_polynomial(field);
        let mut monomial = Polynomial::constant(FieldElement::ONE);
        let mut basis = Vec::with_capacity(divisor.degree() + 1);
        for _ in 0..=divisor.degree() {
            let function = RationalFunction::new(field, monomial.clone(), poles.clone())
                .ok_or(AlgebraError::DegenerateDivisor)?;
            basis.push(function);
            monomial = monomial.mul(field, &Polynomial::x());
        }
        Ok(basis)
    }

    fn evaluate(
        &self,
        function: &RationalFunction,
        place: &Place,
    ) -> Result<FieldElement, AlgebraError> {
        let point = place
            .rational_value(&self.field)
            .ok_or(AlgebraError::NonRationalPlace {
                degree: place.degree(),
            })?;
        function
            .evaluate(&self.field, point)
            .ok_or(AlgebraError::PoleAtPlace)
    }
}

use crate::field::{FieldElement, GaloisField, Polynomial};

use super::place::Place;

/// Effective divisor supported on finite places: `Σ m_P · P` with `m_P > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Divisor {
    terms: Vec<(Place, u32)>,
}

impl Divisor {
    /// Divisor of zeros of the ideal generated by a place's polynomial, i.e.
    /// the place itself with multiplicity one.
    pub fn zeros_of(place: &Place) -> Self {
        Self {
            terms: vec![(place.clone(), 1)],
        }
    }

    pub fn terms(&self) -> &[(Place, u32)] {
        &self.terms
    }

    pub fn degree(&self) -> usize {
        self.terms
            .iter()
            .map(|(place, m)| place.degree() * *m as usize)
            .sum()
    }

    /// `Π pol_P^{m_P}`, the common denominator of `L(D)`.
    pub fn pole_polynomial(&self, field: &GaloisField) -> Polynomial {
        self.terms.iter().fold(
            Polynomial::constant(FieldElement::ONE),
            |acc, (place, m)| acc.mul(field, &place.polynomial().pow(field, *m)),
        )
    }
}

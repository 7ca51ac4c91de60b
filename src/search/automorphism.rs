//! Candidate automorphisms and their projective order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::MIN_LENGTH_EXCLUSIVE;
use crate::field::{FieldElement, GaloisField, Polynomial};
use crate::function_field::{AlgebraProvider, MobiusMatrix};

/// Order of `matrix` in `GL(2, q)`, or `None` when it is singular.
///
/// Element orders in `GL(2, q)` never exceed `q^2 - 1`.
pub fn linear_order(field: &GaloisField, matrix: &MobiusMatrix) -> Option<u64> {
    if !matrix.is_invertible(field) {
        return None;
    }
    let q = u64::from(field.order());
    let bound = q * q;
    let mut power = *matrix;
    let mut order = 1;
    while !power.is_identity() {
        if order >= bound {
            return None;
        }
        power = power.mul(field, matrix);
        order += 1;
    }
    Some(order)
}

/// Order of `matrix` in `PGL(2, q)`: the smallest `d` with `B^d = λ·I`.
///
/// `d` always divides the linear order, so only its divisors are tried.
pub fn projective_order(field: &GaloisField, matrix: &MobiusMatrix) -> Option<u64> {
    let linear = linear_order(field, matrix)?;
    (1..=linear)
        .filter(|d| linear % d == 0)
        .find(|d| matrix.pow(field, *d).is_scalar())
}

/// `3 < n < q + 1` and `n | q + 1`.
pub fn is_admissible_length(field_order: u32, length: usize) -> bool {
    let bound = field_order as usize + 1;
    length > MIN_LENGTH_EXCLUSIVE && length < bound && bound % length == 0
}

/// Every admissible length for `GF(field_order)`, ascending.
pub fn admissible_lengths(field_order: u32) -> Vec<usize> {
    (MIN_LENGTH_EXCLUSIVE + 1..=field_order as usize)
        .filter(|n| is_admissible_length(field_order, *n))
        .collect()
}

/// `[[t, -a0], [1, a1 + t]]` for the quadratic `x^2 + a1 x + a0`.
///
/// Its characteristic polynomial is the quadratic under `λ ↦ t - λ`, so
/// the induced map has no rational fixed point.
pub fn candidate_matrix(
    field: &GaloisField,
    quadratic: &Polynomial,
    t: FieldElement,
) -> MobiusMatrix {
    let a0 = quadratic.coefficient(0);
    let a1 = quadratic.coefficient(1);
    MobiusMatrix::new([t, field.neg(a0), FieldElement::ONE, field.add(a1, t)])
}

/// Enumerates candidate automorphisms and groups the admissible ones by
/// projective order.
pub struct AutomorphismEnumerator<'a, P> {
    provider: &'a P,
}

impl<'a, P: AlgebraProvider> AutomorphismEnumerator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Invertible candidates, one per `(quadratic, t)` pair in enumeration
    /// order.
    pub fn candidates(&self) -> Vec<MobiusMatrix> {
        let field = self.provider.field();
        let mut candidates = Vec::new();
        for quadratic in self.provider.monic_irreducible_quadratics() {
            for t in field.elements() {
                let matrix = candidate_matrix(field, quadratic, t);
                if matrix.is_invertible(field) {
                    debug_assert!(
                        !matrix.fixes_rational_point(field),
                        "{matrix:?} fixes a rational point"
                    );
                    candidates.push(matrix);
                } else {
                    debug!(?matrix, "discarding singular candidate");
                }
            }
        }
        candidates
    }

    /// Admissible candidates keyed by their projective order.
    pub fn enumerate(&self) -> BTreeMap<usize, Vec<MobiusMatrix>> {
        let field = self.provider.field();
        let mut by_length: BTreeMap<usize, Vec<MobiusMatrix>> = BTreeMap::new();
        for matrix in self.candidates() {
            let Some(order) = projective_order(field, &matrix) else {
                continue;
            };
            let length = order as usize;
            if is_admissible_length(field.order(), length) {
                by_length.entry(length).or_default().push(matrix);
            }
        }
        by_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function_field::{ProjectivePoint, RationalFunctionField};

    #[test]
    fn admissible_lengths_for_small_fields() {
        assert_eq!(admissible_lengths(7), vec![4]);
        assert_eq!(admissible_lengths(9), vec![5]);
        assert_eq!(admissible_lengths(11), vec![4, 6]);
        assert_eq!(admissible_lengths(19), vec![4, 5, 10]);
        assert!(admissible_lengths(4).is_empty());
        assert!(admissible_lengths(8).is_empty());
        assert!(!is_admissible_length(9, 10));
        assert!(!is_admissible_length(5, 3));
    }

    #[test]
    fn scalar_matrices_have_projective_order_one() {
        let field = GaloisField::new(9).expect("GF(9)");
        let scalar = MobiusMatrix::new([
            field.generator(),
            FieldElement::ZERO,
            FieldElement::ZERO,
            field.generator(),
        ]);
        assert_eq!(linear_order(&field, &scalar), Some(8));
        assert_eq!(projective_order(&field, &scalar), Some(1));
        let singular = MobiusMatrix::new([FieldElement::ONE; 4]);
        assert_eq!(projective_order(&field, &singular), None);
    }

    #[test]
    fn gf9_candidates_of_order_five() {
        let provider = RationalFunctionField::from_order(9).expect("GF(9)");
        let enumerator = AutomorphismEnumerator::new(&provider);
        assert_eq!(enumerator.candidates().len(), 36 * 9);
        let by_length = enumerator.enumerate();
        assert_eq!(by_length.keys().copied().collect::<Vec<_>>(), vec![5]);
        assert_eq!(by_length[&5].len(), 144);
    }

    #[test]
    fn candidates_move_every_rational_point() {
        let provider = RationalFunctionField::from_order(8).expect("GF(8)");
        let field = provider.field();
        for matrix in AutomorphismEnumerator::new(&provider).candidates() {
            assert!(!matrix.fixes_rational_point(field), "{matrix:?}");
            assert_ne!(
                matrix.apply(field, ProjectivePoint::Infinity),
                ProjectivePoint::Infinity
            );
        }
    }

    #[test]
    fn gf7_candidates_of_order_four() {
        let provider = RationalFunctionField::from_order(7).expect("GF(7)");
        let by_length = AutomorphismEnumerator::new(&provider).enumerate();
        assert_eq!(by_length.len(), 1);
        assert_eq!(by_length[&4].len(), 42);
    }
}

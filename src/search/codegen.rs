use tracing::debug;

use crate::code::GeneratorMatrix;
use crate::config::TARGET_DIMENSION;
use crate::field::Polynomial;
use crate::function_field::{AlgebraProvider, Divisor, Place};

use super::{Degeneracy, Orbit};

/// Evaluates the Riemann–Roch basis of a fixed place at the points of an
/// orbit and keeps the resulting matrix when its rank is the target
/// dimension.
pub struct CodeGenerator<'a, P> {
    provider: &'a P,
    dimension: usize,
}

impl<'a, P: AlgebraProvider> CodeGenerator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self::with_dimension(provider, TARGET_DIMENSION)
    }

    pub fn with_dimension(provider: &'a P, dimension: usize) -> Self {
        Self {
            provider,
            dimension,
        }
    }

    /// Generator matrix for one `(fixed place, orbit)` pair, in systematic
    /// form.
    pub fn generate(
        &self,
        fixed_place: &Polynomial,
        orbit: &Orbit,
    ) -> Result<GeneratorMatrix, Degeneracy> {
        let field = self.provider.field();
        let place = Place::from_polynomial(fixed_place.clone());
        let basis = self
            .provider
            .riemann_roch_basis(&Divisor::zeros_of(&place))
            .map_err(Degeneracy::AlgebraicDegeneracy)?;

        let mut entries = Vec::with_capacity(basis.len() * orbit.len());
        for function in &basis {
            for point in orbit.places() {
                let value = self
                    .provider
                    .evaluate(function, point)
                    .map_err(Degeneracy::AlgebraicDegeneracy)?;
                entries.push(value);
            }
        }
        let matrix = GeneratorMatrix::new(basis.len(), orbit.len(), entries).map_err(|_| {
            Degeneracy::DimensionMismatch {
                expected: self.dimension,
                got: basis.len(),
            }
        })?;

        let (systematic, pivots) = matrix.systematic_with_pivots(field);
        if pivots.len() != self.dimension {
            return Err(Degeneracy::DimensionMismatch {
                expected: self.dimension,
                got: pivots.len(),
            });
        }
        Ok(systematic)
    }

    /// Matrices for every pair; degenerate pairs are dropped.
    pub fn generate_all(&self, fixed_places: &[Polynomial], orbits: &[Orbit]) -> Vec<GeneratorMatrix> {
        let mut matrices = Vec::new();
        for fixed_place in fixed_places {
            for orbit in orbits {
                match self.generate(fixed_place, orbit) {
                    Ok(matrix) => matrices.push(matrix),
                    Err(reason) => debug!(%reason, "no code for place and orbit"),
                }
            }
        }
        matrices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::LinearCode;
    use crate::field::FieldElement;
    use crate::function_field::RationalFunctionField;

    fn gf9() -> RationalFunctionField {
        RationalFunctionField::from_order(9).expect("GF(9)")
    }

    #[test]
    fn rank_two_candidates_are_rejected() {
        let provider = gf9();
        let orbit = Orbit::from_values(&provider, &[FieldElement(1), FieldElement(4)]).expect("orbit");
        let quadratic = provider.monic_irreducible_quadratics()[0].clone();
        assert_eq!(
            CodeGenerator::new(&provider).generate(&quadratic, &orbit),
            Err(Degeneracy::DimensionMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn generated_matrix_spans_the_evaluation_code() {
        let provider = gf9();
        let field = provider.field().clone();
        let values: Vec<FieldElement> = [0u16, 1, 2, 5, 8].iter().map(|i| FieldElement(*i)).collect();
        let orbit = Orbit::from_values(&provider, &values).expect("orbit");
        let quadratic = provider.monic_irreducible_quadratics()[5].clone();
        let matrix = CodeGenerator::new(&provider)
            .generate(&quadratic, &orbit)
            .expect("rank 3");
        assert!(matrix.is_systematic());
        assert_eq!(matrix.rank(&field), 3);

        // Row i of the raw matrix is x^i / pol evaluated on the orbit.
        let mut raw = Vec::new();
        for power in 0..3u64 {
            for value in &values {
                let denominator = quadratic.evaluate(&field, *value);
                let numerator = field.pow(*value, power);
                raw.push(field.div(numerator, denominator).expect("no rational root"));
            }
        }
        let raw = GeneratorMatrix::new(3, 5, raw).expect("matrix");
        assert!(LinearCode::new(&field, &raw).same_code(&LinearCode::new(&field, &matrix)));
    }

    #[test]
    fn evaluation_at_a_pole_drops_the_pair() {
        let provider = RationalFunctionField::from_order(7).expect("GF(7)");
        let orbit = Orbit::from_values(
            &provider,
            &[FieldElement(0), FieldElement(1), FieldElement(2), FieldElement(3)],
        )
        .expect("orbit");
        // x^2 - x = x (x - 1) has zeros on the orbit.
        let reducible = Polynomial::monic_quadratic(FieldElement(6), FieldElement(0));
        assert_eq!(
            CodeGenerator::new(&provider).generate(&reducible, &orbit),
            Err(Degeneracy::AlgebraicDegeneracy(
                crate::function_field::AlgebraError::PoleAtPlace
            ))
        );
        assert!(CodeGenerator::new(&provider)
            .generate_all(&[reducible], &[orbit])
            .is_empty());
    }
}

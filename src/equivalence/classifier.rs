use tracing::info;

use crate::code::GeneratorMatrix;
use crate::config::{MonomialStrategy, DEFAULT_BRUTE_FORCE_BUDGET};
use crate::field::GaloisField;

use super::monomial::{BoundedBruteForce, MonomialReduction, PivotNormalization};
use super::permutation::reduce_by_permutation;

/// Result of both reduction stages over one set Θ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub distinct: usize,
    pub permutation_classes: Vec<GeneratorMatrix>,
    pub monomial_classes: Vec<GeneratorMatrix>,
    /// Concrete strategy used by the monomial stage.
    pub strategy: MonomialStrategy,
}

/// Reduces Θ to permutation representatives, then to monomial
/// representatives.
pub struct EquivalenceClassifier<'a> {
    field: &'a GaloisField,
    strategy: MonomialStrategy,
    budget: u64,
}

impl<'a> EquivalenceClassifier<'a> {
    pub fn new(field: &'a GaloisField, strategy: MonomialStrategy, budget: u64) -> Self {
        Self {
            field,
            strategy,
            budget,
        }
    }

    pub fn with_defaults(field: &'a GaloisField) -> Self {
        Self::new(field, MonomialStrategy::Auto, DEFAULT_BRUTE_FORCE_BUDGET)
    }

    /// Runs both stages over `theta` in iteration order.
    pub fn classify<'m, I>(&self, theta: I) -> Classification
    where
        I: IntoIterator<Item = &'m GeneratorMatrix>,
    {
        let theta: Vec<&GeneratorMatrix> = theta.into_iter().collect();
        let length = theta.first().map_or(0, |m| m.cols());
        let strategy = self
            .strategy
            .resolve(self.field.order(), length, self.budget);

        let permutation_classes = reduce_by_permutation(self.field, theta.iter().copied());
        let monomial_classes = match strategy {
            MonomialStrategy::BruteForce => {
                BoundedBruteForce::new(self.budget).reduce(self.field, &permutation_classes)
            }
            _ => PivotNormalization.reduce(self.field, &permutation_classes),
        };
        info!(
            distinct = theta.len(),
            permutation = permutation_classes.len(),
            monomial = monomial_classes.len(),
            %strategy,
            "classified codes"
        );
        Classification {
            distinct: theta.len(),
            permutation_classes,
            monomial_classes,
            strategy,
        }
    }
}

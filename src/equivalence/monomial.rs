//! Monomial-equivalence reduction.
//!
//! Two strategies share the [`MonomialReduction`] interface. Both are exact,
//! so on the same input they keep the same representatives.
//!
//! * [`PivotNormalization`] scales every non-pivot column of the systematic
//!   form so its topmost nonzero entry is one, then compares the canonical
//!   forms on information sets with projective columns. The projective
//!   comparison absorbs the row rescaling of the identity block that a
//!   column rescaling induces.
//! * [`BoundedBruteForce`] tries every column scaling of the pivot with the
//!   first column fixed, `(q - 1)^(n - 1)` permutation tests per pair. Pairs
//!   over budget fall back to the projective comparison.

use tracing::debug;

use crate::code::{matches_on_information_sets, ColumnMatch, GeneratorMatrix, LinearCode};
use crate::config::{brute_force_cost, DEFAULT_BRUTE_FORCE_BUDGET};
use crate::field::{FieldElement, GaloisField};
use crate::utils::{any_match, retain_ordered};

/// Exact monomial-equivalence test between the codes spanned by `a` and `b`.
pub fn monomially_equivalent(field: &GaloisField, a: &GeneratorMatrix, b: &GeneratorMatrix) -> bool {
    LinearCode::new(field, a).is_monomially_equivalent(field, &LinearCode::new(field, b))
}

pub trait MonomialReduction: Sync {
    /// Whether `candidate` spans a code monomially equivalent to `pivot`'s.
    fn equivalent(&self, field: &GaloisField, pivot: &GeneratorMatrix, candidate: &GeneratorMatrix)
        -> bool;

    /// Pops the first pending matrix as a representative and drops every
    /// pending matrix equivalent to it, until nothing is pending. The
    /// comparisons against one pivot run through the dispatcher.
    fn reduce(&self, field: &GaloisField, representatives: &[GeneratorMatrix]) -> Vec<GeneratorMatrix> {
        let mut accepted = Vec::new();
        let mut pending = representatives.to_vec();
        while !pending.is_empty() {
            let pivot = pending.remove(0);
            pending = retain_ordered(pending, |candidate| !self.equivalent(field, &pivot, candidate));
            accepted.push(pivot);
        }
        accepted
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PivotNormalization;

impl PivotNormalization {
    /// Systematic form with every non-pivot column pivot-normalised.
    ///
    /// The projective comparison in [`Self::codes_match`] is exact on any
    /// generator matrix; the canonical form only fixes the normalised `[I|A]`
    /// layout the codes are compared in.
    pub fn canonical_form(field: &GaloisField, matrix: &GeneratorMatrix) -> GeneratorMatrix {
        let code = LinearCode::new(field, matrix);
        let generator = code.generator();
        let mut factors = vec![FieldElement::ONE; generator.cols()];
        for col in (0..generator.cols()).filter(|c| !code.pivots().contains(c)) {
            let top = generator.column(col).into_iter().find(|e| !e.is_zero());
            if let Some(inverse) = top.and_then(|t| field.inv(t)) {
                factors[col] = inverse;
            }
        }
        generator.scale_columns(field, &factors)
    }

    /// Code of the canonical form. Matching does not depend on the
    /// normalisation, which only fixes the layout.
    fn canonical_code(field: &GaloisField, matrix: &GeneratorMatrix) -> LinearCode {
        LinearCode::new(field, &Self::canonical_form(field, matrix))
    }

    fn codes_match(field: &GaloisField, a: &LinearCode, b: &LinearCode) -> bool {
        a.shares_invariants(field, b)
            && matches_on_information_sets(field, a, b, ColumnMatch::Projective)
    }
}

impl MonomialReduction for PivotNormalization {
    fn equivalent(
        &self,
        field: &GaloisField,
        pivot: &GeneratorMatrix,
        candidate: &GeneratorMatrix,
    ) -> bool {
        Self::codes_match(
            field,
            &Self::canonical_code(field, pivot),
            &Self::canonical_code(field, candidate),
        )
    }

    /// Canonicalises every input once, then reduces first-seen.
    fn reduce(&self, field: &GaloisField, representatives: &[GeneratorMatrix]) -> Vec<GeneratorMatrix> {
        let mut accepted = Vec::new();
        let mut codes: Vec<LinearCode> = Vec::new();
        for matrix in representatives {
            let code = Self::canonical_code(field, matrix);
            if any_match(&codes, |seen| Self::codes_match(field, seen, &code)) {
                continue;
            }
            codes.push(code);
            accepted.push(matrix.clone());
        }
        accepted
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoundedBruteForce {
    budget: u64,
}

impl Default for BoundedBruteForce {
    fn default() -> Self {
        Self::new(DEFAULT_BRUTE_FORCE_BUDGET)
    }
}

impl BoundedBruteForce {
    pub fn new(budget: u64) -> Self {
        Self { budget }
    }
}

impl MonomialReduction for BoundedBruteForce {
    fn equivalent(
        &self,
        field: &GaloisField,
        pivot: &GeneratorMatrix,
        candidate: &GeneratorMatrix,
    ) -> bool {
        let pivot_code = LinearCode::new(field, pivot);
        let candidate_code = LinearCode::new(field, candidate);
        if !pivot_code.shares_invariants(field, &candidate_code) {
            return false;
        }
        if matches_on_information_sets(field, &candidate_code, &pivot_code, ColumnMatch::Exact) {
            return true;
        }

        let length = pivot.cols();
        let within_budget =
            brute_force_cost(field.order(), length).is_some_and(|cost| cost <= self.budget);
        if !within_budget {
            debug!(length, budget = self.budget, "scaling search over budget, comparing projectively");
            return matches_on_information_sets(
                field,
                &candidate_code,
                &pivot_code,
                ColumnMatch::Projective,
            );
        }

        let units: Vec<FieldElement> = field.units().collect();
        let mut digits = vec![0usize; length.saturating_sub(1)];
        // All-ones scaling was the permutation test above.
        while advance(&mut digits, units.len()) {
            let factors: Vec<FieldElement> = core::iter::once(FieldElement::ONE)
                .chain(digits.iter().map(|d| units[*d]))
                .collect();
            let scaled = LinearCode::new(field, &pivot.scale_columns(field, &factors));
            if matches_on_information_sets(field, &candidate_code, &scaled, ColumnMatch::Exact) {
                return true;
            }
        }
        false
    }
}

/// Odometer step over `base`-ary digits; `false` once it wraps around.
fn advance(digits: &mut [usize], base: usize) -> bool {
    for digit in digits.iter_mut() {
        *digit += 1;
        if *digit < base {
            return true;
        }
        *digit = 0;
    }
    false
}

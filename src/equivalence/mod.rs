//! Classification of generator matrices up to permutation and monomial
//! equivalence.

pub mod classifier;
pub mod monomial;
pub mod permutation;

pub use classifier::{Classification, EquivalenceClassifier};
pub use monomial::{monomially_equivalent, BoundedBruteForce, MonomialReduction, PivotNormalization};
pub use permutation::{permutation_equivalent, reduce_by_permutation};

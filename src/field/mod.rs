//! Field arithmetic primitives for the code search.
//! Contains the `GF(p^m)` implementation and polynomial utilities.

pub mod galois;
pub mod polynomial;

pub use galois::{prime_power, FieldElement, FieldError, GaloisField, MAX_FIELD_ORDER};
pub use polynomial::{monic_irreducible_quadratics, Polynomial};

#[cfg(test)]
pub mod tests;

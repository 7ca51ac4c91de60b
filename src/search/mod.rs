//! Search for sigma-cyclic codes of dimension 3.
//!
//! For every admissible length `n` the stages run as follows. Candidate
//! automorphisms of projective order `n` are enumerated
//! ([`AutomorphismEnumerator`]) and each becomes an [`AutomorphismTask`].
//! A task finds the fixed degree-2 places ([`FixedPlaceFinder`]) and the
//! orbits of length `n` ([`OrbitBuilder`]), then evaluates Riemann–Roch
//! bases on the orbits ([`CodeGenerator`]). Tasks are fanned out through
//! the work dispatcher and their matrices merged by [`ResultAggregator`].
//!
//! Degenerate automorphisms, orbits and place/orbit pairs are reported as
//! [`Degeneracy`] values inside a stage and only ever shrink the result.

use core::fmt;

use tracing::{debug, info, info_span};

use crate::field::{FieldElement, FieldError, GaloisField};
use crate::function_field::{AlgebraError, MobiusMatrix};
use crate::utils::dispatch_keyed;

pub mod aggregate;
pub mod automorphism;
pub mod codegen;
pub mod fixed_places;
pub mod orbit;
pub mod task;

pub use aggregate::ResultAggregator;
pub use automorphism::{
    admissible_lengths, candidate_matrix, is_admissible_length, linear_order, projective_order,
    AutomorphismEnumerator,
};
pub use codegen::CodeGenerator;
pub use fixed_places::FixedPlaceFinder;
pub use orbit::{Orbit, OrbitBuilder, SeedTable};
pub use task::{AutomorphismTask, TaskOutcome};

/// Locally recovered failures. None of them reaches a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// The algebra layer rejected a map, basis or evaluation.
    AlgebraicDegeneracy(AlgebraError),
    /// A candidate code has the wrong dimension.
    DimensionMismatch { expected: usize, got: usize },
    /// Orbit iteration repeated a place or failed to close.
    IncompleteOrbit { reached: usize, target: usize },
    /// No place carries the key; treated like an incomplete orbit.
    SeedLookupFailure { key: FieldElement },
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::AlgebraicDegeneracy(err) => write!(f, "algebraic degeneracy: {err}"),
            Degeneracy::DimensionMismatch { expected, got } => {
                write!(f, "code has dimension {got}, expected {expected}")
            }
            Degeneracy::IncompleteOrbit { reached, target } => {
                write!(f, "orbit stopped at {reached} of {target} places")
            }
            Degeneracy::SeedLookupFailure { key } => write!(f, "no place with key {key}"),
        }
    }
}

impl std::error::Error for Degeneracy {}

impl From<AlgebraError> for Degeneracy {
    fn from(err: AlgebraError) -> Self {
        Degeneracy::AlgebraicDegeneracy(err)
    }
}

/// Counters and the merged set Θ for one length.
#[derive(Debug, Clone)]
pub struct LengthHarvest {
    pub length: usize,
    pub automorphisms: usize,
    pub productive_automorphisms: usize,
    pub aggregator: ResultAggregator,
}

/// Runs one task per automorphism and merges their matrices.
///
/// Outcomes are re-associated with their automorphism by its coefficient
/// lists, then absorbed in automorphism order; Θ itself does not depend on
/// that order.
pub fn harvest_length(
    field: &GaloisField,
    length: usize,
    automorphisms: &[MobiusMatrix],
) -> Result<LengthHarvest, FieldError> {
    let span = info_span!("length", n = length);
    let _enter = span.enter();

    let tasks: Vec<AutomorphismTask> = automorphisms
        .iter()
        .map(|sigma| AutomorphismTask::new(field, length, sigma))
        .collect();
    let mut outcomes = dispatch_keyed(&tasks, |task| task.matrix.clone(), AutomorphismTask::run);

    let mut aggregator = ResultAggregator::new();
    let mut productive = 0;
    for task in &tasks {
        let Some(outcome) = outcomes.remove(&task.matrix) else {
            continue;
        };
        let outcome = outcome?;
        if !outcome.matrices.is_empty() {
            productive += 1;
        }
        aggregator.absorb_all(field, &outcome.matrices);
    }
    debug!(
        received = aggregator.received(),
        rejected = aggregator.rejected(),
        "merged task results"
    );
    info!(
        automorphisms = tasks.len(),
        productive,
        distinct = aggregator.distinct(),
        "collected generator matrices"
    );
    Ok(LengthHarvest {
        length,
        automorphisms: tasks.len(),
        productive_automorphisms: productive,
        aggregator,
    })
}

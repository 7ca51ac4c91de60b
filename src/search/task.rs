//! Per-automorphism search task.
//!
//! A task carries only primitive values, so it can cross any execution
//! boundary. Matrix entries travel as coefficient lists over `GF(p)`. Running it rebuilds the algebra locally and returns raw
//! matrices, never live algebra objects.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::code::RawMatrix;
use crate::field::{FieldError, GaloisField};
use crate::function_field::{AlgebraProvider, MobiusMatrix, RationalFunctionField};

use super::{CodeGenerator, FixedPlaceFinder, OrbitBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AutomorphismTask {
    pub field_order: u32,
    pub length: usize,
    /// Row-major entries of the automorphism as coefficient lists.
    pub matrix: [Vec<u16>; 4],
}

/// What one task produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub fixed_places: usize,
    pub orbits: usize,
    /// Systematic generator matrices of rank 3.
    pub matrices: Vec<RawMatrix>,
}

impl AutomorphismTask {
    pub fn new(field: &GaloisField, length: usize, sigma: &MobiusMatrix) -> Self {
        Self {
            field_order: field.order(),
            length,
            matrix: sigma.to_coefficients(field),
        }
    }

    /// Runs the task on a freshly built `GF(q)(x)`.
    pub fn run(&self) -> Result<TaskOutcome, FieldError> {
        let provider = RationalFunctionField::from_order(self.field_order)?;
        self.run_with(&provider)
    }

    /// Runs the task against an existing provider for the same field.
    pub fn run_with<P: AlgebraProvider>(&self, provider: &P) -> Result<TaskOutcome, FieldError> {
        let sigma = MobiusMatrix::from_coefficients(provider.field(), &self.matrix)?;
        let fixed = match FixedPlaceFinder::new(provider).fixed_places(&sigma) {
            Ok(fixed) if !fixed.is_empty() => fixed,
            Ok(_) => {
                debug!(?sigma, "no fixed degree-2 place, skipping automorphism");
                return Ok(TaskOutcome::default());
            }
            Err(reason) => {
                debug!(?sigma, %reason, "skipping automorphism");
                return Ok(TaskOutcome::default());
            }
        };
        let orbits = OrbitBuilder::new(provider, &sigma, self.length).orbits();
        let matrices = CodeGenerator::new(provider)
            .generate_all(&fixed, &orbits)
            .iter()
            .map(|matrix| matrix.to_raw())
            .collect();
        Ok(TaskOutcome {
            fixed_places: fixed.len(),
            orbits: orbits.len(),
            matrices,
        })
    }
}

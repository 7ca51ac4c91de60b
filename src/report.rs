//! Per-field search reports.
//!
//! Reports carry counts and representative matrices as plain data so that
//! the driver can print them or emit JSON.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::code::RawMatrix;
use crate::config::MonomialStrategy;

/// Outcome of the search for one admissible length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthReport {
    pub length: usize,
    /// Candidate automorphisms of this projective order.
    pub automorphisms: usize,
    /// Automorphisms that produced at least one matrix.
    pub productive_automorphisms: usize,
    /// Matrices produced by all tasks, duplicates included.
    pub generated: usize,
    /// Size of Θ.
    pub distinct: usize,
    pub permutation_classes: usize,
    pub monomial_classes: usize,
    pub strategy: MonomialStrategy,
    /// Monomial class representatives in systematic form.
    pub representatives: Vec<RawMatrix>,
}

/// Outcome of the search over one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReport {
    pub field_order: u32,
    pub characteristic: u32,
    pub degree: u32,
    /// Invertible candidate matrices examined.
    pub candidates: usize,
    pub lengths: Vec<LengthReport>,
}

impl FieldReport {
    pub fn length(&self, length: usize) -> Option<&LengthReport> {
        self.lengths.iter().find(|report| report.length == length)
    }

    pub fn admissible_lengths(&self) -> Vec<usize> {
        self.lengths.iter().map(|report| report.length).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "GF({}) = GF({}^{}): {} candidate automorphisms",
            self.field_order, self.characteristic, self.degree, self.candidates
        )?;
        if self.lengths.is_empty() {
            return writeln!(f, "  no admissible length");
        }
        for report in &self.lengths {
            write!(f, "{report}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  n = {}: {} automorphisms ({} productive), {} matrices, {} distinct, \
             {} up to permutation, {} up to monomial equivalence [{}]",
            self.length,
            self.automorphisms,
            self.productive_automorphisms,
            self.generated,
            self.distinct,
            self.permutation_classes,
            self.monomial_classes,
            self.strategy
        )?;
        for representative in &self.representatives {
            for line in representative.to_string().lines() {
                writeln!(f, "    {line}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

use std::collections::BTreeSet;

use tracing::debug;

use crate::code::{GeneratorMatrix, RawMatrix};
use crate::field::GaloisField;

/// Merges raw matrices from independent tasks into the set Θ of distinct
/// generator matrices.
///
/// Θ is ordered structurally, so its iteration order does not depend on the
/// order in which results arrived.
#[derive(Debug, Clone, Default)]
pub struct ResultAggregator {
    theta: BTreeSet<GeneratorMatrix>,
    received: usize,
    rejected: usize,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one raw matrix; returns `true` if it was new.
    pub fn absorb(&mut self, field: &GaloisField, raw: &RawMatrix) -> bool {
        self.received += 1;
        match GeneratorMatrix::from_raw(field, raw) {
            Ok(matrix) => self.theta.insert(matrix),
            Err(reason) => {
                debug!(%reason, "dropping malformed result");
                self.rejected += 1;
                false
            }
        }
    }

    pub fn absorb_all<'r, I>(&mut self, field: &GaloisField, raws: I)
    where
        I: IntoIterator<Item = &'r RawMatrix>,
    {
        for raw in raws {
            self.absorb(field, raw);
        }
    }

    /// Matrices received, duplicates included.
    pub fn received(&self) -> usize {
        self.received
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn distinct(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    pub fn theta(&self) -> &BTreeSet<GeneratorMatrix> {
        &self.theta
    }

    pub fn into_theta(self) -> BTreeSet<GeneratorMatrix> {
        self.theta
    }
}

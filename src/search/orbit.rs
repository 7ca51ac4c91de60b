//! Periodic orbits of rational places under the inverse automorphism.
//!
//! Seed `i` starts at the value `s_i` (`1` for `i = 0`, otherwise `a^i` for
//! the primitive element `a`). Its starting place is found by looking up the
//! negated seed among the place keys, which are the constant coefficients of
//! the place polynomials `x - c`. Iteration applies the adjugate of the
//! automorphism until the orbit has the target length, and the orbit is kept
//! only if one more step closes the cycle.

use std::collections::HashSet;

use tracing::debug;

use crate::field::{FieldElement, GaloisField};
use crate::function_field::{AlgebraError, AlgebraProvider, MobiusMatrix, Place};

use super::Degeneracy;

/// Seed values and their lookup keys, indexed by seed number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTable {
    values: Vec<FieldElement>,
    keys: Vec<FieldElement>,
}

impl SeedTable {
    pub fn new(field: &GaloisField) -> Self {
        let values: Vec<FieldElement> = (0..u64::from(field.order()))
            .map(|i| {
                if i == 0 {
                    FieldElement::ONE
                } else {
                    field.primitive_power(i)
                }
            })
            .collect();
        let keys = values.iter().map(|v| field.neg(*v)).collect();
        Self { values, keys }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First iteration value of seed `index`.
    pub fn value(&self, index: usize) -> FieldElement {
        self.values[index]
    }

    /// Key matched against the place index for seed `index`.
    pub fn key(&self, index: usize) -> FieldElement {
        self.keys[index]
    }
}

/// A cycle of distinct rational places under the inverse automorphism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orbit {
    places: Vec<Place>,
    values: Vec<FieldElement>,
}

impl Orbit {
    /// Orbit through the rational places at `values`, in the given order.
    /// Used for hand-built orbits; no cycle structure is checked.
    pub fn from_values<P: AlgebraProvider>(
        provider: &P,
        values: &[FieldElement],
    ) -> Result<Self, Degeneracy> {
        let field = provider.field();
        let places = values
            .iter()
            .map(|value| {
                let key = field.neg(*value);
                provider
                    .place_by_key(key)
                    .cloned()
                    .ok_or(Degeneracy::SeedLookupFailure { key })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            places,
            values: values.to_vec(),
        })
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Coordinates of the places, in orbit order.
    pub fn values(&self) -> &[FieldElement] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

pub struct OrbitBuilder<'a, P> {
    provider: &'a P,
    inverse: MobiusMatrix,
    target: usize,
    seeds: SeedTable,
}

impl<'a, P: AlgebraProvider> OrbitBuilder<'a, P> {
    pub fn new(provider: &'a P, sigma: &MobiusMatrix, target: usize) -> Self {
        let field = provider.field();
        Self {
            provider,
            inverse: sigma.adjugate(field),
            target,
            seeds: SeedTable::new(field),
        }
    }

    /// The matrix the orbits are traced with.
    pub fn inverse(&self) -> &MobiusMatrix {
        &self.inverse
    }

    /// Traces the orbit started by seed `index`.
    pub fn trace(&self, index: usize) -> Result<Orbit, Degeneracy> {
        let field = self.provider.field();
        let key = self.seeds.key(index);
        let start = self
            .provider
            .place_by_key(key)
            .ok_or(Degeneracy::SeedLookupFailure { key })?;

        let mut places = vec![start.clone()];
        let mut values = vec![self.seeds.value(index)];
        while places.len() < self.target {
            let last = values[values.len() - 1];
            let next = self
                .inverse
                .step(field, last)
                .ok_or(Degeneracy::AlgebraicDegeneracy(AlgebraError::PoleAtPlace))?;
            let key = field.neg(next);
            let place = self
                .provider
                .place_by_key(key)
                .ok_or(Degeneracy::SeedLookupFailure { key })?;
            if places.contains(place) {
                return Err(Degeneracy::IncompleteOrbit {
                    reached: places.len(),
                    target: self.target,
                });
            }
            places.push(place.clone());
            values.push(next);
        }

        let closes = values
            .last()
            .and_then(|last| self.inverse.step(field, *last))
            .is_some_and(|next| next == values[0]);
        if !closes {
            return Err(Degeneracy::IncompleteOrbit {
                reached: places.len(),
                target: self.target,
            });
        }
        Ok(Orbit { places, values })
    }

    /// All orbits of exactly the target length reachable from the seeds, in
    /// seed order. Seeds whose place is already covered are skipped, so the
    /// orbits are pairwise disjoint.
    pub fn orbits(&self) -> Vec<Orbit> {
        let mut claimed: HashSet<Place> = HashSet::new();
        let mut orbits = Vec::new();
        for index in 0..self.seeds.len() {
            let covered = self
                .provider
                .place_by_key(self.seeds.key(index))
                .is_some_and(|place| claimed.contains(place));
            if covered {
                continue;
            }
            match self.trace(index) {
                Ok(orbit) => {
                    claimed.extend(orbit.places().iter().cloned());
                    orbits.push(orbit);
                }
                Err(reason) => debug!(seed = index, %reason, "orbit discarded"),
            }
        }
        orbits
    }
}

//! Search configuration.
//!
//! Admissibility bounds and the target code dimension are compiled-in policy
//! constants. The only runtime knobs are the field order and the way the
//! monomial stage is run, both assembled through [`SearchConfigBuilder`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::{FieldError, GaloisField};

/// Dimension every retained code must have.
pub const TARGET_DIMENSION: usize = 3;

/// Lengths must be strictly larger than this.
pub const MIN_LENGTH_EXCLUSIVE: usize = 3;

pub use crate::field::MAX_FIELD_ORDER;

/// Scaled-pivot tests per pair the brute-force monomial stage may spend.
pub const DEFAULT_BRUTE_FORCE_BUDGET: u64 = 1 << 16;

/// Field sizes the driver searches when none are given.
pub const DEFAULT_FIELD_ORDERS: [u32; 5] = [8, 9, 16, 25, 27];

/// How the monomial-equivalence stage reduces the permutation representatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonomialStrategy {
    /// Brute force when `(q - 1)^(n - 1)` fits in the budget, normalisation
    /// otherwise.
    #[default]
    Auto,
    /// Pivot-normalise the columns, then compare projectively.
    Normalize,
    /// Enumerate column scalings of each pivot.
    BruteForce,
}

impl MonomialStrategy {
    /// Replaces `Auto` by the concrete strategy for `n = length`.
    pub fn resolve(self, field_order: u32, length: usize, budget: u64) -> MonomialStrategy {
        match self {
            MonomialStrategy::Auto => match brute_force_cost(field_order, length) {
                Some(cost) if cost <= budget => MonomialStrategy::BruteForce,
                _ => MonomialStrategy::Normalize,
            },
            chosen => chosen,
        }
    }
}

impl fmt::Display for MonomialStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonomialStrategy::Auto => "auto",
            MonomialStrategy::Normalize => "normalize",
            MonomialStrategy::BruteForce => "brute-force",
        };
        f.write_str(name)
    }
}

impl FromStr for MonomialStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(MonomialStrategy::Auto),
            "normalize" => Ok(MonomialStrategy::Normalize),
            "brute-force" | "brute" => Ok(MonomialStrategy::BruteForce),
            other => Err(ConfigError::UnknownStrategy {
                name: other.to_owned(),
            }),
        }
    }
}

/// Number of column scalings the brute-force stage enumerates per pair, or
/// `None` on overflow.
pub fn brute_force_cost(field_order: u32, length: usize) -> Option<u64> {
    let exponent = u32::try_from(length.saturating_sub(1)).ok()?;
    u64::from(field_order.saturating_sub(1)).checked_pow(exponent)
}

/// Errors raised while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The field order does not name a supported finite field.
    InvalidFieldOrder(FieldError),
    /// The brute-force budget must allow at least one test.
    ZeroBruteForceBudget,
    /// Strategy name not recognised.
    UnknownStrategy { name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFieldOrder(err) => write!(f, "invalid field order: {err}"),
            ConfigError::ZeroBruteForceBudget => write!(f, "brute-force budget must be positive"),
            ConfigError::UnknownStrategy { name } => {
                write!(f, "unknown monomial strategy `{name}`")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidFieldOrder(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ConfigError {
    fn from(err: FieldError) -> Self {
        ConfigError::InvalidFieldOrder(err)
    }
}

/// Validated configuration of one field search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchConfig {
    field_order: u32,
    strategy: MonomialStrategy,
    brute_force_budget: u64,
}

impl SearchConfig {
    /// Default configuration for `GF(field_order)`.
    pub fn for_field(field_order: u32) -> Result<Self, ConfigError> {
        SearchConfigBuilder::new(field_order).build()
    }

    pub fn field_order(&self) -> u32 {
        self.field_order
    }

    pub fn strategy(&self) -> MonomialStrategy {
        self.strategy
    }

    pub fn brute_force_budget(&self) -> u64 {
        self.brute_force_budget
    }

    /// Builds `GF(q)`.
    pub fn field(&self) -> Result<GaloisField, FieldError> {
        GaloisField::new(self.field_order)
    }

    /// Strategy actually used for codes of the given length.
    pub fn resolved_strategy(&self, length: usize) -> MonomialStrategy {
        self.strategy
            .resolve(self.field_order, length, self.brute_force_budget)
    }
}

/// Builder for [`SearchConfig`].
///
/// | Field | Default |
/// |-------|---------|
/// | `field_order` | required |
/// | `strategy` | [`MonomialStrategy::Auto`] |
/// | `brute_force_budget` | [`DEFAULT_BRUTE_FORCE_BUDGET`] |
#[derive(Debug, Clone)]
pub struct SearchConfigBuilder {
    pub field_order: u32,
    pub strategy: MonomialStrategy,
    pub brute_force_budget: u64,
}

impl SearchConfigBuilder {
    pub fn new(field_order: u32) -> Self {
        Self {
            field_order,
            strategy: MonomialStrategy::Auto,
            brute_force_budget: DEFAULT_BRUTE_FORCE_BUDGET,
        }
    }

    pub fn strategy(mut self, strategy: MonomialStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn brute_force_budget(mut self, budget: u64) -> Self {
        self.brute_force_budget = budget;
        self
    }

    /// Validates the builder and produces a [`SearchConfig`].
    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        GaloisField::new(self.field_order)?;
        if self.brute_force_budget == 0 {
            return Err(ConfigError::ZeroBruteForceBudget);
        }
        Ok(SearchConfig {
            field_order: self.field_order,
            strategy: self.strategy,
            brute_force_budget: self.brute_force_budget,
        })
    }
}

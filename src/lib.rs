//! Search for sigma-cyclic codes over small finite fields.
//!
//! For a field `GF(q)` the search enumerates Möbius automorphisms of the
//! rational function field whose projective order `n` satisfies
//! `3 < n < q + 1` and `n | q + 1`, builds dimension-3 codes from the degree-2
//! places each automorphism fixes and the length-`n` orbits of rational
//! places under its inverse, and classifies the codes up to permutation and
//! monomial equivalence.
//!
//! The pipeline lives in [`search`] and [`equivalence`]; [`search_field`] runs
//! it end to end and returns a [`report::FieldReport`].

pub mod code;
pub mod config;
pub mod equivalence;
pub mod field;
pub mod function_field;
pub mod report;
pub mod search;
pub mod utils;

use core::fmt;

use tracing::{info, info_span};

use config::{ConfigError, SearchConfig};
use equivalence::EquivalenceClassifier;
use field::{FieldError, GaloisField};
use function_field::{MobiusMatrix, RationalFunctionField};
use report::{FieldReport, LengthReport};
use search::{admissible_lengths, harvest_length, AutomorphismEnumerator};

/// Result type for the errors a search can surface.
pub type SearchResult<T> = core::result::Result<T, SearchError>;

/// Errors that abort a search. They are all raised before any work is
/// dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    Field(FieldError),
    Config(ConfigError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Field(err) => write!(f, "field error: {err}"),
            SearchError::Config(err) => write!(f, "configuration error: {err}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Field(err) => Some(err),
            SearchError::Config(err) => Some(err),
        }
    }
}

impl From<FieldError> for SearchError {
    fn from(err: FieldError) -> Self {
        SearchError::Field(err)
    }
}

impl From<ConfigError> for SearchError {
    fn from(err: ConfigError) -> Self {
        SearchError::Config(err)
    }
}

/// Runs the full search over one field.
pub fn search_field(config: &SearchConfig) -> SearchResult<FieldReport> {
    let span = info_span!("field", q = config.field_order());
    let _enter = span.enter();

    let field = config.field()?;
    let provider = RationalFunctionField::new(field.clone());
    let enumerator = AutomorphismEnumerator::new(&provider);
    let candidates = enumerator.candidates().len();
    let by_length = enumerator.enumerate();
    let lengths = admissible_lengths(field.order());
    info!(candidates, ?lengths, "enumerated automorphisms");

    let mut reports = Vec::with_capacity(lengths.len());
    for length in lengths {
        let automorphisms = by_length.get(&length).map_or(&[][..], Vec::as_slice);
        reports.push(search_length(config, &field, length, automorphisms)?);
    }
    Ok(FieldReport {
        field_order: field.order(),
        characteristic: field.characteristic(),
        degree: field.degree(),
        candidates,
        lengths: reports,
    })
}

/// Runs the search for every configuration in turn.
pub fn search_fields(configs: &[SearchConfig]) -> SearchResult<Vec<FieldReport>> {
    configs.iter().map(search_field).collect()
}

/// Collects Θ for one length from the given automorphisms and classifies it.
pub fn search_length(
    config: &SearchConfig,
    field: &GaloisField,
    length: usize,
    automorphisms: &[MobiusMatrix],
) -> SearchResult<LengthReport> {
    let harvest = harvest_length(field, length, automorphisms)?;
    let strategy = config.resolved_strategy(length);
    let mut report = LengthReport {
        length,
        automorphisms: harvest.automorphisms,
        productive_automorphisms: harvest.productive_automorphisms,
        generated: harvest.aggregator.received(),
        distinct: harvest.aggregator.distinct(),
        permutation_classes: 0,
        monomial_classes: 0,
        strategy,
        representatives: Vec::new(),
    };
    if harvest.aggregator.is_empty() {
        info!(length, "no codes for this length");
        return Ok(report);
    }

    let classification = EquivalenceClassifier::new(field, strategy, config.brute_force_budget())
        .classify(harvest.aggregator.theta());
    report.permutation_classes = classification.permutation_classes.len();
    report.monomial_classes = classification.monomial_classes.len();
    report.representatives = classification
        .monomial_classes
        .iter()
        .map(|matrix| matrix.to_raw())
        .collect();
    Ok(report)
}

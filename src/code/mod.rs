//! Linear-code toolkit: generator matrices, systematic forms and exact
//! equivalence tests on information sets.

pub mod linear_code;
pub mod matrix;

pub use linear_code::LinearCode;
pub use matrix::{invert_square, normalize_column, CodeError, GeneratorMatrix, RawMatrix};

pub(crate) use linear_code::{matches_on_information_sets, ColumnMatch};

//! Generator matrices as immutable values.
//!
//! [`GeneratorMatrix`] has structural equality, ordering and hashing, so the
//! same type serves as the deduplication key during aggregation and as the
//! input of every equivalence test. [`RawMatrix`] is its transport form: plain
//! dimensions and entry indices, the shape in which matrices leave a search
//! task.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{FieldElement, GaloisField};

/// Errors raised when assembling a matrix from untrusted parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    /// `rows * cols` disagrees with the number of entries supplied.
    ShapeMismatch {
        rows: usize,
        cols: usize,
        entries: usize,
    },
    /// An entry index does not belong to the field.
    EntryOutOfRange { index: u16 },
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeError::ShapeMismatch {
                rows,
                cols,
                entries,
            } => write!(f, "{rows}x{cols} matrix cannot hold {entries} entries"),
            CodeError::EntryOutOfRange { index } => {
                write!(f, "matrix entry {index} is not a field element")
            }
        }
    }
}

impl std::error::Error for CodeError {}

/// Serialisable `(rows, cols, flattened entries)` triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RawMatrix {
    pub rows: usize,
    pub cols: usize,
    /// Row-major entry indices.
    pub entries: Vec<u16>,
}

/// Row-major `rows x cols` matrix over `GF(q)`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneratorMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<FieldElement>,
}

impl fmt::Debug for GeneratorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeneratorMatrix({}x{}) ", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}

/// One bracketed row per line, entries as field indices.
impl fmt::Display for GeneratorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.cols, self.entries.iter().map(|e| e.index()))
    }
}

impl fmt::Display for RawMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.cols, self.entries.iter().copied())
    }
}

fn write_rows<I>(f: &mut fmt::Formatter<'_>, cols: usize, entries: I) -> fmt::Result
where
    I: Iterator<Item = u16>,
{
    let entries: Vec<String> = entries.map(|e| e.to_string()).collect();
    for (r, row) in entries.chunks(cols.max(1)).enumerate() {
        if r > 0 {
            writeln!(f)?;
        }
        write!(f, "[{}]", row.join(" "))?;
    }
    Ok(())
}

impl GeneratorMatrix {
    pub fn new(rows: usize, cols: usize, entries: Vec<FieldElement>) -> Result<Self, CodeError> {
        if rows * cols != entries.len() {
            return Err(CodeError::ShapeMismatch {
                rows,
                cols,
                entries: entries.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            entries,
        })
    }

    /// Convenience constructor from entry indices.
    pub fn from_indices(
        field: &GaloisField,
        rows: usize,
        cols: usize,
        indices: &[u16],
    ) -> Result<Self, CodeError> {
        let entries = indices
            .iter()
            .map(|index| {
                field
                    .element(u32::from(*index))
                    .map_err(|_| CodeError::EntryOutOfRange { index: *index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows, cols, entries)
    }

    pub fn from_raw(field: &GaloisField, raw: &RawMatrix) -> Result<Self, CodeError> {
        Self::from_indices(field, raw.rows, raw.cols, &raw.entries)
    }

    pub fn to_raw(&self) -> RawMatrix {
        RawMatrix {
            rows: self.rows,
            cols: self.cols,
            entries: self.entries.iter().map(|e| e.index()).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn entries(&self) -> &[FieldElement] {
        &self.entries
    }

    pub fn get(&self, row: usize, col: usize) -> FieldElement {
        self.entries[row * self.cols + col]
    }

    pub fn column(&self, col: usize) -> Vec<FieldElement> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    /// Reduced row echelon form and its pivot columns. Zero rows stay at the
    /// bottom.
    pub fn rref(&self, field: &GaloisField) -> (Self, Vec<usize>) {
        let mut m = self.entries.clone();
        let cols = self.cols;
        let mut pivots = Vec::new();
        let mut pivot_row = 0;
        for col in 0..cols {
            if pivot_row == self.rows {
                break;
            }
            let Some(found) = (pivot_row..self.rows).find(|r| !m[r * cols + col].is_zero())
            else {
                continue;
            };
            if found != pivot_row {
                for c in 0..cols {
                    m.swap(found * cols + c, pivot_row * cols + c);
                }
            }
            if let Some(inverse) = field.inv(m[pivot_row * cols + col]) {
                for c in 0..cols {
                    m[pivot_row * cols + c] = field.mul(m[pivot_row * cols + c], inverse);
                }
            }
            for r in 0..self.rows {
                let factor = m[r * cols + col];
                if r == pivot_row || factor.is_zero() {
                    continue;
                }
                for c in 0..cols {
                    let delta = field.mul(factor, m[pivot_row * cols + c]);
                    m[r * cols + c] = field.sub(m[r * cols + c], delta);
                }
            }
            pivots.push(col);
            pivot_row += 1;
        }
        let reduced = Self {
            rows: self.rows,
            cols,
            entries: m,
        };
        (reduced, pivots)
    }

    pub fn rank(&self, field: &GaloisField) -> usize {
        self.rref(field).1.len()
    }

    /// Systematic generator matrix of the row space: the reduced row echelon
    /// form without zero rows. When the leading columns form an information
    /// set this is `[I | A]`.
    pub fn systematic_form(&self, field: &GaloisField) -> Self {
        self.systematic_with_pivots(field).0
    }

    /// [`Self::systematic_form`] together with the pivot columns.
    pub fn systematic_with_pivots(&self, field: &GaloisField) -> (Self, Vec<usize>) {
        let (mut reduced, pivots) = self.rref(field);
        reduced.rows = pivots.len();
        reduced.entries.truncate(reduced.rows * self.cols);
        (reduced, pivots)
    }

    /// Returns `true` for matrices of the form `[I | A]`.
    pub fn is_systematic(&self) -> bool {
        self.rows <= self.cols
            && (0..self.rows).all(|r| {
                (0..self.rows).all(|c| {
                    let expected = if r == c {
                        FieldElement::ONE
                    } else {
                        FieldElement::ZERO
                    };
                    self.get(r, c) == expected
                })
            })
    }

    /// Multiplies every column by the matching factor.
    pub fn scale_columns(&self, field: &GaloisField, factors: &[FieldElement]) -> Self {
        let mut scaled = self.clone();
        for r in 0..self.rows {
            for (c, factor) in factors.iter().enumerate().take(self.cols) {
                let index = r * self.cols + c;
                scaled.entries[index] = field.mul(scaled.entries[index], *factor);
            }
        }
        scaled
    }

    /// Column `j` of the result is column `order[j]` of `self`.
    pub fn permute_columns(&self, order: &[usize]) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len());
        for r in 0..self.rows {
            for source in order {
                entries.push(self.get(r, *source));
            }
        }
        Self {
            rows: self.rows,
            cols: order.len(),
            entries,
        }
    }

    /// Left-multiplies by a square matrix given row-major.
    pub fn left_mul(&self, field: &GaloisField, square: &[FieldElement]) -> Self {
        let k = self.rows;
        let mut entries = vec![FieldElement::ZERO; self.entries.len()];
        for r in 0..k {
            for c in 0..self.cols {
                let mut acc = FieldElement::ZERO;
                for t in 0..k {
                    acc = field.add(acc, field.mul(square[r * k + t], self.get(t, c)));
                }
                entries[r * self.cols + c] = acc;
            }
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            entries,
        }
    }
}

/// Inverse of a `k x k` row-major matrix, `None` when singular.
pub fn invert_square(
    field: &GaloisField,
    matrix: &[FieldElement],
    k: usize,
) -> Option<Vec<FieldElement>> {
    let width = 2 * k;
    let mut aug = vec![FieldElement::ZERO; k * width];
    for r in 0..k {
        for c in 0..k {
            aug[r * width + c] = matrix[r * k + c];
        }
        aug[r * width + k + r] = FieldElement::ONE;
    }
    for col in 0..k {
        let found = (col..k).find(|r| !aug[r * width + col].is_zero())?;
        if found != col {
            for c in 0..width {
                aug.swap(found * width + c, col * width + c);
            }
        }
        let inverse = field.inv(aug[col * width + col])?;
        for c in 0..width {
            aug[col * width + c] = field.mul(aug[col * width + c], inverse);
        }
        for r in 0..k {
            let factor = aug[r * width + col];
            if r == col || factor.is_zero() {
                continue;
            }
            for c in 0..width {
                let delta = field.mul(factor, aug[col * width + c]);
                aug[r * width + c] = field.sub(aug[r * width + c], delta);
            }
        }
    }
    Some(
        (0..k)
            .flat_map(|r| aug[r * width + k..(r + 1) * width].to_vec())
            .collect(),
    )
}

/// Scales a column so its topmost nonzero entry becomes one. Zero columns
/// are left alone.
pub fn normalize_column(field: &GaloisField, column: &mut [FieldElement]) {
    let Some(inverse) = column
        .iter()
        .find(|e| !e.is_zero())
        .and_then(|pivot| field.inv(*pivot))
    else {
        return;
    };
    for entry in column.iter_mut() {
        *entry = field.mul(*entry, inverse);
    }
}

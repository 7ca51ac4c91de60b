use crate::field::{FieldElement, GaloisField};

use super::matrix::{invert_square, normalize_column, GeneratorMatrix};

/// Weight distributions are only tabulated when the code has at most this
/// many codewords.
const WEIGHT_DISTRIBUTION_LIMIT: u64 = 1 << 20;

/// How the columns outside an information set are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnMatch {
    /// Columns must agree exactly: permutation equivalence.
    Exact,
    /// Columns are compared as projective points, and the rows of the
    /// reduced candidate may additionally be rescaled. Two codes match in
    /// this mode exactly when they are monomially equivalent.
    Projective,
}

/// A linear code, stored through the systematic form of its generator
/// matrix. Two generator matrices span the same code iff their systematic
/// forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinearCode {
    generator: GeneratorMatrix,
    pivots: Vec<usize>,
}

impl LinearCode {
    pub fn new(field: &GaloisField, generator: &GeneratorMatrix) -> Self {
        let (generator, pivots) = generator.systematic_with_pivots(field);
        Self { generator, pivots }
    }

    pub fn length(&self) -> usize {
        self.generator.cols()
    }

    pub fn dimension(&self) -> usize {
        self.pivots.len()
    }

    /// Systematic generator matrix.
    pub fn generator(&self) -> &GeneratorMatrix {
        &self.generator
    }

    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    pub fn same_code(&self, other: &Self) -> bool {
        self.generator == other.generator
    }

    /// Columns of the systematic generator matrix outside the pivot set, in
    /// column order.
    pub fn free_columns(&self) -> Vec<Vec<FieldElement>> {
        (0..self.length())
            .filter(|c| !self.pivots.contains(c))
            .map(|c| self.generator.column(c))
            .collect()
    }

    /// Number of codewords of each Hamming weight `0..=n`, or `None` when the
    /// code is too large to enumerate.
    pub fn weight_distribution(&self, field: &GaloisField) -> Option<Vec<u64>> {
        let k = self.dimension();
        let n = self.length();
        let q = u64::from(field.order());
        let total = q.checked_pow(k as u32)?;
        if total > WEIGHT_DISTRIBUTION_LIMIT {
            return None;
        }
        let mut distribution = vec![0u64; n + 1];
        let mut message = vec![0u32; k];
        let mut word = vec![FieldElement::ZERO; n];
        for _ in 0..total {
            word.iter_mut().for_each(|e| *e = FieldElement::ZERO);
            for (row, digit) in message.iter().enumerate() {
                if *digit == 0 {
                    continue;
                }
                let scalar = FieldElement(*digit as u16);
                for (col, entry) in word.iter_mut().enumerate() {
                    *entry = field.add(*entry, field.mul(scalar, self.generator.get(row, col)));
                }
            }
            distribution[word.iter().filter(|e| !e.is_zero()).count()] += 1;
            for digit in message.iter_mut() {
                *digit += 1;
                if *digit < field.order() {
                    break;
                }
                *digit = 0;
            }
        }
        Some(distribution)
    }

    /// Exact test for a column permutation mapping `other` onto `self`.
    pub fn is_permutation_equivalent(&self, field: &GaloisField, other: &Self) -> bool {
        if !self.shares_invariants(field, other) {
            return false;
        }
        matches_on_information_sets(field, self, other, ColumnMatch::Exact)
    }

    /// Exact test for a monomial map (column permutation plus nonzero column
    /// scalings) mapping `other` onto `self`.
    pub fn is_monomially_equivalent(&self, field: &GaloisField, other: &Self) -> bool {
        if !self.shares_invariants(field, other) {
            return false;
        }
        matches_on_information_sets(field, self, other, ColumnMatch::Projective)
    }

    /// Cheap necessary condition for both kinds of equivalence.
    pub(crate) fn shares_invariants(&self, field: &GaloisField, other: &Self) -> bool {
        if self.length() != other.length() || self.dimension() != other.dimension() {
            return false;
        }
        match (self.weight_distribution(field), other.weight_distribution(field)) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => true,
        }
    }
}

/// Searches ordered information sets `J` of `candidate` for one where
/// `S_J^{-1} G` agrees with the systematic matrix of `reference`: identity on
/// `J` and the same multiset of remaining columns.
///
/// Every permutation equivalence yields such a `J` and vice versa, so the
/// test is exact. Cost is `O(n^k)` matrix inversions.
pub(crate) fn matches_on_information_sets(
    field: &GaloisField,
    reference: &LinearCode,
    candidate: &LinearCode,
    mode: ColumnMatch,
) -> bool {
    if reference.length() != candidate.length() || reference.dimension() != candidate.dimension()
    {
        return false;
    }
    let k = reference.dimension();
    if k == 0 {
        return true;
    }
    let mut target = reference.free_columns();
    if mode == ColumnMatch::Projective {
        target.iter_mut().for_each(|c| normalize_column(field, c));
    }
    target.sort();
    let scalings = match mode {
        ColumnMatch::Exact => vec![vec![FieldElement::ONE; k]],
        ColumnMatch::Projective => row_scalings(field, k),
    };
    let search = InformationSetSearch {
        field,
        generator: candidate.generator(),
        k,
        mode,
        zero_profile: zero_profile(&target),
        target,
        scalings,
    };
    let mut chosen = Vec::with_capacity(k);
    let mut used = vec![false; candidate.length()];
    search.descend(&mut chosen, &mut used)
}

struct InformationSetSearch<'a> {
    field: &'a GaloisField,
    generator: &'a GeneratorMatrix,
    k: usize,
    mode: ColumnMatch,
    target: Vec<Vec<FieldElement>>,
    zero_profile: Vec<usize>,
    scalings: Vec<Vec<FieldElement>>,
}

impl InformationSetSearch<'_> {
    fn descend(&self, chosen: &mut Vec<usize>, used: &mut [bool]) -> bool {
        if chosen.len() == self.k {
            return self.matches(chosen, used);
        }
        for col in 0..used.len() {
            if used[col] {
                continue;
            }
            used[col] = true;
            chosen.push(col);
            if self.descend(chosen, used) {
                return true;
            }
            chosen.pop();
            used[col] = false;
        }
        false
    }

    fn matches(&self, chosen: &[usize], used: &[bool]) -> bool {
        let k = self.k;
        let mut square = Vec::with_capacity(k * k);
        for r in 0..k {
            for col in chosen {
                square.push(self.generator.get(r, *col));
            }
        }
        let Some(inverse) = invert_square(self.field, &square, k) else {
            return false;
        };
        let rest: Vec<Vec<FieldElement>> = used
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(col, _)| {
                (0..k)
                    .map(|r| {
                        (0..k).fold(FieldElement::ZERO, |acc, t| {
                            let term = self.field.mul(inverse[r * k + t], self.generator.get(t, col));
                            self.field.add(acc, term)
                        })
                    })
                    .collect()
            })
            .collect();

        match self.mode {
            ColumnMatch::Exact => {
                let mut rest = rest;
                rest.sort();
                rest == self.target
            }
            ColumnMatch::Projective => {
                if zero_profile(&rest) != self.zero_profile {
                    return false;
                }
                self.scalings.iter().any(|scaling| {
                    let mut columns: Vec<Vec<FieldElement>> = rest
                        .iter()
                        .map(|column| {
                            let mut scaled: Vec<FieldElement> = column
                                .iter()
                                .zip(scaling)
                                .map(|(e, s)| self.field.mul(*e, *s))
                                .collect();
                            normalize_column(self.field, &mut scaled);
                            scaled
                        })
                        .collect();
                    columns.sort();
                    columns == self.target
                })
            }
        }
    }
}

/// Sorted zero counts of the columns; preserved by row and column scaling.
fn zero_profile(columns: &[Vec<FieldElement>]) -> Vec<usize> {
    let mut profile: Vec<usize> = columns
        .iter()
        .map(|c| c.iter().filter(|e| e.is_zero()).count())
        .collect();
    profile.sort_unstable();
    profile
}

/// Diagonal row scalings with the first entry fixed to one. Scaling all rows
/// by the same factor is invisible after column normalisation.
fn row_scalings(field: &GaloisField, k: usize) -> Vec<Vec<FieldElement>> {
    let units: Vec<FieldElement> = field.units().collect();
    let mut scalings = vec![vec![FieldElement::ONE]];
    for _ in 1..k {
        scalings = scalings
            .into_iter()
            .flat_map(|prefix| {
                units.iter().map(move |u| {
                    let mut next = prefix.clone();
                    next.push(*u);
                    next
                })
            })
            .collect();
    }
    scalings
}

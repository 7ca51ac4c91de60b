use crate::code::{GeneratorMatrix, LinearCode};
use crate::field::GaloisField;
use crate::utils::any_match;

/// Exact permutation-equivalence test between the codes spanned by `a` and `b`.
pub fn permutation_equivalent(field: &GaloisField, a: &GeneratorMatrix, b: &GeneratorMatrix) -> bool {
    LinearCode::new(field, a).is_permutation_equivalent(field, &LinearCode::new(field, b))
}

/// First-seen reduction under permutation equivalence.
///
/// Each matrix is compared against the representatives accepted so far and
/// accepted itself if it matches none. The result never holds two
/// permutation-equivalent codes; which member of a class survives depends on
/// the input order.
pub fn reduce_by_permutation<'m, I>(field: &GaloisField, matrices: I) -> Vec<GeneratorMatrix>
where
    I: IntoIterator<Item = &'m GeneratorMatrix>,
{
    let mut representatives: Vec<GeneratorMatrix> = Vec::new();
    let mut codes: Vec<LinearCode> = Vec::new();
    for matrix in matrices {
        let code = LinearCode::new(field, matrix);
        if any_match(&codes, |accepted| accepted.is_permutation_equivalent(field, &code)) {
            continue;
        }
        codes.push(code);
        representatives.push(matrix.clone());
    }
    representatives
}

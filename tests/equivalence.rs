
use std::collections::BTreeSet;

use _fixtures::{elements, field, matrix};
use proptest::prelude::*;
use sigma_cyclic::code::{GeneratorMatrix, LinearCode};
use sigma_cyclic::config::MonomialStrategy;
use sigma_cyclic::equivalence::{
    monomially_equivalent, permutation_equivalent, reduce_by_permutation, BoundedBruteForce,
    EquivalenceClassifier, MonomialReduction, PivotNormalization,
};

/// A 3x5 code over GF(4) and a copy with permuted, rescaled columns.
fn toy_pair() -> (GeneratorMatrix, GeneratorMatrix) {
    let gf4 = field(4);
    let base = matrix(&gf4, 3, &[1, 0, 0, 1, 1, 0, 1, 0, 1, 2, 0, 0, 1, 1, 3]);
    let scrambled = base
        .permute_columns(&[3, 0, 4, 2, 1])
        .scale_columns(&gf4, &elements(&[2, 3, 1, 2, 3]));
    (base, scrambled)
}

#[test]
fn scrambled_copy_collapses_to_one_representative() {
    let gf4 = field(4);
    let (base, scrambled) = toy_pair();
    insta::assert_snapshot!(scrambled.to_string(), @r"
    [2 3 1 0 0]
    [2 0 2 0 3]
    [2 0 3 2 0]
    ");

    for strategy in [MonomialStrategy::BruteForce, MonomialStrategy::Normalize] {
        let classification =
            EquivalenceClassifier::new(&gf4, strategy, 1 << 16).classify([&base, &scrambled]);
        assert_eq!(classification.distinct, 2);
        assert_eq!(classification.permutation_classes.len(), 2);
        assert_eq!(classification.monomial_classes, vec![base.clone()]);
        assert_eq!(classification.strategy, strategy);
    }
    assert!(!permutation_equivalent(&gf4, &base, &scrambled));
    assert!(monomially_equivalent(&gf4, &base, &scrambled));
}

#[test]
fn row_equivalent_matrices_are_permutation_equivalent() {
    let gf9 = field(9);
    let g = matrix(&gf9, 3, &[1, 0, 0, 1, 4, 0, 1, 0, 8, 8, 0, 0, 1, 4, 1]);
    let mixed = g.left_mul(&gf9, &elements(&[1, 2, 0, 0, 1, 0, 5, 0, 1]));
    assert_ne!(g, mixed);
    assert!(LinearCode::new(&gf9, &g).same_code(&LinearCode::new(&gf9, &mixed)));
    assert!(permutation_equivalent(&gf9, &g, &mixed));
    assert_eq!(reduce_by_permutation(&gf9, [&mixed, &g]), vec![mixed.clone()]);
}

#[test]
fn scaling_only_equivalence_needs_the_monomial_stage() {
    let gf5 = field(5);
    let c1 = matrix(&gf5, 2, &[1, 0, 1, 1, 0, 1, 1, 2]);
    let c2 = matrix(&gf5, 2, &[1, 0, 1, 1, 0, 1, 2, 4]);
    let classification = EquivalenceClassifier::with_defaults(&gf5).classify([&c1, &c2]);
    assert_eq!(classification.permutation_classes.len(), 2);
    assert_eq!(classification.monomial_classes, vec![c1.clone()]);
    assert!(BoundedBruteForce::default().equivalent(&gf5, &c1, &c2));
    assert!(PivotNormalization.equivalent(&gf5, &c1, &c2));
}

#[test]
fn inequivalent_codes_stay_apart() {
    let gf4 = field(4);
    let (base, _) = toy_pair();
    let other = matrix(&gf4, 3, &[1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 0, 1, 1, 1]);
    for reduction in [
        &BoundedBruteForce::default() as &dyn MonomialReduction,
        &PivotNormalization,
    ] {
        assert_eq!(reduction.reduce(&gf4, &[base.clone(), other.clone()]).len(), 2);
    }
}

fn arb_moves() -> impl Strategy<Value = (Vec<usize>, Vec<u16>)> {
    (
        Just((0..5).collect::<Vec<usize>>()).prop_shuffle(),
        proptest::collection::vec(1u16..4, 5),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn monomial_strategies_agree(
        bases in proptest::collection::vec(proptest::collection::vec(0u16..4, 15), 1..4),
        moves in proptest::collection::vec(arb_moves(), 1..3),
    ) {
        let gf4 = field(4);
        let mut theta = BTreeSet::new();
        for base in &bases {
            let base = matrix(&gf4, 3, base);
            for (order, factors) in &moves {
                let copy = base.permute_columns(order).scale_columns(&gf4, &elements(factors));
                theta.insert(copy.systematic_form(&gf4));
            }
            theta.insert(base.systematic_form(&gf4));
        }

        let brute = EquivalenceClassifier::new(&gf4, MonomialStrategy::BruteForce, 1 << 16)
            .classify(&theta);
        let normalized = EquivalenceClassifier::new(&gf4, MonomialStrategy::Normalize, 1 << 16)
            .classify(&theta);
        prop_assert_eq!(&brute.permutation_classes, &normalized.permutation_classes);
        prop_assert_eq!(&brute.monomial_classes, &normalized.monomial_classes);

        let mono = &brute.monomial_classes;
        prop_assert!(mono.len() <= brute.permutation_classes.len());
        prop_assert!(brute.permutation_classes.len() <= theta.len());
        prop_assert!(mono.len() <= bases.len());
        for (i, a) in mono.iter().enumerate() {
            for b in &mono[i + 1..] {
                prop_assert!(!monomially_equivalent(&gf4, a, b));
            }
        }
        for member in &theta {
            prop_assert!(mono.iter().any(|rep| monomially_equivalent(&gf4, rep, member)));
        }
        let perm = &brute.permutation_classes;
        for (i, a) in perm.iter().enumerate() {
            for b in &perm[i + 1..] {
                prop_assert!(!permutation_equivalent(&gf4, a, b));
            }
        }
    }
}

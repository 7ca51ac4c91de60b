#![cfg(feature = "parallel")]


use _fixtures::{field, gf9_report, run_search};
use sigma_cyclic::code::GeneratorMatrix;
use sigma_cyclic::equivalence::{BoundedBruteForce, MonomialReduction};
use sigma_cyclic::function_field::RationalFunctionField;
use sigma_cyclic::search::{harvest_length, AutomorphismEnumerator};
use sigma_cyclic::utils::set_parallelism;

#[test]
fn search_parallel_matches_sequential() {
    let baseline = {
        let _guard = set_parallelism(false);
        run_search(9)
    };
    assert_eq!(&baseline, gf9_report());
}

#[test]
fn harvest_parallel_matches_sequential() {
    let provider = RationalFunctionField::from_order(11).expect("GF(11)");
    let by_length = AutomorphismEnumerator::new(&provider).enumerate();
    let gf11 = field(11);
    let baseline = {
        let _guard = set_parallelism(false);
        harvest_length(&gf11, 4, &by_length[&4]).expect("harvest")
    };
    let parallel = harvest_length(&gf11, 4, &by_length[&4]).expect("harvest");
    assert_eq!(baseline.aggregator.theta(), parallel.aggregator.theta());
    assert_eq!(baseline.aggregator.received(), parallel.aggregator.received());
    assert_eq!(
        baseline.productive_automorphisms,
        parallel.productive_automorphisms
    );
}

#[test]
fn brute_force_reduction_parallel_matches_sequential() {
    let gf5 = field(5);
    let matrices: Vec<GeneratorMatrix> = [
        [1u16, 0, 1, 1, 0, 1, 1, 2],
        [1, 0, 1, 1, 0, 1, 2, 4],
        [1, 0, 1, 1, 0, 1, 1, 3],
        [1, 0, 0, 1, 0, 1, 1, 1],
    ]
    .iter()
    .map(|entries| GeneratorMatrix::from_indices(&gf5, 2, 4, entries).expect("matrix"))
    .collect();
    let reduction = BoundedBruteForce::default();
    let baseline = {
        let _guard = set_parallelism(false);
        reduction.reduce(&gf5, &matrices)
    };
    assert_eq!(baseline, reduction.reduce(&gf5, &matrices));
}


use _fixtures::elements;
use sigma_cyclic::code::{GeneratorMatrix, LinearCode};
use sigma_cyclic::function_field::{AlgebraProvider, RationalFunctionField};
use sigma_cyclic::search::{
    AutomorphismEnumerator, AutomorphismTask, CodeGenerator, Degeneracy, FixedPlaceFinder, Orbit,
    OrbitBuilder,
};

#[test]
fn dimension_three_search_never_emits_other_ranks() {
    let provider = RationalFunctionField::from_order(9).expect("GF(9)");
    let quadratic = provider.monic_irreducible_quadratics()[2].clone();

    let short = Orbit::from_values(&provider, &elements(&[3, 6])).expect("orbit");
    assert_eq!(
        CodeGenerator::new(&provider).generate(&quadratic, &short),
        Err(Degeneracy::DimensionMismatch {
            expected: 3,
            got: 2
        })
    );

    let orbit = Orbit::from_values(&provider, &elements(&[1, 2, 4, 6, 7])).expect("orbit");
    assert_eq!(
        CodeGenerator::with_dimension(&provider, 4).generate(&quadratic, &orbit),
        Err(Degeneracy::DimensionMismatch {
            expected: 4,
            got: 3
        })
    );
}

#[test]
fn generated_codes_round_trip_through_systematic_form() {
    let provider = RationalFunctionField::from_order(9).expect("GF(9)");
    let field = provider.field();
    let generator = CodeGenerator::new(&provider);
    let finder = FixedPlaceFinder::new(&provider);
    for sigma in AutomorphismEnumerator::new(&provider).enumerate()[&5].iter().take(24) {
        let fixed = finder.fixed_places(sigma).expect("invertible");
        let orbits = OrbitBuilder::new(&provider, sigma, 5).orbits();
        for matrix in generator.generate_all(&fixed, &orbits) {
            assert_eq!(matrix.rows(), 3);
            assert_eq!(matrix.rank(field), 3);
            assert!(matrix.is_systematic());
            let again = matrix.systematic_form(field);
            assert_eq!(again, matrix);
            assert!(LinearCode::new(field, &matrix).same_code(&LinearCode::new(field, &again)));
        }
    }
}

#[test]
fn task_outcomes_match_direct_generation() {
    let provider = RationalFunctionField::from_order(7).expect("GF(7)");
    let field = provider.field();
    let sigma = AutomorphismEnumerator::new(&provider).enumerate()[&4][0];
    let outcome = AutomorphismTask::new(field, 4, &sigma).run().expect("valid field");
    assert_eq!(outcome.fixed_places, 1);
    assert_eq!(outcome.orbits, 1);

    let fixed = FixedPlaceFinder::new(&provider).fixed_places(&sigma).expect("invertible");
    let orbits = OrbitBuilder::new(&provider, &sigma, 4).orbits();
    let direct: Vec<GeneratorMatrix> = CodeGenerator::new(&provider).generate_all(&fixed, &orbits);
    let shipped: Vec<GeneratorMatrix> = outcome
        .matrices
        .iter()
        .map(|raw| GeneratorMatrix::from_raw(field, raw).expect("matrix"))
        .collect();
    assert_eq!(direct, shipped);
}

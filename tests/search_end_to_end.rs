
use _fixtures::{field, gf7_report, gf9_report, run_search};
use sigma_cyclic::code::{GeneratorMatrix, LinearCode};
use sigma_cyclic::config::{ConfigError, MonomialStrategy, SearchConfig, SearchConfigBuilder};
use sigma_cyclic::field::FieldError;
use sigma_cyclic::report::FieldReport;
use sigma_cyclic::{search_field, search_fields, SearchError};

#[test]
fn gf9_yields_one_class_of_length_five() {
    let report = gf9_report();
    assert_eq!(report.field_order, 9);
    assert_eq!((report.characteristic, report.degree), (3, 2));
    assert_eq!(report.candidates, 36 * 9);
    assert_eq!(report.admissible_lengths(), vec![5]);

    let n5 = report.length(5).expect("length 5");
    assert_eq!(n5.automorphisms, 144);
    assert_eq!(n5.productive_automorphisms, 144);
    assert_eq!(n5.generated, 144);
    assert_eq!(n5.distinct, 2);
    assert_eq!(n5.permutation_classes, 1);
    assert_eq!(n5.monomial_classes, 1);
    assert_eq!(n5.strategy, MonomialStrategy::BruteForce);

    let representative =
        GeneratorMatrix::from_raw(&field(9), &n5.representatives[0]).expect("matrix");
    insta::assert_snapshot!(representative.to_string(), @r"
    [1 0 0 1 4]
    [0 1 0 8 8]
    [0 0 1 4 1]
    ");
}

#[test]
fn gf7_yields_one_class_of_length_four() {
    let report = gf7_report();
    assert_eq!(report.admissible_lengths(), vec![4]);
    let n4 = report.length(4).expect("length 4");
    assert_eq!(n4.automorphisms, 42);
    assert_eq!(n4.generated, 42);
    assert_eq!(n4.distinct, 1);
    assert_eq!(n4.monomial_classes, 1);
    assert_eq!(n4.representatives[0].entries, vec![1, 0, 0, 1, 0, 1, 0, 6, 0, 0, 1, 1]);
}

#[test]
fn gf11_has_two_lengths() {
    let report = run_search(11);
    assert_eq!(report.admissible_lengths(), vec![4, 6]);
    let n4 = report.length(4).expect("length 4");
    assert_eq!(n4.automorphisms, 110);
    // Two finite orbits per automorphism, one fixed place each.
    assert_eq!(n4.generated, 220);
    assert_eq!(n4.distinct, 1);
    let n6 = report.length(6).expect("length 6");
    assert_eq!(n6.generated, 110);
    assert_eq!(n6.monomial_classes, 1);
}

#[test]
fn representatives_are_systematic_rank_three_codes() {
    for report in [gf7_report(), gf9_report()] {
        let gf = field(report.field_order);
        for length in &report.lengths {
            assert!(length.monomial_classes <= length.permutation_classes);
            assert!(length.permutation_classes <= length.distinct);
            for raw in &length.representatives {
                let matrix = GeneratorMatrix::from_raw(&gf, raw).expect("matrix");
                assert!(matrix.is_systematic());
                assert_eq!(matrix.rank(&gf), 3);
                assert_eq!(matrix.cols(), length.length);
                let code = LinearCode::new(&gf, &matrix);
                assert!(code.same_code(&LinearCode::new(&gf, &matrix.systematic_form(&gf))));
            }
        }
    }
}

#[test]
fn fields_without_admissible_lengths_report_nothing() {
    let report = run_search(8);
    assert!(report.lengths.is_empty());
    assert_eq!(report.candidates, 28 * 8);
    assert!(report.to_string().contains("no admissible length"));
    assert!(run_search(4).lengths.is_empty());
}

#[test]
fn strategies_produce_identical_reports_modulo_label() {
    let normalize = SearchConfigBuilder::new(9)
        .strategy(MonomialStrategy::Normalize)
        .build()
        .expect("config");
    let report = search_field(&normalize).expect("search");
    let n5 = report.length(5).expect("length 5");
    let baseline = gf9_report().length(5).expect("length 5");
    assert_eq!(n5.strategy, MonomialStrategy::Normalize);
    assert_eq!(n5.representatives, baseline.representatives);
    assert_eq!(n5.monomial_classes, baseline.monomial_classes);
}

#[test]
fn invalid_field_order_fails_before_searching() {
    assert_eq!(
        SearchConfig::for_field(6),
        Err(ConfigError::InvalidFieldOrder(FieldError::NotPrimePower { order: 6 }))
    );
    let err = SearchError::from(ConfigError::ZeroBruteForceBudget);
    assert_eq!(
        err.to_string(),
        "configuration error: brute-force budget must be positive"
    );
}

#[test]
fn reports_survive_json() {
    let configs = vec![SearchConfig::for_field(7).expect("config")];
    let reports = search_fields(&configs).expect("search");
    let json = reports[0].to_json().expect("json");
    let back: FieldReport = serde_json::from_str(&json).expect("decode");
    assert_eq!(&back, gf7_report());
    assert!(json.contains("\"strategy\": \"brute-force\""));
}

use super::galois::{prime_power, FieldError, GaloisField, MAX_FIELD_ORDER};
use super::polynomial::{monic_irreducible_quadratics, Polynomial};
use super::FieldElement;

fn gf(order: u32) -> GaloisField {
    GaloisField::new(order).expect("supported field order")
}

#[test]
fn prime_power_decomposition_ok() {
    assert_eq!(prime_power(9), Some((3, 2)));
    assert_eq!(prime_power(7), Some((7, 1)));
    assert_eq!(prime_power(256), Some((2, 8)));
    assert_eq!(prime_power(12), None);
    assert_eq!(prime_power(1), None);
}

#[test]
fn reject_invalid_orders_err() {
    assert_eq!(
        GaloisField::new(6).unwrap_err(),
        FieldError::NotPrimePower { order: 6 }
    );
    assert_eq!(
        GaloisField::new(512).unwrap_err(),
        FieldError::OrderOutOfRange {
            order: 512,
            max: MAX_FIELD_ORDER
        }
    );
    assert_eq!(
        GaloisField::new(6).unwrap_err().to_string(),
        "field order 6 is not a prime power"
    );
}

#[test]
fn gf9_uses_first_primitive_modulus() {
    // x^2 + 1, x^2 + 2 and x^2 + x + 1 all fail before x^2 + x + 2.
    let field = gf(9);
    assert_eq!(field.modulus(), &[2, 1, 1]);
    let a = field.generator();
    assert_eq!(a, FieldElement(3));
    assert_eq!(field.mul(a, a), FieldElement(7));
    assert_eq!(field.pow(a, 4), FieldElement(2));
    assert_eq!(field.primitive_power(8), FieldElement::ONE);
    assert!((1..8).all(|i| field.primitive_power(i) != FieldElement::ONE));
}

#[test]
fn gf4_and_gf7_generators_ok() {
    let gf4 = gf(4);
    assert_eq!(gf4.modulus(), &[1, 1, 1]);
    assert_eq!(gf4.generator(), FieldElement(2));
    assert_eq!(gf4.mul(FieldElement(2), FieldElement(2)), FieldElement(3));

    let gf7 = gf(7);
    assert_eq!(gf7.generator(), FieldElement(5));
    assert_eq!(gf7.mul(FieldElement(3), FieldElement(5)), FieldElement(1));
}

#[test]
fn add_mul_inv_laws_ok() {
    for order in [2u32, 4, 7, 8, 9, 25] {
        let field = gf(order);
        for a in field.elements() {
            assert_eq!(field.add(a, field.neg(a)), FieldElement::ZERO);
            assert_eq!(field.mul(a, FieldElement::ONE), a);
            if let Some(inverse) = field.inv(a) {
                assert_eq!(field.mul(a, inverse), FieldElement::ONE);
            } else {
                assert!(a.is_zero());
            }
        }
    }
}

#[test]
fn frobenius_is_additive_ok() {
    let field = gf(9);
    for a in field.elements() {
        for b in field.elements() {
            let lhs = field.pow(field.add(a, b), 3);
            let rhs = field.add(field.pow(a, 3), field.pow(b, 3));
            assert_eq!(lhs, rhs);
        }
    }
}

#[test]
fn coefficient_roundtrip_ok() {
    let field = gf(27);
    for element in field.elements() {
        let coefficients = field.coefficients(element);
        assert_eq!(coefficients.len(), 3);
        assert_eq!(field.from_coefficients(&coefficients), Ok(element));
    }
    assert!(field.from_coefficients(&[3]).is_err());
    assert!(field.from_coefficients(&[0, 0, 0, 1]).is_err());
}

#[test]
fn polynomial_division_roundtrip_ok() {
    let field = gf(7);
    let a = Polynomial::monic_quadratic(FieldElement(0), FieldElement(1));
    let b = Polynomial::linear(FieldElement(1), FieldElement(2));
    let product = a.mul(&field, &b);
    assert_eq!(product.degree(), Some(3));

    let (quotient, remainder) = product.div_rem(&field, &b).expect("nonzero divisor");
    assert_eq!(quotient, a);
    assert!(remainder.is_zero());
    assert!(b.divides(&field, &product));
    assert!(!Polynomial::zero().divides(&field, &product));

    let gcd = Polynomial::gcd(&field, &product, &a.mul(&field, &Polynomial::x()));
    assert_eq!(gcd, a);
}

#[test]
fn polynomial_evaluate_horner_ok() {
    let field = gf(7);
    let poly = Polynomial::new(vec![FieldElement(1), FieldElement(2), FieldElement(3)]);
    // 1 + 2*2 + 3*4 = 17 = 3 mod 7
    assert_eq!(poly.evaluate(&field, FieldElement(2)), FieldElement(3));
    assert_eq!(
        Polynomial::new(vec![FieldElement(4), FieldElement(0)]).degree(),
        Some(0)
    );
}

#[test]
fn irreducible_quadratic_counts_ok() {
    for order in [2u32, 3, 4, 7, 9] {
        let field = gf(order);
        let quadratics = monic_irreducible_quadratics(&field);
        assert_eq!(quadratics.len() as u32, (order * order - order) / 2);
        assert!(quadratics
            .iter()
            .all(|q| q.is_monic() && q.roots(&field).is_empty()));
    }
}

use crate::field::{FieldElement, GaloisField, Polynomial};

/// Element of `GF(q)(x)` kept as a reduced fraction with monic denominator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RationalFunction {
    numerator: Polynomial,
    denominator: Polynomial,
}

impl RationalFunction {
    /// Builds `numerator / denominator`, cancelling their gcd. Returns `None`
    /// for a zero denominator.
    pub fn new(field: &GaloisField, numerator: Polynomial, denominator: Polynomial) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        let common = Polynomial::gcd(field, &numerator, &denominator);
        let (numerator, _) = numerator.div_rem(field, &common)?;
        let (denominator, _) = denominator.div_rem(field, &common)?;
        let lead_inv = field.inv(denominator.leading()?)?;
        Some(Self {
            numerator: numerator.scale(field, lead_inv),
            denominator: denominator.scale(field, lead_inv),
        })
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    /// Value at a finite point, `None` at a pole.
    pub fn evaluate(&self, field: &GaloisField, point: FieldElement) -> Option<FieldElement> {
        let denominator = self.denominator.evaluate(field, point);
        field.div(self.numerator.evaluate(field, point), denominator)
    }
}

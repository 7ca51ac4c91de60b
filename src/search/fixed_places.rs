use tracing::debug;

use crate::field::Polynomial;
use crate::function_field::{AlgebraProvider, MobiusMatrix};

use super::Degeneracy;

/// Finds the degree-2 places an automorphism maps onto themselves.
pub struct FixedPlaceFinder<'a, P> {
    provider: &'a P,
}

impl<'a, P: AlgebraProvider> FixedPlaceFinder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Quadratics `pol` with `pol | num(pol∘σ)` and `pol ∤ den(pol∘σ)`, in
    /// quadratic enumeration order. A failed pull-back disqualifies the whole
    /// automorphism.
    pub fn fixed_places(&self, sigma: &MobiusMatrix) -> Result<Vec<Polynomial>, Degeneracy> {
        let field = self.provider.field();
        let mut fixed = Vec::new();
        for quadratic in self.provider.monic_irreducible_quadratics() {
            let image = self
                .provider
                .pullback(quadratic, sigma)
                .map_err(Degeneracy::AlgebraicDegeneracy)?;
            if quadratic.divides(field, image.numerator())
                && !quadratic.divides(field, image.denominator())
            {
                fixed.push(quadratic.clone());
            }
        }
        debug!(?sigma, count = fixed.len(), "fixed degree-2 places");
        Ok(fixed)
    }
}

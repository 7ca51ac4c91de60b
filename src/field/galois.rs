//! Arithmetic in `GF(p^m)` for the small field orders the code search runs over.
//!
//! # Representation
//!
//! * [`FieldElement`] is a transparent wrapper around its canonical index in
//!   `[0, q)`. The base-`p` digits of the index (least significant first) are
//!   the coefficients of the element in the polynomial basis `1, a, a^2, ...`,
//!   where `a` is a root of the field's primitive modulus.
//! * For prime `q` the index is the residue itself, so `FieldElement(3)` is the
//!   integer `3 mod q`.
//! * The element `a` generates the multiplicative group. Multiplication,
//!   inversion and exponentiation go through log/exp tables indexed by powers
//!   of `a`; addition goes through a precomputed digit-wise table.
//!
//! A [`GaloisField`] is cheap enough to rebuild from its order alone, which is
//! what every search task does instead of sharing field state across workers.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Largest field order supported by the table-driven implementation.
pub const MAX_FIELD_ORDER: u32 = 256;

/// Field element represented by its canonical index.
#[repr(transparent)]
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct FieldElement(pub u16);

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldElement").field(&self.0).finish()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FieldElement {
    /// Additive identity.
    pub const ZERO: FieldElement = FieldElement(0);
    /// Multiplicative identity.
    pub const ONE: FieldElement = FieldElement(1);

    /// Returns the canonical index of the element.
    pub const fn index(self) -> u16 {
        self.0
    }

    /// Returns `true` for the additive identity.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Errors raised while constructing a field or decoding its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The requested order is not a prime power.
    NotPrimePower { order: u32 },
    /// The requested order is below 2 or above [`MAX_FIELD_ORDER`].
    OrderOutOfRange { order: u32, max: u32 },
    /// No primitive polynomial of the required degree was found.
    NoPrimitivePolynomial { order: u32 },
    /// An element index or coefficient list does not describe an element.
    ElementOutOfRange { index: u32, order: u32 },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NotPrimePower { order } => {
                write!(f, "field order {order} is not a prime power")
            }
            FieldError::OrderOutOfRange { order, max } => {
                write!(f, "field order {order} outside the supported range 2..={max}")
            }
            FieldError::NoPrimitivePolynomial { order } => {
                write!(f, "no primitive modulus found for GF({order})")
            }
            FieldError::ElementOutOfRange { index, order } => {
                write!(f, "element index {index} is not an element of GF({order})")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Splits `order` into `(p, m)` with `order = p^m`, or `None` when `order` is
/// not a prime power.
pub fn prime_power(order: u32) -> Option<(u32, u32)> {
    if order < 2 {
        return None;
    }
    let mut p = 2;
    while p * p <= order && order % p != 0 {
        p += 1;
    }
    if order % p != 0 {
        p = order;
    }
    let mut rest = order;
    let mut m = 0;
    while rest % p == 0 {
        rest /= p;
        m += 1;
    }
    (rest == 1).then_some((p, m))
}

/// Finite field `GF(p^m)` with a primitive modulus.
#[derive(Clone)]
pub struct GaloisField {
    characteristic: u32,
    degree: u32,
    order: u32,
    /// Monic modulus coefficients in ascending order (`degree + 1` entries).
    modulus: Vec<u16>,
    add: Vec<u16>,
    neg: Vec<u16>,
    /// `exp[i] = a^i`, stored twice over so products of logs need no reduction.
    exp: Vec<u16>,
    log: Vec<u16>,
}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaloisField")
            .field("order", &self.order)
            .field("modulus", &self.modulus)
            .finish()
    }
}

impl GaloisField {
    /// Builds `GF(order)`.
    ///
    /// The modulus is the first monic degree-`m` polynomial over `GF(p)`, in
    /// ascending order of its lower coefficients read as a base-`p` integer,
    /// for which `x` has multiplicative order `q - 1`.
    pub fn new(order: u32) -> Result<Self, FieldError> {
        if !(2..=MAX_FIELD_ORDER).contains(&order) {
            return Err(FieldError::OrderOutOfRange {
                order,
                max: MAX_FIELD_ORDER,
            });
        }
        let (p, m) = prime_power(order).ok_or(FieldError::NotPrimePower { order })?;

        let mut found = None;
        for candidate in 0..order {
            let lower = to_digits(candidate, p, m);
            if let Some(powers) = power_table(p, &lower, order) {
                found = Some((lower, powers));
                break;
            }
        }
        let (lower, powers) = found.ok_or(FieldError::NoPrimitivePolynomial { order })?;

        let mut modulus = lower;
        modulus.push(1);

        let size = order as usize;
        let mut add = vec![0u16; size * size];
        for a in 0..order {
            let da = to_digits(a, p, m);
            for b in 0..order {
                let db = to_digits(b, p, m);
                let sum: Vec<u16> = da
                    .iter()
                    .zip(db.iter())
                    .map(|(x, y)| ((u32::from(*x) + u32::from(*y)) % p) as u16)
                    .collect();
                add[a as usize * size + b as usize] = from_digits(&sum, p) as u16;
            }
        }
        let neg = (0..order)
            .map(|a| {
                let digits: Vec<u16> = to_digits(a, p, m)
                    .iter()
                    .map(|d| ((p - u32::from(*d)) % p) as u16)
                    .collect();
                from_digits(&digits, p) as u16
            })
            .collect();

        let mut log = vec![0u16; size];
        for (i, value) in powers.iter().enumerate() {
            log[*value as usize] = i as u16;
        }
        let mut exp = powers.clone();
        exp.extend_from_slice(&powers);

        Ok(Self {
            characteristic: p,
            degree: m,
            order,
            modulus,
            add,
            neg,
            exp,
            log,
        })
    }

    /// Number of elements `q`.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Characteristic `p`.
    pub fn characteristic(&self) -> u32 {
        self.characteristic
    }

    /// Extension degree `m` over the prime field.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Coefficients of the primitive modulus in ascending order.
    pub fn modulus(&self) -> &[u16] {
        &self.modulus
    }

    /// Primitive element `a`, a generator of the multiplicative group.
    pub fn generator(&self) -> FieldElement {
        self.primitive_power(1)
    }

    /// Returns `a^exponent`.
    pub fn primitive_power(&self, exponent: u64) -> FieldElement {
        let group = u64::from(self.order - 1);
        FieldElement(self.exp[(exponent % group) as usize])
    }

    /// Iterates all elements in index order.
    pub fn elements(&self) -> impl Iterator<Item = FieldElement> + '_ {
        (0..self.order).map(|index| FieldElement(index as u16))
    }

    /// Iterates the nonzero elements in index order.
    pub fn units(&self) -> impl Iterator<Item = FieldElement> + '_ {
        (1..self.order).map(|index| FieldElement(index as u16))
    }

    /// Validates a raw index.
    pub fn element(&self, index: u32) -> Result<FieldElement, FieldError> {
        if index < self.order {
            Ok(FieldElement(index as u16))
        } else {
            Err(FieldError::ElementOutOfRange {
                index,
                order: self.order,
            })
        }
    }

    /// Coefficients of `element` over `GF(p)` in the polynomial basis.
    pub fn coefficients(&self, element: FieldElement) -> Vec<u16> {
        to_digits(u32::from(element.0), self.characteristic, self.degree)
    }

    /// Rebuilds an element from its coefficient list, the transport format
    /// used when elements cross a task boundary.
    pub fn from_coefficients(&self, coefficients: &[u16]) -> Result<FieldElement, FieldError> {
        let p = self.characteristic;
        let out_of_range = coefficients.len() > self.degree as usize
            || coefficients.iter().any(|c| u32::from(*c) >= p);
        if out_of_range {
            return Err(FieldError::ElementOutOfRange {
                index: from_digits(coefficients, p),
                order: self.order,
            });
        }
        Ok(FieldElement(from_digits(coefficients, p) as u16))
    }

    pub fn add(&self, a: FieldElement, b: FieldElement) -> FieldElement {
        FieldElement(self.add[a.0 as usize * self.order as usize + b.0 as usize])
    }

    pub fn neg(&self, a: FieldElement) -> FieldElement {
        FieldElement(self.neg[a.0 as usize])
    }

    pub fn sub(&self, a: FieldElement, b: FieldElement) -> FieldElement {
        self.add(a, self.neg(b))
    }

    pub fn mul(&self, a: FieldElement, b: FieldElement) -> FieldElement {
        if a.is_zero() || b.is_zero() {
            return FieldElement::ZERO;
        }
        let index = self.log[a.0 as usize] as usize + self.log[b.0 as usize] as usize;
        FieldElement(self.exp[index])
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn inv(&self, a: FieldElement) -> Option<FieldElement> {
        if a.is_zero() {
            return None;
        }
        let group = self.order as usize - 1;
        let index = (group - self.log[a.0 as usize] as usize) % group;
        Some(FieldElement(self.exp[index]))
    }

    /// Quotient `a / b`, `None` when `b` is zero.
    pub fn div(&self, a: FieldElement, b: FieldElement) -> Option<FieldElement> {
        self.inv(b).map(|inverse| self.mul(a, inverse))
    }

    pub fn pow(&self, a: FieldElement, exponent: u64) -> FieldElement {
        if exponent == 0 {
            return FieldElement::ONE;
        }
        if a.is_zero() {
            return FieldElement::ZERO;
        }
        let group = u64::from(self.order - 1);
        let index = (u64::from(self.log[a.0 as usize]) * (exponent % group)) % group;
        FieldElement(self.exp[index as usize])
    }
}

fn to_digits(mut value: u32, p: u32, m: u32) -> Vec<u16> {
    let mut digits = Vec::with_capacity(m as usize);
    for _ in 0..m {
        digits.push((value % p) as u16);
        value /= p;
    }
    digits
}

fn from_digits(digits: &[u16], p: u32) -> u32 {
    digits
        .iter()
        .rev()
        .fold(0u32, |acc, digit| acc * p + u32::from(*digit))
}

/// Runs the "multiply by `x`" register for the monic modulus with the given
/// lower coefficients and returns `[x^0, ..., x^(q-2)]` when `x` has order
/// exactly `q - 1`.
fn power_table(p: u32, lower: &[u16], order: u32) -> Option<Vec<u16>> {
    let m = lower.len();
    let mut state = vec![0u16; m];
    state[0] = 1;
    let mut powers = Vec::with_capacity(order as usize - 1);
    for step in 0..order - 1 {
        let value = from_digits(&state, p);
        if value == 0 || (step > 0 && value == 1) {
            return None;
        }
        powers.push(value as u16);

        let top = u32::from(state[m - 1]);
        for i in (1..m).rev() {
            let reduction = (top * u32::from(lower[i])) % p;
            state[i] = ((u32::from(state[i - 1]) + p - reduction) % p) as u16;
        }
        state[0] = ((p - (top * u32::from(lower[0])) % p) % p) as u16;
    }
    (from_digits(&state, p) == 1).then_some(powers)
}

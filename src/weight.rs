//! Edge weights for the moment variants (BMD, PHDD).
//!
//! Unweighted variants (BDD, BCDD-style complement, ADD, MTBDD, KFDD, BHD)
//! use [`Weight::One`] everywhere and pay nothing for it; BMD/PHDD carry a
//! rational weight on every edge and fold a normalizing factor into the
//! node on every `find_or_insert` (spec §4.2 step 2, §9 "weight
//! canonicalization").

use crate::error::{Error, Result};

fn gcd(a: i64, b: i64) -> i64 {
  let (mut a, mut b) = (a.abs(), b.abs());
  while b != 0 { let t = b; b = a % b; a = t; }
  if a == 0 { 1 } else { a }
}

/// A rational edge weight in lowest terms, with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
  /// The multiplicative identity; the representation unweighted variants use.
  One,
  Rat(i64, i64),
}

impl Default for Weight {
  fn default() -> Self { Weight::One }
}

impl Weight {
  pub fn rat(num: i64, den: i64) -> Result<Self> {
    if den == 0 { return Err(Error::InvalidArgument("zero denominator in edge weight".into())); }
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    if num == 0 { return Ok(Weight::Rat(0, 1)); }
    let g = gcd(num, den);
    Ok(Weight::Rat(num / g, den / g))
  }

  pub fn int(n: i64) -> Self {
    if n == 1 { Weight::One } else { Weight::Rat(n, 1) }
  }

  pub fn as_ratio(self) -> (i64, i64) {
    match self { Weight::One => (1, 1), Weight::Rat(n, d) => (n, d) }
  }

  pub fn is_zero(self) -> bool { matches!(self, Weight::Rat(0, _)) }

  pub fn mul(self, other: Weight) -> Result<Self> {
    let (n1, d1) = self.as_ratio();
    let (n2, d2) = other.as_ratio();
    let num = n1.checked_mul(n2).ok_or(Error::Overflow { op: "weight-mul" })?;
    let den = d1.checked_mul(d2).ok_or(Error::Overflow { op: "weight-mul" })?;
    Weight::rat(num, den)
  }

  pub fn add(self, other: Weight) -> Result<Self> {
    let (n1, d1) = self.as_ratio();
    let (n2, d2) = other.as_ratio();
    let lhs = n1.checked_mul(d2).ok_or(Error::Overflow { op: "weight-add" })?;
    let rhs = n2.checked_mul(d1).ok_or(Error::Overflow { op: "weight-add" })?;
    let num = lhs.checked_add(rhs).ok_or(Error::Overflow { op: "weight-add" })?;
    let den = d1.checked_mul(d2).ok_or(Error::Overflow { op: "weight-add" })?;
    Weight::rat(num, den)
  }

  /// Factor out the common normalizing scalar from a pair of child weights
  /// (spec §9: "factor the GCD of child weights for integer BMD; factor the
  /// largest power of two for PHDD"). This crate treats both as the
  /// same rational-GCD normalization — a correct, if not maximally compact,
  /// choice for PHDD (see DESIGN.md).
  pub fn normalize_pair(hi: Weight, lo: Weight) -> Result<(Weight, Weight, Weight)> {
    if hi.is_zero() && lo.is_zero() { return Ok((Weight::Rat(0, 1), Weight::One, Weight::One)); }
    let (hn, hd) = hi.as_ratio();
    let (ln, ld) = lo.as_ratio();
    // put both over a common denominator, then factor the gcd of numerators.
    let common_den = hd.checked_mul(ld / gcd(hd, ld)).ok_or(Error::Overflow { op: "weight-normalize" })?;
    let hn2 = hn.checked_mul(common_den / hd).ok_or(Error::Overflow { op: "weight-normalize" })?;
    let ln2 = ln.checked_mul(common_den / ld).ok_or(Error::Overflow { op: "weight-normalize" })?;
    let g = gcd(hn2.max(ln2.abs()).max(1), gcd(hn2, ln2));
    let g = if g == 0 { 1 } else { g };
    let factor = Weight::rat(g, common_den)?;
    let new_hi = Weight::rat(hn2 / g, 1)?;
    let new_lo = Weight::rat(ln2 / g, 1)?;
    Ok((factor, new_hi, new_lo))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn one_is_identity_for_mul() {
    let w = Weight::rat(3, 4).unwrap();
    assert_eq!(w.mul(Weight::One).unwrap(), w);
  }

  #[test] fn rat_reduces_to_lowest_terms() {
    assert_eq!(Weight::rat(4, 8).unwrap(), Weight::rat(1, 2).unwrap());
    assert_eq!(Weight::rat(-2, -4).unwrap(), Weight::rat(1, 2).unwrap());
  }

  #[test] fn zero_den_is_invalid_argument() {
    assert!(matches!(Weight::rat(1, 0), Err(Error::InvalidArgument(_))));
  }

  #[test] fn mul_overflow_is_detected() {
    let huge = Weight::int(i64::MAX);
    assert!(matches!(huge.mul(Weight::int(2)), Err(Error::Overflow { .. })));
  }

  #[test] fn add_algebra() {
    let a = Weight::rat(1, 2).unwrap();
    let b = Weight::rat(1, 3).unwrap();
    assert_eq!(a.add(b).unwrap(), Weight::rat(5, 6).unwrap());
  }
}

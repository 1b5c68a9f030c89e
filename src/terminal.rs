//! Terminal pool (spec §3 C4): the small set of value-carrying leaves.
//!
//! `0`/`1` and `exp` are fixed slots encoded directly in [`crate::nid::Nid`]
//! (see `nid.rs`); this pool only exists for the open-ended set of numeric
//! leaves that algebraic/multi-terminal variants introduce on demand, hash
//! consed by value exactly like the node store hash-conses nodes.

use fxhash::FxHashMap;
use crate::nid::{self, Nid};

/// A numeric leaf value. Compared bit-for-bit so that two leaves are
/// hash-consed to the same slot iff they carry the same bits — NaN is
/// therefore just another distinct value, never collapsed with another NaN
/// by numeric equality (which would be incorrect) or merged at all.
#[derive(Debug, Clone, Copy)]
pub struct NumKey(u64);

impl NumKey {
  pub fn from_f64(v: f64) -> Self { NumKey(v.to_bits()) }
  pub fn to_f64(self) -> f64 { f64::from_bits(self.0) }
}
impl PartialEq for NumKey { fn eq(&self, other: &Self) -> bool { self.0 == other.0 } }
impl Eq for NumKey {}
impl std::hash::Hash for NumKey {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.0.hash(state) }
}

#[derive(Debug, Default)]
pub struct TerminalPool {
  values: Vec<f64>,
  index: FxHashMap<NumKey, u32>,
}

impl TerminalPool {
  pub fn new() -> Self { Self::default() }

  /// Hash-cons a numeric leaf and return its `Nid`. Slots 0/1/2 are
  /// reserved for O/I/exp (see `nid.rs`), so the pool's own indices start
  /// at 3 and are offset accordingly.
  pub fn constant(&mut self, v: f64) -> Nid {
    let key = NumKey::from_f64(v);
    let slot = *self.index.entry(key).or_insert_with(|| {
      self.values.push(v);
      (self.values.len() - 1) as u32 + nid::EXP_IX + 1
    });
    Nid::terminal(slot)
  }

  pub fn value_of(&self, n: Nid) -> Option<f64> {
    if !n.is_const() || n.idx() <= nid::EXP_IX { return None; }
    let ix = (n.idx() - nid::EXP_IX - 1) as usize;
    self.values.get(ix).map(|&v| if n.is_inv() { -v } else { v })
  }

  pub fn has_const(&self, v: f64) -> bool {
    self.index.contains_key(&NumKey::from_f64(v))
  }

  pub fn len(&self) -> usize { self.values.len() }
  pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

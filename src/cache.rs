//! Computed cache (spec §3/§4.3, component C5): memoizes recursive apply
//! calls keyed by operator + operand edges.
//!
//! The teacher's swarm workers shared a `DashMap`-backed work cache across
//! threads (`vhl::HiLoCache`, `wip.rs`); a single-threaded manager has no
//! need for that concurrency, so this is a plain direct-mapped table sized
//! from `ManagerConfig::cache_size_hint`, overwriting on collision like a
//! CPU op-cache rather than chaining — bounded memory, O(1) eviction.

use fxhash::FxHasher;
use std::hash::{Hash, Hasher};
use crate::node::Edge;
use crate::nid::Nid;

/// Identifies which recursive operation produced a cached result. Variants
/// correspond to the operation table in spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
  Ite,
  And,
  Or,
  Xor,
  Not,
  Add,
  Mul,
  Restrict,
  Compose,
  Exist,
  Forall,
  Replace,
}

/// A cache key: an operator plus up to three operand edges (`Ite`'s arity;
/// unused slots are padded with a zero-weighted O edge, which is never a
/// real operand since O is a fixed terminal with no incoming weight to
/// normalize against).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key {
  op: OpTag,
  a: Edge,
  b: Edge,
  c: Edge,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
  key: Key,
  value: Edge,
  occupied: bool,
}

impl Default for Slot {
  fn default() -> Self {
    Slot { key: Key { op: OpTag::Not, a: Edge::unweighted(Nid::default()), b: Edge::unweighted(Nid::default()), c: Edge::unweighted(Nid::default()) }, value: Edge::unweighted(Nid::default()), occupied: false }
  }
}

pub struct OpCache {
  slots: Vec<Slot>,
  hits: u64,
  misses: u64,
}

fn hash_key(key: &Key, len: usize) -> usize {
  let mut h = FxHasher::default();
  key.hash(&mut h);
  (h.finish() as usize) % len
}

impl OpCache {
  pub fn with_capacity(size_hint: usize) -> Self {
    let len = size_hint.max(1);
    OpCache { slots: vec![Slot::default(); len], hits: 0, misses: 0 }
  }

  fn lookup_key(&mut self, key: Key) -> Option<Edge> {
    let i = hash_key(&key, self.slots.len());
    let slot = &self.slots[i];
    if slot.occupied && slot.key == key {
      self.hits += 1;
      Some(slot.value)
    } else {
      self.misses += 1;
      None
    }
  }

  fn insert_key(&mut self, key: Key, value: Edge) {
    let i = hash_key(&key, self.slots.len());
    self.slots[i] = Slot { key, value, occupied: true };
  }

  pub fn get1(&mut self, op: OpTag, a: Edge) -> Option<Edge> {
    self.lookup_key(Key { op, a, b: Edge::unweighted(Nid::default()), c: Edge::unweighted(Nid::default()) })
  }
  pub fn put1(&mut self, op: OpTag, a: Edge, value: Edge) {
    self.insert_key(Key { op, a, b: Edge::unweighted(Nid::default()), c: Edge::unweighted(Nid::default()) }, value)
  }

  pub fn get2(&mut self, op: OpTag, a: Edge, b: Edge) -> Option<Edge> {
    self.lookup_key(Key { op, a, b, c: Edge::unweighted(Nid::default()) })
  }
  pub fn put2(&mut self, op: OpTag, a: Edge, b: Edge, value: Edge) {
    self.insert_key(Key { op, a, b, c: Edge::unweighted(Nid::default()) }, value)
  }

  pub fn get3(&mut self, op: OpTag, a: Edge, b: Edge, c: Edge) -> Option<Edge> {
    self.lookup_key(Key { op, a, b, c })
  }
  pub fn put3(&mut self, op: OpTag, a: Edge, b: Edge, c: Edge, value: Edge) {
    self.insert_key(Key { op, a, b, c }, value)
  }

  /// Drop every entry whose key or value mentions a node the GC just swept
  /// (component C8 hook) or whose ordering a reorder pass just invalidated
  /// (component C7 hook). A stale entry is only a missed hit, never a
  /// correctness bug, but keeping it around risks returning a `Nid` that no
  /// longer means what it used to after a swap, so callers must clear
  /// eagerly around structural mutation.
  pub fn invalidate<F: Fn(Nid) -> bool>(&mut self, stale: F) {
    for slot in &mut self.slots {
      if slot.occupied
        && (stale(slot.key.a.nid) || stale(slot.key.b.nid) || stale(slot.key.c.nid) || stale(slot.value.nid))
      {
        slot.occupied = false;
      }
    }
  }

  pub fn clear(&mut self) {
    for slot in &mut self.slots { slot.occupied = false; }
  }

  pub fn len(&self) -> usize { self.slots.iter().filter(|s| s.occupied).count() }
  pub fn hit_rate(&self) -> f64 {
    let total = self.hits + self.misses;
    if total == 0 { 0.0 } else { self.hits as f64 / total as f64 }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn e(idx: u32) -> Edge { Edge::unweighted(Nid::node(idx)) }

  #[test] fn miss_then_hit() {
    let mut cache = OpCache::with_capacity(64);
    assert_eq!(cache.get2(OpTag::Ite, e(1), e(2)), None);
    cache.put2(OpTag::Ite, e(1), e(2), e(3));
    assert_eq!(cache.get2(OpTag::Ite, e(1), e(2)), Some(e(3)));
  }

  #[test] fn distinct_ops_do_not_collide_logically() {
    let mut cache = OpCache::with_capacity(64);
    cache.put1(OpTag::Not, e(1), e(9));
    assert_eq!(cache.get1(OpTag::Not, e(1)), Some(e(9)));
    assert_eq!(cache.get2(OpTag::Ite, e(1), e(1)), None);
  }

  #[test] fn invalidate_drops_stale_entries() {
    let mut cache = OpCache::with_capacity(64);
    cache.put2(OpTag::And, e(1), e(2), e(3));
    cache.invalidate(|n| n == Nid::node(3));
    assert_eq!(cache.get2(OpTag::And, e(1), e(2)), None);
  }

  #[test] fn hit_rate_tracks_usage() {
    let mut cache = OpCache::with_capacity(64);
    cache.put1(OpTag::Not, e(1), e(2));
    cache.get1(OpTag::Not, e(1));
    cache.get1(OpTag::Not, e(5));
    assert!((cache.hit_rate() - 0.5).abs() < 1e-9);
  }
}

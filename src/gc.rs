//! Garbage collection policy (spec §4.5/§9, component C8).
//!
//! Nodes are reference counted by their root holders (the facades in
//! `variant.rs` and intermediate apply results pinned for the duration of a
//! call); a node at refcount zero is dead but not necessarily removed yet —
//! removal is batched and triggered by `ManagerConfig::dead_factor`, mirroring
//! the teacher's `swap::IxRc` amortized-collection approach without its
//! multi-threaded bookkeeping.

use crate::config::ManagerConfig;
use crate::node::NodeStore;
use crate::cache::OpCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcTrigger {
  DeadFraction,
  LoadFactor,
  Manual,
}

/// Decide whether a sweep is warranted right now, and if so run it,
/// removing dead nodes from every level and then purging any cache entry
/// that referenced one of them.
pub fn maybe_collect(config: &ManagerConfig, nodes: &mut NodeStore, cache: &mut OpCache) -> Option<GcTrigger> {
  let trigger = if nodes.dead_fraction() >= config.dead_factor {
    Some(GcTrigger::DeadFraction)
  } else if nodes.load_factor(config.utable_size_hint) >= config.load_factor {
    Some(GcTrigger::LoadFactor)
  } else {
    None
  };
  if let Some(t) = trigger {
    collect(nodes, cache);
    debug!("gc: triggered by {t:?}, {} nodes remain", nodes.total_node_count());
  }
  trigger
}

pub fn collect(nodes: &mut NodeStore, cache: &mut OpCache) {
  let removed = nodes.sweep(|_| false);
  if !removed.is_empty() {
    let removed_set: std::collections::HashSet<_> = removed.into_iter().collect();
    cache.invalidate(|n| removed_set.contains(&n));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::nid;
  use crate::node::{Edge, VariantTraits};
  use crate::vid::{Vid, Decomposition};

  #[test] fn dead_fraction_trigger_sweeps_unreferenced_node() {
    let mut nodes = NodeStore::default();
    let mut cache = OpCache::with_capacity(16);
    let traits = VariantTraits { complement: true, weighted: false };
    nodes.find_or_insert(Vid(0), Decomposition::Shannon, traits, Edge::unweighted(nid::I), Edge::unweighted(nid::O)).unwrap();
    let mut config = ManagerConfig::default();
    config.dead_factor = 0.0;
    let trigger = maybe_collect(&config, &mut nodes, &mut cache);
    assert_eq!(trigger, Some(GcTrigger::DeadFraction));
    assert_eq!(nodes.total_node_count(), 0);
  }

  #[test] fn referenced_node_survives_collection() {
    let mut nodes = NodeStore::default();
    let mut cache = OpCache::with_capacity(16);
    let traits = VariantTraits { complement: true, weighted: false };
    let edge = nodes.find_or_insert(Vid(0), Decomposition::Shannon, traits, Edge::unweighted(nid::I), Edge::unweighted(nid::O)).unwrap();
    nodes.incref(edge.nid.node_idx() as u32);
    let mut config = ManagerConfig::default();
    config.dead_factor = 0.0;
    maybe_collect(&config, &mut nodes, &mut cache);
    assert_eq!(nodes.total_node_count(), 1);
  }
}

//! The manager (spec §3, the hub all components sit behind): owns the
//! variable registry, node store, terminal pool, and computed cache for one
//! decision-diagram universe. Each of the seven variant facades in
//! `variant.rs` is a thin typed handle onto a `Manager` fixed to one
//! [`VariantKind`] — grounded in the teacher's `BddBase`, which plays the
//! same "one struct, everything hangs off it" role for plain BDDs.

use crate::cache::OpCache;
use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::nid::{self, Nid};
use crate::node::{Edge, NodeStore, VariantTraits};
use crate::terminal::TerminalPool;
use crate::vid::{Decomposition, Vid};
use crate::variable::Registry;

/// Which of the seven supported decision-diagram families a manager
/// implements. Fixed at construction; never changes for a manager's
/// lifetime (spec §3: "a manager is homogeneous in its variant").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
  Bdd,
  Add,
  Mtbdd,
  Bmd,
  Phdd,
  Kfdd,
  Bhd,
}

impl VariantKind {
  pub fn traits(self) -> VariantTraits {
    match self {
      VariantKind::Bdd | VariantKind::Bhd | VariantKind::Kfdd => VariantTraits { complement: true, weighted: false },
      VariantKind::Add | VariantKind::Mtbdd => VariantTraits { complement: false, weighted: false },
      VariantKind::Bmd | VariantKind::Phdd => VariantTraits { complement: false, weighted: true },
    }
  }

  /// Whether this variant fixes every variable to one decomposition tag,
  /// and which: Shannon for the boolean/algebraic families, positive
  /// Davio for BMD/PHDD (a binary/pseudo-Davio *moment* diagram is, by
  /// definition, positive-Davio-decomposed at every node — spec §2's
  /// BMD/PHDD modules, §4.4's "moment" arithmetic). `None` only for KFDD,
  /// which lets each variable pick its own tag per spec §2's KFDD module.
  pub fn fixed_decomposition(self) -> Option<Decomposition> {
    match self {
      VariantKind::Kfdd => None,
      VariantKind::Bmd | VariantKind::Phdd => Some(Decomposition::PosDavio),
      _ => Some(Decomposition::Shannon),
    }
  }
}

pub struct Manager {
  pub kind: VariantKind,
  pub(crate) registry: Registry,
  pub(crate) nodes: NodeStore,
  pub(crate) terminals: TerminalPool,
  pub(crate) cache: OpCache,
  pub(crate) config: ManagerConfig,
}

impl Manager {
  pub fn new(kind: VariantKind, config: ManagerConfig) -> Self {
    info!("new {kind:?} manager: {config:?}");
    Manager {
      kind,
      registry: Registry::with_capacity(config.init_var_cap),
      nodes: NodeStore::with_capacity(config.utable_size_hint),
      terminals: TerminalPool::new(),
      cache: OpCache::with_capacity(config.cache_size_hint),
      config,
    }
  }

  pub fn var(&mut self, label: impl Into<String>) -> Vid {
    let decomp = self.kind.fixed_decomposition().unwrap_or_default();
    self.registry.new_variable(Some(label.into()), decomp)
  }

  pub fn anon_var(&mut self) -> Vid {
    let decomp = self.kind.fixed_decomposition().unwrap_or_default();
    self.registry.new_variable(None, decomp)
  }

  pub fn num_vars(&self) -> usize { self.registry.len() }

  /// Build (or look up) the node branching on `var` with the given
  /// first/second children, applying this manager's variant-specific
  /// reduction and normalization rules (spec §4.2).
  pub fn mk_node(&mut self, var: Vid, hi: Edge, lo: Edge) -> Result<Edge> {
    if let Some(expected) = self.kind.fixed_decomposition() {
      let actual = self.registry.variable(var).decomposition;
      if actual != expected {
        return Err(Error::InvalidArgument(format!("{:?} only supports {expected:?} decomposition", self.kind)));
      }
    }
    let decomp = self.registry.decomposition_of(var);
    let traits = self.kind.traits();
    self.nodes.find_or_insert(var, decomp, traits, hi, lo)
  }

  /// Rewrite arena slot `idx` in place to branch on `var` with the given
  /// children, for `reorder::swap` (spec §4.6). See
  /// `NodeStore::reuse_or_redirect` for the canonicity it does and doesn't
  /// guarantee.
  pub(crate) fn reuse_or_redirect(
    &mut self,
    idx: u32,
    var: Vid,
    decomp: Decomposition,
    traits: VariantTraits,
    hi: Edge,
    lo: Edge,
  ) -> Result<Edge> {
    self.nodes.reuse_or_redirect(idx, var, decomp, traits, hi, lo)
  }

  /// Constant-one/zero edges for boolean-valued variants; use
  /// `terminal_const` for algebraic/moment leaves.
  pub fn one(&self) -> Edge { Edge::unweighted(nid::I) }
  pub fn zero(&self) -> Edge { Edge::unweighted(nid::O) }
  pub fn exp(&self) -> Edge { Edge::unweighted(nid::EXP) }

  pub fn terminal_const(&mut self, v: f64) -> Edge {
    Edge::unweighted(self.terminals.constant(v))
  }

  pub fn const_value(&self, n: Nid) -> Option<f64> {
    if n == nid::O { return Some(0.0); }
    if n == nid::I { return Some(1.0); }
    self.terminals.value_of(n)
  }

  /// Follow `edge` through any pending reorder forwarding to the edge it
  /// actually means now (a no-op outside of reordering). Every entry
  /// point that reads a caller-supplied edge's constancy or structure
  /// resolves it first, so a handle obtained before a `swap`/`sift` still
  /// reads correctly afterward even if its slot was forwarded rather than
  /// reused in place.
  pub fn resolve(&self, edge: Edge) -> Edge { self.nodes.resolve(edge) }
  pub fn resolve_nid(&self, nid: Nid) -> Nid { self.resolve(Edge::unweighted(nid)).nid }

  pub fn var_of(&self, nid: Nid) -> Vid {
    self.nodes.node_for(self.resolve_nid(nid)).var
  }

  pub fn children(&self, nid: Nid) -> (Edge, Edge) {
    let nid = self.resolve_nid(nid);
    let node = self.nodes.node_for(nid);
    if nid.is_inv() { (node.hi.invert(), node.lo.invert()) } else { (node.hi, node.lo) }
  }

  pub fn level_of(&self, var: Vid) -> usize { self.registry.level_of(var) }
  pub fn at_level(&self, level: usize) -> Vid { self.registry.at_level(level) }
  pub fn num_levels(&self) -> usize { self.registry.num_levels() }
  pub fn topmost(&self, a: Vid, b: Vid) -> Vid { self.registry.topmost(a, b) }

  /// The `index`th variable in creation order, independent of its current
  /// level — used by sifting, which visits variables by identity so a swap
  /// made mid-pass doesn't cause a variable to be skipped or revisited.
  pub fn var_by_id(&self, index: usize) -> Vid { Vid(index as u32) }

  /// Every node currently branching on `var`, used by `reorder::swap` to
  /// find what it needs to rebuild when `var`'s level changes.
  pub fn nids_for_var(&self, var: Vid) -> Vec<Nid> { self.nodes.nids_for_var(var) }
  pub fn config_max_node_growth(&self) -> f64 { self.config.max_node_growth }

  pub fn node_count(&self) -> usize { self.nodes.total_node_count() }

  /// Nodes reachable through a live arena slot, excluding ones a reorder
  /// left as pure forwards (spec §4.6, component C7) — the metric sifting
  /// minimizes, since `node_count` never shrinks on its own.
  pub fn live_node_count(&self) -> usize { self.nodes.live_node_count() }

  pub fn maybe_collect(&mut self) -> Option<crate::gc::GcTrigger> {
    crate::gc::maybe_collect(&self.config, &mut self.nodes, &mut self.cache)
  }

  pub fn collect_now(&mut self) { crate::gc::collect(&mut self.nodes, &mut self.cache); }

  /// Pin a node against collection. The manager never decrefs a handle on
  /// a caller's behalf (no implicit drop tracking); a caller done with a
  /// pinned root calls `decref` itself when it wants it eligible for GC
  /// again, mirroring the teacher's manual `IxRc` discipline.
  pub fn incref(&mut self, nid: Nid) {
    if nid.is_node() { self.nodes.incref(nid.node_idx() as u32); }
  }
  pub fn decref(&mut self, nid: Nid) {
    if nid.is_node() { self.nodes.decref(nid.node_idx() as u32); }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn mk_node_reduces_equal_children() {
    let mut m = Manager::new(VariantKind::Bdd, ManagerConfig::default());
    let v = m.var("x0");
    let edge = m.mk_node(v, m.one(), m.one()).unwrap();
    assert_eq!(edge, m.one());
  }

  #[test] fn mk_node_allocates_distinct_node() {
    let mut m = Manager::new(VariantKind::Bdd, ManagerConfig::default());
    let v = m.var("x0");
    let edge = m.mk_node(v, m.one(), m.zero()).unwrap();
    assert!(edge.nid.is_node());
    assert_eq!(m.var_of(edge.nid), v);
  }

  #[test] fn add_rejects_non_shannon_request_gracefully() {
    let mut m = Manager::new(VariantKind::Add, ManagerConfig::default());
    let v = m.var("x0");
    assert_eq!(m.registry.decomposition_of(v), Decomposition::Shannon);
    let two = m.terminal_const(2.0);
    let three = m.terminal_const(3.0);
    let edge = m.mk_node(v, two, three);
    assert!(edge.is_ok());
  }
}

//! The seven facades (spec §2/§6, component C9): thin, variant-specific
//! wrappers over [`Manager`] that each expose the uniform operation table
//! the spec describes, fixed to one [`VariantKind`] at construction —
//! mirroring how the teacher's `BddBase` is the one type application code
//! actually touches, with `bdd.rs`'s internals staying private.

use crate::apply;
use crate::config::ManagerConfig;
use crate::error::Result;
use crate::manager::{Manager, VariantKind};
use crate::node::Edge;
use crate::vid::{Decomposition, Vid};

macro_rules! facade {
  ($name:ident, $kind:expr, $doc:expr) => {
    #[doc = $doc]
    pub struct $name {
      m: Manager,
    }

    impl $name {
      pub fn new(config: ManagerConfig) -> Self { $name { m: Manager::new($kind, config) } }
      pub fn var(&mut self, label: impl Into<String>) -> Vid { self.m.var(label) }
      pub fn anon_var(&mut self) -> Vid { self.m.anon_var() }
      pub fn num_vars(&self) -> usize { self.m.num_vars() }
      pub fn one(&self) -> Edge { self.m.one() }
      pub fn zero(&self) -> Edge { self.m.zero() }
      pub fn exp(&self) -> Edge { self.m.exp() }
      pub fn node_count(&self) -> usize { self.m.node_count() }

      /// Pin a freshly-produced root against an explicit `maybe_collect`/
      /// `swap` reclaiming it out from under the caller; nothing decrefs
      /// it automatically, matching the teacher's manual `IxRc` discipline
      /// (a caller truly done with a value may call the manager's own
      /// `decref` directly, though most callers never need to).
      fn pin(&mut self, e: Edge) -> Edge { self.m.incref(e.nid); e }
      fn pin_result(&mut self, e: Result<Edge>) -> Result<Edge> { e.map(|e| self.pin(e)) }

      pub fn mk_node(&mut self, var: Vid, hi: Edge, lo: Edge) -> Result<Edge> {
        let e = self.m.mk_node(var, hi, lo);
        self.pin_result(e)
      }

      pub fn ite(&mut self, f: Edge, g: Edge, h: Edge) -> Result<Edge> { let e = apply::ite(&mut self.m, f, g, h); self.pin_result(e) }
      pub fn not(&self, f: Edge) -> Edge { apply::not(f) }
      pub fn and(&mut self, f: Edge, g: Edge) -> Result<Edge> { let e = apply::and(&mut self.m, f, g); self.pin_result(e) }
      pub fn or(&mut self, f: Edge, g: Edge) -> Result<Edge> { let e = apply::or(&mut self.m, f, g); self.pin_result(e) }
      pub fn xor(&mut self, f: Edge, g: Edge) -> Result<Edge> { let e = apply::xor(&mut self.m, f, g); self.pin_result(e) }
      pub fn restrict(&mut self, f: Edge, var: Vid, value: bool) -> Result<Edge> { let e = apply::restrict(&mut self.m, f, var, value); self.pin_result(e) }
      pub fn compose(&mut self, f: Edge, var: Vid, g: Edge) -> Result<Edge> { let e = apply::compose(&mut self.m, f, var, g); self.pin_result(e) }
      pub fn exist(&mut self, f: Edge, var: Vid) -> Result<Edge> { let e = apply::exist(&mut self.m, f, var); self.pin_result(e) }
      pub fn forall(&mut self, f: Edge, var: Vid) -> Result<Edge> { let e = apply::forall(&mut self.m, f, var); self.pin_result(e) }
      pub fn replace(&mut self, f: Edge, from: Vid, to: Vid) -> Result<Edge> { let e = apply::replace(&mut self.m, f, from, to); self.pin_result(e) }
      pub fn eval(&self, f: Edge, assignment: &[bool]) -> Option<bool> { apply::eval(&self.m, f, assignment) }
      pub fn size(&self, f: Edge) -> usize { apply::size(&self.m, f) }
      pub fn depth(&self, f: Edge) -> usize { apply::depth(&self.m, f) }
      pub fn path_count(&self, f: Edge) -> Result<u64> { apply::path_count(&self.m, f) }
      pub fn sharpsat(&self, f: Edge) -> Result<u64> { apply::sharpsat(&self.m, f, self.m.num_vars()) }
      pub fn has_const(&self, f: Edge, value: f64) -> bool { apply::has_const(&self.m, f, value) }
      pub fn is_essential(&self, f: Edge, var: Vid) -> bool { apply::is_essential(&self.m, f, var) }
      pub fn sat(&self, f: Edge) -> Vec<apply::Solution> { apply::sat(&self.m, f, self.m.num_vars()) }
      pub fn sift(&mut self) -> Result<()> { crate::reorder::sift(&mut self.m) }
      pub fn swap(&mut self, level: usize) -> Result<()> { crate::reorder::swap(&mut self.m, level) }
      pub fn maybe_collect(&mut self) -> Option<crate::gc::GcTrigger> { self.m.maybe_collect() }
    }
  };
}

facade!(Bdd, VariantKind::Bdd, "Plain reduced, complemented-edge binary decision diagrams.");
facade!(Bhd, VariantKind::Bhd, "Hybrid BDDs with an `exp` terminal for deliberately unexplored paths.");
facade!(Kfdd, VariantKind::Kfdd, "Kronecker functional decision diagrams: per-variable Shannon/Davio choice.");

macro_rules! algebraic_facade {
  ($name:ident, $kind:expr, $doc:expr) => {
    #[doc = $doc]
    pub struct $name {
      m: Manager,
    }

    impl $name {
      pub fn new(config: ManagerConfig) -> Self { $name { m: Manager::new($kind, config) } }
      pub fn var(&mut self, label: impl Into<String>) -> Vid { self.m.var(label) }
      pub fn anon_var(&mut self) -> Vid { self.m.anon_var() }
      pub fn num_vars(&self) -> usize { self.m.num_vars() }
      pub fn node_count(&self) -> usize { self.m.node_count() }

      fn pin(&mut self, e: Edge) -> Edge { self.m.incref(e.nid); e }
      fn pin_result(&mut self, e: Result<Edge>) -> Result<Edge> { e.map(|e| self.pin(e)) }

      pub fn constant(&mut self, value: f64) -> Edge { let e = self.m.terminal_const(value); self.pin(e) }
      pub fn mk_node(&mut self, var: Vid, hi: Edge, lo: Edge) -> Result<Edge> { let e = self.m.mk_node(var, hi, lo); self.pin_result(e) }

      pub fn ite(&mut self, f: Edge, g: Edge, h: Edge) -> Result<Edge> { let e = apply::ite(&mut self.m, f, g, h); self.pin_result(e) }
      pub fn add(&mut self, f: Edge, g: Edge) -> Result<Edge> { let e = apply::add(&mut self.m, f, g); self.pin_result(e) }
      pub fn mul(&mut self, f: Edge, g: Edge) -> Result<Edge> { let e = apply::mul(&mut self.m, f, g); self.pin_result(e) }
      pub fn restrict(&mut self, f: Edge, var: Vid, value: bool) -> Result<Edge> { let e = apply::restrict(&mut self.m, f, var, value); self.pin_result(e) }
      pub fn compose(&mut self, f: Edge, var: Vid, g: Edge) -> Result<Edge> { let e = apply::compose(&mut self.m, f, var, g); self.pin_result(e) }
      pub fn replace(&mut self, f: Edge, from: Vid, to: Vid) -> Result<Edge> { let e = apply::replace(&mut self.m, f, from, to); self.pin_result(e) }
      pub fn eval(&self, f: Edge, assignment: &[bool]) -> Option<f64> { apply::eval_numeric(&self.m, f, assignment) }
      pub fn size(&self, f: Edge) -> usize { apply::size(&self.m, f) }
      pub fn depth(&self, f: Edge) -> usize { apply::depth(&self.m, f) }
      pub fn has_const(&self, f: Edge, value: f64) -> bool { apply::has_const(&self.m, f, value) }
      pub fn is_essential(&self, f: Edge, var: Vid) -> bool { apply::is_essential(&self.m, f, var) }
      pub fn sift(&mut self) -> Result<()> { crate::reorder::sift(&mut self.m) }
      pub fn swap(&mut self, level: usize) -> Result<()> { crate::reorder::swap(&mut self.m, level) }
      pub fn maybe_collect(&mut self) -> Option<crate::gc::GcTrigger> { self.m.maybe_collect() }
    }
  };
}

algebraic_facade!(Add, VariantKind::Add, "Algebraic decision diagrams with a single numeric terminal pool.");
algebraic_facade!(Mtbdd, VariantKind::Mtbdd, "Multi-terminal BDDs; an ADD in all but name, kept distinct per the module split.");
algebraic_facade!(Bmd, VariantKind::Bmd, "Binary moment diagrams: rational edge weights plus `mul`.");
algebraic_facade!(Phdd, VariantKind::Phdd, "Pseudo-Hadamard-transform decision diagrams: weighted like BMD, normalized by power-of-two factor (see DESIGN.md).");

impl Kfdd {
  /// Pick which decomposition `var` uses (spec §2 KFDD module). Existing
  /// nodes for `var` are not retroactively rewritten; call this before
  /// building functions that reference `var`, the way a DTL sift would
  /// settle on a decomposition before building the diagram it scores.
  pub fn set_decomposition(&mut self, var: Vid, decomp: Decomposition) {
    self.m.registry.change_decomposition(var, decomp);
  }
  pub fn decomposition_of(&self, var: Vid) -> Decomposition { self.m.registry.decomposition_of(var) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn bdd_facade_builds_and_evaluates() {
    let mut bdd = Bdd::new(ManagerConfig::default());
    let x = bdd.var("x");
    let y = bdd.var("y");
    let fx = bdd.mk_node(x, bdd.one(), bdd.zero()).unwrap();
    let fy = bdd.mk_node(y, bdd.one(), bdd.zero()).unwrap();
    let f = bdd.and(fx, fy).unwrap();
    assert_eq!(bdd.eval(f, &[true, true]), Some(true));
    assert_eq!(bdd.eval(f, &[true, false]), Some(false));
  }

  #[test] fn add_facade_sums_constants() {
    let mut add = Add::new(ManagerConfig::default());
    let a = add.constant(2.0);
    let b = add.constant(3.0);
    let c = add.add(a, b).unwrap();
    assert!(add.has_const(c, 5.0));
  }

  #[test] fn kfdd_facade_tracks_per_variable_decomposition() {
    let mut kfdd = Kfdd::new(ManagerConfig::default());
    let x = kfdd.var("x");
    assert_eq!(kfdd.decomposition_of(x), Decomposition::Shannon);
    kfdd.set_decomposition(x, Decomposition::PosDavio);
    assert_eq!(kfdd.decomposition_of(x), Decomposition::PosDavio);
  }
}

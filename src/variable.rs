//! Variable registry (spec §3/§4.1, component C1): the ordered list of
//! variables, maintaining the id↔level bijection that `swap` and
//! `reorder` mutate.

use std::cmp::Ordering;
use crate::vid::{Vid, Decomposition};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Variable {
  pub id: Vid,
  pub label: Option<String>,
  pub decomposition: Decomposition,
}

/// Owns the id↔level bijection. Node storage itself lives in a flat,
/// level-independent arena in [`crate::node::NodeStore`]; this registry
/// only knows *which* variable sits at which level, not what nodes branch
/// on it.
#[derive(Debug, Default)]
pub struct Registry {
  vars: Vec<Variable>,
  /// `order[level] == id` — the variable currently at that level.
  order: Vec<Vid>,
  /// `level_of[id] == level` — inverse of `order`.
  level_of: Vec<usize>,
}

impl Registry {
  pub fn with_capacity(cap: usize) -> Self {
    Registry { vars: Vec::with_capacity(cap), order: Vec::with_capacity(cap), level_of: Vec::with_capacity(cap) }
  }

  pub fn len(&self) -> usize { self.vars.len() }
  pub fn is_empty(&self) -> bool { self.vars.is_empty() }

  /// Insert a fresh variable at the bottom of the current order (spec
  /// §4.1). Returns its newly assigned, permanent id.
  pub fn new_variable(&mut self, label: Option<String>, decomposition: Decomposition) -> Vid {
    let id = Vid(self.vars.len() as u32);
    let level = self.order.len();
    self.vars.push(Variable { id, label, decomposition });
    self.order.push(id);
    self.level_of.push(level);
    trace!("new_variable {id} at level {level}");
    id
  }

  pub fn variable(&self, id: Vid) -> &Variable { &self.vars[id.ix()] }
  pub fn variable_mut(&mut self, id: Vid) -> &mut Variable { &mut self.vars[id.ix()] }

  pub fn level_of(&self, id: Vid) -> usize { self.level_of[id.ix()] }
  pub fn at_level(&self, level: usize) -> Vid { self.order[level] }
  pub fn num_levels(&self) -> usize { self.order.len() }

  pub fn cmp_level(&self, a: Vid, b: Vid) -> Ordering {
    self.level_of(a).cmp(&self.level_of(b))
  }

  pub fn is_above(&self, a: Vid, b: Vid) -> bool { self.cmp_level(a, b) == Ordering::Less }
  pub fn is_below(&self, a: Vid, b: Vid) -> bool { self.cmp_level(a, b) == Ordering::Greater }

  pub fn topmost(&self, a: Vid, b: Vid) -> Vid { if self.is_above(a, b) { a } else { b } }

  /// Exchange which variables sit at two adjacent levels. This only updates
  /// the bijection; rewriting the nodes that reference the old top/bottom
  /// pair is the reordering engine's job (`reorder.rs`) because it must
  /// also touch the node store and cache.
  pub fn swap_levels(&mut self, level_a: usize, level_b: usize) -> Result<()> {
    if level_a.abs_diff(level_b) != 1 {
      return Err(Error::InvalidArgument(format!(
        "swap requires adjacent levels, got {level_a} and {level_b}"
      )));
    }
    let (va, vb) = (self.order[level_a], self.order[level_b]);
    self.order.swap(level_a, level_b);
    self.level_of[va.ix()] = level_b;
    self.level_of[vb.ix()] = level_a;
    Ok(())
  }

  pub fn change_decomposition(&mut self, id: Vid, tag: Decomposition) {
    self.variable_mut(id).decomposition = tag;
  }

  pub fn decomposition_of(&self, id: Vid) -> Decomposition { self.variable(id).decomposition }
}

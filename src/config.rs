//! Manager configuration (spec §6). Passed once at construction time;
//! the named defaults below may be module-level constants but nothing here
//! is ever mutable shared state between managers.

/// Heuristic governing when the BHD apply engine substitutes `exp` for a
/// subproblem it declines to expand (spec §6, §9 open question 1).
///
/// The `Memory` bound is resolved as a node-count estimate, not wall memory
/// (see SPEC_FULL.md §9): it's the number of *new* nodes one top-level BHD
/// operation may allocate before further expansion is abandoned in favor of
/// `exp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HybridHeuristic {
  /// Stop expanding once recursion depth exceeds the given cap.
  Level(usize),
  /// Stop expanding once the operation has allocated more than the given
  /// number of nodes.
  Memory(usize),
}

impl Default for HybridHeuristic {
  fn default() -> Self { HybridHeuristic::Level(64) }
}

/// Construction-time configuration for a [`crate::manager::Manager`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManagerConfig {
  /// Initial unique-table/arena capacity hint.
  pub utable_size_hint: usize,
  /// Initial operation-cache capacity.
  pub cache_size_hint: usize,
  /// Reserved capacity of the variable list.
  pub init_var_cap: usize,
  /// Fraction of dead (zero-refcount) nodes at or above which a sweep is
  /// worth running.
  pub dead_factor: f64,
  /// Hash-table occupancy above which GC is triggered.
  pub load_factor: f64,
  /// Multiplicative cap on reorder-induced node growth.
  pub max_node_growth: f64,
  /// Hybrid-variant (BHD) approximation heuristic.
  pub hybrid_heuristic: HybridHeuristic,
}

impl Default for ManagerConfig {
  fn default() -> Self {
    ManagerConfig {
      utable_size_hint: 257,
      cache_size_hint: 262_143,
      init_var_cap: 32,
      dead_factor: 0.3,
      load_factor: 0.7,
      max_node_growth: 1.2,
      hybrid_heuristic: HybridHeuristic::Level(64),
    }
  }
}

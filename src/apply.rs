//! The apply family (spec §4.4, component C6): every recursive algorithm a
//! facade exposes is built from the same terminal-case / cache-lookup /
//! cofactor-and-recombine skeleton, just as the teacher's `bdd.rs` builds
//! `and`/`or`/`xor` atop one shared `ite`.
//!
//! Internally every algorithm here works in genuine Shannon cofactor space
//! (`f|v=1`, `f|v=0`), regardless of what a KFDD variable's node actually
//! stores. [`cofactor_shannon`]/[`assemble`] are the only two places that
//! translate between that space and a Davio variable's stored
//! davio-term/base-term slots — the XOR that connects the two (`f|1 = hi ⊕
//! lo` for positive Davio, and its mirror for negative) is its own inverse,
//! so one pair of formulas handles both directions.

use fxhash::FxHashSet;
use crate::cache::OpTag;
use crate::error::{Error, Result};
use crate::manager::Manager;
use crate::nid::{self, Nid};
use crate::node::Edge;
use crate::vid::{Decomposition, Vid};
use crate::weight::Weight;

fn weight_mul(a: Weight, b: Weight) -> Weight { a.mul(b).unwrap_or(a) }

fn scale(e: Edge, by: Weight) -> Edge { Edge::new(e.nid, weight_mul(e.weight, by)) }

/// Additive inverse of a weighted edge's function. A no-op where it
/// shouldn't matter (unweighted variants), since `weight_mul` there only
/// ever sees [`Weight::One`] and this just flips it to a `Rat` the rest
/// of the crate never reads.
fn negate(e: Edge) -> Edge { scale(e, Weight::int(-1)) }

/// True Shannon cofactors of `edge` on `var`, whether or not `var` is
/// `edge`'s top variable and whatever decomposition `var` uses. A
/// weighted variant's Davio slot holds an arithmetic moment (`f1 - f0`)
/// rather than a boolean one (`f1 ^ f0`) — spec §2/§4.4's moment diagram
/// modules (BMD/PHDD) are positive-Davio-decomposed at every node, with
/// the Davio term carrying a weighted difference, not an XOR.
pub fn cofactor_shannon(m: &mut Manager, edge: Edge, var: Vid) -> Result<(Edge, Edge)> {
  let edge = m.resolve(edge);
  if edge.nid.is_const() || m.var_of(edge.nid) != var {
    return Ok((edge, edge));
  }
  let (s_hi, s_lo) = m.children(edge.nid);
  let s_hi = scale(s_hi, edge.weight);
  let s_lo = scale(s_lo, edge.weight);
  let weighted = m.kind.traits().weighted;
  Ok(match m.registry.decomposition_of(var) {
    Decomposition::Shannon => (s_hi, s_lo),
    Decomposition::PosDavio if weighted => (add(m, s_hi, s_lo)?, s_lo),
    Decomposition::PosDavio => (xor(m, s_hi, s_lo)?, s_lo),
    Decomposition::NegDavio if weighted => (s_hi, add(m, s_hi, s_lo)?),
    Decomposition::NegDavio => (s_hi, xor(m, s_lo, s_hi)?),
  })
}

/// Build the node for `var` whose Shannon cofactors are `(f1, f0)`,
/// converting into `var`'s decomposition's native slots first.
pub(crate) fn assemble(m: &mut Manager, var: Vid, f1: Edge, f0: Edge) -> Result<Edge> {
  let weighted = m.kind.traits().weighted;
  let (hi, lo) = match m.registry.decomposition_of(var) {
    Decomposition::Shannon => (f1, f0),
    Decomposition::PosDavio if weighted => (add(m, f1, negate(f0))?, f0),
    Decomposition::PosDavio => (xor(m, f1, f0)?, f0),
    Decomposition::NegDavio if weighted => (f1, add(m, f0, negate(f1))?),
    Decomposition::NegDavio => (f1, xor(m, f0, f1)?),
  };
  m.mk_node(var, hi, lo)
}

/// Standard if-then-else, the sole primitive every boolean op reduces to
/// (spec §6: "AND/OR/XOR/NOT are ITE specializations").
pub fn ite(m: &mut Manager, f: Edge, g: Edge, h: Edge) -> Result<Edge> {
  ite_rec(m, f, g, h, 0)
}

fn ite_rec(m: &mut Manager, f: Edge, g: Edge, h: Edge, depth: usize) -> Result<Edge> {
  let f = m.resolve(f);
  let g = m.resolve(g);
  let h = m.resolve(h);
  if f.nid == nid::I { return Ok(g); }
  if f.nid == nid::O { return Ok(h); }
  if g == h { return Ok(g); }
  if g.nid == nid::I && h.nid == nid::O { return Ok(f); }
  if g.nid == nid::O && h.nid == nid::I { return Ok(not(f)); }

  // short-circuit takes priority over propagating BHD's "don't know" terminal:
  // only once none of the definite-value identities above apply does landing
  // on `exp` actually mean the result is unresolved.
  if f.nid.is_exp() || g.nid.is_exp() || h.nid.is_exp() { return Ok(m.exp()); }
  if m.kind == crate::manager::VariantKind::Bhd && exceeds_hybrid_budget(m, depth) {
    return Ok(m.exp());
  }

  if let Some(hit) = m.cache.get3(OpTag::Ite, f, g, h) { return Ok(hit); }

  let top = pick_top(m, &[f, g, h]);
  let (f1, f0) = cofactor_shannon(m, f, top)?;
  let (g1, g0) = cofactor_shannon(m, g, top)?;
  let (h1, h0) = cofactor_shannon(m, h, top)?;
  let hi = ite_rec(m, f1, g1, h1, depth + 1)?;
  let lo = ite_rec(m, f0, g0, h0, depth + 1)?;
  let result = assemble(m, top, hi, lo)?;
  m.cache.put3(OpTag::Ite, f, g, h, result);
  Ok(result)
}

/// BHD's approximation knob (Open Question 1, resolved as a node-count
/// estimate rather than wall memory): `Level` caps recursion depth,
/// `Memory` caps total node count, beyond which `ite` substitutes `exp`
/// for the unexplored subproblem instead of continuing to expand it.
fn exceeds_hybrid_budget(m: &Manager, depth: usize) -> bool {
  match m.config.hybrid_heuristic {
    crate::config::HybridHeuristic::Level(max_depth) => depth >= max_depth,
    crate::config::HybridHeuristic::Memory(node_budget) => m.node_count() >= node_budget,
  }
}

fn pick_top(m: &Manager, edges: &[Edge]) -> Vid {
  let mut best: Option<Vid> = None;
  for e in edges {
    let e = m.resolve(*e);
    if e.nid.is_const() { continue; }
    let v = m.var_of(e.nid);
    best = Some(match best { Some(b) => m.topmost(b, v), None => v });
  }
  best.expect("pick_top called with all-constant edges")
}

pub fn not(f: Edge) -> Edge { f.invert() }

pub fn and(m: &mut Manager, f: Edge, g: Edge) -> Result<Edge> { ite(m, f, g, m.zero()) }
pub fn or(m: &mut Manager, f: Edge, g: Edge) -> Result<Edge> { ite(m, f, m.one(), g) }
pub fn xor(m: &mut Manager, f: Edge, g: Edge) -> Result<Edge> { ite(m, f, not(g), g) }

/// A terminal edge's value including its own weight decoration — the
/// quantity that actually matters algebraically, as opposed to
/// `Manager::const_value`'s raw pool lookup.
fn effective_value(m: &Manager, edge: Edge) -> Option<f64> {
  let raw = m.const_value(edge.nid)?;
  let (num, den) = edge.weight.as_ratio();
  Some(raw * num as f64 / den as f64)
}

/// Algebraic sum, used by ADD/MTBDD/BMD/PHDD (spec §6's `add`/`plus`).
pub fn add(m: &mut Manager, f: Edge, g: Edge) -> Result<Edge> {
  let f = m.resolve(f);
  let g = m.resolve(g);
  if let (Some(a), Some(b)) = (effective_value(m, f), effective_value(m, g)) {
    return Ok(m.terminal_const(a + b));
  }
  if let Some(hit) = m.cache.get2(OpTag::Add, f, g) { return Ok(hit); }
  let top = pick_top(m, &[f, g]);
  let (f1, f0) = cofactor_shannon(m, f, top)?;
  let (g1, g0) = cofactor_shannon(m, g, top)?;
  let hi = add(m, f1, g1)?;
  let lo = add(m, f0, g0)?;
  let result = assemble(m, top, hi, lo)?;
  m.cache.put2(OpTag::Add, f, g, result);
  Ok(result)
}

/// Algebraic product, the operation that distinguishes BMD from plain ADD
/// (spec §6's `mul`).
pub fn mul(m: &mut Manager, f: Edge, g: Edge) -> Result<Edge> {
  let f = m.resolve(f);
  let g = m.resolve(g);
  if effective_value(m, f) == Some(0.0) { return Ok(f); }
  if effective_value(m, g) == Some(0.0) { return Ok(g); }
  if let (Some(a), Some(b)) = (effective_value(m, f), effective_value(m, g)) {
    return Ok(m.terminal_const(a * b));
  }
  if let Some(hit) = m.cache.get2(OpTag::Mul, f, g) { return Ok(hit); }
  let top = pick_top(m, &[f, g]);
  let (f1, f0) = cofactor_shannon(m, f, top)?;
  let (g1, g0) = cofactor_shannon(m, g, top)?;
  let hi = mul(m, f1, g1)?;
  let lo = mul(m, f0, g0)?;
  let result = assemble(m, top, hi, lo)?;
  m.cache.put2(OpTag::Mul, f, g, result);
  Ok(result)
}

/// Restrict `var` to a boolean `value` (spec §6's `restrict`).
pub fn restrict(m: &mut Manager, edge: Edge, var: Vid, value: bool) -> Result<Edge> {
  let edge = m.resolve(edge);
  if edge.nid.is_const() { return Ok(edge); }
  let here = m.var_of(edge.nid);
  if m.level_of(here) > m.level_of(var) { return Ok(edge); }
  let (f1, f0) = cofactor_shannon(m, edge, here)?;
  if here == var { return Ok(if value { f1 } else { f0 }); }
  let hi = restrict(m, f1, var, value)?;
  let lo = restrict(m, f0, var, value)?;
  assemble(m, here, hi, lo)
}

/// Substitute `var` with another edge's function (spec §6's `compose`).
pub fn compose(m: &mut Manager, edge: Edge, var: Vid, replacement: Edge) -> Result<Edge> {
  let hi = restrict(m, edge, var, true)?;
  let lo = restrict(m, edge, var, false)?;
  ite(m, replacement, hi, lo)
}

/// Existential quantification: OR of both cofactors (spec §6's `exist`).
/// Boolean-valued variants only — OR has no meaning over a weighted
/// moment diagram's arithmetic terminals.
pub fn exist(m: &mut Manager, edge: Edge, var: Vid) -> Result<Edge> {
  if m.kind.traits().weighted {
    return Err(Error::InvalidArgument(format!("exist is undefined for {:?}", m.kind)));
  }
  let hi = restrict(m, edge, var, true)?;
  let lo = restrict(m, edge, var, false)?;
  or(m, hi, lo)
}

/// Universal quantification: AND of both cofactors (spec §6's `forall`).
/// Boolean-valued variants only, for the same reason as `exist`.
pub fn forall(m: &mut Manager, edge: Edge, var: Vid) -> Result<Edge> {
  if m.kind.traits().weighted {
    return Err(Error::InvalidArgument(format!("forall is undefined for {:?}", m.kind)));
  }
  let hi = restrict(m, edge, var, true)?;
  let lo = restrict(m, edge, var, false)?;
  and(m, hi, lo)
}

/// Rename every occurrence of `from` to `to` (supplemental operation,
/// grounded in `original_source/include/freddy/op/repl.hpp`'s `replace`).
/// `from` and `to` must not already both appear on the same path; this
/// rewrites variable identity only, not level — the caller is expected to
/// have already made room via `reorder` if level order matters.
pub fn replace(m: &mut Manager, edge: Edge, from: Vid, to: Vid) -> Result<Edge> {
  if from == to { return Ok(edge); }
  replace_rec(m, edge, from, to)
}

fn replace_rec(m: &mut Manager, edge: Edge, from: Vid, to: Vid) -> Result<Edge> {
  let edge = m.resolve(edge);
  if edge.nid.is_const() { return Ok(edge); }
  let here = m.var_of(edge.nid);
  let (hi, lo) = m.children(edge.nid);
  let hi = scale(hi, edge.weight);
  let lo = scale(lo, edge.weight);
  let hi = replace_rec(m, hi, from, to)?;
  let lo = replace_rec(m, lo, from, to)?;
  let var = if here == from { to } else { here };
  m.mk_node(var, hi, lo)
}

/// Evaluate under a total boolean assignment; returns `None` for BHD paths
/// that terminate in `exp` ("unknown"), per the decision to treat `exp` as
/// not-evaluable rather than guessing a default. A Davio-decomposed node's
/// `hi` slot holds a *difference* (`f1 ^ f0` or `f0 ^ f1`), not `f1`/`f0`
/// directly, so reading it means combining both children rather than just
/// following the one the assignment selects (mirrors `cofactor_shannon`'s
/// reconstruction).
pub fn eval(m: &Manager, edge: Edge, assignment: &[bool]) -> Option<bool> {
  let edge = m.resolve(edge);
  if edge.nid.is_exp() { return None; }
  if edge.nid == nid::O { return Some(false); }
  if edge.nid == nid::I { return Some(true); }
  let var = m.var_of(edge.nid);
  let bit = *assignment.get(var.ix())?;
  let (hi, lo) = m.children(edge.nid);
  match m.registry.decomposition_of(var) {
    Decomposition::Shannon => eval(m, if bit { hi } else { lo }, assignment),
    Decomposition::PosDavio => {
      let base = eval(m, lo, assignment)?;
      if !bit { return Some(base); }
      Some(base ^ eval(m, hi, assignment)?)
    }
    Decomposition::NegDavio => {
      let base = eval(m, hi, assignment)?;
      if bit { return Some(base); }
      Some(base ^ eval(m, lo, assignment)?)
    }
  }
}

/// Evaluate an algebraic/weighted edge, folding edge weights along the
/// path. BMD/PHDD's `hi` slot is always the arithmetic moment (`f1 - f0`),
/// so reconstructing `f1` means adding the base term back in, same
/// reasoning as `eval`'s Davio handling.
pub fn eval_numeric(m: &Manager, edge: Edge, assignment: &[bool]) -> Option<f64> {
  let edge = m.resolve(edge);
  if let Some(v) = m.const_value(edge.nid) {
    let (num, den) = edge.weight.as_ratio();
    return Some(v * num as f64 / den as f64);
  }
  let var = m.var_of(edge.nid);
  let bit = *assignment.get(var.ix())?;
  let (hi, lo) = m.children(edge.nid);
  let hi = scale(hi, edge.weight);
  let lo = scale(lo, edge.weight);
  match m.registry.decomposition_of(var) {
    Decomposition::Shannon => eval_numeric(m, if bit { hi } else { lo }, assignment),
    Decomposition::PosDavio => {
      let base = eval_numeric(m, lo, assignment)?;
      if !bit { return Some(base); }
      Some(base + eval_numeric(m, hi, assignment)?)
    }
    Decomposition::NegDavio => {
      let base = eval_numeric(m, hi, assignment)?;
      if bit { return Some(base); }
      Some(base + eval_numeric(m, lo, assignment)?)
    }
  }
}

fn reachable(m: &Manager, edge: Edge) -> FxHashSet<Nid> {
  let mut seen = FxHashSet::default();
  let mut stack = vec![m.resolve_nid(edge.nid)];
  while let Some(n) = stack.pop() {
    let key = if n.is_const() { n } else { Nid::node(n.idx()) };
    if !seen.insert(key) { continue; }
    if n.is_node() {
      let (hi, lo) = m.children(n);
      stack.push(m.resolve_nid(hi.nid));
      stack.push(m.resolve_nid(lo.nid));
    }
  }
  seen
}

/// Distinct node count reachable from `edge` (spec §6's `size`).
pub fn size(m: &Manager, edge: Edge) -> usize {
  reachable(m, edge).iter().filter(|n| n.is_node()).count()
}

/// Longest root-to-leaf path length (spec §6's `depth`).
pub fn depth(m: &Manager, edge: Edge) -> usize {
  let edge = m.resolve(edge);
  if edge.nid.is_const() { return 0; }
  let (hi, lo) = m.children(edge.nid);
  1 + depth(m, hi).max(depth(m, lo))
}

/// Number of satisfying paths to the `1` terminal, counting each path once
/// regardless of how many variables it skips (spec §6's `path_count`).
/// Overflows raise [`Error::Overflow`] rather than saturating, per the
/// decision recorded for this crate's counting operations.
pub fn path_count(m: &Manager, edge: Edge) -> Result<u64> {
  fn go(m: &Manager, n: Nid, memo: &mut fxhash::FxHashMap<Nid, u64>) -> Result<u64> {
    let n = m.resolve_nid(n);
    if n == nid::O { return Ok(0); }
    if n == nid::I { return Ok(1); }
    if let Some(&v) = memo.get(&n) { return Ok(v); }
    let (hi, lo) = m.children(n);
    let a = go(m, hi.nid, memo)?;
    let b = go(m, lo.nid, memo)?;
    let total = a.checked_add(b).ok_or(Error::Overflow { op: "path_count" })?;
    memo.insert(n, total);
    Ok(total)
  }
  go(m, edge.nid, &mut fxhash::FxHashMap::default())
}

/// Count of satisfying total assignments over `num_vars` variables (spec
/// §6's `sharpsat`), weighting each path by `2^(skipped variables)`.
pub fn sharpsat(m: &Manager, edge: Edge, num_vars: usize) -> Result<u64> {
  fn go(m: &Manager, n: Nid, level: usize, num_vars: usize, memo: &mut fxhash::FxHashMap<(Nid, usize), u64>) -> Result<u64> {
    let n = m.resolve_nid(n);
    if n == nid::O { return Ok(0); }
    if n == nid::I {
      let skipped = num_vars - level;
      return 2u64.checked_pow(skipped as u32).ok_or(Error::Overflow { op: "sharpsat" });
    }
    let key = (n, level);
    if let Some(&v) = memo.get(&key) { return Ok(v); }
    let here_level = { let v = m.var_of(n); m.level_of(v) };
    let skip_factor = 2u64.checked_pow((here_level - level) as u32).ok_or(Error::Overflow { op: "sharpsat" })?;
    let (hi, lo) = m.children(n);
    let a = go(m, hi.nid, here_level + 1, num_vars, memo)?;
    let b = go(m, lo.nid, here_level + 1, num_vars, memo)?;
    let sub = a.checked_add(b).ok_or(Error::Overflow { op: "sharpsat" })?;
    let total = sub.checked_mul(skip_factor).ok_or(Error::Overflow { op: "sharpsat" })?;
    memo.insert(key, total);
    Ok(total)
  }
  go(m, edge.nid, 0, num_vars, &mut fxhash::FxHashMap::default())
}

/// Whether `edge`'s function is the constant `value` (spec §6's `has_const`).
pub fn has_const(m: &Manager, edge: Edge, value: f64) -> bool {
  let edge = m.resolve(edge);
  edge.nid.is_const() && effective_value(m, edge) == Some(value)
}

/// Whether `var` appears on some path of `edge` (spec §6's `is_essential`).
pub fn is_essential(m: &Manager, edge: Edge, var: Vid) -> bool {
  reachable(m, edge).into_iter().any(|n| n.is_node() && m.var_of(n) == var)
}

/// One root-to-terminal path (spec §6's `sat`): a partial assignment (`None`
/// for a variable the path never branches on) and whether the path reaches
/// a definite `1` or the BHD `exp` terminal. An `exp` path is reported as
/// *symbolic* rather than dropped — under an unexplored subproblem,
/// satisfiability there is unknown, not false.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
  pub assignment: Vec<Option<bool>>,
  pub symbolic: bool,
}

/// Enumerate every satisfying path of `edge` over `num_vars` variables,
/// boolean-valued variants only. Grounded in the same root-to-leaf walk
/// `reachable`/`is_essential` use, kept separate since a solution needs the
/// assignment built up along the way rather than just the set of nodes seen.
pub fn sat(m: &Manager, edge: Edge, num_vars: usize) -> Vec<Solution> {
  let mut out = Vec::new();
  let mut path = vec![None; num_vars];
  sat_rec(m, m.resolve(edge), &mut path, &mut out);
  out
}

fn sat_rec(m: &Manager, edge: Edge, path: &mut Vec<Option<bool>>, out: &mut Vec<Solution>) {
  let edge = m.resolve(edge);
  if edge.nid == nid::O { return; }
  if edge.nid == nid::I {
    out.push(Solution { assignment: path.clone(), symbolic: false });
    return;
  }
  if edge.nid.is_exp() {
    out.push(Solution { assignment: path.clone(), symbolic: true });
    return;
  }
  let var = m.var_of(edge.nid);
  let (hi, lo) = m.children(edge.nid);
  path[var.ix()] = Some(true);
  sat_rec(m, hi, path, out);
  path[var.ix()] = Some(false);
  sat_rec(m, lo, path, out);
  path[var.ix()] = None;
}

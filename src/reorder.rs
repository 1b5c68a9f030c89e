//! Dynamic variable reordering (spec §4.6, component C7): the adjacent-level
//! `swap` primitive and a sifting driver built on top of it, grounded in the
//! teacher's `swap.rs` (`XVHLScaffold::sift`) — rebuilt around this crate's
//! decoupled `Vid`/level scheme so a swap only ever touches two levels'
//! worth of nodes instead of renumbering packed handles.

use crate::apply::cofactor_shannon;
use crate::error::Result;
use crate::manager::Manager;
use crate::node::Edge;
use crate::vid::{Decomposition, Vid};

#[cfg(feature = "dtl-sifting")]
use crate::manager::VariantKind;

/// Rebuild every node branching on the variables at `level` and `level + 1`
/// so those two variables trade places, preserving every function any root
/// currently represents (spec §4.6's swap invariant) *and* the identity of
/// every existing handle to one of those nodes: each rebuilt node reuses
/// its own arena slot rather than allocating a fresh one, so a `Nid` a
/// caller already holds (like a facade root) still addresses the same
/// slot and, in the common case, is still the unique table's canonical
/// address for its function afterward (spec §3's canonicity). The rarer
/// case — the rebuilt content reduces away or collides with a different
/// pre-existing node, so the slot can't be its own canonical address
/// anymore — forwards through `NodeStore::resolve` instead; every read
/// path (`Manager::var_of`/`children`, `apply`'s recursion) resolves
/// before inspecting a node, so this is functionally transparent even
/// where it isn't bit-identical. Swap never runs GC itself — a caller
/// wanting superseded slots reclaimed calls `maybe_collect` explicitly.
pub fn swap(m: &mut Manager, level: usize) -> Result<()> {
  let upper = m.at_level(level);
  let lower = m.at_level(level + 1);
  let lower_decomp = m.registry.decomposition_of(lower);
  let traits = m.kind.traits();

  let upper_nodes = m.nids_for_var(upper);
  let mut rebuilt = Vec::with_capacity(upper_nodes.len());
  for nid in upper_nodes {
    let edge = Edge::unweighted(nid);
    let (f1, f0) = cofactor_shannon(m, edge, upper)?;
    let (f11, f10) = cofactor_shannon(m, f1, lower)?;
    let (f01, f00) = cofactor_shannon(m, f0, lower)?;
    rebuilt.push((nid.node_idx() as u32, f11, f10, f01, f00));
  }

  m.registry.swap_levels(level, level + 1)?;

  for (idx, f11, f10, f01, f00) in rebuilt {
    let new_hi = m.mk_node(upper, f11, f01)?;
    let new_lo = m.mk_node(upper, f10, f00)?;
    m.reuse_or_redirect(idx, lower, lower_decomp, traits, new_hi, new_lo)?;
  }

  m.cache.clear();
  Ok(())
}

/// Move the variable currently at `from` to `to` one adjacent swap at a
/// time.
pub fn move_to(m: &mut Manager, from: usize, to: usize) -> Result<()> {
  if from < to {
    for level in from..to { swap(m, level)?; }
  } else {
    for level in (to..from).rev() { swap(m, level)?; }
  }
  Ok(())
}

/// Re-encode `cofactors` (each a true Shannon `(f1, f0)` pair for some node
/// that branches on `var`) into whatever decomposition `var` is currently
/// set to. Like `swap`, this only ever adds the re-decomposed nodes; the
/// ones it supersedes are left for an explicit `maybe_collect` to reclaim.
#[cfg(feature = "dtl-sifting")]
fn assemble_all(m: &mut Manager, var: Vid, cofactors: &[(Edge, Edge)]) -> Result<()> {
  for &(f1, f0) in cofactors {
    crate::apply::assemble(m, var, f1, f0)?;
  }
  Ok(())
}

/// DTL sifting (spec §4.6: "KFDD additionally tries all three decomposition
/// tags at each tentative level"). Only meaningful for KFDD managers.
///
/// The Shannon cofactor pair for every node currently branching on `var` is
/// computed once, while `var`'s decomposition is still whatever built those
/// nodes (`cofactor_shannon` only knows how to interpret a node's stored
/// slots under the variable's *current* tag, so this must happen before the
/// tag changes). Each alternate tag is then tried by re-`assemble`-ing that
/// same set of cofactor pairs and counting how many new nodes it took;
/// `nids_for_var` only ever grows across these probes (nothing here
/// deletes), so the fewest-nodes-*added* tag is the best available signal
/// for which encoding is most compact, short of a sweep between every
/// probe. The registry is left set to whichever tag (including the
/// original) needed the least new structure.
#[cfg(feature = "dtl-sifting")]
fn dtl_try_decompositions(m: &mut Manager, var: Vid) -> Result<()> {
  if m.kind != VariantKind::Kfdd { return Ok(()); }
  const TAGS: [Decomposition; 3] = [Decomposition::Shannon, Decomposition::PosDavio, Decomposition::NegDavio];
  let original = m.registry.decomposition_of(var);

  let mut cofactors = Vec::new();
  for nid in m.nids_for_var(var) {
    cofactors.push(cofactor_shannon(m, Edge::unweighted(nid), var)?);
  }
  if cofactors.is_empty() { return Ok(()); }

  // the original tag costs nothing to "try" — it's already built — so it's
  // the baseline every alternate must beat, not just beat each other.
  let mut best = original;
  let mut best_growth = 0usize;
  for &tag in &TAGS {
    if tag == original { continue; }
    m.registry.change_decomposition(var, tag);
    let before = m.nids_for_var(var).len();
    assemble_all(m, var, &cofactors)?;
    let growth = m.nids_for_var(var).len() - before;
    if growth < best_growth {
      best_growth = growth;
      best = tag;
    }
  }
  m.registry.change_decomposition(var, best);
  if best != original {
    assemble_all(m, var, &cofactors)?;
  }
  Ok(())
}

/// Sifting (spec §4.6): for each variable in turn, try every level it could
/// occupy and keep whichever position minimized total node count, bailing
/// out of a probe early if growth exceeds `ManagerConfig::max_node_growth`.
pub fn sift(m: &mut Manager) -> Result<()> {
  let n = m.num_levels();
  if n < 2 { return Ok(()); }
  let max_growth = m.config_max_node_growth();

  for var_rank in 0..n {
    let var = nth_variable_by_original_rank(m, var_rank);
    #[cfg(feature = "dtl-sifting")]
    dtl_try_decompositions(m, var)?;
    let start = m.level_of(var);
    let baseline = m.live_node_count();
    let growth_cap = ((baseline as f64) * max_growth) as usize;

    let mut best_level = start;
    let mut best_count = baseline;

    // sift to the top, recording the best level seen.
    let mut level = start;
    while level > 0 {
      swap(m, level - 1)?;
      level -= 1;
      let count = m.live_node_count();
      if count > growth_cap.max(1) { break; }
      if count < best_count { best_count = count; best_level = level; }
    }
    move_to(m, level, start)?;

    // sift to the bottom, recording the best level seen.
    let mut level = start;
    while level + 1 < n {
      swap(m, level)?;
      level += 1;
      let count = m.live_node_count();
      if count > growth_cap.max(1) { break; }
      if count < best_count { best_count = count; best_level = level; }
    }
    move_to(m, level, best_level)?;
  }
  Ok(())
}

fn nth_variable_by_original_rank(m: &Manager, rank: usize) -> Vid {
  // sifting visits variables in id order, not current level order, so a
  // variable already moved by an earlier pass isn't skipped or re-visited.
  m.var_by_id(rank)
}

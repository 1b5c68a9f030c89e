//! Variable identifiers.
//!
//! Unlike the teacher's `vid::VID`, a [`Vid`] here is *only* a stable
//! identity assigned at `new_variable` time — it never doubles as a position
//! in the order. Position ("level") lives in [`crate::variable::Registry`]
//! and changes under `swap`/`reorder`; see spec §3's id/level split. Keeping
//! level out of the identifier is what lets [`crate::nid::Nid`] stay valid
//! across a reorder, which the teacher's embed-the-variable-in-the-handle
//! scheme could not do without rewriting every affected handle.

use std::fmt;

/// Stable identifier for a variable, assigned once at creation and never
/// reused or renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vid(pub u32);

impl Vid {
  #[inline] pub fn ix(self) -> usize { self.0 as usize }
}

impl fmt::Display for Vid {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "x{}", self.0) }
}

/// Per-variable choice of local decomposition (KFDD only; spec §3/§4.4).
/// Non-KFDD variants fix every variable at [`Decomposition::Shannon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decomposition { Shannon, PosDavio, NegDavio }

impl Default for Decomposition {
  fn default() -> Self { Decomposition::Shannon }
}

impl fmt::Display for Decomposition {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(match self {
      Decomposition::Shannon => "S",
      Decomposition::PosDavio => "pD",
      Decomposition::NegDavio => "nD",
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn vid_identity_is_stable() {
    let a = Vid(0); let b = Vid(0);
    assert_eq!(a, b);
    assert_ne!(Vid(0), Vid(1));
  }

  #[test] fn decomposition_default_is_shannon() {
    assert_eq!(Decomposition::default(), Decomposition::Shannon);
  }
}

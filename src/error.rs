//! Error model for the core.
//!
//! No error-handling crate is pulled in here, on purpose: every operation
//! either completes or raises one of these three kinds (see spec §7), and a
//! small hand-rolled enum is all that's needed to carry that.

use std::fmt;

/// The three error kinds recognised by the core (spec §7).
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
  /// Arithmetic overflow in weighted-variant arithmetic, or in a counting
  /// operation (`path_count`, `sharpsat`) whose result no longer fits.
  Overflow { op: &'static str },
  /// Eagerly-raised argument error: non-adjacent swap, wrong-length
  /// assignment, a foreign manager's edge, `change_decomposition` on a
  /// non-KFDD manager, etc. No mutation has happened when this is returned.
  InvalidArgument(String),
  /// Unique-table or cache allocation failure. The manager remains
  /// consistent; the failed operation's result is unspecified.
  ResourceExhausted(&'static str),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Error::Overflow { op } => write!(f, "arithmetic overflow in `{op}`"),
      Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
      Error::ResourceExhausted(what) => write!(f, "resource exhausted: {what}"),
    }
  }
}

impl std::error::Error for Error {}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;

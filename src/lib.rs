//! A shared, canonical core for multi-variant decision diagrams: one
//! hash-consed node store, one computed cache, and one apply/reorder
//! engine parameterized over seven diagram families (BDD, ADD, MTBDD, BMD,
//! PHDD, KFDD, BHD).
//!
//! [`variant`] is the entry point: each variant is a thin facade over a
//! private [`manager::Manager`]. Everything else in this crate is the
//! shared machinery those facades dispatch into.

#![allow(clippy::many_single_char_names)]

#[macro_use] extern crate log;

pub mod error;
pub mod config;
pub mod vid;
pub mod nid;
pub mod weight;
pub mod terminal;
pub mod variable;
pub mod node;
pub mod cache;
pub mod gc;
pub mod manager;
pub mod apply;
pub mod reorder;
pub mod variant;

pub use config::ManagerConfig;
pub use error::{Error, Result};
pub use manager::{Manager, VariantKind};
pub use variant::{Add, Bdd, Bhd, Bmd, Kfdd, Mtbdd, Phdd};
pub use vid::{Decomposition, Vid};

#[cfg(test)]
mod integration_tests {
  use super::*;

  #[test] fn shared_subfunctions_are_physically_shared_across_roots() {
    let mut bdd = Bdd::new(ManagerConfig::default());
    let x = bdd.var("x");
    let f = bdd.mk_node(x, bdd.one(), bdd.zero()).unwrap();
    let g = bdd.or(f, f).unwrap();
    assert_eq!(f, g);
    assert_eq!(bdd.node_count(), 1);
  }

  #[test] fn apply_result_is_reduced_and_canonical() {
    let mut bdd = Bdd::new(ManagerConfig::default());
    let x = bdd.var("x");
    let y = bdd.var("y");
    let fx = bdd.mk_node(x, bdd.one(), bdd.zero()).unwrap();
    let fy = bdd.mk_node(y, bdd.one(), bdd.zero()).unwrap();
    let same_var_twice = bdd.and(fx, fx).unwrap();
    assert_eq!(same_var_twice, fx);
    let _ = fy;
  }

  #[test] fn reorder_is_transparent_to_callers() {
    let mut bdd = Bdd::new(ManagerConfig::default());
    let x = bdd.var("x");
    let y = bdd.var("y");
    let fx = bdd.mk_node(x, bdd.one(), bdd.zero()).unwrap();
    let fy = bdd.mk_node(y, bdd.one(), bdd.zero()).unwrap();
    let f = bdd.or(fx, fy).unwrap();
    let before = [
      bdd.eval(f, &[false, false]),
      bdd.eval(f, &[true, false]),
      bdd.eval(f, &[false, true]),
      bdd.eval(f, &[true, true]),
    ];
    bdd.sift().unwrap();
    let after = [
      bdd.eval(f, &[false, false]),
      bdd.eval(f, &[true, false]),
      bdd.eval(f, &[false, true]),
      bdd.eval(f, &[true, true]),
    ];
    assert_eq!(before, after);
  }

  #[test] fn bmd_weight_canonicalization_round_trips_through_mul() {
    let mut bmd = Bmd::new(ManagerConfig::default());
    let a = bmd.constant(6.0);
    let b = bmd.constant(7.0);
    let c = bmd.mul(a, b).unwrap();
    assert!(bmd.has_const(c, 42.0));
  }

  #[test] fn replace_then_replace_back_is_identity_on_evaluation() {
    let mut bdd = Bdd::new(ManagerConfig::default());
    let x = bdd.var("x");
    let y = bdd.var("y");
    let f = bdd.mk_node(x, bdd.one(), bdd.zero()).unwrap();
    let g = bdd.replace(f, x, y).unwrap();
    let h = bdd.replace(g, y, x).unwrap();
    assert_eq!(f, h);
  }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The satisfiability seam of the wend verifier.
//!
//! The evaluation core talks to a constraint solver only through the
//! [`Solver`] trait: one shot, stateless queries over boolean expressions,
//! answered with [`SatResult`]. Real deployments plug in an external SMT
//! solver; [`BruteForceSolver`] is a bounded reference implementation used by
//! tests and demos.

#![deny(unused_must_use)]
#![deny(unreachable_patterns)]

pub mod brute;
pub mod errors;
pub mod ground;
pub mod model;
pub mod solver;

pub use brute::BruteForceSolver;
pub use errors::{Error, ErrorKind, Result};
pub use model::Model;
pub use solver::{SatResult, Solver};

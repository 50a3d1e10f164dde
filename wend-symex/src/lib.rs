// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Symbolic expression evaluation for the wend verifier.
//!
//! Evaluating an expression against a variable scope, a finite memory and an
//! accumulated path condition yields the *complete set* of possible outcomes:
//! one derivation record per admissible resolution of every symbolic address
//! involved. Undefined variables and out-of-bounds addresses are ordinary,
//! representable outcomes; only contract violations and resource limits abort
//! a call (see [`errors::EvaluationError`]).

#![deny(unused_must_use)]
#![deny(unreachable_patterns)]

pub mod application;
pub mod config;
pub mod errors;
pub mod eval;
pub mod resolve;
pub mod state;

pub use application::{
    AddressApplication, Application, ArithApplication, BoolApplication, Failure, Operand, Premise,
};
pub use errors::{EvaluationError, EvaluationResult};
pub use eval::{evaluate_address, evaluate_arithmetic, evaluate_boolean, Evaluate, Evaluator};
pub use resolve::ResolvedAddress;
pub use state::{Memory, MemoryArray, Scope, VarScope};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use wend_vir::BoolExpr;

use crate::errors::Result;
use crate::model::Model;

/// The outcome of a single satisfiability query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SatResult {
    /// The constraint is satisfiable; the model assigns every free symbol.
    Sat(Model),
    Unsat,
    /// The solver gave up. Callers must treat this as a hard failure: an
    /// address enumeration built on top of an inconclusive answer is unsound.
    Unknown,
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SatResult::Unsat)
    }
}

/// A satisfiability solver over boolean expressions.
///
/// Every call is a fresh query: the solver keeps no state across calls, and
/// callers conjoin their own blocking clauses into `constraint` when
/// enumerating models.
pub trait Solver {
    fn solve(&self, constraint: &BoolExpr) -> Result<SatResult>;
}

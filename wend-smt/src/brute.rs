// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A bounded brute-force reference solver.
//!
//! Enumerates assignments of all free symbols over `[-bound, bound]` and
//! returns the first one that satisfies the constraint. Complete only for
//! constraints whose relevant values fall inside the bound; meant for tests
//! and demos, not production verification.

use itertools::Itertools;
use log::{debug, trace};
use num_bigint::BigInt;
use wend_vir::BoolExpr;

use crate::errors::Result;
use crate::ground;
use crate::model::Model;
use crate::solver::{SatResult, Solver};

pub struct BruteForceSolver {
    bound: i64,
}

impl BruteForceSolver {
    pub fn new(bound: i64) -> Self {
        BruteForceSolver { bound }
    }
}

impl Solver for BruteForceSolver {
    fn solve(&self, constraint: &BoolExpr) -> Result<SatResult> {
        trace!("[enter] solve {}", constraint);
        let symbols: Vec<String> = constraint.symbols().into_iter().collect();
        if symbols.is_empty() {
            let holds = ground::eval_bool(constraint, &Model::new())?;
            trace!("[exit] solve: closed constraint is {}", holds);
            return Ok(if holds {
                SatResult::Sat(Model::new())
            } else {
                SatResult::Unsat
            });
        }

        let domain: Vec<BigInt> = (-self.bound..=self.bound).map(BigInt::from).collect();
        for values in symbols
            .iter()
            .map(|_| domain.iter())
            .multi_cartesian_product()
        {
            let candidate: Model = symbols
                .iter()
                .cloned()
                .zip(values.into_iter().cloned())
                .collect();
            if ground::eval_bool(constraint, &candidate)? {
                debug!("model found for {}: {:?}", constraint, candidate);
                trace!("[exit] solve: sat");
                return Ok(SatResult::Sat(candidate));
            }
        }
        trace!("[exit] solve: unsat within bound {}", self.bound);
        Ok(SatResult::Unsat)
    }
}

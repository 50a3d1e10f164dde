// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Symbolic address resolution.
//!
//! A non-literal address is resolved by model enumeration: a fresh symbol is
//! constrained equal to the target expression under the path condition, and
//! the solver is queried repeatedly, excluding every model already found with
//! a blocking clause, until it reports unsatisfiable. Each admissible value
//! is then classified against the memory bound.

use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use wend_smt::{ErrorKind, SatResult, Solver};
use wend_vir::{ArithExpr, BoolExpr};

use crate::errors::{EvaluationError, EvaluationResult};

/// A concrete address admitted by the path condition, classified against the
/// memory bound `[0, size)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedAddress {
    InBounds(usize),
    OutOfBounds(BigInt),
}

pub fn classify(address: BigInt, size: usize) -> ResolvedAddress {
    match address.to_usize() {
        Some(value) if value < size => ResolvedAddress::InBounds(value),
        _ => ResolvedAddress::OutOfBounds(address),
    }
}

/// Enumerate every integer `a` such that `path && (fresh == target)` is
/// satisfiable with `fresh == a`, up to `cap` models.
///
/// Termination relies on the blocking clauses: each found value is excluded
/// before the solver is asked again, so the loop either exhausts the solution
/// set (`Unsat`) or hits the cap, which is fatal because acting on a partial
/// address set would be unsound.
pub fn enumerate_addresses(
    solver: &dyn Solver,
    target: &ArithExpr,
    path: &BoolExpr,
    size: usize,
    fresh: &str,
    cap: usize,
) -> EvaluationResult<Vec<ResolvedAddress>> {
    trace!("[enter] enumerate_addresses {} = {}", fresh, target);
    let fresh_symbol = ArithExpr::symbol(fresh);
    let mut constraint = BoolExpr::and(
        path.clone(),
        BoolExpr::eq(fresh_symbol.clone(), target.clone()),
    );
    let mut resolved = Vec::new();
    loop {
        match solver.solve(&constraint)? {
            SatResult::Sat(model) => {
                let value = match model.value(fresh) {
                    Some(value) => value.clone(),
                    None => {
                        let error = wend_smt::Error::from(ErrorKind::MalformedConstraint(
                            format!("model does not assign '{}'", fresh),
                        ));
                        return Err(error.into());
                    }
                };
                if resolved.len() >= cap {
                    return Err(EvaluationError::EnumerationLimit {
                        cap,
                        constraint: constraint.to_string(),
                    });
                }
                debug!("admissible address {} for {}", value, target);
                constraint = BoolExpr::and(
                    constraint,
                    BoolExpr::not_equals(fresh_symbol.clone(), ArithExpr::Const(value.clone())),
                );
                resolved.push(classify(value, size));
            }
            SatResult::Unsat => break,
            SatResult::Unknown => {
                return Err(EvaluationError::SolverInconclusive(constraint.to_string()));
            }
        }
    }
    trace!(
        "[exit] enumerate_addresses {}: {} addresses",
        target,
        resolved.len()
    );
    Ok(resolved)
}

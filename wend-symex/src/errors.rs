// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fatal evaluation defects.
//!
//! Unlike the representable failures threaded through derivation records,
//! these abort the whole evaluation call: they indicate a contract violation
//! by the caller or an exhausted resource limit, not a property of the
//! program under analysis.

use std::fmt;

#[derive(Debug)]
pub enum EvaluationError {
    /// A node of the specification-only family reached the evaluator.
    SpecOnlyExpression(String),
    /// A literal division or remainder by zero during constant folding.
    DivisionByZero(String),
    /// The solver rejected a constraint or failed outright.
    Solver(wend_smt::Error),
    /// The solver answered `Unknown`; a half-enumerated address set is
    /// unsound to use partially.
    SolverInconclusive(String),
    /// The address resolver hit the model enumeration cap.
    EnumerationLimit { cap: usize, constraint: String },
    /// The evaluation produced more derivation records than allowed.
    OutcomeLimit { cap: usize },
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvaluationError::SpecOnlyExpression(node) => {
                write!(f, "cannot evaluate specification-only expression {}", node)
            }
            EvaluationError::DivisionByZero(node) => {
                write!(f, "division by zero while folding {}", node)
            }
            EvaluationError::Solver(error) => write!(f, "solver failure: {}", error),
            EvaluationError::SolverInconclusive(constraint) => {
                write!(f, "solver was inconclusive on {}", constraint)
            }
            EvaluationError::EnumerationLimit { cap, constraint } => {
                write!(
                    f,
                    "more than {} admissible addresses for {}",
                    cap, constraint
                )
            }
            EvaluationError::OutcomeLimit { cap } => {
                write!(f, "evaluation exceeded the cap of {} derivation records", cap)
            }
        }
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvaluationError::Solver(error) => Some(error),
            _ => None,
        }
    }
}

impl From<wend_smt::Error> for EvaluationError {
    fn from(error: wend_smt::Error) -> Self {
        EvaluationError::Solver(error)
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Derivation records.
//!
//! Evaluating one expression node produces a list of [`Application`]s, each
//! describing one way the node can turn out: a successful result together
//! with the child derivations that produced it, or a failure with a tagged
//! reason. The record tree mirrors the expression tree; ownership runs parent
//! to child only, so the structure is acyclic and freely shareable.

use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use wend_vir::{AddrExpr, ArithExpr, BoolExpr};

/// The outcome of evaluating one node of type `N` to a result of type `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Application<N, T> {
    Success {
        node: N,
        /// Successful child derivations, in canonical left-to-right order.
        premises: Vec<Premise>,
        result: T,
    },
    Failure {
        node: N,
        error: Failure,
    },
}

/// An address evaluation: successful results are in-bounds by construction.
pub type AddressApplication = Application<AddrExpr, usize>;
/// An arithmetic evaluation: the result is an expression in
/// normal-or-partial form.
pub type ArithApplication = Application<ArithExpr, ArithExpr>;
/// A boolean evaluation: the result is an expression in normal-or-partial
/// form.
pub type BoolApplication = Application<BoolExpr, BoolExpr>;

/// A child derivation record with its sort erased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Premise {
    Address(AddressApplication),
    Arithmetic(ArithApplication),
    Boolean(BoolApplication),
}

/// Which operand position of a node a nested failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Left,
    Right,
    Inner,
    Base,
    Index,
    Address,
}

/// A representable evaluation failure. Failures are data: they never abort
/// the evaluation of sibling outcome combinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Failure {
    UndefinedVariable(String),
    OutOfBoundsDeRef {
        address: BigInt,
        size: usize,
    },
    OutOfBoundsArrayAccess {
        address: BigInt,
        size: usize,
    },
    /// A child derivation failed; `tag` names the operand position.
    Operand {
        tag: Operand,
        premise: Box<Premise>,
    },
}

impl<N, T> Application<N, T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Application::Success { .. })
    }

    pub fn node(&self) -> &N {
        match self {
            Application::Success { node, .. } => node,
            Application::Failure { node, .. } => node,
        }
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Application::Success { result, .. } => Some(result),
            Application::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&Failure> {
        match self {
            Application::Success { .. } => None,
            Application::Failure { error, .. } => Some(error),
        }
    }

    pub fn premises(&self) -> &[Premise] {
        match self {
            Application::Success { premises, .. } => premises,
            Application::Failure { .. } => &[],
        }
    }
}

impl Premise {
    pub fn is_success(&self) -> bool {
        match self {
            Premise::Address(application) => application.is_success(),
            Premise::Arithmetic(application) => application.is_success(),
            Premise::Boolean(application) => application.is_success(),
        }
    }

    pub fn error(&self) -> Option<&Failure> {
        match self {
            Premise::Address(application) => application.error(),
            Premise::Arithmetic(application) => application.error(),
            Premise::Boolean(application) => application.error(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Left => write!(f, "left operand"),
            Operand::Right => write!(f, "right operand"),
            Operand::Inner => write!(f, "operand"),
            Operand::Base => write!(f, "base operand"),
            Operand::Index => write!(f, "index operand"),
            Operand::Address => write!(f, "address operand"),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Failure::UndefinedVariable(name) => {
                write!(f, "variable '{}' is not defined", name)
            }
            Failure::OutOfBoundsDeRef { address, size } => {
                write!(f, "dereference of address {} outside [0, {})", address, size)
            }
            Failure::OutOfBoundsArrayAccess { address, size } => {
                write!(
                    f,
                    "array access at address {} outside [0, {})",
                    address, size
                )
            }
            Failure::Operand { tag, premise } => match premise.error() {
                Some(error) => write!(f, "{} failed: {}", tag, error),
                None => write!(f, "{} failed", tag),
            },
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for Application<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Application::Success { node, result, .. } => write!(f, "{} => {}", node, result),
            Application::Failure { node, error } => write!(f, "{} => error: {}", node, error),
        }
    }
}

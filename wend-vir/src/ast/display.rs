// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stable, parenthesized infix rendering of expressions.
//!
//! The notation is consumed by diagnostics and by tests; it is not meant to be
//! re-parsed.

use std::fmt;

use super::expr::*;

impl fmt::Display for AddrExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddrExpr::Variable(name) => write!(f, "{}", name),
            AddrExpr::DeRef(inner) => write!(f, "*({})", inner),
            AddrExpr::ArrayAccess { base, index } => write!(f, "({})[{}]", base, index),
        }
    }
}

impl fmt::Display for ArithOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArithOpKind::Add => write!(f, "+"),
            ArithOpKind::Sub => write!(f, "-"),
            ArithOpKind::Mul => write!(f, "*"),
            ArithOpKind::Div => write!(f, "\\"),
            ArithOpKind::Rem => write!(f, "%"),
        }
    }
}

impl fmt::Display for ArithExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArithExpr::Const(value) => write!(f, "{}", value),
            ArithExpr::Symbol(name) => write!(f, "{}", name),
            ArithExpr::BinOp { kind, left, right } => {
                write!(f, "({}) {} ({})", left, kind, right)
            }
            ArithExpr::Minus(inner) => write!(f, "-({})", inner),
            ArithExpr::ValAtAddr(address) => write!(f, "[{}]", address),
            ArithExpr::AddrOf(variable) => write!(f, "&{}", variable),
            ArithExpr::Select { array, index } => write!(f, "{}[{}]", array, index),
        }
    }
}

impl fmt::Display for CmpOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // The chain depth does not show up in the rendering.
            CmpOpKind::Eq { .. } => write!(f, "=="),
            CmpOpKind::Gt => write!(f, ">"),
            CmpOpKind::Gte => write!(f, ">="),
            CmpOpKind::Lt => write!(f, "<"),
            CmpOpKind::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for BoolOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoolOpKind::And => write!(f, "&&"),
            BoolOpKind::Or => write!(f, "||"),
            BoolOpKind::Implies => write!(f, "==>"),
            BoolOpKind::Equiv => write!(f, "<==>"),
        }
    }
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoolExpr::True => write!(f, "true"),
            BoolExpr::False => write!(f, "false"),
            BoolExpr::Cmp { kind, left, right } => {
                write!(f, "({}) {} ({})", left, kind, right)
            }
            BoolExpr::BinOp { kind, left, right } => {
                write!(f, "({}) {} ({})", left, kind, right)
            }
            BoolExpr::Not(inner) => write!(f, "!({})", inner),
            BoolExpr::Forall { variable, body } => {
                write!(f, "forall {} :: {}", variable, body)
            }
        }
    }
}

impl fmt::Display for ArrayExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArrayExpr::AnyArray => write!(f, "anyArray"),
            ArrayExpr::Store {
                array,
                index,
                value,
            } => write!(f, "{}[{} := {}]", array, index, value),
        }
    }
}

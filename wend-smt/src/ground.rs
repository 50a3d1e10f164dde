// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ground evaluation of constraints under a complete model.
//!
//! Constraints handed to a solver must be closed formulas over symbols,
//! literals, comparisons and connectives. Memory reads, address nodes and the
//! specification-only family have no meaning here and are rejected.

use num_bigint::BigInt;
use num_traits::Zero;
use wend_vir::{ArithExpr, ArithOpKind, BoolExpr, BoolOpKind, CmpOpKind};

use crate::errors::{ErrorKind, Result};
use crate::model::Model;

pub fn eval_bool(expr: &BoolExpr, model: &Model) -> Result<bool> {
    match expr {
        BoolExpr::True => Ok(true),
        BoolExpr::False => Ok(false),
        BoolExpr::Cmp { kind, left, right } => {
            let left = eval_arith(left, model)?;
            let right = eval_arith(right, model)?;
            Ok(match kind {
                CmpOpKind::Eq { .. } => left == right,
                CmpOpKind::Gt => left > right,
                CmpOpKind::Gte => left >= right,
                CmpOpKind::Lt => left < right,
                CmpOpKind::Lte => left <= right,
            })
        }
        BoolExpr::BinOp { kind, left, right } => {
            let left = eval_bool(left, model)?;
            let right = eval_bool(right, model)?;
            Ok(match kind {
                BoolOpKind::And => left && right,
                BoolOpKind::Or => left || right,
                BoolOpKind::Implies => !left || right,
                BoolOpKind::Equiv => left == right,
            })
        }
        BoolExpr::Not(inner) => Ok(!eval_bool(inner, model)?),
        BoolExpr::Forall { .. } => Err(ErrorKind::MalformedConstraint(format!(
            "quantifier in ground constraint: {}",
            expr
        ))
        .into()),
    }
}

pub fn eval_arith(expr: &ArithExpr, model: &Model) -> Result<BigInt> {
    match expr {
        ArithExpr::Const(value) => Ok(value.clone()),
        ArithExpr::Symbol(name) => match model.value(name) {
            Some(value) => Ok(value.clone()),
            None => Err(ErrorKind::MalformedConstraint(format!(
                "symbol '{}' has no assignment",
                name
            ))
            .into()),
        },
        ArithExpr::BinOp { kind, left, right } => {
            let left = eval_arith(left, model)?;
            let right = eval_arith(right, model)?;
            match kind {
                ArithOpKind::Add => Ok(left + right),
                ArithOpKind::Sub => Ok(left - right),
                ArithOpKind::Mul => Ok(left * right),
                ArithOpKind::Div | ArithOpKind::Rem => {
                    if right.is_zero() {
                        return Err(ErrorKind::MalformedConstraint(format!(
                            "division by zero in constraint: {}",
                            expr
                        ))
                        .into());
                    }
                    // Truncation toward zero, matching machine semantics.
                    if matches!(kind, ArithOpKind::Div) {
                        Ok(left / right)
                    } else {
                        Ok(left % right)
                    }
                }
            }
        }
        ArithExpr::Minus(inner) => Ok(-eval_arith(inner, model)?),
        ArithExpr::ValAtAddr(_) | ArithExpr::AddrOf(_) | ArithExpr::Select { .. } => {
            Err(ErrorKind::MalformedConstraint(format!(
                "non-ground node in constraint: {}",
                expr
            ))
            .into())
        }
    }
}

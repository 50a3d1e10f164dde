// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The core evaluation judgment.
//!
//! Evaluation is a structural recursion producing one derivation record per
//! possible outcome. A node with k children combines their outcome lists by
//! full cross product: a combination is successful only if every child in it
//! is, otherwise it fails wrapping the first failing child (left-to-right).
//! Sibling combinations are always still explored; there is no
//! short-circuiting, even for boolean connectives whose truth value is
//! already determined by one side.
//!
//! Constant folding happens on the fly: when every operand of an arithmetic
//! or boolean node reduces to a literal, the node folds to a literal using
//! exact arbitrary-precision arithmetic; otherwise the result is the same
//! operator over the reduced children (partial evaluation).

use itertools::iproduct;
use log::trace;
use num_bigint::BigInt;
use num_traits::Zero;
use wend_smt::Solver;
use wend_vir::{AddrExpr, ArithExpr, ArithOpKind, BoolExpr, BoolOpKind, CmpOpKind};

use crate::application::{
    AddressApplication, Application, ArithApplication, BoolApplication, Failure, Operand, Premise,
};
use crate::config;
use crate::errors::{EvaluationError, EvaluationResult};
use crate::resolve::{self, ResolvedAddress};
use crate::state::{Memory, Scope};

/// Evaluates expressions against one scope, memory and solver.
///
/// The borrowed collaborators are read-only for the lifetime of the
/// evaluator; the evaluator itself tracks the derivation-record budget and
/// the fresh-symbol counter across nested calls.
pub struct Evaluator<'a> {
    scope: &'a dyn Scope,
    memory: &'a dyn Memory,
    solver: &'a dyn Solver,
    outcome_cap: usize,
    model_cap: usize,
    produced: usize,
    fresh_counter: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(scope: &'a dyn Scope, memory: &'a dyn Memory, solver: &'a dyn Solver) -> Self {
        Evaluator {
            scope,
            memory,
            solver,
            outcome_cap: config::outcome_cap(),
            model_cap: config::solver_model_cap(),
            produced: 0,
            fresh_counter: 0,
        }
    }

    #[must_use]
    pub fn with_outcome_cap(mut self, cap: usize) -> Self {
        self.outcome_cap = cap;
        self
    }

    #[must_use]
    pub fn with_model_cap(mut self, cap: usize) -> Self {
        self.model_cap = cap;
        self
    }

    /// Evaluate an address-valued expression under a path condition.
    pub fn evaluate_address(
        &mut self,
        expr: &AddrExpr,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<AddressApplication>> {
        trace!("[enter] evaluate_address {}", expr);
        let outcomes = match expr {
            AddrExpr::Variable(name) => match self.scope.resolve(name) {
                Some(address) => vec![self.address_success(expr, vec![], address)?],
                None => {
                    vec![self.address_failure(expr, Failure::UndefinedVariable(name.clone()))?]
                }
            },
            AddrExpr::DeRef(inner) => {
                let children = self.evaluate_address(inner, path)?;
                let mut outcomes = Vec::new();
                for child in &children {
                    match child {
                        Application::Success {
                            result: address, ..
                        } => {
                            let cell = self.memory.read(*address).clone();
                            for candidate in self.resolve_candidates(&cell, path)? {
                                let outcome = match candidate {
                                    ResolvedAddress::InBounds(resolved) => self.address_success(
                                        expr,
                                        vec![Premise::Address(child.clone())],
                                        resolved,
                                    )?,
                                    ResolvedAddress::OutOfBounds(address) => self.address_failure(
                                        expr,
                                        Failure::OutOfBoundsDeRef {
                                            address,
                                            size: self.memory.size(),
                                        },
                                    )?,
                                };
                                outcomes.push(outcome);
                            }
                        }
                        Application::Failure { .. } => {
                            let failure =
                                operand_failure(Operand::Address, Premise::Address(child.clone()));
                            outcomes.push(self.address_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            AddrExpr::ArrayAccess { base, index } => {
                let bases = self.evaluate_arithmetic(base, path)?;
                let indices = self.evaluate_arithmetic(index, path)?;
                let mut outcomes = Vec::new();
                for (b, i) in iproduct!(&bases, &indices) {
                    match (b, i) {
                        (
                            Application::Success {
                                result: base_value, ..
                            },
                            Application::Success {
                                result: index_value,
                                ..
                            },
                        ) => {
                            // Even when base and index are both symbolic,
                            // every admissible sum is enumerated.
                            let target = match (base_value.as_const(), index_value.as_const()) {
                                (Some(x), Some(y)) => ArithExpr::Const(x + y),
                                _ => ArithExpr::add(base_value.clone(), index_value.clone()),
                            };
                            for candidate in self.resolve_candidates(&target, path)? {
                                let outcome = match candidate {
                                    ResolvedAddress::InBounds(resolved) => self.address_success(
                                        expr,
                                        vec![
                                            Premise::Arithmetic(b.clone()),
                                            Premise::Arithmetic(i.clone()),
                                        ],
                                        resolved,
                                    )?,
                                    ResolvedAddress::OutOfBounds(address) => self.address_failure(
                                        expr,
                                        Failure::OutOfBoundsArrayAccess {
                                            address,
                                            size: self.memory.size(),
                                        },
                                    )?,
                                };
                                outcomes.push(outcome);
                            }
                        }
                        (Application::Failure { .. }, _) => {
                            let failure =
                                operand_failure(Operand::Base, Premise::Arithmetic(b.clone()));
                            outcomes.push(self.address_failure(expr, failure)?);
                        }
                        (_, Application::Failure { .. }) => {
                            let failure =
                                operand_failure(Operand::Index, Premise::Arithmetic(i.clone()));
                            outcomes.push(self.address_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
        };
        trace!(
            "[exit] evaluate_address {} ({} outcomes)",
            expr,
            outcomes.len()
        );
        Ok(outcomes)
    }

    /// Evaluate an arithmetic-valued expression under a path condition.
    pub fn evaluate_arithmetic(
        &mut self,
        expr: &ArithExpr,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<ArithApplication>> {
        trace!("[enter] evaluate_arithmetic {}", expr);
        let outcomes = match expr {
            ArithExpr::Const(_) | ArithExpr::Symbol(_) => {
                vec![self.arith_success(expr, vec![], expr.clone())?]
            }
            ArithExpr::BinOp { kind, left, right } => {
                let lefts = self.evaluate_arithmetic(left, path)?;
                let rights = self.evaluate_arithmetic(right, path)?;
                let mut outcomes = Vec::new();
                for (l, r) in iproduct!(&lefts, &rights) {
                    match (l, r) {
                        (
                            Application::Success {
                                result: left_value, ..
                            },
                            Application::Success {
                                result: right_value,
                                ..
                            },
                        ) => {
                            let result = match (left_value.as_const(), right_value.as_const()) {
                                (Some(x), Some(y)) => {
                                    ArithExpr::Const(fold_arith(expr, *kind, x, y)?)
                                }
                                _ => ArithExpr::bin_op(
                                    *kind,
                                    left_value.clone(),
                                    right_value.clone(),
                                ),
                            };
                            let premises =
                                vec![Premise::Arithmetic(l.clone()), Premise::Arithmetic(r.clone())];
                            outcomes.push(self.arith_success(expr, premises, result)?);
                        }
                        (Application::Failure { .. }, _) => {
                            let failure =
                                operand_failure(Operand::Left, Premise::Arithmetic(l.clone()));
                            outcomes.push(self.arith_failure(expr, failure)?);
                        }
                        (_, Application::Failure { .. }) => {
                            let failure =
                                operand_failure(Operand::Right, Premise::Arithmetic(r.clone()));
                            outcomes.push(self.arith_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            ArithExpr::Minus(inner) => {
                let children = self.evaluate_arithmetic(inner, path)?;
                let mut outcomes = Vec::new();
                for child in &children {
                    match child {
                        Application::Success { result, .. } => {
                            let folded = match result.as_const() {
                                Some(value) => ArithExpr::Const(-value),
                                None => ArithExpr::minus(result.clone()),
                            };
                            outcomes.push(self.arith_success(
                                expr,
                                vec![Premise::Arithmetic(child.clone())],
                                folded,
                            )?);
                        }
                        Application::Failure { .. } => {
                            let failure =
                                operand_failure(Operand::Inner, Premise::Arithmetic(child.clone()));
                            outcomes.push(self.arith_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            ArithExpr::ValAtAddr(address) => {
                let children = self.evaluate_address(address, path)?;
                let mut outcomes = Vec::new();
                for child in &children {
                    match child {
                        Application::Success {
                            result: address, ..
                        } => {
                            let contents = self.memory.read(*address).clone();
                            outcomes.push(self.arith_success(
                                expr,
                                vec![Premise::Address(child.clone())],
                                contents,
                            )?);
                        }
                        Application::Failure { .. } => {
                            let failure =
                                operand_failure(Operand::Address, Premise::Address(child.clone()));
                            outcomes.push(self.arith_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            ArithExpr::AddrOf(variable) => {
                let variable_node = AddrExpr::Variable(variable.clone());
                let children = self.evaluate_address(&variable_node, path)?;
                let mut outcomes = Vec::new();
                for child in &children {
                    match child {
                        Application::Success {
                            result: address, ..
                        } => {
                            // The resolved address, reinterpreted as a literal.
                            let literal = ArithExpr::Const(BigInt::from(*address));
                            outcomes.push(self.arith_success(
                                expr,
                                vec![Premise::Address(child.clone())],
                                literal,
                            )?);
                        }
                        Application::Failure { .. } => {
                            let failure =
                                operand_failure(Operand::Address, Premise::Address(child.clone()));
                            outcomes.push(self.arith_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            ArithExpr::Select { .. } => {
                return Err(EvaluationError::SpecOnlyExpression(expr.to_string()));
            }
        };
        trace!(
            "[exit] evaluate_arithmetic {} ({} outcomes)",
            expr,
            outcomes.len()
        );
        Ok(outcomes)
    }

    /// Evaluate a boolean-valued expression under a path condition.
    pub fn evaluate_boolean(
        &mut self,
        expr: &BoolExpr,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<BoolApplication>> {
        trace!("[enter] evaluate_boolean {}", expr);
        let outcomes = match expr {
            BoolExpr::True | BoolExpr::False => {
                vec![self.bool_success(expr, vec![], expr.clone())?]
            }
            BoolExpr::Cmp { kind, left, right } => {
                let lefts = self.evaluate_arithmetic(left, path)?;
                let rights = self.evaluate_arithmetic(right, path)?;
                let mut outcomes = Vec::new();
                for (l, r) in iproduct!(&lefts, &rights) {
                    match (l, r) {
                        (
                            Application::Success {
                                result: left_value, ..
                            },
                            Application::Success {
                                result: right_value,
                                ..
                            },
                        ) => {
                            let result = match (left_value.as_const(), right_value.as_const()) {
                                (Some(x), Some(y)) => BoolExpr::constant(fold_cmp(*kind, x, y)),
                                _ => BoolExpr::cmp(*kind, left_value.clone(), right_value.clone()),
                            };
                            let premises =
                                vec![Premise::Arithmetic(l.clone()), Premise::Arithmetic(r.clone())];
                            outcomes.push(self.bool_success(expr, premises, result)?);
                        }
                        (Application::Failure { .. }, _) => {
                            let failure =
                                operand_failure(Operand::Left, Premise::Arithmetic(l.clone()));
                            outcomes.push(self.bool_failure(expr, failure)?);
                        }
                        (_, Application::Failure { .. }) => {
                            let failure =
                                operand_failure(Operand::Right, Premise::Arithmetic(r.clone()));
                            outcomes.push(self.bool_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            BoolExpr::BinOp { kind, left, right } => {
                // Both operands are always evaluated: a symbolic side may
                // still error or contribute to the derivation trace.
                let lefts = self.evaluate_boolean(left, path)?;
                let rights = self.evaluate_boolean(right, path)?;
                let mut outcomes = Vec::new();
                for (l, r) in iproduct!(&lefts, &rights) {
                    match (l, r) {
                        (
                            Application::Success {
                                result: left_value, ..
                            },
                            Application::Success {
                                result: right_value,
                                ..
                            },
                        ) => {
                            let result = match (left_value.as_bool(), right_value.as_bool()) {
                                (Some(x), Some(y)) => BoolExpr::constant(fold_bool(*kind, x, y)),
                                _ => BoolExpr::bin_op(
                                    *kind,
                                    left_value.clone(),
                                    right_value.clone(),
                                ),
                            };
                            let premises =
                                vec![Premise::Boolean(l.clone()), Premise::Boolean(r.clone())];
                            outcomes.push(self.bool_success(expr, premises, result)?);
                        }
                        (Application::Failure { .. }, _) => {
                            let failure =
                                operand_failure(Operand::Left, Premise::Boolean(l.clone()));
                            outcomes.push(self.bool_failure(expr, failure)?);
                        }
                        (_, Application::Failure { .. }) => {
                            let failure =
                                operand_failure(Operand::Right, Premise::Boolean(r.clone()));
                            outcomes.push(self.bool_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            BoolExpr::Not(inner) => {
                let children = self.evaluate_boolean(inner, path)?;
                let mut outcomes = Vec::new();
                for child in &children {
                    match child {
                        Application::Success { result, .. } => {
                            let folded = match result.as_bool() {
                                Some(value) => BoolExpr::constant(!value),
                                None => BoolExpr::not(result.clone()),
                            };
                            outcomes.push(self.bool_success(
                                expr,
                                vec![Premise::Boolean(child.clone())],
                                folded,
                            )?);
                        }
                        Application::Failure { .. } => {
                            let failure =
                                operand_failure(Operand::Inner, Premise::Boolean(child.clone()));
                            outcomes.push(self.bool_failure(expr, failure)?);
                        }
                    }
                }
                outcomes
            }
            BoolExpr::Forall { .. } => {
                return Err(EvaluationError::SpecOnlyExpression(expr.to_string()));
            }
        };
        trace!(
            "[exit] evaluate_boolean {} ({} outcomes)",
            expr,
            outcomes.len()
        );
        Ok(outcomes)
    }

    /// The concrete addresses a reduced address-valued expression can stand
    /// for: a literal classifies directly, anything else goes through solver
    /// model enumeration under the path condition.
    fn resolve_candidates(
        &mut self,
        target: &ArithExpr,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<ResolvedAddress>> {
        if let Some(value) = target.as_const() {
            return Ok(vec![resolve::classify(value.clone(), self.memory.size())]);
        }
        let fresh = self.fresh_symbol();
        resolve::enumerate_addresses(
            self.solver,
            target,
            path,
            self.memory.size(),
            &fresh,
            self.model_cap,
        )
    }

    fn fresh_symbol(&mut self) -> String {
        let name = format!("$address${}", self.fresh_counter);
        self.fresh_counter += 1;
        name
    }

    /// Charge one derivation record against the budget.
    fn charge(&mut self) -> EvaluationResult<()> {
        self.produced += 1;
        if self.produced > self.outcome_cap {
            return Err(EvaluationError::OutcomeLimit {
                cap: self.outcome_cap,
            });
        }
        Ok(())
    }

    fn address_success(
        &mut self,
        node: &AddrExpr,
        premises: Vec<Premise>,
        result: usize,
    ) -> EvaluationResult<AddressApplication> {
        self.charge()?;
        Ok(Application::Success {
            node: node.clone(),
            premises,
            result,
        })
    }

    fn address_failure(
        &mut self,
        node: &AddrExpr,
        error: Failure,
    ) -> EvaluationResult<AddressApplication> {
        self.charge()?;
        Ok(Application::Failure {
            node: node.clone(),
            error,
        })
    }

    fn arith_success(
        &mut self,
        node: &ArithExpr,
        premises: Vec<Premise>,
        result: ArithExpr,
    ) -> EvaluationResult<ArithApplication> {
        self.charge()?;
        Ok(Application::Success {
            node: node.clone(),
            premises,
            result,
        })
    }

    fn arith_failure(
        &mut self,
        node: &ArithExpr,
        error: Failure,
    ) -> EvaluationResult<ArithApplication> {
        self.charge()?;
        Ok(Application::Failure {
            node: node.clone(),
            error,
        })
    }

    fn bool_success(
        &mut self,
        node: &BoolExpr,
        premises: Vec<Premise>,
        result: BoolExpr,
    ) -> EvaluationResult<BoolApplication> {
        self.charge()?;
        Ok(Application::Success {
            node: node.clone(),
            premises,
            result,
        })
    }

    fn bool_failure(
        &mut self,
        node: &BoolExpr,
        error: Failure,
    ) -> EvaluationResult<BoolApplication> {
        self.charge()?;
        Ok(Application::Failure {
            node: node.clone(),
            error,
        })
    }
}

fn operand_failure(tag: Operand, premise: Premise) -> Failure {
    Failure::Operand {
        tag,
        premise: Box::new(premise),
    }
}

fn fold_arith(
    node: &ArithExpr,
    kind: ArithOpKind,
    left: &BigInt,
    right: &BigInt,
) -> EvaluationResult<BigInt> {
    match kind {
        ArithOpKind::Add => Ok(left + right),
        ArithOpKind::Sub => Ok(left - right),
        ArithOpKind::Mul => Ok(left * right),
        ArithOpKind::Div | ArithOpKind::Rem => {
            if right.is_zero() {
                return Err(EvaluationError::DivisionByZero(node.to_string()));
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

fn fold_cmp(kind: CmpOpKind, left: &BigInt, right: &BigInt) -> bool {
    match kind {
        CmpOpKind::Eq { .. } => left == right,
        CmpOpKind::Gt => left > right,
        CmpOpKind::Gte => left >= right,
        CmpOpKind::Lt => left < right,
        CmpOpKind::Lte => left <= right,
    }
}

fn fold_bool(kind: BoolOpKind, left: bool, right: bool) -> bool {
    match kind {
        BoolOpKind::And => left && right,
        BoolOpKind::Or => left || right,
        BoolOpKind::Implies => !left || right,
        BoolOpKind::Equiv => left == right,
    }
}

/// Evaluate an address expression with no accumulated path condition.
pub fn evaluate_address(
    expr: &AddrExpr,
    scope: &dyn Scope,
    memory: &dyn Memory,
    solver: &dyn Solver,
) -> EvaluationResult<Vec<AddressApplication>> {
    Evaluator::new(scope, memory, solver).evaluate_address(expr, &BoolExpr::True)
}

/// Evaluate an arithmetic expression with no accumulated path condition.
pub fn evaluate_arithmetic(
    expr: &ArithExpr,
    scope: &dyn Scope,
    memory: &dyn Memory,
    solver: &dyn Solver,
) -> EvaluationResult<Vec<ArithApplication>> {
    Evaluator::new(scope, memory, solver).evaluate_arithmetic(expr, &BoolExpr::True)
}

/// Evaluate a boolean expression with no accumulated path condition.
pub fn evaluate_boolean(
    expr: &BoolExpr,
    scope: &dyn Scope,
    memory: &dyn Memory,
    solver: &dyn Solver,
) -> EvaluationResult<Vec<BoolApplication>> {
    Evaluator::new(scope, memory, solver).evaluate_boolean(expr, &BoolExpr::True)
}

/// The evaluation judgment, abstracted over the expression sort.
pub trait Evaluate: Sized {
    type Value;

    fn evaluate(
        &self,
        evaluator: &mut Evaluator,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<Application<Self, Self::Value>>>;
}

impl Evaluate for AddrExpr {
    type Value = usize;

    fn evaluate(
        &self,
        evaluator: &mut Evaluator,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<AddressApplication>> {
        evaluator.evaluate_address(self, path)
    }
}

impl Evaluate for ArithExpr {
    type Value = ArithExpr;

    fn evaluate(
        &self,
        evaluator: &mut Evaluator,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<ArithApplication>> {
        evaluator.evaluate_arithmetic(self, path)
    }
}

impl Evaluate for BoolExpr {
    type Value = BoolExpr;

    fn evaluate(
        &self,
        evaluator: &mut Evaluator,
        path: &BoolExpr,
    ) -> EvaluationResult<Vec<BoolApplication>> {
        evaluator.evaluate_boolean(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MemoryArray, VarScope};
    use wend_smt::BruteForceSolver;
    use wend_vir::ArrayExpr;

    fn solver() -> BruteForceSolver {
        BruteForceSolver::new(8)
    }

    /// Scope with `p -> 0`, memory of size 4 with `[0] = x`, `[1] = 10`,
    /// `[2] = 20`, `[3] = 30`.
    fn fixture() -> (VarScope, MemoryArray) {
        let mut scope = VarScope::new();
        scope.bind("p", 0);
        let mut memory = MemoryArray::new(4);
        memory.write(0, ArithExpr::symbol("x"));
        memory.write(1, ArithExpr::int(10));
        memory.write(2, ArithExpr::int(20));
        memory.write(3, ArithExpr::int(30));
        (scope, memory)
    }

    #[test]
    fn literal_addition_folds() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = ArithExpr::add(ArithExpr::int(2), ArithExpr::int(3));
        let outcomes = evaluate_arithmetic(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].result(), Some(&ArithExpr::int(5)));
        assert_eq!(outcomes[0].premises().len(), 2);
    }

    #[test]
    fn folding_is_idempotent() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = ArithExpr::mul(ArithExpr::int(6), ArithExpr::int(7));
        let outcomes = evaluate_arithmetic(&expr, &scope, &memory, &solver).unwrap();
        let folded = outcomes[0].result().unwrap().clone();
        let again = evaluate_arithmetic(&folded, &scope, &memory, &solver).unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].result(), Some(&folded));
    }

    #[test]
    fn division_truncates_toward_zero() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = ArithExpr::div(ArithExpr::int(-7), ArithExpr::int(2));
        let outcomes = evaluate_arithmetic(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes[0].result(), Some(&ArithExpr::int(-3)));
        let expr = ArithExpr::rem(ArithExpr::int(-7), ArithExpr::int(2));
        let outcomes = evaluate_arithmetic(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes[0].result(), Some(&ArithExpr::int(-1)));
    }

    #[test]
    fn literal_division_by_zero_is_fatal() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = ArithExpr::div(ArithExpr::int(1), ArithExpr::int(0));
        let result = evaluate_arithmetic(&expr, &scope, &memory, &solver);
        assert!(matches!(result, Err(EvaluationError::DivisionByZero(_))));
        let expr = ArithExpr::rem(ArithExpr::int(1), ArithExpr::int(0));
        let result = evaluate_arithmetic(&expr, &scope, &memory, &solver);
        assert!(matches!(result, Err(EvaluationError::DivisionByZero(_))));
    }

    #[test]
    fn symbolic_operand_stays_symbolic() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = ArithExpr::add(ArithExpr::symbol("x"), ArithExpr::int(1));
        let outcomes = evaluate_arithmetic(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        // Partial evaluation: same operator over the reduced children.
        assert_eq!(outcomes[0].result(), Some(&expr));
    }

    #[test]
    fn undefined_variable_is_a_single_failure() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = AddrExpr::variable("undefined");
        let outcomes = evaluate_address(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(
            outcomes[0].error(),
            Some(&Failure::UndefinedVariable("undefined".to_string()))
        );
    }

    #[test]
    fn variable_resolves_through_scope() {
        let (scope, memory) = fixture();
        let solver = solver();
        let outcomes =
            evaluate_address(&AddrExpr::variable("p"), &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].result(), Some(&0));
    }

    #[test]
    fn addr_of_reinterprets_the_address_as_a_literal() {
        let (scope, memory) = fixture();
        let solver = solver();
        let outcomes =
            evaluate_arithmetic(&ArithExpr::addr_of("p"), &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].result(), Some(&ArithExpr::int(0)));

        let outcomes =
            evaluate_arithmetic(&ArithExpr::addr_of("q"), &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        match outcomes[0].error() {
            Some(Failure::Operand {
                tag: Operand::Address,
                ..
            }) => {}
            other => panic!("expected nested address failure, got {:?}", other),
        }
    }

    #[test]
    fn val_at_addr_reads_the_cell_symbolically() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = ArithExpr::val_at(AddrExpr::variable("p"));
        let outcomes = evaluate_arithmetic(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        // The cell contents are returned as-is, not resolved.
        assert_eq!(outcomes[0].result(), Some(&ArithExpr::symbol("x")));
    }

    #[test]
    fn deref_enumerates_symbolic_addresses() {
        let (scope, memory) = fixture();
        let solver = solver();
        let path = BoolExpr::or(
            BoolExpr::eq(ArithExpr::symbol("x"), ArithExpr::int(1)),
            BoolExpr::eq(ArithExpr::symbol("x"), ArithExpr::int(2)),
        );
        let expr = AddrExpr::deref(AddrExpr::variable("p"));
        let mut evaluator = Evaluator::new(&scope, &memory, &solver);
        let outcomes = evaluator.evaluate_address(&expr, &path).unwrap();
        let mut addresses: Vec<usize> = outcomes
            .iter()
            .filter_map(|outcome| outcome.result().copied())
            .collect();
        addresses.sort_unstable();
        assert_eq!(addresses, vec![1, 2]);
    }

    #[test]
    fn cross_product_of_symbolic_operands() {
        let (scope, memory) = fixture();
        let solver = solver();
        let path = BoolExpr::or(
            BoolExpr::eq(ArithExpr::symbol("x"), ArithExpr::int(1)),
            BoolExpr::eq(ArithExpr::symbol("x"), ArithExpr::int(2)),
        );
        // Each operand dereferences the symbolic cell, yielding two outcomes;
        // the addition therefore yields exactly 2 x 2 combinations.
        let operand = ArithExpr::val_at(AddrExpr::deref(AddrExpr::variable("p")));
        let expr = ArithExpr::add(operand.clone(), operand);
        let mut evaluator = Evaluator::new(&scope, &memory, &solver);
        let outcomes = evaluator.evaluate_arithmetic(&expr, &path).unwrap();
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|outcome| outcome.is_success()));
        let mut sums: Vec<ArithExpr> = outcomes
            .iter()
            .map(|outcome| outcome.result().unwrap().clone())
            .collect();
        sums.sort_by_key(|sum| sum.to_string());
        assert_eq!(
            sums,
            vec![
                ArithExpr::int(20),
                ArithExpr::int(30),
                ArithExpr::int(30),
                ArithExpr::int(40),
            ]
        );
    }

    #[test]
    fn error_containment_in_combinations() {
        let (scope, memory) = fixture();
        let solver = solver();
        let path = BoolExpr::or(
            BoolExpr::eq(ArithExpr::symbol("x"), ArithExpr::int(1)),
            BoolExpr::eq(ArithExpr::symbol("x"), ArithExpr::int(2)),
        );
        let good = ArithExpr::val_at(AddrExpr::deref(AddrExpr::variable("p")));
        let bad = ArithExpr::val_at(AddrExpr::variable("undefined"));
        let expr = ArithExpr::add(good, bad);
        let mut evaluator = Evaluator::new(&scope, &memory, &solver);
        let outcomes = evaluator.evaluate_arithmetic(&expr, &path).unwrap();
        // 2 outcomes on the left, 1 failure on the right: every combination
        // fails, tagged with the failing position.
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            match outcome.error() {
                Some(Failure::Operand {
                    tag: Operand::Right,
                    ..
                }) => {}
                other => panic!("expected right-operand failure, got {:?}", other),
            }
        }
    }

    #[test]
    fn no_short_circuit_in_connectives() {
        let (scope, memory) = fixture();
        let solver = solver();
        let bad = BoolExpr::eq(
            ArithExpr::val_at(AddrExpr::variable("undefined")),
            ArithExpr::int(0),
        );
        let expr = BoolExpr::and(BoolExpr::False, bad);
        let outcomes = evaluate_boolean(&expr, &scope, &memory, &solver).unwrap();
        // The error of the second operand surfaces instead of folding to false.
        assert_eq!(outcomes.len(), 1);
        match outcomes[0].error() {
            Some(Failure::Operand {
                tag: Operand::Right,
                ..
            }) => {}
            other => panic!("expected right-operand failure, got {:?}", other),
        }
    }

    #[test]
    fn connective_truth_tables() {
        let (scope, memory) = fixture();
        let solver = solver();
        let cases = [
            (BoolExpr::and(BoolExpr::True, BoolExpr::False), false),
            (BoolExpr::or(BoolExpr::False, BoolExpr::True), true),
            (BoolExpr::implies(BoolExpr::False, BoolExpr::False), true),
            (BoolExpr::implies(BoolExpr::True, BoolExpr::False), false),
            (BoolExpr::equiv(BoolExpr::False, BoolExpr::False), true),
            (BoolExpr::not(BoolExpr::True), false),
        ];
        for (expr, expected) in cases {
            let outcomes = evaluate_boolean(&expr, &scope, &memory, &solver).unwrap();
            assert_eq!(outcomes.len(), 1, "{}", expr);
            assert_eq!(
                outcomes[0].result().and_then(|result| result.as_bool()),
                Some(expected),
                "{}",
                expr
            );
        }
    }

    #[test]
    fn comparison_folding() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = BoolExpr::lt(ArithExpr::int(2), ArithExpr::int(3));
        let outcomes = evaluate_boolean(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes[0].result(), Some(&BoolExpr::True));

        let expr = BoolExpr::eq_at(1, ArithExpr::int(4), ArithExpr::int(4));
        let outcomes = evaluate_boolean(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes[0].result(), Some(&BoolExpr::True));

        // An unreduced comparison keeps its operator, including the depth.
        let expr = BoolExpr::eq_at(1, ArithExpr::symbol("x"), ArithExpr::int(4));
        let outcomes = evaluate_boolean(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes[0].result(), Some(&expr));
    }

    #[test]
    fn literal_deref_classifies_bounds() {
        let mut scope = VarScope::new();
        scope.bind("p", 0);
        let mut memory = MemoryArray::new(4);
        memory.write(0, ArithExpr::int(3));
        let solver = solver();
        let expr = AddrExpr::deref(AddrExpr::variable("p"));
        let outcomes = evaluate_address(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].result(), Some(&3));

        let mut memory = MemoryArray::new(4);
        memory.write(0, ArithExpr::int(4));
        let outcomes = evaluate_address(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        match outcomes[0].error() {
            Some(Failure::OutOfBoundsDeRef { address, size }) => {
                assert_eq!(address, &BigInt::from(4));
                assert_eq!(*size, 4);
            }
            other => panic!("expected out-of-bounds dereference, got {:?}", other),
        }
    }

    #[test]
    fn literal_array_access_classifies_bounds() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = AddrExpr::array_access(ArithExpr::int(1), ArithExpr::int(2));
        let outcomes = evaluate_address(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].result(), Some(&3));

        let expr = AddrExpr::array_access(ArithExpr::int(2), ArithExpr::int(2));
        let outcomes = evaluate_address(&expr, &scope, &memory, &solver).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0].error(),
            Some(Failure::OutOfBoundsArrayAccess { .. })
        ));
    }

    #[test]
    fn spec_only_expressions_are_fatal() {
        let (scope, memory) = fixture();
        let solver = solver();
        let forall = BoolExpr::forall("k", BoolExpr::True);
        let result = evaluate_boolean(&forall, &scope, &memory, &solver);
        assert!(matches!(
            result,
            Err(EvaluationError::SpecOnlyExpression(_))
        ));

        let select = ArithExpr::select(ArrayExpr::AnyArray, ArithExpr::int(0));
        let result = evaluate_arithmetic(&select, &scope, &memory, &solver);
        assert!(matches!(
            result,
            Err(EvaluationError::SpecOnlyExpression(_))
        ));
    }

    #[test]
    fn outcome_cap_is_fatal() {
        let (scope, memory) = fixture();
        let solver = solver();
        let expr = ArithExpr::add(ArithExpr::int(2), ArithExpr::int(3));
        let mut evaluator = Evaluator::new(&scope, &memory, &solver).with_outcome_cap(2);
        let result = evaluator.evaluate_arithmetic(&expr, &BoolExpr::True);
        assert!(matches!(
            result,
            Err(EvaluationError::OutcomeLimit { cap: 2 })
        ));
    }
}

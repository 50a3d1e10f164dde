// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end evaluation over symbolic memory, with the brute-force solver
//! resolving symbolic addresses under a path condition.

use std::sync::Once;

use num_bigint::BigInt;
use wend_smt::BruteForceSolver;
use wend_symex::{
    evaluate_boolean, Application, Evaluator, Failure, MemoryArray, Operand, VarScope,
};
use wend_vir::{AddrExpr, ArithExpr, BoolExpr};

static INIT: Once = Once::new();

lazy_static::lazy_static! {
    static ref SOLVER: BruteForceSolver = BruteForceSolver::new(16);
}

/// Setup function that is only run once, even if called multiple times.
fn setup() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

/// Scope with `p -> 0`, memory of size 4 with a symbolic cell `x` at address
/// 0 and literals 10, 20, 30 behind it.
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

fn disjunction(symbol: &str, values: &[i64]) -> BoolExpr {
    let mut clauses = values
        .iter()
        .map(|value| BoolExpr::eq(ArithExpr::symbol(symbol), ArithExpr::int(*value)));
    let first = clauses.next().unwrap();
    clauses.fold(first, BoolExpr::or)
}

#[test]
fn symbolic_deref_splits_into_bounds_outcomes() {
    setup();

    let (scope, memory) = fixture();
    // `x` is either 2 (a valid address) or 5 (outside the memory).
    let path = disjunction("x", &[2, 5]);
    let expr = AddrExpr::deref(AddrExpr::variable("p"));

    let mut evaluator = Evaluator::new(&scope, &memory, &*SOLVER);
    let outcomes = evaluator.evaluate_address(&expr, &path).unwrap();

    assert_eq!(outcomes.len(), 2);
    let successes: Vec<usize> = outcomes
        .iter()
        .filter_map(|outcome| outcome.result().copied())
        .collect();
    assert_eq!(successes, vec![2]);
    let failures: Vec<&Failure> = outcomes
        .iter()
        .filter_map(|outcome| outcome.error())
        .collect();
    assert_eq!(
        failures,
        vec![&Failure::OutOfBoundsDeRef {
            address: BigInt::from(5),
            size: 4,
        }]
    );
}

#[test]
fn symbolic_read_joins_every_admissible_cell() {
    setup();

    let (scope, memory) = fixture();
    let path = disjunction("x", &[1, 2, 3]);
    // Reads the cell `x` points to: any of 10, 20 or 30.
    let expr = ArithExpr::val_at(AddrExpr::deref(AddrExpr::variable("p")));

    let mut evaluator = Evaluator::new(&scope, &memory, &*SOLVER);
    let outcomes = evaluator.evaluate_arithmetic(&expr, &path).unwrap();

    let mut values: Vec<ArithExpr> = outcomes
        .iter()
        .map(|outcome| outcome.result().unwrap().clone())
        .collect();
    values.sort_by_key(|value| value.to_string());
    assert_eq!(
        values,
        vec![ArithExpr::int(10), ArithExpr::int(20), ArithExpr::int(30)]
    );
}

#[test]
fn symbolic_array_access_resolves_base_plus_index() {
    setup();

    let (scope, memory) = fixture();
    // base is the symbolic cell, index a literal: the sum is enumerated.
    let path = disjunction("x", &[1, 3]);
    let base = ArithExpr::val_at(AddrExpr::variable("p"));
    let expr = AddrExpr::array_access(base, ArithExpr::int(1));

    let mut evaluator = Evaluator::new(&scope, &memory, &*SOLVER);
    let outcomes = evaluator.evaluate_address(&expr, &path).unwrap();

    assert_eq!(outcomes.len(), 2);
    // x + 1 is 2 (in bounds) or 4 (one past the end).
    let successes: Vec<usize> = outcomes
        .iter()
        .filter_map(|outcome| outcome.result().copied())
        .collect();
    assert_eq!(successes, vec![2]);
    assert!(outcomes.iter().any(|outcome| matches!(
        outcome.error(),
        Some(Failure::OutOfBoundsArrayAccess { address, size: 4 })
            if address == &BigInt::from(4)
    )));
}

#[test]
fn boolean_over_symbolic_memory_folds_per_outcome() {
    setup();

    let (scope, memory) = fixture();
    let path = disjunction("x", &[1, 2]);
    // [*p] > 15 reads cell 1 (10) or cell 2 (20).
    let expr = BoolExpr::gt(
        ArithExpr::val_at(AddrExpr::deref(AddrExpr::variable("p"))),
        ArithExpr::int(15),
    );

    let mut evaluator = Evaluator::new(&scope, &memory, &*SOLVER);
    let outcomes = evaluator.evaluate_boolean(&expr, &path).unwrap();

    let mut truths: Vec<Option<bool>> = outcomes
        .iter()
        .map(|outcome| outcome.result().and_then(|result| result.as_bool()))
        .collect();
    truths.sort();
    assert_eq!(truths, vec![Some(false), Some(true)]);
}

#[test]
fn failures_propagate_without_silencing_siblings() {
    setup();

    let (scope, memory) = fixture();
    let path = disjunction("x", &[2, 5]);
    // The left conjunct always folds; the right one dereferences `x`, which
    // may be out of bounds. Both conjunct outcomes must surface.
    let expr = BoolExpr::and(
        BoolExpr::False,
        BoolExpr::eq(
            ArithExpr::val_at(AddrExpr::deref(AddrExpr::variable("p"))),
            ArithExpr::int(20),
        ),
    );

    let mut evaluator = Evaluator::new(&scope, &memory, &*SOLVER);
    let outcomes = evaluator.evaluate_boolean(&expr, &path).unwrap();

    assert_eq!(outcomes.len(), 2);
    let folded: Vec<&BoolExpr> = outcomes
        .iter()
        .filter_map(|outcome| outcome.result())
        .collect();
    assert_eq!(folded, vec![&BoolExpr::False]);
    match outcomes.iter().find_map(|outcome| outcome.error()) {
        Some(Failure::Operand {
            tag: Operand::Right,
            premise,
        }) => {
            let rendered = premise.error().map(|error| error.to_string());
            assert_eq!(
                rendered.as_deref(),
                Some("left operand failed: address operand failed: dereference of address 5 outside [0, 4)")
            );
        }
        other => panic!("expected right-operand failure, got {:?}", other),
    }
}

#[test]
fn undefined_variable_renders_through_the_record_chain() {
    setup();

    let (scope, memory) = fixture();
    let expr = BoolExpr::lt(
        ArithExpr::val_at(AddrExpr::variable("missing")),
        ArithExpr::int(0),
    );
    let outcomes = evaluate_boolean(&expr, &scope, &memory, &*SOLVER).unwrap();

    assert_eq!(outcomes.len(), 1);
    match &outcomes[0] {
        Application::Failure { error, .. } => assert_eq!(
            error.to_string(),
            "left operand failed: address operand failed: variable 'missing' is not defined"
        ),
        other => panic!("expected a failure record, got {}", other),
    }
}

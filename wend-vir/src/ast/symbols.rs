// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Syntactic inspection of expressions: free-symbol collection and detection
//! of specification-only nodes.

use std::collections::BTreeSet;

use super::expr::*;

impl AddrExpr {
    pub fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            AddrExpr::Variable(_) => {}
            AddrExpr::DeRef(inner) => inner.collect_symbols(symbols),
            AddrExpr::ArrayAccess { base, index } => {
                base.collect_symbols(symbols);
                index.collect_symbols(symbols);
            }
        }
    }

    /// Does this expression contain a node of the specification-only family?
    pub fn contains_spec_only(&self) -> bool {
        match self {
            AddrExpr::Variable(_) => false,
            AddrExpr::DeRef(inner) => inner.contains_spec_only(),
            AddrExpr::ArrayAccess { base, index } => {
                base.contains_spec_only() || index.contains_spec_only()
            }
        }
    }
}

impl ArithExpr {
    pub fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            ArithExpr::Const(_) | ArithExpr::AddrOf(_) => {}
            ArithExpr::Symbol(name) => {
                symbols.insert(name.clone());
            }
            ArithExpr::BinOp { left, right, .. } => {
                left.collect_symbols(symbols);
                right.collect_symbols(symbols);
            }
            ArithExpr::Minus(inner) => inner.collect_symbols(symbols),
            ArithExpr::ValAtAddr(address) => address.collect_symbols(symbols),
            ArithExpr::Select { array, index } => {
                array.collect_symbols(symbols);
                index.collect_symbols(symbols);
            }
        }
    }

    pub fn contains_spec_only(&self) -> bool {
        match self {
            ArithExpr::Const(_) | ArithExpr::Symbol(_) | ArithExpr::AddrOf(_) => false,
            ArithExpr::BinOp { left, right, .. } => {
                left.contains_spec_only() || right.contains_spec_only()
            }
            ArithExpr::Minus(inner) => inner.contains_spec_only(),
            ArithExpr::ValAtAddr(address) => address.contains_spec_only(),
            ArithExpr::Select { .. } => true,
        }
    }
}

impl BoolExpr {
    pub fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            BoolExpr::True | BoolExpr::False => {}
            BoolExpr::Cmp { left, right, .. } => {
                left.collect_symbols(symbols);
                right.collect_symbols(symbols);
            }
            BoolExpr::BinOp { left, right, .. } => {
                left.collect_symbols(symbols);
                right.collect_symbols(symbols);
            }
            BoolExpr::Not(inner) => inner.collect_symbols(symbols),
            BoolExpr::Forall { body, .. } => body.collect_symbols(symbols),
        }
    }

    /// All free symbols of the expression, in a stable order.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    pub fn contains_spec_only(&self) -> bool {
        match self {
            BoolExpr::True | BoolExpr::False => false,
            BoolExpr::Cmp { left, right, .. } => {
                left.contains_spec_only() || right.contains_spec_only()
            }
            BoolExpr::BinOp { left, right, .. } => {
                left.contains_spec_only() || right.contains_spec_only()
            }
            BoolExpr::Not(inner) => inner.contains_spec_only(),
            BoolExpr::Forall { .. } => true,
        }
    }
}

impl ArrayExpr {
    pub fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            ArrayExpr::AnyArray => {}
            ArrayExpr::Store {
                array,
                index,
                value,
            } => {
                array.collect_symbols(symbols);
                index.collect_symbols(symbols);
                value.collect_symbols(symbols);
            }
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// An address-valued expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddrExpr {
    /// A program variable, resolved to its address through the scope.
    Variable(String),
    /// Pointer dereference: the address held by the cell at the inner address.
    DeRef(Box<AddrExpr>),
    /// `base[index]`: a base address plus an offset, both arithmetic-valued.
    ArrayAccess {
        base: Box<ArithExpr>,
        index: Box<ArithExpr>,
    },
}

/// Binary arithmetic operators. Division and remainder truncate toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// An arithmetic-valued expression.
///
/// Evaluation results are themselves arithmetic expressions in
/// normal-or-partial form: a fully folded result is a [`ArithExpr::Const`],
/// anything containing a free [`ArithExpr::Symbol`] stays symbolic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithExpr {
    /// An arbitrary-precision integer literal.
    Const(BigInt),
    /// A free logical symbol: the representation of a still-unknown value in
    /// memory cells, path conditions and solver constraints.
    Symbol(String),
    BinOp {
        kind: ArithOpKind,
        left: Box<ArithExpr>,
        right: Box<ArithExpr>,
    },
    Minus(Box<ArithExpr>),
    /// The current contents of the memory cell at the given address.
    ValAtAddr(Box<AddrExpr>),
    /// The address of a program variable, as an integer.
    AddrOf(String),
    /// Specification-only read from a symbolic whole-memory array.
    Select {
        array: Box<ArrayExpr>,
        index: Box<ArithExpr>,
    },
}

/// Arithmetic comparison operators.
///
/// `Eq` carries an explicit nesting depth for multi-level equality chains; the
/// depth is preserved through partial evaluation and consumed downstream by
/// the verification-condition generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOpKind {
    Eq { depth: usize },
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Binary boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOpKind {
    And,
    Or,
    Implies,
    Equiv,
}

/// A boolean-valued expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolExpr {
    True,
    False,
    Cmp {
        kind: CmpOpKind,
        left: Box<ArithExpr>,
        right: Box<ArithExpr>,
    },
    BinOp {
        kind: BoolOpKind,
        left: Box<BoolExpr>,
        right: Box<BoolExpr>,
    },
    Not(Box<BoolExpr>),
    /// Specification-only universal quantification.
    Forall {
        variable: String,
        body: Box<BoolExpr>,
    },
}

/// Specification-only array theory over whole memories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayExpr {
    /// An arbitrary, unconstrained memory.
    AnyArray,
    /// `array[index := value]`: a functional update of one cell.
    Store {
        array: Box<ArrayExpr>,
        index: Box<ArithExpr>,
        value: Box<ArithExpr>,
    },
}

impl AddrExpr {
    pub fn variable<S: Into<String>>(name: S) -> Self {
        AddrExpr::Variable(name.into())
    }

    pub fn deref(inner: AddrExpr) -> Self {
        AddrExpr::DeRef(Box::new(inner))
    }

    pub fn array_access(base: ArithExpr, index: ArithExpr) -> Self {
        AddrExpr::ArrayAccess {
            base: Box::new(base),
            index: Box::new(index),
        }
    }
}

impl ArithExpr {
    pub fn int<I: Into<BigInt>>(value: I) -> Self {
        ArithExpr::Const(value.into())
    }

    pub fn symbol<S: Into<String>>(name: S) -> Self {
        ArithExpr::Symbol(name.into())
    }

    pub fn bin_op(kind: ArithOpKind, left: ArithExpr, right: ArithExpr) -> Self {
        ArithExpr::BinOp {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(left: ArithExpr, right: ArithExpr) -> Self {
        Self::bin_op(ArithOpKind::Add, left, right)
    }

    pub fn sub(left: ArithExpr, right: ArithExpr) -> Self {
        Self::bin_op(ArithOpKind::Sub, left, right)
    }

    pub fn mul(left: ArithExpr, right: ArithExpr) -> Self {
        Self::bin_op(ArithOpKind::Mul, left, right)
    }

    pub fn div(left: ArithExpr, right: ArithExpr) -> Self {
        Self::bin_op(ArithOpKind::Div, left, right)
    }

    pub fn rem(left: ArithExpr, right: ArithExpr) -> Self {
        Self::bin_op(ArithOpKind::Rem, left, right)
    }

    pub fn minus(inner: ArithExpr) -> Self {
        ArithExpr::Minus(Box::new(inner))
    }

    pub fn val_at(address: AddrExpr) -> Self {
        ArithExpr::ValAtAddr(Box::new(address))
    }

    pub fn addr_of<S: Into<String>>(variable: S) -> Self {
        ArithExpr::AddrOf(variable.into())
    }

    pub fn select(array: ArrayExpr, index: ArithExpr) -> Self {
        ArithExpr::Select {
            array: Box::new(array),
            index: Box::new(index),
        }
    }

    /// The literal value, if this expression is fully folded.
    pub fn as_const(&self) -> Option<&BigInt> {
        match self {
            ArithExpr::Const(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_const(&self) -> bool {
        self.as_const().is_some()
    }
}

impl BoolExpr {
    pub fn constant(value: bool) -> Self {
        if value {
            BoolExpr::True
        } else {
            BoolExpr::False
        }
    }

    pub fn cmp(kind: CmpOpKind, left: ArithExpr, right: ArithExpr) -> Self {
        BoolExpr::Cmp {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn eq(left: ArithExpr, right: ArithExpr) -> Self {
        Self::cmp(CmpOpKind::Eq { depth: 0 }, left, right)
    }

    /// An equality at an explicit nesting depth of a multi-level chain.
    pub fn eq_at(depth: usize, left: ArithExpr, right: ArithExpr) -> Self {
        Self::cmp(CmpOpKind::Eq { depth }, left, right)
    }

    pub fn not_equals(left: ArithExpr, right: ArithExpr) -> Self {
        Self::not(Self::eq(left, right))
    }

    pub fn gt(left: ArithExpr, right: ArithExpr) -> Self {
        Self::cmp(CmpOpKind::Gt, left, right)
    }

    pub fn gte(left: ArithExpr, right: ArithExpr) -> Self {
        Self::cmp(CmpOpKind::Gte, left, right)
    }

    pub fn lt(left: ArithExpr, right: ArithExpr) -> Self {
        Self::cmp(CmpOpKind::Lt, left, right)
    }

    pub fn lte(left: ArithExpr, right: ArithExpr) -> Self {
        Self::cmp(CmpOpKind::Lte, left, right)
    }

    pub fn bin_op(kind: BoolOpKind, left: BoolExpr, right: BoolExpr) -> Self {
        BoolExpr::BinOp {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: BoolExpr, right: BoolExpr) -> Self {
        Self::bin_op(BoolOpKind::And, left, right)
    }

    pub fn or(left: BoolExpr, right: BoolExpr) -> Self {
        Self::bin_op(BoolOpKind::Or, left, right)
    }

    pub fn implies(left: BoolExpr, right: BoolExpr) -> Self {
        Self::bin_op(BoolOpKind::Implies, left, right)
    }

    pub fn equiv(left: BoolExpr, right: BoolExpr) -> Self {
        Self::bin_op(BoolOpKind::Equiv, left, right)
    }

    pub fn not(inner: BoolExpr) -> Self {
        BoolExpr::Not(Box::new(inner))
    }

    pub fn forall<S: Into<String>>(variable: S, body: BoolExpr) -> Self {
        BoolExpr::Forall {
            variable: variable.into(),
            body: Box::new(body),
        }
    }

    /// The truth value, if this expression is fully folded.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BoolExpr::True => Some(true),
            BoolExpr::False => Some(false),
            _ => None,
        }
    }

    pub fn is_const(&self) -> bool {
        self.as_bool().is_some()
    }
}

impl ArrayExpr {
    pub fn store(array: ArrayExpr, index: ArithExpr, value: ArithExpr) -> Self {
        ArrayExpr::Store {
            array: Box::new(array),
            index: Box::new(index),
            value: Box::new(value),
        }
    }
}

impl From<bool> for BoolExpr {
    fn from(value: bool) -> Self {
        BoolExpr::constant(value)
    }
}

impl From<i64> for ArithExpr {
    fn from(value: i64) -> Self {
        ArithExpr::Const(BigInt::from(value))
    }
}

impl From<BigInt> for ArithExpr {
    fn from(value: BigInt) -> Self {
        ArithExpr::Const(value)
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The expression intermediate representation of the wend verifier.
//!
//! Expressions come in three mutually exclusive sorts: address-valued
//! ([`AddrExpr`]), arithmetic-valued ([`ArithExpr`]) and boolean-valued
//! ([`BoolExpr`]). The sorts never cross, except that arithmetic and boolean
//! expressions may embed address expressions as operands (a memory
//! read-through embeds the address it reads from).
//!
//! A fourth, disjoint family ([`ArrayExpr`], [`BoolExpr::Forall`]) models
//! whole-memory updates and quantification in specification text only; those
//! nodes are never evaluable.

#![deny(unused_must_use)]
#![deny(unreachable_patterns)]

pub mod ast;

pub use ast::*;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Collaborator interfaces of the evaluator: the variable scope and the
//! memory. Both are read-only for the duration of an evaluation call.

use std::collections::HashMap;

use wend_vir::ArithExpr;

/// Maps program variable names to memory addresses.
pub trait Scope {
    fn resolve(&self, name: &str) -> Option<usize>;

    fn defines(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}

/// A fixed-size array of arithmetic expressions. Cells may hold literals or
/// still-symbolic expressions. Addresses are validated against `[0, size)`
/// by the evaluator before `read` is called.
pub trait Memory {
    fn size(&self) -> usize;
    fn read(&self, address: usize) -> &ArithExpr;
}

/// A map-backed [`Scope`].
#[derive(Debug, Clone, Default)]
pub struct VarScope {
    bindings: HashMap<String, usize>,
}

impl VarScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind<S: Into<String>>(&mut self, name: S, address: usize) {
        self.bindings.insert(name.into(), address);
    }
}

impl Scope for VarScope {
    fn resolve(&self, name: &str) -> Option<usize> {
        self.bindings.get(name).copied()
    }
}

/// A vector-backed [`Memory`] with all cells initialized to the literal zero.
#[derive(Debug, Clone)]
pub struct MemoryArray {
    cells: Vec<ArithExpr>,
}

impl MemoryArray {
    pub fn new(size: usize) -> Self {
        MemoryArray {
            cells: vec![ArithExpr::int(0); size],
        }
    }

    pub fn from_cells(cells: Vec<ArithExpr>) -> Self {
        MemoryArray { cells }
    }

    pub fn write(&mut self, address: usize, value: ArithExpr) {
        self.cells[address] = value;
    }
}

impl Memory for MemoryArray {
    fn size(&self) -> usize {
        self.cells.len()
    }

    fn read(&self, address: usize) -> &ArithExpr {
        &self.cells[address]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_resolution() {
        let mut scope = VarScope::new();
        scope.bind("x", 3);
        assert!(scope.defines("x"));
        assert_eq!(scope.resolve("x"), Some(3));
        assert!(!scope.defines("y"));
    }

    #[test]
    fn memory_cells() {
        let mut memory = MemoryArray::new(2);
        assert_eq!(memory.size(), 2);
        assert_eq!(memory.read(0), &ArithExpr::int(0));
        memory.write(1, ArithExpr::symbol("x"));
        assert_eq!(memory.read(1), &ArithExpr::symbol("x"));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// A satisfying assignment of integer values to free symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    assignment: HashMap<String, BigInt>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign<S: Into<String>>(&mut self, symbol: S, value: BigInt) {
        self.assignment.insert(symbol.into(), value);
    }

    pub fn value(&self, symbol: &str) -> Option<&BigInt> {
        self.assignment.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BigInt)> {
        self.assignment.iter()
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }
}

impl FromIterator<(String, BigInt)> for Model {
    fn from_iter<I: IntoIterator<Item = (String, BigInt)>>(iter: I) -> Self {
        Model {
            assignment: iter.into_iter().collect(),
        }
    }
}

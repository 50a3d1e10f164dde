// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::RwLock;

use config_crate::{Config, Environment, File};
use serde::Deserialize;

lazy_static::lazy_static! {
    static ref SETTINGS: RwLock<Config> = RwLock::new({
        let mut settings = Config::default();

        // 1. Default values
        settings.set_default("SOLVER_MODEL_CAP", 64).unwrap();
        settings.set_default("OUTCOME_CAP", 16_384).unwrap();
        settings.set_default("BRUTE_FORCE_BOUND", 32).unwrap();

        // 2. Override with the optional TOML file "Wend.toml" (if there is any)
        settings.merge(
            File::with_name("Wend.toml").required(false)
        ).unwrap();

        // 3. Override with env variables (`WEND_SOLVER_MODEL_CAP`, ...)
        settings.merge(
            Environment::with_prefix("WEND").ignore_empty(true)
        ).unwrap();

        settings
    });
}

fn read_setting<T>(name: &'static str) -> T
where
    T: Deserialize<'static>,
{
    SETTINGS
        .read()
        .unwrap()
        .get(name)
        .unwrap_or_else(|e| panic!("Failed to read setting {} due to {}", name, e))
}

/// Generate a dump of the settings
pub fn dump() -> String {
    format!("{:?}", SETTINGS.read().unwrap())
}

/// Maximum number of models the symbolic address resolver may enumerate for a
/// single address before the evaluation is aborted as unsound.
pub fn solver_model_cap() -> usize {
    read_setting("SOLVER_MODEL_CAP")
}

/// Maximum number of derivation records a single top-level evaluation call may
/// produce before it is aborted with a resource-exhaustion error.
pub fn outcome_cap() -> usize {
    read_setting("OUTCOME_CAP")
}

/// Assignment bound of the brute-force reference solver used by tests.
pub fn brute_force_bound() -> i64 {
    read_setting("BRUTE_FORCE_BOUND")
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

error_chain::error_chain! {
    errors {
        /// The constraint contains nodes the solver cannot interpret, or an
        /// operation that is undefined on the ground values it reached.
        MalformedConstraint(reason: String) {
            description("malformed constraint")
            display("malformed constraint: {}", reason)
        }
    }
}

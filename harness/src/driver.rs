//! Two-call process interface for fuzz engines.
//!
//! `fuzzer_init` fixes the configuration once per process and
//! `fuzzer_run_one` maps each input to `Some(post_state)` or `None`. Fatal
//! errors panic so the engine records them as crashes.

use crate::{Harness, HarnessConfig};
use std::sync::OnceLock;
use tracing::warn;

static HARNESS: OnceLock<Harness> = OnceLock::new();

pub fn fuzzer_init(bls_disabled: bool) {
    let harness = Harness::new(HarnessConfig::new(bls_disabled))
        .unwrap_or_else(|error| panic!("invalid harness configuration: {error}"));

    if HARNESS.set(harness).is_err() {
        warn!(bls_disabled, "Harness already initialized, keeping the first configuration");
    }
}

/// Run one input. Uses the default configuration if `fuzzer_init` was never called.
pub fn fuzzer_run_one(input: &[u8]) -> Option<Vec<u8>> {
    let harness = HARNESS.get_or_init(Harness::default);

    match harness.run_one(input) {
        Ok(outcome) => outcome.into_option(),
        Err(error) => panic!("fatal harness error: {error}"),
    }
}

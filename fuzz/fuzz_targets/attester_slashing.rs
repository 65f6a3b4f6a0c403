#![no_main]
#![forbid(unsafe_code)]

use harness::driver::{fuzzer_init, fuzzer_run_one};
use libfuzzer_sys::fuzz_target;

fuzz_target!(
    init: {
        let bls_disabled = std::env::var_os("FUZZ_BLS_DISABLED").is_some();
        fuzzer_init(bls_disabled);
    },
    |data: &[u8]| {
        // Rejections are expected; fatal errors panic inside the driver.
        let _ = fuzzer_run_one(data);
    }
);

// tests/driver.rs
use chain::MAINNET_PRESET;
use harness::corpus::{build_test_case, SlashingKind};
use harness::driver::{fuzzer_init, fuzzer_run_one};

fn unsigned_input() -> Vec<u8> {
    build_test_case(4, SlashingKind::DoubleVote, false, &MAINNET_PRESET)
        .unwrap()
        .to_bytes()
        .unwrap()
}

#[test]
fn test_initialized_driver_accepts_unsigned_slashing() {
    fuzzer_init(true);

    // A second init must not replace the first configuration.
    fuzzer_init(false);

    let post = fuzzer_run_one(&unsigned_input());
    assert!(post.is_some());
}

#[test]
#[should_panic(expected = "fatal harness error")]
fn test_undecodable_input_panics() {
    fuzzer_init(true);
    fuzzer_run_one(&[0x01, 0x02, 0x03]);
}

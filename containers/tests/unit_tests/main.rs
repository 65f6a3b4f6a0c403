// tests/unit_tests/main.rs

mod common;
mod process_attester_slashing;
mod validator_exit;

//! Runners for the consensus-spec-tests phase0 vectors. The vectors are not
//! vendored; point `CONSENSUS_SPEC_TESTS_DIR` at an unpacked release and run
//! with `--features spec_tests`.

mod macros {
    mod operations;
    mod ssz_static;
}

pub mod utils;

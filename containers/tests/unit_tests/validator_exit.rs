// tests/unit_tests/validator_exit.rs
use chain::MAINNET_PRESET;
use containers::{slashing::compute_activation_exit_epoch, Epoch, ValidatorIndex};
use pretty_assertions::assert_eq;

use super::common::{genesis_state, secret_keys, STATE_EPOCH};

#[test]
fn test_activation_exit_epoch_adds_seed_lookahead() {
    assert_eq!(
        compute_activation_exit_epoch(Epoch(STATE_EPOCH), &MAINNET_PRESET),
        Ok(Epoch(STATE_EPOCH + 5))
    );
}

#[test]
fn test_exits_spill_over_once_churn_is_reached() {
    let mut state = genesis_state(&secret_keys(8));

    for index in 0..5 {
        state
            .initiate_validator_exit(ValidatorIndex(index), &MAINNET_PRESET)
            .unwrap();
    }

    let exit_epochs: Vec<u64> = (0..5)
        .map(|i| state.validator(ValidatorIndex(i)).unwrap().exit_epoch.0)
        .collect();
    assert_eq!(exit_epochs, vec![9, 9, 9, 9, 10]);
    assert_eq!(
        state.validator(ValidatorIndex(4)).unwrap().withdrawable_epoch,
        Epoch(10 + 256)
    );
}

#[test]
fn test_exit_is_not_initiated_twice() {
    let mut state = genesis_state(&secret_keys(2));
    let index = ValidatorIndex(0);

    state.initiate_validator_exit(index, &MAINNET_PRESET).unwrap();
    let first = state.validator(index).unwrap().clone();
    state.initiate_validator_exit(index, &MAINNET_PRESET).unwrap();

    assert_eq!(state.validator(index).unwrap(), &first);
}

#[test]
fn test_slashing_extends_withdrawable_epoch() {
    let mut state = genesis_state(&secret_keys(4));
    let index = ValidatorIndex(2);

    state
        .slash_validator(index, Some(ValidatorIndex(3)), &MAINNET_PRESET)
        .unwrap();

    let validator = state.validator(index).unwrap();
    assert!(validator.slashed);
    assert_eq!(validator.exit_epoch, Epoch(STATE_EPOCH + 5));
    assert_eq!(
        validator.withdrawable_epoch,
        Epoch(STATE_EPOCH + MAINNET_PRESET.epochs_per_slashings_vector)
    );
}

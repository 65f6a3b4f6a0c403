// tests/unit_tests/process_attester_slashing.rs
use blst::min_pk::SecretKey;
use chain::MAINNET_PRESET;
use containers::{
    AttesterSlashing, BlsSignature, ErrorKind, Gwei, IndexedAttestationError, Rejection,
    SignatureVerification, State, StateTransitionError, TransitionConfig, ValidatorIndex,
};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use super::common::{
    attestation_data, double_vote, genesis_state, secret_keys, surround_vote, total_balance,
    unsigned_attestation, MAX_EFFECTIVE_BALANCE, NUM_VALIDATORS, SLASHING_PENALTY, STATE_EPOCH,
    WHISTLEBLOWER_REWARD,
};

#[fixture]
fn keys() -> Vec<SecretKey> {
    secret_keys(NUM_VALIDATORS)
}

#[fixture]
fn state(keys: Vec<SecretKey>) -> State {
    genesis_state(&keys)
}

fn verifying() -> TransitionConfig {
    TransitionConfig::mainnet(SignatureVerification::Enabled)
}

fn not_verifying() -> TransitionConfig {
    TransitionConfig::mainnet(SignatureVerification::Disabled)
}

fn unsigned_double_vote(indices_1: &[u64], indices_2: &[u64]) -> AttesterSlashing {
    AttesterSlashing {
        attestation_1: unsigned_attestation(indices_1, attestation_data(2, 3, 1)),
        attestation_2: unsigned_attestation(indices_2, attestation_data(2, 3, 2)),
    }
}

fn rejection_kind(error: &StateTransitionError) -> Option<Rejection> {
    match error.kind() {
        ErrorKind::Rejection(rejection) => Some(rejection),
        ErrorKind::Fatal => None,
    }
}

#[rstest]
fn test_double_vote_slashes_every_signer(keys: Vec<SecretKey>, state: State) {
    let indices = [1, 4, 7];
    let slashing = double_vote(&state, &keys, &indices);
    let balance_before = total_balance(&state);

    let post = state.process_attester_slashing(&slashing, &verifying()).unwrap();

    for index in indices {
        let validator = post.validator(ValidatorIndex(index)).unwrap();
        assert!(validator.slashed, "validator {index} should be slashed");
    }
    assert!(!post.validator(ValidatorIndex(0)).unwrap().slashed);

    let expected_total = balance_before - 3 * SLASHING_PENALTY + 3 * WHISTLEBLOWER_REWARD;
    assert_eq!(total_balance(&post), expected_total);
    assert_eq!(
        *post.slashings.mod_index(STATE_EPOCH),
        Gwei(3 * MAX_EFFECTIVE_BALANCE)
    );
}

#[rstest]
fn test_surround_vote_is_slashable(keys: Vec<SecretKey>, state: State) {
    let slashing = surround_vote(&state, &keys, &[2, 3]);

    let post = state.process_attester_slashing(&slashing, &verifying()).unwrap();

    assert!(post.validator(ValidatorIndex(2)).unwrap().slashed);
    assert!(post.validator(ValidatorIndex(3)).unwrap().slashed);
}

#[rstest]
fn test_only_the_intersection_is_slashed(keys: Vec<SecretKey>, state: State) {
    let slashing = AttesterSlashing {
        attestation_1: super::common::signed_attestation(
            &state,
            &keys,
            &[0, 1, 2],
            attestation_data(2, 3, 1),
        ),
        attestation_2: super::common::signed_attestation(
            &state,
            &keys,
            &[2, 3],
            attestation_data(2, 3, 2),
        ),
    };

    let post = state.process_attester_slashing(&slashing, &verifying()).unwrap();

    let slashed: Vec<u64> = (0..NUM_VALIDATORS as u64)
        .filter(|&i| post.validator(ValidatorIndex(i)).unwrap().slashed)
        .collect();
    assert_eq!(slashed, vec![2]);
}

#[rstest]
fn test_proposer_receives_whistleblower_reward(keys: Vec<SecretKey>, state: State) {
    let proposer = state.beacon_proposer_index(&MAINNET_PRESET).unwrap();
    let victim = (0..NUM_VALIDATORS as u64)
        .map(ValidatorIndex)
        .find(|&index| index != proposer)
        .unwrap();
    let proposer_before = state.balance(proposer).unwrap();

    let slashing = double_vote(&state, &keys, &[victim.0]);
    let post = state.process_attester_slashing(&slashing, &verifying()).unwrap();

    assert_eq!(
        post.balance(proposer).unwrap(),
        Gwei(proposer_before.0 + WHISTLEBLOWER_REWARD)
    );
    assert_eq!(
        post.balance(victim).unwrap(),
        Gwei(MAX_EFFECTIVE_BALANCE - SLASHING_PENALTY)
    );
}

#[rstest]
fn test_identical_attestations_are_not_slashable(keys: Vec<SecretKey>, state: State) {
    let attestation =
        super::common::signed_attestation(&state, &keys, &[1], attestation_data(2, 3, 1));
    let slashing = AttesterSlashing {
        attestation_1: attestation.clone(),
        attestation_2: attestation,
    };

    let error = state
        .process_attester_slashing(&slashing, &verifying())
        .unwrap_err();

    assert_eq!(error, StateTransitionError::AttestationDataNotSlashable);
    assert_eq!(rejection_kind(&error), Some(Rejection::Assertion));
}

#[rstest]
fn test_empty_indices_are_rejected(state: State) {
    let error = state
        .process_attester_slashing(&unsigned_double_vote(&[], &[1]), &not_verifying())
        .unwrap_err();

    assert_eq!(
        error,
        StateTransitionError::InvalidIndexedAttestation(IndexedAttestationError::EmptyIndices)
    );
}

#[rstest]
#[case::unsorted(&[3, 1])]
#[case::duplicated(&[1, 1, 2])]
fn test_indices_must_be_sorted_and_unique(state: State, #[case] indices: &[u64]) {
    let error = state
        .process_attester_slashing(&unsigned_double_vote(&[1, 2, 3], indices), &not_verifying())
        .unwrap_err();

    assert_eq!(
        error,
        StateTransitionError::InvalidIndexedAttestation(
            IndexedAttestationError::IndicesNotSortedOrUnique
        )
    );
    assert_eq!(rejection_kind(&error), Some(Rejection::Assertion));
}

#[rstest]
fn test_unknown_validator_is_an_index_rejection(state: State) {
    let out_of_range = NUM_VALIDATORS as u64;
    let error = state
        .process_attester_slashing(
            &unsigned_double_vote(&[1, out_of_range], &[1, out_of_range]),
            &not_verifying(),
        )
        .unwrap_err();

    assert_eq!(
        error,
        StateTransitionError::ValidatorIndexOutOfBounds {
            index: ValidatorIndex(out_of_range),
            length: NUM_VALIDATORS as u64,
        }
    );
    assert_eq!(rejection_kind(&error), Some(Rejection::IndexOutOfBounds));
}

#[rstest]
fn test_bad_signature_is_rejected_when_verifying(keys: Vec<SecretKey>, state: State) {
    let mut slashing = double_vote(&state, &keys, &[5]);
    slashing.attestation_2.signature = slashing.attestation_1.signature;

    let error = state
        .process_attester_slashing(&slashing, &verifying())
        .unwrap_err();

    assert_eq!(
        error,
        StateTransitionError::InvalidIndexedAttestation(IndexedAttestationError::InvalidSignature)
    );
}

#[rstest]
fn test_signatures_are_ignored_when_verification_is_disabled(state: State) {
    let mut slashing = unsigned_double_vote(&[5], &[5]);
    slashing.attestation_1.signature = BlsSignature::from([0xff; 96]);

    let post = state
        .process_attester_slashing(&slashing, &not_verifying())
        .unwrap();

    assert!(post.validator(ValidatorIndex(5)).unwrap().slashed);
}

#[rstest]
fn test_disjoint_attesters_slash_nobody(state: State) {
    let error = state
        .process_attester_slashing(&unsigned_double_vote(&[1, 2], &[3, 4]), &not_verifying())
        .unwrap_err();

    assert_eq!(error, StateTransitionError::NoValidatorSlashed);
}

#[rstest]
fn test_validator_cannot_be_slashed_twice(state: State) {
    let slashing = unsigned_double_vote(&[6], &[6]);

    let post = state
        .process_attester_slashing(&slashing, &not_verifying())
        .unwrap();
    let error = post
        .process_attester_slashing(&slashing, &not_verifying())
        .unwrap_err();

    assert_eq!(error, StateTransitionError::NoValidatorSlashed);
}

#[rstest]
fn test_missing_balance_is_an_index_rejection(state: State) {
    let mut state = state;
    let truncated = (&state.balances)
        .into_iter()
        .take(NUM_VALIDATORS - 1)
        .copied()
        .collect::<Vec<_>>();
    state.balances = Default::default();
    for balance in truncated {
        state.balances.push(balance).unwrap();
    }

    let last = NUM_VALIDATORS as u64 - 1;
    let error = state
        .process_attester_slashing(&unsigned_double_vote(&[last], &[last]), &not_verifying())
        .unwrap_err();

    assert!(matches!(
        error,
        StateTransitionError::BalanceIndexOutOfBounds { .. }
    ));
    assert_eq!(rejection_kind(&error), Some(Rejection::IndexOutOfBounds));
}

#[rstest]
fn test_withdrawable_epoch_overflow_is_fatal(state: State) {
    let mut state = state;
    state.validator_mut(ValidatorIndex(9)).unwrap().exit_epoch = containers::Epoch(u64::MAX - 1);

    let error = state
        .process_attester_slashing(&unsigned_double_vote(&[0], &[0]), &not_verifying())
        .unwrap_err();

    assert_eq!(
        error,
        StateTransitionError::ArithmeticOverflow("withdrawable epoch")
    );
    assert_eq!(error.kind(), ErrorKind::Fatal);
}

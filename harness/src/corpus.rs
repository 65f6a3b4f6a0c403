//! Deterministic seed inputs: a small registry with known keys and a slashing
//! that every registered validator signed twice.

use crate::AttesterSlashingTestCase;
use blst::min_pk::{AggregateSignature, SecretKey, Signature};
use blst::BLST_ERROR;
use chain::{Preset, DOMAIN_BEACON_ATTESTER, FAR_FUTURE_EPOCH, MAX_VALIDATORS_PER_COMMITTEE};
use containers::{
    compute_signing_root, AttestationData, AttesterSlashing, AttestingIndices, BlsPublicKey,
    BlsSignature, Bytes32, Checkpoint, CommitteeIndex, Epoch, Gwei, IndexedAttestation, State,
    Validator, ValidatorIndex, BLS_DST,
};
use thiserror::Error;
use tracing::debug;

/// Epoch the generated pre-state sits in; late enough that surround votes
/// have room for distinct source epochs.
pub const STATE_EPOCH: u64 = 4;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("at least one validator is required")]
    NoValidators,
    #[error("{0} attesters exceed the committee size limit")]
    TooManyAttesters(usize),
    #[error("BLS operation failed: {0:?}")]
    Bls(BLST_ERROR),
    #[error("epoch {0} leaves no room for {1:?} source and target epochs")]
    EpochTooEarly(u64, SlashingKind),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlashingKind {
    /// Two different votes for the same target epoch.
    #[default]
    DoubleVote,
    /// The first vote's source/target span strictly contains the second's.
    SurroundVote,
}

impl SlashingKind {
    /// Conflicting attestation data whose epochs end at or before `epoch`.
    pub fn conflicting_data(
        self,
        epoch: u64,
        slots_per_epoch: u64,
    ) -> Result<(AttestationData, AttestationData), CorpusError> {
        let vote = |source: u64, target: u64, block_root: u8| AttestationData {
            slot: Epoch(target).start_slot(slots_per_epoch),
            index: CommitteeIndex(0),
            beacon_block_root: Bytes32::from([block_root; 32]),
            source: Checkpoint::new(source, Bytes32::zero()),
            target: Checkpoint::new(target, Bytes32::from([0xaa; 32])),
        };

        let back = |distance: u64| {
            epoch
                .checked_sub(distance)
                .ok_or(CorpusError::EpochTooEarly(epoch, self))
        };

        Ok(match self {
            Self::DoubleVote => (vote(back(2)?, back(1)?, 1), vote(back(2)?, back(1)?, 2)),
            Self::SurroundVote => (vote(back(3)?, epoch, 1), vote(back(2)?, back(1)?, 1)),
        })
    }
}

/// Secret key derived from `index` alone.
pub fn interop_secret_key(index: u64) -> Result<SecretKey, CorpusError> {
    let mut ikm = [0u8; 32];
    ikm[..8].copy_from_slice(&index.to_le_bytes());
    ikm[8..16].copy_from_slice(b"beacfuzz");
    SecretKey::key_gen(&ikm, &[]).map_err(CorpusError::Bls)
}

pub fn secret_keys(count: usize) -> Result<Vec<SecretKey>, CorpusError> {
    (0..count as u64).map(interop_secret_key).collect()
}

/// Pre-state with one active, fully funded validator per key.
pub fn build_state(keys: &[SecretKey], preset: &Preset) -> State {
    let validators = keys
        .iter()
        .map(|key| Validator {
            pubkey: BlsPublicKey::from(key.sk_to_pk()),
            withdrawal_credentials: Bytes32::zero(),
            effective_balance: Gwei(preset.max_effective_balance),
            slashed: false,
            activation_eligibility_epoch: Epoch(0),
            activation_epoch: Epoch(0),
            exit_epoch: Epoch(FAR_FUTURE_EPOCH),
            withdrawable_epoch: Epoch(FAR_FUTURE_EPOCH),
        })
        .collect();

    State::generate_genesis_with_validators(
        0,
        Epoch(STATE_EPOCH).start_slot(preset.slots_per_epoch),
        validators,
    )
}

/// Indexed attestation over `data` by `indices`, signed with `keys` when given.
pub fn indexed_attestation(
    state: &State,
    indices: &[u64],
    data: AttestationData,
    keys: Option<&[SecretKey]>,
) -> Result<IndexedAttestation, CorpusError> {
    let attesting_indices = AttestingIndices::try_from_iter(indices.iter().copied().map(ValidatorIndex))
        .map_err(|_| CorpusError::TooManyAttesters(indices.len()))?;

    let signature = match keys {
        Some(keys) => {
            let domain = state.domain(DOMAIN_BEACON_ATTESTER, data.target.epoch);
            let signing_root = compute_signing_root(&data, domain);
            let signatures: Vec<Signature> = indices
                .iter()
                .filter_map(|&index| keys.get(index as usize))
                .map(|key| key.sign(signing_root.as_bytes(), BLS_DST, &[]))
                .collect();
            let refs: Vec<&Signature> = signatures.iter().collect();

            AggregateSignature::aggregate(&refs, true)
                .map(|aggregate| BlsSignature::from(aggregate.to_signature()))
                .map_err(CorpusError::Bls)?
        }
        None => BlsSignature::default(),
    };

    Ok(IndexedAttestation {
        attesting_indices,
        data,
        signature,
    })
}

/// A test case in which every one of `validators` validators commits `kind`.
pub fn build_test_case(
    validators: usize,
    kind: SlashingKind,
    signed: bool,
    preset: &Preset,
) -> Result<AttesterSlashingTestCase, CorpusError> {
    if validators == 0 {
        return Err(CorpusError::NoValidators);
    }
    if validators as u64 > MAX_VALIDATORS_PER_COMMITTEE {
        return Err(CorpusError::TooManyAttesters(validators));
    }

    let keys = secret_keys(validators)?;
    let pre = build_state(&keys, preset);
    let indices: Vec<u64> = (0..validators as u64).collect();
    let (data_1, data_2) = kind.conflicting_data(STATE_EPOCH, preset.slots_per_epoch)?;
    let signing_keys = signed.then_some(keys.as_slice());

    let attester_slashing = AttesterSlashing {
        attestation_1: indexed_attestation(&pre, &indices, data_1, signing_keys)?,
        attestation_2: indexed_attestation(&pre, &indices, data_2, signing_keys)?,
    };

    debug!(validators, ?kind, signed, "Built attester slashing test case");

    Ok(AttesterSlashingTestCase {
        pre,
        attester_slashing,
    })
}

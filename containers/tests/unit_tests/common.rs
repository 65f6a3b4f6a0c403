use blst::min_pk::{AggregateSignature, SecretKey, Signature};
use chain::{DOMAIN_BEACON_ATTESTER, FAR_FUTURE_EPOCH, MAINNET_PRESET};
use containers::{
    compute_signing_root, AttestationData, AttesterSlashing, AttestingIndices, BlsPublicKey,
    BlsSignature, Bytes32, Checkpoint, CommitteeIndex, Epoch, Gwei, IndexedAttestation, State,
    Validator, ValidatorIndex, BLS_DST,
};

pub const NUM_VALIDATORS: usize = 16;
pub const STATE_EPOCH: u64 = 4;
pub const MAX_EFFECTIVE_BALANCE: u64 = 32_000_000_000;
pub const SLASHING_PENALTY: u64 = MAX_EFFECTIVE_BALANCE / 128;
pub const WHISTLEBLOWER_REWARD: u64 = MAX_EFFECTIVE_BALANCE / 512;

pub fn secret_keys(count: usize) -> Vec<SecretKey> {
    (0..count as u64)
        .map(|i| {
            let mut ikm = [0u8; 32];
            ikm[..8].copy_from_slice(&(i + 1).to_le_bytes());
            SecretKey::key_gen(&ikm, &[]).unwrap()
        })
        .collect()
}

pub fn genesis_state(keys: &[SecretKey]) -> State {
    let validators = keys
        .iter()
        .map(|key| Validator {
            pubkey: BlsPublicKey::from(key.sk_to_pk()),
            withdrawal_credentials: Bytes32::zero(),
            effective_balance: Gwei(MAINNET_PRESET.max_effective_balance),
            slashed: false,
            activation_eligibility_epoch: Epoch(0),
            activation_epoch: Epoch(0),
            exit_epoch: Epoch(FAR_FUTURE_EPOCH),
            withdrawable_epoch: Epoch(FAR_FUTURE_EPOCH),
        })
        .collect();

    State::generate_genesis_with_validators(
        0,
        Epoch(STATE_EPOCH).start_slot(MAINNET_PRESET.slots_per_epoch),
        validators,
    )
}

pub fn attestation_data(source: u64, target: u64, block_root: u8) -> AttestationData {
    AttestationData {
        slot: Epoch(target).start_slot(MAINNET_PRESET.slots_per_epoch),
        index: CommitteeIndex(0),
        beacon_block_root: Bytes32::from([block_root; 32]),
        source: Checkpoint::new(source, Bytes32::zero()),
        target: Checkpoint::new(target, Bytes32::from([target as u8; 32])),
    }
}

pub fn attesting_indices(indices: &[u64]) -> AttestingIndices {
    AttestingIndices::try_from_iter(indices.iter().copied().map(ValidatorIndex)).unwrap()
}

/// Indexed attestation signed by `keys[i]` for every listed index.
pub fn signed_attestation(
    state: &State,
    keys: &[SecretKey],
    indices: &[u64],
    data: AttestationData,
) -> IndexedAttestation {
    let domain = state.domain(DOMAIN_BEACON_ATTESTER, data.target.epoch);
    let signing_root = compute_signing_root(&data, domain);

    let signatures: Vec<Signature> = indices
        .iter()
        .map(|&i| keys[i as usize].sign(signing_root.as_bytes(), BLS_DST, &[]))
        .collect();

    let signature = if signatures.is_empty() {
        BlsSignature::default()
    } else {
        let refs: Vec<&Signature> = signatures.iter().collect();
        BlsSignature::from(AggregateSignature::aggregate(&refs, true).unwrap().to_signature())
    };

    IndexedAttestation {
        attesting_indices: attesting_indices(indices),
        data,
        signature,
    }
}

pub fn unsigned_attestation(indices: &[u64], data: AttestationData) -> IndexedAttestation {
    IndexedAttestation {
        attesting_indices: attesting_indices(indices),
        data,
        signature: BlsSignature::default(),
    }
}

pub fn double_vote(state: &State, keys: &[SecretKey], indices: &[u64]) -> AttesterSlashing {
    AttesterSlashing {
        attestation_1: signed_attestation(state, keys, indices, attestation_data(2, 3, 1)),
        attestation_2: signed_attestation(state, keys, indices, attestation_data(2, 3, 2)),
    }
}

pub fn surround_vote(state: &State, keys: &[SecretKey], indices: &[u64]) -> AttesterSlashing {
    AttesterSlashing {
        attestation_1: signed_attestation(state, keys, indices, attestation_data(0, 3, 1)),
        attestation_2: signed_attestation(state, keys, indices, attestation_data(1, 2, 1)),
    }
}

pub fn total_balance(state: &State) -> u64 {
    (&state.balances).into_iter().map(|balance| balance.0).sum()
}

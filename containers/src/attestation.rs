use crate::types::MaxValidatorsPerCommittee;
use crate::{BlsSignature, Bytes32, Checkpoint, CommitteeIndex, Slot, ValidatorIndex};
use serde::{Deserialize, Serialize};
use ssz::{BitList, ContiguousList};
use ssz_derive::Ssz;

/// Sorted validator indices covered by an indexed attestation.
/// Limit is MAX_VALIDATORS_PER_COMMITTEE (2048).
pub type AttestingIndices = ContiguousList<ValidatorIndex, MaxValidatorsPerCommittee>;

/// Bitlist over the members of a committee.
pub type AggregationBits = BitList<MaxValidatorsPerCommittee>;

/// The vote an attester casts for a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ssz, Default, Serialize, Deserialize)]
pub struct AttestationData {
    pub slot: Slot,
    /// Committee index within the slot.
    pub index: CommitteeIndex,
    /// LMD GHOST vote.
    pub beacon_block_root: Bytes32,
    /// FFG source vote.
    pub source: Checkpoint,
    /// FFG target vote.
    pub target: Checkpoint,
}

/// Attestation whose signers are listed by validator index instead of a committee bitfield.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct IndexedAttestation {
    pub attesting_indices: AttestingIndices,
    pub data: AttestationData,
    /// Aggregate signature of every attester over the signing root of `data`.
    pub signature: BlsSignature,
}

/// Two conflicting attestations signed by an overlapping set of validators.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

/// Attestation included in a block, awaiting epoch processing.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct PendingAttestation {
    pub aggregation_bits: AggregationBits,
    pub data: AttestationData,
    pub inclusion_delay: Slot,
    pub proposer_index: ValidatorIndex,
}

/// Check if `data_1` and `data_2` are slashable according to Casper FFG rules.
///
/// Slashable pairs are either a double vote (distinct data for the same
/// target epoch) or a surround vote (the first attestation's source/target
/// span strictly surrounds the second's).
pub fn is_slashable_attestation_data(data_1: &AttestationData, data_2: &AttestationData) -> bool {
    let double_vote = data_1 != data_2 && data_1.target.epoch == data_2.target.epoch;
    let surround_vote =
        data_1.source.epoch < data_2.source.epoch && data_2.target.epoch < data_1.target.epoch;

    double_vote || surround_vote
}

use crate::attestation::PendingAttestation;
use crate::block::{BeaconBlockHeader, Eth1Data};
use crate::error::StateTransitionError;
use crate::fork::{compute_domain, Fork};
use crate::shuffling::compute_shuffled_index;
use crate::types::{
    hash, EpochsPerHistoricalVector, EpochsPerSlashingsVector, Eth1DataVotesBound,
    HistoricalRootsLimit, JustificationBitsLength, MaxPendingAttestations, SlotsPerHistoricalRoot,
    ValidatorRegistryLimit,
};
use crate::validator::Validator;
use crate::{Bytes32, Checkpoint, Epoch, Gwei, Slot, ValidatorIndex};
use chain::{DomainType, Preset, DOMAIN_BEACON_PROPOSER};
use ssz::{BitVector, PersistentList, PersistentVector};
use ssz_derive::Ssz;

pub type BlockRoots = PersistentVector<Bytes32, SlotsPerHistoricalRoot>;
pub type StateRoots = PersistentVector<Bytes32, SlotsPerHistoricalRoot>;
pub type HistoricalRoots = PersistentList<Bytes32, HistoricalRootsLimit>;
pub type Eth1DataVotes = PersistentList<Eth1Data, Eth1DataVotesBound>;
pub type Validators = PersistentList<Validator, ValidatorRegistryLimit>;
pub type Balances = PersistentList<Gwei, ValidatorRegistryLimit>;
pub type RandaoMixes = PersistentVector<Bytes32, EpochsPerHistoricalVector>;
pub type Slashings = PersistentVector<Gwei, EpochsPerSlashingsVector>;
pub type EpochAttestations = PersistentList<PendingAttestation, MaxPendingAttestations>;
pub type JustificationBits = BitVector<JustificationBitsLength>;

/// Phase0 beacon state. Field order is the SSZ wire order.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct State {
    // --- versioning ---
    pub genesis_time: u64,
    pub genesis_validators_root: Bytes32,
    pub slot: Slot,
    pub fork: Fork,

    // --- history ---
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: BlockRoots,
    pub state_roots: StateRoots,
    pub historical_roots: HistoricalRoots,

    // --- eth1 ---
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: Eth1DataVotes,
    pub eth1_deposit_index: u64,

    // --- registry ---
    pub validators: Validators,
    pub balances: Balances,

    // --- randomness ---
    pub randao_mixes: RandaoMixes,

    // --- slashings ---
    pub slashings: Slashings,

    // --- attestations ---
    pub previous_epoch_attestations: EpochAttestations,
    pub current_epoch_attestations: EpochAttestations,

    // --- finality ---
    pub justification_bits: JustificationBits,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl State {
    /// Build a state at `slot` whose registry holds `validators`, each with a
    /// balance equal to its effective balance.
    pub fn generate_genesis_with_validators(
        genesis_time: u64,
        slot: Slot,
        validators: Vec<Validator>,
    ) -> Self {
        let mut validator_list = Validators::default();
        let mut balances = Balances::default();
        for v in validators {
            balances
                .push(v.effective_balance)
                .expect("validator count within registry limit");
            validator_list
                .push(v)
                .expect("validator count within registry limit");
        }

        Self {
            genesis_time,
            genesis_validators_root: crate::block::hash_tree_root(&validator_list),
            slot,
            validators: validator_list,
            balances,
            ..Self::default()
        }
    }

    pub fn current_epoch(&self, preset: &Preset) -> Epoch {
        self.slot.epoch(preset.slots_per_epoch)
    }

    pub fn validator(&self, index: ValidatorIndex) -> Result<&Validator, StateTransitionError> {
        let length = self.validators.len_u64();
        self.validators
            .get(index.0)
            .map_err(|_| StateTransitionError::ValidatorIndexOutOfBounds { index, length })
    }

    pub fn validator_mut(
        &mut self,
        index: ValidatorIndex,
    ) -> Result<&mut Validator, StateTransitionError> {
        let length = self.validators.len_u64();
        self.validators
            .get_mut(index.0)
            .map_err(|_| StateTransitionError::ValidatorIndexOutOfBounds { index, length })
    }

    pub fn balance(&self, index: ValidatorIndex) -> Result<Gwei, StateTransitionError> {
        let length = self.balances.len_u64();
        self.balances
            .get(index.0)
            .copied()
            .map_err(|_| StateTransitionError::BalanceIndexOutOfBounds { index, length })
    }

    fn balance_mut(&mut self, index: ValidatorIndex) -> Result<&mut Gwei, StateTransitionError> {
        let length = self.balances.len_u64();
        self.balances
            .get_mut(index.0)
            .map_err(|_| StateTransitionError::BalanceIndexOutOfBounds { index, length })
    }

    pub fn increase_balance(
        &mut self,
        index: ValidatorIndex,
        delta: Gwei,
    ) -> Result<(), StateTransitionError> {
        let balance = self.balance_mut(index)?;
        balance.0 = balance
            .0
            .checked_add(delta.0)
            .ok_or(StateTransitionError::ArithmeticOverflow("balance increase"))?;
        Ok(())
    }

    /// Decrease a balance, saturating at zero.
    pub fn decrease_balance(
        &mut self,
        index: ValidatorIndex,
        delta: Gwei,
    ) -> Result<(), StateTransitionError> {
        let balance = self.balance_mut(index)?;
        balance.0 = balance.0.saturating_sub(delta.0);
        Ok(())
    }

    pub fn active_validator_indices(&self, epoch: Epoch) -> Vec<ValidatorIndex> {
        (&self.validators)
            .into_iter()
            .zip(0..)
            .filter(|(validator, _)| validator.is_active(epoch))
            .map(|(_, index)| ValidatorIndex(index))
            .collect()
    }

    pub fn validator_churn_limit(&self, preset: &Preset) -> u64 {
        let active = self.active_validator_indices(self.current_epoch(preset)).len() as u64;
        preset
            .min_per_epoch_churn_limit
            .max(active / preset.churn_limit_quotient)
    }

    /// RANDAO mix stored for `epoch` (modulo the history length).
    pub fn randao_mix(&self, epoch: Epoch) -> Bytes32 {
        *self.randao_mixes.mod_index(epoch.0)
    }

    pub fn seed(
        &self,
        epoch: Epoch,
        domain_type: DomainType,
        preset: &Preset,
    ) -> Result<[u8; 32], StateTransitionError> {
        // Reads the mix from MIN_SEED_LOOKAHEAD + 1 epochs ago without underflowing at genesis.
        let mix_epoch = epoch
            .checked_add(preset.epochs_per_historical_vector - preset.min_seed_lookahead - 1)
            .ok_or(StateTransitionError::ArithmeticOverflow("seed epoch"))?;
        let mix = self.randao_mix(mix_epoch);

        let mut preimage = Vec::with_capacity(44);
        preimage.extend_from_slice(&domain_type);
        preimage.extend_from_slice(&epoch.0.to_le_bytes());
        preimage.extend_from_slice(mix.as_bytes());
        Ok(hash(&preimage))
    }

    /// Signature domain for `domain_type` at `epoch`.
    pub fn domain(&self, domain_type: DomainType, epoch: Epoch) -> Bytes32 {
        compute_domain(
            domain_type,
            self.fork.version_at(epoch),
            self.genesis_validators_root,
        )
    }

    pub fn beacon_proposer_index(
        &self,
        preset: &Preset,
    ) -> Result<ValidatorIndex, StateTransitionError> {
        let epoch = self.current_epoch(preset);

        let mut preimage = self.seed(epoch, DOMAIN_BEACON_PROPOSER, preset)?.to_vec();
        preimage.extend_from_slice(&self.slot.0.to_le_bytes());
        let seed = hash(&preimage);

        let indices = self.active_validator_indices(epoch);
        self.compute_proposer_index(&indices, &seed, preset)
    }

    /// Sample a candidate from `indices`, weighted by effective balance.
    pub fn compute_proposer_index(
        &self,
        indices: &[ValidatorIndex],
        seed: &[u8; 32],
        preset: &Preset,
    ) -> Result<ValidatorIndex, StateTransitionError> {
        const MAX_RANDOM_BYTE: u64 = u8::MAX as u64;

        if indices.is_empty() {
            return Err(StateTransitionError::NoActiveValidators);
        }

        let total = indices.len() as u64;
        let mut preimage = [0u8; 40];
        preimage[..32].copy_from_slice(seed);

        let mut i: u64 = 0;
        loop {
            let shuffled = compute_shuffled_index(i % total, total, seed, preset.shuffle_round_count);
            let candidate_index = indices[shuffled as usize];

            preimage[32..].copy_from_slice(&(i / 32).to_le_bytes());
            let random_byte = u64::from(hash(&preimage)[(i % 32) as usize]);

            let effective_balance = self.validator(candidate_index)?.effective_balance.0;
            let weighted = effective_balance
                .checked_mul(MAX_RANDOM_BYTE)
                .ok_or(StateTransitionError::ArithmeticOverflow("proposer sampling weight"))?;
            let threshold = preset
                .max_effective_balance
                .checked_mul(random_byte)
                .ok_or(StateTransitionError::ArithmeticOverflow("proposer sampling threshold"))?;

            if weighted >= threshold {
                return Ok(candidate_index);
            }

            i = i
                .checked_add(1)
                .ok_or(StateTransitionError::ArithmeticOverflow("proposer sampling counter"))?;
        }
    }
}

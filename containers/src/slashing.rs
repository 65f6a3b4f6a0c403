use crate::attestation::{is_slashable_attestation_data, AttesterSlashing, IndexedAttestation};
use crate::config::TransitionConfig;
use crate::error::{IndexedAttestationError, StateTransitionError};
use crate::fork::compute_signing_root;
use crate::{BlsPublicKey, Epoch, Gwei, State, ValidatorIndex};
use chain::{Preset, DOMAIN_BEACON_ATTESTER};
use std::collections::BTreeSet;
use tracing::trace;

impl State {
    /// Apply an attester slashing, consuming the pre-state.
    ///
    /// Every validator in the intersection of both attesting sets that is
    /// still slashable gets slashed, with the block proposer as whistleblower.
    /// At least one validator must be slashed for the operation to be valid.
    pub fn process_attester_slashing(
        mut self,
        attester_slashing: &AttesterSlashing,
        config: &TransitionConfig,
    ) -> Result<Self, StateTransitionError> {
        let attestation_1 = &attester_slashing.attestation_1;
        let attestation_2 = &attester_slashing.attestation_2;

        if !is_slashable_attestation_data(&attestation_1.data, &attestation_2.data) {
            return Err(StateTransitionError::AttestationDataNotSlashable);
        }
        self.validate_indexed_attestation(attestation_1, config)?;
        self.validate_indexed_attestation(attestation_2, config)?;

        let indices_1: BTreeSet<ValidatorIndex> =
            attestation_1.attesting_indices.iter().copied().collect();
        let indices_2: BTreeSet<ValidatorIndex> =
            attestation_2.attesting_indices.iter().copied().collect();

        let current_epoch = self.current_epoch(&config.preset);
        let mut slashed_any = false;

        for &index in indices_1.intersection(&indices_2) {
            if self.validator(index)?.is_slashable(current_epoch) {
                self.slash_validator(index, None, &config.preset)?;
                slashed_any = true;
            }
        }

        if !slashed_any {
            return Err(StateTransitionError::NoValidatorSlashed);
        }

        Ok(self)
    }

    /// Indices must be non-empty, strictly increasing and registered; the
    /// aggregate signature must verify unless verification is disabled.
    pub fn validate_indexed_attestation(
        &self,
        indexed_attestation: &IndexedAttestation,
        config: &TransitionConfig,
    ) -> Result<(), StateTransitionError> {
        let indices = &indexed_attestation.attesting_indices;

        if indices.is_empty() {
            return Err(IndexedAttestationError::EmptyIndices.into());
        }
        if !indices.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(IndexedAttestationError::IndicesNotSortedOrUnique.into());
        }

        let public_keys = indices
            .iter()
            .map(|&index| self.validator(index).map(|validator| &validator.pubkey))
            .collect::<Result<Vec<&BlsPublicKey>, _>>()?;

        if !config.signature_verification.is_enabled() {
            return Ok(());
        }

        let data = &indexed_attestation.data;
        let domain = self.domain(DOMAIN_BEACON_ATTESTER, data.target.epoch);
        let signing_root = compute_signing_root(data, domain);

        if !indexed_attestation
            .signature
            .fast_aggregate_verify(&public_keys, signing_root.as_bytes())
        {
            return Err(IndexedAttestationError::InvalidSignature.into());
        }

        Ok(())
    }

    /// Slash `slashed_index`, rewarding the whistleblower (the proposer when `None`).
    pub fn slash_validator(
        &mut self,
        slashed_index: ValidatorIndex,
        whistleblower_index: Option<ValidatorIndex>,
        preset: &Preset,
    ) -> Result<(), StateTransitionError> {
        let epoch = self.current_epoch(preset);
        self.initiate_validator_exit(slashed_index, preset)?;

        let slashings_epoch = epoch
            .checked_add(preset.epochs_per_slashings_vector)
            .ok_or(StateTransitionError::ArithmeticOverflow("slashed withdrawable epoch"))?;

        let validator = self.validator_mut(slashed_index)?;
        validator.slashed = true;
        validator.withdrawable_epoch = validator.withdrawable_epoch.max(slashings_epoch);
        let effective_balance = validator.effective_balance;

        let slashed_total = self.slashings.mod_index_mut(epoch.0);
        slashed_total.0 = slashed_total
            .0
            .checked_add(effective_balance.0)
            .ok_or(StateTransitionError::ArithmeticOverflow("slashings total"))?;

        self.decrease_balance(
            slashed_index,
            Gwei(effective_balance.0 / preset.min_slashing_penalty_quotient),
        )?;

        let proposer_index = self.beacon_proposer_index(preset)?;
        let whistleblower_index = whistleblower_index.unwrap_or(proposer_index);
        let whistleblower_reward = effective_balance.0 / preset.whistleblower_reward_quotient;
        let proposer_reward = whistleblower_reward / preset.proposer_reward_quotient;

        self.increase_balance(proposer_index, Gwei(proposer_reward))?;
        self.increase_balance(
            whistleblower_index,
            Gwei(whistleblower_reward - proposer_reward),
        )?;

        trace!(
            validator_index = %slashed_index,
            %proposer_index,
            %epoch,
            penalty = effective_balance.0 / preset.min_slashing_penalty_quotient,
            "slashed validator"
        );

        Ok(())
    }

    /// Queue a validator for exit, respecting the per-epoch churn limit.
    pub fn initiate_validator_exit(
        &mut self,
        index: ValidatorIndex,
        preset: &Preset,
    ) -> Result<(), StateTransitionError> {
        if !self.validator(index)?.exit_epoch.is_far_future() {
            return Ok(());
        }

        let activation_exit_epoch = compute_activation_exit_epoch(self.current_epoch(preset), preset)?;
        let mut exit_queue_epoch = (&self.validators)
            .into_iter()
            .map(|validator| validator.exit_epoch)
            .filter(|exit_epoch| !exit_epoch.is_far_future())
            .fold(activation_exit_epoch, Epoch::max);

        let exit_queue_churn = (&self.validators)
            .into_iter()
            .filter(|validator| validator.exit_epoch == exit_queue_epoch)
            .count() as u64;

        if exit_queue_churn >= self.validator_churn_limit(preset) {
            exit_queue_epoch = exit_queue_epoch
                .checked_add(1)
                .ok_or(StateTransitionError::ArithmeticOverflow("exit queue epoch"))?;
        }

        let withdrawable_epoch = exit_queue_epoch
            .checked_add(preset.min_validator_withdrawability_delay)
            .ok_or(StateTransitionError::ArithmeticOverflow("withdrawable epoch"))?;

        let validator = self.validator_mut(index)?;
        validator.exit_epoch = exit_queue_epoch;
        validator.withdrawable_epoch = withdrawable_epoch;

        Ok(())
    }
}

/// Earliest epoch at which an activation or exit initiated in `epoch` takes effect.
pub fn compute_activation_exit_epoch(
    epoch: Epoch,
    preset: &Preset,
) -> Result<Epoch, StateTransitionError> {
    epoch
        .checked_add(1 + preset.max_seed_lookahead)
        .ok_or(StateTransitionError::ArithmeticOverflow("activation exit epoch"))
}

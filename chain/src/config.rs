pub type DomainType = [u8; 4];

pub const SLOTS_PER_EPOCH: u64 = 32;
// Collection bounds below are mirrored by the typenum aliases in `containers::types`.
pub const EPOCHS_PER_HISTORICAL_VECTOR: u64 = 1 << 16;
pub const EPOCHS_PER_SLASHINGS_VECTOR: u64 = 1 << 13;
pub const EPOCHS_PER_ETH1_VOTING_PERIOD: u64 = 64;
pub const MAX_VALIDATORS_PER_COMMITTEE: u64 = 1 << 11;
pub const MAX_ATTESTATIONS: u64 = 128;

pub const FAR_FUTURE_EPOCH: u64 = u64::MAX;

pub const DOMAIN_BEACON_PROPOSER: DomainType = [0x00, 0x00, 0x00, 0x00];
pub const DOMAIN_BEACON_ATTESTER: DomainType = [0x01, 0x00, 0x00, 0x00];

/// Scalar protocol constants consulted by the state transition.
///
/// Collection bounds are fixed by the container types; only arithmetic
/// constants live here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub slots_per_epoch: u64,
    pub epochs_per_historical_vector: u64,
    pub epochs_per_slashings_vector: u64,
    pub min_seed_lookahead: u64,
    pub max_seed_lookahead: u64,
    pub shuffle_round_count: u8,
    pub min_validator_withdrawability_delay: u64,
    pub min_per_epoch_churn_limit: u64,
    pub churn_limit_quotient: u64,
    pub max_effective_balance: u64,
    pub min_slashing_penalty_quotient: u64,
    pub whistleblower_reward_quotient: u64,
    pub proposer_reward_quotient: u64,
}

pub const MAINNET_PRESET: Preset = Preset {
    name: "mainnet",
    slots_per_epoch: SLOTS_PER_EPOCH,
    epochs_per_historical_vector: EPOCHS_PER_HISTORICAL_VECTOR,
    epochs_per_slashings_vector: EPOCHS_PER_SLASHINGS_VECTOR,
    min_seed_lookahead: 1,
    max_seed_lookahead: 4,
    shuffle_round_count: 90,
    min_validator_withdrawability_delay: 256,
    min_per_epoch_churn_limit: 4,
    churn_limit_quotient: 1 << 16,
    max_effective_balance: 32_000_000_000,
    min_slashing_penalty_quotient: 128,
    whistleblower_reward_quotient: 512,
    proposer_reward_quotient: 8,
};

impl Preset {
    /// Look up a preset by its configuration name.
    pub fn by_name(name: &str) -> Option<&'static Preset> {
        match name {
            "mainnet" => Some(&MAINNET_PRESET),
            _ => None,
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        MAINNET_PRESET
    }
}

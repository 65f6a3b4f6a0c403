//! Fuzzing entry point for phase0 attester slashing processing.
//!
//! Raw bytes are decoded as an [`AttesterSlashingTestCase`], the slashing is
//! applied to the pre-state, and the post-state comes back SSZ-encoded. Rule
//! violations are expected for fuzzed input and surface as
//! [`Outcome::Rejected`]; anything else is a [`HarnessError`].

pub mod config;
pub mod corpus;
pub mod driver;

use ssz::{ReadError, SszRead, SszWrite, WriteError};
use containers::{AttesterSlashing, ErrorKind, State, StateTransitionError, TransitionConfig};
use ssz_derive::Ssz;
use thiserror::Error;
use tracing::debug;

pub use config::{ConfigError, HarnessConfig};

/// The fuzzed input: a pre-state and the slashing to apply to it.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct AttesterSlashingTestCase {
    pub pre: State,
    pub attester_slashing: AttesterSlashing,
}

impl AttesterSlashingTestCase {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HarnessError> {
        Self::from_ssz(&(), bytes).map_err(HarnessError::Decode)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, HarnessError> {
        self.to_ssz().map_err(HarnessError::Encode)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// SSZ encoding of the post-state.
    Accepted(Vec<u8>),
    Rejected,
}

impl Outcome {
    pub fn into_option(self) -> Option<Vec<u8>> {
        match self {
            Self::Accepted(post) => Some(post),
            Self::Rejected => None,
        }
    }
}

/// Failures that must never be mistaken for a rejected input.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("input is not a valid test case: {0:?}")]
    Decode(ReadError),
    #[error("state transition failed: {0}")]
    StateTransition(StateTransitionError),
    #[error("failed to encode post-state: {0:?}")]
    Encode(WriteError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Clone, Debug, Default)]
pub struct Harness {
    context: TransitionConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self::with_context(config.transition_config()?))
    }

    pub fn with_context(context: TransitionConfig) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &TransitionConfig {
        &self.context
    }

    pub fn run_one(&self, input: &[u8]) -> Result<Outcome, HarnessError> {
        let AttesterSlashingTestCase {
            pre,
            attester_slashing,
        } = AttesterSlashingTestCase::from_bytes(input)?;

        self.apply(pre, &attester_slashing)
    }

    /// Apply a decoded slashing, classifying failures by kind.
    pub fn apply(
        &self,
        pre: State,
        attester_slashing: &AttesterSlashing,
    ) -> Result<Outcome, HarnessError> {
        match pre.process_attester_slashing(attester_slashing, &self.context) {
            Ok(post) => post
                .to_ssz()
                .map(Outcome::Accepted)
                .map_err(HarnessError::Encode),
            Err(error) => match error.kind() {
                ErrorKind::Rejection(rejection) => {
                    debug!(?rejection, %error, "Attester slashing rejected");
                    Ok(Outcome::Rejected)
                }
                ErrorKind::Fatal => Err(HarnessError::StateTransition(error)),
            },
        }
    }
}

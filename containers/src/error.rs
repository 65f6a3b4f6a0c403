use crate::ValidatorIndex;
use thiserror::Error;

/// Expected failure classes: the input is invalid, the rule set is not broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A consensus rule assertion did not hold.
    Assertion,
    /// An index named a validator or balance that does not exist.
    IndexOutOfBounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Rejection(Rejection),
    /// Anything else points at a bug and must not be swallowed.
    Fatal,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IndexedAttestationError {
    #[error("attesting indices are empty")]
    EmptyIndices,
    #[error("attesting indices are not sorted and unique")]
    IndicesNotSortedOrUnique,
    #[error("aggregate signature does not verify")]
    InvalidSignature,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateTransitionError {
    #[error("attestation data is neither a double vote nor a surround vote")]
    AttestationDataNotSlashable,
    #[error("invalid indexed attestation: {0}")]
    InvalidIndexedAttestation(#[from] IndexedAttestationError),
    #[error("no active validators to select a proposer from")]
    NoActiveValidators,
    #[error("no validator in the intersection was slashable")]
    NoValidatorSlashed,
    #[error("validator index {index} out of bounds (registry length {length})")]
    ValidatorIndexOutOfBounds { index: ValidatorIndex, length: u64 },
    #[error("balance index {index} out of bounds (balances length {length})")]
    BalanceIndexOutOfBounds { index: ValidatorIndex, length: u64 },
    #[error("arithmetic overflow computing {0}")]
    ArithmeticOverflow(&'static str),
}

impl StateTransitionError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AttestationDataNotSlashable
            | Self::InvalidIndexedAttestation(_)
            | Self::NoActiveValidators
            | Self::NoValidatorSlashed => ErrorKind::Rejection(Rejection::Assertion),
            Self::ValidatorIndexOutOfBounds { .. } | Self::BalanceIndexOutOfBounds { .. } => {
                ErrorKind::Rejection(Rejection::IndexOutOfBounds)
            }
            Self::ArithmeticOverflow(_) => ErrorKind::Fatal,
        }
    }

    pub const fn is_rejection(&self) -> bool {
        matches!(self.kind(), ErrorKind::Rejection(_))
    }
}

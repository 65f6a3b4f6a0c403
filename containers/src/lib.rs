pub mod types;
pub mod config;
pub mod slot;
pub mod checkpoint;
pub mod public_key;
pub mod signature;
pub mod validator;
pub mod attestation;
pub mod block;
pub mod fork;
pub mod shuffling;
pub mod error;
pub mod state;
pub mod slashing;

pub use attestation::{
    is_slashable_attestation_data, AttestationData, AttesterSlashing, AttestingIndices,
    IndexedAttestation, PendingAttestation,
};
pub use block::{hash_tree_root, BeaconBlockHeader, Eth1Data};
pub use checkpoint::Checkpoint;
pub use config::TransitionConfig;
pub use error::{ErrorKind, IndexedAttestationError, Rejection, StateTransitionError};
pub use fork::{compute_domain, compute_signing_root, Fork, ForkData, SigningData};
pub use public_key::BlsPublicKey;
pub use signature::{BlsSignature, SignatureVerification, BLS_DST};
pub use slot::{Epoch, Slot};
pub use state::State;
pub use types::{Bytes32, CommitteeIndex, Gwei, ValidatorIndex, Version};
pub use validator::Validator;
pub use ssz;

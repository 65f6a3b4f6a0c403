use crate::block::hash_tree_root;
use crate::{Bytes32, Epoch, Version};
use chain::DomainType;
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    /// Epoch of the latest fork.
    pub epoch: Epoch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Ssz, Default)]
pub struct ForkData {
    pub current_version: Version,
    pub genesis_validators_root: Bytes32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Ssz, Default)]
pub struct SigningData {
    pub object_root: Bytes32,
    pub domain: Bytes32,
}

impl Fork {
    /// Version in force at `epoch`.
    pub fn version_at(&self, epoch: Epoch) -> Version {
        if epoch < self.epoch {
            self.previous_version
        } else {
            self.current_version
        }
    }
}

pub fn compute_fork_data_root(current_version: Version, genesis_validators_root: Bytes32) -> Bytes32 {
    hash_tree_root(&ForkData {
        current_version,
        genesis_validators_root,
    })
}

/// Domain type followed by the first 28 bytes of the fork data root.
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: Version,
    genesis_validators_root: Bytes32,
) -> Bytes32 {
    let fork_data_root = compute_fork_data_root(fork_version, genesis_validators_root);

    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&domain_type);
    domain[4..].copy_from_slice(&fork_data_root.as_bytes()[..28]);
    Bytes32::from(domain)
}

pub fn compute_signing_root<T: ssz::SszHash>(object: &T, domain: Bytes32) -> Bytes32 {
    hash_tree_root(&SigningData {
        object_root: hash_tree_root(object),
        domain,
    })
}

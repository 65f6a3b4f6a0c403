use hex::FromHex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ssz::H256;
use ssz_derive::Ssz;
use std::fmt;
use std::str::FromStr;
use typenum::{U1099511627776, U16777216, U2048, U4, U4096, U65536, U8192};

pub type SlotsPerHistoricalRoot = U8192;
pub type HistoricalRootsLimit = U16777216;
/// `EPOCHS_PER_ETH1_VOTING_PERIOD * SLOTS_PER_EPOCH`
pub type Eth1DataVotesBound = U2048;
pub type ValidatorRegistryLimit = U1099511627776;
pub type EpochsPerHistoricalVector = U65536;
pub type EpochsPerSlashingsVector = U8192;
/// `MAX_ATTESTATIONS * SLOTS_PER_EPOCH`
pub type MaxPendingAttestations = U4096;
pub type MaxValidatorsPerCommittee = U2048;
pub type JustificationBitsLength = U4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct Bytes32(pub H256);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct ValidatorIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct CommitteeIndex(pub u64);

/// Amount in Gwei.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct Gwei(pub u64);

impl Bytes32 {
    pub fn zero() -> Self {
        Bytes32(H256::zero())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Bytes32(H256::from(bytes))
    }
}

impl FromStr for Bytes32 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes: [u8; 32] = <[u8; 32]>::from_hex(s)?;
        Ok(Bytes32(H256::from(bytes)))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl fmt::Display for ValidatorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 of `data`.
pub fn hash(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Merkleize a byte vector packed into 32-byte chunks.
pub(crate) fn merkleize_bytes(bytes: &[u8]) -> H256 {
    let mut layer: Vec<[u8; 32]> = bytes
        .chunks(32)
        .map(|chunk| {
            let mut padded = [0u8; 32];
            padded[..chunk.len()].copy_from_slice(chunk);
            padded
        })
        .collect();

    if layer.is_empty() {
        return H256::zero();
    }

    layer.resize(layer.len().next_power_of_two(), [0u8; 32]);

    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| {
                let mut hasher = Sha256::new();
                hasher.update(pair[0]);
                hasher.update(pair[1]);
                hasher.finalize().into()
            })
            .collect();
    }

    H256::from(layer[0])
}

/// Defines a fixed-length byte vector with SSZ and hex serde support.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Hash, Clone, Copy)]
        pub struct $name(pub [u8; $size]);

        impl $name {
            pub const SIZE: usize = $size;

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $size])
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ssz::ReadError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                if bytes.len() != $size {
                    return Err(ssz::ReadError::FixedSizeMismatch {
                        expected: $size,
                        actual: bytes.len(),
                    });
                }
                let mut inner = [0u8; $size];
                inner.copy_from_slice(bytes);
                Ok(Self(inner))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), hex::encode(self.0))
            }
        }

        impl ssz::SszSize for $name {
            const SIZE: ssz::Size = ssz::Size::Fixed { size: $size };
        }

        impl ssz::SszWrite for $name {
            fn write_fixed(&self, bytes: &mut [u8]) {
                bytes[..$size].copy_from_slice(&self.0);
            }

            fn write_variable(&self, bytes: &mut Vec<u8>) -> Result<(), ssz::WriteError> {
                bytes.extend_from_slice(&self.0);
                Ok(())
            }

            fn to_ssz(&self) -> Result<Vec<u8>, ssz::WriteError> {
                Ok(self.0.to_vec())
            }
        }

        impl<C> ssz::SszRead<C> for $name {
            fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ssz::ReadError> {
                Self::try_from(bytes)
            }

            fn from_ssz(context: &C, bytes: impl AsRef<[u8]>) -> Result<Self, ssz::ReadError> {
                Self::from_ssz_unchecked(context, bytes.as_ref())
            }
        }

        impl ssz::SszHash for $name {
            type PackingFactor = typenum::U1;

            fn hash_tree_root(&self) -> ssz::H256 {
                $crate::types::merkleize_bytes(&self.0)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                let bytes = hex::decode(s.trim_start_matches("0x"))
                    .map_err(serde::de::Error::custom)?;
                Self::try_from(bytes.as_slice())
                    .map_err(|e| serde::de::Error::custom(format!("{e:?}")))
            }
        }
    };
}

pub(crate) use fixed_bytes;

fixed_bytes!(
    /// Fork version.
    Version,
    4
);

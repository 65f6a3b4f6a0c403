use crate::public_key::BlsPublicKey;
use crate::types::fixed_bytes;
use blst::min_pk::{PublicKey, Signature};
use blst::BLST_ERROR;
use serde::{Deserialize, Serialize};

/// Ciphersuite tag of the proof-of-possession scheme used on the beacon chain.
pub const BLS_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

fixed_bytes!(
    /// Compressed BLS12-381 signature (G2 point).
    BlsSignature,
    96
);

/// Whether signature checks run or are treated as satisfied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureVerification {
    #[default]
    Enabled,
    Disabled,
}

impl SignatureVerification {
    pub fn from_bls_disabled(bls_disabled: bool) -> Self {
        if bls_disabled {
            Self::Disabled
        } else {
            Self::Enabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl BlsSignature {
    /// Decompress and check the point is in the G2 subgroup.
    pub fn decompress(&self) -> Result<Signature, BLST_ERROR> {
        Signature::sig_validate(&self.0, true)
    }

    /// `FastAggregateVerify`: every key signed the same `message`.
    ///
    /// Undecodable keys or signatures and an empty key set all yield `false`.
    pub fn fast_aggregate_verify(&self, public_keys: &[&BlsPublicKey], message: &[u8]) -> bool {
        if public_keys.is_empty() {
            return false;
        }

        let Ok(signature) = self.decompress() else {
            return false;
        };

        let Ok(keys) = public_keys
            .iter()
            .map(|key| key.decompress())
            .collect::<Result<Vec<PublicKey>, _>>()
        else {
            return false;
        };

        let keys: Vec<&PublicKey> = keys.iter().collect();

        signature.fast_aggregate_verify(false, message, BLS_DST, &keys) == BLST_ERROR::BLST_SUCCESS
    }
}

impl From<Signature> for BlsSignature {
    fn from(signature: Signature) -> Self {
        Self(signature.compress())
    }
}

use crate::types::fixed_bytes;
use blst::min_pk::PublicKey;
use blst::BLST_ERROR;

fixed_bytes!(
    /// Compressed BLS12-381 public key (G1 point).
    BlsPublicKey,
    48
);

impl BlsPublicKey {
    /// Decompress and run KeyValidate (subgroup and identity checks).
    pub fn decompress(&self) -> Result<PublicKey, BLST_ERROR> {
        PublicKey::key_validate(&self.0)
    }
}

impl From<PublicKey> for BlsPublicKey {
    fn from(public_key: PublicKey) -> Self {
        Self(public_key.compress())
    }
}

use crate::SignatureVerification;
use chain::{Preset, MAINNET_PRESET};

/// Inputs to the state transition that do not live in the state itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionConfig {
    pub preset: Preset,
    pub signature_verification: SignatureVerification,
}

impl TransitionConfig {
    pub fn new(preset: Preset, signature_verification: SignatureVerification) -> Self {
        Self {
            preset,
            signature_verification,
        }
    }

    pub fn mainnet(signature_verification: SignatureVerification) -> Self {
        Self::new(MAINNET_PRESET, signature_verification)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::mainnet(SignatureVerification::Enabled)
    }
}

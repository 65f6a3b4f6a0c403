use chain::Preset;
use containers::{SignatureVerification, TransitionConfig};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse harness config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}

/// Harness settings, usually read from a YAML file such as
///
/// ```yaml
/// preset: mainnet
/// bls_disabled: true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub preset: String,
    pub bls_disabled: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            preset: "mainnet".to_string(),
            bls_disabled: false,
        }
    }
}

impl HarnessConfig {
    pub fn new(bls_disabled: bool) -> Self {
        Self {
            bls_disabled,
            ..Self::default()
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: HarnessConfig = serde_yaml::from_reader(file)?;

        info!(
            path = %path.display(),
            preset = %config.preset,
            bls_disabled = config.bls_disabled,
            "Harness config loaded"
        );

        Ok(config)
    }

    pub fn signature_verification(&self) -> SignatureVerification {
        SignatureVerification::from_bls_disabled(self.bls_disabled)
    }

    /// Resolve the preset by name and build the state-transition context.
    pub fn transition_config(&self) -> Result<TransitionConfig, ConfigError> {
        let preset = Preset::by_name(&self.preset)
            .ok_or_else(|| ConfigError::UnknownPreset(self.preset.clone()))?;
        Ok(TransitionConfig::new(
            preset.clone(),
            self.signature_verification(),
        ))
    }
}

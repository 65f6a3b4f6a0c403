use anyhow::{anyhow, Context};
use containers::{Bytes32, SignatureVerification};
use serde::Deserialize;
use snap::raw::Decoder;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root of an unpacked consensus-spec-tests release.
pub fn vectors_root() -> PathBuf {
    std::env::var_os("CONSENSUS_SPEC_TESTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("consensus-spec-tests"))
}

pub fn phase0_dir(runner: &str, handler: &str) -> PathBuf {
    vectors_root()
        .join("tests/mainnet/phase0")
        .join(runner)
        .join(handler)
}

pub fn read_snappy_compressed(path: &Path) -> anyhow::Result<Vec<u8>> {
    let ssz_snappy =
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let mut decoder = Decoder::new();
    decoder
        .decompress_vec(&ssz_snappy)
        .map_err(|e| anyhow!("Failed to decompress: {:?}", e))
}

/// Sorted case directories below `dir`.
pub fn case_dirs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut cases = std::fs::read_dir(dir)
        .with_context(|| format!("missing test directory {}", dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    cases.retain(|path| path.is_dir());
    cases.sort();
    Ok(cases)
}

#[derive(Deserialize)]
struct Roots {
    root: String,
}

pub fn read_root(path: &Path) -> anyhow::Result<Bytes32> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let roots: Roots = serde_yaml::from_str(&content)?;
    Bytes32::from_str(&roots.root).map_err(|e| anyhow!("bad root {}: {:?}", roots.root, e))
}

#[derive(Default, Deserialize)]
struct Meta {
    #[serde(default)]
    bls_setting: u8,
}

/// `bls_setting: 2` in a case's `meta.yaml` means signatures are not checked.
pub fn signature_verification(case_dir: &Path) -> anyhow::Result<SignatureVerification> {
    let meta_path = case_dir.join("meta.yaml");
    let meta = if meta_path.exists() {
        serde_yaml::from_str(&std::fs::read_to_string(&meta_path)?)?
    } else {
        Meta::default()
    };
    Ok(SignatureVerification::from_bls_disabled(
        meta.bls_setting == 2,
    ))
}

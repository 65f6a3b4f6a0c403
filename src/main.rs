use anyhow::{bail, Context};
use chain::MAINNET_PRESET;
use clap::{Parser, Subcommand, ValueEnum};
use harness::corpus::{build_test_case, SlashingKind};
use harness::{Harness, HarnessConfig, Outcome};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "beacon-fuzz", about = "Attester slashing fuzz harness")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay inputs through the harness and report each outcome.
    Run {
        /// Treat every signature check as satisfied.
        #[arg(long)]
        bls_disabled: bool,

        /// YAML harness config; flags take precedence.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where accepted post-states are written as `<name>.post.ssz`.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Input files, or directories whose files are all replayed.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Write a valid seed input built from deterministic keys.
    Generate {
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = 16)]
        validators: usize,

        #[arg(long, value_enum, default_value_t = Kind::DoubleVote)]
        kind: Kind,

        /// Leave signatures empty; the seed then only passes with BLS disabled.
        #[arg(long)]
        unsigned: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    DoubleVote,
    SurroundVote,
}

impl From<Kind> for SlashingKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::DoubleVote => SlashingKind::DoubleVote,
            Kind::SurroundVote => SlashingKind::SurroundVote,
        }
    }
}

#[derive(Serialize)]
struct Summary {
    input: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_state_sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Run {
            bls_disabled,
            config,
            output_dir,
            inputs,
        } => run(bls_disabled, config, output_dir, &inputs),
        Command::Generate {
            output,
            validators,
            kind,
            unsigned,
        } => generate(&output, validators, kind.into(), unsigned),
    }
}

fn run(
    bls_disabled: bool,
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    inputs: &[PathBuf],
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => HarnessConfig::load_from_file(path)?,
        None => HarnessConfig::default(),
    };
    config.bls_disabled |= bls_disabled;

    let harness = Harness::new(config)?;
    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }

    let mut fatal = 0usize;
    for path in collect_inputs(inputs)? {
        let bytes = fs::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let summary = match harness.run_one(&bytes) {
            Ok(Outcome::Accepted(post)) => {
                info!(input = %path.display(), post_state_len = post.len(), "Accepted");
                if let Some(dir) = &output_dir {
                    let post_path = dir.join(format!("{name}.post.ssz"));
                    fs::write(&post_path, &post)
                        .with_context(|| format!("cannot write {}", post_path.display()))?;
                }
                Summary {
                    input: path.display().to_string(),
                    outcome: "accepted",
                    post_state_sha256: Some(hex::encode(containers::types::hash(&post))),
                    error: None,
                }
            }
            Ok(Outcome::Rejected) => {
                info!(input = %path.display(), "Rejected");
                Summary {
                    input: path.display().to_string(),
                    outcome: "rejected",
                    post_state_sha256: None,
                    error: None,
                }
            }
            Err(err) => {
                error!(input = %path.display(), error = %err, "Fatal harness error");
                fatal += 1;
                Summary {
                    input: path.display().to_string(),
                    outcome: "fatal",
                    post_state_sha256: None,
                    error: Some(err.to_string()),
                }
            }
        };

        println!("{}", serde_json::to_string(&summary)?);
    }

    if fatal > 0 {
        bail!("{fatal} input(s) failed fatally");
    }
    Ok(())
}

/// Files are taken as-is; directories contribute their files, one level deep.
fn collect_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = fs::read_dir(input)
                .with_context(|| format!("cannot list {}", input.display()))?
                .map(|entry| entry.map(|entry| entry.path()))
                .collect::<Result<Vec<_>, _>>()?;
            entries.retain(|path| path.is_file());
            entries.sort();
            files.extend(entries);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn generate(output: &Path, validators: usize, kind: SlashingKind, unsigned: bool) -> anyhow::Result<()> {
    let test_case = build_test_case(validators, kind, !unsigned, &MAINNET_PRESET)?;
    let bytes = test_case.to_bytes()?;

    // A seed must be accepted under the configuration it targets.
    let harness = Harness::new(HarnessConfig::new(unsigned))?;
    if !matches!(harness.run_one(&bytes)?, Outcome::Accepted(_)) {
        bail!("generated test case was rejected");
    }

    fs::write(output, &bytes).with_context(|| format!("cannot write {}", output.display()))?;
    info!(
        output = %output.display(),
        validators,
        ?kind,
        signed = !unsigned,
        size = bytes.len(),
        "Seed input written"
    );

    Ok(())
}

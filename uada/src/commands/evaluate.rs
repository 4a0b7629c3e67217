use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::info;
use uada_transaction_core::{OneShotNftPolicy, ValidationResult, Validator};
use uada_transaction_types::{PlutusData, ScriptContext};

use crate::config::Config;

/// Which validator to run
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValidatorKind {
    /// The one-shot NFT minting policy
    OneShotNft,
    /// The parameter auth NFT minting policy
    ParameterAuthNft,
    /// The uADA validator
    Uada,
}

/// A validator invocation as stored on disk.
///
/// Datum and redeemer are CBOR hex, the way they appear in transaction
/// witnesses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    pub context: ScriptContext,
    #[serde(default, with = "hex::serde")]
    pub datum: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub redeemer: Vec<u8>,
}

impl Invocation {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read invocation from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse invocation from {}", path.display()))
    }

    /// Run `kind` over this invocation. Decoding failures of the datum or
    /// redeemer bytes are errors; a rejected transaction is not.
    pub fn evaluate(&self, kind: ValidatorKind, config: &Config) -> Result<ValidationResult<()>> {
        let datum = if self.datum.is_empty() {
            None
        } else {
            Some(PlutusData::from_cbor(&self.datum).context("Datum is not valid CBOR")?)
        };
        let redeemer = PlutusData::from_cbor(&self.redeemer).context("Redeemer is not valid CBOR")?;

        let validator: Box<dyn Validator> = match kind {
            ValidatorKind::OneShotNft => Box::new(OneShotNftPolicy),
            ValidatorKind::ParameterAuthNft => Box::new(config.auth_nft_policy()),
            ValidatorKind::Uada => Box::new(config.uada_validator()),
        };
        Ok(validator.validate(datum.as_ref(), &redeemer, &self.context))
    }
}

/// Evaluate a validator against a JSON invocation file
pub fn run(config_path: &Path, kind: ValidatorKind, invocation_path: &Path) -> Result<()> {
    let invocation = Invocation::load(invocation_path)?;
    let config = Config::load(config_path)?;

    info!(?kind, purpose = ?invocation.context.purpose, "evaluating");
    match invocation.evaluate(kind, &config)? {
        Ok(()) => {
            println!("accepted");
            Ok(())
        }
        Err(err) => Err(anyhow!("rejected: {err}")),
    }
}

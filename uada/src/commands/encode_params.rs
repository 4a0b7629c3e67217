use anyhow::{Context, Result};
use std::path::Path;
use uada_transaction_types::ToPlutusData;

use crate::config::Config;

/// The fee parameter datum as CBOR hex, and its datum hash
pub fn encode(config: &Config) -> Result<(String, String)> {
    let datum = config.fee_params()?.to_plutus_data();
    let cbor = datum.to_cbor().context("Failed to encode fee params")?;
    let hash = datum.hash().context("Failed to hash fee params")?;
    Ok((hex::encode(cbor), hash.to_string()))
}

/// Print the fee parameter datum the admin publishes with the auth NFT
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let (cbor, hash) = encode(&config)?;
    println!("Datum: {cbor}");
    println!("Hash:  {hash}");
    Ok(())
}

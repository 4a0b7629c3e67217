use anyhow::{Context, Result};
use uada_transaction_core::one_shot_nft_name;
use uada_transaction_types::{TokenName, TxOutRef};

/// Derive the one-shot NFT name for the output `tx_id#index`
pub fn derive(tx_id: &str, index: u64) -> Result<TokenName> {
    let id = hex::decode(tx_id).context("Transaction id must be hex")?;
    Ok(one_shot_nft_name(&TxOutRef::new(id, index)))
}

/// Print the one-shot NFT name for a UTxO
pub fn run(tx_id: &str, index: u64) -> Result<()> {
    println!("{}", derive(tx_id, index)?);
    Ok(())
}

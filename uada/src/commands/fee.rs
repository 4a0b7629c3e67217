use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::Path;
use uada_transaction_core::{fee::is_collectable, UAdaFeeParams};

use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeeKind {
    Mint,
    Withdraw,
}

/// A fee quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub fee: i128,
    /// False if the fee is below the dust floor and need not be paid
    pub collected: bool,
}

pub fn quote(params: &UAdaFeeParams, kind: FeeKind, amount: i128) -> Quote {
    let fee = match kind {
        FeeKind::Mint => params.mint_fee(amount),
        FeeKind::Withdraw => params.withdrawal_fee(amount),
    };
    Quote {
        fee,
        collected: is_collectable(fee),
    }
}

/// Quote the treasury fee for minting or withdrawing `amount` lovelace
pub fn run(config_path: &Path, kind: FeeKind, amount: i128) -> Result<()> {
    if amount < 0 {
        bail!("Amount must not be negative");
    }
    let params = Config::load(config_path)?.fee_params()?;
    let fee_quote = quote(&params, kind, amount);

    println!("Fee: {} lovelace", fee_quote.fee);
    if !fee_quote.collected {
        println!("Below the dust floor: no treasury payment required");
    }
    Ok(())
}

// Copyright (c) 2024 Botho Foundation

//! Protocol constants.

/// Name of the receipt token minted under the uADA validator's own hash.
pub const RECEIPT_TOKEN_NAME: &[u8] = b"uADA";

/// Fees below this many lovelace are not collected: an output carrying less
/// than the ledger's minimum would be unspendable dust.
pub const FEE_DUST_THRESHOLD: i128 = 1_000_000;

/// Constructor index of the staking position datum.
pub const STAKING_POSITION_CONSTR: u64 = 1;

/// Constructor index of the fee parameter datum.
pub const FEE_PARAMS_CONSTR: u64 = 5;

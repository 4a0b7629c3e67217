// Copyright (c) 2024 Botho Foundation

//! uADA on-chain rules: the one-shot NFT policy, the parameter
//! authentication NFT policy, and the uADA supply and fee validator.
//!
//! Every validator is a pure predicate over a [`ScriptContext`]. Accepting
//! returns `Ok(())`; anything else is a [`ValidationError`] whose display text
//! is the diagnostic.

#![deny(missing_docs)]

pub mod constants;
pub mod fee;
pub mod records;
pub mod validation;

pub use crate::{
    fee::compute_fee,
    records::{UAdaFeeParams, UAdaRedeemer, UAdaStakingPosition},
    validation::{
        one_shot_nft_name, OneShotNftPolicy, ParameterAuthNftPolicy, UAdaValidator,
        ValidationError, ValidationResult, Validator,
    },
};

// Re-export the ledger types so that callers need a single dependency.
pub use uada_transaction_types::{self as types, ScriptContext};

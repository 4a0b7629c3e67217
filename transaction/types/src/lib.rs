// Copyright (c) 2024 Botho Foundation

//! Ledger types seen by uADA validators: values, addresses, datums and the
//! script context.

#![deny(missing_docs)]

pub mod address;
pub mod context;
pub mod datum;
pub mod interval;
pub mod plutus_data;
pub mod token;
pub mod tx_out_ref;
pub mod value;

pub use crate::{
    address::{Address, Credential, StakingCredential},
    context::{ScriptContext, ScriptPurpose, TxInInfo, TxInfo, TxOut},
    datum::OutputDatum,
    interval::{ExtendedPosixTime, LowerBound, PosixTime, PosixTimeRange, UpperBound},
    plutus_data::{DecodeError, FromPlutusData, PlutusData, ToPlutusData},
    token::{DatumHash, PolicyId, PubKeyHash, ScriptHash, Token, TokenName, TxId},
    tx_out_ref::TxOutRef,
    value::Value,
};
pub use uada_util_fraction::Fraction;

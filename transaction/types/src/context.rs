// Copyright (c) 2024 Botho Foundation

//! The script context: the view of a transaction a validator is run against.

use crate::{
    address::{Address, StakingCredential},
    datum::OutputDatum,
    interval::PosixTimeRange,
    plutus_data::{CborHex, PlutusData},
    token::{DatumHash, PolicyId, PubKeyHash, ScriptHash, TxId},
    tx_out_ref::TxOutRef,
    value::Value,
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::BTreeMap;

/// A transaction output.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TxOut {
    /// Where the output is paid to.
    pub address: Address,
    /// The assets it holds.
    pub value: Value,
    /// Its datum, if any.
    #[serde(default)]
    pub datum: OutputDatum,
    /// A reference script attached to the output.
    #[serde(default)]
    pub reference_script: Option<ScriptHash>,
}

impl TxOut {
    /// An output without datum or reference script.
    pub fn new(address: Address, value: Value) -> Self {
        Self {
            address,
            value,
            datum: OutputDatum::NoDatum,
            reference_script: None,
        }
    }

    /// Builder-style setter for the datum.
    pub fn with_datum(mut self, datum: OutputDatum) -> Self {
        self.datum = datum;
        self
    }
}

/// An input together with the output it spends.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TxInInfo {
    /// The spent output's reference.
    pub out_ref: TxOutRef,
    /// The spent output itself.
    pub resolved: TxOut,
}

/// Everything a validator may inspect about the transaction.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TxInfo {
    /// Consumed inputs, in ledger order.
    pub inputs: Vec<TxInInfo>,
    /// Inputs that are read but not consumed.
    #[serde(default)]
    pub reference_inputs: Vec<TxInInfo>,
    /// Produced outputs.
    pub outputs: Vec<TxOut>,
    /// The transaction fee.
    #[serde(default)]
    pub fee: Value,
    /// Minted (positive) and burned (negative) assets.
    #[serde(default)]
    pub mint: Value,
    /// Reward withdrawals per staking credential.
    #[serde_as(as = "Vec<(_, _)>")]
    #[serde(default)]
    pub withdrawals: BTreeMap<StakingCredential, i128>,
    /// When the transaction may be included.
    #[serde(default)]
    pub valid_range: PosixTimeRange,
    /// Key hashes that signed the transaction.
    #[serde(default)]
    pub signatories: Vec<PubKeyHash>,
    /// Datums supplied in the witness set, by hash.
    #[serde_as(as = "BTreeMap<_, CborHex>")]
    #[serde(default)]
    pub data: BTreeMap<DatumHash, PlutusData>,
    /// The transaction id.
    #[serde(default)]
    pub id: TxId,
}

impl TxInfo {
    /// The consumed input with the given reference.
    pub fn find_input(&self, out_ref: &TxOutRef) -> Option<&TxInInfo> {
        self.inputs.iter().find(|input| &input.out_ref == out_ref)
    }

    /// The datum of an output: inline, or looked up by hash among the
    /// witness datums.
    pub fn resolve_datum<'a>(&'a self, output: &'a TxOut) -> Option<&'a PlutusData> {
        match &output.datum {
            OutputDatum::Inline(datum) => Some(datum),
            OutputDatum::DatumHash(hash) => self.data.get(hash),
            OutputDatum::NoDatum => None,
        }
    }

    /// The index `out_ref` will have once the ledger sorts the inputs.
    /// Redeemer indices refer to that order.
    pub fn sorted_input_index(&self, out_ref: &TxOutRef) -> Option<usize> {
        self.find_input(out_ref)?;
        Some(
            self.inputs
                .iter()
                .filter(|input| &input.out_ref < out_ref)
                .count(),
        )
    }

    /// True if `key` signed the transaction.
    pub fn is_signed_by(&self, key: &PubKeyHash) -> bool {
        self.signatories.contains(key)
    }

    /// True if the transaction withdraws from `credential`, in any amount.
    pub fn has_withdrawal(&self, credential: &StakingCredential) -> bool {
        self.withdrawals.contains_key(credential)
    }
}

/// Why a script is being run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPurpose {
    /// Minting or burning under the given policy.
    Minting(PolicyId),
    /// Spending the given output.
    Spending(TxOutRef),
    /// Withdrawing rewards from the given staking credential.
    Rewarding(StakingCredential),
}

/// A transaction together with the reason the script runs.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScriptContext {
    /// The transaction.
    pub tx_info: TxInfo,
    /// The purpose of this invocation.
    pub purpose: ScriptPurpose,
}

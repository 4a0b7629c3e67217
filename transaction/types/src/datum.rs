// Copyright (c) 2024 Botho Foundation

//! The datum attached to a transaction output.

use crate::{
    plutus_data::{CborHex, DecodeError, FromPlutusData, PlutusData, ToPlutusData},
    token::DatumHash,
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// What an output carries in its datum slot.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputDatum {
    /// No datum.
    #[default]
    NoDatum,
    /// The hash of a datum supplied in the transaction witnesses.
    DatumHash(DatumHash),
    /// The datum itself.
    Inline(#[serde_as(as = "CborHex")] PlutusData),
}

impl ToPlutusData for OutputDatum {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            Self::NoDatum => PlutusData::unit(0),
            Self::DatumHash(hash) => PlutusData::Constr(1, vec![PlutusData::Bytes(hash.0.clone())]),
            Self::Inline(datum) => PlutusData::Constr(2, vec![datum.clone()]),
        }
    }
}

impl FromPlutusData for OutputDatum {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        match data.as_constr()? {
            (0, []) => Ok(Self::NoDatum),
            (1, [hash]) => Ok(Self::DatumHash(hash.as_bytes()?.into())),
            (2, [datum]) => Ok(Self::Inline(datum.clone())),
            _ => Err(DecodeError::UnexpectedShape("an output datum")),
        }
    }
}

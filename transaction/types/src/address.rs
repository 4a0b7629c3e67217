// Copyright (c) 2024 Botho Foundation

//! Addresses and the credentials they are built from.

use crate::{
    plutus_data::{DecodeError, FromPlutusData, PlutusData, ToPlutusData},
    token::{PubKeyHash, ScriptHash},
};
use serde::{Deserialize, Serialize};

/// A payment or staking credential.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Credential {
    /// Controlled by a verification key.
    PubKey(PubKeyHash),
    /// Controlled by a script.
    Script(ScriptHash),
}

impl Credential {
    /// The key or script hash, without the discriminant.
    pub fn hash_bytes(&self) -> &[u8] {
        match self {
            Self::PubKey(hash) => hash.as_ref(),
            Self::Script(hash) => hash.as_ref(),
        }
    }

    /// The script hash, if this is a script credential.
    pub fn script_hash(&self) -> Option<&ScriptHash> {
        match self {
            Self::Script(hash) => Some(hash),
            Self::PubKey(_) => None,
        }
    }
}

/// How an address delegates its stake.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StakingCredential {
    /// Delegation by credential.
    Hash(Credential),
    /// Delegation through a certificate pointer.
    Pointer {
        /// Slot of the registering certificate
        slot: i128,
        /// Transaction index within the slot
        tx_index: i128,
        /// Certificate index within the transaction
        cert_index: i128,
    },
}

impl StakingCredential {
    /// The staking credential of a script's reward account.
    pub fn script(hash: impl Into<ScriptHash>) -> Self {
        Self::Hash(Credential::Script(hash.into()))
    }
}

/// A shelley address.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Address {
    /// Who may spend outputs at this address.
    pub payment_credential: Credential,
    /// Where the stake of outputs at this address is delegated.
    #[serde(default)]
    pub staking_credential: Option<StakingCredential>,
}

impl Address {
    /// An enterprise address (no staking part) locked by a script.
    pub fn script(hash: impl Into<ScriptHash>) -> Self {
        Self {
            payment_credential: Credential::Script(hash.into()),
            staking_credential: None,
        }
    }

    /// An address owned by a verification key, with an optional stake key.
    pub fn pub_key(payment: impl Into<PubKeyHash>, stake: Option<PubKeyHash>) -> Self {
        Self {
            payment_credential: Credential::PubKey(payment.into()),
            staking_credential: stake.map(|key| StakingCredential::Hash(Credential::PubKey(key))),
        }
    }
}

impl ToPlutusData for Credential {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            Self::PubKey(hash) => PlutusData::Constr(0, vec![PlutusData::Bytes(hash.0.clone())]),
            Self::Script(hash) => PlutusData::Constr(1, vec![PlutusData::Bytes(hash.0.clone())]),
        }
    }
}

impl FromPlutusData for Credential {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        match data.as_constr()? {
            (0, [hash]) => Ok(Self::PubKey(hash.as_bytes()?.into())),
            (1, [hash]) => Ok(Self::Script(hash.as_bytes()?.into())),
            _ => Err(DecodeError::UnexpectedShape("a credential")),
        }
    }
}

impl ToPlutusData for StakingCredential {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            Self::Hash(cred) => PlutusData::Constr(0, vec![cred.to_plutus_data()]),
            Self::Pointer {
                slot,
                tx_index,
                cert_index,
            } => PlutusData::Constr(
                1,
                vec![
                    PlutusData::Int(*slot),
                    PlutusData::Int(*tx_index),
                    PlutusData::Int(*cert_index),
                ],
            ),
        }
    }
}

impl FromPlutusData for StakingCredential {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        match data.as_constr()? {
            (0, [cred]) => Ok(Self::Hash(Credential::from_plutus_data(cred)?)),
            (1, [slot, tx_index, cert_index]) => Ok(Self::Pointer {
                slot: slot.as_int()?,
                tx_index: tx_index.as_int()?,
                cert_index: cert_index.as_int()?,
            }),
            _ => Err(DecodeError::UnexpectedShape("a staking credential")),
        }
    }
}

impl ToPlutusData for Address {
    fn to_plutus_data(&self) -> PlutusData {
        let staking = match &self.staking_credential {
            Some(cred) => PlutusData::Constr(0, vec![cred.to_plutus_data()]),
            None => PlutusData::unit(1),
        };
        PlutusData::Constr(0, vec![self.payment_credential.to_plutus_data(), staking])
    }
}

impl FromPlutusData for Address {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let fields = data.fields_of(0, 2)?;
        let staking_credential = match fields[1].as_constr()? {
            (0, [cred]) => Some(StakingCredential::from_plutus_data(cred)?),
            (1, []) => None,
            _ => return Err(DecodeError::UnexpectedShape("an optional staking credential")),
        };
        Ok(Self {
            payment_credential: Credential::from_plutus_data(&fields[0])?,
            staking_credential,
        })
    }
}

// Copyright (c) 2024 Botho Foundation

//! Datums and redeemers understood by the uADA validators.

use crate::constants::{FEE_PARAMS_CONSTR, STAKING_POSITION_CONSTR};
use uada_transaction_types::{
    plutus_data::{optional_from_plutus_data, optional_to_plutus_data},
    Address, DecodeError, Fraction, FromPlutusData, OutputDatum, PlutusData, PolicyId,
    ToPlutusData, Token, TokenName,
};

/// A position of locked ADA. Whoever holds the named token may unlock it.
///
/// A partial withdrawal destroys the position and creates a new one; the
/// record itself is never updated in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UAdaStakingPosition {
    /// Policy of the token that unlocks the position.
    pub policy_id: PolicyId,
    /// Name of the token that unlocks the position.
    pub token_name: TokenName,
}

impl UAdaStakingPosition {
    /// The token that unlocks this position.
    pub fn token(&self) -> Token {
        Token::new(self.policy_id.clone(), self.token_name.clone())
    }
}

impl ToPlutusData for UAdaStakingPosition {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::Constr(
            STAKING_POSITION_CONSTR,
            vec![
                PlutusData::Bytes(self.policy_id.0.clone()),
                PlutusData::Bytes(self.token_name.0.clone()),
            ],
        )
    }
}

impl FromPlutusData for UAdaStakingPosition {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let fields = data.fields_of(STAKING_POSITION_CONSTR, 2)?;
        Ok(Self {
            policy_id: fields[0].as_bytes()?.into(),
            token_name: fields[1].as_bytes()?.into(),
        })
    }
}

/// Fee schedule of the protocol, published by the admin in an output that
/// holds the parameter authentication NFT.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UAdaFeeParams {
    /// Minimum fee on mint, in lovelace.
    pub mint_fee_min: i128,
    /// Proportional fee on mint.
    pub mint_fee_percent: Option<Fraction>,
    /// Minimum fee on withdrawal, in lovelace.
    pub withdrawal_fee_min: i128,
    /// Proportional fee on withdrawal.
    pub withdrawal_fee_percent: Option<Fraction>,
    /// Where fees are paid.
    pub treasury_address: Address,
    /// The datum a fee output must carry.
    pub treasury_out_datum: OutputDatum,
}

impl ToPlutusData for UAdaFeeParams {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::Constr(
            FEE_PARAMS_CONSTR,
            vec![
                PlutusData::Int(self.mint_fee_min),
                optional_to_plutus_data(&self.mint_fee_percent),
                PlutusData::Int(self.withdrawal_fee_min),
                optional_to_plutus_data(&self.withdrawal_fee_percent),
                self.treasury_address.to_plutus_data(),
                self.treasury_out_datum.to_plutus_data(),
            ],
        )
    }
}

impl FromPlutusData for UAdaFeeParams {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let fields = data.fields_of(FEE_PARAMS_CONSTR, 6)?;
        Ok(Self {
            mint_fee_min: fields[0].as_int()?,
            mint_fee_percent: optional_from_plutus_data(&fields[1])?,
            withdrawal_fee_min: fields[2].as_int()?,
            withdrawal_fee_percent: optional_from_plutus_data(&fields[3])?,
            treasury_address: Address::from_plutus_data(&fields[4])?,
            treasury_out_datum: OutputDatum::from_plutus_data(&fields[5])?,
        })
    }
}

/// Redeemers of the uADA validator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UAdaRedeemer {
    /// No payload. Used when minting.
    Nothing,
    /// Unlock a staking position. The unique NFT named by the position's
    /// datum is held by the input at the given index.
    WithdrawUAdaStakingPosition {
        /// Index into the transaction inputs
        unique_nft_input_index: i128,
    },
    /// Check the supply invariant and fee payment from the reward hook.
    ContractInteraction {
        /// Index into the reference inputs of the fee parameters
        parameter_auth_nft_ref_utxo_index: i128,
        /// Index into the outputs of the treasury payment
        treasury_payout_tx_out_index: i128,
    },
}

impl ToPlutusData for UAdaRedeemer {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            Self::Nothing => PlutusData::unit(0),
            Self::WithdrawUAdaStakingPosition {
                unique_nft_input_index,
            } => PlutusData::Constr(1, vec![PlutusData::Int(*unique_nft_input_index)]),
            Self::ContractInteraction {
                parameter_auth_nft_ref_utxo_index,
                treasury_payout_tx_out_index,
            } => PlutusData::Constr(
                2,
                vec![
                    PlutusData::Int(*parameter_auth_nft_ref_utxo_index),
                    PlutusData::Int(*treasury_payout_tx_out_index),
                ],
            ),
        }
    }
}

impl FromPlutusData for UAdaRedeemer {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        match data.as_constr()? {
            (0, []) => Ok(Self::Nothing),
            (1, [index]) => Ok(Self::WithdrawUAdaStakingPosition {
                unique_nft_input_index: index.as_int()?,
            }),
            (2, [params, payout]) => Ok(Self::ContractInteraction {
                parameter_auth_nft_ref_utxo_index: params.as_int()?,
                treasury_payout_tx_out_index: payout.as_int()?,
            }),
            _ => Err(DecodeError::UnexpectedShape("a uADA redeemer")),
        }
    }
}

// Copyright (c) 2024 Botho Foundation

//! The uADA validator.
//!
//! One script serves as minting policy of the receipt token, as spending
//! validator of the locked positions, and as the staking validator whose
//! reward withdrawal enforces the circulating supply invariant. Minting and
//! spending only require that the withdrawal runs; the withdrawal does the
//! accounting.

use super::{
    lookup, own_script_hash, token_present_in_output, validate_mint_exactly,
    validate_withdrawal_invoked, ValidationError, ValidationResult, Validator,
};
use crate::{
    constants::RECEIPT_TOKEN_NAME,
    fee::is_collectable,
    records::{UAdaFeeParams, UAdaRedeemer, UAdaStakingPosition},
};
use tracing::debug;
use uada_transaction_types::{
    plutus_data::optional_from_plutus_data, Credential, FromPlutusData, PlutusData, PolicyId,
    ScriptContext, ScriptHash, ScriptPurpose, Token, TokenName, TxInfo, TxOut,
};

/// The uADA validator, parameterized by the policy of the NFT that
/// authenticates the fee parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UAdaValidator {
    /// Policy of the parameter authentication NFT.
    pub parameter_auth_nft_policy_id: PolicyId,
}

impl UAdaValidator {
    /// Create the validator for a deployment.
    pub fn new(parameter_auth_nft_policy_id: impl Into<PolicyId>) -> Self {
        Self {
            parameter_auth_nft_policy_id: parameter_auth_nft_policy_id.into(),
        }
    }

    /// Check an invocation with an already decoded datum and redeemer.
    pub fn validate_typed(
        &self,
        datum: Option<&UAdaStakingPosition>,
        redeemer: &UAdaRedeemer,
        ctx: &ScriptContext,
    ) -> ValidationResult<()> {
        let own_hash = own_script_hash(ctx)?;

        match (&ctx.purpose, datum, redeemer) {
            (ScriptPurpose::Minting(_), _, _) => validate_withdrawal_invoked(&own_hash, ctx),
            (
                ScriptPurpose::Spending(_),
                Some(position),
                UAdaRedeemer::WithdrawUAdaStakingPosition {
                    unique_nft_input_index,
                },
            ) => {
                validate_withdrawal_invoked(&own_hash, ctx)?;
                let spent = lookup(
                    &ctx.tx_info.inputs,
                    *unique_nft_input_index,
                    ValidationError::InputIndexOutOfRange,
                )?;
                if token_present_in_output(&position.token(), &spent.resolved) {
                    Ok(())
                } else {
                    Err(ValidationError::UniqueNftMissing)
                }
            }
            (
                ScriptPurpose::Rewarding(_),
                _,
                UAdaRedeemer::ContractInteraction {
                    parameter_auth_nft_ref_utxo_index,
                    treasury_payout_tx_out_index,
                },
            ) => self.validate_contract_interaction(
                &own_hash,
                *parameter_auth_nft_ref_utxo_index,
                *treasury_payout_tx_out_index,
                &ctx.tx_info,
            ),
            _ => Err(ValidationError::InvalidInvocation),
        }
    }

    fn validate_contract_interaction(
        &self,
        own_hash: &ScriptHash,
        params_index: i128,
        payout_index: i128,
        tx_info: &TxInfo,
    ) -> ValidationResult<()> {
        let own_credential = Credential::Script(own_hash.clone());
        let unlocked = lovelace_at(
            tx_info.inputs.iter().map(|input| &input.resolved),
            &own_credential,
        );
        let locked = lovelace_at(tx_info.outputs.iter(), &own_credential);
        let expected_mint = locked.saturating_sub(unlocked);
        debug!(%own_hash, locked, unlocked, expected_mint, "checking uADA supply");

        let own_policy = PolicyId::from(own_hash);
        validate_mint_exactly(
            &tx_info.mint,
            expected_mint,
            &own_policy,
            &TokenName::from(RECEIPT_TOKEN_NAME),
        )?;

        let params = self.fee_params(params_index, tx_info)?;
        if expected_mint == 0 {
            return Ok(());
        }

        let fee = params.fee_for_supply_change(expected_mint);
        debug!(fee, "checking treasury payout");
        if !is_collectable(fee) {
            return Ok(());
        }

        let payout = lookup(
            &tx_info.outputs,
            payout_index,
            ValidationError::OutputIndexOutOfRange,
        )?;
        validate_treasury_payout(payout, &params, fee)
    }

    /// The fee parameters, read from the reference input that holds the
    /// parameter authentication NFT.
    fn fee_params(&self, index: i128, tx_info: &TxInfo) -> ValidationResult<UAdaFeeParams> {
        let params_input = lookup(
            &tx_info.reference_inputs,
            index,
            ValidationError::ReferenceInputIndexOutOfRange,
        )?;
        let auth_nft = Token::new(self.parameter_auth_nft_policy_id.clone(), TokenName::empty());
        if !token_present_in_output(&auth_nft, &params_input.resolved) {
            return Err(ValidationError::AuthNftMissing);
        }
        let datum = tx_info
            .resolve_datum(&params_input.resolved)
            .ok_or(ValidationError::MissingDatum)?;
        UAdaFeeParams::from_plutus_data(datum).map_err(ValidationError::MalformedDatum)
    }
}

fn lovelace_at<'a>(outputs: impl Iterator<Item = &'a TxOut>, credential: &Credential) -> i128 {
    outputs
        .filter(|output| &output.address.payment_credential == credential)
        .fold(0i128, |total, output| total.saturating_add(output.value.lovelace()))
}

fn validate_treasury_payout(
    payout: &TxOut,
    params: &UAdaFeeParams,
    fee: i128,
) -> ValidationResult<()> {
    if payout.address != params.treasury_address {
        return Err(ValidationError::FeeNotPaidToTreasury);
    }
    if payout.datum != params.treasury_out_datum {
        return Err(ValidationError::WrongPayoutDatum);
    }
    let paid = payout.value.lovelace();
    if paid < fee {
        return Err(ValidationError::InsufficientFee {
            expected: fee,
            found: paid,
        });
    }
    Ok(())
}

impl Validator for UAdaValidator {
    fn validate(
        &self,
        datum: Option<&PlutusData>,
        redeemer: &PlutusData,
        ctx: &ScriptContext,
    ) -> ValidationResult<()> {
        let position = match datum {
            Some(data) => optional_from_plutus_data::<UAdaStakingPosition>(data)
                .map_err(ValidationError::MalformedDatum)?,
            None => None,
        };
        let redeemer =
            UAdaRedeemer::from_plutus_data(redeemer).map_err(ValidationError::MalformedRedeemer)?;
        self.validate_typed(position.as_ref(), &redeemer, ctx)
            .inspect_err(|err| {
                debug!(%err, purpose = ?ctx.purpose, "uADA validator rejected transaction")
            })
    }
}

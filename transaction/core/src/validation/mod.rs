// Copyright (c) 2024 Botho Foundation

//! Validators for the uADA protocol and the checks they share.

mod auth_nft;
mod error;
mod one_shot;
mod uada;

pub use self::{
    auth_nft::ParameterAuthNftPolicy,
    error::{ValidationError, ValidationResult},
    one_shot::{one_shot_nft_name, OneShotNftPolicy},
    uada::UAdaValidator,
};

use uada_transaction_types::{
    Credential, PlutusData, PolicyId, ScriptContext, ScriptHash, ScriptPurpose,
    StakingCredential, Token, TokenName, TxOut, Value,
};

/// A script that accepts or rejects a transaction.
///
/// Deployment parameters are fields of the implementing type. Implementations
/// are pure: the same arguments always give the same answer.
pub trait Validator: Send + Sync {
    /// Run the script.
    ///
    /// # Arguments
    /// * `datum` - The datum of the spent output, for spending purposes.
    /// * `redeemer` - The redeemer supplied by the transaction.
    /// * `ctx` - The transaction and the purpose of this invocation.
    fn validate(
        &self,
        datum: Option<&PlutusData>,
        redeemer: &PlutusData,
        ctx: &ScriptContext,
    ) -> ValidationResult<()>;
}

/// The policy id of a minting invocation.
pub fn validate_minting_purpose(ctx: &ScriptContext) -> ValidationResult<&PolicyId> {
    match &ctx.purpose {
        ScriptPurpose::Minting(policy_id) => Ok(policy_id),
        _ => Err(ValidationError::NotMintingPurpose),
    }
}

/// The hash of the running script, derived from the invocation purpose.
pub fn own_script_hash(ctx: &ScriptContext) -> ValidationResult<ScriptHash> {
    match &ctx.purpose {
        ScriptPurpose::Minting(policy_id) => Ok(policy_id.clone().into()),
        ScriptPurpose::Spending(out_ref) => {
            let own_input = ctx
                .tx_info
                .find_input(out_ref)
                .ok_or_else(|| ValidationError::OwnInputNotFound(out_ref.clone()))?;
            Ok(own_input
                .resolved
                .address
                .payment_credential
                .hash_bytes()
                .into())
        }
        ScriptPurpose::Rewarding(StakingCredential::Hash(credential)) => {
            Ok(credential.hash_bytes().into())
        }
        ScriptPurpose::Rewarding(StakingCredential::Pointer { .. }) => {
            Err(ValidationError::StakingPointerNotSupported)
        }
    }
}

/// The mint field must hold exactly `amount` of `token_name` under
/// `policy_id` and nothing else under that policy.
pub fn validate_mint_exactly(
    mint: &Value,
    amount: i128,
    policy_id: &PolicyId,
    token_name: &TokenName,
) -> ValidationResult<()> {
    let found = mint.amount_of(policy_id, token_name);
    if found != amount {
        return Err(ValidationError::WrongMintAmount {
            token_name: token_name.clone(),
            expected: amount,
            found,
        });
    }
    if let Some((other, _)) = mint.tokens_of(policy_id).find(|(name, _)| *name != token_name) {
        return Err(ValidationError::UnexpectedTokenMinted(other.clone()));
    }
    Ok(())
}

/// The withdrawal map must name the script's own reward account, which is
/// what runs the supply check.
pub fn validate_withdrawal_invoked(
    own_script_hash: &ScriptHash,
    ctx: &ScriptContext,
) -> ValidationResult<()> {
    let own_staking_credential = StakingCredential::Hash(Credential::Script(own_script_hash.clone()));
    if ctx.tx_info.has_withdrawal(&own_staking_credential) {
        Ok(())
    } else {
        Err(ValidationError::WithdrawalNotInvoked)
    }
}

/// True if `output` holds a positive amount of `token`.
pub fn token_present_in_output(token: &Token, output: &TxOut) -> bool {
    output.value.amount_of_token(token) > 0
}

/// Look up a redeemer-supplied index. Negative and too-large indices are
/// both out of range.
fn lookup<T>(
    items: &[T],
    index: i128,
    out_of_range: fn(i128) -> ValidationError,
) -> ValidationResult<&T> {
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .ok_or_else(|| out_of_range(index))
}

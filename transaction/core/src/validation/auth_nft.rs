// Copyright (c) 2024 Botho Foundation

//! NFT that authenticates the uADA fee parameters.
//!
//! Only the admin can mint it, and only until a fixed deadline, after which
//! the supply is frozen for good.

use super::{
    validate_mint_exactly, validate_minting_purpose, ValidationError, ValidationResult, Validator,
};
use tracing::debug;
use uada_transaction_types::{PlutusData, PosixTime, PubKeyHash, ScriptContext, TokenName};

/// The parameter authentication NFT minting policy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterAuthNftPolicy {
    /// Key that must sign every mint.
    pub admin: PubKeyHash,
    /// Minting transactions must be valid only before this time.
    pub latest_mint_time: PosixTime,
}

impl ParameterAuthNftPolicy {
    /// Create the policy for a deployment.
    pub fn new(admin: impl Into<PubKeyHash>, latest_mint_time: PosixTime) -> Self {
        Self {
            admin: admin.into(),
            latest_mint_time,
        }
    }

    /// Check a mint.
    pub fn validate_mint(&self, ctx: &ScriptContext) -> ValidationResult<()> {
        let policy_id = validate_minting_purpose(ctx)?;
        let tx_info = &ctx.tx_info;

        validate_mint_exactly(&tx_info.mint, 1, policy_id, &TokenName::empty())?;

        if !tx_info.is_signed_by(&self.admin) {
            return Err(ValidationError::AdminSignatureMissing);
        }

        if !tx_info.valid_range.is_entirely_before(self.latest_mint_time) {
            debug!(
                valid_range = ?tx_info.valid_range,
                latest_mint_time = self.latest_mint_time,
                "mint deadline passed"
            );
            return Err(ValidationError::MintDeadlinePassed(self.latest_mint_time));
        }

        Ok(())
    }
}

impl Validator for ParameterAuthNftPolicy {
    fn validate(
        &self,
        _datum: Option<&PlutusData>,
        redeemer: &PlutusData,
        ctx: &ScriptContext,
    ) -> ValidationResult<()> {
        redeemer
            .fields_of(0, 0)
            .map_err(ValidationError::MalformedRedeemer)?;
        self.validate_mint(ctx)
            .inspect_err(|err| debug!(%err, "parameter auth NFT policy rejected transaction"))
    }
}

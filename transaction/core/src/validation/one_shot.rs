// Copyright (c) 2024 Botho Foundation

//! NFT with a unique name that can only be minted once.
//!
//! The name is the SHA-256 of a UTxO consumed by the minting transaction.
//! A UTxO can be spent only once, so no second token with that name can
//! ever be minted under this policy.

use super::{
    lookup, validate_mint_exactly, validate_minting_purpose, ValidationError, ValidationResult,
    Validator,
};
use sha2::{Digest, Sha256};
use tracing::debug;
use uada_transaction_types::{FromPlutusData, PlutusData, ScriptContext, TokenName, TxOutRef};

/// Big-endian bytes of `n` without leading zeros; zero is a single zero
/// byte.
fn be_unsigned_bytes(n: u64) -> Vec<u8> {
    let bytes = n.to_be_bytes();
    let first = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[first..].to_vec()
}

/// The token name derived from a spent output.
pub fn one_shot_nft_name(out_ref: &TxOutRef) -> TokenName {
    let mut hasher = Sha256::new();
    hasher.update(be_unsigned_bytes(out_ref.idx));
    hasher.update(&out_ref.id);
    TokenName(hasher.finalize().to_vec())
}

/// The one-shot NFT minting policy.
///
/// The redeemer is an integer: a non-negative value is the index of the
/// consumed input the name is derived from; a negative value requests a
/// burn.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneShotNftPolicy;

impl OneShotNftPolicy {
    /// Check a mint or burn.
    pub fn validate_mint(
        &self,
        unique_utxo_index: i128,
        ctx: &ScriptContext,
    ) -> ValidationResult<()> {
        let policy_id = validate_minting_purpose(ctx)?;
        let mint = &ctx.tx_info.mint;

        if unique_utxo_index < 0 {
            let mut burned = mint.tokens_of(policy_id).peekable();
            if burned.peek().is_none() {
                return Err(ValidationError::NothingBurned);
            }
            if burned.any(|(_, amount)| amount >= 0) {
                return Err(ValidationError::MintInBurnTx);
            }
            return Ok(());
        }

        let spent = lookup(
            &ctx.tx_info.inputs,
            unique_utxo_index,
            ValidationError::InputIndexOutOfRange,
        )?;
        let token_name = one_shot_nft_name(&spent.out_ref);
        debug!(
            %policy_id,
            out_ref = %spent.out_ref,
            %token_name,
            "checking one-shot mint"
        );
        validate_mint_exactly(mint, 1, policy_id, &token_name)
    }
}

impl Validator for OneShotNftPolicy {
    fn validate(
        &self,
        _datum: Option<&PlutusData>,
        redeemer: &PlutusData,
        ctx: &ScriptContext,
    ) -> ValidationResult<()> {
        let unique_utxo_index =
            i128::from_plutus_data(redeemer).map_err(ValidationError::MalformedRedeemer)?;
        self.validate_mint(unique_utxo_index, ctx)
            .inspect_err(|err| debug!(%err, "one-shot NFT policy rejected transaction"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_bytes_strip_leading_zeros() {
        assert_eq!(be_unsigned_bytes(0), vec![0]);
        assert_eq!(be_unsigned_bytes(1), vec![1]);
        assert_eq!(be_unsigned_bytes(255), vec![0xff]);
        assert_eq!(be_unsigned_bytes(256), vec![1, 0]);
        assert_eq!(be_unsigned_bytes(u64::MAX), vec![0xff; 8]);
    }

    #[test]
    fn name_is_sha256_of_index_then_id() {
        let out_ref = TxOutRef::new([7u8; 32], 0);
        let mut preimage = vec![0u8];
        preimage.extend_from_slice(&[7u8; 32]);
        assert_eq!(
            one_shot_nft_name(&out_ref).0,
            Sha256::digest(&preimage).to_vec()
        );
    }
}

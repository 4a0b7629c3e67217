// Copyright (c) 2024 Botho Foundation

use assert_matches::assert_matches;
use proptest::prelude::*;
use uada_transaction_core_test_utils::*;

fn policy() -> PolicyId {
    PolicyId::from([0xcc; 28])
}

fn minting(builder: TxInfoBuilder) -> ScriptContext {
    builder.context(ScriptPurpose::Minting(policy()))
}

fn with_inputs() -> TxInfoBuilder {
    TxInfoBuilder::new()
        .input(
            tx_out_ref(4, 1),
            TxOut::new(wallet_address(1), Value::from_lovelace(5_000_000)),
        )
        .input(
            tx_out_ref(5, 0),
            TxOut::new(wallet_address(1), Value::from_lovelace(5_000_000)),
        )
}

#[test]
fn mints_token_named_after_indicated_input() {
    let name = one_shot_nft_name(&tx_out_ref(5, 0));
    let ctx = minting(with_inputs().mint(Value::singleton(policy(), name, 1)));
    assert_eq!(OneShotNftPolicy.validate(None, &PlutusData::Int(1), &ctx), Ok(()));
}

#[test]
fn name_of_other_input_is_rejected() {
    let name = one_shot_nft_name(&tx_out_ref(5, 0));
    let ctx = minting(with_inputs().mint(Value::singleton(policy(), name, 1)));
    assert_matches!(
        OneShotNftPolicy.validate(None, &PlutusData::Int(0), &ctx),
        Err(ValidationError::WrongMintAmount { expected: 1, found: 0, .. })
    );
}

#[test]
fn minting_two_units_is_rejected() {
    let name = one_shot_nft_name(&tx_out_ref(4, 1));
    let ctx = minting(with_inputs().mint(Value::singleton(policy(), name, 2)));
    assert_matches!(
        OneShotNftPolicy.validate(None, &PlutusData::Int(0), &ctx),
        Err(ValidationError::WrongMintAmount { expected: 1, found: 2, .. })
    );
}

#[test]
fn extra_token_under_policy_is_rejected() {
    let name = one_shot_nft_name(&tx_out_ref(4, 1));
    let mint = Value::singleton(policy(), name, 1).with(policy(), b"extra", 1);
    let ctx = minting(with_inputs().mint(mint));
    assert_eq!(
        OneShotNftPolicy.validate(None, &PlutusData::Int(0), &ctx),
        Err(ValidationError::UnexpectedTokenMinted(TokenName::from(b"extra")))
    );
}

#[test]
fn tokens_of_other_policies_are_ignored() {
    let name = one_shot_nft_name(&tx_out_ref(4, 1));
    let mint = Value::singleton(policy(), name, 1).with([0x01; 28], b"other", 50);
    let ctx = minting(with_inputs().mint(mint));
    assert_eq!(OneShotNftPolicy.validate(None, &PlutusData::Int(0), &ctx), Ok(()));
}

#[test]
fn index_out_of_range_is_rejected() {
    let ctx = minting(with_inputs());
    assert_eq!(
        OneShotNftPolicy.validate(None, &PlutusData::Int(2), &ctx),
        Err(ValidationError::InputIndexOutOfRange(2))
    );
}

#[test]
fn burning_is_accepted() {
    let mint = Value::singleton(policy(), b"a", -1).with(policy(), b"b", -1);
    let ctx = minting(with_inputs().mint(mint));
    assert_eq!(OneShotNftPolicy.validate(None, &PlutusData::Int(-1), &ctx), Ok(()));
}

#[test]
fn minting_in_burn_transaction_is_rejected() {
    let mint = Value::singleton(policy(), b"a", -1).with(policy(), b"b", 1);
    let ctx = minting(with_inputs().mint(mint));
    assert_eq!(
        OneShotNftPolicy.validate(None, &PlutusData::Int(-1), &ctx),
        Err(ValidationError::MintInBurnTx)
    );
}

#[test]
fn burn_without_own_tokens_is_rejected() {
    let ctx = minting(with_inputs().mint(Value::singleton([0x01; 28], b"a", -1)));
    assert_eq!(
        OneShotNftPolicy.validate(None, &PlutusData::Int(-1), &ctx),
        Err(ValidationError::NothingBurned)
    );
}

#[test]
fn spending_purpose_is_rejected() {
    let ctx = with_inputs().context(ScriptPurpose::Spending(tx_out_ref(4, 1)));
    assert_eq!(
        OneShotNftPolicy.validate(None, &PlutusData::Int(0), &ctx),
        Err(ValidationError::NotMintingPurpose)
    );
}

#[test]
fn non_integer_redeemer_is_rejected() {
    let ctx = minting(with_inputs());
    assert_matches!(
        OneShotNftPolicy.validate(None, &PlutusData::unit(0), &ctx),
        Err(ValidationError::MalformedRedeemer(_))
    );
}

proptest! {
    #[test]
    fn names_are_deterministic_and_distinct(
        id_a in any::<[u8; 32]>(),
        idx_a in any::<u64>(),
        id_b in any::<[u8; 32]>(),
        idx_b in any::<u64>(),
    ) {
        let a = TxOutRef::new(id_a, idx_a);
        let b = TxOutRef::new(id_b, idx_b);
        prop_assert_eq!(one_shot_nft_name(&a), one_shot_nft_name(&a.clone()));
        prop_assert_eq!(one_shot_nft_name(&a).len(), 32);
        if a != b {
            prop_assert_ne!(one_shot_nft_name(&a), one_shot_nft_name(&b));
        }
    }
}

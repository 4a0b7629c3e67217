// Copyright (c) 2024 Botho Foundation

use assert_matches::assert_matches;
use uada_transaction_core_test_utils::*;

const DEADLINE: i64 = 1_700_000_000_000;

fn admin() -> PubKeyHash {
    PubKeyHash::from([0x0a; 28])
}

fn policy() -> ParameterAuthNftPolicy {
    ParameterAuthNftPolicy::new(admin(), DEADLINE)
}

fn auth_policy_id() -> PolicyId {
    PolicyId::from([0xbb; 28])
}

fn mint_tx(range: PosixTimeRange) -> TxInfoBuilder {
    TxInfoBuilder::new()
        .input(
            tx_out_ref(1, 0),
            TxOut::new(Address::pub_key(admin(), None), Value::from_lovelace(10_000_000)),
        )
        .mint(Value::singleton(auth_policy_id(), TokenName::empty(), 1))
        .valid_range(range)
}

fn minting(builder: TxInfoBuilder) -> ScriptContext {
    builder.context(ScriptPurpose::Minting(auth_policy_id()))
}

fn nothing() -> PlutusData {
    PlutusData::unit(0)
}

#[test]
fn admin_mint_before_deadline_is_accepted() {
    let ctx = minting(mint_tx(PosixTimeRange::to(DEADLINE - 1)).signatory(admin()));
    assert_eq!(policy().validate(None, &nothing(), &ctx), Ok(()));
}

#[test]
fn mint_after_deadline_is_rejected_even_if_signed() {
    let ctx = minting(
        mint_tx(PosixTimeRange::from_to(DEADLINE - 10, DEADLINE + 10)).signatory(admin()),
    );
    assert_eq!(
        policy().validate(None, &nothing(), &ctx),
        Err(ValidationError::MintDeadlinePassed(DEADLINE))
    );
}

#[test]
fn interval_ending_at_deadline_is_rejected() {
    let ctx = minting(mint_tx(PosixTimeRange::to(DEADLINE)).signatory(admin()));
    assert_eq!(
        policy().validate(None, &nothing(), &ctx),
        Err(ValidationError::MintDeadlinePassed(DEADLINE))
    );
}

#[test]
fn unbounded_interval_is_rejected() {
    let ctx = minting(mint_tx(PosixTimeRange::always()).signatory(admin()));
    assert_eq!(
        policy().validate(None, &nothing(), &ctx),
        Err(ValidationError::MintDeadlinePassed(DEADLINE))
    );
}

#[test]
fn missing_admin_signature_is_rejected() {
    let ctx = minting(mint_tx(PosixTimeRange::to(DEADLINE - 1)).signatory([0x0b; 28]));
    assert_eq!(
        policy().validate(None, &nothing(), &ctx),
        Err(ValidationError::AdminSignatureMissing)
    );
}

#[test]
fn named_token_is_rejected() {
    let ctx = minting(
        TxInfoBuilder::new()
            .mint(Value::singleton(auth_policy_id(), b"x", 1))
            .valid_range(PosixTimeRange::to(DEADLINE - 1))
            .signatory(admin()),
    );
    assert_matches!(
        policy().validate(None, &nothing(), &ctx),
        Err(ValidationError::WrongMintAmount { expected: 1, found: 0, .. })
    );
}

#[test]
fn second_unit_is_rejected() {
    let ctx = minting(
        mint_tx(PosixTimeRange::to(DEADLINE - 1))
            .mint(Value::singleton(auth_policy_id(), TokenName::empty(), 1))
            .signatory(admin()),
    );
    assert_matches!(
        policy().validate(None, &nothing(), &ctx),
        Err(ValidationError::WrongMintAmount { expected: 1, found: 2, .. })
    );
}

#[test]
fn redeemer_must_be_nothing() {
    let ctx = minting(mint_tx(PosixTimeRange::to(DEADLINE - 1)).signatory(admin()));
    assert_matches!(
        policy().validate(None, &PlutusData::Int(0), &ctx),
        Err(ValidationError::MalformedRedeemer(_))
    );
}

#[test]
fn rewarding_purpose_is_rejected() {
    let ctx = mint_tx(PosixTimeRange::to(DEADLINE - 1))
        .signatory(admin())
        .context(ScriptPurpose::Rewarding(StakingCredential::script([0xbb; 28])));
    assert_eq!(
        policy().validate(None, &nothing(), &ctx),
        Err(ValidationError::NotMintingPurpose)
    );
}

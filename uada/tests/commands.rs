use assert_matches::assert_matches;
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use uada::{
    commands::{
        encode_params,
        evaluate::{Invocation, ValidatorKind},
        fee::{quote, FeeKind, Quote},
        nft_name,
    },
    config::Config,
};
use uada_transaction_core_test_utils::*;
use uada_transaction_types::FromPlutusData;

fn config_toml(fixture: &UAdaFixture) -> String {
    format!(
        r#"
[auth_nft]
admin = "{admin}"
latest_mint_time = 1700000000000

[uada]
parameter_auth_nft_policy_id = "{auth_policy}"

[fee_params]
mint_fee_min = 1000000
mint_fee_percent = {{ numerator = 3, denominator = 1000 }}
withdrawal_fee_min = 1000000
withdrawal_fee_percent = {{ numerator = 3, denominator = 1000 }}
treasury_payment_key_hash = "{treasury_key}"
treasury_stake_key_hash = "{treasury_stake}"
treasury_out_datum = "d87980"
"#,
        admin = "0a".repeat(28),
        auth_policy = fixture.auth_policy,
        treasury_key = "dd".repeat(28),
        treasury_stake = "de".repeat(28),
    )
}

fn setup(fixture: &UAdaFixture) -> (TempDir, PathBuf, Config) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uada.toml");
    fs::write(&path, config_toml(fixture)).unwrap();
    let config = Config::load(&path).unwrap();
    (dir, path, config)
}

#[test]
fn config_fee_params_match_fixture() {
    let fixture = UAdaFixture::new();
    let (_dir, _path, config) = setup(&fixture);
    assert_eq!(config.fee_params().unwrap(), fixture.fee_params);
}

#[test]
fn evaluate_invocation_from_json() {
    let fixture = UAdaFixture::new();
    let (dir, _path, config) = setup(&fixture);

    let context = fixture.rewarding(fixture.interaction(5_000_000, 0, 5_000_000, 1_000_000));
    let invocation = Invocation {
        context,
        datum: Vec::new(),
        redeemer: fixture.interaction_redeemer(0).to_plutus_data().to_cbor().unwrap(),
    };
    let invocation_path = dir.path().join("invocation.json");
    fs::write(&invocation_path, serde_json::to_string_pretty(&invocation).unwrap()).unwrap();

    let loaded = Invocation::load(&invocation_path).unwrap();
    assert_eq!(loaded.evaluate(ValidatorKind::Uada, &config).unwrap(), Ok(()));

    // The same transaction does not satisfy the auth NFT policy.
    assert_matches!(
        loaded.evaluate(ValidatorKind::ParameterAuthNft, &config).unwrap(),
        Err(ValidationError::MalformedRedeemer(_))
    );
}

#[test]
fn evaluate_reports_rejection() {
    let fixture = UAdaFixture::new();
    let (_dir, _path, config) = setup(&fixture);
    let invocation = Invocation {
        context: fixture.rewarding(fixture.interaction(5_000_000, 0, 4_000_000, 1_000_000)),
        datum: Vec::new(),
        redeemer: fixture.interaction_redeemer(0).to_plutus_data().to_cbor().unwrap(),
    };
    assert_matches!(
        invocation.evaluate(ValidatorKind::Uada, &config).unwrap(),
        Err(ValidationError::WrongMintAmount { .. })
    );
}

#[test]
fn evaluate_rejects_undecodable_redeemer() {
    let fixture = UAdaFixture::new();
    let (_dir, _path, config) = setup(&fixture);
    let invocation = Invocation {
        context: fixture.rewarding(TxInfoBuilder::new()),
        datum: Vec::new(),
        redeemer: vec![0xff],
    };
    assert!(invocation.evaluate(ValidatorKind::Uada, &config).is_err());
}

#[test]
fn nft_name_matches_validator() {
    let name = nft_name::derive(&"07".repeat(32), 2).unwrap();
    assert_eq!(name, one_shot_nft_name(&tx_out_ref(7, 2)));
    assert!(nft_name::derive("not hex", 0).is_err());
}

#[test]
fn fee_quotes() {
    let fixture = UAdaFixture::new();
    assert_eq!(
        quote(&fixture.fee_params, FeeKind::Mint, 5_000_000),
        Quote {
            fee: 1_000_000,
            collected: true
        }
    );
    assert_eq!(
        quote(&fixture.fee_params, FeeKind::Withdraw, 1_000_000_000),
        Quote {
            fee: 3_000_000,
            collected: true
        }
    );

    let mut params = fixture.fee_params.clone();
    params.withdrawal_fee_min = 0;
    assert_eq!(
        quote(&params, FeeKind::Withdraw, 1_000),
        Quote {
            fee: 3,
            collected: false
        }
    );
}

#[test]
fn encoded_params_decode_back() {
    let fixture = UAdaFixture::new();
    let (_dir, _path, config) = setup(&fixture);
    let (cbor, hash) = encode_params::encode(&config).unwrap();

    let data = PlutusData::from_cbor(&hex::decode(cbor).unwrap()).unwrap();
    assert_eq!(UAdaFeeParams::from_plutus_data(&data).unwrap(), fixture.fee_params);
    assert_eq!(hash, data.hash().unwrap().to_string());
}

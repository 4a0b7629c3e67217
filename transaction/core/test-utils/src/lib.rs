// Copyright (c) 2024 Botho Foundation

//! Builders for script contexts and a deployed-protocol fixture, shared by
//! the validator tests, benchmarks and the CLI tests.

pub use uada_transaction_core::{
    constants::RECEIPT_TOKEN_NAME, one_shot_nft_name, OneShotNftPolicy, ParameterAuthNftPolicy,
    UAdaFeeParams, UAdaRedeemer, UAdaStakingPosition, UAdaValidator, ValidationError, Validator,
};
pub use uada_transaction_types::{
    Address, Credential, OutputDatum, PlutusData, PolicyId, PosixTimeRange, PubKeyHash,
    ScriptContext, ScriptHash, ScriptPurpose, StakingCredential, Token, TokenName, ToPlutusData,
    TxInInfo, TxInfo, TxOut, TxOutRef, Value,
};
pub use uada_util_fraction::Fraction;

/// A reference to output `idx` of a transaction whose id is `seed` repeated.
pub fn tx_out_ref(seed: u8, idx: u64) -> TxOutRef {
    TxOutRef::new([seed; 32], idx)
}

/// An address owned by a key derived from `seed`.
pub fn wallet_address(seed: u8) -> Address {
    Address::pub_key([seed; 28], None)
}

/// Incrementally assembles a [`TxInfo`].
#[derive(Clone, Debug, Default)]
pub struct TxInfoBuilder {
    info: TxInfo,
}

impl TxInfoBuilder {
    /// Start from an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `resolved` through `out_ref`.
    pub fn input(mut self, out_ref: TxOutRef, resolved: TxOut) -> Self {
        self.info.inputs.push(TxInInfo { out_ref, resolved });
        self
    }

    /// Read `resolved` through `out_ref` without consuming it.
    pub fn reference_input(mut self, out_ref: TxOutRef, resolved: TxOut) -> Self {
        self.info
            .reference_inputs
            .push(TxInInfo { out_ref, resolved });
        self
    }

    /// Produce an output.
    pub fn output(mut self, output: TxOut) -> Self {
        self.info.outputs.push(output);
        self
    }

    /// Mint (or, with negative amounts, burn) `value`.
    pub fn mint(mut self, value: Value) -> Self {
        self.info.mint = self.info.mint.add(&value);
        self
    }

    /// Withdraw `amount` from a reward account.
    pub fn withdrawal(mut self, credential: StakingCredential, amount: i128) -> Self {
        self.info.withdrawals.insert(credential, amount);
        self
    }

    /// Add a signature.
    pub fn signatory(mut self, key: impl Into<PubKeyHash>) -> Self {
        self.info.signatories.push(key.into());
        self
    }

    /// Set the validity interval.
    pub fn valid_range(mut self, range: PosixTimeRange) -> Self {
        self.info.valid_range = range;
        self
    }

    /// Supply a datum in the witness set.
    pub fn witness_datum(mut self, datum: PlutusData) -> Self {
        if let Ok(hash) = datum.hash() {
            self.info.data.insert(hash, datum);
        }
        self
    }

    /// Set the transaction id.
    pub fn id(mut self, seed: u8) -> Self {
        self.info.id = [seed; 32].into();
        self
    }

    /// The transaction info.
    pub fn build(self) -> TxInfo {
        self.info
    }

    /// The transaction info, wrapped with a purpose.
    pub fn context(self, purpose: ScriptPurpose) -> ScriptContext {
        ScriptContext {
            tx_info: self.info,
            purpose,
        }
    }
}

/// A deployed uADA protocol: script hashes, fee schedule and treasury.
#[derive(Clone, Debug)]
pub struct UAdaFixture {
    /// Hash of the uADA script; also the receipt token policy.
    pub uada_hash: ScriptHash,
    /// Policy of the parameter authentication NFT.
    pub auth_policy: PolicyId,
    /// Policy of the one-shot NFTs naming staking positions.
    pub one_shot_policy: PolicyId,
    /// The published fee schedule.
    pub fee_params: UAdaFeeParams,
}

impl Default for UAdaFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UAdaFixture {
    /// A deployment with a 3/1000 mint and withdrawal fee, 1 ADA minimum,
    /// and a key-owned treasury expecting an inline unit datum.
    pub fn new() -> Self {
        let percent = Fraction::new(3, 1000).ok();
        Self {
            uada_hash: [0xaa; 28].into(),
            auth_policy: [0xbb; 28].into(),
            one_shot_policy: [0xcc; 28].into(),
            fee_params: UAdaFeeParams {
                mint_fee_min: 1_000_000,
                mint_fee_percent: percent,
                withdrawal_fee_min: 1_000_000,
                withdrawal_fee_percent: percent,
                treasury_address: Address::pub_key([0xdd; 28], Some([0xde; 28].into())),
                treasury_out_datum: OutputDatum::Inline(PlutusData::unit(0)),
            },
        }
    }

    /// The validator of this deployment.
    pub fn validator(&self) -> UAdaValidator {
        UAdaValidator::new(self.auth_policy.clone())
    }

    /// The receipt token policy.
    pub fn uada_policy(&self) -> PolicyId {
        PolicyId::from(&self.uada_hash)
    }

    /// The script's reward account.
    pub fn staking_credential(&self) -> StakingCredential {
        StakingCredential::script(self.uada_hash.clone())
    }

    /// The address positions are locked at.
    pub fn script_address(&self) -> Address {
        Address::script(self.uada_hash.clone())
    }

    /// `amount` of the receipt token.
    pub fn receipt(&self, amount: i128) -> Value {
        Value::singleton(self.uada_policy(), RECEIPT_TOKEN_NAME, amount)
    }

    /// A staking position locked by the one-shot NFT derived from `seed`.
    pub fn position(&self, seed: u8) -> UAdaStakingPosition {
        UAdaStakingPosition {
            policy_id: self.one_shot_policy.clone(),
            token_name: one_shot_nft_name(&tx_out_ref(seed, 0)),
        }
    }

    /// An output at the script locking `lovelace` for `position`.
    pub fn position_output(&self, lovelace: i128, position: &UAdaStakingPosition) -> TxOut {
        TxOut::new(self.script_address(), Value::from_lovelace(lovelace))
            .with_datum(OutputDatum::Inline(position.to_plutus_data()))
    }

    /// A wallet output holding the NFT that unlocks `position`.
    pub fn nft_holder_output(&self, position: &UAdaStakingPosition) -> TxOut {
        TxOut::new(
            wallet_address(1),
            Value::from_lovelace(2_000_000).with(
                position.policy_id.clone(),
                position.token_name.clone(),
                1,
            ),
        )
    }

    /// The reference output publishing the fee parameters inline.
    pub fn params_output(&self) -> TxOut {
        TxOut::new(
            wallet_address(9),
            Value::from_lovelace(2_000_000).with(self.auth_policy.clone(), TokenName::empty(), 1),
        )
        .with_datum(OutputDatum::Inline(self.fee_params.to_plutus_data()))
    }

    /// A treasury payout of `lovelace` with the expected datum.
    pub fn treasury_output(&self, lovelace: i128) -> TxOut {
        TxOut::new(
            self.fee_params.treasury_address.clone(),
            Value::from_lovelace(lovelace),
        )
        .with_datum(self.fee_params.treasury_out_datum.clone())
    }

    /// The redeemer of the reward hook: parameters at reference input 0,
    /// treasury payout at output `payout_index`.
    pub fn interaction_redeemer(&self, payout_index: i128) -> UAdaRedeemer {
        UAdaRedeemer::ContractInteraction {
            parameter_auth_nft_ref_utxo_index: 0,
            treasury_payout_tx_out_index: payout_index,
        }
    }

    /// A transaction that locks `locked`, unlocks `unlocked`, mints `minted`
    /// receipt tokens and pays `fee_paid` to the treasury at output 0.
    /// The parameter reference input and the withdrawal are in place.
    pub fn interaction(
        &self,
        locked: i128,
        unlocked: i128,
        minted: i128,
        fee_paid: i128,
    ) -> TxInfoBuilder {
        let position = self.position(1);
        let mut builder = TxInfoBuilder::new()
            .reference_input(tx_out_ref(9, 0), self.params_output())
            .output(self.treasury_output(fee_paid))
            .input(
                tx_out_ref(2, 0),
                TxOut::new(wallet_address(2), Value::from_lovelace(100_000_000)),
            )
            .withdrawal(self.staking_credential(), 0)
            .mint(self.receipt(minted));
        if locked != 0 {
            builder = builder.output(self.position_output(locked, &position));
        }
        if unlocked != 0 {
            builder = builder.input(tx_out_ref(3, 0), self.position_output(unlocked, &position));
        }
        builder
    }

    /// The reward-hook invocation context of this deployment.
    pub fn rewarding(&self, builder: TxInfoBuilder) -> ScriptContext {
        builder.context(ScriptPurpose::Rewarding(self.staking_credential()))
    }
}

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use uada_transaction_core::{ParameterAuthNftPolicy, UAdaFeeParams, UAdaValidator};
use uada_transaction_types::{Address, OutputDatum, PlutusData, PolicyId, PubKeyHash};
use uada_util_fraction::Fraction;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "uada.toml";

/// Errors loading a deployment config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{field}: denominator must be positive, got {denominator}")]
    NonPositiveDenominator {
        field: &'static str,
        denominator: i64,
    },

    #[error("{field} must not be negative, got {value}")]
    NegativeFee { field: &'static str, value: i64 },

    #[error("treasury_out_datum is not valid plutus data: {0}")]
    TreasuryDatum(String),

    #[error("config has no [fee_params] section")]
    MissingFeeParams,
}

/// Deployment config for the uADA validators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub auth_nft: AuthNftConfig,
    pub uada: UAdaConfig,
    /// Fee schedule, needed for quoting fees and encoding the params datum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_params: Option<FeeParamsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthNftConfig {
    /// Key hash of the admin that may mint the parameter auth NFT
    pub admin: PubKeyHash,
    /// POSIX milliseconds after which the auth NFT can no longer be minted
    pub latest_mint_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UAdaConfig {
    /// Policy id of the parameter auth NFT
    pub parameter_auth_nft_policy_id: PolicyId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePercent {
    pub numerator: i64,
    pub denominator: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeParamsConfig {
    pub mint_fee_min: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint_fee_percent: Option<FeePercent>,
    pub withdrawal_fee_min: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_fee_percent: Option<FeePercent>,
    pub treasury_payment_key_hash: PubKeyHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasury_stake_key_hash: Option<PubKeyHash>,
    /// Inline datum (CBOR hex) the treasury payout must carry; none if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasury_out_datum: Option<String>,
}

impl Config {
    /// Load and validate config from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(fee_params) = &config.fee_params {
            fee_params.to_fee_params()?;
        }
        Ok(config)
    }

    pub fn auth_nft_policy(&self) -> ParameterAuthNftPolicy {
        ParameterAuthNftPolicy::new(self.auth_nft.admin.clone(), self.auth_nft.latest_mint_time)
    }

    pub fn uada_validator(&self) -> UAdaValidator {
        UAdaValidator::new(self.uada.parameter_auth_nft_policy_id.clone())
    }

    /// The fee schedule, or an error if the config has none
    pub fn fee_params(&self) -> Result<UAdaFeeParams, ConfigError> {
        self.fee_params
            .as_ref()
            .ok_or(ConfigError::MissingFeeParams)?
            .to_fee_params()
    }
}

impl FeePercent {
    fn to_fraction(self, field: &'static str) -> Result<Fraction, ConfigError> {
        if self.denominator <= 0 {
            return Err(ConfigError::NonPositiveDenominator {
                field,
                denominator: self.denominator,
            });
        }
        Fraction::new(self.numerator.into(), self.denominator.into()).map_err(|_| {
            ConfigError::NonPositiveDenominator {
                field,
                denominator: self.denominator,
            }
        })
    }
}

impl FeeParamsConfig {
    /// Build the on-chain fee parameter record
    pub fn to_fee_params(&self) -> Result<UAdaFeeParams, ConfigError> {
        for (field, value) in [
            ("mint_fee_min", self.mint_fee_min),
            ("withdrawal_fee_min", self.withdrawal_fee_min),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeFee { field, value });
            }
        }

        let treasury_out_datum = match &self.treasury_out_datum {
            Some(cbor_hex) => {
                let bytes = hex::decode(cbor_hex)
                    .map_err(|err| ConfigError::TreasuryDatum(err.to_string()))?;
                let datum = PlutusData::from_cbor(&bytes)
                    .map_err(|err| ConfigError::TreasuryDatum(err.to_string()))?;
                OutputDatum::Inline(datum)
            }
            None => OutputDatum::NoDatum,
        };

        Ok(UAdaFeeParams {
            mint_fee_min: self.mint_fee_min.into(),
            mint_fee_percent: self
                .mint_fee_percent
                .map(|p| p.to_fraction("mint_fee_percent"))
                .transpose()?,
            withdrawal_fee_min: self.withdrawal_fee_min.into(),
            withdrawal_fee_percent: self
                .withdrawal_fee_percent
                .map(|p| p.to_fraction("withdrawal_fee_percent"))
                .transpose()?,
            treasury_address: Address::pub_key(
                self.treasury_payment_key_hash.clone(),
                self.treasury_stake_key_hash.clone(),
            ),
            treasury_out_datum,
        })
    }
}

/// Config path from the command line, or `uada.toml` in the working directory
pub fn config_path(cli_path: Option<&str>) -> PathBuf {
    cli_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

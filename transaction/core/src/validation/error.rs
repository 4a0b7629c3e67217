// Copyright (c) 2024 Botho Foundation

use displaydoc::Display;
use uada_transaction_types::{DecodeError, PosixTime, TokenName, TxOutRef};

/// Type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a validator rejects a transaction.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum ValidationError {
    /// Invalid purpose, datum or redeemer combination
    InvalidInvocation,

    /// Minting policy invoked for a purpose other than minting
    NotMintingPurpose,

    /// Own input {0} is not among the transaction inputs
    OwnInputNotFound(TxOutRef),

    /// Own staking credential is a pointer, which does not identify a script
    StakingPointerNotSupported,

    /// Exactly {expected} of token {token_name} must be minted, found {found}
    WrongMintAmount {
        /// The token that has to be minted
        token_name: TokenName,
        /// The required amount
        expected: i128,
        /// The amount in the mint field
        found: i128,
    },

    /// No other token of the own policy may be minted, found {0}
    UnexpectedTokenMinted(TokenName),

    /// Trying to mint in burn transaction
    MintInBurnTx,

    /// Burn transaction burns nothing of the own policy
    NothingBurned,

    /// Admin signature missing
    AdminSignatureMissing,

    /// Validity interval does not end before the latest mint time {0}
    MintDeadlinePassed(PosixTime),

    /// Own staking credential missing in withdrawal map
    WithdrawalNotInvoked,

    /// Unique NFT not present in spent input
    UniqueNftMissing,

    /// Auth NFT not present in parameter reference input
    AuthNftMissing,

    /// Fee not paid to treasury
    FeeNotPaidToTreasury,

    /// Payout datum is incorrect
    WrongPayoutDatum,

    /// Not enough lovelace paid to treasury: expected {expected}, found {found}
    InsufficientFee {
        /// The fee owed
        expected: i128,
        /// The lovelace in the payout output
        found: i128,
    },

    /// Input index {0} is out of range
    InputIndexOutOfRange(i128),

    /// Reference input index {0} is out of range
    ReferenceInputIndexOutOfRange(i128),

    /// Output index {0} is out of range
    OutputIndexOutOfRange(i128),

    /// Malformed datum: {0}
    MalformedDatum(DecodeError),

    /// Malformed redeemer: {0}
    MalformedRedeemer(DecodeError),

    /// Output carries no resolvable datum
    MissingDatum,
}

impl std::error::Error for ValidationError {}

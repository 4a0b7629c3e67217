// Copyright (c) 2024 Botho Foundation

//! Byte-string identifiers: policies, token names, key and script hashes.

use core::fmt;
use serde::{Deserialize, Serialize};

macro_rules! bytes_newtype {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(with = "hex::serde")] pub Vec<u8>);

        impl $name {
            /// Length in bytes.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// True if this is the empty byte string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(src: Vec<u8>) -> Self {
                Self(src)
            }
        }

        impl From<&[u8]> for $name {
            fn from(src: &[u8]) -> Self {
                Self(src.to_vec())
            }
        }

        impl<const N: usize> From<[u8; N]> for $name {
            fn from(src: [u8; N]) -> Self {
                Self(src.to_vec())
            }
        }

        impl<const N: usize> From<&[u8; N]> for $name {
            fn from(src: &[u8; N]) -> Self {
                Self(src.to_vec())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(&self.0))
            }
        }
    };
}

bytes_newtype!(
    /// Identifies a minting policy. Equal to the hash of the policy script.
    PolicyId
);

bytes_newtype!(
    /// The name of an asset under a policy.
    TokenName
);

bytes_newtype!(
    /// Hash of a verification key.
    PubKeyHash
);

bytes_newtype!(
    /// Hash of a script.
    ScriptHash
);

bytes_newtype!(
    /// Hash of a transaction body.
    TxId
);

bytes_newtype!(
    /// BLAKE2b-256 hash of a datum's canonical CBOR encoding.
    DatumHash
);

impl PolicyId {
    /// The policy id of ADA (the empty byte string).
    pub fn ada() -> Self {
        Self(Vec::new())
    }
}

impl TokenName {
    /// The empty token name, used by ADA and by authority tokens.
    pub fn empty() -> Self {
        Self(Vec::new())
    }
}

impl From<ScriptHash> for PolicyId {
    fn from(src: ScriptHash) -> Self {
        Self(src.0)
    }
}

impl From<&ScriptHash> for PolicyId {
    fn from(src: &ScriptHash) -> Self {
        Self(src.0.clone())
    }
}

impl From<PolicyId> for ScriptHash {
    fn from(src: PolicyId) -> Self {
        Self(src.0)
    }
}

/// A fully qualified asset class.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Token {
    /// The policy that controls the asset.
    pub policy_id: PolicyId,
    /// The asset name under the policy.
    pub token_name: TokenName,
}

impl Token {
    /// Create a new token.
    pub fn new(policy_id: impl Into<PolicyId>, token_name: impl Into<TokenName>) -> Self {
        Self {
            policy_id: policy_id.into(),
            token_name: token_name.into(),
        }
    }
}

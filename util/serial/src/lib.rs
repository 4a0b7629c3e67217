// Copyright (c) 2018-2022 The Botho Foundation

//! Canonical CBOR serialization.
//!
//! Every datum that reaches the chain goes through here so that encoding is
//! deterministic: definite-length containers and shortest-form integers.
//! Map entries are written in the order the serializer emits them.

#![deny(missing_docs)]

use displaydoc::Display;
use serde::{de::DeserializeOwned, Serialize};

pub use serde_cbor::tags::{current_cbor_tag, Tagged};

/// Serialization errors.
#[derive(Debug, Display)]
pub enum Error {
    /// CBOR encoding failed: {0}
    Encode(serde_cbor::Error),

    /// CBOR decoding failed: {0}
    Decode(serde_cbor::Error),
}

impl std::error::Error for Error {}

/// Serialize the given value to CBOR bytes.
pub fn serialize<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: Serialize,
{
    serde_cbor::to_vec(value).map_err(Error::Encode)
}

/// Deserialize a value from CBOR bytes.
///
/// Trailing bytes after the first item are an error.
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_cbor::from_slice(bytes).map_err(Error::Decode)
}

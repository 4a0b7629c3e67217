// Copyright (c) 2024 Botho Foundation

//! References to transaction outputs.

use crate::token::TxId;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Reference to a transaction output: the producing transaction and the
/// output's position in it.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TxOutRef {
    /// Id of the producing transaction.
    pub id: TxId,
    /// Index of the output within that transaction.
    pub idx: u64,
}

impl TxOutRef {
    /// Create a new reference.
    pub fn new(id: impl Into<TxId>, idx: u64) -> Self {
        Self { id: id.into(), idx }
    }
}

impl fmt::Display for TxOutRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.idx)
    }
}

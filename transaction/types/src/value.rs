// Copyright (c) 2024 Botho Foundation

//! Multi-asset values.
//!
//! A [`Value`] maps policy ids to token names to signed amounts. Entries that
//! are absent are zero, and zero entries are never stored: every operation
//! here prunes them, so an empty map and a missing key mean the same thing.
//! Arithmetic saturates at the bounds of `i128`.

use crate::token::{PolicyId, Token, TokenName};
use core::ops::{Add, Neg, Sub};
use serde::{Deserialize, Serialize};
use std::collections::{btree_map::Entry, BTreeMap};

/// Token name to amount, for a single policy.
pub type TokenAmounts = BTreeMap<TokenName, i128>;

/// A bag of assets, grouped by issuing policy.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(
    from = "BTreeMap<PolicyId, TokenAmounts>",
    into = "BTreeMap<PolicyId, TokenAmounts>"
)]
pub struct Value(BTreeMap<PolicyId, TokenAmounts>);

impl Value {
    /// The empty value.
    pub fn new() -> Self {
        Self::default()
    }

    /// A value holding only lovelace.
    pub fn from_lovelace(amount: i128) -> Self {
        Self::singleton(PolicyId::ada(), TokenName::empty(), amount)
    }

    /// A value holding a single asset.
    pub fn singleton(
        policy_id: impl Into<PolicyId>,
        token_name: impl Into<TokenName>,
        amount: i128,
    ) -> Self {
        let mut value = Self::new();
        value.add_amount(policy_id.into(), token_name.into(), amount);
        value
    }

    /// Builder-style variant of [`Value::add_amount`].
    pub fn with(
        mut self,
        policy_id: impl Into<PolicyId>,
        token_name: impl Into<TokenName>,
        amount: i128,
    ) -> Self {
        self.add_amount(policy_id.into(), token_name.into(), amount);
        self
    }

    /// Add `amount` of an asset in place, pruning the entry if it hits zero.
    pub fn add_amount(&mut self, policy_id: PolicyId, token_name: TokenName, amount: i128) {
        if amount == 0 {
            return;
        }
        let tokens = self.0.entry(policy_id.clone()).or_default();
        match tokens.entry(token_name) {
            Entry::Vacant(slot) => {
                slot.insert(amount);
            }
            Entry::Occupied(mut slot) => {
                let updated = slot.get().saturating_add(amount);
                if updated == 0 {
                    slot.remove();
                } else {
                    slot.insert(updated);
                }
            }
        }
        if tokens.is_empty() {
            self.0.remove(&policy_id);
        }
    }

    /// The amount held of an asset, zero if absent.
    pub fn amount_of(&self, policy_id: &PolicyId, token_name: &TokenName) -> i128 {
        self.0
            .get(policy_id)
            .and_then(|tokens| tokens.get(token_name))
            .copied()
            .unwrap_or(0)
    }

    /// The amount held of a token, zero if absent.
    pub fn amount_of_token(&self, token: &Token) -> i128 {
        self.amount_of(&token.policy_id, &token.token_name)
    }

    /// The lovelace held.
    pub fn lovelace(&self) -> i128 {
        self.amount_of(&PolicyId::ada(), &TokenName::empty())
    }

    /// All non-zero entries under a policy. Empty if the policy is absent.
    pub fn tokens_of<'a>(
        &'a self,
        policy_id: &PolicyId,
    ) -> impl Iterator<Item = (&'a TokenName, i128)> + 'a {
        self.0
            .get(policy_id)
            .into_iter()
            .flat_map(|tokens| tokens.iter().map(|(name, amount)| (name, *amount)))
    }

    /// Iterate over every `(policy, name, amount)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&PolicyId, &TokenName, i128)> {
        self.0.iter().flat_map(|(policy_id, tokens)| {
            tokens
                .iter()
                .map(move |(name, amount)| (policy_id, name, *amount))
        })
    }

    /// The policies with at least one non-zero entry.
    pub fn policies(&self) -> impl Iterator<Item = &PolicyId> {
        self.0.keys()
    }

    /// True if every entry is zero.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `self + other`.
    pub fn add(&self, other: &Value) -> Value {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        self.clone().merge(other, 1)
    }

    /// `self - other`.
    pub fn subtract(&self, other: &Value) -> Value {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.negate();
        }
        self.clone().merge(other, -1)
    }

    /// Flip the sign of every entry.
    pub fn negate(&self) -> Value {
        Value(
            self.0
                .iter()
                .map(|(policy_id, tokens)| {
                    let negated = tokens
                        .iter()
                        .map(|(name, amount)| (name.clone(), amount.saturating_neg()))
                        .collect();
                    (policy_id.clone(), negated)
                })
                .collect(),
        )
    }

    fn merge(mut self, other: &Value, sign: i128) -> Value {
        for (policy_id, name, amount) in other.iter() {
            self.add_amount(policy_id.clone(), name.clone(), sign.saturating_mul(amount));
        }
        self
    }
}

impl From<BTreeMap<PolicyId, TokenAmounts>> for Value {
    fn from(src: BTreeMap<PolicyId, TokenAmounts>) -> Self {
        src.into_iter()
            .flat_map(|(policy_id, tokens)| {
                tokens
                    .into_iter()
                    .map(move |(name, amount)| (policy_id.clone(), name, amount))
            })
            .collect()
    }
}

impl From<Value> for BTreeMap<PolicyId, TokenAmounts> {
    fn from(src: Value) -> Self {
        src.0
    }
}

impl FromIterator<(PolicyId, TokenName, i128)> for Value {
    fn from_iter<I: IntoIterator<Item = (PolicyId, TokenName, i128)>>(iter: I) -> Self {
        let mut value = Value::new();
        for (policy_id, name, amount) in iter {
            value.add_amount(policy_id, name, amount);
        }
        value
    }
}

impl<'a> Add<&'a Value> for &'a Value {
    type Output = Value;

    fn add(self, rhs: &'a Value) -> Value {
        Value::add(self, rhs)
    }
}

impl<'a> Sub<&'a Value> for &'a Value {
    type Output = Value;

    fn sub(self, rhs: &'a Value) -> Value {
        self.subtract(rhs)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        self.negate()
    }
}

impl core::iter::Sum for Value {
    fn sum<I: Iterator<Item = Value>>(iter: I) -> Value {
        iter.fold(Value::new(), |acc, v| {
            if acc.is_empty() {
                v
            } else {
                acc.merge(&v, 1)
            }
        })
    }
}

impl<'a> core::iter::Sum<&'a Value> for Value {
    fn sum<I: Iterator<Item = &'a Value>>(iter: I) -> Value {
        iter.fold(Value::new(), |acc, v| acc.merge(v, 1))
    }
}

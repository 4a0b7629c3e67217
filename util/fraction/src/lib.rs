// Copyright (c) 2024 Botho Foundation

//! Exact fractions used for percentage-based fees.
//!
//! A [`Fraction`] never falls back to floating point. The only rounding mode
//! offered is [`Fraction::ceil`], which is what fee computations need: a fee
//! is always rounded in favour of the treasury.

#![deny(missing_docs)]

use core::fmt;
use displaydoc::Display;

/// A ratio of two integers with a strictly positive denominator.
///
/// The fraction is not reduced; `2/4` and `1/2` are distinct values that
/// compare unequal, matching how they are stored in on-chain records.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawFraction", into = "RawFraction")
)]
pub struct Fraction {
    numerator: i128,
    denominator: i128,
}

impl Fraction {
    /// Create a new fraction.
    ///
    /// A negative denominator is normalized by moving the sign to the
    /// numerator.
    pub fn new(numerator: i128, denominator: i128) -> Result<Self, Error> {
        if denominator == 0 {
            return Err(Error::ZeroDenominator(numerator));
        }
        if denominator < 0 {
            let numerator = numerator.checked_neg().ok_or(Error::Overflow)?;
            let denominator = denominator.checked_neg().ok_or(Error::Overflow)?;
            return Ok(Self {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The numerator.
    pub fn numerator(&self) -> i128 {
        self.numerator
    }

    /// The denominator, always positive.
    pub fn denominator(&self) -> i128 {
        self.denominator
    }

    /// Returns `self * rhs` without reducing.
    pub fn mul_int(&self, rhs: i128) -> Self {
        Self {
            numerator: self.numerator.saturating_mul(rhs),
            denominator: self.denominator,
        }
    }

    /// The smallest integer greater than or equal to this fraction.
    pub fn ceil(&self) -> i128 {
        let quotient = self.numerator.div_euclid(self.denominator);
        if self.numerator.rem_euclid(self.denominator) == 0 {
            quotient
        } else {
            quotient + 1
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Fraction construction errors.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Error {
    /// Fraction {0}/0 has a zero denominator
    ZeroDenominator(i128),

    /// Normalizing the sign of the fraction overflows
    Overflow,
}

impl std::error::Error for Error {}

/// Unchecked wire form, validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawFraction {
    numerator: i128,
    denominator: i128,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFraction> for Fraction {
    type Error = Error;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}

#[cfg(feature = "serde")]
impl From<Fraction> for RawFraction {
    fn from(src: Fraction) -> Self {
        Self {
            numerator: src.numerator,
            denominator: src.denominator,
        }
    }
}

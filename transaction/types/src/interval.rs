// Copyright (c) 2024 Botho Foundation

//! Transaction validity intervals over POSIX time in milliseconds.

use serde::{Deserialize, Serialize};

/// POSIX time in milliseconds.
pub type PosixTime = i64;

/// A point on the time line extended with both infinities.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedPosixTime {
    /// Before every finite time.
    NegInf,
    /// A finite time.
    Finite(PosixTime),
    /// After every finite time.
    PosInf,
}

/// The lower end of an interval.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct LowerBound {
    /// Where the interval starts.
    pub limit: ExtendedPosixTime,
    /// Whether `limit` itself is included.
    pub closed: bool,
}

/// The upper end of an interval.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct UpperBound {
    /// Where the interval ends.
    pub limit: ExtendedPosixTime,
    /// Whether `limit` itself is included.
    pub closed: bool,
}

/// The range of times during which a transaction may be included.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PosixTimeRange {
    /// Lower bound.
    pub lower_bound: LowerBound,
    /// Upper bound.
    pub upper_bound: UpperBound,
}

impl Default for PosixTimeRange {
    fn default() -> Self {
        Self::always()
    }
}

impl PosixTimeRange {
    /// The unbounded interval.
    pub fn always() -> Self {
        Self {
            lower_bound: LowerBound {
                limit: ExtendedPosixTime::NegInf,
                closed: true,
            },
            upper_bound: UpperBound {
                limit: ExtendedPosixTime::PosInf,
                closed: true,
            },
        }
    }

    /// Everything up to and including `upper`.
    pub fn to(upper: PosixTime) -> Self {
        Self {
            upper_bound: UpperBound {
                limit: ExtendedPosixTime::Finite(upper),
                closed: true,
            },
            ..Self::always()
        }
    }

    /// The closed interval `[lower, upper]`.
    pub fn from_to(lower: PosixTime, upper: PosixTime) -> Self {
        Self {
            lower_bound: LowerBound {
                limit: ExtendedPosixTime::Finite(lower),
                closed: true,
            },
            upper_bound: UpperBound {
                limit: ExtendedPosixTime::Finite(upper),
                closed: true,
            },
        }
    }

    /// True if every time in the interval is strictly before `time`.
    pub fn is_entirely_before(&self, time: PosixTime) -> bool {
        match self.upper_bound.limit {
            ExtendedPosixTime::NegInf => true,
            ExtendedPosixTime::PosInf => false,
            ExtendedPosixTime::Finite(upper) if self.upper_bound.closed => upper < time,
            ExtendedPosixTime::Finite(upper) => upper <= time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_upper_bound_must_be_strictly_before() {
        assert!(PosixTimeRange::to(99).is_entirely_before(100));
        assert!(!PosixTimeRange::to(100).is_entirely_before(100));
        assert!(!PosixTimeRange::from_to(0, 101).is_entirely_before(100));
    }

    #[test]
    fn open_upper_bound_may_touch() {
        let mut range = PosixTimeRange::to(100);
        range.upper_bound.closed = false;
        assert!(range.is_entirely_before(100));
        assert!(!range.is_entirely_before(99));
    }

    #[test]
    fn infinite_upper_bounds() {
        assert!(!PosixTimeRange::always().is_entirely_before(i64::MAX));
        let mut range = PosixTimeRange::always();
        range.upper_bound.limit = ExtendedPosixTime::NegInf;
        assert!(range.is_entirely_before(i64::MIN));
    }

    #[test]
    fn extended_time_ordering() {
        assert!(ExtendedPosixTime::NegInf < ExtendedPosixTime::Finite(i64::MIN));
        assert!(ExtendedPosixTime::Finite(i64::MAX) < ExtendedPosixTime::PosInf);
    }
}

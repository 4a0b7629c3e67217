// Copyright (c) 2024 Botho Foundation

//! Protocol fee schedule.

use crate::{constants::FEE_DUST_THRESHOLD, records::UAdaFeeParams};
use uada_util_fraction::Fraction;

/// The fee owed on `volume` lovelace: the proportional fee rounded up, but
/// never less than `min_fee`. Without a proportional part the fee is
/// `min_fee`.
pub fn compute_fee(volume: i128, fee_percent: Option<&Fraction>, min_fee: i128) -> i128 {
    match fee_percent {
        Some(percent) => min_fee.max(percent.mul_int(volume).ceil()),
        None => min_fee,
    }
}

/// True if a fee is large enough to be collected.
pub fn is_collectable(fee: i128) -> bool {
    fee >= FEE_DUST_THRESHOLD
}

impl UAdaFeeParams {
    /// Fee for minting `volume` uADA.
    pub fn mint_fee(&self, volume: i128) -> i128 {
        compute_fee(volume, self.mint_fee_percent.as_ref(), self.mint_fee_min)
    }

    /// Fee for burning `volume` uADA.
    pub fn withdrawal_fee(&self, volume: i128) -> i128 {
        compute_fee(
            volume,
            self.withdrawal_fee_percent.as_ref(),
            self.withdrawal_fee_min,
        )
    }

    /// Fee owed for a net supply change: the mint schedule for growth (and
    /// for no change), the withdrawal schedule for shrinkage.
    pub fn fee_for_supply_change(&self, supply_change: i128) -> i128 {
        if supply_change < 0 {
            self.withdrawal_fee(supply_change.saturating_neg())
        } else {
            self.mint_fee(supply_change)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uada_transaction_types::{Address, OutputDatum};

    fn three_per_mille() -> Fraction {
        Fraction::new(3, 1000).unwrap()
    }

    #[test]
    fn minimum_dominates_small_volumes() {
        assert_eq!(compute_fee(5_000_000, Some(&three_per_mille()), 1_000_000), 1_000_000);
    }

    #[test]
    fn proportional_fee_rounds_up() {
        // 3/1000 * 1_000_000_001 = 3_000_000.003
        assert_eq!(compute_fee(1_000_000_001, Some(&three_per_mille()), 0), 3_000_001);
        assert_eq!(compute_fee(1_000_000_000, Some(&three_per_mille()), 0), 3_000_000);
    }

    #[test]
    fn no_percent_means_minimum() {
        assert_eq!(compute_fee(i128::MAX, None, 42), 42);
    }

    #[test]
    fn dust_threshold() {
        assert!(!is_collectable(999_999));
        assert!(is_collectable(1_000_000));
    }

    #[test]
    fn supply_change_picks_schedule() {
        let params = UAdaFeeParams {
            mint_fee_min: 1,
            mint_fee_percent: None,
            withdrawal_fee_min: 2,
            withdrawal_fee_percent: None,
            treasury_address: Address::script([0u8; 28]),
            treasury_out_datum: OutputDatum::NoDatum,
        };
        assert_eq!(params.fee_for_supply_change(10), 1);
        assert_eq!(params.fee_for_supply_change(0), 1);
        assert_eq!(params.fee_for_supply_change(-10), 2);
    }

    proptest! {
        #[test]
        fn fee_is_max_of_min_and_ceiling(
            volume in 0i128..1_000_000_000_000,
            numerator in 0i128..1000,
            denominator in 1i128..100_000,
            min_fee in 0i128..10_000_000,
        ) {
            let percent = Fraction::new(numerator, denominator).unwrap();
            let fee = compute_fee(volume, Some(&percent), min_fee);
            let product = numerator * volume;
            let ceiling = product / denominator + i128::from(product % denominator != 0);
            prop_assert_eq!(fee, min_fee.max(ceiling));
            prop_assert!(fee >= min_fee);
        }
    }
}

//! Allocation Analyzer
//!
//! Computes an asset's share of portfolio value and classifies it against
//! its basket's band. Portfolio arithmetic is `Decimal` - never use f64
//! for money! The band table is data, not branching code, so the policy
//! can be inspected and tested on its own.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AdvisorError, Result};
use crate::model::{AllocationHint, AllocationStatus, BasketKind, ExposureStatus};

/// Per-basket allocation policy: hard limits, recommended band, and the
/// base level the engine builds its 1-5 risk factor from.
#[derive(Clone, Copy, Debug)]
pub struct BasketBand {
    /// Hard minimum share (percent), inclusive.
    pub min_pct: Decimal,

    /// Hard maximum share (percent), inclusive.
    pub max_pct: Decimal,

    /// Recommended band inside the hard limits, (min, max) percent.
    pub target: (Decimal, Decimal),

    /// Base risk level on the 1-5 scale.
    pub base_risk: u8,
}

/// Band lookup. `None` for kinds without a policy entry; callers either
/// treat that as [`AdvisorError::UnmappedBasket`] or fall back to the
/// BlueChip band via [`band_or_default`].
pub fn band_for(basket: BasketKind) -> Option<BasketBand> {
    match basket {
        BasketKind::Bitcoin => Some(BasketBand {
            min_pct: dec!(60),
            max_pct: dec!(80),
            target: (dec!(60), dec!(75)),
            base_risk: 2,
        }),
        BasketKind::BlueChip => Some(blue_chip_band()),
        BasketKind::SmallCap => Some(BasketBand {
            min_pct: dec!(0),
            max_pct: dec!(15),
            target: (dec!(5), dec!(10)),
            base_risk: 4,
        }),
        BasketKind::Unclassified => None,
    }
}

/// Band lookup with the documented BlueChip fallback for unmapped kinds.
/// The second element is true when the fallback was taken.
pub fn band_or_default(basket: BasketKind) -> (BasketBand, bool) {
    band_for(basket).map_or_else(
        || {
            tracing::warn!(
                basket = %basket,
                "no allocation band for basket, falling back to the Blue Chip band"
            );
            (blue_chip_band(), true)
        },
        |band| (band, false),
    )
}

fn blue_chip_band() -> BasketBand {
    BasketBand {
        min_pct: dec!(0),
        max_pct: dec!(40),
        target: (dec!(20), dec!(35)),
        base_risk: 3,
    }
}

/// Classify an asset's portfolio share against its basket band.
///
/// Both hard limits are inclusive: a share exactly on the minimum or
/// maximum is `Optimal`.
///
/// # Errors
///
/// `DivideByZero` on a zero portfolio value, `InvalidRange` on negative
/// values.
pub fn analyze(
    portfolio_value: Decimal,
    asset_value: Decimal,
    basket: BasketKind,
) -> Result<AllocationStatus> {
    if portfolio_value == Decimal::ZERO {
        return Err(AdvisorError::DivideByZero("portfolio value"));
    }
    if portfolio_value < Decimal::ZERO || asset_value < Decimal::ZERO {
        return Err(AdvisorError::InvalidRange(format!(
            "portfolio and asset values must be non-negative, got {portfolio_value} and {asset_value}"
        )));
    }

    let portfolio_pct = asset_value / portfolio_value * dec!(100);
    let (band, band_fallback) = band_or_default(basket);

    let status = if portfolio_pct < band.min_pct {
        ExposureStatus::Underexposed
    } else if portfolio_pct > band.max_pct {
        ExposureStatus::Overexposed
    } else {
        ExposureStatus::Optimal
    };

    let hint = match status {
        ExposureStatus::Underexposed => AllocationHint::Increase,
        ExposureStatus::Optimal => AllocationHint::Maintain,
        ExposureStatus::Overexposed => AllocationHint::Decrease,
    };

    Ok(AllocationStatus {
        portfolio_pct,
        basket,
        status,
        target_band: band.target,
        hint,
        band_fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcoin_band_boundaries_are_inclusive() {
        // Exactly on the hard minimum.
        let at_min = analyze(dec!(100_000), dec!(60_000), BasketKind::Bitcoin).unwrap();
        assert_eq!(at_min.portfolio_pct, dec!(60));
        assert_eq!(at_min.status, ExposureStatus::Optimal);

        // Exactly on the hard maximum.
        let at_max = analyze(dec!(100_000), dec!(80_000), BasketKind::Bitcoin).unwrap();
        assert_eq!(at_max.status, ExposureStatus::Optimal);
    }

    #[test]
    fn test_bitcoin_under_and_over() {
        let under = analyze(dec!(100_000), dec!(59_999), BasketKind::Bitcoin).unwrap();
        assert_eq!(under.status, ExposureStatus::Underexposed);
        assert_eq!(under.hint, AllocationHint::Increase);

        let over = analyze(dec!(100_000), dec!(85_000), BasketKind::Bitcoin).unwrap();
        assert_eq!(over.status, ExposureStatus::Overexposed);
        assert_eq!(over.hint, AllocationHint::Decrease);
    }

    #[test]
    fn test_small_cap_over_limit() {
        let status = analyze(dec!(100_000), dec!(18_000), BasketKind::SmallCap).unwrap();
        assert_eq!(status.portfolio_pct, dec!(18));
        assert_eq!(status.status, ExposureStatus::Overexposed);
    }

    #[test]
    fn test_blue_chip_never_underexposed() {
        let empty = analyze(dec!(100_000), dec!(0), BasketKind::BlueChip).unwrap();
        assert_eq!(empty.status, ExposureStatus::Optimal);
    }

    #[test]
    fn test_unmapped_basket_uses_blue_chip_band() {
        let status = analyze(dec!(100_000), dec!(30_000), BasketKind::Unclassified).unwrap();
        assert!(status.band_fallback);
        assert_eq!(status.target_band, (dec!(20), dec!(35)));
        assert_eq!(status.status, ExposureStatus::Optimal);

        let over = analyze(dec!(100_000), dec!(45_000), BasketKind::Unclassified).unwrap();
        assert_eq!(over.status, ExposureStatus::Overexposed);
    }

    #[test]
    fn test_zero_portfolio_is_divide_by_zero() {
        let err = analyze(dec!(0), dec!(10), BasketKind::Bitcoin).unwrap_err();
        assert!(matches!(err, AdvisorError::DivideByZero(_)));
    }

    #[test]
    fn test_negative_values_rejected() {
        let err = analyze(dec!(100), dec!(-10), BasketKind::Bitcoin).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidRange(_)));
    }
}

//! Tentative Decision Stage
//!
//! First stage of the recommendation pipeline: a basket-specific decision
//! table over allocation status and the worth-investing gate. Produces a
//! tentative action plus the rationale/risk/rebalancing lines the rules
//! fire, in firing order. The market overlay runs afterward and can only
//! escalate what this stage decided.

use crate::model::{Action, AllocationStatus, BasketKind, ExposureStatus, FinancialMetrics};

/// Minimum IRR-equivalent return (percent) for an investment to be worth
/// entering.
pub const HURDLE_RATE_PCT: f64 = 8.0;

/// Output of the tentative stage, consumed by the overlay stage.
#[derive(Clone, Debug)]
pub struct Tentative {
    pub action: Action,
    pub worth_investing: bool,
    pub rationale: Vec<String>,
    pub risks: Vec<String>,
    pub rebalancing: Vec<String>,
}

/// The worth-investing gate: positive NPV and IRR above the hurdle.
pub fn worth_investing(metrics: &FinancialMetrics, hurdle_rate_pct: f64) -> bool {
    metrics.npv > 0.0 && metrics.irr > hurdle_rate_pct
}

/// Run the basket-specific decision table.
pub fn decide(
    allocation: &AllocationStatus,
    metrics: &FinancialMetrics,
    hurdle_rate_pct: f64,
) -> Tentative {
    let worth = worth_investing(metrics, hurdle_rate_pct);
    let mut rationale = Vec::new();
    let mut risks = Vec::new();
    let mut rebalancing = Vec::new();

    if worth {
        rationale.push(format!(
            "NPV is positive and the projected return clears the {hurdle_rate_pct}% hurdle."
        ));
    } else {
        rationale.push(format!(
            "NPV or the projected return fails the {hurdle_rate_pct}% hurdle."
        ));
    }

    let pct = allocation.portfolio_pct;
    let (_, target_max) = allocation.target_band;

    let action = match allocation.basket {
        BasketKind::Bitcoin => match allocation.status {
            ExposureStatus::Overexposed => {
                rationale.push(format!(
                    "Bitcoin is {pct:.1}% of the portfolio, above the 80% cap."
                ));
                rebalancing.push(format!(
                    "Reduce Bitcoin from {pct:.1}% toward the 60-75% target band."
                ));
                Action::DoNotBuy
            }
            ExposureStatus::Underexposed if worth => {
                rationale.push(
                    "The Bitcoin foundation is below its 60% floor and the metrics support \
                     filling it."
                        .into(),
                );
                rebalancing.push("Increase Bitcoin to at least 60% of the portfolio.".into());
                Action::Buy
            }
            ExposureStatus::Underexposed => {
                rationale.push(
                    "The Bitcoin foundation is below its 60% floor; build it gradually while \
                     the metrics stay weak."
                        .into(),
                );
                rebalancing.push("Increase Bitcoin to at least 60% of the portfolio.".into());
                Action::BuyLess
            }
            ExposureStatus::Optimal if worth && pct < target_max => {
                rationale.push("Bitcoin has headroom inside its target band.".into());
                Action::Buy
            }
            ExposureStatus::Optimal if worth => {
                rationale
                    .push("Bitcoin sits at the top of its target band; add only lightly.".into());
                Action::BuyLess
            }
            ExposureStatus::Optimal => {
                rationale.push("Hold the current Bitcoin band until metrics improve.".into());
                Action::DoNotBuy
            }
        },

        BasketKind::BlueChip | BasketKind::Unclassified => match allocation.status {
            ExposureStatus::Overexposed => {
                rationale.push(format!(
                    "Blue-chip exposure is {pct:.1}%, above the 40% cap."
                ));
                rebalancing.push(format!(
                    "Trim blue-chip exposure from {pct:.1}% back under 40%."
                ));
                Action::DoNotBuy
            }
            ExposureStatus::Underexposed if worth => {
                rationale.push("Blue-chip exposure is below its floor.".into());
                Action::Buy
            }
            ExposureStatus::Underexposed => {
                rationale.push(
                    "Blue-chip exposure is below its floor but the metrics do not support \
                     adding."
                        .into(),
                );
                Action::DoNotBuy
            }
            ExposureStatus::Optimal if worth && pct < target_max => {
                rationale.push("Blue-chip exposure has headroom inside its target band.".into());
                Action::Buy
            }
            ExposureStatus::Optimal if worth => {
                rationale.push(
                    "Blue-chip exposure sits at the top of its target band; add only lightly."
                        .into(),
                );
                Action::BuyLess
            }
            ExposureStatus::Optimal => {
                rationale.push("Metrics do not support adding blue-chip exposure.".into());
                Action::DoNotBuy
            }
        },

        BasketKind::SmallCap => match allocation.status {
            ExposureStatus::Overexposed => {
                rationale.push(format!(
                    "Small-cap exposure is {pct:.1}%, above the 15% hard cap; speculative \
                     exposure must come down."
                ));
                rebalancing.push(format!(
                    "Sell small caps down from {pct:.1}% to the 5-10% band."
                ));
                risks.push("Small caps can gap down faster than they can be exited.".into());
                Action::Sell
            }
            ExposureStatus::Underexposed | ExposureStatus::Optimal if worth => {
                rationale.push(
                    "Small-cap exposure fits its band; size the entry conservatively.".into(),
                );
                Action::BuyLess
            }
            _ => {
                rationale.push("Metrics do not support adding small-cap exposure.".into());
                Action::DoNotBuy
            }
        },
    };

    risks.push(basket_risk_line(allocation.basket));

    Tentative {
        action,
        worth_investing: worth,
        rationale,
        risks,
        rebalancing,
    }
}

fn basket_risk_line(basket: BasketKind) -> String {
    match basket {
        BasketKind::Bitcoin => {
            "Bitcoin remains volatile against fiat even as the lowest-risk basket.".into()
        }
        BasketKind::BlueChip => "Blue chips track Bitcoin drawdowns with higher beta.".into(),
        BasketKind::SmallCap => {
            "Small caps carry liquidity and project-failure risk; total loss is possible.".into()
        }
        BasketKind::Unclassified => {
            "Unclassified assets were analyzed against the Blue Chip band; treat sizing with \
             extra care."
                .into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation;
    use rust_decimal_macros::dec;

    fn metrics(npv: f64, irr: f64) -> FinancialMetrics {
        FinancialMetrics {
            npv,
            irr,
            cagr: 20.0,
            total_return_cagr: 22.0,
            roi: 60.0,
            price_roi: 50.0,
            staking_roi: 10.0,
            risk_factor: 3,
            beta_adjusted: 1.0,
            confidence_score: 70.0,
        }
    }

    fn alloc(basket: BasketKind, pct: rust_decimal::Decimal) -> AllocationStatus {
        allocation::analyze(dec!(100), pct, basket).unwrap()
    }

    #[test]
    fn test_worth_gate_needs_both_conditions() {
        assert!(worth_investing(&metrics(100.0, 12.0), HURDLE_RATE_PCT));
        assert!(!worth_investing(&metrics(-100.0, 12.0), HURDLE_RATE_PCT));
        assert!(!worth_investing(&metrics(100.0, 8.0), HURDLE_RATE_PCT));
    }

    #[test]
    fn test_overexposed_bitcoin_blocks_buying_despite_metrics() {
        let t = decide(
            &alloc(BasketKind::Bitcoin, dec!(85)),
            &metrics(5000.0, 20.0),
            HURDLE_RATE_PCT,
        );
        assert_eq!(t.action, Action::DoNotBuy);
        assert!(t.worth_investing);
        assert!(!t.rebalancing.is_empty());
    }

    #[test]
    fn test_bitcoin_with_headroom_is_buy() {
        let t = decide(
            &alloc(BasketKind::Bitcoin, dec!(65)),
            &metrics(5000.0, 20.0),
            HURDLE_RATE_PCT,
        );
        assert_eq!(t.action, Action::Buy);
    }

    #[test]
    fn test_bitcoin_top_of_band_is_buy_less() {
        let t = decide(
            &alloc(BasketKind::Bitcoin, dec!(78)),
            &metrics(5000.0, 20.0),
            HURDLE_RATE_PCT,
        );
        assert_eq!(t.action, Action::BuyLess);
    }

    #[test]
    fn test_overexposed_small_cap_is_sell() {
        let t = decide(
            &alloc(BasketKind::SmallCap, dec!(18)),
            &metrics(5000.0, 20.0),
            HURDLE_RATE_PCT,
        );
        assert_eq!(t.action, Action::Sell);
    }

    #[test]
    fn test_small_cap_in_band_is_buy_less() {
        let t = decide(
            &alloc(BasketKind::SmallCap, dec!(7)),
            &metrics(5000.0, 20.0),
            HURDLE_RATE_PCT,
        );
        assert_eq!(t.action, Action::BuyLess);
    }

    #[test]
    fn test_failed_hurdle_blocks_blue_chip() {
        let t = decide(
            &alloc(BasketKind::BlueChip, dec!(25)),
            &metrics(5000.0, 5.0),
            HURDLE_RATE_PCT,
        );
        assert_eq!(t.action, Action::DoNotBuy);
    }

    #[test]
    fn test_rationale_preserves_firing_order() {
        let t = decide(
            &alloc(BasketKind::Bitcoin, dec!(85)),
            &metrics(5000.0, 20.0),
            HURDLE_RATE_PCT,
        );
        assert!(t.rationale[0].contains("hurdle"));
        assert!(t.rationale[1].contains("80% cap"));
    }
}

//! Recommendation Engine
//!
//! Combines financial metrics, allocation status, and market conditions
//! into the final recommendation record via a two-stage pure pipeline:
//! a basket-specific tentative decision, then an escalation-only market
//! overlay. One pass per invocation, no cycles, no retries.

pub mod overlay;
pub mod tentative;

pub use tentative::{HURDLE_RATE_PCT, Tentative};

use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::error::Result;
use crate::metrics::{self, ProjectionParams};
use crate::model::{
    AllocationStatus, AssetProfile, BasketKind, ExposureStatus, FinancialMetrics,
    InvestmentRecommendation, MarketConditions, MarketState, TimeSeries,
};
use crate::{allocation, market};

/// Deterministic decision engine. Stateless apart from the configured
/// hurdle rate; safe to share across concurrent analyses.
#[derive(Clone, Copy, Debug)]
pub struct RecommendationEngine {
    hurdle_rate_pct: f64,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self {
            hurdle_rate_pct: HURDLE_RATE_PCT,
        }
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the default hurdle rate (percent).
    pub const fn with_hurdle_rate(hurdle_rate_pct: f64) -> Self {
        Self { hurdle_rate_pct }
    }

    /// Run the full pipeline: tentative decision, market overlay, final
    /// record assembly.
    pub fn recommend(
        &self,
        allocation: &AllocationStatus,
        metrics: &FinancialMetrics,
        conditions: &MarketConditions,
    ) -> InvestmentRecommendation {
        let tentative = tentative::decide(allocation, metrics, self.hurdle_rate_pct);
        tracing::debug!(action = %tentative.action, basket = %allocation.basket, "tentative decision");

        let tentative = overlay::apply(tentative, conditions, allocation.basket);
        tracing::debug!(action = %tentative.action, "after market overlay");

        finalize(tentative, allocation, conditions)
    }
}

/// Bundle of everything one analysis run produces.
#[derive(Clone, Debug)]
pub struct AssetAnalysis {
    pub metrics: FinancialMetrics,
    pub allocation: AllocationStatus,
    pub conditions: MarketConditions,
    pub recommendation: InvestmentRecommendation,
}

/// Portfolio snapshot for one asset, as the portfolio provider supplies it.
#[derive(Clone, Copy, Debug)]
pub struct PortfolioSnapshot {
    pub total_value: rust_decimal::Decimal,
    pub asset_value: rust_decimal::Decimal,
}

/// Convenience entry point running all four components in order for one
/// asset: classifier, metrics, allocation, engine.
pub fn analyze_asset(
    series: &TimeSeries,
    profile: &AssetProfile,
    snapshot: &PortfolioSnapshot,
    regime: &market::RegimeInputs,
    params: &ProjectionParams,
    benchmark_returns: Option<&[f64]>,
) -> Result<AssetAnalysis> {
    let conditions = market::classify_conditions(regime);
    let metrics = metrics::compute(series, profile, &conditions, params, benchmark_returns)?;
    let allocation = allocation::analyze(snapshot.total_value, snapshot.asset_value, profile.basket)?;
    let recommendation = RecommendationEngine::new().recommend(&allocation, &metrics, &conditions);

    Ok(AssetAnalysis {
        metrics,
        allocation,
        conditions,
        recommendation,
    })
}

/// Assemble the final record. Rationale, risks, and rebalancing lines are
/// joined in firing order and never re-sorted.
fn finalize(
    tentative: Tentative,
    allocation: &AllocationStatus,
    conditions: &MarketConditions,
) -> InvestmentRecommendation {
    let overexposed = allocation.status == ExposureStatus::Overexposed;
    let above_target = allocation.portfolio_pct > allocation.target_band.1;

    let base_risk =
        allocation::band_or_default(allocation.basket).0.base_risk;
    let bump: u8 = if overexposed {
        2
    } else if above_target {
        1
    } else {
        0
    };
    let risk_factor = (base_risk + bump).clamp(1, 5);

    let should_diversify = allocation.basket != BasketKind::Bitcoin
        || allocation.portfolio_pct > dec!(80);

    InvestmentRecommendation {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        action: tentative.action,
        worth_investing: tentative.worth_investing,
        good_timing: conditions.state != MarketState::Bearish,
        appropriate_amount: !overexposed,
        risk_factor,
        should_diversify,
        rationale: tentative.rationale.join(" "),
        risks: tentative.risks.join(" "),
        rebalancing_actions: tentative.rebalancing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, PricePoint, SourceKind};
    use rust_decimal_macros::dec;

    fn strong_metrics() -> FinancialMetrics {
        FinancialMetrics {
            npv: 8_000.0,
            irr: 18.0,
            cagr: 25.0,
            total_return_cagr: 27.0,
            roi: 80.0,
            price_roi: 70.0,
            staking_roi: 10.0,
            risk_factor: 2,
            beta_adjusted: 1.0,
            confidence_score: 85.0,
        }
    }

    fn neutral_conditions() -> MarketConditions {
        MarketConditions {
            state: MarketState::Neutral,
            sentiment_score: 50.0,
            smart_money_active: false,
            fed_rate_change_pct: 0.0,
            aviv_ratio: 1.2,
            active_supply_pct: 50.0,
            vaulted_supply_pct: 40.0,
        }
    }

    fn alloc(basket: BasketKind, asset_value: rust_decimal::Decimal) -> AllocationStatus {
        allocation::analyze(dec!(100), asset_value, basket).unwrap()
    }

    #[test]
    fn test_overexposed_bitcoin_is_do_not_buy_despite_strong_metrics() {
        let engine = RecommendationEngine::new();
        let rec = engine.recommend(
            &alloc(BasketKind::Bitcoin, dec!(85)),
            &strong_metrics(),
            &neutral_conditions(),
        );

        assert_eq!(rec.action, Action::DoNotBuy);
        assert!(rec.worth_investing);
        assert!(!rec.appropriate_amount);
        // Base 2, +2 for over-allocation.
        assert_eq!(rec.risk_factor, 4);
        assert!(rec.should_diversify);
        assert!(!rec.rebalancing_actions.is_empty());
    }

    #[test]
    fn test_overexposed_small_cap_is_sell() {
        let engine = RecommendationEngine::new();
        let rec = engine.recommend(
            &alloc(BasketKind::SmallCap, dec!(18)),
            &strong_metrics(),
            &neutral_conditions(),
        );

        assert_eq!(rec.action, Action::Sell);
        // Base 4, +2, clamped to 5.
        assert_eq!(rec.risk_factor, 5);
    }

    #[test]
    fn test_bearish_smart_money_always_sells() {
        let mut conditions = neutral_conditions();
        conditions.state = MarketState::Bearish;
        conditions.smart_money_active = true;

        let engine = RecommendationEngine::new();
        for (basket, value) in [
            (BasketKind::Bitcoin, dec!(65)),
            (BasketKind::BlueChip, dec!(25)),
            (BasketKind::SmallCap, dec!(7)),
        ] {
            let rec = engine.recommend(&alloc(basket, value), &strong_metrics(), &conditions);
            assert_eq!(rec.action, Action::Sell, "basket {basket} did not sell");
            assert!(!rec.good_timing);
        }
    }

    #[test]
    fn test_bitcoin_in_band_does_not_force_diversification() {
        let engine = RecommendationEngine::new();
        let rec = engine.recommend(
            &alloc(BasketKind::Bitcoin, dec!(65)),
            &strong_metrics(),
            &neutral_conditions(),
        );
        assert_eq!(rec.action, Action::Buy);
        assert!(!rec.should_diversify);
        assert!(rec.good_timing);
        assert_eq!(rec.risk_factor, 2);
    }

    #[test]
    fn test_above_target_bumps_risk_by_one() {
        // 78% is inside the hard band but above the 75% target edge.
        let engine = RecommendationEngine::new();
        let rec = engine.recommend(
            &alloc(BasketKind::Bitcoin, dec!(78)),
            &strong_metrics(),
            &neutral_conditions(),
        );
        assert_eq!(rec.risk_factor, 3);
    }

    #[test]
    fn test_full_pipeline_end_to_end() {
        let points = (0..=36)
            .map(|month| {
                let value = 2_000.0 * (1.03_f64).powi(month);
                PricePoint::from_epoch(i64::from(month) * 2_629_800, value).unwrap()
            })
            .collect();
        let series = TimeSeries::new(points, SourceKind::Primary).unwrap();

        let profile = AssetProfile {
            id: "ETH".into(),
            basket: BasketKind::BlueChip,
            current_price: dec!(3000),
            volatility_30d: 55.0,
            onchain_growth: 15.0,
            aviv_ratio: 0.9,
            active_supply_pct: 45.0,
            vaulted_supply_pct: 40.0,
            staking_yield: 4.0,
            beta_raw: 1.2,
        };
        let snapshot = PortfolioSnapshot {
            total_value: dec!(100_000),
            asset_value: dec!(25_000),
        };
        let regime = market::RegimeInputs {
            aviv_ratio: 0.9,
            active_supply_pct: 45.0,
            vaulted_supply_pct: 40.0,
            smart_money_active: false,
            fed_rate_change_pct: 0.0,
            sentiment_score: 55.0,
        };
        let params = ProjectionParams {
            investment: 10_000.0,
            horizon_years: 5,
            discount_rate_pct: 8.0,
        };

        let analysis = analyze_asset(&series, &profile, &snapshot, &regime, &params, None).unwrap();

        assert_eq!(analysis.conditions.state, MarketState::Neutral);
        assert_eq!(analysis.allocation.status, ExposureStatus::Optimal);
        assert!(analysis.metrics.npv > 0.0);
        // Strong growth, neutral market, in-band allocation: an entry.
        assert!(matches!(
            analysis.recommendation.action,
            Action::Buy | Action::BuyLess
        ));
        assert!(analysis.recommendation.worth_investing);
        assert!(analysis.recommendation.should_diversify);
    }
}

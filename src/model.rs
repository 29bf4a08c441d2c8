//! Domain Models
//!
//! Core data types for investment analysis. Ratio and return mathematics is
//! IEEE-754 `f64` end to end (the output contract for the reporting layer);
//! portfolio accounting uses `rust_decimal` - never use f64 for money!
//!
//! All percentage fields are expressed on a 0-100 scale, not 0-1 fractions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AdvisorError, Result};

/// Seconds in a 365.25-day year, the time base for all annualization.
pub const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// Provenance tag for a time series, drives confidence scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Directly from the originating exchange or node.
    Primary,
    /// Aggregator or mirror of a primary source.
    Secondary,
    /// Interpolated, backfilled, or otherwise derived.
    Estimated,
}

/// A single observation in a price or on-chain series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation time (UTC).
    pub timestamp: DateTime<Utc>,

    /// Observed value (price in USD, or an on-chain metric level).
    pub value: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Build a point from epoch seconds, the other input form the
    /// series providers use.
    pub fn from_epoch(epoch_secs: i64, value: f64) -> Result<Self> {
        let timestamp = DateTime::from_timestamp(epoch_secs, 0).ok_or_else(|| {
            AdvisorError::InvalidRange(format!("epoch seconds {epoch_secs} out of range"))
        })?;
        Ok(Self { timestamp, value })
    }
}

/// A validated, time-ordered series of observations.
///
/// Construction enforces the two invariants every derived calculation
/// relies on: at least two points, and strictly increasing timestamps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<PricePoint>,
    source: SourceKind,
}

impl TimeSeries {
    /// Minimum number of points for any derived calculation.
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: Vec<PricePoint>, source: SourceKind) -> Result<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(AdvisorError::InsufficientData {
                needed: Self::MIN_POINTS,
                got: points.len(),
            });
        }

        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(AdvisorError::InvalidRange(format!(
                    "timestamps must be strictly increasing, got {} after {}",
                    pair[1].timestamp, pair[0].timestamp
                )));
            }
        }

        Ok(Self { points, source })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// First observation. Cannot fail: construction guarantees two points.
    pub fn first(&self) -> PricePoint {
        self.points[0]
    }

    /// Last observation. Cannot fail: construction guarantees two points.
    pub fn last(&self) -> PricePoint {
        self.points[self.points.len() - 1]
    }

    /// Time span between first and last observation, in 365.25-day years.
    pub fn span_years(&self) -> f64 {
        let span = self.last().timestamp - self.first().timestamp;
        span.num_seconds() as f64 / SECONDS_PER_YEAR
    }
}

/// Risk/asset-class bucket with its own target allocation band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasketKind {
    /// Portfolio foundation.
    Bitcoin,
    /// Established large caps (ETH and peers).
    BlueChip,
    /// Speculative small caps.
    SmallCap,
    /// Not yet assigned to a basket (new listings); has no band entry
    /// of its own and analyzes against the BlueChip band.
    Unclassified,
}

impl std::fmt::Display for BasketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bitcoin => "Bitcoin",
            Self::BlueChip => "Blue Chip",
            Self::SmallCap => "Small Cap",
            Self::Unclassified => "Unclassified",
        };
        f.write_str(name)
    }
}

/// Immutable per-asset snapshot supplied by the data layer for one
/// analysis run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetProfile {
    /// Ticker symbol (e.g., "BTC", "ETH").
    pub id: String,

    /// Basket the asset belongs to.
    pub basket: BasketKind,

    /// Current price in USD.
    pub current_price: Decimal,

    /// Trailing 30-day annualized volatility (percent).
    pub volatility_30d: f64,

    /// On-chain network growth (percent, can be negative).
    pub onchain_growth: f64,

    /// Active-to-vaulted value ratio (over/under-valuation proxy).
    pub aviv_ratio: f64,

    /// Share of supply frequently transacted (percent).
    pub active_supply_pct: f64,

    /// Share of supply held long term (percent).
    pub vaulted_supply_pct: f64,

    /// Annual staking yield (percent, 0 for non-staking assets).
    pub staking_yield: f64,

    /// Raw CAPM beta against the benchmark, as supplied upstream.
    pub beta_raw: f64,
}

/// Discrete market regime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketState {
    Bullish,
    Neutral,
    Bearish,
}

impl std::fmt::Display for MarketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bullish => "bullish",
            Self::Neutral => "neutral",
            Self::Bearish => "bearish",
        };
        f.write_str(name)
    }
}

/// Market regime snapshot, derived once per run and read-only afterward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketConditions {
    /// Classified regime.
    pub state: MarketState,

    /// Aggregate sentiment reading (percent scale), passed through
    /// from the regime provider.
    pub sentiment_score: f64,

    /// True when large/informed holders are net-selling.
    pub smart_money_active: bool,

    /// Most recent Fed funds rate change (percentage points).
    pub fed_rate_change_pct: f64,

    /// AVIV ratio the classification was made from.
    pub aviv_ratio: f64,

    /// Active supply share (percent).
    pub active_supply_pct: f64,

    /// Vaulted supply share (percent).
    pub vaulted_supply_pct: f64,
}

/// Financial metrics for one asset, produced once per run and read-only
/// downstream. All monetary amounts in USD, rates in percent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Net present value of the projected position over the horizon.
    pub npv: f64,

    /// IRR-equivalent annual return used for the hurdle-rate gate.
    pub irr: f64,

    /// Price-only compound annual growth rate.
    pub cagr: f64,

    /// CAGR including staking yield.
    pub total_return_cagr: f64,

    /// Total return over the horizon (price + staking).
    pub roi: f64,

    /// Price appreciation over the observed series.
    pub price_roi: f64,

    /// Cumulative staking return over the horizon.
    pub staking_roi: f64,

    /// Composite risk on the 1-5 scale (1 = lowest).
    pub risk_factor: u8,

    /// On-chain-adjusted beta blend.
    pub beta_adjusted: f64,

    /// Data-quality confidence in [0, 100].
    pub confidence_score: f64,
}

/// Exposure classification against a basket's allocation band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExposureStatus {
    Underexposed,
    Optimal,
    Overexposed,
}

/// Direction the allocation should move, mirrored from the status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationHint {
    Increase,
    Maintain,
    Decrease,
}

/// An asset's share of the portfolio, classified against its basket band.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocationStatus {
    /// Asset value as a share of total portfolio value (percent).
    pub portfolio_pct: Decimal,

    /// Basket the classification used.
    pub basket: BasketKind,

    /// Position relative to the basket's hard limits.
    pub status: ExposureStatus,

    /// Recommended (target) band, min and max percent.
    pub target_band: (Decimal, Decimal),

    /// Direction to move the allocation.
    pub hint: AllocationHint,

    /// True when the basket had no band entry and the BlueChip band
    /// was substituted; callers surface this to the user.
    pub band_fallback: bool,
}

/// Final recommendation action, ordered from most to least aggressive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    BuyLess,
    DoNotBuy,
    Sell,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Buy => "Buy",
            Self::BuyLess => "Buy Less",
            Self::DoNotBuy => "Do Not Buy",
            Self::Sell => "Sell",
        };
        f.write_str(name)
    }
}

/// The engine's output record, consumed by the reporting layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvestmentRecommendation {
    /// Unique id for this recommendation record.
    pub id: Uuid,

    /// When the recommendation was produced.
    pub generated_at: DateTime<Utc>,

    /// Final action after all overlays.
    pub action: Action,

    /// NPV positive and IRR above the hurdle rate.
    pub worth_investing: bool,

    /// Market regime does not argue against entering now.
    pub good_timing: bool,

    /// Current allocation is not above the basket's hard cap.
    pub appropriate_amount: bool,

    /// Basket-aware risk on the 1-5 scale.
    pub risk_factor: u8,

    /// True when the position argues for spreading into other baskets.
    pub should_diversify: bool,

    /// Concatenation of every triggered rule's rationale, in firing order.
    pub rationale: String,

    /// Concatenation of every identified risk, in firing order.
    pub risks: String,

    /// Concrete rebalancing steps, append-only, in firing order.
    pub rebalancing_actions: Vec<String>,
}

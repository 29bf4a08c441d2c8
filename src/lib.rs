//! # cointime-advisor
//!
//! Investment metrics and recommendation engine for cryptocurrency
//! portfolios. Turns price/on-chain time series into financial metrics
//! (NPV, IRR-equivalent return, CAGR, beta, volatility, composite risk)
//! and a rule-based Buy / Buy Less / Do Not Buy / Sell decision gated by
//! market-regime classification and per-basket allocation limits.
//!
//! ## Philosophy
//!
//! - **Explainable over clever** - every metric carries its intermediate
//!   values, every decision carries the rationale of the rules that fired
//! - **Escalate, never relax** - market overlays can only make a tentative
//!   decision more conservative
//! - **Tables over branches** - allocation bands, AVIV thresholds, and
//!   scoring weights are data, independently testable and tunable
//! - **Position limits** - the Bitcoin foundation and the per-basket caps
//!   bound every recommendation
//!
//! ## Pipeline
//!
//! ```text
//! series + profile ──► metrics::compute ──► FinancialMetrics ─┐
//! regime inputs  ────► market::classify ──► MarketConditions ─┼─► engine ─► InvestmentRecommendation
//! portfolio snapshot ► allocation::analyze ► AllocationStatus ┘
//! ```
//!
//! Every component is a pure, synchronous function over immutable inputs;
//! any number of analyses may run concurrently with no coordination. I/O,
//! caching, and retries belong to the caller's data layer.

pub mod allocation;
pub mod engine;
pub mod error;
pub mod market;
pub mod metrics;
pub mod model;

pub use engine::{
    AssetAnalysis, HURDLE_RATE_PCT, PortfolioSnapshot, RecommendationEngine, analyze_asset,
};
pub use error::{AdvisorError, Result};
pub use market::RegimeInputs;
pub use metrics::{CagrBreakdown, ConfidenceLevel, ConfidenceScore, NpvProjection, ProjectionParams};
pub use model::{
    Action, AllocationHint, AllocationStatus, AssetProfile, BasketKind, ExposureStatus,
    FinancialMetrics, InvestmentRecommendation, MarketConditions, MarketState, PricePoint,
    SourceKind, TimeSeries,
};

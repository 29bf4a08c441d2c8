//! Net Present Value Projection
//!
//! Projects a position forward with a growth rate derived from trailing
//! CAGR and adjusted by on-chain signals, then discounts each year back.
//! Deterministic; no simulation or randomness.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::metrics::cagr;
use crate::model::TimeSeries;

/// AVIV below this reads as undervalued and boosts projected growth.
pub const UNDERVALUED_AVIV: f64 = 1.0;

/// AVIV above this reads as overvalued and drags projected growth.
pub const OVERVALUED_AVIV: f64 = 2.0;

/// Growth multiplier applied when undervalued.
pub const UNDERVALUED_BOOST: f64 = 1.2;

/// Growth multiplier applied when overvalued.
pub const OVERVALUED_DRAG: f64 = 0.8;

/// One year of the projection table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct YearProjection {
    /// Year index, starting at 1.
    pub year: u32,

    /// Projected position value at the end of the year.
    pub projected_value: f64,

    /// The same value discounted back to today.
    pub present_value: f64,
}

/// NPV with its year-by-year projection table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NpvProjection {
    /// Sum of present values minus the initial investment.
    pub npv: f64,

    /// On-chain-adjusted annual growth rate (percent) the projection
    /// compounds at.
    pub annual_growth_pct: f64,

    /// Per-year projected and discounted values, in year order.
    pub years: Vec<YearProjection>,
}

impl NpvProjection {
    /// The adjusted annual growth rate doubles as the IRR-equivalent
    /// return: it is the single rate the projection compounds at, so it is
    /// what the hurdle gate compares against.
    pub fn irr_equivalent(&self) -> f64 {
        self.annual_growth_pct
    }
}

/// Project `investment` over `horizon_years` and discount at
/// `discount_rate_pct`.
///
/// Base growth is the series' trailing CAGR, scaled by network growth and
/// by the AVIV valuation multiplier.
pub fn project(
    investment: f64,
    series: &TimeSeries,
    horizon_years: u32,
    discount_rate_pct: f64,
    network_growth_pct: f64,
    aviv_ratio: f64,
) -> Result<NpvProjection> {
    if investment <= 0.0 {
        return Err(AdvisorError::InvalidRange(format!(
            "investment must be positive, got {investment}"
        )));
    }
    if horizon_years == 0 {
        return Err(AdvisorError::InvalidRange(
            "projection horizon must be at least one year".into(),
        ));
    }

    let discount_base = 1.0 + discount_rate_pct / 100.0;
    if discount_base == 0.0 {
        return Err(AdvisorError::DivideByZero("discount factor"));
    }

    let base_growth = cagr::calculate(series)?.cagr_pct / 100.0;
    let adjusted_growth =
        base_growth * (1.0 + network_growth_pct / 100.0) * valuation_multiplier(aviv_ratio);

    let mut years = Vec::with_capacity(horizon_years as usize);
    let mut pv_sum = 0.0;
    for year in 1..=horizon_years {
        let projected_value = investment * (1.0 + adjusted_growth).powi(year as i32);
        let present_value = projected_value / discount_base.powi(year as i32);
        pv_sum += present_value;
        years.push(YearProjection {
            year,
            projected_value,
            present_value,
        });
    }

    Ok(NpvProjection {
        npv: pv_sum - investment,
        annual_growth_pct: adjusted_growth * 100.0,
        years,
    })
}

fn valuation_multiplier(aviv_ratio: f64) -> f64 {
    if aviv_ratio < UNDERVALUED_AVIV {
        UNDERVALUED_BOOST
    } else if aviv_ratio > OVERVALUED_AVIV {
        OVERVALUED_DRAG
    } else {
        1.0
    }
}

//! Compound Annual Growth Rate
//!
//! Every intermediate of the calculation is kept on the breakdown record so
//! the reporting layer can show the user how the number was produced, not
//! just the number.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::model::TimeSeries;

/// Auditable CAGR breakdown: the seven values of
/// `cagr = ((final/initial)^(1/years) - 1) * 100`, in evaluation order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CagrBreakdown {
    /// First observed value.
    pub initial: f64,

    /// Last observed value.
    pub final_value: f64,

    /// Series span in 365.25-day years.
    pub years: f64,

    /// `final / initial`.
    pub growth_ratio: f64,

    /// `1 / years`.
    pub exponent: f64,

    /// `growth_ratio ^ exponent`.
    pub base: f64,

    /// `(base - 1) * 100`.
    pub cagr_pct: f64,
}

/// Compute CAGR over a validated series.
///
/// # Errors
///
/// `InvalidRange` when the span is not positive, `DivideByZero` when the
/// initial value is zero. The two-point minimum is enforced by
/// [`TimeSeries`] construction.
pub fn calculate(series: &TimeSeries) -> Result<CagrBreakdown> {
    let initial = series.first().value;
    let final_value = series.last().value;
    let years = series.span_years();

    if years <= 0.0 {
        return Err(AdvisorError::InvalidRange(format!(
            "series span must be positive, got {years} years"
        )));
    }
    if initial == 0.0 {
        return Err(AdvisorError::DivideByZero("initial series value"));
    }

    let growth_ratio = final_value / initial;
    let exponent = 1.0 / years;
    let base = growth_ratio.powf(exponent);
    let cagr_pct = (base - 1.0) * 100.0;

    Ok(CagrBreakdown {
        initial,
        final_value,
        years,
        growth_ratio,
        exponent,
        base,
        cagr_pct,
    })
}

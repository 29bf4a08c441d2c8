//! Beta and Volatility
//!
//! Classic CAPM beta (covariance over benchmark variance) plus an
//! on-chain-adjusted variant that conditions the raw figure on supply
//! distribution and network growth.

use crate::error::{AdvisorError, Result};
use crate::model::TimeSeries;

/// Vaulted-supply share above which beta is dampened (strong holders).
pub const VAULTED_DAMP_THRESHOLD_PCT: f64 = 70.0;

/// Dampening applied above [`VAULTED_DAMP_THRESHOLD_PCT`].
pub const VAULTED_DAMP: f64 = 0.8;

/// Active-supply share above which beta is amplified (hot supply).
pub const ACTIVE_AMP_THRESHOLD_PCT: f64 = 80.0;

/// Amplification applied above [`ACTIVE_AMP_THRESHOLD_PCT`].
pub const ACTIVE_AMP: f64 = 1.2;

/// Network growth inside (-band, +band) reads as a quiet network.
pub const QUIET_GROWTH_BAND_PCT: f64 = 5.0;

/// Dampening applied inside the quiet band.
pub const QUIET_GROWTH_DAMP: f64 = 0.9;

/// Weight of the traditional beta in the final blend.
pub const TRADITIONAL_WEIGHT: f64 = 0.6;

/// Weight of the on-chain-adjusted beta in the final blend.
pub const ONCHAIN_WEIGHT: f64 = 0.4;

/// Period-over-period simple returns of a series.
///
/// # Errors
///
/// `DivideByZero` when any observation the next return divides by is zero.
pub fn returns_from_series(series: &TimeSeries) -> Result<Vec<f64>> {
    series
        .points()
        .windows(2)
        .map(|pair| {
            if pair[0].value == 0.0 {
                Err(AdvisorError::DivideByZero("return base value"))
            } else {
                Ok((pair[1].value - pair[0].value) / pair[0].value)
            }
        })
        .collect()
}

/// Sample standard deviation of returns, in percent.
pub fn volatility(returns: &[f64]) -> Result<f64> {
    if returns.len() < 2 {
        return Err(AdvisorError::InsufficientData {
            needed: 2,
            got: returns.len(),
        });
    }
    Ok(sample_variance(returns).sqrt() * 100.0)
}

/// CAPM beta over paired return series of equal length.
///
/// # Errors
///
/// `InvalidRange` on mismatched lengths, `InsufficientData` below two
/// pairs, `DivideByZero` when the benchmark never moves.
pub fn calculate(asset_returns: &[f64], benchmark_returns: &[f64]) -> Result<f64> {
    if asset_returns.len() != benchmark_returns.len() {
        return Err(AdvisorError::InvalidRange(format!(
            "return series must pair up, got {} asset vs {} benchmark observations",
            asset_returns.len(),
            benchmark_returns.len()
        )));
    }
    if asset_returns.len() < 2 {
        return Err(AdvisorError::InsufficientData {
            needed: 2,
            got: asset_returns.len(),
        });
    }

    let benchmark_variance = sample_variance(benchmark_returns);
    if benchmark_variance == 0.0 {
        return Err(AdvisorError::DivideByZero("benchmark variance"));
    }

    Ok(sample_covariance(asset_returns, benchmark_returns) / benchmark_variance)
}

/// Condition a raw beta on supply distribution and network growth.
pub fn onchain_adjusted(
    raw_beta: f64,
    active_supply_pct: f64,
    vaulted_supply_pct: f64,
    network_growth_pct: f64,
) -> f64 {
    let mut adjusted = raw_beta;
    if vaulted_supply_pct > VAULTED_DAMP_THRESHOLD_PCT {
        adjusted *= VAULTED_DAMP;
    }
    if active_supply_pct > ACTIVE_AMP_THRESHOLD_PCT {
        adjusted *= ACTIVE_AMP;
    }
    if network_growth_pct.abs() < QUIET_GROWTH_BAND_PCT {
        adjusted *= QUIET_GROWTH_DAMP;
    }
    adjusted
}

/// Blend of the traditional and on-chain views, 0.6 / 0.4.
pub fn blended(traditional: f64, onchain: f64) -> f64 {
    TRADITIONAL_WEIGHT * traditional + ONCHAIN_WEIGHT * onchain
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    let mean_a = mean(a);
    let mean_b = mean(b);
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / (a.len() - 1) as f64
}

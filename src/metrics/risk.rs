//! Composite Risk Scoring
//!
//! Weighted blend of five risk views on a 0-100 scale, scaled by the market
//! regime and mapped onto the 1-5 factor the recommendation record carries.
//! Every weight and threshold is a named constant so the policy can be
//! tuned and tested without touching control flow.

use crate::model::{BasketKind, MarketState};

/// Component weights. Must sum to 1.
pub const VOLATILITY_WEIGHT: f64 = 0.30;
pub const LIQUIDITY_WEIGHT: f64 = 0.20;
pub const TECHNICAL_WEIGHT: f64 = 0.20;
pub const FUNDAMENTAL_WEIGHT: f64 = 0.15;
pub const COINTIME_WEIGHT: f64 = 0.15;

/// Regime multipliers applied to the weighted composite.
pub const BEARISH_MULTIPLIER: f64 = 1.2;
pub const BULLISH_MULTIPLIER: f64 = 0.9;
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Additive points for a Fed rate move larger than the attention band.
pub const RATE_SHOCK_POINTS: f64 = 5.0;

/// Fed rate change (percentage points) above which the shock applies.
pub const RATE_ATTENTION_PCT: f64 = 0.25;

/// Additive points while smart money is distributing.
pub const SMART_MONEY_POINTS: f64 = 5.0;

/// Per-basket offset applied before clamping.
pub fn basket_offset(basket: BasketKind) -> f64 {
    match basket {
        BasketKind::Bitcoin => -5.0,
        BasketKind::BlueChip => 0.0,
        BasketKind::SmallCap | BasketKind::Unclassified => 10.0,
    }
}

/// Weighted composite risk in [0, 100].
#[allow(clippy::too_many_arguments)]
pub fn composite(
    basket: BasketKind,
    volatility_pct: f64,
    network_growth_pct: f64,
    aviv_ratio: f64,
    active_supply_pct: f64,
    vaulted_supply_pct: f64,
    fed_rate_change_pct: f64,
    smart_money_active: bool,
    state: MarketState,
) -> f64 {
    let weighted = VOLATILITY_WEIGHT * volatility_pct.clamp(0.0, 100.0)
        + LIQUIDITY_WEIGHT * liquidity_risk(active_supply_pct, vaulted_supply_pct)
        + TECHNICAL_WEIGHT * technical_risk(aviv_ratio, active_supply_pct)
        + FUNDAMENTAL_WEIGHT * fundamental_risk(network_growth_pct)
        + COINTIME_WEIGHT * cointime_risk(aviv_ratio);

    let mut scaled = weighted * regime_multiplier(state) + basket_offset(basket);
    if fed_rate_change_pct.abs() > RATE_ATTENTION_PCT {
        scaled += RATE_SHOCK_POINTS;
    }
    if smart_money_active {
        scaled += SMART_MONEY_POINTS;
    }

    scaled.clamp(0.0, 100.0)
}

/// Map a 0-100 composite onto the 1-5 risk factor.
pub fn to_scale(composite: f64) -> u8 {
    let factor = (composite / 20.0).ceil() as i64;
    factor.clamp(1, 5) as u8
}

pub const fn regime_multiplier(state: MarketState) -> f64 {
    match state {
        MarketState::Bearish => BEARISH_MULTIPLIER,
        MarketState::Bullish => BULLISH_MULTIPLIER,
        MarketState::Neutral => NEUTRAL_MULTIPLIER,
    }
}

/// Liquidity view: heavily vaulted supply means committed holders and a
/// calmer float; hot active supply means the opposite.
fn liquidity_risk(active_supply_pct: f64, vaulted_supply_pct: f64) -> f64 {
    if vaulted_supply_pct > 70.0 {
        30.0
    } else if active_supply_pct > 80.0 {
        80.0
    } else {
        50.0
    }
}

/// Technical view, using AVIV together with active supply as a
/// profit-taking proxy.
fn technical_risk(aviv_ratio: f64, active_supply_pct: f64) -> f64 {
    if aviv_ratio > 1.9 && active_supply_pct > 70.0 {
        85.0
    } else if aviv_ratio > 1.5 {
        65.0
    } else {
        45.0
    }
}

/// Fundamental view: sign and magnitude of network growth.
fn fundamental_risk(network_growth_pct: f64) -> f64 {
    if network_growth_pct >= 20.0 {
        25.0
    } else if network_growth_pct >= 5.0 {
        40.0
    } else if network_growth_pct > -5.0 {
        55.0
    } else {
        75.0
    }
}

/// Cointime view: AVIV extremes on both ends.
fn cointime_risk(aviv_ratio: f64) -> f64 {
    if aviv_ratio < 0.5 {
        35.0
    } else if aviv_ratio < 1.5 {
        45.0
    } else if aviv_ratio < 1.9 {
        65.0
    } else {
        85.0
    }
}

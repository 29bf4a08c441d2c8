//! Market State Classifier
//!
//! Maps the AVIV ratio plus supply distribution and the smart-money flag
//! onto a discrete regime. Pure lookup and override: the band table is a
//! constant so each band is independently testable, and the smart-money
//! override can only strengthen a lean the table already indicates.

use serde::{Deserialize, Serialize};

use crate::model::{MarketConditions, MarketState};

/// Directional lean a band carries before the smart-money override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lean {
    Bullish,
    Flat,
    Bearish,
}

/// One row of the AVIV threshold table. Bands are half-open
/// `[lower, upper)`, monotonic, and cover `[0, inf)`.
#[derive(Clone, Copy, Debug)]
pub struct AvivBand {
    pub lower: f64,
    pub upper: f64,
    pub label: &'static str,
    pub state: MarketState,
    pub lean: Lean,
}

/// The threshold table. The fair-value band's lean is refined by supply
/// skew at classification time.
pub const AVIV_BANDS: &[AvivBand] = &[
    AvivBand {
        lower: 0.0,
        upper: 0.5,
        label: "strong accumulation",
        state: MarketState::Bullish,
        lean: Lean::Bullish,
    },
    AvivBand {
        lower: 0.5,
        upper: 1.5,
        label: "fair value",
        state: MarketState::Neutral,
        lean: Lean::Flat,
    },
    AvivBand {
        lower: 1.5,
        upper: 1.9,
        label: "caution",
        state: MarketState::Neutral,
        lean: Lean::Bearish,
    },
    AvivBand {
        lower: 1.9,
        upper: f64::INFINITY,
        label: "distribution",
        state: MarketState::Bearish,
        lean: Lean::Bearish,
    },
];

/// Vaulted-supply share above which the fair-value band leans bullish.
pub const VAULTED_SKEW_PCT: f64 = 60.0;

/// Active-supply share above which the fair-value band leans bearish.
pub const ACTIVE_SKEW_PCT: f64 = 70.0;

/// Raw inputs from the regime provider.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RegimeInputs {
    pub aviv_ratio: f64,
    pub active_supply_pct: f64,
    pub vaulted_supply_pct: f64,
    pub smart_money_active: bool,
    pub fed_rate_change_pct: f64,
    pub sentiment_score: f64,
}

/// Classify the regime from on-chain valuation, supply skew, and the
/// smart-money flag.
pub fn classify(
    aviv_ratio: f64,
    active_supply_pct: f64,
    vaulted_supply_pct: f64,
    smart_money_active: bool,
) -> MarketState {
    let band = band_for(aviv_ratio);

    let lean = if band.lean == Lean::Flat {
        supply_skew_lean(active_supply_pct, vaulted_supply_pct)
    } else {
        band.lean
    };

    // Smart money only strengthens an indicated lean; it never flips a
    // bullish band bearish and never moves a flat neutral on its own.
    if smart_money_active && band.state == MarketState::Neutral {
        return match lean {
            Lean::Bullish => MarketState::Bullish,
            Lean::Bearish => MarketState::Bearish,
            Lean::Flat => MarketState::Neutral,
        };
    }

    band.state
}

/// Package the full [`MarketConditions`] record for one run.
pub fn classify_conditions(inputs: &RegimeInputs) -> MarketConditions {
    let state = classify(
        inputs.aviv_ratio,
        inputs.active_supply_pct,
        inputs.vaulted_supply_pct,
        inputs.smart_money_active,
    );
    MarketConditions {
        state,
        sentiment_score: inputs.sentiment_score,
        smart_money_active: inputs.smart_money_active,
        fed_rate_change_pct: inputs.fed_rate_change_pct,
        aviv_ratio: inputs.aviv_ratio,
        active_supply_pct: inputs.active_supply_pct,
        vaulted_supply_pct: inputs.vaulted_supply_pct,
    }
}

/// Row lookup. Negative readings are clamped into the first band.
pub fn band_for(aviv_ratio: f64) -> &'static AvivBand {
    let ratio = aviv_ratio.max(0.0);
    AVIV_BANDS
        .iter()
        .find(|band| ratio >= band.lower && ratio < band.upper)
        .unwrap_or(&AVIV_BANDS[AVIV_BANDS.len() - 1])
}

fn supply_skew_lean(active_supply_pct: f64, vaulted_supply_pct: f64) -> Lean {
    if vaulted_supply_pct > VAULTED_SKEW_PCT {
        Lean::Bullish
    } else if active_supply_pct > ACTIVE_SKEW_PCT {
        Lean::Bearish
    } else {
        Lean::Flat
    }
}

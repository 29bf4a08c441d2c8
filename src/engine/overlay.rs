//! Market Overlay Stage
//!
//! Second stage of the pipeline. Overlays only ever escalate the tentative
//! action along the severity order Buy < BuyLess < DoNotBuy < Sell; a
//! conservative tentative decision is never relaxed. Rationale-only
//! overlays (Fed rate, bullish regime, the Bitcoin accumulation note)
//! append text without touching the action.

use crate::engine::tentative::Tentative;
use crate::metrics::risk::RATE_ATTENTION_PCT;
use crate::model::{Action, BasketKind, MarketConditions, MarketState};

/// Position of an action in the escalation order.
const fn severity(action: Action) -> u8 {
    match action {
        Action::Buy => 0,
        Action::BuyLess => 1,
        Action::DoNotBuy => 2,
        Action::Sell => 3,
    }
}

/// Escalate `current` to `floor` when the floor is more conservative.
const fn escalate(current: Action, floor: Action) -> Action {
    if severity(floor) > severity(current) {
        floor
    } else {
        current
    }
}

/// Apply the market-state, accumulation, and Fed-rate overlays.
pub fn apply(mut tentative: Tentative, conditions: &MarketConditions, basket: BasketKind) -> Tentative {
    match conditions.state {
        MarketState::Bearish if conditions.smart_money_active => {
            tentative.action = Action::Sell;
            tentative.rationale.push(
                "Smart money is distributing into a bearish market; exit rather than hold.".into(),
            );
            tentative
                .risks
                .push("Informed holders are net-selling.".into());
            tentative
                .rebalancing
                .push("Exit the position while liquidity holds.".into());
        }
        MarketState::Bearish => {
            tentative.action = escalate(tentative.action, Action::DoNotBuy);
            tentative
                .rationale
                .push("Bearish regime: new buying is suspended.".into());
            tentative
                .risks
                .push("Bearish regimes historically deepen before they turn.".into());
        }
        MarketState::Bullish => {
            tentative
                .rationale
                .push("The bullish regime supports the entry case.".into());
        }
        MarketState::Neutral => {
            // Legacy asymmetry kept on purpose: only the Bitcoin basket
            // reads sub-1.0 AVIV as an accumulation note in a neutral
            // market. Flagged to product as a possible inconsistency.
            if basket == BasketKind::Bitcoin && conditions.aviv_ratio < 1.0 {
                tentative.rationale.push(
                    "AVIV below 1.0 in a neutral market marks a Bitcoin accumulation zone.".into(),
                );
            }
        }
    }

    if conditions.fed_rate_change_pct.abs() > RATE_ATTENTION_PCT {
        tentative.rationale.push(format!(
            "The Fed funds rate moved {:+.2} points; financing conditions are shifting.",
            conditions.fed_rate_change_pct
        ));
    }

    tentative
}

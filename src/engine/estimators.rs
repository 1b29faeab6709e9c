//! Market-implied probability estimation as an explicit, ordered list of
//! named estimators. Each estimator has a documented precondition; the first
//! one whose precondition holds supplies the value, and every chain ends in
//! a named prior default so a missing signal is a substituted constant,
//! never an error. The winning estimator's name travels with the value so
//! the chosen strategy per fixture is inspectable.

use crate::models::MarketSignals;

/// League-average prior for the over-2.5 line when no market quote exists.
const PRIOR_OVER_TWO_FIVE: f64 = 0.50;

/// Uniform 1X2 prior when no win/draw quotes exist.
const PRIOR_ONE_X_TWO: f64 = 1.0 / 3.0;

/// A market-implied probability together with the estimator that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedProbability {
    pub estimator: &'static str,
    pub value: f64,
}

/// Market-implied P(total goals > 2.5).
///
/// Order: `over-line` (precondition: over-2.5 quote > 0), then
/// `under-line-complement` (under-2.5 quote > 0, value 1 − u), then the
/// neighbouring-line proxies `over-3-line` (biased low) and
/// `under-3-complement` (biased high), then `prior-default`.
pub fn implied_over_two_five(signals: &MarketSignals) -> EstimatedProbability {
    if signals.over_two_five > 0.0 {
        return EstimatedProbability {
            estimator: "over-line",
            value: signals.over_two_five.clamp(0.0, 1.0),
        };
    }
    if signals.under_two_five > 0.0 {
        return EstimatedProbability {
            estimator: "under-line-complement",
            value: (1.0 - signals.under_two_five).clamp(0.0, 1.0),
        };
    }
    if signals.over_three > 0.0 {
        return EstimatedProbability {
            estimator: "over-3-line",
            value: signals.over_three.clamp(0.0, 1.0),
        };
    }
    if signals.under_three > 0.0 {
        return EstimatedProbability {
            estimator: "under-3-complement",
            value: (1.0 - signals.under_three).clamp(0.0, 1.0),
        };
    }
    EstimatedProbability {
        estimator: "prior-default",
        value: PRIOR_OVER_TWO_FIVE,
    }
}

/// Market-implied P(home win): `1x2-home` (quote > 0) then `prior-default`.
pub fn implied_home_win(signals: &MarketSignals) -> EstimatedProbability {
    one_x_two("1x2-home", signals.home_win)
}

/// Market-implied P(away win): `1x2-away` (quote > 0) then `prior-default`.
pub fn implied_away_win(signals: &MarketSignals) -> EstimatedProbability {
    one_x_two("1x2-away", signals.away_win)
}

/// Market-implied P(draw): `1x2-draw` (quote > 0) then `prior-default`.
pub fn implied_draw(signals: &MarketSignals) -> EstimatedProbability {
    one_x_two("1x2-draw", signals.draw)
}

fn one_x_two(name: &'static str, quote: f64) -> EstimatedProbability {
    if quote > 0.0 {
        EstimatedProbability {
            estimator: name,
            value: quote.clamp(0.0, 1.0),
        }
    } else {
        EstimatedProbability {
            estimator: "prior-default",
            value: PRIOR_ONE_X_TWO,
        }
    }
}

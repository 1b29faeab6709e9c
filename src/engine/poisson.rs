//! Poisson probability engine: translates a pair of expected-goals values
//! into calibrated outcome probabilities. All outputs are clamped to [0, 1]
//! against floating-point drift; the sums are bounded by construction.

/// Draw probability sums goal-for-goal ties up to this count; contributions
/// beyond it are negligible at football-scale lambdas.
const DRAW_MAX_GOALS: u32 = 4;

/// Win/loss split enumerates scorelines up to this many goals per side.
const WIN_GRID_MAX_GOALS: u32 = 6;

/// Outcome probabilities for one fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureProbabilities {
    pub over_two_five: f64,
    pub both_teams_score: f64,
    pub draw: f64,
    pub home_win: f64,
    pub away_win: f64,
}

/// Poisson PMF: P(k; λ) = e^-λ · λ^k / k!.
pub fn poisson_pmf(lambda: f64, k: u32) -> f64 {
    let mut p = (-lambda).exp();
    for i in 1..=k {
        p *= lambda / i as f64;
    }
    p
}

/// P(total goals > line) for the combined λ, summing the lower tail to ⌊line⌋.
pub fn prob_over(line: f64, lambda_home: f64, lambda_away: f64) -> f64 {
    let total = lambda_home + lambda_away;
    let floor = line.floor().max(0.0) as u32;
    let under: f64 = (0..=floor).map(|k| poisson_pmf(total, k)).sum();
    clamp01(1.0 - under)
}

/// P(both teams score), assuming independent goal counts:
/// 1 − P(0;λh) − P(0;λa) + P(0;λh)·P(0;λa).
pub fn prob_both_teams_score(lambda_home: f64, lambda_away: f64) -> f64 {
    let zero_home = poisson_pmf(lambda_home, 0);
    let zero_away = poisson_pmf(lambda_away, 0);
    clamp01(1.0 - zero_home - zero_away + zero_home * zero_away)
}

/// P(draw): goal-for-goal ties up to `DRAW_MAX_GOALS`.
pub fn prob_draw(lambda_home: f64, lambda_away: f64) -> f64 {
    let p: f64 = (0..=DRAW_MAX_GOALS)
        .map(|g| poisson_pmf(lambda_home, g) * poisson_pmf(lambda_away, g))
        .sum();
    clamp01(p)
}

/// (P(home win), P(away win)) over the scoreline grid, renormalized to sum
/// to 1.0. Ties are excluded from the split; draws are reported separately.
pub fn win_probabilities(lambda_home: f64, lambda_away: f64) -> (f64, f64) {
    let mut home = 0.0;
    let mut away = 0.0;

    for h in 0..=WIN_GRID_MAX_GOALS {
        for a in 0..=WIN_GRID_MAX_GOALS {
            let p = poisson_pmf(lambda_home, h) * poisson_pmf(lambda_away, a);
            if h > a {
                home += p;
            } else if h < a {
                away += p;
            }
        }
    }

    let total = home + away;
    if total <= 0.0 {
        // Degenerate lambdas collapse every scoreline onto the diagonal.
        return (0.5, 0.5);
    }
    (clamp01(home / total), clamp01(away / total))
}

/// Compute the full probability family for a fixture.
pub fn fixture_probabilities(lambda_home: f64, lambda_away: f64) -> FixtureProbabilities {
    let (home_win, away_win) = win_probabilities(lambda_home, lambda_away);
    FixtureProbabilities {
        over_two_five: prob_over(2.5, lambda_home, lambda_away),
        both_teams_score: prob_both_teams_score(lambda_home, lambda_away),
        draw: prob_draw(lambda_home, lambda_away),
        home_win,
        away_win,
    }
}

fn clamp01(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pmf_partial_sums_to_one() {
        for lambda in [0.2, 0.9, 1.5, 2.7, 4.0] {
            let sum: f64 = (0..=20).map(|k| poisson_pmf(lambda, k)).sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "lambda {lambda}: partial sum {sum}"
            );
        }
    }

    #[test]
    fn test_pmf_zero_goals() {
        assert!((poisson_pmf(1.0, 0) - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_btts_symmetric_in_lambdas() {
        let a = prob_both_teams_score(1.3, 2.1);
        let b = prob_both_teams_score(2.1, 1.3);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_win_probabilities_sum_to_one() {
        for (lh, la) in [(1.5, 1.2), (0.3, 3.0), (2.5, 2.5), (4.0, 0.15)] {
            let (home, away) = win_probabilities(lh, la);
            assert!(
                (home + away - 1.0).abs() < 1e-12,
                "λ=({lh},{la}): {home}+{away}"
            );
        }
    }

    #[test]
    fn test_stronger_side_wins_more_often() {
        let (home, away) = win_probabilities(2.5, 0.8);
        assert!(home > away);
        let (home, away) = win_probabilities(0.8, 2.5);
        assert!(away > home);
    }

    #[test]
    fn test_over_line_monotone_in_lambda() {
        let low = prob_over(2.5, 0.8, 0.7);
        let high = prob_over(2.5, 2.0, 1.8);
        assert!(high > low);
        assert!(low >= 0.0 && high <= 1.0);
    }

    #[test]
    fn test_draw_probability_peaks_for_even_low_scoring() {
        let even_low = prob_draw(0.9, 0.9);
        let lopsided = prob_draw(3.5, 0.5);
        assert!(even_low > lopsided);
    }

    #[test]
    fn test_all_probabilities_within_unit_interval() {
        for (lh, la) in [(0.15, 0.15), (4.0, 4.0), (50.0, 50.0), (0.15, 4.0)] {
            let p = fixture_probabilities(lh, la);
            for v in [
                p.over_two_five,
                p.both_teams_score,
                p.draw,
                p.home_win,
                p.away_win,
            ] {
                assert!((0.0..=1.0).contains(&v), "λ=({lh},{la}): {v}");
            }
        }
    }

    #[test]
    fn test_extreme_lambdas_renormalize_cleanly() {
        // At volleyball-scale lambdas every grid cell underflows; the split
        // must still return a valid distribution.
        let (home, away) = win_probabilities(50.0, 50.0);
        assert!((home + away - 1.0).abs() < 1e-9);
    }
}

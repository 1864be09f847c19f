use crate::types::{DecisionScore, Probability};
use log::warn;
use serde::{Deserialize, Serialize};

const MAX_ITERATIONS: usize = 100;
const MIN_STEP: f64 = 1e-10;
const HESSIAN_RIDGE: f64 = 1e-12;
const GRADIENT_EPSILON: f64 = 1e-5;

/// Sigmoid calibration `P(class | score) = 1 / (1 + exp(a * score + b))`.
///
/// Fitted with Newton's method and backtracking line search on held-out decision scores,
/// using smoothed targets to avoid overfitting the extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattScaler {
    a: f64,
    b: f64,
}

impl PlattScaler {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn fit(scores: &[DecisionScore], targets: &[bool]) -> Self {
        let sample_count = scores.len().min(targets.len());
        let scores = &scores[..sample_count];
        let targets = &targets[..sample_count];

        let positive_count = targets.iter().filter(|&&target| target).count() as f64;
        let negative_count = sample_count as f64 - positive_count;

        let high_target = (positive_count + 1.0) / (positive_count + 2.0);
        let low_target = 1.0 / (negative_count + 2.0);
        let smoothed_targets: Vec<f64> = targets
            .iter()
            .map(|&target| if target { high_target } else { low_target })
            .collect();

        let mut a = 0.0;
        let mut b = ((negative_count + 1.0) / (positive_count + 1.0)).ln();
        let mut objective = negative_log_likelihood(scores, &smoothed_targets, a, b);

        for _ in 0..MAX_ITERATIONS {
            // Gradient and Hessian of the negative log-likelihood
            let mut h11 = HESSIAN_RIDGE;
            let mut h22 = HESSIAN_RIDGE;
            let mut h21 = 0.0;
            let mut g1 = 0.0;
            let mut g2 = 0.0;

            for (&score, &target) in scores.iter().zip(&smoothed_targets) {
                let f_apb = score * a + b;
                let (p, q) = if f_apb >= 0.0 {
                    let e = (-f_apb).exp();
                    (e / (1.0 + e), 1.0 / (1.0 + e))
                } else {
                    let e = f_apb.exp();
                    (1.0 / (1.0 + e), e / (1.0 + e))
                };

                let d2 = p * q;
                h11 += score * score * d2;
                h22 += d2;
                h21 += score * d2;

                let d1 = target - p;
                g1 += score * d1;
                g2 += d1;
            }

            if g1.abs() < GRADIENT_EPSILON && g2.abs() < GRADIENT_EPSILON {
                break;
            }

            let determinant = h11 * h22 - h21 * h21;
            let delta_a = -(h22 * g1 - h21 * g2) / determinant;
            let delta_b = -(-h21 * g1 + h11 * g2) / determinant;
            let directional_derivative = g1 * delta_a + g2 * delta_b;

            let mut step = 1.0;
            while step >= MIN_STEP {
                let candidate_a = a + step * delta_a;
                let candidate_b = b + step * delta_b;
                let candidate_objective =
                    negative_log_likelihood(scores, &smoothed_targets, candidate_a, candidate_b);

                if candidate_objective < objective + 1e-4 * step * directional_derivative {
                    a = candidate_a;
                    b = candidate_b;
                    objective = candidate_objective;
                    break;
                }

                step /= 2.0;
            }

            if step < MIN_STEP {
                warn!("Platt scaling line search failed to make progress");
                break;
            }
        }

        Self { a, b }
    }

    /// Calibrated probability of the positive class.
    pub fn probability(&self, score: DecisionScore) -> Probability {
        let f_apb = score * self.a + self.b;
        if f_apb >= 0.0 {
            let e = (-f_apb).exp();
            e / (1.0 + e)
        } else {
            1.0 / (1.0 + f_apb.exp())
        }
    }
}

fn negative_log_likelihood(scores: &[f64], targets: &[f64], a: f64, b: f64) -> f64 {
    scores
        .iter()
        .zip(targets)
        .map(|(&score, &target)| {
            let f_apb = score * a + b;
            if f_apb >= 0.0 {
                target * f_apb + (1.0 + (-f_apb).exp()).ln()
            } else {
                (target - 1.0) * f_apb + (1.0 + f_apb.exp()).ln()
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_scores_get_higher_probability() {
        let scores = [-2.0, -1.5, -1.0, -0.5, 0.5, 1.0, 1.5, 2.0];
        let targets = [false, false, false, false, true, true, true, true];

        let scaler = PlattScaler::fit(&scores, &targets);

        assert!(scaler.a() < 0.0);
        assert!(scaler.probability(2.0) > 0.5);
        assert!(scaler.probability(-2.0) < 0.5);
        assert!(scaler.probability(1.0) > scaler.probability(0.0));
    }

    #[test]
    fn test_probabilities_are_bounded() {
        let scaler = PlattScaler::new(-5.0, 0.0);
        for score in [-1e6, -10.0, 0.0, 10.0, 1e6] {
            let p = scaler.probability(score);
            assert!((0.0..=1.0).contains(&p), "{} out of range", p);
        }
    }

    #[test]
    fn test_no_positives_stays_low() {
        let scores = [-1.0, -0.8, -1.2];
        let scaler = PlattScaler::fit(&scores, &[false, false, false]);
        assert!(scaler.probability(-1.0) < 0.5);
    }

    #[test]
    fn test_empty_input_gives_even_odds() {
        let scaler = PlattScaler::fit(&[], &[]);
        assert!((scaler.probability(0.0) - 0.5).abs() < 1e-12);
    }
}

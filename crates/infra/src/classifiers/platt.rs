//! Platt scaling: map SVM decision values to calibrated probabilities
//!
//! Fits `P(positive | f) = 1 / (1 + exp(A * f + B))` by Newton's method with
//! backtracking line search on regularized targets
//! (`(N+ + 1) / (N+ + 2)` and `1 / (N- + 2)`).

use serde::{Deserialize, Serialize};
use textops_domain::Label;
use tracing::{debug, warn};

const MAX_ITERATIONS: usize = 100;
const MIN_STEP: f64 = 1e-10;
const HESSIAN_RIDGE: f64 = 1e-12;
const GRADIENT_TOLERANCE: f64 = 1e-5;

/// Sigmoid calibration `p1 = 1 / (1 + exp(a·f + b))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattScaler {
    /// Slope on the decision value
    pub a: f64,
    /// Offset
    pub b: f64,
}

impl PlattScaler {
    /// Fit on paired decision values and labels (same length).
    pub fn fit(decisions: &[f64], labels: &[Label]) -> Self {
        let positives = labels.iter().filter(|l| **l == Label::Positive).count() as f64;
        let negatives = labels.len() as f64 - positives;

        let hi_target = (positives + 1.0) / (positives + 2.0);
        let lo_target = 1.0 / (negatives + 2.0);
        let targets: Vec<f64> = labels
            .iter()
            .map(|l| if *l == Label::Positive { hi_target } else { lo_target })
            .collect();

        let mut a = 0.0_f64;
        let mut b = ((negatives + 1.0) / (positives + 1.0)).ln();
        let mut fval = objective(decisions, &targets, a, b);

        for iteration in 0..MAX_ITERATIONS {
            let (mut h11, mut h22, mut h21) = (HESSIAN_RIDGE, HESSIAN_RIDGE, 0.0_f64);
            let (mut g1, mut g2) = (0.0_f64, 0.0_f64);
            for (f, t) in decisions.iter().zip(&targets) {
                let (p, q) = split_probabilities(f * a + b);
                let d2 = p * q;
                h11 += f * f * d2;
                h22 += d2;
                h21 += f * d2;
                let d1 = t - p;
                g1 += f * d1;
                g2 += d1;
            }

            if g1.abs() < GRADIENT_TOLERANCE && g2.abs() < GRADIENT_TOLERANCE {
                debug!(iteration, a, b, "Platt scaling converged");
                break;
            }

            let det = h11 * h22 - h21 * h21;
            let da = -(h22 * g1 - h21 * g2) / det;
            let db = -(-h21 * g1 + h11 * g2) / det;
            let gd = g1 * da + g2 * db;

            let mut step = 1.0_f64;
            while step >= MIN_STEP {
                let (new_a, new_b) = (a + step * da, b + step * db);
                let new_f = objective(decisions, &targets, new_a, new_b);
                if new_f < fval + 1e-4 * step * gd {
                    a = new_a;
                    b = new_b;
                    fval = new_f;
                    break;
                }
                step /= 2.0;
            }
            if step < MIN_STEP {
                warn!(iteration, "Platt line search failed; keeping last coefficients");
                break;
            }
        }

        Self { a, b }
    }

    /// Probability of the positive class for decision value `f`
    pub fn positive_probability(&self, f: f64) -> f64 {
        let z = f * self.a + self.b;
        if z >= 0.0 {
            let e = (-z).exp();
            e / (1.0 + e)
        } else {
            1.0 / (1.0 + z.exp())
        }
    }
}

/// `(p, 1 - p)` for `p = 1 / (1 + exp(z))`, computed without overflow
fn split_probabilities(z: f64) -> (f64, f64) {
    if z >= 0.0 {
        let e = (-z).exp();
        (e / (1.0 + e), 1.0 / (1.0 + e))
    } else {
        let e = z.exp();
        (1.0 / (1.0 + e), e / (1.0 + e))
    }
}

/// Cross-entropy of the regularized targets
fn objective(decisions: &[f64], targets: &[f64], a: f64, b: f64) -> f64 {
    decisions
        .iter()
        .zip(targets)
        .map(|(f, t)| {
            let z = f * a + b;
            if z >= 0.0 {
                t * z + (-z).exp().ln_1p()
            } else {
                (t - 1.0) * z + z.exp().ln_1p()
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use Label::{Negative as N, Positive as P};

    #[test]
    fn separable_scores_map_to_confident_probabilities() {
        let decisions = [-2.0, -1.5, -1.0, -0.8, 0.9, 1.1, 1.4, 2.2];
        let labels = [N, N, N, N, P, P, P, P];
        let scaler = PlattScaler::fit(&decisions, &labels);

        assert!(scaler.a < 0.0);
        assert!(scaler.positive_probability(2.0) > 0.8);
        assert!(scaler.positive_probability(-2.0) < 0.2);
        assert!(scaler.positive_probability(1.0) > scaler.positive_probability(0.0));
    }

    #[test]
    fn probabilities_stay_finite_for_extreme_scores() {
        let scaler = PlattScaler { a: -5.0, b: 0.0 };
        let high = scaler.positive_probability(1e6);
        let low = scaler.positive_probability(-1e6);
        assert!(high.is_finite() && low.is_finite());
        assert!(high > 0.99 && low < 0.01);
    }

    #[test]
    fn balanced_uninformative_scores_stay_near_half() {
        let decisions = [0.0, 0.0, 0.0, 0.0];
        let scaler = PlattScaler::fit(&decisions, &[N, P, N, P]);
        assert!((scaler.positive_probability(0.0) - 0.5).abs() < 1e-6);
    }
}

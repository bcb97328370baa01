use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Probabilities are clamped to this value before taking their logarithm.
const MIN_PROBABILITY: f32 = 1e-12;

/// Categorical cross entropy over a softmax output layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Returns a new `CrossEntropy`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for CrossEntropy {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        y_pred
            .iter()
            .zip(&y)
            .map(|(&p, &t)| -t * p.max(MIN_PROBABILITY).ln())
            .sum()
    }

    // The softmax jacobian and the loss derivative cancel out into a plain difference.
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        &y_pred - &y
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn loss_only_looks_at_the_target_class() {
        let loss = CrossEntropy.loss(array![0.25, 0.5, 0.25].view(), array![0., 1., 0.].view());
        assert!((loss - 2f32.ln()).abs() < 1e-6);
    }

    #[test]
    fn certain_mistakes_stay_finite() {
        let loss = CrossEntropy.loss(array![1., 0.].view(), array![0., 1.].view());
        assert!(loss.is_finite());
        assert!(loss > 20.);
    }

    #[test]
    fn loss_prime_is_the_difference() {
        let d = CrossEntropy.loss_prime(array![0.7, 0.3].view(), array![1., 0.].view());
        assert!((d[0] + 0.3).abs() < 1e-6);
        assert!((d[1] - 0.3).abs() < 1e-6);
    }
}

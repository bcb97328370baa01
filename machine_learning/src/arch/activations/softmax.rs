use ndarray::Array1;

/// Normalized exponential, turns the output layer's scores into a probability distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct Softmax;

impl Softmax {
    pub fn new() -> Self {
        Self
    }

    /// Subtracts the highest score before exponentiating so large scores don't overflow.
    pub fn f(&self, z: Array1<f32>) -> Array1<f32> {
        let max = z.fold(f32::NEG_INFINITY, |max, &v| max.max(v));
        let mut exps = z.mapv_into(|v| (v - max).exp());
        let sum = exps.sum();
        exps /= sum;
        exps
    }
}

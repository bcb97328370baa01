use ndarray::{Array1, ArrayView1};

pub trait LossFn {
    /// Measures how far a single prediction is from its target.
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32;

    /// The gradient of the loss with respect to the output layer's weighted sums.
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32>;
}

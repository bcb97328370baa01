use ndarray::prelude::*;
use rand::Rng;

use crate::{
    MlErr, Result,
    arch::{LayerGrad, activations::ActFn},
    initialization::{ConstParamGen, ParamGen, RandParamGen},
    optimization::Optimizer,
};

/// A fully connected layer: `a = act_fn(Wᵀ·x + b)`.
///
/// The weights are stored as an `(inputs, outputs)` matrix, so entry `(i, j)` connects input `i`
/// to output `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    w: Array2<f32>,
    b: Array1<f32>,
    act_fn: ActFn,
}

impl Dense {
    /// Creates a new `Dense` from explicit parameters.
    ///
    /// # Arguments
    /// * `w` - The `(inputs, outputs)` weight matrix.
    /// * `b` - The biases, one per output.
    /// * `act_fn` - The activation applied to the weighted sums.
    ///
    /// # Returns
    /// An error if the amount of biases doesn't match the amount of outputs.
    pub fn new(w: Array2<f32>, b: Array1<f32>, act_fn: ActFn) -> Result<Self> {
        if w.ncols() != b.len() {
            return Err(MlErr::SizeMismatch {
                what: "biases",
                got: b.len(),
                expected: w.ncols(),
            });
        }

        Ok(Self { w, b, act_fn })
    }

    /// Creates a new `Dense` with weights drawn from `(-0.2, 0.2) / sqrt(inputs)` and zero biases.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `dim` - The amount of inputs and outputs.
    /// * `act_fn` - The activation applied to the weighted sums.
    ///
    /// # Returns
    /// An error if the layer has no inputs.
    pub fn init<R: Rng + ?Sized>(rng: &mut R, dim: (usize, usize), act_fn: ActFn) -> Result<Self> {
        let (fan_in, fan_out) = dim;
        let size = fan_in * fan_out;

        let weights = RandParamGen::scaled_uniform(rng, size, fan_in)?.sample_exact(size);
        let biases = ConstParamGen::new(0., fan_out).sample_exact(fan_out);

        Self::new(
            Array2::from_shape_vec(dim, weights)?,
            Array1::from_vec(biases),
            act_fn,
        )
    }

    /// Returns the amount of inputs and outputs.
    pub fn dim(&self) -> (usize, usize) {
        self.w.dim()
    }

    /// Returns the amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.w.len() + self.b.len()
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.w.view()
    }

    pub fn biases(&self) -> ArrayView1<'_, f32> {
        self.b.view()
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    /// Computes this layer's activation for the previous layer's activation `x`.
    ///
    /// # Panics
    /// If `x` doesn't have exactly as many entries as the layer has inputs.
    pub fn forward(&self, x: ArrayView1<f32>) -> Array1<f32> {
        let z = self.w.t().dot(&x) + &self.b;
        self.act_fn.f(z)
    }

    /// Computes the gradient of this layer's parameters.
    ///
    /// # Arguments
    /// * `x` - The activation this layer received on the forward pass.
    /// * `d` - The delta of this layer's weighted sums.
    pub fn backward(&self, x: ArrayView1<f32>, d: ArrayView1<f32>) -> LayerGrad {
        let dw = Array2::from_shape_fn(self.w.dim(), |(i, j)| x[i] * d[j]);
        LayerGrad::new(dw, d.to_owned())
    }

    /// Carries a delta back through the weights, before the previous layer's activation gating.
    pub fn propagate(&self, d: ArrayView1<f32>) -> Array1<f32> {
        self.w.dot(&d)
    }

    /// Updates the parameters in place following the optimizer's rule.
    ///
    /// # Returns
    /// An error if the gradient's shape doesn't match this layer.
    pub fn update<O: Optimizer>(&mut self, optimizer: &mut O, grad: &LayerGrad) -> Result<()> {
        if grad.dw().dim() != self.w.dim() {
            return Err(MlErr::SizeMismatch {
                what: "weight gradient",
                got: grad.dw().len(),
                expected: self.w.len(),
            });
        }

        if grad.db().len() != self.b.len() {
            return Err(MlErr::SizeMismatch {
                what: "bias gradient",
                got: grad.db().len(),
                expected: self.b.len(),
            });
        }

        optimizer.update_params(self.w.view_mut(), grad.dw());
        optimizer.update_params(self.b.view_mut(), grad.db());
        Ok(())
    }

    /// Whether every parameter is a finite number.
    pub fn is_finite(&self) -> bool {
        self.w.iter().chain(&self.b).all(|p| p.is_finite())
    }
}

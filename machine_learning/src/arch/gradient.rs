use ndarray::prelude::*;

use super::Sequential;
use crate::{MlErr, Result};

/// The gradient of a single dense layer's parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerGrad {
    dw: Array2<f32>,
    db: Array1<f32>,
}

impl LayerGrad {
    pub fn new(dw: Array2<f32>, db: Array1<f32>) -> Self {
        Self { dw, db }
    }

    /// Creates an all-zero gradient for a layer with `dim` inputs and outputs.
    pub fn zeros(dim: (usize, usize)) -> Self {
        Self::new(Array2::zeros(dim), Array1::zeros(dim.1))
    }

    pub fn dw(&self) -> ArrayView2<'_, f32> {
        self.dw.view()
    }

    pub fn db(&self) -> ArrayView1<'_, f32> {
        self.db.view()
    }
}

/// The gradient of every layer in a `Sequential`, in forward order.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    layers: Vec<LayerGrad>,
}

impl Gradient {
    pub fn new(layers: Vec<LayerGrad>) -> Self {
        Self { layers }
    }

    /// Creates an all-zero gradient shaped after `model`.
    pub fn zeros_like(model: &Sequential) -> Self {
        let layers = model
            .layers()
            .iter()
            .map(|layer| LayerGrad::zeros(layer.dim()))
            .collect();

        Self::new(layers)
    }

    pub fn layers(&self) -> &[LayerGrad] {
        &self.layers
    }

    /// Adds `other` into this gradient.
    ///
    /// # Returns
    /// An error if both gradients don't belong to the same architecture.
    pub fn accumulate(&mut self, other: &Gradient) -> Result<()> {
        if self.layers.len() != other.layers.len() {
            return Err(MlErr::SizeMismatch {
                what: "gradient layers",
                got: other.layers.len(),
                expected: self.layers.len(),
            });
        }

        for (acc, grad) in self.layers.iter_mut().zip(&other.layers) {
            if acc.dw.dim() != grad.dw.dim() {
                return Err(MlErr::SizeMismatch {
                    what: "weight gradient",
                    got: grad.dw.len(),
                    expected: acc.dw.len(),
                });
            }

            acc.dw += &grad.dw;
            acc.db += &grad.db;
        }

        Ok(())
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for layer in &mut self.layers {
            layer.dw *= factor;
            layer.db *= factor;
        }
    }

    pub fn is_finite(&self) -> bool {
        self.layers
            .iter()
            .all(|l| l.dw.iter().chain(&l.db).all(|g| g.is_finite()))
    }
}

use ndarray::prelude::*;
use rand::Rng;

use super::{Gradient, activations::ActFn, layers::Dense, loss::LossFn};
use crate::{MlErr, Result, optimization::Optimizer};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequential {
    layers: Vec<Dense>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// An error if there are no layers or if a layer's inputs don't match the previous one's
    /// outputs.
    pub fn new<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Dense>,
    {
        let layers: Vec<_> = layers.into_iter().collect();

        if layers.is_empty() {
            return Err(MlErr::EmptyModel);
        }

        for pair in layers.windows(2) {
            let (_, outputs) = pair[0].dim();
            let (inputs, _) = pair[1].dim();

            if inputs != outputs {
                return Err(MlErr::SizeMismatch {
                    what: "layer inputs",
                    got: inputs,
                    expected: outputs,
                });
            }
        }

        Ok(Self { layers })
    }

    /// Creates a freshly initialized classifier: ReLU hidden layers and a softmax output layer.
    ///
    /// # Arguments
    /// * `rng` - The random number generator used for the weights.
    /// * `input` - The amount of features.
    /// * `hidden` - The width of each hidden layer, may be empty.
    /// * `output` - The amount of classes.
    pub fn init<R: Rng + ?Sized>(
        rng: &mut R,
        input: usize,
        hidden: &[usize],
        output: usize,
    ) -> Result<Self> {
        let widths: Vec<_> = std::iter::once(input)
            .chain(hidden.iter().copied())
            .chain(std::iter::once(output))
            .collect();

        let last = widths.len() - 2;
        let layers = widths
            .windows(2)
            .enumerate()
            .map(|(i, dim)| {
                let act_fn = if i == last {
                    ActFn::softmax()
                } else {
                    ActFn::relu()
                };

                Dense::init(&mut *rng, (dim[0], dim[1]), act_fn)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(layers)
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].dim().0
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].dim().1
    }

    /// Returns the amount of parameters of the whole model.
    pub fn size(&self) -> usize {
        self.layers.iter().map(Dense::size).sum()
    }

    /// Makes a forward pass through the network.
    ///
    /// # Returns
    /// The activation of every layer, starting with the input itself and ending with the output
    /// probabilities.
    pub fn forward(&self, x: ArrayView1<f32>) -> Vec<Array1<f32>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(x.to_owned());

        for layer in &self.layers {
            let a = layer.forward(activations[activations.len() - 1].view());
            activations.push(a);
        }

        activations
    }

    /// Returns the class probabilities for a single input.
    pub fn probabilities(&self, x: ArrayView1<f32>) -> Array1<f32> {
        self.layers
            .iter()
            .fold(x.to_owned(), |a, layer| layer.forward(a.view()))
    }

    /// Returns the most probable class for a single input, ties go to the lowest class.
    pub fn predict(&self, x: ArrayView1<f32>) -> usize {
        argmax(self.probabilities(x).view())
    }

    /// Measures the loss of a single sample.
    pub fn loss<L: LossFn>(&self, loss_fn: &L, x: ArrayView1<f32>, target: ArrayView1<f32>) -> f32 {
        loss_fn.loss(self.probabilities(x).view(), target)
    }

    /// Backpropagates a single sample.
    ///
    /// # Arguments
    /// * `loss_fn` - The loss whose derivative seeds the output delta.
    /// * `activations` - The result of `forward` for the sample.
    /// * `target` - The one-hot encoded label.
    ///
    /// # Returns
    /// The gradient of every layer or an error if the activations or the target don't fit the
    /// model.
    pub fn backward<L: LossFn>(
        &self,
        loss_fn: &L,
        activations: &[Array1<f32>],
        target: ArrayView1<f32>,
    ) -> Result<Gradient> {
        let nlayers = self.layers.len();

        if activations.len() != nlayers + 1 {
            return Err(MlErr::SizeMismatch {
                what: "activations",
                got: activations.len(),
                expected: nlayers + 1,
            });
        }

        if target.len() != self.output_size() {
            return Err(MlErr::SizeMismatch {
                what: "target",
                got: target.len(),
                expected: self.output_size(),
            });
        }

        let mut grads = Vec::with_capacity(nlayers);
        let mut d = loss_fn.loss_prime(activations[nlayers].view(), target);

        for (l, layer) in self.layers.iter().enumerate().rev() {
            grads.push(layer.backward(activations[l].view(), d.view()));

            if l > 0 {
                d = layer.propagate(d.view());
                self.layers[l - 1]
                    .act_fn()
                    .gate(d.view_mut(), activations[l].view());
            }
        }

        grads.reverse();
        Ok(Gradient::new(grads))
    }

    /// Applies a gradient to every layer following the optimizer's rule.
    pub fn apply<O: Optimizer>(&mut self, optimizer: &mut O, gradient: &Gradient) -> Result<()> {
        if gradient.layers().len() != self.layers.len() {
            return Err(MlErr::SizeMismatch {
                what: "gradient layers",
                got: gradient.layers().len(),
                expected: self.layers.len(),
            });
        }

        for (layer, grad) in self.layers.iter_mut().zip(gradient.layers()) {
            layer.update(optimizer, grad)?;
        }

        Ok(())
    }

    /// Whether every parameter of the model is a finite number.
    pub fn is_finite(&self) -> bool {
        self.layers.iter().all(Dense::is_finite)
    }
}

fn argmax(p: ArrayView1<f32>) -> usize {
    let mut best = 0;

    for (i, &v) in p.iter().enumerate().skip(1) {
        if v > p[best] {
            best = i;
        }
    }

    best
}

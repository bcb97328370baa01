use ndarray::{Array1, ArrayView1, ArrayViewMut1};

use super::{Relu, Softmax};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActFn {
    Relu,
    Softmax,
}

impl ActFn {
    pub fn relu() -> Self {
        ActFn::Relu
    }

    pub fn softmax() -> Self {
        ActFn::Softmax
    }

    /// Applies the activation to a layer's weighted sums.
    pub fn f(&self, z: Array1<f32>) -> Array1<f32> {
        match self {
            ActFn::Relu => {
                let relu = Relu::new();
                z.mapv_into(|z| relu.f(z))
            }
            ActFn::Softmax => Softmax::new().f(z),
        }
    }

    /// Gates a delta by the activation's derivative, given the layer's output `a`.
    ///
    /// Softmax is left untouched, its derivative is folded into the cross entropy loss.
    pub fn gate(&self, mut d: ArrayViewMut1<f32>, a: ArrayView1<f32>) {
        match self {
            ActFn::Relu => {
                let relu = Relu::new();
                d.zip_mut_with(&a, |d, &a| {
                    if relu.df(a) == 0. {
                        *d = 0.;
                    }
                });
            }
            ActFn::Softmax => {}
        }
    }
}

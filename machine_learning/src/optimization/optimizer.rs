use ndarray::{ArrayView, ArrayViewMut, Dimension};

pub trait Optimizer {
    /// Takes a step over `params` given their gradient, both have the same shape.
    fn update_params<D: Dimension>(
        &mut self,
        params: ArrayViewMut<'_, f32, D>,
        grad: ArrayView<'_, f32, D>,
    );
}

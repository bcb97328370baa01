pub mod activations;
pub mod layers;
pub mod loss;
mod gradient;
mod sequential;

pub use gradient::{Gradient, LayerGrad};
pub use sequential::Sequential;

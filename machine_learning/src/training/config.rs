use std::num::NonZeroUsize;

/// The hyperparameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// The amount of full passes over the dataset.
    pub epochs: NonZeroUsize,
    pub learning_rate: f32,
    /// The width of each hidden layer, in order. May be empty.
    pub hidden: Vec<usize>,
}

impl TrainerConfig {
    pub const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(100).unwrap();
    pub const DEFAULT_LEARNING_RATE: f32 = 0.05;
    pub const DEFAULT_HIDDEN: [usize; 2] = [16, 16];

    /// Creates a new `TrainerConfig`.
    ///
    /// # Arguments
    /// * `epochs` - The amount of full passes over the dataset.
    /// * `learning_rate` - The step length of gradient descent.
    /// * `hidden` - The width of each hidden layer.
    pub fn new(epochs: NonZeroUsize, learning_rate: f32, hidden: Vec<usize>) -> Self {
        Self {
            epochs,
            learning_rate,
            hidden,
        }
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_EPOCHS,
            Self::DEFAULT_LEARNING_RATE,
            Self::DEFAULT_HIDDEN.to_vec(),
        )
    }
}

use std::num::NonZeroUsize;

use machine_learning::training::TrainerConfig;

use super::parse::{leading_float, leading_int};

/// The widest hidden layer that's accepted.
const MAX_LAYER_WIDTH: usize = 512;
/// The deepest hidden stack that's accepted.
const MAX_HIDDEN_LAYERS: usize = 8;

/// How a training run goes and how often its progress is published.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub epochs: NonZeroUsize,
    pub learning_rate: f32,
    pub hidden: Vec<usize>,
    /// Epochs between each decision boundary publication and scheduler yield.
    pub yield_every: NonZeroUsize,
    /// Cells per side of the published decision grids.
    pub boundary_resolution: NonZeroUsize,
}

impl TrainingConfig {
    pub const DEFAULT_YIELD_EVERY: NonZeroUsize = NonZeroUsize::new(5).unwrap();
    pub const DEFAULT_BOUNDARY_RESOLUTION: NonZeroUsize = NonZeroUsize::new(120).unwrap();

    /// Builds a `TrainingConfig` from user provided text, unreadable values fall back to their
    /// defaults.
    pub fn from_raw(epochs: &str, learning_rate: &str, hidden: &str) -> Self {
        let epochs = leading_int(epochs)
            .and_then(|n| usize::try_from(n).ok())
            .and_then(NonZeroUsize::new)
            .unwrap_or(TrainerConfig::DEFAULT_EPOCHS);

        let learning_rate = leading_float(learning_rate)
            .filter(|lr| lr.is_finite() && *lr > 0.)
            .unwrap_or(TrainerConfig::DEFAULT_LEARNING_RATE);

        Self {
            epochs,
            learning_rate,
            hidden: parse_hidden_layers(hidden),
            ..Default::default()
        }
    }

    pub fn with_yield_every(self, yield_every: NonZeroUsize) -> Self {
        Self {
            yield_every,
            ..self
        }
    }

    pub fn with_boundary_resolution(self, boundary_resolution: NonZeroUsize) -> Self {
        Self {
            boundary_resolution,
            ..self
        }
    }

    /// The part of this config the trainer cares about.
    pub fn trainer_config(&self) -> TrainerConfig {
        TrainerConfig::new(self.epochs, self.learning_rate, self.hidden.clone())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let TrainerConfig {
            epochs,
            learning_rate,
            hidden,
        } = TrainerConfig::default();

        Self {
            epochs,
            learning_rate,
            hidden,
            yield_every: Self::DEFAULT_YIELD_EVERY,
            boundary_resolution: Self::DEFAULT_BOUNDARY_RESOLUTION,
        }
    }
}

/// Parses a list of hidden layer widths separated by commas or whitespace.
///
/// Entries that aren't a width in `(0, 512]` are skipped and at most 8 layers are kept. If nothing
/// remains the default `[16, 16]` is returned.
pub fn parse_hidden_layers(s: &str) -> Vec<usize> {
    let layers: Vec<_> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .filter_map(leading_int)
        .filter_map(|n| usize::try_from(n).ok())
        .filter(|n| (1..=MAX_LAYER_WIDTH).contains(n))
        .take(MAX_HIDDEN_LAYERS)
        .collect();

    if layers.is_empty() {
        TrainerConfig::DEFAULT_HIDDEN.to_vec()
    } else {
        layers
    }
}

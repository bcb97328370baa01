mod dataset;
mod parse;
mod session;
mod training;

pub use dataset::DatasetConfig;
pub use session::SessionConfig;
pub use training::{TrainingConfig, parse_hidden_layers};

mod config;
mod trainer;

pub use config::TrainerConfig;
pub use trainer::{EpochReport, Trainer, TrainerState};

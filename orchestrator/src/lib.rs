pub mod configs;
pub mod error;
mod session;

use log::info;
use machine_learning::{dataset::Dataset, training::Trainer};
use rand::{SeedableRng, rngs::StdRng};

pub use error::{OrchestratorError, Result};
pub use session::{Outcome, Session, TrainingEvent};

use crate::configs::SessionConfig;

/// Draws the configured dataset and returns a session ready to train on it.
pub fn session(config: &SessionConfig) -> Session<StdRng> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut trainer = Trainer::new(rng, Dataset::default());
    let dataset = trainer.generate(&config.dataset.spec());

    info!(
        kind = config.dataset.kind.name(),
        points = dataset.len(),
        classes = dataset.num_classes();
        "dataset ready"
    );

    Session::new(trainer, config.training.clone())
}

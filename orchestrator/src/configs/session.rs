use std::{fs, num::NonZeroUsize, path::Path};

use serde::Deserialize;
use serde_json::Value;

use super::{DatasetConfig, TrainingConfig, parse::leading_int};
use crate::Result;

/// Everything needed to run a playground session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    pub dataset: DatasetConfig,
    pub training: TrainingConfig,
    /// Seeds the random source, a session without one draws from the OS.
    pub seed: Option<u64>,
}

/// The file layout, every field is optional and may be a string or a number.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSessionConfig {
    dataset: Value,
    points: Value,
    noise: Value,
    gap: Value,
    epochs: Value,
    learning_rate: Value,
    hidden_layers: Value,
    yield_every: Value,
    boundary_resolution: Value,
    seed: Value,
}

impl SessionConfig {
    /// Reads a `SessionConfig` from a JSON file.
    ///
    /// # Errors
    /// If the file can't be read, isn't a JSON object or names an unknown dataset.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Reads a `SessionConfig` from JSON text, missing or unreadable values take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: RawSessionConfig = serde_json::from_str(s)?;

        let kind = match &raw.dataset {
            Value::Null => DatasetConfig::default().kind.name().to_string(),
            v => text(v),
        };

        let dataset = DatasetConfig::from_raw(
            &kind,
            &text(&raw.points),
            &text(&raw.noise),
            &text(&raw.gap),
        )?;

        let mut training = TrainingConfig::from_raw(
            &text(&raw.epochs),
            &text(&raw.learning_rate),
            &text(&raw.hidden_layers),
        );

        if let Some(n) = positive(&raw.yield_every) {
            training = training.with_yield_every(n);
        }
        if let Some(n) = positive(&raw.boundary_resolution) {
            training = training.with_boundary_resolution(n);
        }

        let seed = match &raw.seed {
            Value::Number(n) => n.as_u64(),
            v => text(v).trim().parse().ok(),
        };

        Ok(Self {
            dataset,
            training,
            seed,
        })
    }
}

/// Renders a JSON value the way a user would have typed it, arrays are joined with commas.
fn text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(text).collect::<Vec<_>>().join(","),
        v => v.to_string(),
    }
}

fn positive(v: &Value) -> Option<NonZeroUsize> {
    leading_int(&text(v))
        .and_then(|n| usize::try_from(n).ok())
        .and_then(NonZeroUsize::new)
}

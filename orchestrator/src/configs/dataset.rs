use machine_learning::dataset::{DatasetKind, DatasetSpec};

use super::parse::{leading_float, leading_int};
use crate::{OrchestratorError, Result};

/// The dataset to draw, with every value already brought into its valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetConfig {
    pub kind: DatasetKind,
    pub points: usize,
    pub noise: f32,
    pub gap: f32,
}

impl DatasetConfig {
    pub const DEFAULT_POINTS: usize = 600;
    pub const MIN_POINTS: usize = 50;
    pub const DEFAULT_NOISE: f32 = 0.;
    pub const DEFAULT_GAP: f32 = 0.2;

    /// Builds a `DatasetConfig` from user provided text.
    ///
    /// Values that can't be read fall back to their defaults: fewer than 50 points means 600, the
    /// noise is clamped into `[0, 1]` and the gap can't be negative.
    ///
    /// # Errors
    /// `OrchestratorError::InvalidConfig` if the kind isn't a known dataset.
    pub fn from_raw(kind: &str, points: &str, noise: &str, gap: &str) -> Result<Self> {
        let kind: DatasetKind = kind
            .parse()
            .map_err(|e| OrchestratorError::InvalidConfig(format!("{e}")))?;

        let points = leading_int(points)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n >= Self::MIN_POINTS)
            .unwrap_or(Self::DEFAULT_POINTS);

        let noise = leading_float(noise)
            .unwrap_or(Self::DEFAULT_NOISE)
            .clamp(0., 1.);

        let gap = leading_float(gap).unwrap_or(Self::DEFAULT_GAP).max(0.);

        Ok(Self {
            kind,
            points,
            noise,
            gap,
        })
    }

    /// The generation request this config stands for.
    pub fn spec(&self) -> DatasetSpec {
        DatasetSpec::new(self.kind, self.points)
            .with_noise(self.noise)
            .with_gap(self.gap)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            kind: DatasetKind::Quadrant,
            points: Self::DEFAULT_POINTS,
            noise: Self::DEFAULT_NOISE,
            gap: Self::DEFAULT_GAP,
        }
    }
}

mod diagonal;
mod moons;
mod quadrant;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use log::debug;
use rand::Rng;

use super::{BoxMuller, Dataset, Point};
use crate::MlErr;

pub use diagonal::diagonal_stripes;
pub use moons::two_moons;
pub use quadrant::quadrant_blobs;

/// Gap between the moons when none is requested.
pub const DEFAULT_GAP: f32 = 0.2;

/// The synthetic distributions a dataset can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Four gaussian blobs, one per quadrant and class.
    Quadrant,
    /// Two interleaved half rings.
    Moons,
    /// Four corner blobs where both ends of the main diagonal share a class.
    Diagonal,
}

impl DatasetKind {
    /// The name used to request this kind.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Quadrant => "quadrant",
            DatasetKind::Moons => "moon",
            DatasetKind::Diagonal => "diagonal",
        }
    }

    /// The amount of classes a dataset of this kind carries.
    pub fn num_classes(&self) -> usize {
        match self {
            DatasetKind::Quadrant => 4,
            DatasetKind::Moons => 2,
            DatasetKind::Diagonal => 3,
        }
    }
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetKind {
    type Err = MlErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quadrant" => Ok(DatasetKind::Quadrant),
            "moon" | "moons" => Ok(DatasetKind::Moons),
            "diagonal" => Ok(DatasetKind::Diagonal),
            _ => Err(MlErr::UnknownDataset(s.to_string())),
        }
    }
}

/// A request for a synthetic dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetSpec {
    pub kind: DatasetKind,
    /// The desired amount of points.
    pub n: usize,
    /// Noise factor in `[0, 1]`, higher means more spread and more overlap.
    pub noise: f32,
    /// Vertical gap between the moons, ignored by the other kinds.
    pub gap: f32,
}

impl DatasetSpec {
    /// Creates a noiseless `DatasetSpec` with the default gap.
    pub fn new(kind: DatasetKind, n: usize) -> Self {
        Self {
            kind,
            n,
            noise: 0.,
            gap: DEFAULT_GAP,
        }
    }

    pub fn with_noise(self, noise: f32) -> Self {
        Self { noise, ..self }
    }

    pub fn with_gap(self, gap: f32) -> Self {
        Self { gap, ..self }
    }
}

/// Generates the dataset described by `spec`.
///
/// # Arguments
/// * `rng` - The random source, seed it for reproducible datasets.
/// * `spec` - The dataset request.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, spec: &DatasetSpec) -> Dataset {
    let &DatasetSpec {
        kind,
        n,
        noise,
        gap,
    } = spec;

    let dataset = match kind {
        DatasetKind::Quadrant => quadrant_blobs(rng, n, noise),
        DatasetKind::Moons => two_moons(rng, n, noise, gap),
        DatasetKind::Diagonal => diagonal_stripes(rng, n, noise),
    };

    debug!(
        kind = kind.name(), requested = n, generated = dataset.len(), noise = noise;
        "generated dataset"
    );

    dataset
}

/// The center of a gaussian cluster and the class its points belong to.
#[derive(Debug, Clone, Copy)]
struct Center {
    x: f32,
    y: f32,
    label: usize,
}

impl Center {
    const fn new(x: f32, y: f32, label: usize) -> Self {
        Self { x, y, label }
    }

    /// Samples a point around this center with `sigma` jitter on both axes.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, sigma: f32) -> Point {
        let x = self.x + BoxMuller.jitter(rng, sigma);
        let y = self.y + BoxMuller.jitter(rng, sigma);
        Point::new(x, y, self.label)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn kinds_parse_from_their_names() {
        for kind in [
            DatasetKind::Quadrant,
            DatasetKind::Moons,
            DatasetKind::Diagonal,
        ] {
            assert_eq!(kind.name().parse::<DatasetKind>().unwrap(), kind);
        }

        assert_eq!(" Moons ".parse::<DatasetKind>().unwrap(), DatasetKind::Moons);
        assert!(matches!(
            "spiral".parse::<DatasetKind>(),
            Err(MlErr::UnknownDataset(_))
        ));
    }

    #[test]
    fn generate_dispatches_on_the_kind() {
        let mut rng = StdRng::seed_from_u64(5);

        for kind in [
            DatasetKind::Quadrant,
            DatasetKind::Moons,
            DatasetKind::Diagonal,
        ] {
            let spec = DatasetSpec::new(kind, 120).with_noise(0.3);
            let dataset = generate(&mut rng, &spec);

            assert_eq!(dataset.len(), 120);
            assert_eq!(dataset.num_classes(), kind.num_classes());
        }
    }

    #[test]
    fn the_same_seed_yields_the_same_dataset() {
        let spec = DatasetSpec::new(DatasetKind::Diagonal, 203).with_noise(0.5);

        let a = generate(&mut StdRng::seed_from_u64(9), &spec);
        let b = generate(&mut StdRng::seed_from_u64(9), &spec);

        assert_eq!(a, b);
    }
}

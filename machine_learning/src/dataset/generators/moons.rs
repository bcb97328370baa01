use std::f32::consts::PI;

use rand::Rng;

use crate::dataset::{Dataset, Point};

/// Two interleaved half rings, rescaled so they span exactly `[-1, 1]` on both axes.
///
/// The noise shrinks the requested gap by up to 40% and widens the radial jitter. Each moon gets
/// `n / 2` points.
///
/// # Arguments
/// * `rng` - A random number generator.
/// * `n` - The desired amount of points.
/// * `noise` - Noise factor in `[0, 1]`.
/// * `gap` - The vertical gap between the moons.
pub fn two_moons<R: Rng + ?Sized>(rng: &mut R, n: usize, noise: f32, gap: f32) -> Dataset {
    let per = n / 2;
    let gap = (gap - noise * gap * 0.4).max(0.);
    let shift = 0.3 + gap * 1.2;
    let spread = 0.08 + noise * 0.25;

    let mut raw = Vec::with_capacity(per * 2);

    for _ in 0..per {
        let (t, jitter) = arc_sample(rng, spread);
        let x = t.cos() + jitter * 1.4;
        let y = t.sin() * 0.5 + gap / 2. + jitter;
        raw.push((x, y, 0));
    }

    for _ in 0..per {
        let (t, jitter) = arc_sample(rng, spread);
        let x = shift - t.cos() + jitter * 1.4;
        let y = -t.sin() * 0.5 - gap / 2. + jitter;
        raw.push((x, y, 1));
    }

    let x_extent = Extent::of(raw.iter().map(|&(x, _, _)| x));
    let y_extent = Extent::of(raw.iter().map(|&(_, y, _)| y));

    raw.into_iter()
        .map(|(x, y, label)| Point::new(x_extent.rescale(x), y_extent.rescale(y), label))
        .collect()
}

/// Samples an angle along the arc and the jitter shared by both coordinates of the point.
fn arc_sample<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> (f32, f32) {
    let t = rng.random::<f32>() * PI;
    let jitter = (rng.random::<f32>() - 0.5) * spread;
    (t, jitter)
}

/// The range covered by one axis of the point cloud.
struct Extent {
    min: f32,
    max: f32,
}

impl Extent {
    fn of<I: Iterator<Item = f32>>(values: I) -> Self {
        values.fold(
            Self {
                min: f32::INFINITY,
                max: f32::NEG_INFINITY,
            },
            |Self { min, max }, v| Self {
                min: min.min(v),
                max: max.max(v),
            },
        )
    }

    /// Maps `min` to exactly -1 and `max` to exactly 1. A flat axis collapses onto 0.
    fn rescale(&self, v: f32) -> f32 {
        let span = self.max - self.min;

        if span > 0. {
            2. * ((v - self.min) / span) - 1.
        } else {
            0.
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn every_moon_gets_half_of_the_points() {
        let mut rng = StdRng::seed_from_u64(4);

        for n in [50, 51, 600] {
            let dataset = two_moons(&mut rng, n, 0.3, 0.2);

            assert_eq!(dataset.len(), n / 2 * 2);
            assert_eq!(dataset.label_counts(), [n / 2, n / 2]);
        }
    }

    #[test]
    fn normalization_touches_both_ends_of_each_axis() {
        for (seed, noise, gap) in [(1, 0., 0.2), (2, 0.5, 0.5), (3, 1., 0.), (4, 0.25, 0.35)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let dataset = two_moons(&mut rng, 300, noise, gap);

            let xs: Vec<f32> = dataset.iter().map(|p| p.x()).collect();
            let ys: Vec<f32> = dataset.iter().map(|p| p.y()).collect();

            for axis in [&xs, &ys] {
                assert!(axis.iter().all(|v| (-1. ..=1.).contains(v)));
                assert!(axis.contains(&-1.));
                assert!(axis.contains(&1.));
            }
        }
    }

    #[test]
    fn the_upper_moon_sits_above_the_lower_one_on_average() {
        let mut rng = StdRng::seed_from_u64(8);
        let dataset = two_moons(&mut rng, 400, 0., 0.3);

        let mean_y = |label: usize| {
            let ys: Vec<f32> = dataset
                .iter()
                .filter(|p| p.label() == label)
                .map(|p| p.y())
                .collect();
            ys.iter().sum::<f32>() / ys.len() as f32
        };

        assert!(mean_y(0) > mean_y(1));
    }

    #[test]
    fn a_flat_axis_collapses_onto_zero() {
        let extent = Extent::of([0.5, 0.5].into_iter());
        assert_eq!(extent.rescale(0.5), 0.);
    }
}

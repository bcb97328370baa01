use rand::Rng;

use super::Center;
use crate::dataset::Dataset;

/// Four gaussian blobs centered at `(±sep, ±sep)`, one class each.
///
/// The separation shrinks from 0.6 to 0.3 and the spread grows as the noise rises. Each blob gets
/// `n / 4` points, so up to 3 points may be missing from the requested amount.
///
/// # Arguments
/// * `rng` - A random number generator.
/// * `n` - The desired amount of points.
/// * `noise` - Noise factor in `[0, 1]`.
pub fn quadrant_blobs<R: Rng + ?Sized>(rng: &mut R, n: usize, noise: f32) -> Dataset {
    let sep = 0.6 * (1. - noise * 0.5);
    let sigma = 0.12 + noise * 0.35;

    let centers = [
        Center::new(-sep, -sep, 0),
        Center::new(sep, -sep, 1),
        Center::new(-sep, sep, 2),
        Center::new(sep, sep, 3),
    ];

    let per = n / centers.len();
    let mut points = Vec::with_capacity(per * centers.len());

    for center in &centers {
        for _ in 0..per {
            points.push(center.sample(rng, sigma));
        }
    }

    Dataset::new(points)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn size_is_floored_to_a_multiple_of_four() {
        let mut rng = StdRng::seed_from_u64(1);

        for n in [16, 50, 101, 599, 600] {
            let dataset = quadrant_blobs(&mut rng, n, 0.2);

            assert_eq!(dataset.len(), n / 4 * 4);
            assert!(n - dataset.len() <= 3);
            assert_eq!(dataset.label_counts(), vec![n / 4; 4]);
        }
    }

    #[test]
    fn blobs_sit_in_their_quadrant_without_noise() {
        let mut rng = StdRng::seed_from_u64(2);
        let dataset = quadrant_blobs(&mut rng, 400, 0.);

        let mean = |label: usize| {
            let (sx, sy, count) = dataset
                .iter()
                .filter(|p| p.label() == label)
                .fold((0., 0., 0.), |(sx, sy, c), p| (sx + p.x(), sy + p.y(), c + 1.));
            (sx / count, sy / count)
        };

        let expected = [(-0.6, -0.6), (0.6, -0.6), (-0.6, 0.6), (0.6, 0.6)];
        for (label, (ex, ey)) in expected.into_iter().enumerate() {
            let (mx, my) = mean(label);
            assert!((mx - ex).abs() < 0.05 && (my - ey).abs() < 0.05, "{label}: {mx}, {my}");
        }
    }
}

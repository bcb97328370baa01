use rand::Rng;

use super::Center;
use crate::dataset::Dataset;

/// The class shared by both ends of the main diagonal.
const SHARED_CLASS: usize = 0;

/// Shares of the base allocation: two shared corners at double weight plus two unique corners.
const ALLOCATION_SHARES: usize = 6;

/// Four corner blobs where `(-sep, -sep)` and `(sep, sep)` share class 0 and the other two corners
/// carry classes 1 and 2.
///
/// The shared corners get twice the points of the unique ones. Whatever the flooring leaves out
/// is topped up from uniformly chosen corners, so the output has exactly `n` points.
///
/// # Arguments
/// * `rng` - A random number generator.
/// * `n` - The desired amount of points.
/// * `noise` - Noise factor in `[0, 1]`.
pub fn diagonal_stripes<R: Rng + ?Sized>(rng: &mut R, n: usize, noise: f32) -> Dataset {
    let sep = 0.7 - noise * 0.2;
    let sigma = 0.08 + noise * 0.25;

    let centers = [
        Center::new(-sep, -sep, SHARED_CLASS),
        Center::new(sep, sep, SHARED_CLASS),
        Center::new(sep, -sep, 1),
        Center::new(-sep, sep, 2),
    ];

    let per = n / ALLOCATION_SHARES;
    let mut points = Vec::with_capacity(n);

    for center in &centers {
        let count = if center.label == SHARED_CLASS {
            per * 2
        } else {
            per
        };

        for _ in 0..count {
            points.push(center.sample(rng, sigma));
        }
    }

    while points.len() < n {
        let center = centers[rng.random_range(0..centers.len())];
        points.push(center.sample(rng, sigma));
    }

    Dataset::new(points)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn size_is_exact_after_topping_up() {
        let mut rng = StdRng::seed_from_u64(6);

        for n in [1, 5, 50, 53, 599, 600, 1001] {
            assert_eq!(diagonal_stripes(&mut rng, n, 0.4).len(), n);
        }
    }

    #[test]
    fn the_shared_class_gets_double_weight() {
        let mut rng = StdRng::seed_from_u64(7);
        let dataset = diagonal_stripes(&mut rng, 600, 0.);

        assert_eq!(dataset.label_counts(), [400, 100, 100]);
    }

    #[test]
    fn the_shared_class_sits_on_the_main_diagonal() {
        let mut rng = StdRng::seed_from_u64(8);
        let dataset = diagonal_stripes(&mut rng, 300, 0.);

        for point in dataset.iter() {
            let same_sign = point.x().signum() == point.y().signum();
            assert_eq!(point.label() == SHARED_CLASS, same_sign, "{point:?}");
        }
    }
}

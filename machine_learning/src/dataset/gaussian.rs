use std::f32::consts::PI;

use rand::Rng;
use rand_distr::Distribution;

/// Standard normal sampler based on the Box-Muller transform.
///
/// Keeps no state between calls, every sample consumes two fresh uniform deviates from the
/// caller's generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxMuller;

impl BoxMuller {
    /// Returns a new `BoxMuller`.
    pub fn new() -> Self {
        Self
    }

    /// Samples a normal deviate with zero mean and `sigma` standard deviation.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `sigma` - The standard deviation.
    pub fn jitter<R: Rng + ?Sized>(&self, rng: &mut R, sigma: f32) -> f32 {
        self.sample(rng) * sigma
    }
}

impl Distribution<f32> for BoxMuller {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let u = open_unit(rng);
        let v = open_unit(rng);

        (-2. * u.ln()).sqrt() * (2. * PI * v).cos()
    }
}

/// Draws from `(0, 1)`, the logarithm in the transform is undefined at zero.
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        let u: f32 = rng.random();

        if u != 0. {
            return u;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn samples_have_standard_normal_moments() {
        const N: usize = 50_000;
        let mut rng = StdRng::seed_from_u64(3);

        let samples: Vec<f32> = (0..N).map(|_| BoxMuller.sample(&mut rng)).collect();
        let mean = samples.iter().sum::<f32>() / N as f32;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / N as f32;

        assert!(samples.iter().all(|s| s.is_finite()));
        assert!(mean.abs() < 0.03, "mean: {mean}");
        assert!((var - 1.).abs() < 0.05, "variance: {var}");
    }

    #[test]
    fn jitter_scales_the_deviation() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);

        let plain = BoxMuller.sample(&mut a);
        let scaled = BoxMuller.jitter(&mut b, 0.5);

        assert_eq!(plain * 0.5, scaled);
    }
}

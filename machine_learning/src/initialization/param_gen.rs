/// A `ParamGen` generates values for the initial state of the model's parameters.
pub trait ParamGen {
    /// Should sample at most `n` parameters.
    ///
    /// # Arguments
    /// * `n` - The upper limit of samples to generate.
    ///
    /// # Returns
    /// An option whether the generator is exhausted.
    fn sample(&mut self, n: usize) -> Option<Vec<f32>>;

    /// Samples exactly `n` parameters, padding with zeros if the generator runs out.
    ///
    /// # Arguments
    /// * `n` - The amount of samples to generate.
    fn sample_exact(&mut self, n: usize) -> Vec<f32> {
        let mut sample = self.sample(n).unwrap_or_default();
        sample.resize(n, 0.);
        sample
    }
}

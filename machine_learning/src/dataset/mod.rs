mod gaussian;
mod generators;
mod point;

use ndarray::Array2;
use rand::{Rng, seq::SliceRandom};

pub use gaussian::BoxMuller;
pub use generators::{
    DatasetKind, DatasetSpec, diagonal_stripes, generate, quadrant_blobs, two_moons,
};
pub use point::Point;

/// The amount of features every point carries, its two coordinates.
pub const FEATURES: usize = 2;

/// An ordered collection of labeled points.
///
/// The order is the one in which the points were generated and carries no meaning, it can be
/// shuffled freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `points` - The points the dataset is composed of.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Gives mutable access to the points, only their predictions can be changed through it.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Returns the amount of classes, labels are contiguous so it's the highest label plus one.
    pub fn num_classes(&self) -> usize {
        self.points
            .iter()
            .map(|p| p.label() + 1)
            .max()
            .unwrap_or_default()
    }

    /// Counts the points of each class.
    pub fn label_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_classes()];

        for point in &self.points {
            counts[point.label()] += 1;
        }

        counts
    }

    /// Returns the share of points whose prediction matches their label.
    ///
    /// # Returns
    /// `None` if no point has been predicted yet, a point without prediction counts as a miss.
    pub fn accuracy(&self) -> Option<f32> {
        if self.points.iter().all(|p| p.predicted().is_none()) {
            return None;
        }

        let correct = self
            .points
            .iter()
            .filter(|p| p.is_correct() == Some(true))
            .count();

        Some(correct as f32 / self.points.len() as f32)
    }

    /// Removes the prediction of every point.
    pub fn clear_predictions(&mut self) {
        self.points.iter_mut().for_each(Point::clear_prediction);
    }

    /// Shuffles the points in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.points.shuffle(rng);
    }

    /// Stacks the coordinates of every point as the rows of a `(len, 2)` matrix.
    pub fn features(&self) -> Array2<f32> {
        Array2::from_shape_fn((self.points.len(), FEATURES), |(i, j)| {
            let point = &self.points[i];
            if j == 0 { point.x() } else { point.y() }
        })
    }

    /// Encodes the labels as the one-hot rows of a `(len, num_classes)` matrix.
    ///
    /// # Arguments
    /// * `num_classes` - The width of each row, labels outside of it yield an all-zero row.
    pub fn one_hot(&self, num_classes: usize) -> Array2<f32> {
        let mut targets = Array2::zeros((self.points.len(), num_classes));

        for (mut row, point) in targets.rows_mut().into_iter().zip(&self.points) {
            if let Some(target) = row.get_mut(point.label()) {
                *target = 1.;
            }
        }

        targets
    }
}

impl FromIterator<Point> for Dataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

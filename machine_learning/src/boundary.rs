use std::num::NonZeroUsize;

use ndarray::{Array2, ArrayView2, aview1};

use crate::arch::Sequential;

/// Anything that assigns a class to a point of the plane.
pub trait Classifier {
    fn classify(&self, x: f32, y: f32) -> usize;
}

impl Classifier for Sequential {
    fn classify(&self, x: f32, y: f32) -> usize {
        self.predict(aview1(&[x, y]))
    }
}

/// The class a classifier assigns to each cell of a square grid laid over `[-1, 1]²`.
///
/// Cells are indexed `[gy, gx]`: row 0 is the top of the plane and column 0 its left side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionGrid {
    cells: Array2<usize>,
}

impl DecisionGrid {
    /// Classifies the centre of every cell of a `resolution × resolution` grid.
    pub fn evaluate<C: Classifier + ?Sized>(classifier: &C, resolution: NonZeroUsize) -> Self {
        let res = resolution.get();
        let cells = Array2::from_shape_fn((res, res), |(gy, gx)| {
            let (x, y) = cell_center(gx, gy, res);
            classifier.classify(x, y)
        });

        Self { cells }
    }

    pub fn resolution(&self) -> usize {
        self.cells.nrows()
    }

    /// Returns the class of column `gx` and row `gy`, `None` if out of the grid.
    pub fn get(&self, gx: usize, gy: usize) -> Option<usize> {
        self.cells.get((gy, gx)).copied()
    }

    pub fn cells(&self) -> ArrayView2<'_, usize> {
        self.cells.view()
    }

    pub fn cell_center(&self, gx: usize, gy: usize) -> (f32, f32) {
        cell_center(gx, gy, self.resolution())
    }

    /// Counts the cells assigned to each class, classes beyond `num_classes` are ignored.
    pub fn class_counts(&self, num_classes: usize) -> Vec<usize> {
        let mut counts = vec![0; num_classes];

        for &class in &self.cells {
            if let Some(count) = counts.get_mut(class) {
                *count += 1;
            }
        }

        counts
    }
}

/// Maps a cell of a `res × res` grid to the plane coordinates of its centre.
pub fn cell_center(gx: usize, gy: usize, res: usize) -> (f32, f32) {
    let step = 2. / res as f32;
    let x = -1. + (gx as f32 + 0.5) * step;
    let y = 1. - (gy as f32 + 0.5) * step;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(usize);

    impl Classifier for Constant {
        fn classify(&self, _: f32, _: f32) -> usize {
            self.0
        }
    }

    /// Class 1 on the right half of the plane, class 0 on the left.
    struct RightHalf;

    impl Classifier for RightHalf {
        fn classify(&self, x: f32, _: f32) -> usize {
            usize::from(x > 0.)
        }
    }

    fn res(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn a_constant_classifier_fills_the_grid() {
        let grid = DecisionGrid::evaluate(&Constant(0), res(10));

        assert_eq!(grid.resolution(), 10);
        assert_eq!(grid.cells().dim(), (10, 10));
        assert!(grid.cells().iter().all(|&c| c == 0));
        assert_eq!(grid.class_counts(2), [100, 0]);
    }

    #[test]
    fn row_zero_is_the_top_of_the_plane() {
        assert_eq!(cell_center(0, 0, 4), (-0.75, 0.75));
        assert_eq!(cell_center(3, 3, 4), (0.75, -0.75));
        assert_eq!(cell_center(0, 0, 1), (0., 0.));
    }

    #[test]
    fn columns_follow_the_horizontal_axis() {
        let grid = DecisionGrid::evaluate(&RightHalf, res(4));

        for gy in 0..4 {
            assert_eq!(grid.get(0, gy), Some(0));
            assert_eq!(grid.get(1, gy), Some(0));
            assert_eq!(grid.get(2, gy), Some(1));
            assert_eq!(grid.get(3, gy), Some(1));
        }
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.cell_center(2, 1), (0.25, 0.25));
    }
}

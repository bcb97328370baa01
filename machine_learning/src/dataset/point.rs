/// A labeled point of the plane.
///
/// The coordinates and the label are fixed at construction, the only thing that changes over a
/// training run is the class the model currently predicts for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
    label: usize,
    predicted: Option<usize>,
}

impl Point {
    /// Creates a new `Point` with no prediction.
    ///
    /// # Arguments
    /// * `x` - The horizontal coordinate.
    /// * `y` - The vertical coordinate.
    /// * `label` - The ground truth class index.
    pub fn new(x: f32, y: f32, label: usize) -> Self {
        Self {
            x,
            y,
            label,
            predicted: None,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn label(&self) -> usize {
        self.label
    }

    /// The class the last trained model assigned to this point, if any.
    pub fn predicted(&self) -> Option<usize> {
        self.predicted
    }

    /// Whether the current prediction matches the label, `None` if there's no prediction.
    pub fn is_correct(&self) -> Option<bool> {
        self.predicted.map(|class| class == self.label)
    }

    pub fn set_prediction(&mut self, class: usize) {
        self.predicted = Some(class);
    }

    pub fn clear_prediction(&mut self) {
        self.predicted = None;
    }
}

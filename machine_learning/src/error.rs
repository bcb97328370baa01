use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;

use crate::initialization::RandErr;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Shape(ShapeError),
    Init(RandErr),
    EmptyModel,
    UnknownDataset(String),
    Diverged {
        epoch: usize,
    },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => format!("There's a size mismatch in {what}, got {got} and expected {expected}"),
            MlErr::Shape(e) => format!("Failed to shape the parameters: {e}"),
            MlErr::Init(e) => format!("Failed to initialize the parameters: {e}"),
            MlErr::EmptyModel => "A model needs at least one layer".to_string(),
            MlErr::UnknownDataset(kind) => format!(
                "Unknown dataset kind '{kind}', expected one of quadrant, moon or diagonal"
            ),
            MlErr::Diverged { epoch } => {
                format!("Training diverged at epoch {epoch}, the parameters are no longer finite")
            }
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Shape(e) => Some(e),
            MlErr::Init(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<RandErr> for MlErr {
    fn from(value: RandErr) -> Self {
        Self::Init(value)
    }
}

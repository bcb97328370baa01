use std::num::NonZeroUsize;

use log::{debug, info, warn};
use ndarray::Array2;
use rand::Rng;

use super::TrainerConfig;
use crate::{
    MlErr, Result,
    arch::{
        Gradient, Sequential,
        loss::{CrossEntropy, LossFn},
    },
    boundary::{Classifier, DecisionGrid},
    dataset::{self, Dataset, DatasetSpec, FEATURES},
    optimization::GradientDescent,
};

/// Whether a training run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    Idle,
    Running,
}

/// What a single epoch of training achieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// The epoch that just finished, starting at 1.
    pub epoch: usize,
    /// The epoch budget of the run.
    pub epochs: usize,
    /// The share of correctly classified points after the update.
    pub accuracy: f32,
    /// The mean loss over the dataset before the update.
    pub loss: f32,
}

impl EpochReport {
    /// Whether this epoch exhausted the run's budget.
    pub fn is_last(&self) -> bool {
        self.epoch >= self.epochs
    }
}

/// The parts of a run that only live while it's in progress.
struct RunState {
    epochs: usize,
    optimizer: GradientDescent,
    features: Array2<f32>,
    targets: Array2<f32>,
}

/// Trains a fresh classifier over its dataset, one epoch at a time.
///
/// A run goes `Idle -> Running` on `start` and back to `Idle` when its epochs are exhausted or when
/// it's stopped. A completed run keeps its model so it can still be queried, stopping discards it.
pub struct Trainer<R: Rng> {
    rng: R,
    dataset: Dataset,
    loss_fn: CrossEntropy,
    model: Option<Sequential>,
    run: Option<RunState>,
    epoch: usize,
}

impl<R: Rng> Trainer<R> {
    /// Creates a new idle `Trainer`.
    ///
    /// # Arguments
    /// * `rng` - The random source for datasets and weight initialization.
    /// * `dataset` - The points to train on.
    pub fn new(rng: R, dataset: Dataset) -> Self {
        Self {
            rng,
            dataset,
            loss_fn: CrossEntropy::new(),
            model: None,
            run: None,
            epoch: 0,
        }
    }

    pub fn state(&self) -> TrainerState {
        if self.run.is_some() {
            TrainerState::Running
        } else {
            TrainerState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == TrainerState::Running
    }

    /// The amount of epochs completed by the current or last run.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn model(&self) -> Option<&Sequential> {
        self.model.as_ref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The accuracy of the latest predictions, `None` if there are none.
    pub fn accuracy(&self) -> Option<f32> {
        self.dataset.accuracy()
    }

    /// Replaces the dataset, stopping any run first.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.stop();
        self.dataset = dataset;
    }

    /// Draws a new dataset from the trainer's random source and trains on it from now on.
    pub fn generate(&mut self, spec: &DatasetSpec) -> &Dataset {
        let dataset = dataset::generate(&mut self.rng, spec);
        self.set_dataset(dataset);
        &self.dataset
    }

    /// Starts a new run with a freshly initialized model, stopping the current one if any.
    ///
    /// # Returns
    /// Whether a run was started, an empty dataset leaves the trainer idle.
    pub fn start(&mut self, config: &TrainerConfig) -> Result<bool> {
        self.stop();

        if self.dataset.is_empty() {
            warn!("there's no data to train on, ignoring the request");
            return Ok(false);
        }

        let num_classes = self.dataset.num_classes();
        let model = Sequential::init(&mut self.rng, FEATURES, &config.hidden, num_classes)?;

        info!(
            points = self.dataset.len(),
            classes = num_classes,
            params = model.size(),
            epochs = config.epochs.get(),
            learning_rate = config.learning_rate;
            "starting training"
        );

        self.run = Some(RunState {
            epochs: config.epochs.get(),
            optimizer: GradientDescent::new(config.learning_rate),
            features: self.dataset.features(),
            targets: self.dataset.one_hot(num_classes),
        });
        self.model = Some(model);

        Ok(true)
    }

    /// Runs a single full batch epoch.
    ///
    /// # Returns
    /// The epoch's report, `None` if there's no run in progress, or `MlErr::Diverged` if the
    /// parameters stopped being finite, in which case the run is stopped.
    pub fn step(&mut self) -> Result<Option<EpochReport>> {
        let (Some(run), Some(model)) = (self.run.as_mut(), self.model.as_mut()) else {
            return Ok(None);
        };

        let loss = full_batch_epoch(model, run, &self.loss_fn)?;
        let epochs = run.epochs;
        let diverged = !loss.is_finite() || !model.is_finite();

        if !diverged {
            for point in self.dataset.points_mut() {
                point.set_prediction(model.classify(point.x(), point.y()));
            }
        }

        self.epoch += 1;
        let epoch = self.epoch;

        if diverged {
            warn!(epoch = epoch; "training diverged, stopping");
            self.stop();
            return Err(MlErr::Diverged { epoch });
        }

        let accuracy = self.dataset.accuracy().unwrap_or_default();
        debug!(epoch = epoch, epochs = epochs, loss = loss, accuracy = accuracy; "epoch finished");

        let report = EpochReport {
            epoch,
            epochs,
            accuracy,
            loss,
        };

        if report.is_last() {
            self.run = None;
            info!(epochs = epochs, loss = loss, accuracy = accuracy; "training complete");
        }

        Ok(Some(report))
    }

    /// Stops the current run, discarding the model and every prediction.
    pub fn stop(&mut self) {
        if self.run.take().is_some() {
            info!(epoch = self.epoch; "training stopped");
        }

        self.model = None;
        self.epoch = 0;
        self.dataset.clear_predictions();
    }

    /// Starts a run and steps it until completion.
    ///
    /// # Returns
    /// The report of the last epoch, `None` if the dataset is empty.
    pub fn train(&mut self, config: &TrainerConfig) -> Result<Option<EpochReport>> {
        if !self.start(config)? {
            return Ok(None);
        }

        let mut last = None;
        while let Some(report) = self.step()? {
            last = Some(report);
        }

        Ok(last)
    }

    /// Classifies a point with the current model, `None` if there's no model.
    pub fn predict(&self, x: f32, y: f32) -> Option<usize> {
        self.model.as_ref().map(|model| model.classify(x, y))
    }

    /// Evaluates the current model over a grid, `None` if there's no model.
    pub fn decision_grid(&self, resolution: NonZeroUsize) -> Option<DecisionGrid> {
        self.model
            .as_ref()
            .map(|model| DecisionGrid::evaluate(model, resolution))
    }
}

/// Accumulates the gradient of every sample, averages it and applies it once.
///
/// # Returns
/// The mean loss before the update.
fn full_batch_epoch<L: LossFn>(
    model: &mut Sequential,
    run: &mut RunState,
    loss_fn: &L,
) -> Result<f32> {
    let n = run.features.nrows();
    let mut grad = Gradient::zeros_like(model);
    let mut total_loss = 0.;

    for (x, target) in run.features.rows().into_iter().zip(run.targets.rows()) {
        let activations = model.forward(x);
        let output = &activations[activations.len() - 1];

        total_loss += loss_fn.loss(output.view(), target);
        grad.accumulate(&model.backward(loss_fn, &activations, target)?)?;
    }

    grad.scale(1. / n as f32);
    model.apply(&mut run.optimizer, &grad)?;

    Ok(total_loss / n as f32)
}

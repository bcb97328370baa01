use log::{debug, info};
use machine_learning::{
    boundary::DecisionGrid,
    training::{EpochReport, Trainer},
};
use rand::Rng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{Result, configs::TrainingConfig};

/// The progress of a session, as published to its listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingEvent {
    /// An epoch finished.
    Epoch(EpochReport),
    /// The current model's decision regions.
    Boundary(DecisionGrid),
    /// Every epoch ran.
    Complete { accuracy: f32 },
    /// The session was cancelled after `epoch` epochs.
    Stopped { epoch: usize },
    /// There was nothing to train on.
    Skipped,
    /// The run failed and was stopped.
    Error(String),
}

/// How a call to `Session::run` ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Completed(EpochReport),
    Stopped { epoch: usize },
    Skipped,
}

/// Drives a trainer cooperatively, one epoch at a time, publishing its progress.
pub struct Session<R: Rng> {
    trainer: Trainer<R>,
    config: TrainingConfig,
}

impl<R: Rng> Session<R> {
    /// Creates a new `Session`.
    ///
    /// # Arguments
    /// * `trainer` - The trainer, already holding the dataset.
    /// * `config` - How each run goes.
    pub fn new(trainer: Trainer<R>, config: TrainingConfig) -> Self {
        Self { trainer, config }
    }

    pub fn trainer(&self) -> &Trainer<R> {
        &self.trainer
    }

    pub fn trainer_mut(&mut self) -> &mut Trainer<R> {
        &mut self.trainer
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains a fresh model until every epoch ran or `token` is cancelled.
    ///
    /// The token is checked between epochs. Every `yield_every` epochs the current decision grid is
    /// published and the task yields to the scheduler, a grid is also published after the last
    /// epoch.
    ///
    /// # Arguments
    /// * `token` - Cancels the run, the trainer is stopped when it's noticed.
    /// * `events` - Where the progress is published, a closed channel doesn't stop the run.
    ///
    /// # Errors
    /// If the run fails, in which case an `Error` event is published first.
    pub async fn run(
        &mut self,
        token: &CancellationToken,
        events: &mpsc::Sender<TrainingEvent>,
    ) -> Result<Outcome> {
        let started = match self.trainer.start(&self.config.trainer_config()) {
            Ok(started) => started,
            Err(e) => {
                emit(events, TrainingEvent::Error(e.to_string())).await;
                return Err(e.into());
            }
        };

        if !started {
            emit(events, TrainingEvent::Skipped).await;
            return Ok(Outcome::Skipped);
        }

        let yield_every = self.config.yield_every.get();

        loop {
            if token.is_cancelled() {
                let epoch = self.trainer.epoch();
                self.trainer.stop();
                info!(epoch = epoch; "session cancelled");

                emit(events, TrainingEvent::Stopped { epoch }).await;
                return Ok(Outcome::Stopped { epoch });
            }

            let report = match self.trainer.step() {
                Ok(Some(report)) => report,
                Ok(None) => {
                    let epoch = self.trainer.epoch();
                    emit(events, TrainingEvent::Stopped { epoch }).await;
                    return Ok(Outcome::Stopped { epoch });
                }
                Err(e) => {
                    emit(events, TrainingEvent::Error(e.to_string())).await;
                    return Err(e.into());
                }
            };

            emit(events, TrainingEvent::Epoch(report)).await;

            let pause = report.epoch % yield_every == 0;
            if pause || report.is_last() {
                self.publish_boundary(events).await;
            }

            if report.is_last() {
                emit(events, TrainingEvent::Complete { accuracy: report.accuracy }).await;
                return Ok(Outcome::Completed(report));
            }

            if pause {
                tokio::task::yield_now().await;
            }
        }
    }

    async fn publish_boundary(&self, events: &mpsc::Sender<TrainingEvent>) {
        if let Some(grid) = self.trainer.decision_grid(self.config.boundary_resolution) {
            emit(events, TrainingEvent::Boundary(grid)).await;
        }
    }
}

async fn emit(events: &mpsc::Sender<TrainingEvent>, event: TrainingEvent) {
    if events.send(event).await.is_err() {
        debug!("no one is listening to the training events");
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use machine_learning::dataset::{Dataset, DatasetKind, DatasetSpec};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn session(epochs: &str, yield_every: usize) -> Session<StdRng> {
        let mut trainer = Trainer::new(StdRng::seed_from_u64(9), Dataset::default());
        trainer.generate(&DatasetSpec::new(DatasetKind::Quadrant, 80));

        let config = TrainingConfig::from_raw(epochs, "0.1", "8")
            .with_yield_every(NonZeroUsize::new(yield_every).unwrap())
            .with_boundary_resolution(NonZeroUsize::new(10).unwrap());

        Session::new(trainer, config)
    }

    fn drain(rx: &mut mpsc::Receiver<TrainingEvent>) -> Vec<TrainingEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn a_full_run_publishes_every_epoch() {
        let mut session = session("12", 5);
        let (tx, mut rx) = mpsc::channel(64);

        let outcome = session.run(&CancellationToken::new(), &tx).await.unwrap();
        let events = drain(&mut rx);

        let Outcome::Completed(report) = outcome else {
            panic!("expected a completed run, got {outcome:?}");
        };
        assert_eq!(report.epoch, 12);

        let epochs: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                TrainingEvent::Epoch(report) => Some(report.epoch),
                _ => None,
            })
            .collect();
        assert_eq!(epochs, (1..=12).collect::<Vec<_>>());

        // After epochs 5, 10 and the last one.
        let boundaries = events
            .iter()
            .filter(|e| matches!(e, TrainingEvent::Boundary(_)))
            .count();
        assert_eq!(boundaries, 3);

        assert_eq!(
            events.last(),
            Some(&TrainingEvent::Complete {
                accuracy: report.accuracy
            })
        );
        assert!(session.trainer().model().is_some());
    }

    #[tokio::test]
    async fn a_cancelled_token_stops_the_trainer() {
        let mut session = session("50", 5);
        let (tx, mut rx) = mpsc::channel(64);
        let token = CancellationToken::new();
        token.cancel();

        let outcome = session.run(&token, &tx).await.unwrap();

        assert_eq!(outcome, Outcome::Stopped { epoch: 0 });
        assert_eq!(drain(&mut rx), [TrainingEvent::Stopped { epoch: 0 }]);
        assert!(session.trainer().model().is_none());
        assert!(!session.trainer().is_running());
    }

    #[tokio::test]
    async fn cancelling_mid_run_stops_at_an_epoch_boundary() {
        let mut session = session("50", 5);
        let (tx, mut rx) = mpsc::channel(256);
        let token = CancellationToken::new();

        let listener = tokio::spawn({
            let token = token.clone();
            async move {
                while let Some(event) = rx.recv().await {
                    if matches!(event, TrainingEvent::Epoch(report) if report.epoch == 3) {
                        token.cancel();
                    }
                }
            }
        });

        let outcome = session.run(&token, &tx).await.unwrap();
        drop(tx);
        listener.await.unwrap();

        let Outcome::Stopped { epoch } = outcome else {
            panic!("expected a stopped run, got {outcome:?}");
        };
        assert!((3..50).contains(&epoch));
        assert!(session.trainer().model().is_none());
        assert_eq!(session.trainer().accuracy(), None);
    }

    #[tokio::test]
    async fn an_empty_dataset_is_skipped() {
        let trainer = Trainer::new(StdRng::seed_from_u64(1), Dataset::default());
        let mut session = Session::new(trainer, TrainingConfig::default());
        let (tx, mut rx) = mpsc::channel(8);

        let outcome = session.run(&CancellationToken::new(), &tx).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(drain(&mut rx), [TrainingEvent::Skipped]);
    }

    #[tokio::test]
    async fn divergence_is_published_and_returned() {
        let mut session = session("20", 5);
        session.config.learning_rate = f32::INFINITY;
        let (tx, mut rx) = mpsc::channel(8);

        let res = session.run(&CancellationToken::new(), &tx).await;

        assert!(res.is_err());
        assert!(matches!(drain(&mut rx).last(), Some(TrainingEvent::Error(_))));
        assert!(!session.trainer().is_running());
    }

    #[tokio::test]
    async fn running_again_restarts_from_the_first_epoch() {
        let mut session = session("6", 5);
        let (tx, mut rx) = mpsc::channel(64);

        session.run(&CancellationToken::new(), &tx).await.unwrap();
        drain(&mut rx);
        session.run(&CancellationToken::new(), &tx).await.unwrap();

        let first = drain(&mut rx).into_iter().find_map(|e| match e {
            TrainingEvent::Epoch(report) => Some(report.epoch),
            _ => None,
        });
        assert_eq!(first, Some(1));
    }

    #[tokio::test]
    async fn a_closed_channel_doesnt_stop_the_run() {
        let mut session = session("7", 5);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let outcome = session.run(&CancellationToken::new(), &tx).await.unwrap();
        assert!(matches!(outcome, Outcome::Completed(report) if report.epoch == 7));
    }
}

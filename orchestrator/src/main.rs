use std::env;

use anyhow::Context;
use log::info;
use machine_learning::boundary::DecisionGrid;
use orchestrator::{Outcome, TrainingEvent, configs::SessionConfig};
use tokio::{signal, sync::mpsc};
use tokio_util::sync::CancellationToken;

const CONFIG_VAR: &str = "PLAYGROUND_CONFIG";
const EVENTS_CAPACITY: usize = 64;
const MAX_GRID_COLUMNS: usize = 60;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1).or_else(|| env::var(CONFIG_VAR).ok()) {
        Some(path) => SessionConfig::from_json_file(&path)
            .with_context(|| format!("failed to load the config at '{path}'"))?,
        None => SessionConfig::default(),
    };

    let mut session = orchestrator::session(&config);
    let token = CancellationToken::new();
    let (tx, rx) = mpsc::channel(EVENTS_CAPACITY);

    let printer = tokio::spawn(print_events(rx));
    let ctrl_c = tokio::spawn({
        let token = token.clone();
        async move {
            if signal::ctrl_c().await.is_ok() {
                info!("received ctrl-c, stopping");
                token.cancel();
            }
        }
    });

    let outcome = session.run(&token, &tx).await;
    drop(tx);
    ctrl_c.abort();

    if let Some(grid) = printer.await? {
        println!("{}", render(&grid));
    }

    match outcome? {
        Outcome::Completed(report) => println!(
            "trained {} epochs: accuracy {:.1}%, loss {:.4}",
            report.epochs,
            report.accuracy * 100.,
            report.loss
        ),
        Outcome::Stopped { epoch } => println!("stopped after {epoch} epochs"),
        Outcome::Skipped => println!("nothing to train on"),
    }

    Ok(())
}

/// Prints the progress as it arrives and returns the last decision grid.
async fn print_events(mut rx: mpsc::Receiver<TrainingEvent>) -> Option<DecisionGrid> {
    let mut last_grid = None;

    while let Some(event) = rx.recv().await {
        match event {
            TrainingEvent::Epoch(report) => println!(
                "epoch {}/{}: accuracy {:.1}%, loss {:.4}",
                report.epoch,
                report.epochs,
                report.accuracy * 100.,
                report.loss
            ),
            TrainingEvent::Boundary(grid) => last_grid = Some(grid),
            TrainingEvent::Complete { accuracy } => {
                println!("training complete, accuracy {:.1}%", accuracy * 100.)
            }
            TrainingEvent::Stopped { epoch } => println!("training stopped at epoch {epoch}"),
            TrainingEvent::Skipped => println!("the dataset is empty, skipping"),
            TrainingEvent::Error(msg) => eprintln!("training failed: {msg}"),
        }
    }

    last_grid
}

/// Draws the grid with one digit per class, top row first.
fn render(grid: &DecisionGrid) -> String {
    let stride = grid.resolution().div_ceil(MAX_GRID_COLUMNS);

    grid.cells()
        .rows()
        .into_iter()
        .step_by(stride)
        .map(|row| {
            row.iter()
                .step_by(stride)
                .map(|&class| char::from_digit(class as u32 % 36, 36).unwrap_or('?'))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

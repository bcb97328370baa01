use std::num::NonZeroUsize;

use machine_learning::{
    dataset::{DatasetKind, DatasetSpec},
    training::{Trainer, TrainerConfig, TrainerState},
};
use rand::{SeedableRng, rngs::StdRng};

fn config(epochs: usize, learning_rate: f32, hidden: &[usize]) -> TrainerConfig {
    TrainerConfig::new(
        NonZeroUsize::new(epochs).unwrap(),
        learning_rate,
        hidden.to_vec(),
    )
}

#[test]
fn generated_datasets_train_end_to_end() {
    for kind in [DatasetKind::Quadrant, DatasetKind::Moons, DatasetKind::Diagonal] {
        let mut trainer = Trainer::new(StdRng::seed_from_u64(3), Default::default());
        let spec = DatasetSpec::new(kind, 200).with_noise(0.1);

        assert_eq!(trainer.generate(&spec).num_classes(), kind.num_classes());

        let report = trainer.train(&config(5, 0.05, &[8])).unwrap().unwrap();

        assert_eq!(report.epoch, 5);
        assert!(report.loss.is_finite());
        assert!((0. ..=1.).contains(&report.accuracy));
        assert_eq!(trainer.state(), TrainerState::Idle);
    }
}

#[test]
fn a_trained_model_paints_a_full_grid() {
    let mut trainer = Trainer::new(StdRng::seed_from_u64(11), Default::default());
    trainer.generate(&DatasetSpec::new(DatasetKind::Quadrant, 200));
    trainer.train(&config(20, 0.1, &[16])).unwrap();

    let grid = trainer
        .decision_grid(NonZeroUsize::new(30).unwrap())
        .unwrap();

    assert_eq!(grid.cells().dim(), (30, 30));
    assert_eq!(grid.class_counts(4).iter().sum::<usize>(), 900);
    assert!(grid.cells().iter().all(|&class| class < 4));
}

#[test]
fn the_same_seed_trains_the_same_model() {
    let run = || {
        let mut trainer = Trainer::new(StdRng::seed_from_u64(5), Default::default());
        trainer.generate(&DatasetSpec::new(DatasetKind::Moons, 100).with_noise(0.2));
        let report = trainer.train(&config(10, 0.05, &[8, 8])).unwrap();
        (report, trainer.model().cloned())
    };

    assert_eq!(run(), run());
}

use candle_core::Device;
use fathom_base::SeqTensor;
use fathom_data::config::PipelineConfig;
use fathom_data::split::{partition, DatasetSplit};
use fathom_train::trainer::{DepthTrainer, TrainConfig};

/// Tiny synthetic corpus: n slots, 3 frames, 2 input channels, 1 target
/// channel, partitioned with the default fractions.
fn synthetic_split(n: usize) -> DatasetSplit {
    let input_data: Vec<f32> = (0..n * 3 * 2).map(|i| (i % 7) as f32 * 0.1).collect();
    let target_data: Vec<f32> = (0..n * 3).map(|i| (i % 5) as f32 * 0.1).collect();
    let inputs = SeqTensor::new(n, 3, 2, input_data).unwrap();
    let targets = SeqTensor::new(n, 3, 1, target_data).unwrap();
    partition(&inputs, &targets, &PipelineConfig::default()).unwrap()
}

fn small_config() -> TrainConfig {
    TrainConfig::default()
        .with_epochs(2)
        .with_batch_size(2)
        .with_hidden_dim(8)
}

#[test]
fn test_train_reports_every_epoch() {
    // Six slots partition into 4 train, 1 val, 1 test.
    let split = synthetic_split(6);
    let mut trainer =
        DepthTrainer::new(2, 1, small_config(), Device::Cpu).expect("build trainer");

    let reports = trainer.train(&split, 1.0).expect("train");
    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert!(report.train_loss.is_finite());
        assert!(report.val_loss.is_finite());
        assert!(report.val_depth_err.is_finite());
    }
    assert_eq!(reports[0].epoch, 0);
    assert_eq!(reports[1].epoch, 1);
}

#[test]
fn test_train_handles_short_final_minibatch() {
    // Five slots partition into 3 train slots, so batch size 2 leaves a
    // final minibatch of one and the carried state must narrow.
    let split = synthetic_split(5);
    let mut trainer =
        DepthTrainer::new(2, 1, small_config().with_epochs(1), Device::Cpu)
            .expect("build trainer");

    let reports = trainer.train(&split, 1.0).expect("train");
    assert_eq!(reports.len(), 1);
    assert!(reports[0].train_loss.is_finite());
}

#[test]
fn test_zero_batch_size_is_error() {
    let split = synthetic_split(6);
    let mut trainer = DepthTrainer::new(2, 1, small_config().with_batch_size(0), Device::Cpu)
        .expect("build trainer");

    assert!(trainer.train(&split, 1.0).is_err());
}

#[test]
fn test_evaluate_empty_partition_is_nan() {
    // Three slots partition into 2 train, 1 val and an empty test set.
    let split = synthetic_split(3);
    let trainer = DepthTrainer::new(2, 1, small_config(), Device::Cpu).expect("build trainer");

    let eval = trainer.evaluate(&split.test, 1.0).expect("evaluate");
    assert!(eval.loss.is_nan());
    assert!(eval.depth_err.is_nan());
}

#[test]
fn test_nan_depth_std_reports_nan_metric() {
    let split = synthetic_split(6);
    let trainer = DepthTrainer::new(2, 1, small_config(), Device::Cpu).expect("build trainer");

    let eval = trainer.evaluate(&split.val, f32::NAN).expect("evaluate");
    assert!(eval.loss.is_finite());
    assert!(eval.depth_err.is_nan());
}

#[test]
fn test_checkpoint_roundtrip_preserves_predictions() {
    let dir = std::env::temp_dir().join(format!("fathom-train-{}-ckpt", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("model.safetensors");

    let split = synthetic_split(6);
    let mut trainer =
        DepthTrainer::new(2, 1, small_config().with_epochs(1), Device::Cpu)
            .expect("build trainer");
    trainer.train(&split, 1.0).expect("train");
    trainer.save(&path).expect("save");
    let before = trainer.evaluate(&split.val, 1.0).expect("evaluate");

    let mut restored =
        DepthTrainer::new(2, 1, small_config().with_epochs(1), Device::Cpu)
            .expect("build trainer");
    restored.load(&path).expect("load");
    let after = restored.evaluate(&split.val, 1.0).expect("evaluate");

    assert_eq!(before.loss, after.loss);
    assert_eq!(before.depth_err, after.depth_err);

    std::fs::remove_dir_all(&dir).ok();
}

use fathom_base::init_stdout_logger;
use fathom_data::normalize::{normalize, value_range, ChannelStats};
use fathom_data::{build_corpus, pad_corpus, partition, PipelineConfig};
use fathom_train::{select_device, DepthTrainer, TrainConfig};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

/// Normalization statistics persisted next to the checkpoint, needed to
/// de-normalize predictions later.
#[derive(Serialize)]
struct StatsFile {
    inputs: Vec<ChannelStats>,
    targets: Vec<ChannelStats>,
}

fn env_path(name: &str, default: &str) -> PathBuf {
    env::var(name).unwrap_or_else(|_| default.to_string()).into()
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = env_path("FATHOM_DATA_DIR", "data");
    let checkpoint_path = env_path("FATHOM_CHECKPOINT", "depth-lstm.safetensors");
    let stats_path = env_path("FATHOM_STATS", "depth-stats.json");
    let joint: Option<usize> = env::var("FATHOM_JOINT")
        .ok()
        .and_then(|value| value.parse().ok());

    let config = TrainConfig::default()
        .with_epochs(env_parse("FATHOM_EPOCHS", 25))
        .with_batch_size(env_parse("FATHOM_BATCH_SIZE", 2))
        .with_hidden_dim(env_parse("FATHOM_HIDDEN_DIM", 128))
        .with_learning_rate(env_parse("FATHOM_LEARNING_RATE", 1e-3))
        .with_seed(env_parse("FATHOM_SEED", 42));

    println!("Depth Training Experiment");
    println!("Data: {}", data_dir.display());
    println!("Checkpoint: {}", checkpoint_path.display());
    println!(
        "Epochs: {}, batch size: {}, hidden: {}",
        config.epochs, config.batch_size, config.hidden_dim
    );
    println!();

    init_stdout_logger();

    // Walk the recordings and stack the corpus.
    println!("Building corpus...");
    let pipeline = PipelineConfig::default();
    let corpus = build_corpus(&data_dir, &pipeline)?;
    println!("Corpus: {} slot sequences", corpus.len());

    let mut padded = pad_corpus(&corpus)?;
    if let Some(joint) = joint {
        println!("Restricting to joint {joint}");
        padded = padded.select_joint(joint)?;
    }
    println!(
        "Padded: {} slots, {} frames, {} input channels, {} target channels",
        padded.inputs.slots, padded.frames, padded.inputs.channels, padded.targets.channels
    );
    if let Some((min, max)) = value_range(&padded.inputs) {
        log::info!("input value range: {min:.2} to {max:.2}");
    }

    // Standardize planar x/y pairs and the depth channel.
    let (inputs, input_stats) = normalize(&padded.inputs, 2)?;
    let (targets, target_stats) = normalize(&padded.targets, 1)?;
    let depth_std = target_stats.first().map_or(f32::NAN, |stats| stats.std);

    let split = partition(&inputs, &targets, &pipeline)?;
    println!(
        "Partitions: {} train, {} val, {} test",
        split.train.slots(),
        split.val.slots(),
        split.test.slots()
    );

    // Train and evaluate.
    println!("Training...");
    let device = select_device();
    let mut trainer = DepthTrainer::new(
        inputs.channels,
        targets.channels,
        config,
        device,
    )?;
    trainer.train(&split, depth_std)?;

    let test = trainer.evaluate(&split.test, depth_std)?;
    println!(
        "Test: loss {:.6}, depth err {:.3} cm",
        test.loss, test.depth_err
    );

    // Persist the model and the statistics needed to read its output.
    trainer.save(&checkpoint_path)?;
    let stats = StatsFile {
        inputs: input_stats,
        targets: target_stats,
    };
    std::fs::write(&stats_path, serde_json::to_string_pretty(&stats)?)?;
    println!("Stats written to {}", stats_path.display());

    Ok(())
}

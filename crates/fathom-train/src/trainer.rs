//! Minibatch training loop with carried recurrent state.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{loss, AdamW, Optimizer, ParamsAdamW, VarBuilder, VarMap};
use fathom_base::SeqTensor;
use fathom_data::split::{DatasetSplit, SplitPair};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, TrainError};
use crate::metrics;
use crate::model::{detach_state, narrow_state, DepthLstm, DepthLstmConfig};

/// Training hyperparameters.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub hidden_dim: usize,
    /// Seed for the per-epoch minibatch shuffle.
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 25,
            batch_size: 2,
            learning_rate: 1e-3,
            hidden_dim: 128,
            seed: 42,
        }
    }
}

impl TrainConfig {
    /// Set the epoch count (builder pattern).
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the minibatch size (builder pattern).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the optimizer learning rate (builder pattern).
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the LSTM hidden width (builder pattern).
    pub fn with_hidden_dim(mut self, hidden_dim: usize) -> Self {
        self.hidden_dim = hidden_dim;
        self
    }

    /// Set the shuffle seed (builder pattern).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Loss and domain metric of one partition.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// Mean squared error in normalized space.
    pub loss: f32,
    /// Mean absolute depth error in physical units.
    pub depth_err: f32,
}

/// Per-epoch training summary.
#[derive(Debug, Clone, Copy)]
pub struct EpochReport {
    pub epoch: usize,
    pub train_loss: f32,
    pub val_loss: f32,
    pub val_depth_err: f32,
}

/// Owns the model, its parameters and the optimizer across epochs.
pub struct DepthTrainer {
    config: TrainConfig,
    device: Device,
    varmap: VarMap,
    model: DepthLstm,
    optimizer: AdamW,
}

impl DepthTrainer {
    /// Build a fresh model and optimizer for the given channel widths.
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        config: TrainConfig,
        device: Device,
    ) -> Result<Self> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        let model = DepthLstm::new(
            DepthLstmConfig {
                input_dim,
                hidden_dim: config.hidden_dim,
                output_dim,
            },
            vb,
        )?;
        let optimizer = AdamW::new(
            varmap.all_vars(),
            ParamsAdamW {
                lr: config.learning_rate,
                ..Default::default()
            },
        )?;

        Ok(Self {
            config,
            device,
            varmap,
            model,
            optimizer,
        })
    }

    /// Run the training loop over the split's training partition,
    /// evaluating on the validation partition after every epoch.
    ///
    /// Each epoch visits every training slot once, in a freshly shuffled
    /// minibatch order. The recurrent state starts from zeros at the top of
    /// an epoch and is carried between minibatches with its gradient
    /// history detached; a final short minibatch narrows the carried state
    /// to its batch size.
    ///
    /// # Arguments
    ///
    /// * `split` - Partitioned corpus, already normalized.
    /// * `depth_std` - Standard deviation of the depth channel, for the
    ///   physical-units metric.
    ///
    /// # Returns
    ///
    /// One [`EpochReport`] per epoch.
    pub fn train(&mut self, split: &DatasetSplit, depth_std: f32) -> Result<Vec<EpochReport>> {
        if self.config.batch_size == 0 {
            return Err(TrainError::Shape("batch size must be nonzero".to_string()));
        }
        let slots = split.train.slots();
        if slots == 0 {
            return Err(TrainError::Shape("training partition is empty".to_string()));
        }

        let inputs = seq_to_tensor(&split.train.inputs, &self.device)?;
        let targets = seq_to_tensor(&split.train.targets, &self.device)?;
        log::info!(
            "training on {} slots of {} frames, batch size {}",
            slots,
            split.train.inputs.frames,
            self.config.batch_size
        );

        let mut order: Vec<usize> = (0..slots).collect();
        let mut reports = Vec::with_capacity(self.config.epochs);
        for epoch in 0..self.config.epochs {
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(epoch as u64));
            order.shuffle(&mut rng);

            let mut state = self.model.zero_state(self.config.batch_size.min(slots))?;
            let mut loss_sum = 0.0f32;
            let mut batches = 0usize;
            for chunk in order.chunks(self.config.batch_size) {
                let ids: Vec<u32> = chunk.iter().map(|&slot| slot as u32).collect();
                let ids = Tensor::from_vec(ids, chunk.len(), &self.device)?;
                let batch_inputs = inputs.index_select(&ids, 0)?;
                let batch_targets = targets.index_select(&ids, 0)?;

                if chunk.len() < state.h().dim(0)? {
                    state = narrow_state(&state, chunk.len())?;
                }

                let (predictions, next_state) = self.model.forward(&batch_inputs, &state)?;
                let batch_loss = loss::mse(&predictions, &batch_targets)?;
                self.optimizer.backward_step(&batch_loss)?;

                state = detach_state(&next_state);
                loss_sum += batch_loss.to_scalar::<f32>()?;
                batches += 1;
            }

            let train_loss = loss_sum / batches as f32;
            let val = self.evaluate(&split.val, depth_std)?;
            log::info!(
                "epoch {}/{}: train loss {:.6}, val loss {:.6}, val depth err {:.3}",
                epoch + 1,
                self.config.epochs,
                train_loss,
                val.loss,
                val.depth_err
            );
            reports.push(EpochReport {
                epoch,
                train_loss,
                val_loss: val.loss,
                val_depth_err: val.depth_err,
            });
        }

        Ok(reports)
    }

    /// Evaluate one partition from a zero state, without touching the
    /// optimizer. An empty partition reports NaN.
    pub fn evaluate(&self, pair: &SplitPair, depth_std: f32) -> Result<Evaluation> {
        if pair.slots() == 0 {
            return Ok(Evaluation {
                loss: f32::NAN,
                depth_err: f32::NAN,
            });
        }

        let inputs = seq_to_tensor(&pair.inputs, &self.device)?;
        let targets = seq_to_tensor(&pair.targets, &self.device)?;
        let state = self.model.zero_state(pair.slots())?;
        let (predictions, _) = self.model.forward(&inputs, &state)?;

        let loss = loss::mse(&predictions, &targets)?.to_scalar::<f32>()?;
        let depth_err = metrics::depth_error(&predictions, &targets, depth_std)?;
        Ok(Evaluation { loss, depth_err })
    }

    /// Save the model parameters as a safetensors checkpoint.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.varmap.save(path.as_ref())?;
        log::info!("saved checkpoint to {}", path.as_ref().display());
        Ok(())
    }

    /// Load model parameters from a safetensors checkpoint written by
    /// [`DepthTrainer::save`] for the same model dimensions.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.varmap.load(path.as_ref())?;
        log::info!("loaded checkpoint from {}", path.as_ref().display());
        Ok(())
    }
}

/// Copy a sequence tensor onto the given device.
pub fn seq_to_tensor(seq: &SeqTensor, device: &Device) -> Result<Tensor> {
    Ok(Tensor::from_vec(
        seq.data.clone(),
        (seq.slots, seq.frames, seq.channels),
        device,
    )?)
}

/// Pick the CUDA device when one is usable, otherwise the CPU.
pub fn select_device() -> Device {
    match Device::cuda_if_available(0) {
        Ok(device) => {
            if device.is_cuda() {
                log::info!("training on CUDA device 0");
            } else {
                log::info!("training on CPU");
            }
            device
        }
        Err(e) => {
            log::warn!("CUDA unavailable ({e}), falling back to CPU");
            Device::Cpu
        }
    }
}

//! Contiguous train/validation/test partitioning.

use fathom_base::SeqTensor;

use crate::config::PipelineConfig;
use crate::error::{DataError, Result};

/// Inputs and targets of one partition, slot-aligned.
#[derive(Debug, Clone)]
pub struct SplitPair {
    pub inputs: SeqTensor,
    pub targets: SeqTensor,
}

impl SplitPair {
    /// Slot count of this partition.
    pub fn slots(&self) -> usize {
        self.inputs.slots
    }
}

/// The corpus partitioned along the slot axis.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub train: SplitPair,
    pub val: SplitPair,
    pub test: SplitPair,
}

/// Partition inputs and targets into train/validation/test slices.
///
/// The slices are contiguous and order-preserving: slots `[0, t)` train,
/// `[t, v)` validate, `[v, N)` test, with `t = round(train_frac * N)` and
/// `v = round((train_frac + val_frac) * N)`. Slots are never shuffled here;
/// the trainer shuffles minibatches, the partition stays reproducible.
pub fn partition(
    inputs: &SeqTensor,
    targets: &SeqTensor,
    config: &PipelineConfig,
) -> Result<DatasetSplit> {
    if inputs.slots != targets.slots {
        return Err(DataError::Alignment(format!(
            "{} input slots but {} target slots",
            inputs.slots, targets.slots
        )));
    }

    let n = inputs.slots;
    let (train_end, val_end) = boundaries(n, config);
    log::debug!(
        "partitioning {} slots: {} train, {} val, {} test",
        n,
        train_end,
        val_end - train_end,
        n - val_end
    );

    let pair = |start: usize, end: usize| -> Result<SplitPair> {
        Ok(SplitPair {
            inputs: inputs.slice_slots(start, end)?,
            targets: targets.slice_slots(start, end)?,
        })
    };

    Ok(DatasetSplit {
        train: pair(0, train_end)?,
        val: pair(train_end, val_end)?,
        test: pair(val_end, n)?,
    })
}

/// Round-to-nearest split boundaries, kept ordered and within `0..=n`.
fn boundaries(n: usize, config: &PipelineConfig) -> (usize, usize) {
    let train_end = ((config.train_frac * n as f64).round() as usize).min(n);
    let val_end = (((config.train_frac + config.val_frac) * n as f64).round() as usize)
        .clamp(train_end, n);
    (train_end, val_end)
}

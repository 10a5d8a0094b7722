//! Channel-grouped standardization of padded tensors.

use fathom_base::SeqTensor;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};
use crate::pad::MISSING_VALUE;

/// Mean and standard deviation of one sub-channel, kept for de-normalizing
/// metrics and predictions later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f32,
    pub std: f32,
}

/// Standardize a tensor per sub-channel.
///
/// The channels are treated as repeating groups of `group` sub-channels:
/// with `group = 2` every even channel is sub-channel 0 (x) and every odd
/// channel sub-channel 1 (y); with `group = 1` all channels share one
/// statistic. For each sub-channel the mean and population standard
/// deviation are computed over every slot and frame, skipping
/// [`MISSING_VALUE`] entries as if they did not exist. Non-missing values
/// become `(value - mean) / std`; markers pass through unchanged.
///
/// # Arguments
///
/// * `tensor` - The padded tensor to standardize.
/// * `group` - Sub-channel group size (2 for planar x/y, 1 for depth).
///
/// # Returns
///
/// The rescaled tensor and one [`ChannelStats`] per sub-channel. An
/// all-missing sub-channel yields NaN stats and its column is left
/// untouched; a zero-variance sub-channel rescales to 0.0.
///
/// # Errors
///
/// Fails if the channel count is not divisible by `group`.
pub fn normalize(tensor: &SeqTensor, group: usize) -> Result<(SeqTensor, Vec<ChannelStats>)> {
    if group == 0 || tensor.channels % group != 0 {
        return Err(DataError::ChannelGroup {
            channels: tensor.channels,
            group,
        });
    }

    // Accumulate per sub-channel in f64; the corpora are large enough for
    // f32 summation error to show up in the statistics.
    let mut sums = vec![0.0f64; group];
    let mut squares = vec![0.0f64; group];
    let mut counts = vec![0u64; group];
    for (index, &value) in tensor.data.iter().enumerate() {
        if value == MISSING_VALUE {
            continue;
        }
        let sub = index % tensor.channels % group;
        sums[sub] += value as f64;
        squares[sub] += (value as f64) * (value as f64);
        counts[sub] += 1;
    }

    let stats: Vec<ChannelStats> = (0..group)
        .map(|sub| {
            if counts[sub] == 0 {
                return ChannelStats {
                    mean: f32::NAN,
                    std: f32::NAN,
                };
            }
            let n = counts[sub] as f64;
            let mean = sums[sub] / n;
            let variance = (squares[sub] / n - mean * mean).max(0.0);
            ChannelStats {
                mean: mean as f32,
                std: variance.sqrt() as f32,
            }
        })
        .collect();

    let mut out = tensor.clone();
    for (index, value) in out.data.iter_mut().enumerate() {
        if *value == MISSING_VALUE {
            continue;
        }
        let ChannelStats { mean, std } = stats[index % tensor.channels % group];
        *value = if std == 0.0 {
            0.0
        } else {
            (*value - mean) / std
        };
    }

    Ok((out, stats))
}

/// Smallest and largest non-missing value of a tensor, or `None` when the
/// tensor holds nothing but markers.
pub fn value_range(tensor: &SeqTensor) -> Option<(f32, f32)> {
    let mut range: Option<(f32, f32)> = None;
    for &value in &tensor.data {
        if value == MISSING_VALUE {
            continue;
        }
        range = match range {
            Some((min, max)) => Some((min.min(value), max.max(value))),
            None => Some((value, value)),
        };
    }
    range
}

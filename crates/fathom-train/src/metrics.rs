//! Evaluation metrics.

use candle_core::Tensor;

use crate::error::Result;

/// Mean absolute difference between two equally-shaped tensors.
pub fn mean_absolute_error(predictions: &Tensor, targets: &Tensor) -> Result<f32> {
    Ok((predictions - targets)?.abs()?.mean_all()?.to_scalar::<f32>()?)
}

/// Mean absolute error scaled back to physical units by the target
/// channel's standard deviation.
///
/// NaN statistics (a channel that never held data) propagate into a NaN
/// metric; callers report it as "insufficient data" rather than failing.
pub fn depth_error(predictions: &Tensor, targets: &Tensor, std: f32) -> Result<f32> {
    Ok(mean_absolute_error(predictions, targets)? * std)
}

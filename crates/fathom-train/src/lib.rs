//! Depth regression training on keypoint sequence tensors.

pub mod error;
pub mod metrics;
pub mod model;
pub mod trainer;

pub use error::{Result, TrainError};
pub use model::{DepthLstm, DepthLstmConfig};
pub use trainer::{
    select_device, seq_to_tensor, DepthTrainer, EpochReport, Evaluation, TrainConfig,
};

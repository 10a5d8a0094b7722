//! Keypoint corpus pipeline: per-frame JSON recordings in, padded and
//! normalized sequence tensors out.
//!
//! The stages compose in a fixed order. [`corpus::build_corpus`] walks a
//! data root and collects one planar/depth sequence pair per person slot
//! per recording; [`pad::pad_corpus`] right-pads the sequences to a common
//! length and stacks them into tensors; [`normalize::normalize`]
//! standardizes the channels; [`split::partition`] slices the slots into
//! train/validation/test partitions.

pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pad;
pub mod schema;
pub mod session;
pub mod split;

pub use config::PipelineConfig;
pub use corpus::{build_corpus, Corpus};
pub use error::{DataError, Result};
pub use normalize::{normalize, value_range, ChannelStats};
pub use pad::{pad_corpus, PaddedCorpus, MISSING_VALUE};
pub use split::{partition, DatasetSplit, SplitPair};

//! Length equalization across sequences.

use fathom_base::SeqTensor;

use crate::corpus::Corpus;
use crate::error::{DataError, Result};

/// Padding marker for frames past the end of a shorter sequence.
///
/// Deliberately far outside the coordinate range of the capture space (which
/// stays within a few hundred centimeters of the origin) so padded frames
/// never collide with real data and remain identifiable after normalization.
pub const MISSING_VALUE: f32 = -1000.0;

/// The corpus as two rectangular tensors of shape (slots, frames, channels).
#[derive(Debug, Clone)]
pub struct PaddedCorpus {
    pub inputs: SeqTensor,
    pub targets: SeqTensor,
    /// Common padded length, kept for downstream shape validation.
    pub frames: usize,
}

impl PaddedCorpus {
    /// Restrict the corpus to a single joint: input channels `2j, 2j+1` and
    /// target channel `j`. Useful for per-joint experiments.
    pub fn select_joint(&self, joint: usize) -> Result<PaddedCorpus> {
        let inputs = self.inputs.select_channels(joint * 2, 2)?;
        let targets = self.targets.select_channels(joint, 1)?;
        Ok(PaddedCorpus {
            inputs,
            targets,
            frames: self.frames,
        })
    }
}

/// Right-pad every sequence to the longest input length and stack the
/// collections into tensors.
///
/// Padded frames are whole vectors of [`MISSING_VALUE`] in the sequence's
/// width. No sequence is truncated or left-padded. Sequences must agree on
/// width within each collection, and every input must be frame-aligned with
/// its target.
pub fn pad_corpus(corpus: &Corpus) -> Result<PaddedCorpus> {
    if corpus.inputs.len() != corpus.targets.len() {
        return Err(DataError::Alignment(format!(
            "{} input sequences but {} target sequences",
            corpus.inputs.len(),
            corpus.targets.len()
        )));
    }
    for (index, (input, target)) in corpus.inputs.iter().zip(&corpus.targets).enumerate() {
        if input.len() != target.len() {
            return Err(DataError::Alignment(format!(
                "sequence {index}: input has {} frames, target has {}",
                input.len(),
                target.len()
            )));
        }
    }

    let frames = corpus.inputs.iter().map(Vec::len).max().unwrap_or(0);
    let inputs = stack(&corpus.inputs, frames, "input")?;
    let targets = stack(&corpus.targets, frames, "target")?;

    Ok(PaddedCorpus {
        inputs,
        targets,
        frames,
    })
}

/// Stack one collection into a (slots, frames, channels) tensor, padding
/// short sequences with marker vectors.
fn stack(sequences: &[Vec<Vec<f32>>], frames: usize, what: &str) -> Result<SeqTensor> {
    let channels = sequences
        .iter()
        .find_map(|sequence| sequence.first())
        .map_or(0, Vec::len);

    let mut data = Vec::with_capacity(sequences.len() * frames * channels);
    for (index, sequence) in sequences.iter().enumerate() {
        for vector in sequence {
            if vector.len() != channels {
                return Err(DataError::Alignment(format!(
                    "{what} sequence {index} has width {} where the corpus has {channels}",
                    vector.len()
                )));
            }
            data.extend_from_slice(vector);
        }
        for _ in sequence.len()..frames {
            data.extend(std::iter::repeat(MISSING_VALUE).take(channels));
        }
    }

    Ok(SeqTensor::new(sequences.len(), frames, channels, data)?)
}

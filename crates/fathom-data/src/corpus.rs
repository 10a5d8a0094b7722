//! Corpus assembly over a root directory of recordings.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::{DataError, Result};
use crate::session;

/// All sequences of a data root, one entry per person slot per recording.
///
/// `inputs[i]` is a planar sequence (frames of x,y channel vectors) and
/// `targets[i]` the matching depth sequence. Slots of one recording are
/// adjacent: with two person slots, entries `2j` and `2j + 1` come from
/// recording `j` in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub inputs: Vec<Vec<Vec<f32>>>,
    pub targets: Vec<Vec<Vec<f32>>>,
}

impl Corpus {
    /// Number of sequences (person slots across all recordings).
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Walk a data root and build the corpus.
///
/// Immediate subdirectories of `root` are the recordings, visited in sorted
/// order so the corpus layout is stable across runs and machines.
///
/// # Arguments
///
/// * `root` - Directory whose subdirectories are recordings.
/// * `config` - Pipeline settings passed through to the aggregator.
///
/// # Errors
///
/// Fails if `root` has no recording subdirectories or any recording fails
/// to read.
pub fn build_corpus(root: &Path, config: &PipelineConfig) -> Result<Corpus> {
    let recordings = list_recordings(root)?;
    if recordings.is_empty() {
        return Err(DataError::EmptyCorpus(root.to_path_buf()));
    }

    let mut corpus = Corpus::default();
    for dir in &recordings {
        let tracks = session::read_recording(dir, config)?;
        log::info!(
            "{}: {} frames, {} slots",
            dir.display(),
            tracks.frames(),
            tracks.slots.len()
        );
        for track in tracks.slots {
            corpus.inputs.push(track.planar);
            corpus.targets.push(track.depth);
        }
    }

    Ok(corpus)
}

/// Immediate subdirectories of the root in sorted order.
fn list_recordings(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| DataError::Io(root.to_path_buf(), e))? {
        let entry = entry.map_err(|e| DataError::Io(root.to_path_buf(), e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

//! Per-recording aggregation across modalities.

use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::{DataError, Result};
use crate::extract::{self, ModalitySeries, SlotTrack};

/// Modality subdirectory names inside a recording directory.
pub const FACE_DIR: &str = "hdFace3d";
pub const HAND_DIR: &str = "hdHand3d";
pub const BODY_DIR: &str = "hdPose3d_stage1_op25";

/// Frame-aligned per-slot tracks of one recording, all present modalities
/// concatenated per frame in face, hands, body order.
#[derive(Debug, Clone)]
pub struct RecordingTracks {
    pub slots: Vec<SlotTrack>,
}

impl RecordingTracks {
    /// Retained frame count (identical across slots by construction).
    pub fn frames(&self) -> usize {
        self.slots.first().map_or(0, |track| track.planar.len())
    }
}

/// Read every modality of one recording and zip them frame by frame.
///
/// A modality whose subdirectory does not exist contributes nothing, so a
/// body-only capture still yields usable tracks. A recording with no
/// modality directory at all is an error, and so is any frame-count
/// disagreement between the modalities that are present.
///
/// # Arguments
///
/// * `dir` - The recording directory holding the modality subdirectories.
/// * `config` - Pipeline settings (person slot count).
///
/// # Returns
///
/// One `SlotTrack` per person slot with per-frame concatenated planar and
/// depth vectors.
pub fn read_recording(dir: &Path, config: &PipelineConfig) -> Result<RecordingTracks> {
    let readers: [(&str, fn(&Path, usize) -> Result<ModalitySeries>); 3] = [
        (FACE_DIR, extract::face::extract),
        (HAND_DIR, extract::hands::extract),
        (BODY_DIR, extract::body::extract),
    ];

    // Run the extractor of every modality directory that exists.
    let mut present = Vec::new();
    for (name, reader) in readers {
        let subdir = dir.join(name);
        if !subdir.is_dir() {
            continue;
        }
        present.push((name, reader(&subdir, config.person_slots)?));
    }
    if present.is_empty() {
        return Err(DataError::EmptyCorpus(dir.to_path_buf()));
    }

    // All present modalities must agree on the retained frame count.
    let frames = present[0].1.frames();
    if present.iter().any(|(_, series)| series.frames() != frames) {
        let counts: Vec<String> = present
            .iter()
            .map(|(name, series)| format!("{name}={}", series.frames()))
            .collect();
        return Err(DataError::Alignment(format!(
            "modality frame counts disagree in {}: {}",
            dir.display(),
            counts.join(", ")
        )));
    }
    log::debug!(
        "{}: {} modalities, {} frames",
        dir.display(),
        present.len(),
        frames
    );

    // Concatenate per frame in the fixed modality order.
    let mut slots: Vec<SlotTrack> = (0..config.person_slots)
        .map(|_| SlotTrack {
            planar: vec![Vec::new(); frames],
            depth: vec![Vec::new(); frames],
        })
        .collect();
    for (_, series) in present {
        for (combined, track) in slots.iter_mut().zip(series.slots) {
            for (dst, src) in combined.planar.iter_mut().zip(track.planar) {
                dst.extend(src);
            }
            for (dst, src) in combined.depth.iter_mut().zip(track.depth) {
                dst.extend(src);
            }
        }
    }

    Ok(RecordingTracks { slots })
}

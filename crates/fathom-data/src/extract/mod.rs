//! Per-modality keypoint readers.
//!
//! Each reader walks one modality subdirectory of a recording, parses the
//! per-frame JSON documents in chronological (lexicographic) order and
//! produces frame-aligned per-slot planar/depth series. Slot 0 is the first
//! valid detection of a frame, slot 1 the second; slots a frame did not fill
//! receive zero vectors so every slot stays aligned with every other.

pub mod body;
pub mod face;
pub mod hands;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

/// One person slot's frame-aligned series for a single modality: one planar
/// vector and one depth vector per retained frame, equal lengths always.
#[derive(Debug, Clone)]
pub struct SlotTrack {
    pub planar: Vec<Vec<f32>>,
    pub depth: Vec<Vec<f32>>,
}

/// All slot tracks of one modality for one recording.
#[derive(Debug, Clone)]
pub struct ModalitySeries {
    pub slots: Vec<SlotTrack>,
}

impl ModalitySeries {
    fn new(slot_count: usize) -> Self {
        let slots = (0..slot_count)
            .map(|_| SlotTrack {
                planar: Vec::new(),
                depth: Vec::new(),
            })
            .collect();
        Self { slots }
    }

    /// Retained frame count (identical across slots by construction).
    pub fn frames(&self) -> usize {
        self.slots.first().map_or(0, |track| track.planar.len())
    }
}

/// List the frame files of a modality directory in lexicographic order,
/// keeping regular files only, then drop `trim_front` leading and
/// `trim_back` trailing entries (the capture boundary files are blank).
fn list_frame_files(dir: &Path, trim_front: usize, trim_back: usize) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DataError::Io(dir.to_path_buf(), e))? {
        let entry = entry.map_err(|e| DataError::Io(dir.to_path_buf(), e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.len() <= trim_front + trim_back {
        return Ok(Vec::new());
    }
    files.drain(..trim_front);
    files.truncate(files.len() - trim_back);

    Ok(files)
}

/// Read and parse one frame file. Unreadable or malformed files are fatal
/// for the run; there is no partial-file recovery.
fn parse_frame<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| DataError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&text).map_err(|e| DataError::Json(path.to_path_buf(), e))
}

/// Split one flat landmark array into planar and depth parts.
///
/// The array interleaves `stride` values per joint (x, y, z and, for body, a
/// trailing confidence). The planar vector keeps the interleaved x,y order
/// (`x1,y1,x2,y2,...`); the depth vector keeps one z per joint. Anything
/// after the z of a joint is discarded.
fn split_joints(flat: &[f32], stride: usize, planar: &mut Vec<f32>, depth: &mut Vec<f32>) {
    for joint in flat.chunks_exact(stride) {
        planar.push(joint[0]);
        planar.push(joint[1]);
        depth.push(joint[2]);
    }
}

/// Append one frame's detections to the series, enforcing the slot policy:
/// detections beyond the slot count are ignored (warned), unfilled slots get
/// zero vectors of the modality's width.
fn append_frame(
    series: &mut ModalitySeries,
    mut detections: Vec<(Vec<f32>, Vec<f32>)>,
    planar_width: usize,
    depth_width: usize,
    path: &Path,
) {
    let slot_count = series.slots.len();
    if detections.len() > slot_count {
        log::warn!(
            "{}: {} detections, keeping the first {}",
            path.display(),
            detections.len(),
            slot_count
        );
        detections.truncate(slot_count);
    }
    while detections.len() < slot_count {
        detections.push((vec![0.0; planar_width], vec![0.0; depth_width]));
    }

    for (slot, (planar, depth)) in series.slots.iter_mut().zip(detections) {
        slot.planar.push(planar);
        slot.depth.push(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_joints_triples() {
        let flat = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut planar = Vec::new();
        let mut depth = Vec::new();
        split_joints(&flat, 3, &mut planar, &mut depth);
        assert_eq!(planar, vec![1.0, 2.0, 4.0, 5.0]);
        assert_eq!(depth, vec![3.0, 6.0]);
    }

    #[test]
    fn test_split_joints_discards_confidence() {
        let flat = [1.0, 2.0, 3.0, 0.9, 4.0, 5.0, 6.0, 0.8];
        let mut planar = Vec::new();
        let mut depth = Vec::new();
        split_joints(&flat, 4, &mut planar, &mut depth);
        assert_eq!(planar, vec![1.0, 2.0, 4.0, 5.0]);
        assert_eq!(depth, vec![3.0, 6.0]);
    }

    #[test]
    fn test_append_frame_zero_fills_and_truncates() {
        let mut series = ModalitySeries::new(2);
        let path = Path::new("frame.json");

        // One detection: slot 1 gets zeros.
        append_frame(&mut series, vec![(vec![1.0, 2.0], vec![3.0])], 2, 1, path);
        assert_eq!(series.slots[0].planar[0], vec![1.0, 2.0]);
        assert_eq!(series.slots[1].planar[0], vec![0.0, 0.0]);
        assert_eq!(series.slots[1].depth[0], vec![0.0]);

        // Three detections: the third is dropped.
        append_frame(
            &mut series,
            vec![
                (vec![1.0, 1.0], vec![1.0]),
                (vec![2.0, 2.0], vec![2.0]),
                (vec![3.0, 3.0], vec![3.0]),
            ],
            2,
            1,
            path,
        );
        assert_eq!(series.frames(), 2);
        assert_eq!(series.slots[1].planar[1], vec![2.0, 2.0]);
    }
}

use std::path::Path;

use crate::error::{DataError, Result};
use crate::schema::{is_detection, FaceFrame, FACE_JOINTS, FACE_LANDMARK_LEN};

use super::ModalitySeries;

pub const PLANAR_WIDTH: usize = FACE_JOINTS * 2;
pub const DEPTH_WIDTH: usize = FACE_JOINTS;

/// Read the face modality of one recording.
///
/// The first frame file of a face capture is always blank and is dropped.
pub fn extract(dir: &Path, slot_count: usize) -> Result<ModalitySeries> {
    let files = super::list_frame_files(dir, 1, 0)?;
    let mut series = ModalitySeries::new(slot_count);

    for path in &files {
        let frame: FaceFrame = super::parse_frame(path)?;
        let mut detections = Vec::new();

        for person in &frame.people {
            if !is_detection(person.id) {
                continue;
            }
            let landmarks = &person.face70.landmarks;
            if landmarks.len() != FACE_LANDMARK_LEN {
                return Err(DataError::Schema(
                    path.clone(),
                    format!(
                        "face70 landmarks: expected {FACE_LANDMARK_LEN} values, got {}",
                        landmarks.len()
                    ),
                ));
            }

            let mut planar = Vec::with_capacity(PLANAR_WIDTH);
            let mut depth = Vec::with_capacity(DEPTH_WIDTH);
            super::split_joints(landmarks, 3, &mut planar, &mut depth);
            detections.push((planar, depth));
        }

        super::append_frame(&mut series, detections, PLANAR_WIDTH, DEPTH_WIDTH, path);
    }

    Ok(series)
}

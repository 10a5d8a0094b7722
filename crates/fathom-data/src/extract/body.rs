use std::path::Path;

use crate::error::{DataError, Result};
use crate::schema::{is_detection, BodyFrame, BODY_JOINTS, BODY_LANDMARK_LEN};

use super::ModalitySeries;

pub const PLANAR_WIDTH: usize = BODY_JOINTS * 2;
pub const DEPTH_WIDTH: usize = BODY_JOINTS;

/// Read the body modality of one recording.
///
/// The last frame file of a body capture is always blank and is dropped.
/// Body joints carry a fourth confidence value per joint which the model
/// never consumes, so only x, y and z are kept.
pub fn extract(dir: &Path, slot_count: usize) -> Result<ModalitySeries> {
    let files = super::list_frame_files(dir, 0, 1)?;
    let mut series = ModalitySeries::new(slot_count);

    for path in &files {
        let frame: BodyFrame = super::parse_frame(path)?;
        let mut detections = Vec::new();

        for body in &frame.bodies {
            if !is_detection(body.id) {
                continue;
            }
            if body.joints26.len() != BODY_LANDMARK_LEN {
                return Err(DataError::Schema(
                    path.clone(),
                    format!(
                        "joints26: expected {BODY_LANDMARK_LEN} values, got {}",
                        body.joints26.len()
                    ),
                ));
            }
            let mut planar = Vec::with_capacity(PLANAR_WIDTH);
            let mut depth = Vec::with_capacity(DEPTH_WIDTH);
            super::split_joints(&body.joints26, 4, &mut planar, &mut depth);
            detections.push((planar, depth));
        }

        super::append_frame(&mut series, detections, PLANAR_WIDTH, DEPTH_WIDTH, path);
    }

    Ok(series)
}

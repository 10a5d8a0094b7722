use std::path::Path;

use crate::error::{DataError, Result};
use crate::schema::{is_detection, HandFrame, HandPerson, Landmarks, HAND_JOINTS, HAND_LANDMARK_LEN};

use super::ModalitySeries;

/// Combined width for both hands, left block then right block.
pub const PLANAR_WIDTH: usize = HAND_JOINTS * 2 * 2;
pub const DEPTH_WIDTH: usize = HAND_JOINTS * 2;

const ONE_HAND_PLANAR: usize = HAND_JOINTS * 2;
const ONE_HAND_DEPTH: usize = HAND_JOINTS;

/// Read the hands modality of one recording.
///
/// The first and last frame files of a hand capture are always blank and
/// are dropped. A person entry may lack either hand (the tracker lost it);
/// the missing hand contributes a zero block of its width so the combined
/// vector keeps the left-then-right layout.
pub fn extract(dir: &Path, slot_count: usize) -> Result<ModalitySeries> {
    let files = super::list_frame_files(dir, 1, 1)?;
    let mut series = ModalitySeries::new(slot_count);

    for path in &files {
        let frame: HandFrame = super::parse_frame(path)?;
        let mut detections = Vec::new();

        for person in &frame.people {
            if !is_detection(person.id) {
                continue;
            }
            detections.push(person_vectors(person, path)?);
        }

        super::append_frame(&mut series, detections, PLANAR_WIDTH, DEPTH_WIDTH, path);
    }

    Ok(series)
}

/// Combined planar/depth vectors for one person, zero-substituting each
/// absent hand.
fn person_vectors(person: &HandPerson, path: &Path) -> Result<(Vec<f32>, Vec<f32>)> {
    let mut planar = Vec::with_capacity(PLANAR_WIDTH);
    let mut depth = Vec::with_capacity(DEPTH_WIDTH);

    one_hand(person.left_hand.as_ref(), "left_hand", path, &mut planar, &mut depth)?;
    one_hand(person.right_hand.as_ref(), "right_hand", path, &mut planar, &mut depth)?;

    Ok((planar, depth))
}

fn one_hand(
    hand: Option<&Landmarks>,
    which: &str,
    path: &Path,
    planar: &mut Vec<f32>,
    depth: &mut Vec<f32>,
) -> Result<()> {
    match hand {
        Some(hand) => {
            if hand.landmarks.len() != HAND_LANDMARK_LEN {
                return Err(DataError::Schema(
                    path.to_path_buf(),
                    format!(
                        "{which} landmarks: expected {HAND_LANDMARK_LEN} values, got {}",
                        hand.landmarks.len()
                    ),
                ));
            }
            super::split_joints(&hand.landmarks, 3, planar, depth);
        }
        None => {
            planar.extend(std::iter::repeat(0.0).take(ONE_HAND_PLANAR));
            depth.extend(std::iter::repeat(0.0).take(ONE_HAND_DEPTH));
        }
    }
    Ok(())
}

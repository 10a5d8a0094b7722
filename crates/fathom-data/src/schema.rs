//! serde bindings for the per-frame JSON documents.
//!
//! All three modalities store landmarks as flat float arrays interleaving
//! coordinates joint by joint: face and hands as `x,y,z` triples, body as
//! `x,y,z,confidence` quadruples. The readers in `extract` split those into
//! planar (x,y) and depth (z) vectors.

use serde::Deserialize;

/// Joints per face detection.
pub const FACE_JOINTS: usize = 70;
/// Joints per single hand.
pub const HAND_JOINTS: usize = 21;
/// Joints per body detection.
pub const BODY_JOINTS: usize = 26;

/// Expected flat landmark lengths per person entry.
pub const FACE_LANDMARK_LEN: usize = FACE_JOINTS * 3; // 210
pub const HAND_LANDMARK_LEN: usize = HAND_JOINTS * 3; // 63
pub const BODY_LANDMARK_LEN: usize = BODY_JOINTS * 4; // 104, confidence included

/// Person id marking "no detection". Entries carrying it (or no id at all)
/// are excluded from slot assignment.
pub const NO_DETECTION_ID: i64 = -1;

fn no_detection_id() -> i64 {
    NO_DETECTION_ID
}

/// True when a person entry's id marks a real detection. Ids below the
/// placeholder are treated as placeholders too.
pub fn is_detection(id: i64) -> bool {
    id > NO_DETECTION_ID
}

/// A `{"landmarks": [...]}` wrapper, shared by face and hand sub-records.
#[derive(Debug, Clone, Deserialize)]
pub struct Landmarks {
    pub landmarks: Vec<f32>,
}

/// One frame of the face modality.
#[derive(Debug, Deserialize)]
pub struct FaceFrame {
    #[serde(default)]
    pub people: Vec<FacePerson>,
}

#[derive(Debug, Deserialize)]
pub struct FacePerson {
    #[serde(default = "no_detection_id")]
    pub id: i64,
    pub face70: Landmarks,
}

/// One frame of the hands modality. Either hand may be absent for a person
/// the tracker did see; absence is an `Option`, not an error.
#[derive(Debug, Deserialize)]
pub struct HandFrame {
    #[serde(default)]
    pub people: Vec<HandPerson>,
}

#[derive(Debug, Deserialize)]
pub struct HandPerson {
    #[serde(default = "no_detection_id")]
    pub id: i64,
    pub left_hand: Option<Landmarks>,
    pub right_hand: Option<Landmarks>,
}

/// One frame of the body modality. Body landmarks are a bare float array
/// (no wrapper object), four values per joint.
#[derive(Debug, Deserialize)]
pub struct BodyFrame {
    #[serde(default)]
    pub bodies: Vec<BodyPerson>,
}

#[derive(Debug, Deserialize)]
pub struct BodyPerson {
    #[serde(default = "no_detection_id")]
    pub id: i64,
    pub joints26: Vec<f32>,
}

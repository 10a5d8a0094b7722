use std::error::Error;
use std::io;
use std::path::PathBuf;

use fathom_base::TensorError;
use fathom_data::error::DataError;

#[test]
fn test_display_io() {
    let err = DataError::Io(
        PathBuf::from("/data/rec/frame.json"),
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );
    let display = format!("{}", err);
    assert!(display.contains("io error"));
    assert!(display.contains("frame.json"));
}

#[test]
fn test_display_schema() {
    let err = DataError::Schema(
        PathBuf::from("frame.json"),
        "face70 landmarks: expected 210 values, got 3".to_string(),
    );
    let display = format!("{}", err);
    assert!(display.contains("schema error"));
    assert!(display.contains("expected 210"));
}

#[test]
fn test_display_alignment() {
    let err = DataError::Alignment("hdFace3d=2, hdPose3d_stage1_op25=1".to_string());
    let display = format!("{}", err);
    assert!(display.contains("alignment error"));
}

#[test]
fn test_display_channel_group() {
    let err = DataError::ChannelGroup {
        channels: 276,
        group: 5,
    };
    let display = format!("{}", err);
    assert!(display.contains("276"));
    assert!(display.contains("5"));
}

#[test]
fn test_display_empty_corpus() {
    let err = DataError::EmptyCorpus(PathBuf::from("/data"));
    let display = format!("{}", err);
    assert!(display.contains("no keypoint data"));
    assert!(display.contains("/data"));
}

#[test]
fn test_from_tensor_error() {
    let tensor_err = TensorError::LengthMismatch {
        expected: 4,
        got: 3,
    };
    let err: DataError = tensor_err.into();
    match err {
        DataError::Tensor(_) => {}
        _ => panic!("Expected DataError::Tensor variant"),
    }
}

#[test]
fn test_io_error_has_source() {
    let err = DataError::Io(
        PathBuf::from("frame.json"),
        io::Error::new(io::ErrorKind::NotFound, "missing"),
    );
    assert!(err.source().is_some());
}

#[test]
fn test_alignment_has_no_source() {
    let err = DataError::Alignment("lengths".to_string());
    assert!(err.source().is_none());
}

use fathom_base::{SeqTensor, TensorError};

#[test]
fn test_new_valid() {
    let t = SeqTensor::new(2, 1, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(t.slots, 2);
    assert_eq!(t.frames, 1);
    assert_eq!(t.channels, 3);
    assert_eq!(t.len(), 6);
}

#[test]
fn test_new_length_mismatch() {
    let result = SeqTensor::new(2, 2, 2, vec![0.0; 7]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::LengthMismatch {
            expected: 8,
            got: 7
        }
    );
}

#[test]
fn test_new_overflow() {
    let result = SeqTensor::new(usize::MAX, 2, 2, vec![]);
    assert_eq!(result.unwrap_err(), TensorError::DimOverflow);
}

#[test]
fn test_zeros_and_filled() {
    let z = SeqTensor::zeros(1, 2, 3).unwrap();
    assert_eq!(z.data, vec![0.0; 6]);

    let f = SeqTensor::filled(2, 1, 2, -1000.0).unwrap();
    assert_eq!(f.data, vec![-1000.0; 4]);
}

#[test]
fn test_at_and_frame() {
    // slot 0: frames [1,2],[3,4]; slot 1: frames [5,6],[7,8]
    let t = SeqTensor::new(2, 2, 2, (1..=8).map(|v| v as f32).collect()).unwrap();
    assert_eq!(t.at(0, 0, 0), 1.0);
    assert_eq!(t.at(0, 1, 1), 4.0);
    assert_eq!(t.at(1, 0, 1), 6.0);
    assert_eq!(t.frame(1, 1), &[7.0, 8.0]);
}

#[test]
fn test_frame_mut() {
    let mut t = SeqTensor::zeros(1, 2, 2).unwrap();
    t.frame_mut(0, 1).copy_from_slice(&[9.0, 10.0]);
    assert_eq!(t.data, vec![0.0, 0.0, 9.0, 10.0]);
}

#[test]
fn test_slice_slots() {
    let t = SeqTensor::new(3, 1, 2, (1..=6).map(|v| v as f32).collect()).unwrap();
    let mid = t.slice_slots(1, 2).unwrap();
    assert_eq!(mid.slots, 1);
    assert_eq!(mid.data, vec![3.0, 4.0]);

    let all = t.slice_slots(0, 3).unwrap();
    assert_eq!(all.data, t.data);

    let empty = t.slice_slots(2, 2).unwrap();
    assert_eq!(empty.slots, 0);
    assert!(empty.is_empty());
}

#[test]
fn test_slice_slots_out_of_bounds() {
    let t = SeqTensor::zeros(2, 1, 1).unwrap();
    assert!(matches!(
        t.slice_slots(1, 3),
        Err(TensorError::SlotRange { .. })
    ));
    assert!(matches!(
        t.slice_slots(2, 1),
        Err(TensorError::SlotRange { .. })
    ));
}

#[test]
fn test_select_channels() {
    // 1 slot, 2 frames, 4 channels
    let t = SeqTensor::new(1, 2, 4, (1..=8).map(|v| v as f32).collect()).unwrap();
    let pair = t.select_channels(1, 2).unwrap();
    assert_eq!(pair.channels, 2);
    assert_eq!(pair.data, vec![2.0, 3.0, 6.0, 7.0]);
}

#[test]
fn test_select_channels_out_of_bounds() {
    let t = SeqTensor::zeros(1, 1, 3).unwrap();
    assert!(matches!(
        t.select_channels(2, 2),
        Err(TensorError::ChannelRange { .. })
    ));
}

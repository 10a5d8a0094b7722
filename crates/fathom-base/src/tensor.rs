use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    DimOverflow,
    LengthMismatch { expected: usize, got: usize },
    SlotRange { start: usize, end: usize, slots: usize },
    ChannelRange { start: usize, width: usize, channels: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::DimOverflow => write!(f, "tensor dimensions overflow when multiplied"),
            TensorError::LengthMismatch { expected, got } => {
                write!(f, "data length mismatch: expected {expected} values, got {got}")
            }
            TensorError::SlotRange { start, end, slots } => {
                write!(f, "slot range {start}..{end} out of bounds for {slots} slots")
            }
            TensorError::ChannelRange {
                start,
                width,
                channels,
            } => {
                write!(
                    f,
                    "channel range {start}..{} out of bounds for {channels} channels",
                    start + width
                )
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// A rectangular sequence tensor: `slots` independent time series, each
/// `frames` steps long, each step a `channels`-wide vector.
///
/// Storage is a flat row-major buffer (slot, then frame, then channel),
/// which is also the layout the training crate hands to candle.
#[derive(Clone, PartialEq)]
pub struct SeqTensor {
    pub slots: usize,
    pub frames: usize,
    pub channels: usize,
    pub data: Vec<f32>,
}

impl fmt::Debug for SeqTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqTensor")
            .field("slots", &self.slots)
            .field("frames", &self.frames)
            .field("channels", &self.channels)
            .field("len", &self.data.len())
            .finish()
    }
}

impl SeqTensor {
    /// Create a tensor from a flat buffer, validating that the buffer length
    /// matches slots * frames * channels.
    pub fn new(
        slots: usize,
        frames: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, TensorError> {
        let expected = checked_len(slots, frames, channels)?;
        if expected != data.len() {
            return Err(TensorError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }

        Ok(Self {
            slots,
            frames,
            channels,
            data,
        })
    }

    /// A tensor of the given dimensions filled with zeros.
    pub fn zeros(slots: usize, frames: usize, channels: usize) -> Result<Self, TensorError> {
        Self::filled(slots, frames, channels, 0.0)
    }

    /// A tensor of the given dimensions filled with one value.
    pub fn filled(
        slots: usize,
        frames: usize,
        channels: usize,
        value: f32,
    ) -> Result<Self, TensorError> {
        let len = checked_len(slots, frames, channels)?;
        Ok(Self {
            slots,
            frames,
            channels,
            data: vec![value; len],
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, slot: usize, frame: usize) -> usize {
        (slot * self.frames + frame) * self.channels
    }

    /// Value at (slot, frame, channel). Indices must be in bounds.
    pub fn at(&self, slot: usize, frame: usize, channel: usize) -> f32 {
        self.data[self.offset(slot, frame) + channel]
    }

    /// One frame's channel vector. Indices must be in bounds.
    pub fn frame(&self, slot: usize, frame: usize) -> &[f32] {
        let start = self.offset(slot, frame);
        &self.data[start..start + self.channels]
    }

    /// Mutable view of one frame's channel vector. Indices must be in bounds.
    pub fn frame_mut(&mut self, slot: usize, frame: usize) -> &mut [f32] {
        let start = self.offset(slot, frame);
        let channels = self.channels;
        &mut self.data[start..start + channels]
    }

    /// Copy of the contiguous slot range `start..end` (used by the dataset
    /// partitioner; slicing along slots never reorders frames or channels).
    pub fn slice_slots(&self, start: usize, end: usize) -> Result<Self, TensorError> {
        if start > end || end > self.slots {
            return Err(TensorError::SlotRange {
                start,
                end,
                slots: self.slots,
            });
        }

        let stride = self.frames * self.channels;
        let data = self.data[start * stride..end * stride].to_vec();
        Ok(Self {
            slots: end - start,
            frames: self.frames,
            channels: self.channels,
            data,
        })
    }

    /// Copy of the channel columns `start..start + width` across every slot
    /// and frame (used by the single-keypoint selection).
    pub fn select_channels(&self, start: usize, width: usize) -> Result<Self, TensorError> {
        if start + width > self.channels {
            return Err(TensorError::ChannelRange {
                start,
                width,
                channels: self.channels,
            });
        }

        let mut data = Vec::with_capacity(self.slots * self.frames * width);
        for slot in 0..self.slots {
            for frame in 0..self.frames {
                let off = self.offset(slot, frame) + start;
                data.extend_from_slice(&self.data[off..off + width]);
            }
        }

        Ok(Self {
            slots: self.slots,
            frames: self.frames,
            channels: width,
            data,
        })
    }
}

/// Dimension product with overflow detection.
fn checked_len(slots: usize, frames: usize, channels: usize) -> Result<usize, TensorError> {
    slots
        .checked_mul(frames)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(TensorError::DimOverflow)
}

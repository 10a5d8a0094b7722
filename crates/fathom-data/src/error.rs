use fathom_base::TensorError;
use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Debug)]
pub enum DataError {
    /// Unreadable file or directory. Fatal for the whole run.
    Io(PathBuf, std::io::Error),
    /// Malformed JSON in a frame file. Fatal for the whole run.
    Json(PathBuf, serde_json::Error),
    /// Well-formed JSON whose landmark payload has the wrong width.
    Schema(PathBuf, String),
    /// Modality sequences (or input/target sequences) disagree on length.
    /// Raised instead of silently skewing frame correspondence.
    Alignment(String),
    /// Channel count not divisible by the normalizer's group size.
    ChannelGroup { channels: usize, group: usize },
    /// A data root with no recordings, or a recording with no modality data.
    EmptyCorpus(PathBuf),
    Tensor(TensorError),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(path, err) => write!(f, "io error at {}: {err}", path.display()),
            DataError::Json(path, err) => {
                write!(f, "malformed json in {}: {err}", path.display())
            }
            DataError::Schema(path, detail) => {
                write!(f, "schema error in {}: {detail}", path.display())
            }
            DataError::Alignment(detail) => write!(f, "alignment error: {detail}"),
            DataError::ChannelGroup { channels, group } => {
                write!(
                    f,
                    "channel count {channels} is not divisible by group size {group}"
                )
            }
            DataError::EmptyCorpus(path) => {
                write!(f, "no keypoint data under {}", path.display())
            }
            DataError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(_, err) => Some(err),
            DataError::Json(_, err) => Some(err),
            DataError::Tensor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TensorError> for DataError {
    fn from(err: TensorError) -> Self {
        DataError::Tensor(err)
    }
}

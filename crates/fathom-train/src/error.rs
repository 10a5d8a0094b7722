use std::fmt;

pub type Result<T> = std::result::Result<T, TrainError>;

#[derive(Debug)]
pub enum TrainError {
    Candle(String),
    Shape(String),
    Io(String),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::Candle(msg) => write!(f, "candle error: {msg}"),
            TrainError::Shape(msg) => write!(f, "shape error: {msg}"),
            TrainError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for TrainError {}

impl From<candle_core::Error> for TrainError {
    fn from(err: candle_core::Error) -> Self {
        TrainError::Candle(err.to_string())
    }
}

impl From<std::io::Error> for TrainError {
    fn from(err: std::io::Error) -> Self {
        TrainError::Io(err.to_string())
    }
}

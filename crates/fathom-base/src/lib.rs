pub mod logging;
pub mod tensor;

pub use logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};
pub use tensor::{SeqTensor, TensorError};

// Re-export log so downstream crates can use fathom_base::log::*
pub use log;

use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

/// A logger that writes to stdout using println!
///
/// Lines carry the time elapsed since the logger was installed, which is the
/// useful clock for a batch pipeline or a training run.
pub struct StdoutLogger {
    start: Instant,
}

/// A logger that appends to a single caller-named file.
pub struct FileLogger {
    start: Instant,
    file: Mutex<File>,
}

impl FileLogger {
    /// Create a new FileLogger appending to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(FileLogger {
            start: Instant::now(),
            file: Mutex::new(file),
        })
    }
}

/// Format one log line: elapsed run time, level, source location, message.
fn format_line(start: Instant, record: &Record) -> String {
    let elapsed = start.elapsed().as_secs_f64();
    let level = record.level();
    let file = record.file().unwrap_or("unknown");
    let line = record.line().unwrap_or(0);
    let message = record.args();

    format!("[+{elapsed:9.3}s] [{level}] {file}:{line} - {message}")
}

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!("{}", format_line(self.start, record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format_line(self.start, record);

        // Acquire mutex with poisoning recovery
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());

        // Write to file, fall back to eprintln if it fails
        if let Err(e) = writeln!(file, "{}", line) {
            eprintln!("Failed to write to log file: {}", e);
            eprintln!("{}", line);
        }
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        file.flush().ok();
    }
}

/// Max log level for the current build mode:
/// Debug in debug builds, Info in release builds.
fn max_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialize the global logger with StdoutLogger.
///
/// This can only be called once per process. Subsequent calls are silently
/// ignored.
pub fn init_stdout_logger() {
    let logger = StdoutLogger {
        start: Instant::now(),
    };

    // Box::leak is required for the &'static reference that set_logger needs.
    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(max_level());
    }
}

/// Initialize the global logger with FileLogger.
///
/// This can only be called once per process. Subsequent calls are silently
/// ignored. Returns an error if the log file cannot be opened.
pub fn init_file_logger(path: impl Into<PathBuf>) -> std::io::Result<()> {
    let logger = FileLogger::new(path)?;

    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(max_level());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_line_structure() {
        let start = Instant::now();
        let record = log::RecordBuilder::new()
            .level(log::Level::Info)
            .target("test")
            .file(Some("test.rs"))
            .line(Some(7))
            .args(format_args!("hello"))
            .build();

        let line = format_line(start, &record);
        assert!(line.starts_with("[+"));
        assert!(line.contains("s] [INFO] test.rs:7 - hello"));
    }

    #[test]
    fn test_file_logger_appends() {
        let path = std::env::temp_dir().join(format!("fathom-log-test-{}.log", std::process::id()));
        let _ = fs::remove_file(&path);

        let logger = FileLogger::new(&path).expect("Failed to create FileLogger");
        let record = log::RecordBuilder::new()
            .level(log::Level::Warn)
            .target("test")
            .file(Some("test.rs"))
            .line(Some(1))
            .args(format_args!("first line"))
            .build();
        logger.log(&record);
        logger.flush();

        let content = fs::read_to_string(&path).expect("Failed to read log file");
        assert!(content.contains("[WARN] test.rs:1 - first line"));

        fs::remove_file(&path).ok();
    }
}

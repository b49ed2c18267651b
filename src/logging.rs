//! `log` backend: appends every record to a debug log file and mirrors
//! warnings and errors to stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Default log file: `fontset_debug.log` next to the executable.
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .unwrap_or_default()
        .parent()
        .unwrap_or(Path::new("."))
        .join("fontset_debug.log")
}

pub struct FileLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl FileLogger {
    /// Open (or create) `path` for appending. If it cannot be opened the
    /// logger still reports to stderr.
    pub fn new(level: LevelFilter, path: &Path) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("warning: cannot open log {}: {e}", path.display()))
            .ok()
            .map(Mutex::new);
        Self { level, file }
    }

    fn format(record: &Record<'_>) -> String {
        format!("[{:<5} {}] {}", record.level(), record.target(), record.args())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        if record.level() <= Level::Warn {
            eprintln!("{line}");
        }
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{line}");
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the file logger as the global `log` backend.
pub fn init(level: LevelFilter, path: Option<&Path>) -> Result<(), log::SetLoggerError> {
    let path = path.map_or_else(log_path, Path::to_path_buf);
    log::set_boxed_logger(Box::new(FileLogger::new(level, &path)))?;
    log::set_max_level(level);
    Ok(())
}

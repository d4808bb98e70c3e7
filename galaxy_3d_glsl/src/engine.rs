/// Galaxy3D GLSL Engine - process-wide state for the shader layer
///
/// Holds the pluggable logger and the shared include path list that every
/// shader program searches after its own include paths. Both live in
/// thread-safe static storage behind RwLock.

use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Include paths shared by every shader program (append-only)
static SHARED_INCLUDE_PATHS: OnceLock<RwLock<Vec<PathBuf>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn shared_paths_lock() -> &'static RwLock<Vec<PathBuf>> {
    SHARED_INCLUDE_PATHS.get_or_init(|| RwLock::new(Vec::new()))
}

// ===== PUBLIC API =====

/// Process-wide state manager
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_glsl::galaxy3d::Engine;
///
/// // Library headers available to every program
/// Engine::add_shared_include_path("assets/shaders/lib");
/// assert!(!Engine::shared_include_paths().is_empty());
/// ```
pub struct Engine;

impl Engine {
    // ===== SHARED INCLUDE PATHS =====

    /// Append a directory to the shared include path list
    ///
    /// Shared paths are searched, in insertion order, after the include
    /// paths of the program being compiled. There is no removal.
    pub fn add_shared_include_path(path: impl Into<PathBuf>) {
        let path = path.into();
        if let Ok(mut paths) = shared_paths_lock().write() {
            crate::engine_debug!("galaxy3d::glsl::Engine",
                "Shared include path added: {}", path.display());
            paths.push(path);
        }
    }

    /// Snapshot of the shared include path list, in search order
    pub fn shared_include_paths() -> Vec<PathBuf> {
        shared_paths_lock()
            .read()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }

    /// Clear shared include paths (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Ok(mut paths) = shared_paths_lock().write() {
            paths.clear();
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger, editor console, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use galaxy_3d_glsl::galaxy3d::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

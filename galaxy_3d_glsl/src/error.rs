//! Error types for the Galaxy3D GLSL layer
//!
//! This module defines the error types used throughout the crate,
//! covering preprocessing, compilation, linking and uniform block binding.

use std::fmt;
use std::path::PathBuf;
use crate::device::ShaderStage;

/// Result type for Galaxy3D GLSL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D GLSL errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Shader source file missing or unreadable
    FileOpenFailure {
        path: PathBuf,
        reason: String,
    },

    /// Include name not found in any search path
    IncludeNotFound {
        name: String,
        /// File containing the `#include` directive
        from: PathBuf,
        line: usize,
    },

    /// File included recursively, or include nesting too deep
    IncludeCycle {
        path: PathBuf,
        /// Include stack at the point of failure, outermost first
        chain: Vec<PathBuf>,
    },

    /// Include or autoresolve directive that cannot be parsed
    MalformedDirective {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Driver rejected the flattened source of a stage
    CompileFailure {
        stage: ShaderStage,
        log: String,
    },

    /// Driver rejected the program at link time
    LinkFailure(String),

    /// Autoresolve name has no matching uniform block in the linked program
    AutoresolveBlockMissing(String),

    /// Autoresolve name absent from the uniform buffer registry
    AutoresolveEntryMissing(String),

    /// Operation not allowed in the program's current state
    InvalidState(String),

    /// Invalid resource (registry entry, program handle, ...)
    InvalidResource(String),

    /// Backend-specific error (device, lock poisoning, ...)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOpenFailure { path, reason } => {
                write!(f, "Failed to open file `{}`: {}", path.display(), reason)
            }
            Error::IncludeNotFound { name, from, line } => write!(
                f,
                "Include `{}` not found in any include path ({}:{})",
                name,
                from.display(),
                line
            ),
            Error::IncludeCycle { path, chain } => {
                write!(f, "Recursive include of `{}`", path.display())?;
                if !chain.is_empty() {
                    let chain: Vec<String> = chain.iter().map(|p| p.display().to_string()).collect();
                    write!(f, " (include stack: {})", chain.join(" -> "))?;
                }
                Ok(())
            }
            Error::MalformedDirective { path, line, message } => {
                write!(f, "Malformed directive at {}:{}: {}", path.display(), line, message)
            }
            Error::CompileFailure { stage, log } => {
                write!(f, "Compilation of {:?} stage failed: {}", stage, log)
            }
            Error::LinkFailure(log) => write!(f, "Link failed: {}", log),
            Error::AutoresolveBlockMissing(name) => {
                write!(f, "Failed to find the UBO `{}` for autoresolve", name)
            }
            Error::AutoresolveEntryMissing(name) => {
                write!(f, "Registry has no knowledge of the UBO `{}`", name)
            }
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

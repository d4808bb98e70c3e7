/// Shader preprocessor: include expansion and autoresolve collection.
///
/// Includes are expanded with an explicit stack of open files instead of
/// call recursion. A file already on the stack, or a stack deeper than
/// MAX_INCLUDE_DEPTH, fails the whole pass with `Error::IncludeCycle`.

use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use super::include_resolver::IncludeResolver;
use super::lexer::{tokenize, Token};

/// Maximum number of nested open files, the top-level source included
pub const MAX_INCLUDE_DEPTH: usize = 32;

const SOURCE: &str = "galaxy3d::glsl::Preprocessor";

/// Output of one preprocessing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessedShader {
    /// Version line followed by the flattened shader text
    pub source: String,
    /// `#autoresolve` names in declaration order, duplicates kept
    pub autoresolve: Vec<String>,
    /// Every file inlined by `#include`, in inclusion order
    pub included_files: Vec<PathBuf>,
}

/// One open file on the include stack
struct Frame {
    path: PathBuf,
    /// Canonical path, used to detect recursion
    identity: PathBuf,
    tokens: std::vec::IntoIter<Token>,
    /// Output length when this file started
    output_start: usize,
    /// Line terminator of the `#include` line that opened this file
    eol: &'static str,
}

impl Frame {
    fn open(path: &Path, text: &str, output_start: usize, eol: &'static str) -> Result<Self> {
        let tokens = tokenize(path, text).map_err(fail)?;
        Ok(Self {
            path: path.to_path_buf(),
            identity: fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
            tokens: tokens.into_iter(),
            output_start,
            eol,
        })
    }

    /// Terminate the inlined text with the directive's line break
    fn close(self, output: &mut String) {
        let inlined = &output[self.output_start..];
        if !self.eol.is_empty() && !inlined.ends_with('\n') {
            output.push_str(self.eol);
        }
    }
}

/// Log a preprocessing error before it is returned
fn fail(error: Error) -> Error {
    crate::engine_error!(SOURCE, "{}", error);
    error
}

/// Preprocessor for one pass over one shader stage
///
/// # Example
///
/// ```no_run
/// use std::path::{Path, PathBuf};
/// use galaxy_3d_glsl::galaxy3d::preprocessor::Preprocessor;
///
/// let include_paths = vec![PathBuf::from("assets/shaders/include")];
/// let preprocessor = Preprocessor::new(&include_paths, &[], "#version 330\n");
/// let shader = preprocessor.preprocess_file(Path::new("assets/shaders/mesh.vert"))?;
/// println!("{} uniform blocks to autoresolve", shader.autoresolve.len());
/// # Ok::<(), galaxy_3d_glsl::galaxy3d::Error>(())
/// ```
pub struct Preprocessor<'a> {
    resolver: IncludeResolver<'a>,
    version_comment: &'a str,
}

impl<'a> Preprocessor<'a> {
    /// Create a preprocessor
    ///
    /// # Arguments
    ///
    /// * `include_paths` - Program include paths, searched first
    /// * `shared_include_paths` - Shared include paths, searched after
    /// * `version_comment` - Line prepended to the output (with its newline)
    pub fn new(
        include_paths: &'a [PathBuf],
        shared_include_paths: &'a [PathBuf],
        version_comment: &'a str,
    ) -> Self {
        Self {
            resolver: IncludeResolver::new(include_paths, shared_include_paths),
            version_comment,
        }
    }

    /// Preprocess the shader file at `path`
    ///
    /// # Errors
    ///
    /// - `FileOpenFailure` if `path` cannot be read
    /// - `IncludeNotFound`, `IncludeCycle`, `MalformedDirective` from expansion
    pub fn preprocess_file(&self, path: &Path) -> Result<PreprocessedShader> {
        let text = fs::read_to_string(path).map_err(|err| fail(Error::FileOpenFailure {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }))?;
        self.preprocess_source(path, &text)
    }

    /// Preprocess in-memory shader text
    ///
    /// `path` names the source in diagnostics; when it points at a real
    /// file, that file also takes part in recursion detection.
    pub fn preprocess_source(&self, path: &Path, text: &str) -> Result<PreprocessedShader> {
        let mut output = String::with_capacity(self.version_comment.len() + text.len());
        output.push_str(self.version_comment);

        let mut autoresolve = Vec::new();
        let mut included_files = Vec::new();
        let mut stack = vec![Frame::open(path, text, output.len(), "")?];

        while let Some(frame) = stack.last_mut() {
            match frame.tokens.next() {
                None => {
                    if let Some(done) = stack.pop() {
                        done.close(&mut output);
                    }
                }
                Some(Token::Text(chunk)) => output.push_str(&chunk),
                Some(Token::Autoresolve { name, line }) => {
                    crate::engine_trace!(SOURCE, "{}:{}: autoresolve `{}`", frame.path.display(), line, name);
                    autoresolve.push(name);
                }
                Some(Token::Include { name, line, eol }) => {
                    let from = frame.path.clone();
                    let resolved = self.resolver.resolve(&name).ok_or_else(|| fail(Error::IncludeNotFound {
                        name,
                        from,
                        line,
                    }))?;

                    let identity = fs::canonicalize(&resolved.path).unwrap_or_else(|_| resolved.path.clone());
                    if stack.len() >= MAX_INCLUDE_DEPTH || stack.iter().any(|open| open.identity == identity) {
                        let mut chain: Vec<PathBuf> = stack.iter().map(|open| open.path.clone()).collect();
                        chain.push(resolved.path.clone());
                        return Err(fail(Error::IncludeCycle { path: resolved.path, chain }));
                    }

                    let child = Frame::open(&resolved.path, &resolved.content, output.len(), eol)?;
                    included_files.push(resolved.path);
                    stack.push(child);
                }
            }
        }

        crate::engine_debug!(SOURCE, "Preprocessed {}: {} include(s), {} autoresolve block(s)",
            path.display(), included_files.len(), autoresolve.len());

        Ok(PreprocessedShader {
            source: output,
            autoresolve,
            included_files,
        })
    }
}

#[cfg(test)]
#[path = "preprocessor_tests.rs"]
mod tests;

/// Include file lookup over the program and shared include paths.

use std::fs;
use std::path::{Component, Path, PathBuf};

const SOURCE: &str = "galaxy3d::glsl::IncludeResolver";

/// Include file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInclude {
    /// Search root joined with the include name
    pub path: PathBuf,
    pub content: String,
}

/// Searches program include paths first, then shared include paths.
///
/// First existing, readable file wins.
pub struct IncludeResolver<'a> {
    include_paths: &'a [PathBuf],
    shared_include_paths: &'a [PathBuf],
}

impl<'a> IncludeResolver<'a> {
    pub fn new(include_paths: &'a [PathBuf], shared_include_paths: &'a [PathBuf]) -> Self {
        Self {
            include_paths,
            shared_include_paths,
        }
    }

    /// Search roots in lookup order
    pub fn search_roots(&self) -> impl Iterator<Item = &'a Path> + 'a {
        self.include_paths
            .iter()
            .chain(self.shared_include_paths.iter())
            .map(PathBuf::as_path)
    }

    /// Locate and read `name`
    ///
    /// Returns None when no search root holds a readable file by that name.
    /// Rooted names (`/x.glsl`, `C:\x.glsl`) never match: includes stay
    /// inside the search roots. Content that is not valid UTF-8 is decoded
    /// lossily rather than skipped.
    pub fn resolve(&self, name: &str) -> Option<ResolvedInclude> {
        if is_rooted(Path::new(name)) {
            crate::engine_debug!(SOURCE, "Rejecting rooted include name `{}`", name);
            return None;
        }

        for root in self.search_roots() {
            let candidate = root.join(name);
            if !candidate.is_file() {
                continue;
            }

            match fs::read(&candidate) {
                Ok(bytes) => {
                    let content = match String::from_utf8(bytes) {
                        Ok(content) => content,
                        Err(err) => {
                            crate::engine_warn!(SOURCE, "{} is not valid UTF-8, decoding lossily",
                                candidate.display());
                            String::from_utf8_lossy(err.as_bytes()).into_owned()
                        }
                    };
                    crate::engine_trace!(SOURCE, "Resolved `{}` to {}", name, candidate.display());
                    return Some(ResolvedInclude { path: candidate, content });
                }
                Err(err) => {
                    crate::engine_debug!(SOURCE,
                        "Skipping unreadable include candidate {}: {}", candidate.display(), err);
                }
            }
        }
        None
    }
}

fn is_rooted(name: &Path) -> bool {
    name.components()
        .any(|component| matches!(component, Component::RootDir | Component::Prefix(_)))
}

#[cfg(test)]
#[path = "include_resolver_tests.rs"]
mod tests;

//! Shader source preprocessing
//!
//! Expands `#include` directives against include search paths, collects
//! `#autoresolve` uniform block names and prepends the `#version` line.

mod lexer;
mod include_resolver;
mod preprocessor;

pub use lexer::{tokenize, Token};
pub use include_resolver::{IncludeResolver, ResolvedInclude};
pub use preprocessor::{Preprocessor, PreprocessedShader, MAX_INCLUDE_DEPTH};

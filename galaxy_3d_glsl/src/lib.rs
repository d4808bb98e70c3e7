/*!
# Galaxy 3D GLSL

GLSL shader program layer for the Galaxy 3D engine.

Shader sources are preprocessed before they reach the driver: `#include`
directives are expanded from program and shared include paths, a `#version`
line matching the current GL context is prepended, and `#autoresolve`
directives name uniform blocks that are bound to registered uniform buffers
right after the program links.

## Architecture

- **GlslDevice**: Driver trait (compile, link, uniform block binding)
- **Preprocessor**: Include expansion and autoresolve collection
- **UniformBufferRegistry**: Named uniform buffers (binding point + buffer)
- **ShaderProgram**: Compile-link lifecycle and autoresolve binding

The GL backend implements `GlslDevice`; everything above it is
platform-agnostic.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod version;
pub mod device;
pub mod preprocessor;
pub mod uniform_buffer;
pub mod program;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Shader program
    pub use crate::program::{ShaderProgram, ProgramState, BoundBlock};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // GL context version sub-module
    pub mod version {
        pub use crate::version::*;
    }

    // Driver sub-module
    pub mod device {
        pub use crate::device::*;
    }

    // Preprocessor sub-module
    pub mod preprocessor {
        pub use crate::preprocessor::*;
    }

    // Uniform buffer sub-module
    pub mod uniform_buffer {
        pub use crate::uniform_buffer::*;
    }
}

//! Shader program module
//!
//! A ShaderProgram drives preprocessing, compilation and linking of one
//! program, then binds its `#autoresolve` uniform blocks.

mod program_state;
mod shader_program;

pub use program_state::ProgramState;
pub use shader_program::{ShaderProgram, BoundBlock};

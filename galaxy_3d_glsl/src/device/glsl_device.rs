/// GlslDevice trait - driver primitives used by shader programs
///
/// The device owns the actual shading-language compiler and linker. This
/// crate only feeds it flattened source text and issues the uniform block
/// queries and bindings needed after a successful link.

use crate::error::Result;
use crate::version::ContextVersion;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Tessellation control shader
    TessControl,
    /// Tessellation evaluation shader
    TessEvaluation,
    /// Geometry shader
    Geometry,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
}

/// Opaque handle of a program object owned by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Driver-side primitives for one graphics context
///
/// All calls are expected on the thread that owns the context.
/// Implementations report driver failures through the crate `Error` type:
/// `Error::CompileFailure` from `compile_shader`, `Error::LinkFailure`
/// from `link_program`.
pub trait GlslDevice: Send {
    /// Version and profile of the active context
    fn context_version(&self) -> ContextVersion;

    /// Create an empty program object
    fn create_program(&mut self) -> Result<ProgramHandle>;

    /// Destroy a program object and its attached shaders
    fn delete_program(&mut self, program: ProgramHandle);

    /// Compile `source` for `stage` and attach it to `program`
    fn compile_shader(&mut self, program: ProgramHandle, stage: ShaderStage, source: &str) -> Result<()>;

    /// Detach and delete every shader attached to `program`
    fn remove_shaders(&mut self, program: ProgramHandle);

    /// Link the attached shaders of `program`
    fn link_program(&mut self, program: ProgramHandle) -> Result<()>;

    /// Index of the named uniform block in a linked program
    ///
    /// Returns None when the program has no active block with that name.
    fn uniform_block_index(&self, program: ProgramHandle, name: &str) -> Option<u32>;

    /// Make `program` current
    fn bind_program(&mut self, program: ProgramHandle);

    /// Unbind the current program
    fn release_program(&mut self);

    /// Attach buffer storage `buffer_id` to uniform binding point `binding_point`
    fn bind_buffer_base(&mut self, binding_point: u32, buffer_id: u32);

    /// Associate block `block_index` of `program` with `binding_point`
    fn uniform_block_binding(&mut self, program: ProgramHandle, block_index: u32, binding_point: u32);
}

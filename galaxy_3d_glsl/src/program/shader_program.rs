/// Shader program wrapper: preprocessing, compile, link and UBO autoresolve.
///
/// Stages are preprocessed with the program include paths, then the shared
/// include paths, and the `#version` line matching the device context.
/// `#autoresolve` names collected from every compiled stage are bound after
/// a successful link, using a UniformBufferRegistry passed to `link()`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use crate::device::{GlslDevice, ProgramHandle, ShaderStage};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::preprocessor::{Preprocessor, PreprocessedShader};
use crate::uniform_buffer::{UniformBufferEntry, UniformBufferRegistry};
use super::program_state::ProgramState;

const SOURCE: &str = "galaxy3d::glsl::ShaderProgram";

/// Uniform block bound by autoresolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundBlock {
    pub name: String,
    pub block_index: u32,
    pub binding_point: u32,
    pub buffer_id: u32,
}

/// Log an error before it is returned
fn fail(error: Error) -> Error {
    crate::engine_error!(SOURCE, "{}", error);
    error
}

fn lock<'a>(device: &'a Mutex<dyn GlslDevice + 'static>) -> Result<MutexGuard<'a, dyn GlslDevice + 'static>> {
    device
        .lock()
        .map_err(|_| fail(Error::BackendError("Device lock poisoned".to_string())))
}

fn bind_block(device: &mut dyn GlslDevice, program: ProgramHandle, block_index: u32, entry: &UniformBufferEntry) {
    device.bind_buffer_base(entry.binding_point, entry.buffer_id);
    device.uniform_block_binding(program, block_index, entry.binding_point);
}

/// Bind every autoresolve name, stopping at the first failure
///
/// Blocks bound before a failure stay recorded in `bound`.
fn bind_autoresolved(
    device: &mut dyn GlslDevice,
    program: ProgramHandle,
    names: &[String],
    registry: &UniformBufferRegistry,
    bound: &mut Vec<BoundBlock>,
) -> Result<()> {
    for name in names {
        let block_index = device
            .uniform_block_index(program, name)
            .ok_or_else(|| Error::AutoresolveBlockMissing(name.clone()))?;
        let entry = registry
            .find(name)
            .ok_or_else(|| Error::AutoresolveEntryMissing(name.clone()))?;

        bind_block(device, program, block_index, entry);
        crate::engine_trace!(SOURCE, "Autoresolved `{}`: block {} -> binding point {} (buffer {})",
            name, block_index, entry.binding_point, entry.buffer_id);

        bound.push(BoundBlock {
            name: name.clone(),
            block_index,
            binding_point: entry.binding_point,
            buffer_id: entry.buffer_id,
        });
    }
    Ok(())
}

/// One GLSL program and its compile-link lifecycle
///
/// # Example
///
/// ```no_run
/// use std::sync::{Arc, Mutex};
/// use galaxy_3d_glsl::galaxy3d::{ShaderProgram, device::{GlslDevice, ShaderStage}};
/// use galaxy_3d_glsl::galaxy3d::uniform_buffer::UniformBufferRegistry;
///
/// # fn run(device: Arc<Mutex<dyn GlslDevice>>) -> galaxy_3d_glsl::galaxy3d::Result<()> {
/// let mut registry = UniformBufferRegistry::new();
/// registry.register("Camera", 0, 1)?;
///
/// let mut program = ShaderProgram::new(device)?;
/// program.add_include_path("assets/shaders/include")?;
/// program.add_shader_from_source_file(ShaderStage::Vertex, "assets/shaders/mesh.vert")?;
/// program.add_shader_from_source_file(ShaderStage::Fragment, "assets/shaders/mesh.frag")?;
/// program.link(&registry)?;
/// # Ok(())
/// # }
/// ```
pub struct ShaderProgram {
    device: Arc<Mutex<dyn GlslDevice>>,
    handle: ProgramHandle,
    state: ProgramState,
    include_paths: Vec<PathBuf>,
    autoresolve: Vec<String>,
    bound_blocks: Vec<BoundBlock>,
}

impl ShaderProgram {
    /// Create an empty program on `device`
    pub fn new(device: Arc<Mutex<dyn GlslDevice>>) -> Result<Self> {
        let handle = lock(&device)?.create_program().map_err(fail)?;
        crate::engine_debug!(SOURCE, "Created program {}", handle.0);

        Ok(Self {
            device,
            handle,
            state: ProgramState::Empty,
            include_paths: Vec::new(),
            autoresolve: Vec::new(),
            bound_blocks: Vec::new(),
        })
    }

    // ===== INCLUDE PATHS =====

    /// Append a directory to this program's include paths
    ///
    /// # Errors
    ///
    /// `InvalidState` while a compile-link cycle is open (a stage has been
    /// added and the program not linked yet): every stage of one program
    /// is preprocessed with the same include paths.
    pub fn add_include_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if self.state.is_cycle_open() {
            return Err(fail(Error::InvalidState(format!(
                "Cannot add include path `{}` to program {} while in {:?} state",
                path.display(),
                self.handle.0,
                self.state
            ))));
        }
        self.include_paths.push(path);
        Ok(())
    }

    /// Append a directory to the include paths shared by every program
    pub fn add_shared_include_path(path: impl Into<PathBuf>) {
        Engine::add_shared_include_path(path);
    }

    /// `#version` line for the device's current context
    pub fn version_comment(&self) -> Result<String> {
        Ok(lock(&self.device)?.context_version().version_directive())
    }

    // ===== STAGES =====

    /// Preprocess the file at `path` and compile it as `stage`
    ///
    /// # Errors
    ///
    /// - `FileOpenFailure`, `IncludeNotFound`, `IncludeCycle`,
    ///   `MalformedDirective` from preprocessing (program state unchanged)
    /// - `CompileFailure` from the device (state becomes `CompileFailed`)
    /// - `InvalidState` after a failed compile, until `remove_all_shaders()`
    pub fn add_shader_from_source_file(&mut self, stage: ShaderStage, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.check_can_add_shader()?;

        let version_comment = self.version_comment()?;
        let shared_include_paths = Engine::shared_include_paths();
        let shader = Preprocessor::new(&self.include_paths, &shared_include_paths, &version_comment)
            .preprocess_file(path)?;

        self.compile(stage, path, shader)
    }

    /// Preprocess in-memory `source` and compile it as `stage`
    ///
    /// `name` identifies the source in diagnostics. Same errors as
    /// `add_shader_from_source_file`, without `FileOpenFailure`.
    pub fn add_shader_from_source_code(
        &mut self,
        stage: ShaderStage,
        name: impl AsRef<Path>,
        source: &str,
    ) -> Result<()> {
        let name = name.as_ref();
        self.check_can_add_shader()?;

        let version_comment = self.version_comment()?;
        let shared_include_paths = Engine::shared_include_paths();
        let shader = Preprocessor::new(&self.include_paths, &shared_include_paths, &version_comment)
            .preprocess_source(name, source)?;

        self.compile(stage, name, shader)
    }

    fn check_can_add_shader(&self) -> Result<()> {
        if self.state == ProgramState::CompileFailed {
            return Err(fail(Error::InvalidState(format!(
                "Program {} has a failed stage; call remove_all_shaders() first",
                self.handle.0
            ))));
        }
        Ok(())
    }

    fn compile(&mut self, stage: ShaderStage, name: &Path, shader: PreprocessedShader) -> Result<()> {
        let mut device = lock(&self.device)?;
        self.state = ProgramState::SourceLoaded;

        let result = device.compile_shader(self.handle, stage, &shader.source);
        drop(device);
        match result {
            Ok(()) => {
                crate::engine_debug!(SOURCE, "Compiled {:?} stage {} for program {} ({} autoresolve block(s))",
                    stage, name.display(), self.handle.0, shader.autoresolve.len());
                self.autoresolve.extend(shader.autoresolve);
                self.state = ProgramState::Compiled;
                Ok(())
            }
            Err(err) => {
                self.state = ProgramState::CompileFailed;
                crate::engine_error!(SOURCE, "Failed to compile {}", name.display());
                Err(fail(err))
            }
        }
    }

    /// Detach every stage and forget collected autoresolve names
    pub fn remove_all_shaders(&mut self) -> Result<()> {
        lock(&self.device)?.remove_shaders(self.handle);
        self.autoresolve.clear();
        self.bound_blocks.clear();
        self.state = ProgramState::Empty;
        Ok(())
    }

    // ===== LINK =====

    /// Link the program, then bind its autoresolve uniform blocks
    ///
    /// For each collected name, in order: look up the block index in the
    /// linked program, look up the registry entry, bind the entry's buffer
    /// to its binding point and the block to that binding point. The
    /// program is current during binding and released afterwards, whether
    /// binding succeeded or not.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if no stage compiled successfully in this cycle
    /// - `LinkFailure` from the device (state becomes `LinkFailed`)
    /// - `AutoresolveBlockMissing` / `AutoresolveEntryMissing` for the
    ///   first name that cannot be bound; later names are not processed
    pub fn link(&mut self, registry: &UniformBufferRegistry) -> Result<()> {
        if !self.state.can_link() {
            return Err(fail(Error::InvalidState(format!(
                "Cannot link program {} in {:?} state",
                self.handle.0, self.state
            ))));
        }

        self.bound_blocks.clear();
        let mut device = lock(&self.device)?;

        if let Err(err) = device.link_program(self.handle) {
            self.state = ProgramState::LinkFailed;
            return Err(fail(err));
        }
        self.state = ProgramState::Linked;

        if self.autoresolve.is_empty() {
            crate::engine_info!(SOURCE, "Linked program {}", self.handle.0);
            return Ok(());
        }

        device.bind_program(self.handle);
        let result = bind_autoresolved(
            &mut *device,
            self.handle,
            &self.autoresolve,
            registry,
            &mut self.bound_blocks,
        );
        device.release_program();

        match result {
            Ok(()) => {
                self.state = ProgramState::AutoresolveBound;
                crate::engine_info!(SOURCE, "Linked program {} and autoresolved {} uniform block(s)",
                    self.handle.0, self.bound_blocks.len());
                Ok(())
            }
            Err(err) => Err(fail(err)),
        }
    }

    // ===== EXPLICIT UNIFORM BLOCK BINDING =====

    /// Index of the named uniform block in the linked program
    pub fn uniform_block_index(&self, name: &str) -> Result<Option<u32>> {
        Ok(lock(&self.device)?.uniform_block_index(self.handle, name))
    }

    /// Bind `entry` to the uniform block called `name`
    ///
    /// # Errors
    ///
    /// `InvalidState` if the program is not linked, `InvalidResource` if it
    /// has no block called `name`.
    pub fn uniform_block_binding(&mut self, name: &str, entry: &UniformBufferEntry) -> Result<()> {
        self.check_linked()?;
        let mut device = lock(&self.device)?;
        let block_index = match device.uniform_block_index(self.handle, name) {
            Some(index) => index,
            None => {
                return Err(fail(Error::InvalidResource(format!(
                    "Uniform block `{}` not found in program {}",
                    name, self.handle.0
                ))))
            }
        };
        bind_block(&mut *device, self.handle, block_index, entry);
        Ok(())
    }

    /// Bind `entry` to the uniform block at `block_index`
    pub fn uniform_block_binding_at(&mut self, block_index: u32, entry: &UniformBufferEntry) -> Result<()> {
        self.check_linked()?;
        bind_block(&mut *lock(&self.device)?, self.handle, block_index, entry);
        Ok(())
    }

    fn check_linked(&self) -> Result<()> {
        if !self.state.is_linked() {
            return Err(fail(Error::InvalidState(format!(
                "Program {} is not linked ({:?})",
                self.handle.0, self.state
            ))));
        }
        Ok(())
    }

    // ===== ACCESSORS =====

    /// Device handle of the program
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Program include paths, in search order
    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    /// Autoresolve names collected from every compiled stage
    pub fn autoresolve_names(&self) -> &[String] {
        &self.autoresolve
    }

    /// Blocks bound by the last `link()`
    pub fn bound_blocks(&self) -> &[BoundBlock] {
        &self.bound_blocks
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if let Ok(mut device) = self.device.lock() {
            device.delete_program(self.handle);
        }
    }
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;

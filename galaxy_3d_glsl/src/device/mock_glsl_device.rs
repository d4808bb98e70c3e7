/// Mock GLSL device for unit tests (no GPU required)
///
/// Records every call so tests can check what a ShaderProgram asked the
/// driver to do. Compile and link outcomes and the set of uniform blocks
/// exposed after link are configurable.

use rustc_hash::FxHashMap;
use crate::device::{GlslDevice, ProgramHandle, ShaderStage};
use crate::error::{Error, Result};
use crate::version::ContextVersion;

// ============================================================================
// Recorded calls
// ============================================================================

/// One recorded driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    CompileShader(ProgramHandle, ShaderStage),
    RemoveShaders(ProgramHandle),
    LinkProgram(ProgramHandle),
    BindProgram(ProgramHandle),
    ReleaseProgram,
    BindBufferBase { binding_point: u32, buffer_id: u32 },
    UniformBlockBinding { program: ProgramHandle, block_index: u32, binding_point: u32 },
}

// ============================================================================
// Mock device
// ============================================================================

pub struct MockGlslDevice {
    pub version: ContextVersion,
    /// Uniform blocks exposed by every program once linked, in index order
    pub blocks: Vec<String>,
    /// Stage whose compilation fails, with the info log to report
    pub failing_stage: Option<(ShaderStage, String)>,
    /// Info log reported by a failing link
    pub link_error: Option<String>,
    /// Sources handed to `compile_shader`, in call order
    pub compiled_sources: Vec<(ProgramHandle, ShaderStage, String)>,
    pub calls: Vec<MockCall>,
    linked: FxHashMap<ProgramHandle, bool>,
    next_program: u32,
}

impl MockGlslDevice {
    pub fn new(version: ContextVersion) -> Self {
        Self {
            version,
            blocks: Vec::new(),
            failing_stage: None,
            link_error: None,
            compiled_sources: Vec::new(),
            calls: Vec::new(),
            linked: FxHashMap::default(),
            next_program: 1,
        }
    }

    /// Desktop GL 4.5 device exposing the given uniform blocks
    pub fn with_blocks(blocks: &[&str]) -> Self {
        let mut device = Self::new(ContextVersion::desktop(4, 5));
        device.blocks = blocks.iter().map(|name| name.to_string()).collect();
        device
    }

    /// Buffer and block binding calls, in call order
    pub fn binding_calls(&self) -> Vec<MockCall> {
        self.calls
            .iter()
            .filter(|call| matches!(
                call,
                MockCall::BindBufferBase { .. } | MockCall::UniformBlockBinding { .. }
            ))
            .cloned()
            .collect()
    }

    pub fn is_linked(&self, program: ProgramHandle) -> bool {
        self.linked.get(&program).copied().unwrap_or(false)
    }
}

impl GlslDevice for MockGlslDevice {
    fn context_version(&self) -> ContextVersion {
        self.version
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        let handle = ProgramHandle(self.next_program);
        self.next_program += 1;
        self.linked.insert(handle, false);
        self.calls.push(MockCall::CreateProgram(handle));
        Ok(handle)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.linked.remove(&program);
        self.calls.push(MockCall::DeleteProgram(program));
    }

    fn compile_shader(&mut self, program: ProgramHandle, stage: ShaderStage, source: &str) -> Result<()> {
        self.calls.push(MockCall::CompileShader(program, stage));
        if let Some((failing, log)) = &self.failing_stage {
            if *failing == stage {
                return Err(Error::CompileFailure { stage, log: log.clone() });
            }
        }
        self.compiled_sources.push((program, stage, source.to_string()));
        Ok(())
    }

    fn remove_shaders(&mut self, program: ProgramHandle) {
        self.compiled_sources.retain(|(handle, _, _)| *handle != program);
        self.linked.insert(program, false);
        self.calls.push(MockCall::RemoveShaders(program));
    }

    fn link_program(&mut self, program: ProgramHandle) -> Result<()> {
        self.calls.push(MockCall::LinkProgram(program));
        if !self.linked.contains_key(&program) {
            return Err(Error::InvalidResource(format!("Unknown program {}", program.0)));
        }
        if let Some(log) = &self.link_error {
            self.linked.insert(program, false);
            return Err(Error::LinkFailure(log.clone()));
        }
        self.linked.insert(program, true);
        Ok(())
    }

    fn uniform_block_index(&self, program: ProgramHandle, name: &str) -> Option<u32> {
        if !self.is_linked(program) {
            return None;
        }
        self.blocks
            .iter()
            .position(|block| block == name)
            .map(|index| index as u32)
    }

    fn bind_program(&mut self, program: ProgramHandle) {
        self.calls.push(MockCall::BindProgram(program));
    }

    fn release_program(&mut self) {
        self.calls.push(MockCall::ReleaseProgram);
    }

    fn bind_buffer_base(&mut self, binding_point: u32, buffer_id: u32) {
        self.calls.push(MockCall::BindBufferBase { binding_point, buffer_id });
    }

    fn uniform_block_binding(&mut self, program: ProgramHandle, block_index: u32, binding_point: u32) {
        self.calls.push(MockCall::UniformBlockBinding { program, block_index, binding_point });
    }
}

#[cfg(test)]
#[path = "mock_glsl_device_tests.rs"]
mod tests;

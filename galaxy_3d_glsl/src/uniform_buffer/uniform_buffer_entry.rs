/// A named uniform buffer object known to the registry.
///
/// The buffer itself is created and owned by application code; the entry
/// only carries the handles needed to bind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBufferEntry {
    /// Logical name, matching the uniform block name in shaders
    pub name: String,
    /// Uniform binding point the buffer is attached to
    pub binding_point: u32,
    /// Buffer object (storage) identifier
    pub buffer_id: u32,
}

impl UniformBufferEntry {
    pub fn new(name: impl Into<String>, binding_point: u32, buffer_id: u32) -> Self {
        Self {
            name: name.into(),
            binding_point,
            buffer_id,
        }
    }
}

/// Registry of named uniform buffer objects.
///
/// Populated by application code when it creates its uniform buffers, then
/// handed by reference to `ShaderProgram::link()`, which only reads it.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_bail;
use super::uniform_buffer_entry::UniformBufferEntry;

/// Named uniform buffers
///
/// Registration takes `&mut self` and lookups `&self`, so registration is
/// serialized with lookups by the borrow rules. Sharing a registry across
/// threads is up to the owner (e.g. `Arc<RwLock<UniformBufferRegistry>>`).
#[derive(Debug, Default)]
pub struct UniformBufferRegistry {
    entries: FxHashMap<String, UniformBufferEntry>,
}

impl UniformBufferRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register a buffer under `name`
    ///
    /// Returns a reference to the created entry.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry with the same name already exists.
    pub fn register(&mut self, name: &str, binding_point: u32, buffer_id: u32) -> Result<&UniformBufferEntry> {
        if self.entries.contains_key(name) {
            engine_bail!("galaxy3d::glsl::UniformBufferRegistry",
                "Uniform buffer '{}' already registered", name);
        }

        crate::engine_debug!("galaxy3d::glsl::UniformBufferRegistry",
            "Registered uniform buffer '{}' (binding point {}, buffer {})", name, binding_point, buffer_id);

        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| UniformBufferEntry::new(name, binding_point, buffer_id));
        Ok(entry)
    }

    /// Find an entry by name
    pub fn find(&self, name: &str) -> Option<&UniformBufferEntry> {
        self.entries.get(name)
    }

    /// Remove an entry by name
    ///
    /// Returns the removed entry, or None if not found.
    pub fn remove(&mut self, name: &str) -> Option<UniformBufferEntry> {
        self.entries.remove(name)
    }

    /// Get the number of entries
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Get all registered names
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "uniform_buffer_registry_tests.rs"]
mod tests;

//! Uniform buffer registry module
//!
//! Maps logical uniform block names to GPU buffer objects so shader
//! programs can bind `#autoresolve` blocks after linking.

mod uniform_buffer_entry;
mod uniform_buffer_registry;

pub use uniform_buffer_entry::UniformBufferEntry;
pub use uniform_buffer_registry::UniformBufferRegistry;

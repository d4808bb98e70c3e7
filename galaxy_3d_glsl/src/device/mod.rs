/// Device module - the driver-side compile/link/bind collaborator

// Module declarations
pub mod glsl_device;

// Re-export everything from glsl_device.rs
pub use glsl_device::*;

// Mock device for tests (no GPU required)
#[cfg(test)]
pub mod mock_glsl_device;

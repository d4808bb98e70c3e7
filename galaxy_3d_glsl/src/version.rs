/// GLSL `#version` directive generation from the context version
///
/// Desktop GL numbering diverges from GLSL numbering before GL 3.3, so the
/// early versions are table-driven. Everything else concatenates digits.

/// Context profile reported by the graphics context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextProfile {
    /// Desktop OpenGL (core or compatibility)
    Desktop,
    /// OpenGL ES
    Es,
}

/// Version of the active graphics context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextVersion {
    pub major: u32,
    pub minor: u32,
    pub profile: ContextProfile,
}

impl ContextVersion {
    /// Desktop GL context version
    pub fn desktop(major: u32, minor: u32) -> Self {
        Self { major, minor, profile: ContextProfile::Desktop }
    }

    /// OpenGL ES context version
    pub fn es(major: u32, minor: u32) -> Self {
        Self { major, minor, profile: ContextProfile::Es }
    }

    /// Whether the context is OpenGL ES
    pub fn is_es(&self) -> bool {
        self.profile == ContextProfile::Es
    }

    /// `#version` line matching this context, newline-terminated
    pub fn version_directive(&self) -> String {
        version_directive(self.major, self.minor, self.is_es())
    }
}

/// Build the `#version` line for a context version
///
/// # Example
///
/// ```
/// use galaxy_3d_glsl::galaxy3d::version::version_directive;
///
/// assert_eq!(version_directive(3, 2, false), "#version 150\n");
/// assert_eq!(version_directive(3, 0, true), "#version 300 es\n");
/// ```
pub fn version_directive(major: u32, minor: u32, is_es: bool) -> String {
    if is_es {
        return format!("#version {}{}0 es\n", major, minor);
    }

    let number = match (major, minor) {
        (2, 0) => "110".to_string(),
        (2, 1) => "120".to_string(),
        (3, 0) => "130".to_string(),
        (3, 1) => "140".to_string(),
        (3, 2) => "150".to_string(),
        _ => format!("{}{}0", major, minor),
    };
    format!("#version {}\n", number)
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;

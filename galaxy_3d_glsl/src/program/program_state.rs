/// Lifecycle state of a ShaderProgram
///
/// One compile-link cycle moves forward only:
/// `Empty -> SourceLoaded -> Compiled -> (LinkFailed | Linked -> AutoresolveBound)`.
/// `CompileFailed` ends a cycle early; `remove_all_shaders()` returns to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    /// No shader added yet
    Empty,
    /// A stage has been preprocessed and is being compiled
    SourceLoaded,
    /// Every stage added so far compiled
    Compiled,
    /// The device rejected a stage
    CompileFailed,
    /// The device rejected the program at link time
    LinkFailed,
    /// Linked; autoresolve binding not done (nothing to bind, or binding failed)
    Linked,
    /// Linked and every autoresolve block bound
    AutoresolveBound,
}

impl ProgramState {
    /// A compile-link cycle is in progress
    pub fn is_cycle_open(&self) -> bool {
        matches!(self, ProgramState::SourceLoaded | ProgramState::Compiled | ProgramState::CompileFailed)
    }

    /// `link()` may be called
    pub fn can_link(&self) -> bool {
        matches!(
            self,
            ProgramState::Compiled
                | ProgramState::LinkFailed
                | ProgramState::Linked
                | ProgramState::AutoresolveBound
        )
    }

    /// The device holds a successfully linked program
    pub fn is_linked(&self) -> bool {
        matches!(self, ProgramState::Linked | ProgramState::AutoresolveBound)
    }
}

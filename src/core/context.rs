/// Which of the two known contexts a phase runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRole {
    /// The rasterizer's context (draw phase).
    Raster,
    /// The presentation context (upload and swap phase).
    Present,
}

/// Explicit tracker for the "current context" notion.
///
/// Context-current state is single-threaded and call-order-sensitive, so a
/// switch always clears the active context before activating the requested
/// one; a direct swap would leave the transition ambiguous between the two
/// handles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CurrentContext {
    active: Option<ContextRole>,
}

impl CurrentContext {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Clear-then-set switch; returns whether activation succeeded.
    pub fn make_current(&mut self, role: ContextRole) -> bool {
        self.clear();
        self.active = Some(role);
        self.active == Some(role)
    }

    /// Make no context current.
    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn current(&self) -> Option<ContextRole> {
        self.active
    }

    pub fn is_current(&self, role: ContextRole) -> bool {
        self.active == Some(role)
    }
}

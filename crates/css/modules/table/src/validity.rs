//! Single-entry cache of the inputs of the last full layout.

/// Inputs that determine a table's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInputs {
    pub container_width: i32,
    pub viewport_width: i32,
    pub shrink_wrap: bool,
}

/// Remembers whether the geometry from the last layout is still usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutValidity {
    last: Option<LayoutInputs>,
}

impl LayoutValidity {
    /// Check if `inputs` match the last completed layout.
    pub fn is_hit(&self, inputs: LayoutInputs) -> bool {
        self.last == Some(inputs)
    }

    /// Record a completed layout.
    pub const fn record(&mut self, inputs: LayoutInputs) {
        self.last = Some(inputs);
    }

    /// Forget the last layout; the next request recomputes.
    pub const fn invalidate(&mut self) {
        self.last = None;
    }

    /// Check if a layout has been recorded and not invalidated since.
    pub const fn is_valid(&self) -> bool {
        self.last.is_some()
    }
}

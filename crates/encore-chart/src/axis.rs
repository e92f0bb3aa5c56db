//! Axis types

/// Chart axis
#[derive(Debug, Clone, Default)]
pub struct Axis {
    /// Axis title
    pub title: Option<String>,
    /// Position
    pub position: AxisPosition,
}

impl Axis {
    /// Create a new axis
    pub fn new() -> Self {
        Self::default()
    }

    /// Set axis title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Axis position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisPosition {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

//! Event categories.

/// Canonical categories of decoded replay events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    StatSnapshot,
    Command,
    Selection,
    ControlGroup,
    GetControlGroup,
}

impl EventCategory {
    /// Tag of this category in serialized events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StatSnapshot => "player_stats",
            Self::Command => "command",
            Self::Selection => "selection",
            Self::ControlGroup => "control_group",
            Self::GetControlGroup => "get_control_group",
        }
    }
}

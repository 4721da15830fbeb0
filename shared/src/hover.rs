/// Per-marker popup/highlight state, driven by two named pointer events.
/// Kept independent of any rendering collaborator's event API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

impl HoverState {
    /// Returns `true` when the event actually changed the state.
    pub fn pointer_enter(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Hovered;
                true
            }
            Self::Hovered => false,
        }
    }

    pub fn pointer_leave(&mut self) -> bool {
        match self {
            Self::Hovered => {
                *self = Self::Idle;
                true
            }
            Self::Idle => false,
        }
    }

    pub fn is_hovered(self) -> bool {
        self == Self::Hovered
    }
}

use egui::Vec2;

/// Document-unique id of one press-move-release cycle.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub(super) struct SessionCounter {
    next_id: u64,
}

impl SessionCounter {
    pub(super) fn allocate(&mut self) -> SessionId {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        SessionId(id)
    }
}

/// State of one active drag. Exists only between the press on the handle and
/// the matching release; a controller without one is idle.
#[derive(Clone, Copy, Debug)]
pub(super) struct ActiveDrag {
    pub(super) id: SessionId,
    /// Fixed vector from the target's top-left corner to the press position,
    /// held constant for the whole session.
    pub(super) grab_offset: Vec2,
}

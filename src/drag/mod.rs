use std::collections::VecDeque;

use egui::{Pos2, Vec2};

mod error;
mod geometry;
mod integrity;
mod listeners;
mod options;
mod registry;
mod session;
mod style;
mod surface;

#[cfg(feature = "persistence")]
mod persistence;

#[cfg(test)]
mod controller_tests;

pub use error::BindError;
pub use integrity::document_integrity_issues;
pub use options::{DocumentOptions, DragOptions};
pub use registry::{Element, ElementId, ElementRegistry};
pub use session::SessionId;
pub use style::{Length, ParseLengthError, PositionStyle};

#[cfg(feature = "persistence")]
pub use persistence::{
    ElementPlacement, LAYOUT_SNAPSHOT_VERSION, LayoutPersistenceError, LayoutSnapshot,
};

use listeners::PointerListeners;
use session::{ActiveDrag, SessionCounter};

/// Slot of a bound controller within its [`Document`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ControllerId(usize);

/// Binds drag-to-move behavior to a (draggable, handle) element pair.
///
/// A controller is either idle or dragging. The session state is an explicit
/// optional field: present between the press on the handle and the matching
/// release, absent otherwise.
#[derive(Debug)]
pub struct DragController {
    target: ElementId,
    handle: ElementId,
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn target(&self) -> &ElementId {
        &self.target
    }

    pub fn handle(&self) -> &ElementId {
        &self.handle
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.active.map(|active| active.id)
    }

    /// The press-position-to-top-left vector of the active session, if any.
    pub fn grab_offset(&self) -> Option<Vec2> {
        self.active.map(|active| active.grab_offset)
    }
}

/// A surface's worth of positioned elements and the drag controllers bound to
/// them.
///
/// Pointer input enters through three dispatch points, in the order the host
/// event loop delivers them:
/// - [`Self::pointer_pressed`] (element scope): hit-tests bound handles.
/// - [`Self::pointer_moved`] (document scope): routed only to sessions that
///   subscribed on press.
/// - [`Self::pointer_released`] (document scope): ends subscribed sessions.
///
/// [`Self::ui`] feeds real egui input through the same three entry points.
#[derive(Debug)]
pub struct Document {
    pub options: DocumentOptions,

    elements: ElementRegistry,
    controllers: Vec<DragController>,
    listeners: PointerListeners,
    sessions: SessionCounter,
    surface_size: Vec2,

    debug_log: VecDeque<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::new_with_options(DocumentOptions::default())
    }

    pub fn new_with_options(options: DocumentOptions) -> Self {
        Self {
            options,
            elements: ElementRegistry::default(),
            controllers: Vec::new(),
            listeners: PointerListeners::default(),
            sessions: SessionCounter::default(),
            surface_size: Vec2::ZERO,
            debug_log: VecDeque::new(),
        }
    }

    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut ElementRegistry {
        &mut self.elements
    }

    pub fn controller(&self, id: ControllerId) -> Option<&DragController> {
        self.controllers.get(id.0)
    }

    pub fn controllers(&self) -> impl Iterator<Item = (ControllerId, &DragController)> {
        self.controllers
            .iter()
            .enumerate()
            .map(|(index, controller)| (ControllerId(index), controller))
    }

    /// True while any bound controller has an active drag session.
    pub fn any_dragging(&self) -> bool {
        self.controllers
            .iter()
            .any(|controller| controller.active.is_some())
    }

    /// The extent percent-valued styles resolve against. [`Self::ui`] keeps
    /// this in sync with the painted surface; headless callers set it
    /// themselves.
    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    pub fn set_surface_size(&mut self, size: Vec2) {
        self.surface_size = size;
    }

    /// Bind drag-to-move behavior: pressing the handle element and moving the
    /// pointer repositions the target element until the pointer is released.
    ///
    /// If `options` carries an initial `top`/`left`, those are written into
    /// the target's declared style and the target is repositioned before this
    /// returns; axes not supplied keep their current value.
    ///
    /// # Errors
    ///
    /// Fails fast with [`BindError`] if either id does not resolve; the
    /// document is left unchanged.
    pub fn bind_drag(
        &mut self,
        target: impl Into<ElementId>,
        handle: impl Into<ElementId>,
        options: DragOptions,
    ) -> Result<ControllerId, BindError> {
        let target = target.into();
        let handle = handle.into();

        if !self.elements.contains(&target) {
            return Err(BindError::UnknownTarget(target));
        }
        if !self.elements.contains(&handle) {
            return Err(BindError::UnknownHandle(handle));
        }

        if options.top.is_some() || options.left.is_some() {
            let surface_size = self.surface_size;
            if let Some(element) = self.elements.get_mut(&target) {
                if let Some(top) = options.top {
                    element.style_mut().top = Some(top);
                }
                if let Some(left) = options.left {
                    element.style_mut().left = Some(left);
                }
                let fallback = element.pos();
                let resolved = element.style().resolve(surface_size, fallback);
                element.set_pos(resolved);
            }
        }

        let id = ControllerId(self.controllers.len());
        self.controllers.push(DragController {
            target,
            handle,
            active: None,
        });
        Ok(id)
    }

    /// Element-scope press dispatch.
    ///
    /// Finds the front-most element under `pos`; if it is the handle of an
    /// idle controller, a session starts: the grab offset is computed from
    /// the target's current position and document-scope move/release
    /// subscriptions are registered under the new session id.
    ///
    /// Returns the started controller, or `None` if the press hit no bound
    /// handle (callers treat `Some` as consuming the event).
    pub fn pointer_pressed(&mut self, pos: Pos2) -> Option<ControllerId> {
        let hit = self.elements.top_most_at(pos)?.clone();
        let index = self
            .controllers
            .iter()
            .position(|controller| controller.handle == hit && controller.active.is_none())?;

        let target_pos = self.elements.get(&self.controllers[index].target)?.pos();
        let session = self.sessions.allocate();
        let offset = geometry::grab_offset(pos, target_pos);

        let controller_id = ControllerId(index);
        self.controllers[index].active = Some(ActiveDrag {
            id: session,
            grab_offset: offset,
        });
        self.listeners.subscribe(session, controller_id);

        log::debug!(
            "drag session {session} started: controller={index} target={:?} offset={offset:?}",
            self.controllers[index].target.as_str(),
        );
        self.debug_log_event(format!(
            "drag START id={session} controller={index} handle={:?}",
            hit.as_str()
        ));
        Some(controller_id)
    }

    /// Document-scope move dispatch: reposition the target of every
    /// subscribed session to `pointer − grab_offset`. Moves delivered while
    /// no subscription is registered are no-ops.
    pub fn pointer_moved(&mut self, pos: Pos2) {
        let rows: Vec<_> = self.listeners.move_rows().collect();
        for (session, controller_id) in rows {
            let Some(controller) = self.controllers.get(controller_id.0) else {
                continue;
            };
            let Some(active) = controller.active else {
                continue;
            };
            if active.id != session {
                continue;
            }

            let new_pos = geometry::dragged_position(pos, active.grab_offset);
            if let Some(element) = self.elements.get_mut(&controller.target) {
                element.set_pos(new_pos);
                element.style_mut().set_px(new_pos);
            }
        }
    }

    /// Document-scope release dispatch: ends every subscribed session and
    /// removes its move/release subscriptions. The release position plays no
    /// part in where the element ends up, so it is not taken here.
    pub fn pointer_released(&mut self) {
        let rows: Vec<_> = self.listeners.release_rows().collect();
        for (session, controller_id) in rows {
            self.listeners.unsubscribe(session);

            let ended = match self.controllers.get_mut(controller_id.0) {
                Some(controller) if controller.active.is_some_and(|a| a.id == session) => {
                    controller.active = None;
                    true
                }
                _ => false,
            };
            if ended {
                log::debug!("drag session {session} ended: controller={}", controller_id.0);
                self.debug_log_event(format!(
                    "drag END id={session} controller={}",
                    controller_id.0
                ));
            }
        }
    }

    /// Recorded drag lifecycle events, oldest first. Empty unless
    /// [`DocumentOptions::debug_event_log`] is on.
    pub fn debug_log(&self) -> impl Iterator<Item = &str> {
        self.debug_log.iter().map(String::as_str)
    }

    pub fn clear_debug_log(&mut self) {
        self.debug_log.clear();
    }

    fn debug_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(message);
    }
}

use egui::{CursorIcon, Pos2, Rect, Sense, Vec2};

use super::integrity::document_integrity_issues;
use super::registry::{Element, ElementId};
use super::{ControllerId, Document};

fn to_local(pos: Pos2, surface_rect: Rect) -> Pos2 {
    pos - surface_rect.min.to_vec2()
}

impl Document {
    /// Paint and drive the document inside `ui`'s available rect.
    ///
    /// Elements are painted back to front; `content` is called once per
    /// element with a child `Ui` clipped to the element's rect. Real pointer
    /// input is fed through the same dispatch entry points headless callers
    /// use: a primary-button press becomes [`Self::pointer_pressed`], pointer
    /// motion during a session becomes [`Self::pointer_moved`], and a button
    /// release becomes [`Self::pointer_released`].
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        mut content: impl FnMut(&mut egui::Ui, &ElementId, &Element),
    ) {
        let (surface_rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        self.set_surface_size(surface_rect.size());
        self.resolve_declared_styles();
        self.anchor_handles();

        let ctx = ui.ctx().clone();

        // Press, then motion, then release: the order the pointer stream
        // delivers them within a frame.
        let pressed = ctx.input(|i| i.pointer.primary_pressed());
        if pressed {
            if let Some(pos) = ctx.input(|i| i.pointer.interact_pos()) {
                if surface_rect.contains(pos) {
                    if let Some(controller_id) = self.pointer_pressed(to_local(pos, surface_rect)) {
                        self.raise_controller_elements(controller_id);
                    }
                }
            }
        }

        if self.any_dragging() {
            if let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) {
                self.pointer_moved(to_local(pos, surface_rect));
            }
            if ctx.input(|i| i.pointer.any_released()) {
                self.pointer_released();
            } else {
                ctx.set_cursor_icon(CursorIcon::Grabbing);
            }
            // Targets may have moved; re-pin their handles before painting.
            self.anchor_handles();
        }

        let handles: Vec<ElementId> = self
            .controllers()
            .map(|(_, controller)| controller.handle().clone())
            .collect();
        let dragging_handles: Vec<ElementId> = self
            .controllers()
            .filter(|(_, controller)| controller.is_dragging())
            .map(|(_, controller)| controller.handle().clone())
            .collect();

        let ids: Vec<ElementId> = self.elements().z_order().to_vec();
        for id in &ids {
            let Some(element) = self.elements().get(id) else {
                continue;
            };
            let rect = Rect::from_min_size(surface_rect.min + element.pos().to_vec2(), element.size());

            let visuals = ui.visuals();
            let is_handle = handles.contains(id);
            let fill = if dragging_handles.contains(id) {
                visuals.widgets.active.bg_fill
            } else if is_handle {
                visuals.widgets.inactive.bg_fill
            } else {
                visuals.window_fill()
            };
            ui.painter().rect_filled(rect, 4.0, fill);
            ui.painter().rect_stroke(
                rect,
                4.0,
                visuals.widgets.noninteractive.bg_stroke,
                egui::StrokeKind::Inside,
            );

            {
                let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect));
                child.set_clip_rect(child.clip_rect().intersect(rect));
                content(&mut child, id, element);
            }

            if is_handle {
                let response = ui.interact(
                    rect,
                    ui.id().with((id.as_str(), "drag_handle")),
                    Sense::click_and_drag(),
                );
                if response.hovered() && !self.any_dragging() {
                    ctx.set_cursor_icon(CursorIcon::Grab);
                }
            }
        }

        if self.options.debug_integrity {
            let issues = document_integrity_issues(self);
            for issue in &issues {
                log::warn!("{issue}");
            }
            if self.options.debug_integrity_panic {
                assert!(
                    issues.is_empty(),
                    "document integrity issues:\n{}",
                    issues.join("\n")
                );
            }
        }
    }

    /// Re-resolve declared styles so percent placements track surface
    /// resizes. Px styles resolve to themselves, so this is a no-op for
    /// elements positioned by dragging.
    fn resolve_declared_styles(&mut self) {
        let surface_size = self.surface_size();
        let ids: Vec<ElementId> = self.elements().z_order().to_vec();
        for id in &ids {
            if let Some(element) = self.elements_mut().get_mut(id) {
                if element.style().top.is_none() && element.style().left.is_none() {
                    continue;
                }
                let fallback = element.pos();
                let resolved = element.style().resolve(surface_size, fallback);
                element.set_pos(resolved);
            }
        }
    }

    /// Pin each distinct handle to the top strip of its target, the way a
    /// host page lays a header out inside its panel: same top-left, same
    /// width, the handle's own height.
    fn anchor_handles(&mut self) {
        let pairs: Vec<(ElementId, ElementId)> = self
            .controllers()
            .filter(|(_, controller)| controller.handle() != controller.target())
            .map(|(_, controller)| (controller.handle().clone(), controller.target().clone()))
            .collect();

        for (handle_id, target_id) in pairs {
            let Some(target) = self.elements().get(&target_id) else {
                continue;
            };
            let pos = target.pos();
            let width = target.size().x;
            if let Some(handle) = self.elements_mut().get_mut(&handle_id) {
                let height = handle.size().y;
                handle.set_pos(pos);
                handle.set_size(Vec2::new(width, height));
            }
        }
    }

    fn raise_controller_elements(&mut self, controller_id: ControllerId) {
        let Some(controller) = self.controller(controller_id) else {
            return;
        };
        let target = controller.target().clone();
        let handle = controller.handle().clone();
        self.elements_mut().bring_to_front(&target);
        if handle != target {
            // Keep the handle in front of the panel it drags.
            self.elements_mut().bring_to_front(&handle);
        }
    }
}

use egui::{Pos2, Vec2};

/// Vector from the element's top-left corner to the press position.
pub(super) fn grab_offset(press_pos: Pos2, element_pos: Pos2) -> Vec2 {
    press_pos - element_pos
}

/// Element top-left that keeps the grabbed point under the pointer.
pub(super) fn dragged_position(pointer_pos: Pos2, grab_offset: Vec2) -> Pos2 {
    pointer_pos - grab_offset
}

use egui::{Pos2, pos2, vec2};

use super::*;

fn assert_document_ok(document: &Document) {
    let issues = document_integrity_issues(document);
    assert!(
        issues.is_empty(),
        "document integrity failed:\n{}",
        issues.join("\n")
    );
}

fn panel_document() -> Document {
    let mut document = Document::new();
    document.set_surface_size(vec2(800.0, 600.0));
    document
        .elements_mut()
        .insert("panel", Element::new(pos2(100.0, 100.0), vec2(200.0, 150.0)));
    document
}

fn pos_of(document: &Document, id: &str) -> Pos2 {
    document
        .elements()
        .get(&ElementId::new(id))
        .expect("element registered")
        .pos()
}

#[test]
fn idle_document_ignores_moves_and_releases() {
    let mut document = panel_document();
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    document.pointer_moved(pos2(400.0, 400.0));
    document.pointer_released();
    document.pointer_moved(pos2(10.0, 10.0));

    assert_eq!(pos_of(&document, "panel"), pos2(100.0, 100.0));
    assert!(!document.any_dragging());
    assert_document_ok(&document);
}

#[test]
fn press_stores_press_minus_element_offset() {
    let mut document = panel_document();
    let controller_id = document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    let pressed = document.pointer_pressed(pos2(150.0, 150.0));
    assert_eq!(pressed, Some(controller_id));

    let controller = document.controller(controller_id).expect("bound");
    assert!(controller.is_dragging());
    assert_eq!(controller.grab_offset(), Some(vec2(50.0, 50.0)));
    assert_document_ok(&document);
}

#[test]
fn moves_keep_the_grabbed_point_under_the_pointer() {
    let mut document = panel_document();
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    document.pointer_pressed(pos2(150.0, 150.0));
    for target in [pos2(170.0, 160.0), pos2(90.0, 340.0), pos2(150.0, 150.0)] {
        document.pointer_moved(target);
        assert_eq!(pos_of(&document, "panel"), target - vec2(50.0, 50.0));
        assert_document_ok(&document);
    }
}

#[test]
fn drag_scenario_press_move_release_then_moves_are_inert() {
    let mut document = panel_document();
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    document.pointer_pressed(pos2(150.0, 150.0));
    document.pointer_moved(pos2(170.0, 160.0));
    assert_eq!(pos_of(&document, "panel"), pos2(120.0, 110.0));

    // The moved position is also written back into the declared style in px.
    let panel = document
        .elements()
        .get(&ElementId::new("panel"))
        .expect("panel registered");
    assert_eq!(panel.style().top, Some(Length::Px(110.0)));
    assert_eq!(panel.style().left, Some(Length::Px(120.0)));

    document.pointer_released();
    document.pointer_moved(pos2(200.0, 200.0));
    assert_eq!(pos_of(&document, "panel"), pos2(120.0, 110.0));
    assert_document_ok(&document);
}

#[test]
fn bind_applies_initial_placement_verbatim() {
    let mut document = panel_document();
    let options = DragOptions::from_style_strings(Some("50px"), Some("100px"))
        .expect("both strings are valid lengths");
    document
        .bind_drag("panel", "panel", options)
        .expect("panel is registered");

    assert_eq!(pos_of(&document, "panel"), pos2(100.0, 50.0));
    let panel = document
        .elements()
        .get(&ElementId::new("panel"))
        .expect("panel registered");
    let top = panel.style().top.expect("top declared");
    let left = panel.style().left.expect("left declared");
    assert_eq!(top.to_string(), "50px");
    assert_eq!(left.to_string(), "100px");
}

#[test]
fn bind_with_percent_placement_resolves_against_the_surface() {
    let mut document = panel_document();
    let options = DragOptions::from_style_strings(Some("50%"), Some("25%"))
        .expect("both strings are valid lengths");
    document
        .bind_drag("panel", "panel", options)
        .expect("panel is registered");

    assert_eq!(pos_of(&document, "panel"), pos2(200.0, 300.0));
}

#[test]
fn bind_without_options_leaves_position_untouched() {
    let mut document = panel_document();
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    assert_eq!(pos_of(&document, "panel"), pos2(100.0, 100.0));
    let panel = document
        .elements()
        .get(&ElementId::new("panel"))
        .expect("panel registered");
    assert_eq!(panel.style(), &PositionStyle::default());
}

#[test]
fn second_session_behaves_like_the_first() {
    let mut document = panel_document();
    let controller_id = document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    document.pointer_pressed(pos2(150.0, 150.0));
    let first_session = document
        .controller(controller_id)
        .and_then(DragController::session_id)
        .expect("dragging");
    document.pointer_moved(pos2(250.0, 250.0));
    document.pointer_released();
    assert_eq!(pos_of(&document, "panel"), pos2(200.0, 200.0));

    // Same press offset relative to the new position, fresh session id.
    document.pointer_pressed(pos2(250.0, 250.0));
    let second_session = document
        .controller(controller_id)
        .and_then(DragController::session_id)
        .expect("dragging again");
    assert_ne!(first_session, second_session);

    document.pointer_moved(pos2(270.0, 260.0));
    assert_eq!(pos_of(&document, "panel"), pos2(220.0, 210.0));
    document.pointer_released();
    assert!(!document.any_dragging());
    assert_document_ok(&document);
}

#[test]
fn release_without_session_and_double_release_are_no_ops() {
    let mut document = panel_document();
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    document.pointer_released();
    document.pointer_pressed(pos2(150.0, 150.0));
    document.pointer_released();
    document.pointer_released();

    assert!(!document.any_dragging());
    assert_document_ok(&document);
}

#[test]
fn bind_fails_fast_on_unknown_ids() {
    let mut document = panel_document();

    let err = document
        .bind_drag("ghost", "panel", DragOptions::default())
        .expect_err("target does not resolve");
    assert_eq!(err, BindError::UnknownTarget(ElementId::new("ghost")));

    let err = document
        .bind_drag("panel", "ghost", DragOptions::default())
        .expect_err("handle does not resolve");
    assert_eq!(err, BindError::UnknownHandle(ElementId::new("ghost")));

    assert_eq!(document.controllers().count(), 0);
    assert_eq!(pos_of(&document, "panel"), pos2(100.0, 100.0));
    assert_document_ok(&document);
}

#[test]
fn press_outside_any_handle_is_ignored() {
    let mut document = panel_document();
    document
        .elements_mut()
        .insert("decoration", Element::new(pos2(500.0, 500.0), vec2(50.0, 50.0)));
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    // Empty surface and a registered-but-unbound element both refuse.
    assert_eq!(document.pointer_pressed(pos2(700.0, 10.0)), None);
    assert_eq!(document.pointer_pressed(pos2(510.0, 510.0)), None);
    assert!(!document.any_dragging());
}

#[test]
fn separate_handle_element_drags_its_target() {
    let mut document = panel_document();
    document
        .elements_mut()
        .insert("panel_title", Element::new(pos2(100.0, 100.0), vec2(200.0, 24.0)));
    document
        .bind_drag("panel", "panel_title", DragOptions::default())
        .expect("both ids are registered");

    // Press lands on the title strip; it is in front of the panel, so it
    // wins the hit-test even though both rects contain the point.
    document.pointer_pressed(pos2(150.0, 110.0));
    document.pointer_moved(pos2(180.0, 140.0));

    // Offset was computed against the target's corner, not the handle's.
    assert_eq!(pos_of(&document, "panel"), pos2(130.0, 130.0));
    assert_document_ok(&document);
}

#[test]
fn interleaved_sessions_do_not_clobber_each_other() {
    let mut document = Document::new();
    document.set_surface_size(vec2(800.0, 600.0));
    document
        .elements_mut()
        .insert("a", Element::new(pos2(0.0, 0.0), vec2(100.0, 100.0)));
    document
        .elements_mut()
        .insert("b", Element::new(pos2(300.0, 300.0), vec2(100.0, 100.0)));
    let a = document
        .bind_drag("a", "a", DragOptions::default())
        .expect("a is registered");
    let b = document
        .bind_drag("b", "b", DragOptions::default())
        .expect("b is registered");

    document.pointer_pressed(pos2(10.0, 10.0));
    assert!(document.controller(a).is_some_and(DragController::is_dragging));

    // Starting a second session must leave the first one subscribed.
    document.pointer_pressed(pos2(310.0, 310.0));
    assert!(document.controller(a).is_some_and(DragController::is_dragging));
    assert!(document.controller(b).is_some_and(DragController::is_dragging));
    assert_document_ok(&document);

    // One document-level move reaches both sessions, each through its own
    // grab offset.
    document.pointer_moved(pos2(200.0, 200.0));
    assert_eq!(pos_of(&document, "a"), pos2(190.0, 190.0));
    assert_eq!(pos_of(&document, "b"), pos2(190.0, 190.0));

    document.pointer_released();
    assert!(!document.any_dragging());
    document.pointer_moved(pos2(400.0, 400.0));
    assert_eq!(pos_of(&document, "a"), pos2(190.0, 190.0));
    assert_document_ok(&document);
}

#[test]
fn overlapping_handles_front_most_wins() {
    let mut document = Document::new();
    document.set_surface_size(vec2(800.0, 600.0));
    document
        .elements_mut()
        .insert("back", Element::new(pos2(0.0, 0.0), vec2(100.0, 100.0)));
    document
        .elements_mut()
        .insert("front", Element::new(pos2(50.0, 50.0), vec2(100.0, 100.0)));
    document
        .bind_drag("back", "back", DragOptions::default())
        .expect("back is registered");
    let front = document
        .bind_drag("front", "front", DragOptions::default())
        .expect("front is registered");

    let pressed = document.pointer_pressed(pos2(75.0, 75.0));
    assert_eq!(pressed, Some(front));

    document.pointer_moved(pos2(85.0, 75.0));
    assert_eq!(pos_of(&document, "front"), pos2(60.0, 50.0));
    assert_eq!(pos_of(&document, "back"), pos2(0.0, 0.0));
}

#[test]
fn debug_event_log_records_session_lifecycle() {
    let mut document = Document::new_with_options(DocumentOptions {
        debug_event_log: true,
        ..Default::default()
    });
    document.set_surface_size(vec2(800.0, 600.0));
    document
        .elements_mut()
        .insert("panel", Element::new(pos2(100.0, 100.0), vec2(200.0, 150.0)));
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    document.pointer_pressed(pos2(150.0, 150.0));
    document.pointer_moved(pos2(170.0, 160.0));
    document.pointer_released();

    let lines: Vec<&str> = document.debug_log().collect();
    assert_eq!(lines.len(), 2, "one START and one END, moves are not logged");
    assert!(lines[0].starts_with("drag START id=1"), "got {:?}", lines[0]);
    assert!(lines[1].starts_with("drag END id=1"), "got {:?}", lines[1]);

    document.clear_debug_log();
    assert_eq!(document.debug_log().count(), 0);
}

#[test]
fn debug_event_log_is_a_bounded_ring() {
    let mut document = Document::new_with_options(DocumentOptions {
        debug_event_log: true,
        debug_event_log_capacity: 2,
        ..Default::default()
    });
    document.set_surface_size(vec2(800.0, 600.0));
    document
        .elements_mut()
        .insert("panel", Element::new(pos2(100.0, 100.0), vec2(200.0, 150.0)));
    document
        .bind_drag("panel", "panel", DragOptions::default())
        .expect("panel is registered");

    for _ in 0..3 {
        document.pointer_pressed(pos2(150.0, 150.0));
        document.pointer_released();
        // Elements never move here, so the press point keeps hitting.
    }

    let lines: Vec<&str> = document.debug_log().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("drag START id=3"), "got {:?}", lines[0]);
    assert!(lines[1].starts_with("drag END id=3"), "got {:?}", lines[1]);
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0x5EED_BA11_5EED_BA11)
    }

    fn next_u64(&mut self) -> u64 {
        // Simple LCG: deterministic, fast, no dependency.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005u64)
            .wrapping_add(1442695040888963407u64);
        self.0
    }

    fn next_usize(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }

    fn next_coord(&mut self, upper: f32) -> f32 {
        (self.next_usize(upper as usize)) as f32
    }
}

#[test]
fn scripted_random_sessions_stay_integrity_ok() {
    for seed in 1u64..=12u64 {
        let mut rng = Rng::new(seed);

        let mut document = Document::new();
        document.set_surface_size(vec2(800.0, 600.0));
        let mut next_panel = 0usize;
        let mut panel_ids: Vec<String> = Vec::new();

        for _ in 0..4 {
            let id = format!("panel_{next_panel}");
            next_panel += 1;
            let pos = pos2(rng.next_coord(600.0), rng.next_coord(400.0));
            document
                .elements_mut()
                .insert(id.as_str(), Element::new(pos, vec2(120.0, 90.0)));
            document
                .bind_drag(id.as_str(), id.as_str(), DragOptions::default())
                .expect("panel was just registered");
            panel_ids.push(id);
        }

        for _step in 0..400 {
            let point = pos2(rng.next_coord(800.0), rng.next_coord(600.0));
            match rng.next_usize(10) {
                0 | 1 | 2 => {
                    document.pointer_pressed(point);
                }
                3 | 4 | 5 | 6 => document.pointer_moved(point),
                7 | 8 => document.pointer_released(),
                9 => {
                    if rng.next_usize(4) == 0 {
                        let id = format!("panel_{next_panel}");
                        next_panel += 1;
                        document
                            .elements_mut()
                            .insert(id.as_str(), Element::new(point, vec2(120.0, 90.0)));
                        document
                            .bind_drag(id.as_str(), id.as_str(), DragOptions::default())
                            .expect("panel was just registered");
                        panel_ids.push(id);
                    } else {
                        let id = &panel_ids[rng.next_usize(panel_ids.len())];
                        document.elements_mut().bring_to_front(&ElementId::new(id.as_str()));
                    }
                }
                _ => unreachable!("next_usize(10) stays below 10"),
            }

            assert_document_ok(&document);
        }

        document.pointer_released();
        assert!(!document.any_dragging());
        assert_document_ok(&document);
    }
}

use itertools::Itertools as _;

use super::Document;

/// Cross-module invariant check for a [`Document`].
///
/// Returns human-readable issue lines; empty means healthy. Cheap enough to
/// run after every scripted step in tests, or once per frame behind
/// [`super::DocumentOptions::debug_integrity`].
pub fn document_integrity_issues(document: &Document) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    // Registry map and z-order must agree.
    if document.elements.len() != document.elements.z_order().len() {
        issues.push(format!(
            "integrity: registry map has {} elements but z-order has {}",
            document.elements.len(),
            document.elements.z_order().len()
        ));
    }
    for id in document.elements.z_order() {
        if document.elements.get(id).is_none() {
            issues.push(format!(
                "integrity: z-order id {:?} missing from registry",
                id.as_str()
            ));
        }
    }
    for id in document.elements.z_order().iter().duplicates() {
        issues.push(format!("integrity: duplicate z-order id {:?}", id.as_str()));
    }

    // Every bound controller must still resolve, and a dragging controller
    // must own exactly its move and release subscription rows.
    for (index, controller) in document.controllers.iter().enumerate() {
        if document.elements.get(&controller.target).is_none() {
            issues.push(format!(
                "integrity: controller {index} target {:?} unregistered",
                controller.target.as_str()
            ));
        }
        if document.elements.get(&controller.handle).is_none() {
            issues.push(format!(
                "integrity: controller {index} handle {:?} unregistered",
                controller.handle.as_str()
            ));
        }
        if let Some(active) = controller.active {
            if !document.listeners.has_move(active.id) {
                issues.push(format!(
                    "integrity: controller {index} dragging session {} without a move subscription",
                    active.id
                ));
            }
            if !document.listeners.has_release(active.id) {
                issues.push(format!(
                    "integrity: controller {index} dragging session {} without a release subscription",
                    active.id
                ));
            }
        }
    }

    // Every subscription row must point back at a live, matching session.
    let rows = document
        .listeners
        .move_rows()
        .map(|row| ("move", row))
        .chain(document.listeners.release_rows().map(|row| ("release", row)));
    for (kind, (session, controller_id)) in rows {
        match document.controller(controller_id) {
            None => issues.push(format!(
                "integrity: {kind} row for session {session} points at missing controller"
            )),
            Some(controller) => {
                if !controller
                    .session_id()
                    .is_some_and(|active| active == session)
                {
                    issues.push(format!(
                        "integrity: stale {kind} row for session {session} (controller is not in that session)"
                    ));
                }
            }
        }
    }

    issues
}

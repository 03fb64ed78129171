#![forbid(unsafe_code)]
//! Drag-to-move panels for egui: bind a handle element to a draggable
//! element and let the pointer reposition it.

pub mod drag;

pub use drag::{
    BindError, ControllerId, Document, DocumentOptions, DragController, DragOptions, Element,
    ElementId, ElementRegistry, Length, ParseLengthError, PositionStyle, SessionId,
    document_integrity_issues,
};

#[cfg(feature = "persistence")]
pub use drag::{ElementPlacement, LAYOUT_SNAPSHOT_VERSION, LayoutPersistenceError, LayoutSnapshot};

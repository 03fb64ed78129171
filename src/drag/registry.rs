use ahash::HashMap;
use egui::{Pos2, Rect, Vec2};

use super::style::PositionStyle;

/// Document-scoped name an element is registered and looked up under.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One positioned panel inside a [`super::Document`].
///
/// `pos` is the resolved top-left corner in points, relative to the surface
/// the document is shown in. The declared [`PositionStyle`] is kept verbatim
/// alongside it, so callers can always read back exactly the configured
/// `top`/`left` values.
#[derive(Clone, Debug)]
pub struct Element {
    pos: Pos2,
    size: Vec2,
    style: PositionStyle,
}

impl Element {
    pub fn new(pos: Pos2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            style: PositionStyle::default(),
        }
    }

    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    /// The declared `top`/`left` position, exactly as last configured.
    pub fn style(&self) -> &PositionStyle {
        &self.style
    }

    pub(super) fn set_pos(&mut self, pos: Pos2) {
        self.pos = pos;
    }

    pub(super) fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub(super) fn style_mut(&mut self) -> &mut PositionStyle {
        &mut self.style
    }
}

/// Id → element map plus a back-to-front z-order.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: HashMap<ElementId, Element>,
    z_order: Vec<ElementId>,
}

impl ElementRegistry {
    /// Register `element` under `id`, replacing any previous element with
    /// that id, and put it at the front of the z-order.
    pub fn insert(&mut self, id: impl Into<ElementId>, element: Element) {
        let id = id.into();
        self.z_order.retain(|existing| *existing != id);
        self.elements.insert(id.clone(), element);
        self.z_order.push(id);
    }

    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        self.z_order.retain(|existing| existing != id);
        self.elements.remove(id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn bring_to_front(&mut self, id: &ElementId) {
        if !self.elements.contains_key(id) {
            return;
        }
        self.z_order.retain(|existing| existing != id);
        self.z_order.push(id.clone());
    }

    /// Registered ids, back to front.
    pub fn z_order(&self) -> &[ElementId] {
        &self.z_order
    }

    pub fn iter_back_to_front(&self) -> impl Iterator<Item = (&ElementId, &Element)> {
        self.z_order
            .iter()
            .filter_map(|id| self.elements.get(id).map(|element| (id, element)))
    }

    /// The front-most element whose rect contains `pos`.
    pub fn top_most_at(&self, pos: Pos2) -> Option<&ElementId> {
        self.z_order.iter().rev().find(|id| {
            self.elements
                .get(*id)
                .is_some_and(|element| element.rect().contains(pos))
        })
    }
}

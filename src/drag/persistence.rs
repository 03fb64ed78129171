use std::path::Path;

use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

use super::Document;
use super::registry::ElementId;
use super::style::Length;

pub const LAYOUT_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum LayoutPersistenceError {
    UnsupportedVersion { found: u32, expected: u32 },
    RonSerialize(ron::Error),
    RonDeserialize(ron::error::SpannedError),
    Io(std::io::Error),
}

impl std::fmt::Display for LayoutPersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported layout snapshot version: {found} (expected {expected})"
                )
            }
            Self::RonSerialize(err) => write!(f, "ron serialize error: {err}"),
            Self::RonDeserialize(err) => write!(f, "ron deserialize error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for LayoutPersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion { .. } => None,
            Self::RonSerialize(err) => Some(err),
            Self::RonDeserialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LayoutPersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ron::Error> for LayoutPersistenceError {
    fn from(err: ron::Error) -> Self {
        Self::RonSerialize(err)
    }
}

impl From<ron::error::SpannedError> for LayoutPersistenceError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::RonDeserialize(err)
    }
}

/// Declared placement of one element.
///
/// Axes the element never declared are captured as the current resolved
/// position in px, so applying a snapshot always lands every listed element
/// somewhere definite.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ElementPlacement {
    pub id: String,
    pub top: Length,
    pub left: Length,
}

/// Versioned capture of every registered element's placement.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub version: u32,
    pub elements: Vec<ElementPlacement>,
}

impl LayoutSnapshot {
    /// Capture the placement of every registered element, ordered by id so
    /// the serialized form is deterministic.
    pub fn capture(document: &Document) -> Self {
        let elements = document
            .elements()
            .iter_back_to_front()
            .map(|(id, element)| {
                let style = element.style();
                ElementPlacement {
                    id: id.as_str().to_owned(),
                    top: style.top.unwrap_or(Length::Px(element.pos().y)),
                    left: style.left.unwrap_or(Length::Px(element.pos().x)),
                }
            })
            .sorted_by(|a, b| a.id.cmp(&b.id))
            .collect();

        Self {
            version: LAYOUT_SNAPSHOT_VERSION,
            elements,
        }
    }

    /// Re-apply captured placements to `document`.
    ///
    /// Placements whose id is no longer registered are skipped; registered
    /// elements missing from the snapshot keep their position.
    ///
    /// # Errors
    ///
    /// [`LayoutPersistenceError::UnsupportedVersion`] if the snapshot was
    /// written by an incompatible version.
    pub fn apply(&self, document: &mut Document) -> Result<(), LayoutPersistenceError> {
        if self.version != LAYOUT_SNAPSHOT_VERSION {
            return Err(LayoutPersistenceError::UnsupportedVersion {
                found: self.version,
                expected: LAYOUT_SNAPSHOT_VERSION,
            });
        }

        let surface_size = document.surface_size();
        for placement in &self.elements {
            let id = ElementId::new(placement.id.as_str());
            if let Some(element) = document.elements_mut().get_mut(&id) {
                element.style_mut().top = Some(placement.top);
                element.style_mut().left = Some(placement.left);
                let fallback = element.pos();
                let resolved = element.style().resolve(surface_size, fallback);
                element.set_pos(resolved);
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`LayoutPersistenceError::RonSerialize`] on serialization failure.
    pub fn to_ron_string(&self) -> Result<String, LayoutPersistenceError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(Into::into)
    }

    /// # Errors
    ///
    /// [`LayoutPersistenceError::RonDeserialize`] on malformed input, or
    /// `UnsupportedVersion` for snapshots from an incompatible version.
    pub fn from_ron_str(text: &str) -> Result<Self, LayoutPersistenceError> {
        let snapshot: Self = ron::from_str(text)?;
        if snapshot.version != LAYOUT_SNAPSHOT_VERSION {
            return Err(LayoutPersistenceError::UnsupportedVersion {
                found: snapshot.version,
                expected: LAYOUT_SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    /// # Errors
    ///
    /// Serialization or io failure, as the matching variant.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LayoutPersistenceError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Io, deserialization, or version failure, as the matching variant.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LayoutPersistenceError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

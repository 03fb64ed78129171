use super::registry::ElementId;

/// Why [`super::Document::bind_drag`] refused to bind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BindError {
    /// No element is registered under the draggable element's id.
    UnknownTarget(ElementId),
    /// No element is registered under the handle element's id.
    UnknownHandle(ElementId),
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTarget(id) => {
                write!(f, "no element registered under draggable id {:?}", id.as_str())
            }
            Self::UnknownHandle(id) => {
                write!(f, "no element registered under handle id {:?}", id.as_str())
            }
        }
    }
}

impl std::error::Error for BindError {}

use std::str::FromStr;

use egui::{Pos2, Vec2};

/// A positional style value, written the way a layout config would spell it:
/// `"50px"`, `"12.5%"`, or a bare number (coerced to px).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Concrete coordinate in points; percentages resolve against `extent`.
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Px(value) => value,
            Self::Percent(value) => extent * value / 100.0,
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Px(value) => write!(f, "{value}px"),
            Self::Percent(value) => write!(f, "{value}%"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseLengthError {
    input: String,
}

impl std::fmt::Display for ParseLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "not a recognized length: {:?} (expected e.g. \"50px\" or \"25%\")",
            self.input
        )
    }
}

impl std::error::Error for ParseLengthError {}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseLengthError {
            input: s.to_owned(),
        };

        let trimmed = s.trim();
        let (raw, ctor): (&str, fn(f32) -> Self) = if let Some(raw) = trimmed.strip_suffix("px") {
            (raw, Self::Px)
        } else if let Some(raw) = trimmed.strip_suffix('%') {
            (raw, Self::Percent)
        } else {
            (trimmed, Self::Px)
        };

        let Ok(value) = raw.trim().parse::<f32>() else {
            return Err(error());
        };
        if !value.is_finite() {
            return Err(error());
        }
        Ok(ctor(value))
    }
}

/// Declared `top`/`left` position of an element.
///
/// Kept verbatim next to the element's resolved position so callers can
/// observe exactly the values that were configured.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionStyle {
    pub top: Option<Length>,
    pub left: Option<Length>,
}

impl PositionStyle {
    /// Concrete top-left in points. Percentages resolve against
    /// `surface_size`; axes without a declared value keep `fallback`.
    pub fn resolve(&self, surface_size: Vec2, fallback: Pos2) -> Pos2 {
        Pos2::new(
            self.left
                .map_or(fallback.x, |left| left.resolve(surface_size.x)),
            self.top.map_or(fallback.y, |top| top.resolve(surface_size.y)),
        )
    }

    /// Overwrite both axes with concrete px values (what a move does).
    pub(super) fn set_px(&mut self, pos: Pos2) {
        self.top = Some(Length::Px(pos.y));
        self.left = Some(Length::Px(pos.x));
    }
}

//! Geometry and computed-style inputs for table layout.
//!
//! Spec: CSS 2.1 §17 Tables, §10.3 widths
//! <https://www.w3.org/TR/CSS21/tables.html>

use serde::{Deserialize, Serialize};

/// Border-box rectangle in integer pixels, relative to the table's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl LayoutRect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (`y + height`).
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Right edge (`x + width`).
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }
}

/// Outer size reported by a full layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSize {
    pub width: i32,
    pub height: i32,
}

/// Computed `display` of an element, as far as table layout cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDisplay {
    /// `display: table-row`
    Row,
    /// `display: table-cell`
    Cell,
    /// Anything else; searched recursively for rows and cells.
    Other,
}

/// A computed length that may still depend on the containing block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Length {
    /// Absolute length in pixels.
    Px(i32),
    /// Percentage of the containing block width (`50.0` means 50%).
    Percent(f32),
    /// `auto`
    #[default]
    Auto,
}

impl Length {
    /// Resolve against the containing block width. `auto` resolves to 0.
    pub fn resolve(self, basis: i32) -> i32 {
        match self {
            Self::Px(pixels) => pixels,
            Self::Percent(percent) => (basis as f32 * percent / 100.0) as i32,
            Self::Auto => 0,
        }
    }

    /// Check if this length is `auto`.
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Four-sided values (margins, padding, border widths).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Edges<T> {
    /// Same value on every side.
    pub const fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Computed style of the table box itself.
///
/// Cells carry their own width information through [`crate::LayoutBox`];
/// this only describes the outer table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub margin: Edges<Length>,
    pub padding: Edges<Length>,
    pub border: Edges<Length>,
    /// `width` of the table; `auto` lets content decide.
    pub width: Length,
}

impl Default for TableStyle {
    /// Zero margins, padding and borders; `width: auto`.
    fn default() -> Self {
        Self {
            margin: Edges::all(Length::Px(0)),
            padding: Edges::all(Length::Px(0)),
            border: Edges::all(Length::Px(0)),
            width: Length::Auto,
        }
    }
}

impl TableStyle {
    /// Whether the table width is pinned (a length or a percentage).
    pub const fn has_fixed_width(&self) -> bool {
        !self.width.is_auto()
    }

    /// Whether both horizontal margins are `auto` (centered table).
    pub const fn is_centered(&self) -> bool {
        self.margin.left.is_auto() && self.margin.right.is_auto()
    }

    /// Resolve margins, borders and padding against the container width.
    pub fn frame(&self, container_width: i32) -> TableFrame {
        let side = |margin: Length, padding: Length, border: Length| {
            margin.resolve(container_width)
                + padding.resolve(container_width)
                + border.resolve(container_width)
        };
        TableFrame {
            left: side(self.margin.left, self.padding.left, self.border.left),
            right: side(self.margin.right, self.padding.right, self.border.right),
            top: side(self.margin.top, self.padding.top, self.border.top),
            bottom: side(
                self.margin.bottom,
                self.padding.bottom,
                self.border.bottom,
            ),
            margin_left: self.margin.left.resolve(container_width),
            margin_right: self.margin.right.resolve(container_width),
        }
    }
}

/// Resolved space around the table content, per side.
///
/// `left`/`right`/`top`/`bottom` are margin + padding + border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableFrame {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    pub margin_left: i32,
    pub margin_right: i32,
}

impl TableFrame {
    /// Total horizontal frame.
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }
}

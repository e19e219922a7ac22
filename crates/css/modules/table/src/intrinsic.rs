//! Leaf boxes with known intrinsic widths.

use serde::{Deserialize, Serialize};

use crate::box_metrics::LayoutBox;
use crate::types::{LayoutRect, Length};

/// How an [`IntrinsicBox`] derives its height from the width it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightModel {
    /// Same height at every width.
    Fixed(i32),
    /// Content of `max_width` pixels wraps into lines of `line_height`.
    Wrapped { line_height: i32 },
}

impl Default for HeightModel {
    fn default() -> Self {
        Self::Fixed(0)
    }
}

/// Content box with fixed intrinsic widths.
///
/// Stands in for a cell's contents when no richer layout engine is attached.
/// Geometry assigned by the table is recorded and can be read back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrinsicBox {
    pub min_width: i32,
    pub max_width: i32,
    /// The box's own `width`; `Px` makes it fixed.
    pub width: Length,
    pub height: HeightModel,
    #[serde(skip)]
    geometry: LayoutRect,
    #[serde(skip)]
    stretched_by: i32,
    #[serde(skip)]
    layout_count: usize,
}

impl IntrinsicBox {
    /// Box with the given intrinsic widths that wraps into lines.
    pub fn wrapped(min_width: i32, max_width: i32, line_height: i32) -> Self {
        Self {
            min_width,
            max_width,
            height: HeightModel::Wrapped { line_height },
            ..Self::default()
        }
    }

    /// Box with the given intrinsic widths and a constant height.
    pub fn fixed_height(min_width: i32, max_width: i32, height: i32) -> Self {
        Self {
            min_width,
            max_width,
            height: HeightModel::Fixed(height),
            ..Self::default()
        }
    }

    /// Set the box's own `width`.
    #[must_use]
    pub const fn with_width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    /// Geometry last assigned by the table.
    pub const fn geometry(&self) -> LayoutRect {
        self.geometry
    }

    /// Total vertical stretch applied after layout.
    pub const fn stretched_by(&self) -> i32 {
        self.stretched_by
    }

    /// Number of times the box has been laid out.
    pub const fn layout_count(&self) -> usize {
        self.layout_count
    }

    fn height_at(&self, width: i32) -> i32 {
        match self.height {
            HeightModel::Fixed(height) => height.max(0),
            HeightModel::Wrapped { line_height } => {
                if self.max_width <= 0 {
                    return 0;
                }
                let line_width = width.max(self.min_width).max(1);
                let lines = (self.max_width + line_width - 1) / line_width;
                lines * line_height.max(0)
            }
        }
    }
}

impl LayoutBox for IntrinsicBox {
    fn minimum_width(&self, _available_width: i32) -> i32 {
        self.min_width.max(0)
    }

    fn specified_width(&self, available_width: i32) -> i32 {
        self.width.resolve(available_width).max(0)
    }

    fn maximum_width(&self, _available_width: i32) -> i32 {
        self.max_width.max(0)
    }

    fn has_fixed_width(&self) -> bool {
        matches!(self.width, Length::Px(_))
    }

    fn layout_at(&mut self, width: i32, _viewport_width: i32) -> i32 {
        self.layout_count += 1;
        self.stretched_by = 0;
        self.height_at(width)
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.geometry.x = x;
        self.geometry.y = y;
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.geometry.width = width;
        self.geometry.height = height;
    }

    fn adjust_vertical_positions(&mut self, delta: i32) {
        self.stretched_by += delta;
    }
}

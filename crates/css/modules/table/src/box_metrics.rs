//! Capability interfaces the table engine consumes.
//!
//! The engine never looks at concrete box kinds. Cells and rows are anything
//! implementing [`LayoutBox`]; the element tree the table is built from is
//! anything implementing [`TableElement`].

use crate::types::TableDisplay;

/// A box that can report intrinsic widths and lay itself out.
///
/// Width queries take the width available to the table's columns, so
/// percentage-based cell widths can resolve against it.
pub trait LayoutBox {
    /// Narrowest width the content can take without overflowing.
    fn minimum_width(&self, available_width: i32) -> i32;

    /// Width requested through the box's own style, or 0 when unspecified.
    fn specified_width(&self, available_width: i32) -> i32;

    /// Width the content takes when nothing wraps.
    fn maximum_width(&self, available_width: i32) -> i32;

    /// Whether the box has an explicitly fixed (non-percentage) width.
    fn has_fixed_width(&self) -> bool;

    /// Lay out at `width` and return the resulting border-box height.
    fn layout_at(&mut self, width: i32, viewport_width: i32) -> i32;

    /// Final position relative to the table.
    fn set_position(&mut self, x: i32, y: i32);

    /// Final border-box size.
    fn set_size(&mut self, width: i32, height: i32);

    /// Called before a cell is stretched by `delta` pixels to fill its rows,
    /// so content can shift for vertical alignment.
    fn adjust_vertical_positions(&mut self, _delta: i32) {}
}

impl<T: LayoutBox + ?Sized> LayoutBox for Box<T> {
    fn minimum_width(&self, available_width: i32) -> i32 {
        (**self).minimum_width(available_width)
    }

    fn specified_width(&self, available_width: i32) -> i32 {
        (**self).specified_width(available_width)
    }

    fn maximum_width(&self, available_width: i32) -> i32 {
        (**self).maximum_width(available_width)
    }

    fn has_fixed_width(&self) -> bool {
        (**self).has_fixed_width()
    }

    fn layout_at(&mut self, width: i32, viewport_width: i32) -> i32 {
        (**self).layout_at(width, viewport_width)
    }

    fn set_position(&mut self, x: i32, y: i32) {
        (**self).set_position(x, y);
    }

    fn set_size(&mut self, width: i32, height: i32) {
        (**self).set_size(width, height);
    }

    fn adjust_vertical_positions(&mut self, delta: i32) {
        (**self).adjust_vertical_positions(delta);
    }
}

/// An element of the source tree the table is built from.
pub trait TableElement {
    /// Box type created for rows and cells.
    type Box: LayoutBox;

    /// Computed display of this element.
    fn display(&self) -> TableDisplay;

    /// Integer attribute such as `rowspan`; `default` when absent or unparsable.
    fn attribute_int(&self, name: &str, default: i32) -> i32;

    /// Child elements in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Create the layout box for a row or cell element.
    fn create_box(&self) -> Self::Box;
}

/// A block formatting context that a table can advance after layout.
pub trait BlockFlow {
    /// Move the flow cursor down by `height`.
    fn advance(&mut self, height: i32);
}

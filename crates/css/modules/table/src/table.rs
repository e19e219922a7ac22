//! The table box: collected rows and cells plus the cached layout.
//!
//! Spec: CSS 2.1 §17.5.2.2 Automatic table layout
//! <https://www.w3.org/TR/CSS21/tables.html#auto-table-layout>

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::box_metrics::{BlockFlow, LayoutBox, TableElement};
use crate::column_metrics::{CellWidths, ColumnSet, IntrinsicWidths, resolve_column_metrics};
use crate::placement::{ContentOrigin, place_cells, place_rows};
use crate::structure::{
    CellEntry, CellSpans, TableStructure, build_table_structure, collect_table_children,
};
use crate::types::{LayoutRect, LayoutSize, Length, TableStyle};
use crate::validity::{LayoutInputs, LayoutValidity};
use crate::width_allocation::{
    ColumnWidths, Mode, WidthOutcome, inner_width_budget, resolve_horizontal_placement,
    run_width_pass,
};

/// Geometry produced by the last full layout.
///
/// Rectangles are relative to the table box's top-left corner (margin edge).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableLayoutResult {
    /// Margin box of the table.
    pub table: LayoutRect,
    /// One rectangle per collected row box.
    pub rows: Vec<LayoutRect>,
    /// One rectangle per cell, in document order.
    pub cells: Vec<LayoutRect>,
    pub column_widths: Vec<i32>,
    pub row_heights: Vec<i32>,
}

/// A table laid out with the automatic table layout algorithm.
#[derive(Debug, Clone)]
pub struct Table<B> {
    style: TableStyle,
    rows: Vec<B>,
    cells: Vec<CellEntry<B>>,
    validity: LayoutValidity,
    result: TableLayoutResult,
    /// Position and size assigned by an enclosing layout.
    bounds: LayoutRect,
}

impl<B: LayoutBox> Table<B> {
    /// Create an empty table.
    pub fn new(style: TableStyle) -> Self {
        Self {
            style,
            rows: Vec::new(),
            cells: Vec::new(),
            validity: LayoutValidity::default(),
            result: TableLayoutResult::default(),
            bounds: LayoutRect::default(),
        }
    }

    /// Create a table from an element tree.
    pub fn from_element<E: TableElement<Box = B>>(element: &E, style: TableStyle) -> Self {
        let mut table = Self::new(style);
        table.rebuild(element);
        table
    }

    /// Append a row box.
    pub fn push_row(&mut self, row: B) {
        self.rows.push(row);
        self.validity.invalidate();
    }

    /// Append a cell box. Cells with the same parent key share a row.
    pub fn push_cell(&mut self, content: B, spans: CellSpans) {
        self.cells.push(CellEntry { content, spans });
        self.validity.invalidate();
    }

    /// Replace rows and cells with the ones found below `element`.
    pub fn rebuild<E: TableElement<Box = B>>(&mut self, element: &E) {
        let children = collect_table_children(element);
        self.rows = children.rows;
        self.cells = children.cells;
        self.validity.invalidate();
    }

    /// Drop the cached layout; the next [`Self::layout`] recomputes.
    pub const fn invalidate(&mut self) {
        self.validity.invalidate();
    }

    pub const fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Change the table's computed style.
    pub fn set_style(&mut self, style: TableStyle) {
        if self.style != style {
            self.style = style;
            self.validity.invalidate();
        }
    }

    pub fn rows(&self) -> &[B] {
        &self.rows
    }

    pub fn cells(&self) -> &[CellEntry<B>] {
        &self.cells
    }

    /// Geometry of the last full layout.
    pub const fn result(&self) -> &TableLayoutResult {
        &self.result
    }

    /// Position and size assigned by the enclosing layout.
    pub const fn bounds(&self) -> LayoutRect {
        self.bounds
    }

    /// Check if the cached layout is still usable.
    pub const fn is_layout_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// Grid slots of the current cells.
    pub fn structure(&self) -> TableStructure {
        build_table_structure(self.cells.iter().map(|cell| cell.spans))
    }

    fn column_set(&self, structure: &TableStructure, available_width: i32) -> ColumnSet {
        let widths: Vec<CellWidths> = self
            .cells
            .iter()
            .map(|cell| CellWidths {
                minimum: cell.content.minimum_width(available_width),
                specified: cell.content.specified_width(available_width),
                maximum: cell.content.maximum_width(available_width),
                fixed: cell.content.has_fixed_width(),
            })
            .collect();
        resolve_column_metrics(structure, &widths)
    }

    /// Minimum and maximum content width of the table.
    ///
    /// Touches no geometry and leaves the layout cache alone.
    pub fn measure_intrinsic_width(
        &self,
        container_width: i32,
        _viewport_width: i32,
    ) -> IntrinsicWidths {
        let frame = self.style.frame(container_width);
        let budget = inner_width_budget(&self.style, &frame, container_width, None);
        let structure = self.structure();
        let set = self.column_set(&structure, budget.max_inner_width);
        match run_width_pass(&set, budget, Mode::Measure, self.style.has_fixed_width()) {
            WidthOutcome::Measured(widths) => widths,
            WidthOutcome::Allocated(widths) => IntrinsicWidths {
                min_width: widths.actual_width,
                max_width: widths.actual_width,
            },
        }
    }

    /// Lay out rows and cells and return the table's margin-box size.
    ///
    /// Repeated calls with the same inputs return the cached geometry.
    pub fn layout(
        &mut self,
        container_width: i32,
        viewport_width: i32,
        shrink_wrap: bool,
    ) -> LayoutSize {
        let inputs = LayoutInputs {
            container_width,
            viewport_width,
            shrink_wrap,
        };
        if self.validity.is_hit(inputs) {
            trace!("table layout cache hit at container width {container_width}");
            return self.size();
        }
        self.perform_layout(inputs)
    }

    /// Lay out as part of a block flow, then advance the flow by the height.
    ///
    /// Always recomputes; the cached geometry is ignored.
    pub fn layout_in_flow<F: BlockFlow>(
        &mut self,
        container_width: i32,
        viewport_width: i32,
        flow: &mut F,
    ) -> LayoutSize {
        self.validity.invalidate();
        let size = self.layout(container_width, viewport_width, false);
        flow.advance(size.height);
        size
    }

    const fn size(&self) -> LayoutSize {
        LayoutSize {
            width: self.result.table.width,
            height: self.result.table.height,
        }
    }

    fn perform_layout(&mut self, inputs: LayoutInputs) -> LayoutSize {
        let span = debug_span!(
            "table_layout",
            container_width = inputs.container_width,
            viewport_width = inputs.viewport_width,
            shrink_wrap = inputs.shrink_wrap,
            cells = self.cells.len()
        );
        let _entered = span.enter();

        let container_width = inputs.container_width;
        let frame = self.style.frame(container_width);
        let shrink_wrap_width = inputs.shrink_wrap.then(|| {
            self.measure_intrinsic_width(container_width, inputs.viewport_width)
                .max_width
        });
        let budget = inner_width_budget(&self.style, &frame, container_width, shrink_wrap_width);

        let structure = self.structure();
        let set = self.column_set(&structure, budget.max_inner_width);
        let widths = match run_width_pass(&set, budget, Mode::Place, self.style.has_fixed_width())
        {
            WidthOutcome::Allocated(widths) => widths,
            WidthOutcome::Measured(_) => ColumnWidths::default(),
        };

        let horizontal = resolve_horizontal_placement(
            &self.style,
            &frame,
            container_width,
            widths.actual_width,
            inputs.shrink_wrap,
        );
        let origin = ContentOrigin {
            x: horizontal.content_x,
            y: frame.top,
        };

        let placed = place_cells(
            &mut self.cells,
            &structure,
            &widths,
            origin,
            inputs.viewport_width,
        );
        let rows = place_rows(
            &mut self.rows,
            &placed.row_heights,
            origin,
            widths.actual_width,
        );
        let height = frame.top + placed.content_height() + frame.bottom;

        debug!(
            "table layout: {} columns, {} rows, content width {}, box {}x{}",
            structure.column_count,
            structure.row_count,
            widths.actual_width,
            horizontal.box_width,
            height
        );

        self.result = TableLayoutResult {
            table: LayoutRect::new(0, 0, horizontal.box_width, height),
            rows,
            cells: placed.cell_rects,
            column_widths: widths.widths,
            row_heights: placed.row_heights,
        };
        self.validity.record(inputs);
        self.size()
    }
}

/// A table can be the content of another table's cell.
impl<B: LayoutBox> LayoutBox for Table<B> {
    fn minimum_width(&self, available_width: i32) -> i32 {
        self.measure_intrinsic_width(available_width, available_width)
            .min_width
            + self.style.frame(available_width).horizontal()
    }

    fn specified_width(&self, available_width: i32) -> i32 {
        if self.style.has_fixed_width() {
            self.style.width.resolve(available_width).max(0)
                + self.style.frame(available_width).horizontal()
        } else {
            0
        }
    }

    fn maximum_width(&self, available_width: i32) -> i32 {
        self.measure_intrinsic_width(available_width, available_width)
            .max_width
            + self.style.frame(available_width).horizontal()
    }

    fn has_fixed_width(&self) -> bool {
        matches!(self.style.width, Length::Px(_))
    }

    fn layout_at(&mut self, width: i32, viewport_width: i32) -> i32 {
        self.layout(width, viewport_width, false).height
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.bounds.width = width;
        self.bounds.height = height;
    }
}

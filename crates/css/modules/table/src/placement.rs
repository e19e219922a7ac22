//! Cell placement and row height propagation.
//!
//! Spec: CSS 2.1 §17.5.3 Table height algorithms
//! <https://www.w3.org/TR/CSS21/tables.html#height-layout>

use log::{debug, trace};

use crate::box_metrics::LayoutBox;
use crate::structure::{CellEntry, RowSpanTracker, TableStructure};
use crate::types::LayoutRect;
use crate::width_allocation::ColumnWidths;

/// Where the first column's top-left corner sits in the table box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentOrigin {
    pub x: i32,
    pub y: i32,
}

/// Row heights and final cell rectangles of one placement pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacedCells {
    pub row_heights: Vec<i32>,
    /// Indexed like the structure's cells.
    pub cell_rects: Vec<LayoutRect>,
}

impl PlacedCells {
    /// Sum of all row heights.
    pub fn content_height(&self) -> i32 {
        self.row_heights.iter().sum()
    }
}

/// Per-column bookkeeping while rows are being closed.
///
/// Each column remembers the cell that started in it and is still waiting
/// for its final height, how many rows that cell still spans, and how much
/// height the rows it already covered have contributed.
#[derive(Debug, Clone)]
struct RowFormatter {
    pending: Vec<Option<usize>>,
    accumulated: Vec<i32>,
    spans: RowSpanTracker,
}

impl RowFormatter {
    fn new(column_count: usize) -> Self {
        Self {
            pending: vec![None; column_count],
            accumulated: vec![0; column_count],
            spans: RowSpanTracker::with_columns(column_count),
        }
    }

    fn begin_cell(&mut self, index: usize, column: usize, col_span: usize, row_span: usize) {
        if let Some(slot) = self.pending.get_mut(column) {
            *slot = Some(index);
        }
        if let Some(height) = self.accumulated.get_mut(column) {
            *height = 0;
        }
        self.spans.occupy(column, col_span, row_span);
    }

    fn completing(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pending
            .iter()
            .enumerate()
            .filter(|&(column, _)| self.spans.remaining(column) == 1)
            .filter_map(|(column, pending)| pending.map(|index| (column, index)))
    }

    /// Close the current row and return its height.
    ///
    /// The row is as tall as the tallest cell ending in it, minus what that
    /// cell's earlier rows already provide. Every cell ending here is then
    /// stretched to cover exactly its rows.
    fn format_row<B: LayoutBox>(
        &mut self,
        cells: &mut [CellEntry<B>],
        rects: &mut [LayoutRect],
    ) -> i32 {
        let row_height = self
            .completing()
            .map(|(column, index)| {
                let natural = rects.get(index).map_or(0, |rect| rect.height);
                natural - self.accumulated.get(column).copied().unwrap_or(0)
            })
            .fold(0, i32::max);

        for column in 0..self.pending.len() {
            if self.spans.remaining(column) != 1 {
                continue;
            }
            let Some(index) = self.pending.get_mut(column).and_then(Option::take) else {
                continue;
            };
            let accumulated = self.accumulated.get(column).copied().unwrap_or(0);
            if let (Some(entry), Some(rect)) = (cells.get_mut(index), rects.get_mut(index)) {
                let height = row_height + accumulated;
                entry.content.adjust_vertical_positions(height - rect.height);
                entry.content.set_size(rect.width, height);
                rect.height = height;
            }
        }

        for column in 0..self.spans.len() {
            if self.spans.remaining(column) > 0 {
                self.spans.decrement(column);
                if let Some(height) = self.accumulated.get_mut(column) {
                    *height += row_height;
                }
            }
        }

        row_height
    }
}

/// Place every cell, lay it out, and derive row heights.
///
/// Cells are visited in structural (row-major) order. A cell is positioned
/// before it is laid out at the combined width of its columns; its height is
/// only final once its last row closes.
pub fn place_cells<B: LayoutBox>(
    cells: &mut [CellEntry<B>],
    structure: &TableStructure,
    widths: &ColumnWidths,
    origin: ContentOrigin,
    viewport_width: i32,
) -> PlacedCells {
    let mut formatter = RowFormatter::new(structure.column_count);
    let mut rects = vec![LayoutRect::default(); structure.cells.len()];
    let mut row_heights = Vec::with_capacity(structure.row_count);
    let mut current_row = 0;
    let mut column = 0;
    let mut x = 0;
    let mut y = 0;

    for (index, cell) in structure.cells.iter().enumerate() {
        if cell.row != current_row {
            let row_height = formatter.format_row(cells, &mut rects);
            trace!("row {current_row} closed at height {row_height}");
            row_heights.push(row_height);
            y += row_height;
            x = 0;
            column = 0;
            current_row = cell.row;
        }

        if cell.column > column {
            x += widths.span_width(column, cell.column - column);
            column = cell.column;
        }

        let width = widths.span_width(column, cell.col_span);
        let Some(entry) = cells.get_mut(index) else {
            break;
        };
        formatter.begin_cell(index, column, cell.col_span, cell.row_span);

        let rect_x = origin.x + x;
        let rect_y = origin.y + y;
        entry.content.set_position(rect_x, rect_y);
        let height = entry.content.layout_at(width, viewport_width);
        entry.content.set_size(width, height);
        if let Some(rect) = rects.get_mut(index) {
            *rect = LayoutRect::new(rect_x, rect_y, width, height);
        }

        x += width;
        column += cell.col_span;
    }

    if !structure.cells.is_empty() {
        let row_height = formatter.format_row(cells, &mut rects);
        trace!("row {current_row} closed at height {row_height}");
        row_heights.push(row_height);
    }

    debug!("place_cells: row_heights={row_heights:?}");

    PlacedCells {
        row_heights,
        cell_rects: rects,
    }
}

/// Stack row boxes under each other and size them to the content width.
///
/// Rows without a computed height (no cells of their own) collapse to zero
/// height below the last row.
pub fn place_rows<B: LayoutBox>(
    rows: &mut [B],
    row_heights: &[i32],
    origin: ContentOrigin,
    content_width: i32,
) -> Vec<LayoutRect> {
    let mut y = origin.y;
    rows.iter_mut()
        .enumerate()
        .map(|(index, row)| {
            let height = row_heights.get(index).copied().unwrap_or(0);
            let rect = LayoutRect::new(origin.x, y, content_width, height);
            row.set_position(rect.x, rect.y);
            row.set_size(rect.width, rect.height);
            y += height;
            rect
        })
        .collect()
}

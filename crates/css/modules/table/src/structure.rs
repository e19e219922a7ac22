//! Table structure: collecting rows/cells and assigning grid slots.
//!
//! Spec: CSS 2.1 §17.5 Visual layout of table contents
//! <https://www.w3.org/TR/CSS21/tables.html#table-layout>

use log::{debug, trace};

use crate::box_metrics::TableElement;
use crate::types::TableDisplay;

/// Attribute read for row spans.
pub const ROWSPAN_ATTRIBUTE: &str = "rowspan";
/// Attribute read for column spans.
pub const COLSPAN_ATTRIBUTE: &str = "colspan";

/// Identifies the element a cell was collected under.
///
/// Cells sharing a key belong to the same row. Keys are assigned in document
/// order while walking the table element; the table itself is key 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParentKey(pub usize);

/// Raw span attributes of a cell plus the row it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpans {
    pub parent: ParentKey,
    /// `rowspan` as written; clamped during structure building.
    pub row_span: i32,
    /// `colspan` as written; clamped during structure building.
    pub col_span: i32,
}

impl CellSpans {
    /// A single-slot cell in the given row.
    pub const fn single(parent: ParentKey) -> Self {
        Self {
            parent,
            row_span: 1,
            col_span: 1,
        }
    }
}

/// A cell box together with its span information.
#[derive(Debug, Clone)]
pub struct CellEntry<B> {
    pub content: B,
    pub spans: CellSpans,
}

/// Rows and cells collected from a table element, in document order.
#[derive(Debug, Clone)]
pub struct TableChildren<B> {
    pub rows: Vec<B>,
    pub cells: Vec<CellEntry<B>>,
}

impl<B> Default for TableChildren<B> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cells: Vec::new(),
        }
    }
}

/// Collect row and cell boxes below `table`.
///
/// Row elements contribute a row box and are searched for cells. Any other
/// non-cell element is searched as well, so row groups and other wrappers
/// are transparent. Cell contents are never searched.
pub fn collect_table_children<E: TableElement>(table: &E) -> TableChildren<E::Box> {
    let mut children = TableChildren::default();
    let mut next_key = 0;
    collect_into(table, ParentKey(0), &mut next_key, &mut children);
    debug!(
        "collect_table_children: {} rows, {} cells",
        children.rows.len(),
        children.cells.len()
    );
    children
}

fn collect_into<E: TableElement>(
    element: &E,
    key: ParentKey,
    next_key: &mut usize,
    out: &mut TableChildren<E::Box>,
) {
    for child in element.children() {
        match child.display() {
            TableDisplay::Cell => out.cells.push(CellEntry {
                content: child.create_box(),
                spans: CellSpans {
                    parent: key,
                    row_span: child.attribute_int(ROWSPAN_ATTRIBUTE, 1),
                    col_span: child.attribute_int(COLSPAN_ATTRIBUTE, 1),
                },
            }),
            display => {
                if display == TableDisplay::Row {
                    out.rows.push(child.create_box());
                }
                *next_key += 1;
                collect_into(child, ParentKey(*next_key), next_key, out);
            }
        }
    }
}

/// A cell's slot in the logical grid.
///
/// Occupies `[column, column + col_span) x [row, row + row_span)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralCell {
    pub column: usize,
    pub row: usize,
    pub col_span: usize,
    pub row_span: usize,
    pub parent: ParentKey,
}

impl StructuralCell {
    /// Check if this cell covers the given grid slot.
    pub const fn occupies(&self, column: usize, row: usize) -> bool {
        column >= self.column
            && column < self.column + self.col_span
            && row >= self.row
            && row < self.row + self.row_span
    }

    /// Check if the occupied rectangles of two cells intersect.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.column < other.column + other.col_span
            && other.column < self.column + self.col_span
            && self.row < other.row + other.row_span
            && other.row < self.row + self.row_span
    }
}

/// Remaining row span per column, grown on demand.
///
/// A nonzero count means the column is still covered by a cell from an
/// earlier row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSpanTracker {
    remaining: Vec<usize>,
}

impl RowSpanTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self {
            remaining: Vec::new(),
        }
    }

    /// Create a tracker for a known column count, all columns free.
    pub fn with_columns(column_count: usize) -> Self {
        Self {
            remaining: vec![0; column_count],
        }
    }

    /// Number of columns seen so far.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Check if no column has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remaining span of a column; 0 for columns beyond the tracked range.
    pub fn remaining(&self, column: usize) -> usize {
        self.remaining.get(column).copied().unwrap_or(0)
    }

    /// First column at or after `column` that is not covered.
    pub fn next_free(&self, mut column: usize) -> usize {
        while self.remaining(column) > 0 {
            column += 1;
        }
        column
    }

    /// First column at or after `column` where `col_span` consecutive columns
    /// are all uncovered.
    pub fn next_free_run(&self, mut column: usize, col_span: usize) -> usize {
        loop {
            column = self.next_free(column);
            match (column..column + col_span).find(|&next| self.remaining(next) > 0) {
                Some(covered) => column = covered + 1,
                None => return column,
            }
        }
    }

    /// Cover `col_span` columns starting at `column` for `row_span` rows.
    pub fn occupy(&mut self, column: usize, col_span: usize, row_span: usize) {
        let end = column + col_span;
        if self.remaining.len() < end {
            self.remaining.resize(end, 0);
        }
        for slot in &mut self.remaining[column..end] {
            *slot = row_span;
        }
    }

    /// Move to the next row: every nonzero span shrinks by one.
    pub fn advance_row(&mut self) {
        for slot in &mut self.remaining {
            *slot = slot.saturating_sub(1);
        }
    }

    /// Shrink one column's span by one, if nonzero.
    pub fn decrement(&mut self, column: usize) {
        if let Some(slot) = self.remaining.get_mut(column) {
            *slot = slot.saturating_sub(1);
        }
    }
}

/// The logical grid of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStructure {
    /// One entry per cell, in row-major document order.
    pub cells: Vec<StructuralCell>,
    pub row_count: usize,
    pub column_count: usize,
}

/// Assign a grid slot to every cell.
///
/// A change of parent key starts a new row. A cell starts at the first column
/// from which all of its spanned columns are free of row spans from above. Spans below 1 are treated as 1, and row spans
/// reaching past the last row are cut to the rows that exist.
pub fn build_table_structure<I>(cells: I) -> TableStructure
where
    I: IntoIterator<Item = CellSpans>,
{
    let mut tracker = RowSpanTracker::new();
    let mut structural = Vec::new();
    let mut current_parent = None;
    let mut column = 0;
    let mut row = 0;

    for spans in cells {
        match current_parent {
            None => current_parent = Some(spans.parent),
            Some(parent) if parent != spans.parent => {
                current_parent = Some(spans.parent);
                column = 0;
                row += 1;
                tracker.advance_row();
            }
            Some(_) => {}
        }

        let row_span = spans.row_span.max(1) as usize;
        let col_span = spans.col_span.max(1) as usize;
        column = tracker.next_free_run(column, col_span);

        trace!("cell at column={column} row={row} colspan={col_span} rowspan={row_span}");

        structural.push(StructuralCell {
            column,
            row,
            col_span,
            row_span,
            parent: spans.parent,
        });

        tracker.occupy(column, col_span, row_span);
        column += col_span;
    }

    let row_count = if structural.is_empty() { 0 } else { row + 1 };
    for cell in &mut structural {
        cell.row_span = cell.row_span.min(row_count - cell.row);
    }

    debug!(
        "build_table_structure: {} cells, {} rows, {} columns",
        structural.len(),
        row_count,
        tracker.len()
    );

    TableStructure {
        cells: structural,
        row_count,
        column_count: tracker.len(),
    }
}

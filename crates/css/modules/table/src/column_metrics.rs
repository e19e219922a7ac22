//! Column width metrics for the automatic table layout.
//!
//! Spec: CSS 2.1 §17.5.2.2 Automatic table layout, steps 1-3
//! <https://www.w3.org/TR/CSS21/tables.html#auto-table-layout>

use log::{debug, trace};

use crate::structure::TableStructure;

/// Width information of one cell, queried once per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellWidths {
    pub minimum: i32,
    pub specified: i32,
    pub maximum: i32,
    pub fixed: bool,
}

/// Aggregated widths of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnMetrics {
    pub min_width: i32,
    pub spec_width: i32,
    pub max_width: i32,
    /// Some single-span cell in this column has a fixed width.
    pub is_fixed: bool,
}

/// Minimum and maximum width of the table content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntrinsicWidths {
    pub min_width: i32,
    pub max_width: i32,
}

/// Resolved column metrics plus their totals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSet {
    pub columns: Vec<ColumnMetrics>,
    pub min_sum: i32,
    pub spec_sum: i32,
    pub max_sum: i32,
    pub fixed_count: usize,
}

impl ColumnSet {
    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check if every column is fixed.
    pub fn all_fixed(&self) -> bool {
        self.fixed_count == self.columns.len()
    }

    /// Intrinsic widths of the table content. A pinned table width raises
    /// the minimum but never the maximum.
    pub fn intrinsic_widths(&self, min_inner_width: i32) -> IntrinsicWidths {
        IntrinsicWidths {
            min_width: self.min_sum.max(min_inner_width),
            max_width: self.max_sum,
        }
    }

    fn finalize(&mut self) {
        self.min_sum = 0;
        self.spec_sum = 0;
        self.max_sum = 0;
        self.fixed_count = 0;
        for column in &mut self.columns {
            column.spec_width = column.spec_width.max(column.min_width);
            column.max_width = if column.is_fixed {
                column.spec_width
            } else {
                column.max_width.max(column.spec_width)
            };
            self.min_sum += column.min_width;
            self.spec_sum += column.spec_width;
            self.max_sum += column.max_width;
            if column.is_fixed {
                self.fixed_count += 1;
            }
        }
    }
}

/// Per-column share of a shortfall, rounded up, never negative.
fn spread_deficit(required: i32, current: i32, divisor: i32) -> i32 {
    ((required - current + divisor - 1) / divisor).max(0)
}

/// Resolve column metrics from the grid and the cells' widths.
///
/// `widths` is indexed like `structure.cells`.
///
/// Single-span cells set each column's min/specified/max directly. Spanning cells
/// are handled afterwards: whatever their spanned columns lack is spread over
/// the non-fixed ones (all of them if every spanned column is fixed).
pub fn resolve_column_metrics(structure: &TableStructure, widths: &[CellWidths]) -> ColumnSet {
    let mut set = ColumnSet {
        columns: vec![ColumnMetrics::default(); structure.column_count],
        ..ColumnSet::default()
    };

    for (cell, cell_widths) in structure.cells.iter().zip(widths) {
        if cell.col_span != 1 {
            continue;
        }
        let Some(column) = set.columns.get_mut(cell.column) else {
            continue;
        };
        column.min_width = column.min_width.max(cell_widths.minimum);
        column.spec_width = column.spec_width.max(cell_widths.specified);
        column.max_width = column.max_width.max(cell_widths.maximum);
        column.is_fixed |= cell_widths.fixed;
    }

    for (cell, cell_widths) in structure.cells.iter().zip(widths) {
        if cell.col_span <= 1 {
            continue;
        }
        let end = (cell.column + cell.col_span).min(set.columns.len());
        let Some(spanned) = set.columns.get_mut(cell.column..end) else {
            continue;
        };

        let min: i32 = spanned.iter().map(|column| column.min_width).sum();
        let max: i32 = spanned.iter().map(|column| column.max_width).sum();
        let flexible = spanned.iter().filter(|column| !column.is_fixed).count();
        let all_eligible = flexible == 0 || flexible == spanned.len();
        let eligible = if flexible == 0 {
            spanned.len()
        } else {
            flexible
        };
        let divisor = eligible as i32;

        let min_add = spread_deficit(cell_widths.minimum, min, divisor);
        let max_add = spread_deficit(cell_widths.maximum, max, divisor);

        trace!(
            "spanning cell at column {} (span {}): min +{min_add}, max +{max_add} over {divisor}",
            cell.column, cell.col_span
        );

        for column in spanned {
            if all_eligible || !column.is_fixed {
                column.min_width += min_add;
                column.max_width += max_add;
            }
        }
    }

    set.finalize();

    debug!(
        "resolve_column_metrics: {} columns, min_sum={}, spec_sum={}, max_sum={}, fixed={}",
        set.len(),
        set.min_sum,
        set.spec_sum,
        set.max_sum,
        set.fixed_count
    );

    set
}

//! CSS Tables: automatic table layout
//! Spec: <https://www.w3.org/TR/CSS21/tables.html#auto-table-layout>
//!
//! This module computes column widths, row heights and cell geometry for a
//! table from its cells' intrinsic widths, honoring `colspan` and `rowspan`.

// Geometry and computed style
mod types;
pub use types::{Edges, LayoutRect, LayoutSize, Length, TableDisplay, TableFrame, TableStyle};

// Capabilities consumed from boxes and elements
mod box_metrics;
pub use box_metrics::{BlockFlow, LayoutBox, TableElement};

// Leaf content boxes
mod intrinsic;
pub use intrinsic::{HeightModel, IntrinsicBox};

// Row/cell collection and grid slots
mod structure;
pub use structure::{
    COLSPAN_ATTRIBUTE, CellEntry, CellSpans, ParentKey, ROWSPAN_ATTRIBUTE, RowSpanTracker,
    StructuralCell, TableChildren, TableStructure, build_table_structure, collect_table_children,
};

// Column min/specified/max widths
mod column_metrics;
pub use column_metrics::{
    CellWidths, ColumnMetrics, ColumnSet, IntrinsicWidths, resolve_column_metrics,
};

// Column width allocation
mod width_allocation;
pub use width_allocation::{
    ColumnWidths, HorizontalPlacement, InnerWidthBudget, Mode, WidthOutcome,
    allocate_column_widths, inner_width_budget, resolve_horizontal_placement, run_width_pass,
};

// Cell placement and row heights
mod placement;
pub use placement::{ContentOrigin, PlacedCells, place_cells, place_rows};

// Layout cache
mod validity;
pub use validity::{LayoutInputs, LayoutValidity};

// Table box
mod table;
pub use table::{Table, TableLayoutResult};

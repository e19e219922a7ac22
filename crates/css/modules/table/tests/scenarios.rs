mod common;

use common::{block, init_logging, table_from_rows};
use css_table::{
    CellSpans, CellWidths, Length, ParentKey, TableStyle, build_table_structure,
    resolve_column_metrics,
};

/// Two plain columns in a roomy container widen to their maxima and stop.
///
/// # Panics
/// Panics if the columns grow past their maxima.
#[test]
fn roomy_columns_take_maximum_widths() {
    init_logging();
    let mut table = table_from_rows(
        TableStyle::default(),
        vec![vec![(block(10, 30, 10), 1, 1), (block(20, 40, 10), 1, 1)]],
    );
    let size = table.layout(100, 800, false);
    assert_eq!(table.result().column_widths, vec![30, 40]);
    assert_eq!(size.width, 70);
}

/// A colspan=2 cell needing 30px over two 5px columns adds 10 to each.
///
/// # Panics
/// Panics if the spanning minimum is not spread evenly.
#[test]
fn spanning_minimum_spreads_over_columns() {
    init_logging();
    let structure = build_table_structure([
        CellSpans::single(ParentKey(1)),
        CellSpans::single(ParentKey(1)),
        CellSpans {
            parent: ParentKey(2),
            row_span: 1,
            col_span: 2,
        },
    ]);
    let narrow = CellWidths {
        minimum: 5,
        specified: 0,
        maximum: 5,
        fixed: false,
    };
    let spanning = CellWidths {
        minimum: 30,
        maximum: 30,
        ..narrow
    };
    let set = resolve_column_metrics(&structure, &[narrow, narrow, spanning]);
    let minima: Vec<i32> = set.columns.iter().map(|column| column.min_width).collect();
    assert_eq!(minima, vec![15, 15]);
}

/// A rowspan=2 cell is stretched to both rows once the second row closes.
///
/// # Panics
/// Panics if the spanning cell does not end up 30px tall.
#[test]
fn rowspan_cell_stretches_to_both_rows() {
    init_logging();
    let mut table = table_from_rows(
        TableStyle::default(),
        vec![
            vec![(block(50, 50, 10), 2, 1), (block(50, 50, 10), 1, 1)],
            vec![(block(50, 50, 20), 1, 1)],
        ],
    );
    let size = table.layout(100, 800, false);
    assert_eq!(table.result().row_heights, vec![10, 20]);
    let spanning = table.result().cells.first().copied().unwrap_or_default();
    assert_eq!(spanning.height, 30);
    assert_eq!(size.height, 30);
    let stretched = table.cells().first().map(|cell| cell.content.stretched_by());
    assert_eq!(stretched, Some(20));
}

/// A pinned width over all-fixed columns spreads the surplus over all of them.
///
/// # Panics
/// Panics if the surplus is not spread across every column.
#[test]
fn pinned_width_over_fixed_columns_spreads_evenly() {
    init_logging();
    let style = TableStyle {
        width: Length::Px(150),
        ..TableStyle::default()
    };
    let mut table = table_from_rows(
        style,
        vec![vec![
            (block(10, 10, 12).with_width(Length::Px(20)), 1, 1),
            (block(10, 30, 12).with_width(Length::Px(30)), 1, 1),
        ]],
    );
    let size = table.layout(400, 800, false);
    assert_eq!(table.result().column_widths, vec![70, 80]);
    assert_eq!(size.width, 150);
}

/// A pinned width over empty columns leaves the widths alone.
///
/// # Panics
/// Panics if empty columns are widened.
#[test]
fn pinned_width_over_empty_columns_stays_empty() {
    init_logging();
    let style = TableStyle {
        width: Length::Px(90),
        ..TableStyle::default()
    };
    let mut table = table_from_rows(
        style,
        vec![vec![(block(0, 0, 5), 1, 1), (block(0, 0, 5), 1, 1)]],
    );
    table.layout(400, 800, false);
    assert_eq!(table.result().column_widths, vec![0, 0]);
}

/// Fixed columns keep their declared width while a flexible one takes the rest.
///
/// # Panics
/// Panics if a fixed column is widened.
#[test]
fn pinned_width_grows_flexible_columns_only() {
    init_logging();
    let style = TableStyle {
        width: Length::Px(200),
        ..TableStyle::default()
    };
    let mut table = table_from_rows(
        style,
        vec![vec![
            (block(10, 10, 5).with_width(Length::Px(40)), 1, 1),
            (block(20, 60, 5), 1, 1),
        ]],
    );
    table.layout(400, 800, false);
    assert_eq!(table.result().column_widths, vec![40, 160]);
}

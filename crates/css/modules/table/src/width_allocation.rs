//! Turning column metrics into final column widths.
//!
//! Spec: CSS 2.1 §17.5.2.2 Automatic table layout, steps 4-5
//! <https://www.w3.org/TR/CSS21/tables.html#auto-table-layout>

use log::debug;

use crate::column_metrics::{ColumnSet, IntrinsicWidths};
use crate::types::{TableFrame, TableStyle};

/// Whether a width pass only measures or commits to final widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report intrinsic widths; nothing is allocated or placed.
    Measure,
    /// Allocate column widths for placement.
    Place,
}

/// Width the columns may use, and the least they must use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InnerWidthBudget {
    pub max_inner_width: i32,
    /// Pinned table width; 0 unless the table has a fixed width.
    pub min_inner_width: i32,
}

/// Determine the content-box budget for the columns.
///
/// `shrink_wrap_width` is the table's own maximum intrinsic width when the
/// caller wants shrink-to-fit sizing.
pub fn inner_width_budget(
    style: &TableStyle,
    frame: &TableFrame,
    container_width: i32,
    shrink_wrap_width: Option<i32>,
) -> InnerWidthBudget {
    if let Some(max_inner_width) = shrink_wrap_width {
        return InnerWidthBudget {
            max_inner_width,
            min_inner_width: 0,
        };
    }
    if style.has_fixed_width() {
        let width = style.width.resolve(container_width).max(0);
        return InnerWidthBudget {
            max_inner_width: width,
            min_inner_width: width,
        };
    }
    InnerWidthBudget {
        max_inner_width: (container_width - frame.horizontal()).max(0),
        min_inner_width: 0,
    }
}

/// Final column widths and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnWidths {
    pub widths: Vec<i32>,
    pub actual_width: i32,
}

impl ColumnWidths {
    /// Width of `span` columns starting at `column`.
    pub fn span_width(&self, column: usize, span: usize) -> i32 {
        self.widths.iter().skip(column).take(span).sum()
    }
}

/// Result of the shared width pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidthOutcome {
    Measured(IntrinsicWidths),
    Allocated(ColumnWidths),
}

/// Run the width pass in the given mode.
pub fn run_width_pass(
    set: &ColumnSet,
    budget: InnerWidthBudget,
    mode: Mode,
    pinned_table_width: bool,
) -> WidthOutcome {
    match mode {
        Mode::Measure => WidthOutcome::Measured(set.intrinsic_widths(budget.min_inner_width)),
        Mode::Place => WidthOutcome::Allocated(allocate_column_widths(
            set,
            budget.max_inner_width,
            pinned_table_width,
        )),
    }
}

/// `value * numerator / denominator` without intermediate overflow.
fn scale(value: i32, numerator: i32, denominator: i32) -> i32 {
    if denominator <= 0 {
        return 0;
    }
    (i64::from(value) * i64::from(numerator) / i64::from(denominator)) as i32
}

/// Allocate column widths within `max_inner_width`.
///
/// Steps, in order:
/// 1. If everything fits at maximum width, every column takes its maximum.
/// 2. Columns below their specified width grow toward it, proportionally to
///    what they still lack.
/// 3. Remaining space goes to non-fixed columns, proportionally to how far
///    each is from its maximum.
/// 4. A table with a pinned width that is still too narrow is widened evenly
///    across non-fixed columns, or across all columns if all are fixed.
pub fn allocate_column_widths(
    set: &ColumnSet,
    max_inner_width: i32,
    pinned_table_width: bool,
) -> ColumnWidths {
    let mut widths: Vec<i32> = set.columns.iter().map(|column| column.min_width).collect();
    let mut min_sum = set.min_sum;

    if set.max_sum < max_inner_width {
        for (width, column) in widths.iter_mut().zip(&set.columns) {
            *width = column.max_width;
        }
        min_sum = set.max_sum;
    }
    let mut actual_width = min_sum;

    if max_inner_width > min_sum && set.spec_sum > min_sum {
        let distribute = max_inner_width.min(set.spec_sum) - min_sum;
        let demand = set.spec_sum - min_sum;
        for (width, column) in widths.iter_mut().zip(&set.columns) {
            let wants = (column.spec_width - *width).max(0);
            let add = scale(wants, distribute, demand);
            *width += add;
            actual_width += add;
        }
        debug!("allocate_column_widths: distributed {distribute} toward specified widths");
    }

    if max_inner_width > set.spec_sum && set.max_sum > min_sum {
        let headroom: i32 = widths
            .iter()
            .zip(&set.columns)
            .filter(|(_, column)| !column.is_fixed)
            .map(|(width, column)| (column.max_width - width).max(0))
            .sum();
        let available = (max_inner_width - actual_width).min(headroom);
        for (width, column) in widths.iter_mut().zip(&set.columns) {
            if column.is_fixed {
                continue;
            }
            let add = scale((column.max_width - *width).max(0), available, headroom);
            *width += add;
            actual_width += add;
        }
        debug!("allocate_column_widths: distributed {available} toward maximum widths");
    }

    if pinned_table_width && set.max_sum > 0 && max_inner_width > actual_width {
        let spread_all = set.all_fixed();
        let eligible = if spread_all {
            set.len()
        } else {
            set.len() - set.fixed_count
        };
        let add = (max_inner_width - actual_width) / eligible as i32;
        for (width, column) in widths.iter_mut().zip(&set.columns) {
            if spread_all || !column.is_fixed {
                *width += add;
                actual_width += add;
            }
        }
        if actual_width < max_inner_width {
            debug!(
                "allocate_column_widths: pinned width {max_inner_width} left {} px unallocated",
                max_inner_width - actual_width
            );
        }
    }

    debug!("allocate_column_widths: widths={widths:?}, actual_width={actual_width}");

    ColumnWidths {
        widths,
        actual_width,
    }
}

/// Resolved horizontal placement of the table box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalPlacement {
    pub margin_left: i32,
    pub margin_right: i32,
    /// Offset of the first column from the table box's left edge.
    pub content_x: i32,
    /// Margin-box width of the table.
    pub box_width: i32,
}

/// Resolve the table's margins around the allocated content width.
///
/// Outside shrink-to-fit, a table with both horizontal margins `auto` is
/// centered in its container. Centering never produces negative margins.
pub fn resolve_horizontal_placement(
    style: &TableStyle,
    frame: &TableFrame,
    container_width: i32,
    actual_width: i32,
    shrink_wrap: bool,
) -> HorizontalPlacement {
    let (margin_left, margin_right) = if !shrink_wrap && style.is_centered() {
        let each = ((container_width - frame.horizontal() - actual_width) / 2).max(0);
        (each, each)
    } else {
        (frame.margin_left, frame.margin_right)
    };
    let inner_left = frame.left - frame.margin_left;
    let inner_right = frame.right - frame.margin_right;
    HorizontalPlacement {
        margin_left,
        margin_right,
        content_x: margin_left + inner_left,
        box_width: margin_left + inner_left + actual_width + inner_right + margin_right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_metrics::ColumnMetrics;
    use crate::types::{Edges, Length};

    fn column(min_width: i32, spec_width: i32, max_width: i32, is_fixed: bool) -> ColumnMetrics {
        ColumnMetrics {
            min_width,
            spec_width,
            max_width,
            is_fixed,
        }
    }

    fn set_of(columns: Vec<ColumnMetrics>) -> ColumnSet {
        ColumnSet {
            min_sum: columns.iter().map(|column| column.min_width).sum(),
            spec_sum: columns.iter().map(|column| column.spec_width).sum(),
            max_sum: columns.iter().map(|column| column.max_width).sum(),
            fixed_count: columns.iter().filter(|column| column.is_fixed).count(),
            columns,
        }
    }

    /// Plenty of room: every column takes its maximum and stops there.
    ///
    /// # Panics
    /// Panics if the columns do not settle at their maxima.
    #[test]
    fn roomy_table_uses_maximum_widths() {
        let set = set_of(vec![column(10, 10, 30, false), column(20, 20, 40, false)]);
        let allocated = allocate_column_widths(&set, 100, false);
        assert_eq!(allocated.widths, vec![30, 40]);
        assert_eq!(allocated.actual_width, 70);
    }

    /// Between min and max, columns grow but never past their maximum.
    ///
    /// # Panics
    /// Panics if a column exceeds its maximum or the budget is not used.
    #[test]
    fn constrained_table_fills_budget() {
        let set = set_of(vec![column(50, 50, 50, false), column(0, 0, 50, false)]);
        let allocated = allocate_column_widths(&set, 80, false);
        assert_eq!(allocated.widths, vec![50, 30]);
        assert_eq!(allocated.actual_width, 80);
    }

    /// Specified widths are honored before flexible growth.
    ///
    /// # Panics
    /// Panics if the specified column does not reach its specified width.
    #[test]
    fn specified_widths_come_first() {
        let set = set_of(vec![column(10, 60, 100, false), column(10, 10, 100, false)]);
        let allocated = allocate_column_widths(&set, 70, false);
        assert_eq!(allocated.widths, vec![60, 10]);
        let allocated = allocate_column_widths(&set, 40, false);
        assert_eq!(allocated.widths, vec![30, 10]);
    }

    /// Below the minimum sum the table overflows at minimum widths.
    ///
    /// # Panics
    /// Panics if the columns shrink below their minima.
    #[test]
    fn narrow_container_keeps_minimum_widths() {
        let set = set_of(vec![column(40, 40, 90, false), column(40, 40, 90, false)]);
        let allocated = allocate_column_widths(&set, 10, false);
        assert_eq!(allocated.widths, vec![40, 40]);
    }

    /// A pinned width with every column fixed spreads over all columns.
    ///
    /// # Panics
    /// Panics if the surplus is not spread evenly.
    #[test]
    fn pinned_width_all_fixed_spreads_over_all_columns() {
        let set = set_of(vec![column(20, 20, 20, true), column(30, 30, 30, true)]);
        let allocated = allocate_column_widths(&set, 150, true);
        assert_eq!(allocated.widths, vec![70, 80]);
        assert_eq!(allocated.actual_width, 150);
    }

    /// A pinned width skips fixed columns when flexible ones exist.
    ///
    /// # Panics
    /// Panics if a fixed column is widened.
    #[test]
    fn pinned_width_skips_fixed_columns() {
        let set = set_of(vec![column(20, 20, 20, true), column(10, 10, 30, false)]);
        let allocated = allocate_column_widths(&set, 100, true);
        assert_eq!(allocated.widths, vec![20, 80]);
    }

    /// Measure mode reports sums and the pinned minimum.
    ///
    /// # Panics
    /// Panics if the measured widths are wrong.
    #[test]
    fn measure_mode_reports_intrinsic_widths() {
        let set = set_of(vec![column(10, 10, 30, false), column(20, 20, 40, false)]);
        let budget = InnerWidthBudget {
            max_inner_width: 100,
            min_inner_width: 50,
        };
        let outcome = run_width_pass(&set, budget, Mode::Measure, true);
        assert_eq!(
            outcome,
            WidthOutcome::Measured(IntrinsicWidths {
                min_width: 50,
                max_width: 70,
            })
        );
    }

    /// Auto margins center the table and include it in the box width.
    ///
    /// # Panics
    /// Panics if centering is computed incorrectly.
    #[test]
    fn auto_margins_center_the_table() {
        let style = TableStyle {
            margin: Edges {
                left: Length::Auto,
                right: Length::Auto,
                ..Edges::all(Length::Px(0))
            },
            border: Edges::all(Length::Px(1)),
            ..TableStyle::default()
        };
        let frame = style.frame(200);
        let placement = resolve_horizontal_placement(&style, &frame, 200, 98, false);
        assert_eq!(placement.margin_left, 50);
        assert_eq!(placement.content_x, 51);
        assert_eq!(placement.box_width, 200);

        let wrapped = resolve_horizontal_placement(&style, &frame, 200, 98, true);
        assert_eq!(wrapped.margin_left, 0);
        assert_eq!(wrapped.box_width, 100);
    }

    /// Budget: pinned widths win over the container, frames are subtracted.
    ///
    /// # Panics
    /// Panics if the budget is computed incorrectly.
    #[test]
    fn budget_sources() {
        let style = TableStyle {
            padding: Edges::all(Length::Px(5)),
            ..TableStyle::default()
        };
        let frame = style.frame(300);
        assert_eq!(
            inner_width_budget(&style, &frame, 300, None).max_inner_width,
            290
        );
        assert_eq!(
            inner_width_budget(&style, &frame, 300, Some(42)).max_inner_width,
            42
        );
        let pinned = TableStyle {
            width: Length::Percent(50.0),
            ..style
        };
        let budget = inner_width_budget(&pinned, &frame, 300, None);
        assert_eq!(budget.max_inner_width, 150);
        assert_eq!(budget.min_inner_width, 150);
    }
}

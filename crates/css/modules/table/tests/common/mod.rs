#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::path::PathBuf;

use css_table::{
    COLSPAN_ATTRIBUTE, CellSpans, IntrinsicBox, ParentKey, ROWSPAN_ATTRIBUTE, Table,
    TableDisplay, TableElement, TableStyle,
};

/// Install a test logger once per binary.
pub fn init_logging() {
    let _ignored = env_logger::builder().is_test(true).try_init();
}

/// Directory holding the JSON layout fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Minimal element tree for driving collection.
#[derive(Debug, Clone)]
pub struct MockElement {
    pub display: TableDisplay,
    pub attributes: Vec<(&'static str, i32)>,
    pub children: Vec<MockElement>,
    pub content: IntrinsicBox,
}

impl MockElement {
    fn new(display: TableDisplay, children: Vec<Self>) -> Self {
        Self {
            display,
            attributes: Vec::new(),
            children,
            content: IntrinsicBox::default(),
        }
    }

    /// A `<table>` or row group wrapper.
    pub fn group(children: Vec<Self>) -> Self {
        Self::new(TableDisplay::Other, children)
    }

    /// A `<tr>`.
    pub fn row(cells: Vec<Self>) -> Self {
        Self::new(TableDisplay::Row, cells)
    }

    /// A `<td>` with the given content.
    pub fn cell(content: IntrinsicBox) -> Self {
        Self {
            content,
            ..Self::new(TableDisplay::Cell, Vec::new())
        }
    }

    #[must_use]
    pub fn rowspan(mut self, span: i32) -> Self {
        self.attributes.push((ROWSPAN_ATTRIBUTE, span));
        self
    }

    #[must_use]
    pub fn colspan(mut self, span: i32) -> Self {
        self.attributes.push((COLSPAN_ATTRIBUTE, span));
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }
}

impl TableElement for MockElement {
    type Box = IntrinsicBox;

    fn display(&self) -> TableDisplay {
        self.display
    }

    fn attribute_int(&self, name: &str, default: i32) -> i32 {
        self.attributes
            .iter()
            .find(|(attribute, _)| *attribute == name)
            .map_or(default, |&(_, value)| value)
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    fn create_box(&self) -> Self::Box {
        self.content.clone()
    }
}

/// Cell content of constant height.
pub fn block(min_width: i32, max_width: i32, height: i32) -> IntrinsicBox {
    IntrinsicBox::fixed_height(min_width, max_width, height)
}

/// Build a table row by row; `(content, rowspan, colspan)` per cell.
pub fn table_from_rows(
    style: TableStyle,
    rows: Vec<Vec<(IntrinsicBox, i32, i32)>>,
) -> Table<IntrinsicBox> {
    let mut table = Table::new(style);
    for (index, cells) in rows.into_iter().enumerate() {
        table.push_row(IntrinsicBox::default());
        for (content, row_span, col_span) in cells {
            table.push_cell(
                content,
                CellSpans {
                    parent: ParentKey(index + 1),
                    row_span,
                    col_span,
                },
            );
        }
    }
    table
}

/// Table whose spans exercise every combination of row and column spans.
///
/// ```text
/// row 0: [a a][b]
/// row 1: [a a][c]
/// row 2: [d d][c]
/// row 3: [e][f][c][g]
/// ```
pub fn mixed_span_table() -> Table<IntrinsicBox> {
    table_from_rows(
        TableStyle::default(),
        vec![
            vec![
                (IntrinsicBox::wrapped(30, 90, 12), 2, 2),
                (block(20, 40, 18), 1, 1),
            ],
            vec![(block(25, 25, 100), 3, 1)],
            vec![(IntrinsicBox::wrapped(40, 160, 10), 1, 2)],
            vec![
                (block(10, 30, 8), 1, 1),
                (IntrinsicBox::wrapped(15, 60, 9), 1, 1),
                (block(35, 35, 14), 1, 1),
            ],
        ],
    )
}

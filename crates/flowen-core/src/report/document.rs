//! Paginated formatted document rendering of a [`ReportTable`].
//!
//! The prototype this replaces fed unbounded row lists into a single-page
//! document builder; page-break handling here is the documented gap-fill.
//! Each page repeats the header row above its grid and carries a
//! `Page i of n` footer; pages are separated by a form feed.

use tabled::{builder::Builder, Table};

use crate::report::table::ReportTable;
use crate::FlowenResult;

const DEFAULT_ROWS_PER_PAGE: usize = 40;

#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub title: String,
    /// Data rows per page, exclusive of the repeated header row.
    pub rows_per_page: usize,
}

impl DocumentOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }

    pub fn rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows;
        self
    }
}

/// Render the table as a titled, paginated plain-text document. Zero rows
/// produce a single page holding the header-only grid.
pub fn to_document(table: &ReportTable, opts: &DocumentOptions) -> FlowenResult<Vec<u8>> {
    let per_page = opts.rows_per_page.max(1);
    let pages: Vec<&[Vec<crate::report::table::Cell>]> = if table.rows.is_empty() {
        vec![&[]]
    } else {
        table.rows.chunks(per_page).collect()
    };
    let total = pages.len();

    let mut out = String::new();
    for (i, page_rows) in pages.into_iter().enumerate() {
        if i > 0 {
            out.push('\u{0c}');
        }
        out.push_str(&opts.title);
        out.push('\n');
        out.push_str(&"=".repeat(opts.title.chars().count()));
        out.push('\n');
        out.push_str(&render_grid(&table.headers, page_rows));
        out.push('\n');
        out.push_str(&format!("Page {} of {}\n", i + 1, total));
    }

    Ok(out.into_bytes())
}

fn render_grid(headers: &[String], rows: &[Vec<crate::report::table::Cell>]) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for row in rows {
        builder.push_record(row.iter().map(|c| c.render()));
    }
    Table::from(builder).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::table::Cell;

    fn table_with_rows(n: usize) -> ReportTable {
        ReportTable {
            headers: vec!["Account".into()],
            rows: (0..n).map(|i| vec![Cell::Text(format!("A-{i}"))]).collect(),
        }
    }

    #[test]
    fn rows_beyond_page_capacity_break_pages() {
        let table = table_with_rows(7);
        let opts = DocumentOptions::new("Flowen Debtor Report").rows_per_page(3);
        let text = String::from_utf8(to_document(&table, &opts).unwrap()).unwrap();
        // 7 rows at 3 per page is 3 pages, separated by form feeds.
        assert_eq!(text.matches('\u{0c}').count(), 2);
        assert_eq!(text.matches("Flowen Debtor Report").count(), 3);
        assert!(text.contains("Page 1 of 3"));
        assert!(text.contains("Page 3 of 3"));
        // The header row repeats on every page.
        assert_eq!(text.matches("Account").count(), 3);
    }

    #[test]
    fn zero_rows_is_a_single_header_only_page() {
        let table = table_with_rows(0);
        let opts = DocumentOptions::new("Empty Report");
        let text = String::from_utf8(to_document(&table, &opts).unwrap()).unwrap();
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("Account"));
        assert_eq!(text.matches('\u{0c}').count(), 0);
    }
}

//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, Width, object::Rows},
};

/// Widest a single cell may render before it is wrapped
const MAX_CELL_WIDTH: usize = 80;

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Width::wrap(MAX_CELL_WIDTH)))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format `(label, value)` pairs as a two-column detail view
pub fn format_details(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {}", label, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "MESSAGE")]
        message: String,
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<TestRow> = vec![];
        assert_eq!(format_table(&items), "No results found.");
    }

    #[test]
    fn test_format_table_rows() {
        let items = vec![
            TestRow {
                id: "1".to_string(),
                message: "First".to_string(),
            },
            TestRow {
                id: "2".to_string(),
                message: "Second".to_string(),
            },
        ];

        let result = format_table(&items);

        assert!(result.contains("ID"));
        assert!(result.contains("MESSAGE"));
        assert!(result.contains("First"));
        assert!(result.contains("Second"));
        // Rounded style uses ╭ for top-left corner
        assert!(result.contains("╭"));
    }

    #[test]
    fn test_long_cells_are_wrapped() {
        let items = vec![TestRow {
            id: "1".to_string(),
            message: "x".repeat(200),
        }];

        let result = format_table(&items);
        assert!(result.lines().all(|line| line.chars().count() < 200));
    }

    #[test]
    fn test_format_details_aligns_labels() {
        let out = format_details(&[("ID", "abc".into()), ("STATE", "open".into())]);
        assert_eq!(out, "ID     abc\nSTATE  open");
    }
}

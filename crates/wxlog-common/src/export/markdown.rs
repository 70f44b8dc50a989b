//! Markdown table export

use super::{single_line, DISPLAY_TIMESTAMP_FORMAT};
use crate::types::WeatherRecord;

const HEADER: &str = "| ID | Query | Location | Date | Temp |";
const SEPARATOR: &str = "|----|-------|----------|------|------|";

/// Render records as a five-column pipe table
pub fn render(records: &[WeatherRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(HEADER.to_string());
    lines.push(SEPARATOR.to_string());

    for r in records {
        lines.push(format!(
            "| {} | {} | {} | {} | {:?} |",
            r.id,
            cell(&r.query),
            cell(&r.location),
            r.date_queried.format(DISPLAY_TIMESTAMP_FORMAT),
            r.temperature
        ));
    }

    lines.join("\n")
}

/// Keep a value inside its column
fn cell(value: &str) -> String {
    single_line(value).replace('|', "\\|")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    /// Split a table row on unescaped pipes
    fn columns(row: &str) -> Vec<String> {
        let mut cols = Vec::new();
        let mut current = String::new();
        let mut escaped = false;
        for ch in row.trim().trim_start_matches('|').trim_end_matches('|').chars() {
            match ch {
                '\\' if !escaped => {
                    escaped = true;
                    current.push(ch);
                    continue;
                },
                '|' if !escaped => cols.push(std::mem::take(&mut current).trim().to_string()),
                _ => current.push(ch),
            }
            escaped = false;
        }
        cols.push(current.trim().to_string());
        cols
    }

    #[test]
    fn test_table_layout() {
        let output = render(&fixtures::sample());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "| ID | Query | Location | Date | Temp |");
        assert_eq!(lines[1], "|----|-------|----------|------|------|");
        assert_eq!(
            lines[2],
            "| 1 | Paris | Paris, France | 2024-01-01 09:30:00 | 7.2 |"
        );
        assert_eq!(
            lines[4],
            "| 3 | New York | New York, United States | 2024-01-01 09:30:00 | -1.0 |"
        );
    }

    #[test]
    fn test_every_row_has_five_columns() {
        let mut records = fixtures::sample();
        records.push(fixtures::record(4, "pipe | query", "Line\nbreak, Nowhere", 0.5));

        let output = render(&records);
        let rows: Vec<&str> = output.lines().skip(2).collect();

        assert_eq!(rows.len(), records.len());
        for row in rows {
            assert_eq!(columns(row).len(), 5, "row: {row}");
        }
    }

    #[test]
    fn test_empty_collection() {
        let output = render(&[]);
        assert_eq!(output.lines().count(), 2);
    }
}

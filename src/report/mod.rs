//! Report fetching and raw table extraction.
//!
//! The reporting endpoint returns an HTML page whose first table carries the
//! training plan rows. A saved CSV export of the same table can be used as an
//! offline source.

use std::collections::HashSet;
use std::path::Path;

use log::debug;
use url::Url;

use crate::error::{PlanError, Result};

/// Columns never carried into the pipeline.
const DROPPED_COLUMNS: [&str; 1] = ["About"];

/// Connection details for the reporting endpoint.
#[derive(Debug, Clone)]
pub struct ReportSource {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// The raw tabular document: normalized headers plus untyped string cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from raw headers and rows.
    ///
    /// Headers are normalized (spaces to underscores), dropped columns are
    /// removed, rows are padded or truncated to the header count and exact
    /// duplicates are discarded keeping the first occurrence.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> RawTable {
        let mut headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(headers.len(), String::new());
                row
            })
            .collect();

        for dropped in DROPPED_COLUMNS {
            if let Some(idx) = headers.iter().position(|h| h == dropped) {
                headers.remove(idx);
                for row in &mut rows {
                    row.remove(idx);
                }
            }
        }

        let mut seen: HashSet<Vec<String>> = HashSet::new();
        rows.retain(|row| seen.insert(row.clone()));

        RawTable { headers, rows }
    }

    /// Index of a column by normalized name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// "Training Group" -> "Training_Group".
fn normalize_header(header: &str) -> String {
    header.trim().replace(' ', "_")
}

/// Fetch the named report and extract its table.
///
/// One attempt, no retry: a transport error or non-2xx status is fatal.
pub fn fetch_report(source: &ReportSource, report: &str) -> Result<RawTable> {
    let url = Url::parse_with_params(&source.url, &[("report", report), ("updategroup", "true")])
        .map_err(|e| PlanError::Fetch(format!("invalid report URL {}: {}", source.url, e)))?;

    debug!("fetching report {} from {}", report, source.url);

    let client = reqwest::blocking::Client::new();
    let response = client
        .get(url.as_str())
        .basic_auth(&source.username, Some(&source.password))
        .send()?
        .error_for_status()?;

    let body = response.text()?;
    parse_report_html(&body)
}

/// Extract the first table of an HTML report.
pub fn parse_report_html(html: &str) -> Result<RawTable> {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table")
        .map_err(|e| PlanError::Report(format!("invalid selector: {:?}", e)))?;
    let header_selector = Selector::parse("th")
        .map_err(|e| PlanError::Report(format!("invalid selector: {:?}", e)))?;
    let row_selector = Selector::parse("tr")
        .map_err(|e| PlanError::Report(format!("invalid selector: {:?}", e)))?;
    let cell_selector = Selector::parse("td")
        .map_err(|e| PlanError::Report(format!("invalid selector: {:?}", e)))?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| PlanError::Report("no table found in report".to_string()))?;

    let headers: Vec<String> = table
        .select(&header_selector)
        .map(|th| th.text().collect::<String>().trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(PlanError::Report("report table has no header row".to_string()));
    }

    let mut rows = Vec::new();
    for tr in table.select(&row_selector) {
        let cells: Vec<String> = tr
            .select(&cell_selector)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        // Header rows carry <th> cells only
        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    debug!("report table: {} columns, {} rows", headers.len(), rows.len());
    Ok(RawTable::new(headers, rows))
}

/// Read a saved report table from a CSV file.
pub fn read_report_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.trim().to_string()).collect());
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_report_html() {
        let html = r#"
            <html><body><table>
            <tr><th>Sport</th><th>Training Group</th><th>About</th></tr>
            <tr><td> Fencing </td><td>Fencing</td><td>x</td></tr>
            <tr><td>Fencing</td><td>Fencing</td><td>x</td></tr>
            <tr><td>Squash</td><td>Squash</td><td>y</td></tr>
            </table></body></html>
        "#;

        let table = parse_report_html(html).unwrap();
        assert_eq!(table.headers, vec!["Sport", "Training_Group"]);
        // About dropped, whitespace trimmed, duplicate row removed
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Fencing", "Fencing"]);
        assert_eq!(table.rows[1], vec!["Squash", "Squash"]);
    }

    #[test]
    fn test_parse_report_html_without_table() {
        assert!(parse_report_html("<html><body>empty</body></html>").is_err());
    }

    #[test]
    fn test_column_lookup() {
        let table = RawTable::new(
            vec!["Sport".to_string(), "Training Group".to_string()],
            vec![],
        );
        assert_eq!(table.column("Training_Group"), Some(1));
        assert_eq!(table.column("Coach"), None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = RawTable::new(
            vec!["Sport".to_string(), "Venue".to_string()],
            vec![vec!["Padel".to_string()]],
        );
        assert_eq!(table.rows[0], vec!["Padel", ""]);
    }

    #[test]
    fn test_read_report_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Sport,Training Group,About").unwrap();
        writeln!(file, "Fencing,Fencing,x").unwrap();
        writeln!(file, "Fencing,Fencing,x").unwrap();
        file.flush().unwrap();

        let table = read_report_csv(file.path()).unwrap();
        assert_eq!(table.headers, vec!["Sport", "Training_Group"]);
        assert_eq!(table.rows, vec![vec!["Fencing", "Fencing"]]);
    }
}

// Locating and reading the per-year vote tables.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;
use snafu::prelude::*;

use crate::summary::{
    CsvTableSnafu, EmptyDataDirSnafu, ListingDataSnafu, OpeningTableSnafu, SummaryResult,
};

/// One table as found on disk: the header row and the data rows below it.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

/// The year identifier of a table file is its file stem.
pub fn year_id(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Lists the table files under `dir` in file name order, optionally keeping
/// only the requested years.
pub fn list_tables(dir: &str, years: &Option<Vec<String>>) -> SummaryResult<Vec<String>> {
    let mut paths: Vec<String> = Vec::new();
    let entries = fs::read_dir(dir).context(ListingDataSnafu { path: dir })?;
    for entry in entries {
        let entry = entry.context(ListingDataSnafu { path: dir })?;
        let path = entry.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("tsv") | Some("csv") => paths.push(path.display().to_string()),
            _ => {}
        }
    }
    paths.sort();
    if let Some(years) = years {
        paths.retain(|path| years.iter().any(|year| *year == year_id(path)));
    }
    ensure!(!paths.is_empty(), EmptyDataDirSnafu { path: dir });
    Ok(paths)
}

/// Reads one tab-separated table. The data section ends at the first blank
/// line, anything below it is ignored.
pub fn read_table(path: &str) -> SummaryResult<RawTable> {
    let contents = fs::read_to_string(path).context(OpeningTableSnafu { path })?;
    let section = data_section(&contents);
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(section.as_bytes());
    let header: Vec<String> = rdr
        .headers()
        .context(CsvTableSnafu { path })?
        .iter()
        .map(|column| column.to_string())
        .collect();
    debug!("read_table: {}: header: {:?}", path, header);

    let mut rows: Vec<HashMap<String, String>> = Vec::new();
    for record in rdr.records() {
        let record = record.context(CsvTableSnafu { path })?;
        let mut row: HashMap<String, String> = HashMap::new();
        for (idx, column) in header.iter().enumerate() {
            if let Some(value) = record.get(idx) {
                row.insert(column.clone(), value.to_string());
            }
        }
        rows.push(row);
    }
    Ok(RawTable { header, rows })
}

// The csv reader silently skips fully blank lines, so the cut has to happen
// on the raw text. Lines of only tabs still come through as records of empty
// cells; the table parser stops on those.
fn data_section(contents: &str) -> String {
    let lines: Vec<&str> = contents
        .lines()
        .take_while(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

// Turning summary rows into human facing reports.

use std::fs;

use log::warn;
use serde_json::json;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use text_diff::print_diff;

use score_voting::{ReportRules, SummaryRow};

use crate::summary::{OpeningJsonSnafu, ParsingJsonSnafu, SummaryResult, WritingOutputSnafu};

/// The JSON summary: the resolved report options and one object per row.
pub fn summary_json(rows: &[SummaryRow], rules: &ReportRules, title: &str) -> JSValue {
    let js_rows: Vec<JSValue> = rows
        .iter()
        .map(|row| {
            json!({
                "from": row.from,
                "to": row.to,
                "score": row.score,
                "votingCount": row.voting_count,
                "weight": format!("{:.1}", row.weight()),
            })
        })
        .collect();
    json!({
        "config": {
            "title": title,
            "minVote": rules.min_vote,
            "limit": rules.limit,
            "minimumAverage": rules.minimum_average,
        },
        "rows": js_rows,
    })
}

/// One line per voter: the averaged scores of its favourite contestants and
/// the participation count.
pub fn render_text(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    let mut idx = 0;
    while idx < rows.len() {
        let voter = rows[idx].from.clone();
        out.push_str(&voter);
        out.push(':');
        let mut voting_count = 0;
        while idx < rows.len() && rows[idx].from == voter {
            let row = &rows[idx];
            out.push_str(&format!("\t{:.1} {}", row.weight(), row.to));
            voting_count = row.voting_count;
            idx += 1;
        }
        out.push_str(&format!("\t({} votings)\n", voting_count));
    }
    out
}

/// A Graphviz digraph of the voting behaviour: one weighted edge per row.
pub fn render_dot(rows: &[SummaryRow], title: &str) -> String {
    let mut out = String::new();
    out.push_str("digraph voting {\n");
    out.push_str(&format!("    label={:?};\n", title));
    out.push_str("    rankdir=LR;\n");
    for row in rows {
        out.push_str(&format!(
            "    {:?} -> {:?} [label=\"{:.1}\", penwidth={:.2}];\n",
            row.from,
            row.to,
            row.weight(),
            0.5 + row.weight() / 3.0
        ));
    }
    out.push_str("}\n");
    out
}

/// Writes the report to the given location, or to the standard output when
/// the location is empty or 'stdout'.
pub fn write_report(report: &str, out: &Option<String>) -> SummaryResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", report);
            Ok(())
        }
        Some(path) => fs::write(path, report).context(WritingOutputSnafu { path }),
    }
}

/// Compares the computed summary against a reference file and fails on any
/// difference.
pub fn check_reference(path: &str, summary: &JSValue) -> SummaryResult<()> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let reference: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    let pretty_summary = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty_summary {
        warn!("Found differences with the reference summary");
        print_diff(pretty_reference.as_str(), pretty_summary.as_str(), "\n");
        whatever!("Difference detected between computed summary and reference summary");
    }
    Ok(())
}

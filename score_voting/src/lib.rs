mod builder;
mod config;
pub mod manual;

use log::{debug, info};

use std::collections::{BTreeSet, HashMap};

pub use crate::builder::*;
pub use crate::config::*;

/// Header columns that never denote a voter.
fn is_reserved(column: &str) -> bool {
    let lower = column.to_lowercase();
    lower == "contestant" || lower == "total score"
}

/// The voter columns of a table header: every column except the reserved
/// ones, in header order.
pub fn voter_columns(header: &[String]) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for column in header {
        if !is_reserved(column) && !res.contains(column) {
            res.push(column.clone());
        }
    }
    res
}

fn contestant_column(header: &[String]) -> Result<&String, ParseError> {
    let matches: Vec<&String> = header
        .iter()
        .filter(|column| column.to_lowercase() == "contestant")
        .collect();
    match matches.as_slice() {
        [single] => Ok(single),
        _ => Err(ParseError::ContestantColumn {
            found: matches.len(),
        }),
    }
}

/// Parses one year of votes.
///
/// Each row maps column names to raw cell text. Blank and `-` cells
/// normalize to 0; anything else must be a non-negative integer. A vote is
/// retained only when its score reaches `min_vote`. The first all-empty row
/// ends the data section, any rows after it are ignored.
///
/// The returned voter names come from the header alone, so a voter whose
/// votes were all below the floor is still reported.
pub fn parse_table(
    header: &[String],
    rows: &[HashMap<String, String>],
    min_vote: Score,
) -> Result<ParsedTable, ParseError> {
    let contestant_col = contestant_column(header)?;
    let voters = voter_columns(header);

    let mut table = TableBuilder::new();
    let mut row_count: usize = 0;
    for (idx, row) in rows.iter().enumerate() {
        if row.values().all(|cell| cell.is_empty()) {
            break;
        }
        row_count += 1;
        let contestant = match row.get(contestant_col) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ParseError::MissingContestant { row: idx + 1 }),
        };
        for voter in voters.iter() {
            let raw = row.get(voter).map(String::as_str).unwrap_or("");
            let score = match raw {
                "" | "-" => 0,
                cell => {
                    cell.trim()
                        .parse::<Score>()
                        .map_err(|_| ParseError::InvalidScore {
                            voter: voter.clone(),
                            contestant: contestant.clone(),
                            value: cell.to_string(),
                        })?
                }
            };
            if score >= min_vote {
                table.add(voter, contestant, score);
            }
        }
    }

    let stats = TableStats {
        rows: row_count,
        voter_columns: voters.len(),
    };
    debug!("parse_table: {:?}", stats);
    Ok(ParsedTable {
        votes: table.build(),
        voters,
        stats,
    })
}

/// The full corpus: one vote table per year, plus every voter name ever
/// observed in a header.
///
/// Built once during the read phase, then only traversed.
#[derive(Debug, Clone, Default)]
pub struct VoteStore {
    years: Vec<(String, VoteTable)>,
    voters: BTreeSet<String>,
}

impl VoteStore {
    pub fn new() -> VoteStore {
        VoteStore::default()
    }

    /// Registers one year of votes. Re-adding a year replaces its table
    /// entirely, it never merges. Voter names accumulate across years.
    pub fn add_year(&mut self, year: &str, table: VoteTable, voters: impl IntoIterator<Item = String>) {
        self.voters.extend(voters);
        match self.years.iter_mut().find(|(y, _)| y.as_str() == year) {
            Some((_, existing)) => *existing = table,
            None => self.years.push((year.to_string(), table)),
        }
    }

    /// Every voter name observed in any header, in ascending name order.
    pub fn all_voters(&self) -> impl Iterator<Item = &String> {
        self.voters.iter()
    }

    /// The year identifiers, in the order the years were added.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(|(year, _)| year.as_str())
    }

    pub fn table_for(&self, year: &str) -> Option<&VoteTable> {
        self.years
            .iter()
            .find(|(y, _)| y.as_str() == year)
            .map(|(_, table)| table)
    }

    /// Sums one voter's scores across every year of the corpus.
    ///
    /// The participation count is the number of years in which the voter
    /// cast at least one retained vote, not the number of years in which it
    /// appeared in a header. A voter with no retained votes anywhere yields
    /// an empty total with a count of 0.
    pub fn aggregate(&self, voter: &str) -> VoterTotals {
        let mut totals = VoterTotals::default();
        for (_, table) in self.years.iter() {
            if let Some(scores) = table.scores(voter) {
                totals.voting_count += 1;
                for (contestant, score) in scores.iter() {
                    totals.add(contestant, *score as u64);
                }
            }
        }
        totals
    }
}

/// Builds the ranked summary rows for every known voter.
///
/// Rows are ordered by voter name ascending, then by descending total score
/// within a voter (ties keep discovery order). Per voter, the totals are
/// truncated to `rules.limit` first, then filtered against the average
/// floor. Voters with a participation count of 0 contribute no rows.
pub fn build_summary(store: &VoteStore, rules: &ReportRules) -> Vec<SummaryRow> {
    info!(
        "build_summary: {} years, {} known voters",
        store.years.len(),
        store.voters.len()
    );
    let mut rows: Vec<SummaryRow> = Vec::new();
    for voter in store.all_voters() {
        let totals = store.aggregate(voter);
        if totals.voting_count == 0 {
            debug!("build_summary: no retained votes for {}", voter);
            continue;
        }
        let count = totals.voting_count;
        for (contestant, score) in totals.ranked(rules.limit) {
            if score as f64 > rules.minimum_average * count as f64 {
                rows.push(SummaryRow {
                    from: voter.clone(),
                    to: contestant,
                    score,
                    voting_count: count,
                });
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    fn row(cells: &[(&str, &str)]) -> HashMap<String, String> {
        cells
            .iter()
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect()
    }

    fn entry_count(table: &VoteTable) -> usize {
        table
            .voters()
            .map(|voter| table.scores(voter).unwrap().len())
            .sum()
    }

    #[test]
    fn zero_scores_retained_at_default_floor() {
        let header = header(&["Contestant", "A", "B", "Total score"]);
        let rows = vec![row(&[
            ("Contestant", "X"),
            ("A", "8"),
            ("B", "-"),
            ("Total score", "8"),
        ])];
        let parsed = parse_table(&header, &rows, 0).unwrap();
        let expected_a = [("X".to_string(), 8)];
        let expected_b = [("X".to_string(), 0)];
        assert_eq!(parsed.votes.scores("A"), Some(&expected_a[..]));
        assert_eq!(parsed.votes.scores("B"), Some(&expected_b[..]));
        assert_eq!(parsed.voters, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn floor_drops_entries_entirely() {
        let header = header(&["Contestant", "A", "B", "Total score"]);
        let rows = vec![row(&[
            ("Contestant", "X"),
            ("A", "8"),
            ("B", "-"),
            ("Total score", "8"),
        ])];
        let parsed = parse_table(&header, &rows, 1).unwrap();
        let expected_a = [("X".to_string(), 8)];
        assert_eq!(parsed.votes.scores("A"), Some(&expected_a[..]));
        // Dropped below the floor: no key at all, not a zero entry.
        assert!(!parsed.votes.contains_voter("B"));
        // The header-derived voter names do not depend on filtering.
        assert_eq!(parsed.voters, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn reparse_is_identical() {
        let header = header(&["Contestant", "A", "B"]);
        let rows = vec![
            row(&[("Contestant", "X"), ("A", "8"), ("B", "4")]),
            row(&[("Contestant", "Y"), ("A", "-"), ("B", "")]),
        ];
        let first = parse_table(&header, &rows, 2).unwrap();
        let second = parse_table(&header, &rows, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn raising_floor_never_adds_entries() {
        let header = header(&["Contestant", "A", "B", "C"]);
        let rows = vec![
            row(&[("Contestant", "X"), ("A", "12"), ("B", "0"), ("C", "7")]),
            row(&[("Contestant", "Y"), ("A", "3"), ("B", "-"), ("C", "10")]),
        ];
        let mut previous = usize::MAX;
        for floor in 0..14 {
            let parsed = parse_table(&header, &rows, floor).unwrap();
            let count = entry_count(&parsed.votes);
            assert!(count <= previous, "floor {} grew the table", floor);
            previous = count;
        }
    }

    #[test]
    fn stops_at_first_empty_row() {
        let header = header(&["Contestant", "A"]);
        let rows = vec![
            row(&[("Contestant", "X"), ("A", "5")]),
            row(&[("Contestant", ""), ("A", "")]),
            // Trailing commentary after the sentinel, never parsed.
            row(&[("Contestant", "Source: press kit"), ("A", "n/a")]),
        ];
        let parsed = parse_table(&header, &rows, 0).unwrap();
        assert_eq!(parsed.stats.rows, 1);
        let expected = [("X".to_string(), 5)];
        assert_eq!(parsed.votes.scores("A"), Some(&expected[..]));
    }

    #[test]
    fn invalid_score_cell_fails() {
        let header = header(&["Contestant", "A"]);
        let rows = vec![row(&[("Contestant", "X"), ("A", "eight")])];
        let err = parse_table(&header, &rows, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidScore {
                voter: "A".to_string(),
                contestant: "X".to_string(),
                value: "eight".to_string(),
            }
        );
    }

    #[test]
    fn negative_score_fails() {
        let header = header(&["Contestant", "A"]);
        let rows = vec![row(&[("Contestant", "X"), ("A", "-3")])];
        assert!(parse_table(&header, &rows, 0).is_err());
    }

    #[test]
    fn missing_contestant_fails() {
        let header = header(&["Contestant", "A"]);
        let rows = vec![
            row(&[("Contestant", "X"), ("A", "1")]),
            row(&[("Contestant", ""), ("A", "2")]),
        ];
        let err = parse_table(&header, &rows, 0).unwrap_err();
        assert_eq!(err, ParseError::MissingContestant { row: 2 });
    }

    #[test]
    fn ambiguous_contestant_header_fails() {
        let header = header(&["Contestant", "CONTESTANT", "A"]);
        let rows = vec![row(&[("Contestant", "X"), ("CONTESTANT", "X"), ("A", "1")])];
        let err = parse_table(&header, &rows, 0).unwrap_err();
        assert_eq!(err, ParseError::ContestantColumn { found: 2 });
    }

    fn two_year_store() -> VoteStore {
        let mut store = VoteStore::new();

        let mut builder = TableBuilder::new();
        builder.add("A", "X", 5);
        store.add_year("2015", builder.build(), vec!["A".to_string(), "Z".to_string()]);

        let mut builder = TableBuilder::new();
        builder.add("A", "X", 7);
        builder.add("A", "Y", 3);
        store.add_year("2016", builder.build(), vec!["A".to_string(), "Z".to_string()]);

        store
    }

    #[test]
    fn aggregate_sums_across_years() {
        let store = two_year_store();
        let totals = store.aggregate("A");
        assert_eq!(
            totals.scores,
            vec![("X".to_string(), 12), ("Y".to_string(), 3)]
        );
        assert_eq!(totals.voting_count, 2);
    }

    #[test]
    fn aggregate_without_retained_votes_is_empty() {
        let store = two_year_store();
        // "Z" sits in every header but never cast a retained vote.
        assert!(store.all_voters().any(|v| v == "Z"));
        let totals = store.aggregate("Z");
        assert_eq!(totals, VoterTotals::default());
    }

    #[test]
    fn filtered_voter_emits_no_rows() {
        let store = two_year_store();
        let rows = build_summary(&store, &ReportRules::DEFAULT_RULES);
        assert!(rows.iter().all(|row| row.from != "Z"));
    }

    #[test]
    fn add_year_replaces_instead_of_merging() {
        let mut store = VoteStore::new();

        let mut builder = TableBuilder::new();
        builder.add("A", "X", 5);
        builder.add("B", "X", 2);
        store.add_year("2015", builder.build(), vec!["A".to_string(), "B".to_string()]);

        let mut builder = TableBuilder::new();
        builder.add("A", "Y", 4);
        store.add_year("2015", builder.build(), vec!["A".to_string()]);

        assert_eq!(store.years().collect::<Vec<_>>(), vec!["2015"]);
        let table = store.table_for("2015").unwrap();
        assert!(!table.contains_voter("B"));
        let totals = store.aggregate("A");
        assert_eq!(totals.scores, vec![("Y".to_string(), 4)]);
        // The voter set keeps every name ever observed.
        assert!(store.all_voters().any(|v| v == "B"));
    }

    #[test]
    fn ranked_breaks_ties_by_discovery_order() {
        let mut totals = VoterTotals::default();
        totals.add("X", 4);
        totals.add("Y", 9);
        totals.add("Z", 4);
        totals.voting_count = 1;
        assert_eq!(
            totals.ranked(None),
            vec![
                ("Y".to_string(), 9),
                ("X".to_string(), 4),
                ("Z".to_string(), 4),
            ]
        );
    }

    #[test]
    fn limit_truncates_before_average_filter() {
        let mut store = VoteStore::new();
        let mut builder = TableBuilder::new();
        builder.add("A", "X", 9);
        builder.add("A", "Y", 5);
        builder.add("A", "Z", 5);
        store.add_year("2016", builder.build(), vec!["A".to_string()]);

        let rules = ReportRules {
            min_vote: 0,
            limit: Some(2),
            minimum_average: 4.0,
        };
        let rows = build_summary(&store, &rules);
        // "Z" clears the average floor but falls to the limit, which is
        // applied first.
        assert_eq!(
            rows.iter().map(|r| r.to.as_str()).collect::<Vec<_>>(),
            vec!["X", "Y"]
        );
    }

    #[test]
    fn summary_rows_ordered_and_filtered() {
        let mut store = VoteStore::new();

        let mut builder = TableBuilder::new();
        builder.add("B", "X", 2);
        builder.add("B", "Y", 8);
        builder.add("A", "X", 6);
        store.add_year("2015", builder.build(), vec!["A".to_string(), "B".to_string()]);

        let mut builder = TableBuilder::new();
        builder.add("A", "Y", 0);
        builder.add("A", "X", 6);
        store.add_year("2016", builder.build(), vec!["A".to_string(), "B".to_string()]);

        let rules = ReportRules::DEFAULT_RULES;
        let rows = build_summary(&store, &rules);

        // Voters ascending, scores non-increasing within a voter.
        let voters: Vec<&str> = rows.iter().map(|r| r.from.as_str()).collect();
        assert_eq!(voters, vec!["A", "B", "B"]);
        for pair in rows.windows(2) {
            if pair[0].from == pair[1].from {
                assert!(pair[0].score >= pair[1].score);
            }
        }
        // The strict average floor holds for every row.
        for row in rows.iter() {
            assert!(row.score as f64 > rules.minimum_average * row.voting_count as f64);
        }

        assert_eq!(rows[0].to, "X");
        assert_eq!(rows[0].score, 12);
        assert_eq!(rows[0].voting_count, 2);
        assert!((rows[0].weight() - 6.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].to, "Y");
        assert_eq!(rows[1].score, 8);
        assert_eq!(rows[1].voting_count, 1);
    }

    #[test]
    fn voter_columns_skip_reserved_names() {
        let header = header(&["Contestant", "Alba", "Total Score", "Borland"]);
        assert_eq!(
            voter_columns(&header),
            vec!["Alba".to_string(), "Borland".to_string()]
        );
    }
}

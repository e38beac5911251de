// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A single score cast by a voter for a contestant.
///
/// Scores are non-negative. A blank or `-` cell normalizes to 0.
pub type Score = u32;

/// The options that govern a summary.
#[derive(PartialEq, Debug, Clone)]
pub struct ReportRules {
    /// Minimum score for an individual vote to be retained during parsing.
    /// Votes below the floor are dropped entirely, they are not stored as 0.
    pub min_vote: Score,
    /// Maximum number of contestants reported per voter. `None` reports all.
    pub limit: Option<usize>,
    /// Minimum average score (total / participation count) for a
    /// (voter, contestant) pair to appear in the summary. The comparison is
    /// strict: a pair is kept when `total > minimum_average * count`.
    pub minimum_average: f64,
}

impl ReportRules {
    pub const DEFAULT_RULES: ReportRules = ReportRules {
        min_vote: 0,
        limit: None,
        minimum_average: 0.0,
    };
}

// ******** Output data structures *********

/// Diagnostic counts for one parsed table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct TableStats {
    /// Data rows processed before the end-of-data sentinel.
    pub rows: usize,
    /// Voter columns declared by the header.
    pub voter_columns: usize,
}

/// The outcome of parsing one year of votes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedTable {
    /// The retained votes.
    pub votes: crate::VoteTable,
    /// The voter names declared by the header, in header order. Independent
    /// of the filtering outcome: a voter whose votes were all dropped is
    /// still listed here.
    pub voters: Vec<String>,
    pub stats: TableStats,
}

/// One voter's scoring behaviour summed over every year it participated in.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoterTotals {
    /// Total score per contestant, in the order the contestants were first
    /// seen across the years.
    pub scores: Vec<(String, u64)>,
    /// Number of years in which the voter cast at least one retained vote.
    pub voting_count: u32,
}

impl VoterTotals {
    pub(crate) fn add(&mut self, contestant: &str, score: u64) {
        match self
            .scores
            .iter_mut()
            .find(|(name, _)| name.as_str() == contestant)
        {
            Some((_, total)) => *total += score,
            None => self.scores.push((contestant.to_string(), score)),
        }
    }

    /// The contestants ordered by descending total score, optionally
    /// truncated to the `limit` best. Ties keep their discovery order.
    pub fn ranked(&self, limit: Option<usize>) -> Vec<(String, u64)> {
        let mut sorted = self.scores.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = limit {
            sorted.truncate(limit);
        }
        sorted
    }
}

/// One edge of the summary: a voter, one of its favourite contestants, and
/// the accumulated score.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SummaryRow {
    pub from: String,
    pub to: String,
    /// Total raw score over all years of participation.
    pub score: u64,
    /// Number of years in which the voter cast at least one retained vote.
    /// Always positive: voters with no retained votes produce no rows.
    pub voting_count: u32,
}

impl SummaryRow {
    /// Average score per participating year.
    pub fn weight(&self) -> f64 {
        self.score as f64 / self.voting_count as f64
    }
}

/// Errors that fail the parse of one year's table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ParseError {
    /// The header does not contain exactly one "Contestant" column
    /// (case-insensitive).
    ContestantColumn { found: usize },
    /// A score cell is non-blank, not "-", and not a non-negative integer.
    InvalidScore {
        voter: String,
        contestant: String,
        value: String,
    },
    /// A data row has no contestant name.
    MissingContestant { row: usize },
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::ContestantColumn { found } => write!(
                f,
                "expected exactly one contestant column in the header, found {}",
                found
            ),
            ParseError::InvalidScore {
                voter,
                contestant,
                value,
            } => write!(
                f,
                "invalid score {:?} cast by {} for {}",
                value, voter, contestant
            ),
            ParseError::MissingContestant { row } => {
                write!(f, "data row {} has no contestant name", row)
            }
        }
    }
}

use std::collections::HashMap;

use crate::config::Score;

/// One year of votes: for each voter, the retained (contestant, score) pairs
/// in the order the contestants appeared in the table.
///
/// The contestant order matters: it is the tie-break order when totals are
/// ranked.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoteTable {
    votes: HashMap<String, Vec<(String, Score)>>,
}

impl VoteTable {
    /// True when the voter cast at least one retained vote this year.
    pub fn contains_voter(&self, voter: &str) -> bool {
        self.votes.contains_key(voter)
    }

    /// The retained (contestant, score) pairs of one voter, in row order.
    pub fn scores(&self, voter: &str) -> Option<&[(String, Score)]> {
        self.votes.get(voter).map(|scores| scores.as_slice())
    }

    /// The voters with at least one retained vote this year.
    pub fn voters(&self) -> impl Iterator<Item = &String> {
        self.votes.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

/// A builder for assembling a [VoteTable] one vote at a time.
///
/// ```
/// use score_voting::TableBuilder;
///
/// let mut builder = TableBuilder::new();
/// builder.add("Alba", "Aria", 8);
/// builder.add("Alba", "Belmont", 0);
/// let table = builder.build();
///
/// let expected = [("Aria".to_string(), 8), ("Belmont".to_string(), 0)];
/// assert_eq!(table.scores("Alba"), Some(&expected[..]));
/// assert!(!table.contains_voter("Borland"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    votes: HashMap<String, Vec<(String, Score)>>,
}

impl TableBuilder {
    pub fn new() -> TableBuilder {
        TableBuilder::default()
    }

    /// Records a score. Re-adding the same (voter, contestant) pair replaces
    /// the previous score; a new contestant is appended after the ones
    /// already seen for this voter.
    pub fn add(&mut self, voter: &str, contestant: &str, score: Score) {
        let scores = self.votes.entry(voter.to_string()).or_default();
        match scores
            .iter_mut()
            .find(|(name, _)| name.as_str() == contestant)
        {
            Some((_, existing)) => *existing = score,
            None => scores.push((contestant.to_string(), score)),
        }
    }

    pub fn build(self) -> VoteTable {
        VoteTable { votes: self.votes }
    }
}

use crate::core::candidate::Candidate;
use crate::core::search::fuzzy::{FuzzyMatch, Score, indices_to_ranges, rank_candidates};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a, A> {
    pub candidate: &'a Candidate<A>,
    /// Position of the candidate in the list that was filtered.
    pub index: usize,
    pub score: Score,
    /// Char indices into the candidate label.
    pub matched_indices: Vec<usize>,
}

impl<A> MatchResult<'_, A> {
    pub fn ranges(&self) -> Vec<(usize, usize)> {
        indices_to_ranges(&self.matched_indices)
    }
}

pub type FilteredList<'a, A> = Vec<MatchResult<'a, A>>;

/// Candidates whose label contains `query` as a case-insensitive
/// subsequence, best match first. The result is rebuilt on every call.
pub fn filter<'a, A>(candidates: &'a [Candidate<A>], query: &str) -> FilteredList<'a, A> {
    let ranked = rank_candidates(query, candidates.iter().map(Candidate::label));
    attach(candidates, ranked)
}

pub fn filter_limited<'a, A>(
    candidates: &'a [Candidate<A>],
    query: &str,
    limit: usize,
) -> FilteredList<'a, A> {
    if limit == 0 {
        return Vec::new();
    }
    let mut ranked = rank_candidates(query, candidates.iter().map(Candidate::label));
    ranked.truncate(limit);
    attach(candidates, ranked)
}

fn attach<A>(candidates: &[Candidate<A>], ranked: Vec<FuzzyMatch>) -> FilteredList<'_, A> {
    ranked
        .into_iter()
        .filter_map(|entry| {
            candidates.get(entry.index).map(|candidate| MatchResult {
                candidate,
                index: entry.index,
                score: entry.score,
                matched_indices: entry.matched_indices,
            })
        })
        .collect()
}

use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub index: usize,
    pub score: Score,
    pub matched_indices: Vec<usize>,
}

impl FuzzyMatch {
    pub fn ranges(&self) -> Vec<(usize, usize)> {
        indices_to_ranges(&self.matched_indices)
    }
}

/// Match quality. Greater is better: fewer runs of consecutive matched
/// characters, then fewer skipped characters between them, then fewer runs
/// that start in the middle of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub runs: usize,
    pub gap: usize,
    pub mid_word_runs: usize,
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .runs
            .cmp(&self.runs)
            .then_with(|| other.gap.cmp(&self.gap))
            .then_with(|| other.mid_word_runs.cmp(&self.mid_word_runs))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns true when every char of `query` appears in `label` in order,
/// ignoring case. An empty query matches everything.
pub fn matches(query: &str, label: &str) -> bool {
    let mut label_chars = label.chars();
    query
        .chars()
        .all(|wanted| label_chars.any(|ch| chars_eq_ignore_case(wanted, ch)))
}

/// Char indices of the matched characters in `label`, or `None` when the
/// query is not a subsequence.
///
/// Every position that can end a match is tried, and the tightest window
/// ending there is found by scanning backward. The best scoring window wins;
/// on a tie the earliest one is kept. So "sp" in "Show panes split" reports
/// the `sp` of `split`, and "tab" in "Toggle tab" reports the word rather
/// than the leading `T`.
pub fn match_indices(query: &str, label: &str) -> Option<Vec<usize>> {
    let query: Vec<char> = query.chars().collect();
    if query.is_empty() {
        return Some(Vec::new());
    }
    let label: Vec<char> = label.chars().collect();

    let first_end = leftmost_end(&query, &label)?;
    let last = query[query.len() - 1];

    let mut best: Option<(Score, Vec<usize>)> = None;
    for end in first_end..label.len() {
        if !chars_eq_ignore_case(last, label[end]) {
            continue;
        }
        let Some(indices) = tightest_window_ending_at(&query, &label, end) else {
            continue;
        };
        let score = score_indices(&label, &indices);
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, indices));
        }
    }
    best.map(|(_, indices)| indices)
}

fn leftmost_end(query: &[char], label: &[char]) -> Option<usize> {
    let mut qpos = 0;
    for (cpos, ch) in label.iter().enumerate() {
        if chars_eq_ignore_case(query[qpos], *ch) {
            qpos += 1;
            if qpos == query.len() {
                return Some(cpos);
            }
        }
    }
    None
}

fn tightest_window_ending_at(query: &[char], label: &[char], end: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::with_capacity(query.len());
    let mut remaining = query.len();
    for cpos in (0..=end).rev() {
        if chars_eq_ignore_case(query[remaining - 1], label[cpos]) {
            indices.push(cpos);
            remaining -= 1;
            if remaining == 0 {
                indices.reverse();
                return Some(indices);
            }
        }
    }
    None
}

pub fn score_match(label: &str, matched_indices: &[usize]) -> Score {
    let chars: Vec<char> = label.chars().collect();
    score_indices(&chars, matched_indices)
}

fn score_indices(chars: &[char], matched_indices: &[usize]) -> Score {
    let mut score = Score::default();
    let mut previous: Option<usize> = None;

    for &idx in matched_indices {
        let starts_run = match previous {
            Some(prev) if idx == prev + 1 => false,
            Some(prev) => {
                score.gap += idx - prev - 1;
                true
            }
            None => true,
        };
        if starts_run {
            score.runs += 1;
            if !is_word_start(chars, idx) {
                score.mid_word_runs += 1;
            }
        }
        previous = Some(idx);
    }

    score
}

pub fn fuzzy_match(query: &str, label: &str) -> Option<(Score, Vec<usize>)> {
    let matched_indices = match_indices(query, label)?;
    Some((score_match(label, &matched_indices), matched_indices))
}

/// Ranks `labels` against `query`. Entries keep their position in the input
/// through `FuzzyMatch::index`; equal scores stay in input order.
pub fn rank_candidates<'a, I>(query: &str, labels: I) -> Vec<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked = Vec::new();
    for (index, label) in labels.into_iter().enumerate() {
        if query.is_empty() {
            ranked.push(FuzzyMatch {
                index,
                score: Score::default(),
                matched_indices: Vec::new(),
            });
            continue;
        }
        if let Some((score, matched_indices)) = fuzzy_match(query, label) {
            ranked.push(FuzzyMatch {
                index,
                score,
                matched_indices,
            });
        }
    }

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

pub fn indices_to_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    if indices.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = indices[0];
    let mut prev = indices[0];

    for &idx in indices.iter().skip(1) {
        if idx == prev + 1 {
            prev = idx;
            continue;
        }
        ranges.push((start, prev + 1));
        start = idx;
        prev = idx;
    }

    ranges.push((start, prev + 1));
    ranges
}

/// Compares the first code point of each char's lowercase form, so chars
/// that lowercase to several code points ('İ' to "i\u{307}") still match
/// the plain letter.
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(&b);
    }
    fold_case(a) == fold_case(b)
}

fn fold_case(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn is_word_start(chars: &[char], idx: usize) -> bool {
    idx == 0 || chars.get(idx - 1).is_some_and(|prev| !prev.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLIT_VERTICAL: &str = "[ | ] Split Vertical";

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches("", ""));
        assert!(matches("", "New Tab"));
        assert_eq!(match_indices("", "New Tab"), Some(Vec::new()));
    }

    #[test]
    fn prefix_and_missing_words() {
        assert!(matches("open", "Open Settings"));
        assert!(!matches("open", "Close Pane"));
    }

    #[test]
    fn tab_matches_every_tab_command() {
        for label in ["New Tab", "Close Tab", "Next Tab", "Prev Tab"] {
            assert!(matches("tab", label), "{label}");
        }
        assert!(!matches("tab", "Open Settings"));
    }

    #[test]
    fn order_of_query_chars_matters() {
        assert!(matches("sv", SPLIT_VERTICAL));
        assert!(!matches("vs", SPLIT_VERTICAL));
        assert_eq!(match_indices("sv", SPLIT_VERTICAL), Some(vec![6, 12]));
    }

    #[test]
    fn matched_chars_are_consumed() {
        assert!(!matches("aa", "a"));
        assert!(matches("aa", "banana"));
        assert_eq!(match_indices("oo", "Open"), None);
    }

    #[test]
    fn unicode_case_folding() {
        assert!(matches("ÉCRAN", "écran partagé"));
        assert!(matches("straße", "STRASSE Straße"));
        assert!(matches("σ", "ΣΊΣΥΦΟΣ"));
    }

    #[test]
    fn multi_code_point_lowercase_matches_plain_letter() {
        assert!(matches("i", "İstanbul"));
        assert!(matches("ist", "İstanbul"));
        assert_eq!(match_indices("is", "İstanbul"), Some(vec![0, 1]));
    }

    #[test]
    fn match_indices_prefers_tight_window() {
        assert_eq!(match_indices("tab", "Toggle tab"), Some(vec![7, 8, 9]));
        assert_eq!(match_indices("nt", "New Tab"), Some(vec![0, 4]));
    }

    #[test]
    fn match_indices_finds_later_contiguous_word() {
        assert_eq!(match_indices("sp", "Show panes split"), Some(vec![11, 12]));
        assert_eq!(match_indices("sp", "Swap pane"), Some(vec![0, 3]));
        assert_eq!(match_indices("pane", "Paste a pane"), Some(vec![8, 9, 10, 11]));
    }

    #[test]
    fn equal_windows_keep_the_earliest() {
        assert_eq!(match_indices("ab", "ab ab"), Some(vec![0, 1]));
    }

    #[test]
    fn match_indices_agrees_with_matches() {
        let labels = ["New Tab", "Close Pane", SPLIT_VERTICAL, "Open Media Controls"];
        for query in ["p", "tab", "omc", "xyz", "ppp", "sv"] {
            for label in labels {
                assert_eq!(
                    matches(query, label),
                    match_indices(query, label).is_some(),
                    "{query} / {label}"
                );
            }
        }
    }

    #[test]
    fn contiguous_match_scores_higher() {
        let contiguous = score_match("New Tab", &[4, 5, 6]);
        let scattered = score_match("Toggle all bars", &[0, 7, 11]);
        assert!(contiguous > scattered);
        assert_eq!(contiguous.runs, 1);
        assert_eq!(contiguous.gap, 0);
    }

    #[test]
    fn smaller_gap_wins_with_equal_runs() {
        let near = score_match("ab cd", &[0, 3]);
        let far = score_match("ab xxxxx cd", &[0, 9]);
        assert_eq!(near.runs, far.runs);
        assert!(near > far);
    }

    #[test]
    fn word_start_beats_mid_word() {
        let boundary = score_match("Split", &[0, 1]);
        let mid_word = score_match("Aspect", &[1, 2]);
        assert_eq!(boundary.runs, mid_word.runs);
        assert_eq!(boundary.gap, mid_word.gap);
        assert!(boundary > mid_word);
        assert_eq!(score_match("[-] Split", &[4]).mid_word_runs, 0);
    }

    #[test]
    fn rank_candidates_orders_by_score_then_input() {
        let labels = ["Toggle all bars", "Close Tab", "New Tab", "Tabs"];
        let ranked = rank_candidates("tab", labels);
        let order: Vec<usize> = ranked.iter().map(|entry| entry.index).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn rank_candidates_empty_query_keeps_everything_in_order() {
        let ranked = rank_candidates("", ["b", "a", "c"]);
        let order: Vec<usize> = ranked.iter().map(|entry| entry.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert!(ranked.iter().all(|entry| entry.matched_indices.is_empty()));
    }

    #[test]
    fn ranges_collapse_consecutive_indices() {
        assert_eq!(indices_to_ranges(&[]), Vec::<(usize, usize)>::new());
        assert_eq!(indices_to_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
    }
}

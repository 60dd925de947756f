use cmdpal::Candidate;
use cmdpal::core::search::fuzzy::{match_indices, matches};
use cmdpal::core::search::filter;
use proptest::prelude::*;

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z \\[\\]|\\-]{0,24}"
}

/// A label together with a query made from some of its chars, in order,
/// with the case of each picked char flipped at random.
fn label_and_subsequence() -> impl Strategy<Value = (String, String)> {
    label_strategy().prop_flat_map(|label| {
        let len = label.chars().count();
        (
            Just(label),
            proptest::collection::vec(any::<bool>(), len),
            proptest::collection::vec(any::<bool>(), len),
        )
            .prop_map(|(label, picks, flips)| {
                let query: String = label
                    .chars()
                    .zip(picks.iter().zip(flips.iter()))
                    .filter(|(_, (pick, _))| **pick)
                    .map(|(ch, (_, flip))| {
                        if *flip {
                            if ch.is_ascii_lowercase() {
                                ch.to_ascii_uppercase()
                            } else {
                                ch.to_ascii_lowercase()
                            }
                        } else {
                            ch
                        }
                    })
                    .collect();
                (label, query)
            })
    })
}

proptest! {
    #[test]
    fn empty_query_matches_any_label(label in "\\PC{0,32}") {
        prop_assert!(matches("", &label));
    }

    #[test]
    fn subsequences_always_match((label, query) in label_and_subsequence()) {
        prop_assert!(matches(&query, &label));

        let indices = match_indices(&query, &label).expect("subsequence should match");
        prop_assert_eq!(indices.len(), query.chars().count());
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));

        let label_chars: Vec<char> = label.chars().collect();
        for (idx, wanted) in indices.iter().zip(query.chars()) {
            prop_assert!(label_chars[*idx].eq_ignore_ascii_case(&wanted));
        }
    }

    #[test]
    fn missing_char_never_matches((label, query) in label_and_subsequence()) {
        let query = format!("{query}#");
        prop_assert!(!matches(&query, &label));
        prop_assert!(match_indices(&query, &label).is_none());
    }

    #[test]
    fn matches_agrees_with_match_indices(query in "[a-c]{0,4}", label in "[a-cA-C ]{0,12}") {
        prop_assert_eq!(matches(&query, &label), match_indices(&query, &label).is_some());
    }

    #[test]
    fn filter_is_a_stable_idempotent_subset(
        labels in proptest::collection::vec(label_strategy(), 0..20),
        query in "[a-z]{0,3}",
    ) {
        let candidates: Vec<Candidate<usize>> = labels
            .iter()
            .enumerate()
            .map(|(n, label)| Candidate::new(format!("c{n}"), label.clone(), n))
            .collect();

        let first = filter(&candidates, &query);
        let second = filter(&candidates, &query);
        prop_assert_eq!(&first, &second);

        let expected = labels.iter().filter(|label| matches(&query, label)).count();
        prop_assert_eq!(first.len(), expected);

        for pair in first.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
    }

    #[test]
    fn trailing_whole_word_query_scores_as_one_run(
        scattered in "[a-zA-Z ]{0,24}",
        query in "[a-z]{1,6}",
    ) {
        let label = format!("{scattered} {query}");
        let candidates = vec![Candidate::new("only", label.clone(), ())];
        let filtered = filter(&candidates, &query);
        prop_assert_eq!(filtered.len(), 1);

        let score = filtered[0].score;
        prop_assert_eq!(score.runs, 1, "label {:?}", label);
        prop_assert_eq!(score.gap, 0);
        prop_assert_eq!(score.mid_word_runs, 0);
    }
}

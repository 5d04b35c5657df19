//! # Merge Engine
//!
//! Combines the local collection with a batch of remote quotes.
//!
//! ## Policy: remote wins
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Merge Algorithm                                   │
//! │                                                                         │
//! │  working = copy(local)                                                  │
//! │                                                                         │
//! │  for r in remote (input order):                                        │
//! │      i = first index in working with text == r.text                     │
//! │      ├── none  → append r                     (added += 1)              │
//! │      └── found → working[i] = r               (conflict reported)       │
//! │                  value differed? updated += 1                           │
//! │                                                                         │
//! │  Example:                                                               │
//! │  local  = [A/X, B/Y]                                                    │
//! │  remote = [B/Z, C/W]                                                    │
//! │  result = [A/X, B/Z, C/W]   conflicts = [B]                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Untouched local entries keep their relative order, replaced entries keep
//! their position and appended entries go to the end in remote order.
//!
//! Local category edits on a text that also exists remotely are always
//! discarded. Comparison is by content only: merging the same batch twice
//! reports every overlapping text as a conflict again on the second pass.

use tracing::debug;

use crate::types::{Collection, ConflictReport, MergeResult, Quote};

/// Merges `remote` into a copy of `local`.
pub fn merge(local: &Collection, remote: &[Quote]) -> MergeResult {
    let mut working = local.clone();
    let mut conflicts = Vec::new();
    let mut added = 0;
    let mut updated = 0;

    for incoming in remote {
        match working.position_of_text(&incoming.text) {
            None => {
                working.push(incoming.clone());
                added += 1;
            }
            Some(index) => {
                let previous = working.replace(index, incoming.clone());
                if previous != *incoming {
                    updated += 1;
                }
                debug!(
                    index,
                    local_category = %previous.category,
                    remote_category = %incoming.category,
                    "Remote quote overwrote local quote"
                );
                conflicts.push(ConflictReport {
                    text: incoming.text.clone(),
                });
            }
        }
    }

    MergeResult {
        collection: working,
        conflicts,
        added,
        updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str, category: &str) -> Quote {
        Quote::new(text, category)
    }

    fn texts(collection: &Collection) -> Vec<&str> {
        collection.iter().map(|q| q.text.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_example() {
        let local = Collection::from(vec![q("A", "X"), q("B", "Y")]);
        let remote = vec![q("B", "Z"), q("C", "W")];

        let result = merge(&local, &remote);

        assert_eq!(
            result.collection,
            Collection::from(vec![q("A", "X"), q("B", "Z"), q("C", "W")])
        );
        assert_eq!(result.conflicts, vec![ConflictReport { text: "B".into() }]);
        assert_eq!(result.added, 1);
        assert_eq!(result.updated, 1);
        assert!(result.changed());
    }

    #[test]
    fn test_local_input_untouched() {
        let local = Collection::from(vec![q("A", "X")]);
        let _ = merge(&local, &[q("A", "Server")]);
        assert_eq!(local, Collection::from(vec![q("A", "X")]));
    }

    #[test]
    fn test_empty_remote_is_noop() {
        let local = Collection::from(vec![q("A", "X"), q("B", "Y")]);
        let result = merge(&local, &[]);
        assert_eq!(result.collection, local);
        assert!(result.conflicts.is_empty());
        assert!(!result.changed());
    }

    #[test]
    fn test_empty_local_appends_in_remote_order() {
        let result = merge(&Collection::new(), &[q("C", "W"), q("A", "X")]);
        assert_eq!(texts(&result.collection), vec!["C", "A"]);
        assert_eq!(result.added, 2);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn test_identical_overlap_reports_conflict_without_change() {
        let local = Collection::from(vec![q("A", "Server")]);
        let result = merge(&local, &[q("A", "Server")]);

        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.updated, 0);
        assert!(!result.changed());
    }

    #[test]
    fn test_second_pass_is_stable_but_reports_conflicts_again() {
        let local = Collection::from(vec![q("A", "X"), q("B", "Y")]);
        let remote = vec![q("B", "Z"), q("C", "W")];

        let first = merge(&local, &remote);
        let second = merge(&first.collection, &remote);

        assert_eq!(second.collection, first.collection);
        let conflict_texts: Vec<&str> = second.conflicts.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(conflict_texts, vec!["B", "C"]);
        assert!(!second.changed());
    }

    #[test]
    fn test_only_first_local_duplicate_is_replaced() {
        // Imports can leave duplicate texts behind; merge touches the first only.
        let local = Collection::from(vec![q("A", "X"), q("A", "Y")]);
        let result = merge(&local, &[q("A", "Server")]);

        assert_eq!(
            result.collection,
            Collection::from(vec![q("A", "Server"), q("A", "Y")])
        );
    }

    #[test]
    fn test_duplicate_texts_inside_remote_batch() {
        let result = merge(&Collection::new(), &[q("A", "One"), q("A", "Two")]);

        // Second occurrence overwrites the freshly appended one.
        assert_eq!(result.collection, Collection::from(vec![q("A", "Two")]));
        assert_eq!(result.added, 1);
        assert_eq!(result.conflicts.len(), 1);
    }

    #[test]
    fn test_untouched_local_order_preserved() {
        let local = Collection::from(vec![
            q("1", "a"),
            q("2", "b"),
            q("3", "c"),
            q("4", "d"),
        ]);
        let remote = vec![q("3", "z"), q("9", "z"), q("1", "z")];

        let result = merge(&local, &remote);

        assert_eq!(texts(&result.collection), vec!["1", "2", "3", "4", "9"]);
        let untouched: Vec<&str> = result
            .collection
            .iter()
            .filter(|q| !remote.iter().any(|r| r.same_text(q)))
            .map(|q| q.text.as_str())
            .collect();
        assert_eq!(untouched, vec!["2", "4"]);
    }

    #[test]
    fn test_properties_over_generated_inputs() {
        // Small deterministic grid: local and remote drawn from overlapping pools.
        let pool = ["a", "b", "c", "d", "e"];
        for mask_local in 0u32..32 {
            for mask_remote in 0u32..32 {
                let local: Collection = pool
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask_local & (1 << i) != 0)
                    .map(|(_, t)| q(t, "local"))
                    .collect::<Vec<_>>()
                    .into();
                let remote: Vec<Quote> = pool
                    .iter()
                    .enumerate()
                    .rev()
                    .filter(|(i, _)| mask_remote & (1 << i) != 0)
                    .map(|(_, t)| q(t, "remote"))
                    .collect();

                let result = merge(&local, &remote);

                // No duplicates among texts present in the remote batch
                for r in &remote {
                    let count = result.collection.iter().filter(|x| x.same_text(r)).count();
                    assert_eq!(count, 1);
                }

                // Exactly one conflict per remote text that existed locally
                let expected: Vec<&str> = remote
                    .iter()
                    .filter(|r| local.position_of_text(&r.text).is_some())
                    .map(|r| r.text.as_str())
                    .collect();
                let actual: Vec<&str> = result.conflicts.iter().map(|c| c.text.as_str()).collect();
                assert_eq!(actual, expected);

                // Never shrinks
                assert!(result.collection.len() >= local.len());

                // Re-merging keeps the same multiset of texts
                let again = merge(&result.collection, &remote);
                let mut t1 = texts(&result.collection);
                let mut t2 = texts(&again.collection);
                t1.sort_unstable();
                t2.sort_unstable();
                assert_eq!(t1, t2);
            }
        }
    }
}

//! Word and character error rates via token-level Levenshtein alignment.
//!
//! Both metrics run the classic substitution/insertion/deletion dynamic
//! programming recurrence over normalized text: word tokens for WER,
//! Unicode code points for CER. Edit counts are tracked along the optimal
//! path with deterministic tie-breaking so benchmark numbers reproduce.

use serde::{Deserialize, Serialize};

/// Error rates of a hypothesis measured against a reference.
///
/// Values may exceed 1.0 when insertions dominate (the hypothesis being
/// much longer than the reference); they are deliberately not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct EvaluationResult {
    pub wer: f64,
    pub cer: f64,
}

/// Scores `hypothesis` against `reference`. Both inputs are expected to
/// be plain text payloads; format markup stripping belongs to the
/// transcript layer.
pub fn evaluate(reference: &str, hypothesis: &str) -> EvaluationResult {
    let reference = normalize(reference);
    let hypothesis = normalize(hypothesis);

    let reference_words: Vec<&str> = reference.split_whitespace().collect();
    let hypothesis_words: Vec<&str> = hypothesis.split_whitespace().collect();
    let wer = error_rate(align(&reference_words, &hypothesis_words), reference_words.len());

    let reference_chars: Vec<char> = reference.chars().collect();
    let hypothesis_chars: Vec<char> = hypothesis.chars().collect();
    let cer = error_rate(align(&reference_chars, &hypothesis_chars), reference_chars.len());

    EvaluationResult { wer, cer }
}

/// Lowercases and collapses whitespace runs to single spaces.
pub(crate) fn normalize(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EditCounts {
    substitutions: usize,
    deletions: usize,
    insertions: usize,
}

impl EditCounts {
    fn total(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }
}

#[derive(Clone, Copy)]
struct Cell {
    cost: usize,
    counts: EditCounts,
}

fn error_rate(counts: EditCounts, reference_len: usize) -> f64 {
    counts.total() as f64 / reference_len.max(1) as f64
}

/// Minimum-edit-distance alignment, returning the edit counts along the
/// optimal path. Ties prefer substitution over deletion over insertion.
///
/// Rolling two-row matrix: each cell carries the counts of the path that
/// reached it, so no backtrace is needed and memory stays linear in the
/// hypothesis length.
fn align<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> EditCounts {
    let mut previous: Vec<Cell> = (0..=hypothesis.len())
        .map(|j| Cell {
            cost: j,
            counts: EditCounts { insertions: j, ..EditCounts::default() },
        })
        .collect();
    let mut current = previous.clone();

    for (i, reference_token) in reference.iter().enumerate() {
        current[0] = Cell {
            cost: i + 1,
            counts: EditCounts { deletions: i + 1, ..EditCounts::default() },
        };

        for (j, hypothesis_token) in hypothesis.iter().enumerate() {
            let mut best = if reference_token == hypothesis_token {
                previous[j]
            } else {
                Cell {
                    cost: previous[j].cost + 1,
                    counts: EditCounts {
                        substitutions: previous[j].counts.substitutions + 1,
                        ..previous[j].counts
                    },
                }
            };

            let deletion_cost = previous[j + 1].cost + 1;
            if deletion_cost < best.cost {
                best = Cell {
                    cost: deletion_cost,
                    counts: EditCounts {
                        deletions: previous[j + 1].counts.deletions + 1,
                        ..previous[j + 1].counts
                    },
                };
            }

            let insertion_cost = current[j].cost + 1;
            if insertion_cost < best.cost {
                best = Cell {
                    cost: insertion_cost,
                    counts: EditCounts {
                        insertions: current[j].counts.insertions + 1,
                        ..current[j].counts
                    },
                };
            }

            current[j + 1] = best;
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[hypothesis.len()].counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scores_zero() {
        let result = evaluate("the quick brown fox", "the quick brown fox");

        assert_eq!(result.wer, 0.0);
        assert_eq!(result.cer, 0.0);
    }

    #[test]
    fn test_identity_ignores_case_and_spacing() {
        let result = evaluate("The  Quick\nBrown Fox", "the quick brown fox");

        assert_eq!(result.wer, 0.0);
        assert_eq!(result.cer, 0.0);
    }

    #[test]
    fn test_single_insertion_adds_one_over_reference_length() {
        // Four reference words, one inserted word: WER = 1/4.
        let result = evaluate("the quick brown fox", "the quick brown lazy fox");

        assert_eq!(result.wer, 0.25);
    }

    #[test]
    fn test_single_substitution() {
        let result = evaluate("the quick brown fox", "the quick brown dog");

        assert_eq!(result.wer, 0.25);
    }

    #[test]
    fn test_single_deletion() {
        let result = evaluate("the quick brown fox", "the quick fox");

        assert_eq!(result.wer, 0.25);
    }

    #[test]
    fn test_empty_reference_counts_insertions_over_one() {
        // Division by zero is avoided: rates become I / 1.
        let result = evaluate("", "one two three");

        assert_eq!(result.wer, 3.0);
        assert_eq!(result.cer, 13.0);
    }

    #[test]
    fn test_empty_hypothesis_deletes_everything() {
        let result = evaluate("one two", "");

        assert_eq!(result.wer, 1.0);
    }

    #[test]
    fn test_rates_are_not_clamped() {
        let result = evaluate("hi", "a completely unrelated much longer hypothesis");

        assert!(result.wer > 1.0);
        assert!(result.cer > 1.0);
    }

    #[test]
    fn test_cer_counts_code_points() {
        // "abc" vs "abd": one substitution over three characters.
        let result = evaluate("abc", "abd");

        assert_eq!(result.cer, 1.0 / 3.0);
    }

    #[test]
    fn test_alignment_counts_are_deterministic() {
        // "a b" -> "b c" admits several length-2 edit scripts; the
        // substitution-first tie break must always pick the same one.
        let counts = align(&["a", "b"], &["b", "c"]);

        assert_eq!(counts.total(), 2);
        assert_eq!(counts.substitutions, 2);
        assert_eq!(counts.deletions, 0);
        assert_eq!(counts.insertions, 0);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  A\t\tB \n C  "), "a b c");
    }
}

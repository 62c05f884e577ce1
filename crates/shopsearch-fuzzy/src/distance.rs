//! Approximate substring matching.
//!
//! A semi-global Levenshtein alignment: the query must be consumed in full,
//! but it may start and end anywhere in the field text for free. That makes
//! "running" an exact (0 edit) match for "Red Running Shoe" and "runing" a
//! 1 edit match, while whole-field and whole-token matches fall out as
//! special cases.
//!
//! Two early exits keep the O(query × field) table cheap on misses:
//! 1. A field shorter than the query by more than `max_edits` can never match.
//! 2. Row minima never decrease, so once a row exceeds `max_edits` we stop.

use shopsearch_core::traits::Matcher;
use shopsearch_core::types::FieldMatch;

/// Default [`Matcher`]: bounded semi-global edit distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl Matcher for SubstringMatcher {
    fn find(&self, pattern: &[char], text: &[char], max_edits: usize) -> Option<FieldMatch> {
        best_alignment(pattern, text, max_edits)
    }
}

/// Cheapest alignment of `pattern` inside `text` with at most `max_edits`.
///
/// Among equally cheap alignments the one ending first in `text` wins.
pub fn best_alignment(pattern: &[char], text: &[char], max_edits: usize) -> Option<FieldMatch> {
    let m = pattern.len();
    let n = text.len();
    if m == 0 {
        return Some(FieldMatch { edits: 0, start: 0 });
    }
    if m > n + max_edits {
        return None;
    }

    // cost[j]: edits to align pattern[..i] ending just before text[j];
    // start[j]: text offset where that alignment begins.
    let mut cost: Vec<usize> = vec![0; n + 1];
    let mut start: Vec<usize> = (0..=n).collect();
    let mut next_cost: Vec<usize> = vec![0; n + 1];
    let mut next_start: Vec<usize> = vec![0; n + 1];

    for (i, &pc) in pattern.iter().enumerate() {
        next_cost[0] = i + 1;
        next_start[0] = 0;
        let mut row_min = next_cost[0];

        for j in 1..=n {
            let substitute = cost[j - 1] + usize::from(pc != text[j - 1]);
            let drop_pattern = cost[j] + 1;
            let skip_text = next_cost[j - 1] + 1;

            let (c, s) = if substitute <= drop_pattern && substitute <= skip_text {
                (substitute, start[j - 1])
            } else if drop_pattern <= skip_text {
                (drop_pattern, start[j])
            } else {
                (skip_text, next_start[j - 1])
            };
            next_cost[j] = c;
            next_start[j] = s;
            row_min = row_min.min(c);
        }

        if row_min > max_edits {
            return None;
        }
        std::mem::swap(&mut cost, &mut next_cost);
        std::mem::swap(&mut start, &mut next_start);
    }

    let mut best: Option<FieldMatch> = None;
    for (&edits, &begin) in cost.iter().zip(start.iter()) {
        if edits <= max_edits && best.map_or(true, |b| edits < b.edits) {
            best = Some(FieldMatch { edits, start: begin });
        }
    }
    best
}

use std::cmp::Ordering;
use std::time::Instant;

use shopsearch_core::config::SearchSettings;
use shopsearch_core::traits::Matcher;
use shopsearch_core::types::{Field, FieldMatch, SearchHit};

use crate::distance::SubstringMatcher;
use crate::index::CatalogIndex;
use crate::normalize::Normalizer;

/// Scores and ranks the products of a [`CatalogIndex`] against a query.
///
/// Holds only configuration; every call is a pure function of the query and
/// the index it is given.
#[derive(Debug, Clone)]
pub struct FuzzySearchEngine<M = SubstringMatcher> {
    settings: SearchSettings,
    matcher: M,
}

impl FuzzySearchEngine {
    pub fn new(settings: SearchSettings) -> Self {
        Self::with_matcher(settings, SubstringMatcher)
    }
}

impl Default for FuzzySearchEngine {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}

impl<M: Matcher> FuzzySearchEngine<M> {
    pub fn with_matcher(settings: SearchSettings, matcher: M) -> Self {
        Self { settings, matcher }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Normaliser an index must be built with to be searched by this engine.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::from_settings(&self.settings)
    }

    /// Best matches for `query`, at most `max_results`, best first.
    ///
    /// Queries shorter than `min_query_chars` (counted on the raw, untrimmed
    /// input) return nothing without touching the index.
    pub fn search<'a>(&self, index: &'a CatalogIndex, query: &str) -> Vec<SearchHit<'a>> {
        if query.chars().count() < self.settings.min_query_chars {
            return Vec::new();
        }
        let pattern = index.normalizer().fold(query);
        if pattern.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let max_edits = self.settings.max_edits(pattern.len());
        let mut hits: Vec<SearchHit<'a>> = index
            .documents()
            .filter_map(|(ordinal, fields)| {
                let (field, score) = self.best_field(&pattern, fields, max_edits)?;
                index.hit(ordinal, score, field)
            })
            .collect();
        let candidates = hits.len();
        rank(&mut hits, self.settings.max_results);

        tracing::debug!(
            query,
            candidates,
            returned = hits.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "fuzzy search"
        );
        for hit in &hits {
            tracing::trace!(id = %hit.id, score = hit.score, field = %hit.field, "hit");
        }
        hits
    }

    /// Lowest-scoring field of one product, or `None` if no field is within
    /// `max_edits`. Earlier fields win ties.
    fn best_field(&self, pattern: &[char], fields: &[Vec<char>; 4], max_edits: usize) -> Option<(Field, f32)> {
        let mut best: Option<(Field, f32)> = None;
        for (field, text) in Field::ALL.into_iter().zip(fields.iter()) {
            let Some(found) = self.matcher.find(pattern, text, max_edits) else {
                continue;
            };
            if found.edits > max_edits {
                continue;
            }
            let score = self.score(found, pattern.len());
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((field, score));
            }
        }
        best
    }

    /// `edits / query length`, nudged upwards for matches that start late in the field.
    fn score(&self, found: FieldMatch, pattern_len: usize) -> f32 {
        let error_ratio = found.edits as f32 / pattern_len as f32;
        let span = self.settings.location_span;
        let location = found.start.min(span) as f32 / span as f32;
        error_ratio + self.settings.location_weight * location
    }
}

/// Sort by score, then catalog order, and keep the first `cap`.
pub fn rank(hits: &mut Vec<SearchHit<'_>>, cap: usize) {
    hits.sort_by(compare_hits);
    hits.truncate(cap);
}

fn compare_hits(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    a.score.total_cmp(&b.score).then(a.ordinal.cmp(&b.ordinal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsearch_core::types::Product;

    fn index(products: Vec<Product>) -> CatalogIndex {
        CatalogIndex::build(products, Normalizer::default())
    }

    #[test]
    fn score_is_zero_for_exact_leading_match() {
        let engine = FuzzySearchEngine::default();
        assert_eq!(engine.score(FieldMatch { edits: 0, start: 0 }, 4), 0.0);
        assert!(engine.score(FieldMatch { edits: 0, start: 10 }, 4) > 0.0);
        assert!(engine.score(FieldMatch { edits: 1, start: 0 }, 4) > engine.score(FieldMatch { edits: 0, start: 99 }, 4));
    }

    #[test]
    fn location_penalty_saturates() {
        let engine = FuzzySearchEngine::default();
        let far = engine.score(FieldMatch { edits: 0, start: 500 }, 4);
        let at_span = engine.score(FieldMatch { edits: 0, start: 100 }, 4);
        assert_eq!(far, at_span);
    }

    #[test]
    fn best_field_picks_lowest_score() {
        let idx = index(vec![Product::new(1).with_name("Travel Mug").with_category("Mugs")]);
        let hits = FuzzySearchEngine::default().search(&idx, "mugs");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, Field::Category);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn description_matches_count() {
        let idx = index(vec![Product::new(1).with_name("Kettle").with_description("Stainless steel, 1.7 litre")]);
        let hits = FuzzySearchEngine::default().search(&idx, "stainles");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, Field::Description);
    }

    #[test]
    fn rank_breaks_ties_by_catalog_order() {
        let idx = index(vec![Product::new("b").with_name("Mug"), Product::new("a").with_name("Mug")]);
        let mut hits = vec![
            idx.hit(1, 0.0, Field::Name).expect("hit"),
            idx.hit(0, 0.0, Field::Name).expect("hit"),
        ];
        rank(&mut hits, 5);
        assert_eq!(hits[0].ordinal, 0);
        assert_eq!(hits[1].ordinal, 1);
    }
}

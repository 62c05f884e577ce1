use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

use shopsearch_core::types::{Field, Product, ProductId, SearchHit};

use crate::normalize::Normalizer;

/// Non-fatal diagnostics from building an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub indexed: usize,
    pub skipped_missing_id: usize,
    /// Ids seen more than once; only the first record with each id is indexed.
    pub duplicate_ids: Vec<ProductId>,
}

impl BuildReport {
    pub fn skipped(&self) -> usize {
        self.skipped_missing_id + self.duplicate_ids.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped() == 0
    }
}

struct Entry {
    id: ProductId,
    fields: [Vec<char>; 4],
}

/// Immutable searchable snapshot of a catalog.
///
/// Built in one pass over the products and never patched afterwards; a
/// catalog change means building a new index and swapping it in.
pub struct CatalogIndex {
    products: Vec<Product>,
    entries: Vec<Entry>,
    by_id: HashMap<ProductId, usize>,
    normalizer: Normalizer,
    report: BuildReport,
}

impl CatalogIndex {
    pub fn empty(normalizer: Normalizer) -> Self {
        Self::build(Vec::new(), normalizer)
    }

    pub fn build<I>(products: I, normalizer: Normalizer) -> Self
    where
        I: IntoIterator<Item = Product>,
    {
        let started = Instant::now();
        let mut kept = Vec::new();
        let mut entries = Vec::new();
        let mut by_id = HashMap::new();
        let mut report = BuildReport::default();

        for (position, product) in products.into_iter().enumerate() {
            let Some(id) = product.id.clone() else {
                tracing::warn!(position, name = product.display_name(), "skipping product without id");
                report.skipped_missing_id += 1;
                continue;
            };
            if by_id.contains_key(&id) {
                tracing::warn!(position, %id, "skipping product with duplicate id");
                report.duplicate_ids.push(id);
                continue;
            }
            let fields = Field::ALL.map(|field| normalizer.fold(product.field(field)));
            by_id.insert(id.clone(), kept.len());
            entries.push(Entry { id, fields });
            kept.push(product);
        }

        report.indexed = kept.len();
        tracing::debug!(
            indexed = report.indexed,
            skipped = report.skipped(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "built catalog index"
        );
        Self { products: kept, entries, by_id, normalizer, report }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Indexed products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).map(|&ordinal| &self.products[ordinal])
    }

    pub fn normalizer(&self) -> Normalizer {
        self.normalizer
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Normalised text of every indexed field, with ordinals, in catalog order.
    pub(crate) fn documents(&self) -> impl Iterator<Item = (usize, &[Vec<char>; 4])> + '_ {
        self.entries.iter().enumerate().map(|(ordinal, e)| (ordinal, &e.fields))
    }

    /// Rehydrate a hit for the product at `ordinal`.
    pub fn hit(&self, ordinal: usize, score: f32, field: Field) -> Option<SearchHit<'_>> {
        let product = self.products.get(ordinal)?;
        let entry = self.entries.get(ordinal)?;
        Some(SearchHit { id: &entry.id, product, ordinal, score, field })
    }
}

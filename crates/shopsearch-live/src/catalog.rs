use parking_lot::RwLock;
use std::sync::Arc;

use shopsearch_core::config::{DisplaySettings, SearchSettings};
use shopsearch_core::traits::Matcher;
use shopsearch_core::types::{Field, Product, ProductId, SearchHit};
use shopsearch_fuzzy::{BuildReport, CatalogIndex, FuzzySearchEngine, SubstringMatcher};

use crate::display::{Selection, Suggestion};

/// An index together with where it came from.
///
/// `generation` counts swaps and is owned by the [`LiveCatalog`];
/// `catalog_version` is the caller's version passed to
/// [`LiveCatalog::refresh`], `None` for the initial empty index and after
/// [`LiveCatalog::replace`].
#[derive(Clone)]
pub struct CatalogSnapshot {
    pub generation: u64,
    pub catalog_version: Option<u64>,
    pub index: Arc<CatalogIndex>,
}

/// Holds the current index behind a lock that only ever guards an `Arc`.
///
/// Rebuilds run without the lock and finish with a pointer swap, so a query
/// always works on a complete index, old or new, and is never blocked by a
/// rebuild in progress.
pub struct LiveCatalog<M = SubstringMatcher> {
    engine: FuzzySearchEngine<M>,
    current: RwLock<CatalogSnapshot>,
}

impl LiveCatalog {
    pub fn new(settings: SearchSettings) -> Self {
        Self::with_engine(FuzzySearchEngine::new(settings))
    }
}

impl<M: Matcher> LiveCatalog<M> {
    pub fn with_engine(engine: FuzzySearchEngine<M>) -> Self {
        let index = Arc::new(CatalogIndex::empty(engine.normalizer()));
        Self { engine, current: RwLock::new(CatalogSnapshot { generation: 0, catalog_version: None, index }) }
    }

    pub fn settings(&self) -> &SearchSettings {
        self.engine.settings()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.current.read().clone()
    }

    /// Number of indices swapped in so far; 0 while still empty.
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Version given to the last [`refresh`](Self::refresh) that is still current.
    pub fn catalog_version(&self) -> Option<u64> {
        self.current.read().catalog_version
    }

    /// Build an index for `products` and make it current unconditionally.
    ///
    /// Clears the catalog version, so the next `refresh` always rebuilds.
    pub fn replace(&self, products: Vec<Product>) -> BuildReport {
        let index = CatalogIndex::build(products, self.engine.normalizer());
        let report = index.report().clone();
        self.install(index, None, None);
        report
    }

    /// Rebuild unless `version` is the catalog version already indexed.
    ///
    /// `load` is only called when a rebuild is needed. The new index is
    /// installed only if nothing else was swapped in while it was being
    /// built; a rebuild overtaken that way is dropped. Returns the report of
    /// an installed index, `None` otherwise.
    pub fn refresh<F>(&self, version: u64, load: F) -> Option<BuildReport>
    where
        F: FnOnce() -> Vec<Product>,
    {
        let observed = self.snapshot();
        if observed.catalog_version == Some(version) {
            return None;
        }
        let index = CatalogIndex::build(load(), self.engine.normalizer());
        let report = index.report().clone();
        self.install(index, Some(version), Some(observed.generation)).then_some(report)
    }

    /// Swap `index` in, unless `expected` is given and another swap happened since.
    fn install(&self, index: CatalogIndex, catalog_version: Option<u64>, expected: Option<u64>) -> bool {
        let indexed = index.len();
        let index = Arc::new(index);
        let mut current = self.current.write();
        if expected.is_some_and(|generation| generation != current.generation) {
            drop(current);
            tracing::debug!(?catalog_version, indexed, "dropping rebuild overtaken by a newer index");
            return false;
        }
        let generation = current.generation + 1;
        *current = CatalogSnapshot { generation, catalog_version, index };
        drop(current);
        tracing::debug!(generation, ?catalog_version, indexed, "swapped in new catalog index");
        true
    }

    /// Run `query` against the current snapshot and keep that snapshot alive
    /// for as long as the results are.
    pub fn search(&self, query: &str) -> LiveResults {
        let snapshot = self.snapshot();
        let ranked = self
            .engine
            .search(&snapshot.index, query)
            .into_iter()
            .map(|hit| Ranked { ordinal: hit.ordinal, score: hit.score, field: hit.field })
            .collect();
        LiveResults { snapshot, ranked }
    }
}

#[derive(Debug, Clone, Copy)]
struct Ranked {
    ordinal: usize,
    score: f32,
    field: Field,
}

/// Ranked results tied to the snapshot that produced them.
///
/// Products are borrowed from the pinned index, never copied.
pub struct LiveResults {
    snapshot: CatalogSnapshot,
    ranked: Vec<Ranked>,
}

impl LiveResults {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Generation of the index the results were computed against.
    pub fn generation(&self) -> u64 {
        self.snapshot.generation
    }

    pub fn hits(&self) -> impl Iterator<Item = SearchHit<'_>> + '_ {
        self.ranked.iter().filter_map(|r| self.snapshot.index.hit(r.ordinal, r.score, r.field))
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.hits().map(|h| h.product)
    }

    pub fn ids(&self) -> Vec<&ProductId> {
        self.hits().map(|h| h.id).collect()
    }

    pub fn suggestions(&self, display: &DisplaySettings) -> Vec<Suggestion> {
        self.hits().map(|h| Suggestion::new(h.id, h.product, display)).collect()
    }

    /// The result at `position` (0-based), as a selection to navigate to.
    pub fn select(&self, position: usize) -> Option<Selection> {
        let ranked = self.ranked.get(position)?;
        let hit = self.snapshot.index.hit(ranked.ordinal, ranked.score, ranked.field)?;
        Some(Selection { id: hit.id.clone() })
    }
}

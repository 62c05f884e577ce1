use pretty_assertions::assert_eq;
use shopsearch_core::config::SearchSettings;
use shopsearch_core::types::{Field, Product, ProductId};
use shopsearch_fuzzy::{CatalogIndex, FuzzySearchEngine, Normalizer};

fn storefront() -> Vec<Product> {
    vec![
        Product::new(1).with_name("Red Running Shoe").with_category("Footwear").with_price(50.0),
        Product::new(2).with_name("Blue Running Shoe").with_category("Footwear").with_price(55.0),
        Product::new(3).with_name("Laptop Stand").with_category("Office").with_price(20.0),
    ]
}

fn ids(hits: &[shopsearch_core::types::SearchHit<'_>]) -> Vec<String> {
    hits.iter().map(|h| h.id.to_string()).collect()
}

fn build(products: Vec<Product>) -> CatalogIndex {
    CatalogIndex::build(products, Normalizer::default())
}

#[test]
fn exact_word_matches_in_catalog_order() {
    let index = build(storefront());
    let hits = FuzzySearchEngine::default().search(&index, "running");
    assert_eq!(ids(&hits), vec!["1", "2"]);
}

#[test]
fn single_character_query_returns_nothing() {
    let index = build(storefront());
    let engine = FuzzySearchEngine::default();
    assert!(engine.search(&index, "r").is_empty());
    assert!(engine.search(&index, "").is_empty());
    assert!(engine.search(&index, " ").is_empty());
}

#[test]
fn typo_is_tolerated() {
    let index = build(storefront());
    let hits = FuzzySearchEngine::default().search(&index, "runing");
    let found = ids(&hits);
    assert!(found.contains(&"1".to_string()));
    assert!(found.contains(&"2".to_string()));
    assert!(!found.contains(&"3".to_string()));
}

#[test]
fn case_is_ignored_by_default() {
    let index = build(storefront());
    let hits = FuzzySearchEngine::default().search(&index, "LAPTOP");
    assert_eq!(ids(&hits), vec!["3"]);
}

#[test]
fn category_matches() {
    let index = build(storefront());
    let hits = FuzzySearchEngine::default().search(&index, "footwear");
    assert_eq!(ids(&hits), vec!["1", "2"]);
    assert!(hits.iter().all(|h| h.field == Field::Category));
}

#[test]
fn broad_query_is_capped_at_five_best_first() {
    let mut products: Vec<Product> = (1..=6).map(|i| Product::new(i).with_name(format!("Ceramic Mug {i}"))).collect();
    products.push(Product::new(7).with_name("Mug"));
    let index = build(products);

    let hits = FuzzySearchEngine::default().search(&index, "mug");
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].id, &ProductId::from(7), "exact leading match ranks first");
    assert!(hits.windows(2).all(|w| w[0].score <= w[1].score));
    assert_eq!(ids(&hits[1..]), vec!["1", "2", "3", "4"]);
}

#[test]
fn exact_name_or_title_ranks_first() {
    let mut products = storefront();
    products.push(Product::new(4).with_title("Running"));
    let index = build(products);
    let hits = FuzzySearchEngine::default().search(&index, "Running");
    assert_eq!(hits[0].id, &ProductId::from(4));
    assert_eq!(hits[0].field, Field::Title);
    assert_eq!(hits[0].score, 0.0);
}

#[test]
fn products_without_id_never_match() {
    let mut products = storefront();
    products.push(Product { name: Some("Running Socks".into()), ..Product::default() });
    let index = build(products);
    assert_eq!(index.report().skipped_missing_id, 1);

    let engine = FuzzySearchEngine::default();
    for q in ["running", "socks", "Running Socks", "runnin sock"] {
        let hits = engine.search(&index, q);
        assert!(hits.iter().all(|h| h.product.name.as_deref() != Some("Running Socks")), "query {q:?}");
    }
}

#[test]
fn empty_catalog_matches_nothing() {
    let index = build(Vec::new());
    assert!(FuzzySearchEngine::default().search(&index, "anything").is_empty());
}

#[test]
fn unrelated_query_matches_nothing() {
    let index = build(storefront());
    assert!(FuzzySearchEngine::default().search(&index, "qzxwvk").is_empty());
}

#[test]
fn rebuild_and_repeat_are_deterministic() {
    let engine = FuzzySearchEngine::default();
    let first = build(storefront());
    let second = build(storefront());
    for q in ["running", "runing", "shoe", "stand", "foot"] {
        let a = ids(&engine.search(&first, q));
        let b = ids(&engine.search(&second, q));
        let c = ids(&engine.search(&first, q));
        assert_eq!(a, b, "rebuild changed results for {q:?}");
        assert_eq!(a, c, "repeat changed results for {q:?}");
    }
}

#[test]
fn stricter_threshold_drops_typos() {
    let settings = SearchSettings { threshold: 0.0, ..SearchSettings::default() };
    let engine = FuzzySearchEngine::new(settings);
    let index = CatalogIndex::build(storefront(), engine.normalizer());
    assert!(engine.search(&index, "runing").is_empty());
    assert_eq!(ids(&engine.search(&index, "running")), vec!["1", "2"]);
}

#[test]
fn configured_cap_and_gate_apply() {
    let settings = SearchSettings { max_results: 1, min_query_chars: 4, ..SearchSettings::default() };
    let engine = FuzzySearchEngine::new(settings);
    let index = CatalogIndex::build(storefront(), engine.normalizer());
    assert!(engine.search(&index, "run").is_empty());
    assert_eq!(ids(&engine.search(&index, "running")), vec!["1"]);
}

#[test]
fn diacritics_fold_when_enabled() {
    let products = vec![Product::new("c").with_name("Crème Brûlée Set")];
    let plain = FuzzySearchEngine::new(SearchSettings { threshold: 0.0, ..SearchSettings::default() });
    let folding = FuzzySearchEngine::new(SearchSettings { threshold: 0.0, ignore_diacritics: true, ..SearchSettings::default() });

    let plain_index = CatalogIndex::build(products.clone(), plain.normalizer());
    let folding_index = CatalogIndex::build(products, folding.normalizer());
    assert!(plain.search(&plain_index, "creme brulee").is_empty());
    assert_eq!(ids(&folding.search(&folding_index, "creme brulee")), vec!["c"]);
}

//! # End-to-End Search Flows
//!
//! Tokenize -> index (terms, alternates, pairs) -> parse -> evaluate ->
//! match extraction, through `PrivateSearchService`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use veil_index::{
        Document, IndexConfig, IndexError, Metrics, PrivateSearchApi, PrivateSearchService,
        Query, Salt,
    };

    use crate::integration::{fixture_config, small_corpus_service, FIXTURE_SALT};

    // =============================================================================
    // QUERY SCENARIOS
    // =============================================================================

    #[test]
    fn test_and_query_returns_only_joint_document() {
        let mut service = small_corpus_service(1);
        assert_eq!(service.search("covid AND vaccine").unwrap(), vec!["d1"]);
    }

    #[test]
    fn test_or_query_returns_every_document_with_either_term() {
        let mut service = small_corpus_service(1);
        assert_eq!(
            service.search("covid OR security").unwrap(),
            vec!["d1", "d2", "d3"]
        );
    }

    #[test]
    fn test_single_term_through_alternates_is_stable() {
        let mut service = small_corpus_service(3);
        for _ in 0..50 {
            assert_eq!(service.search("covid").unwrap(), vec!["d1", "d3"]);
        }
    }

    #[test]
    fn test_unknown_terms_match_nothing() {
        let mut service = small_corpus_service(1);
        assert!(service.search("zebra").unwrap().is_empty());
        assert!(service.search("zebra AND covid").unwrap().is_empty());
        assert_eq!(service.search("zebra OR covid").unwrap(), vec!["d1", "d3"]);
    }

    #[test]
    fn test_operator_order_does_not_matter() {
        let mut service = small_corpus_service(1);
        assert_eq!(
            service.search("vaccine AND covid").unwrap(),
            service.search("covid AND vaccine").unwrap()
        );
        assert_eq!(
            service.search("security OR covid").unwrap(),
            service.search("covid OR security").unwrap()
        );
    }

    #[test]
    fn test_nested_query_tree() {
        let mut service = small_corpus_service(1);
        let query = Query::or(
            Query::and(Query::term("covid"), Query::term("treatment")),
            Query::and(Query::term("security"), Query::term("password")),
        );
        assert_eq!(service.search_query(&query).unwrap(), vec!["d2", "d3"]);
    }

    #[test]
    fn test_malformed_queries_are_rejected() {
        let mut service = small_corpus_service(1);
        assert!(matches!(service.search("   "), Err(IndexError::EmptyQuery)));
        assert!(matches!(
            service.search("a AND b AND c"),
            Err(IndexError::UnsupportedQuery(_))
        ));
        assert!(matches!(
            service.search("covid OR  OR security"),
            Err(IndexError::UnsupportedQuery(_))
        ));
    }

    // =============================================================================
    // INDEXING
    // =============================================================================

    #[test]
    fn test_pretokenized_documents() {
        let mut service = PrivateSearchService::new(fixture_config(), Salt::from_bytes(FIXTURE_SALT))
            .unwrap()
            .with_seed(2);
        let report = service.index_document(Document::new("x1", ["encryption", "backdoor"]));

        assert_eq!(report.terms, 2);
        assert_eq!(report.alternates, 20 + 50, "0.05 -> 20, 0.02 -> 50");
        assert_eq!(report.pairs, 1);
        assert_eq!(service.search("backdoor").unwrap(), vec!["x1"]);
    }

    #[test]
    fn test_documents_match_in_insertion_order() {
        let mut service = PrivateSearchService::new(fixture_config(), Salt::from_bytes(FIXTURE_SALT))
            .unwrap()
            .with_seed(2);
        for id in ["z", "a", "m"] {
            service.add_document(id, "shared keyword");
        }
        assert_eq!(service.search("shared").unwrap(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_config_loaded_from_json() {
        let json = r#"{
            "target_fpr": 0.001,
            "expected_items_per_term": 500,
            "pair_allow_list": [["vaccine", "covid"]],
            "term_frequencies": {"covid": 0.5}
        }"#;
        let config = IndexConfig::from_json(json).unwrap();
        assert_eq!(config.noise_rate, 0.2, "Missing fields take defaults");

        let metrics = Arc::new(Metrics::new());
        let mut service = PrivateSearchService::new(config, Salt::from_bytes(FIXTURE_SALT))
            .unwrap()
            .with_seed(5)
            .with_metrics(metrics.clone());
        service.add_document("d1", "covid vaccine");
        metrics.reset();

        assert_eq!(service.search("covid AND vaccine").unwrap(), vec!["d1"]);
        assert_eq!(metrics.snapshot().lookups_performed, 1, "Pair set used");
    }
}

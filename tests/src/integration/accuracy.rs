//! # Accuracy Under Load
//!
//! Filters sized below the corpus so false positives are observable. True
//! matches must always survive; extra matches must stay near the reported
//! error rate.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use veil_index::{Document, IndexConfigBuilder, PrivateIndex, Query, QueryEvaluator, Salt};

    const DOCS: usize = 2000;

    fn doc_id(i: usize) -> String {
        format!("doc-{:04}", i)
    }

    /// alpha: docs 0..200, beta: docs 100..300, filler otherwise.
    fn loaded_index() -> (PrivateIndex, Vec<String>) {
        let config = IndexConfigBuilder::new()
            .expected_items_per_term(200)
            .target_fpr(0.05)
            .build()
            .unwrap();
        let mut index = PrivateIndex::new(&config, Salt::from_bytes([0x33; 32])).unwrap();
        let ids: Vec<String> = (0..DOCS).map(doc_id).collect();

        for (i, id) in ids.iter().enumerate() {
            let mut keywords = vec!["filler".to_string()];
            if i < 200 {
                keywords.push("alpha".to_string());
            }
            if (100..300).contains(&i) {
                keywords.push("beta".to_string());
            }
            index.index_document(&Document::new(id.clone(), keywords));
        }
        (index, ids)
    }

    /// (true matches found, false positives, reported error rate)
    fn run(
        index: &PrivateIndex,
        ids: &[String],
        query: &str,
        truth: impl Fn(usize) -> bool,
    ) -> (usize, usize, f64) {
        let mut rng = StdRng::seed_from_u64(0);
        let candidates = QueryEvaluator::new(index)
            .evaluate(&Query::parse(query).unwrap(), &mut rng)
            .unwrap();

        let mut hits = 0;
        let mut false_positives = 0;
        for (i, id) in ids.iter().enumerate() {
            match (truth(i), candidates.contains(id)) {
                (true, true) => hits += 1,
                (true, false) => panic!("False negative for {} on '{}'", id, query),
                (false, true) => false_positives += 1,
                (false, false) => {}
            }
        }
        (hits, false_positives, candidates.error_rate().value())
    }

    #[test]
    fn test_term_false_positives_near_target() {
        let (index, ids) = loaded_index();
        let (hits, fp, error) = run(&index, &ids, "alpha", |i| i < 200);

        assert_eq!(hits, 200);
        let observed = fp as f64 / (DOCS - 200) as f64;
        assert!(error > 0.02 && error < 0.08, "Reported error {}", error);
        assert!(
            observed < 3.0 * error,
            "Observed {} vs reported {}",
            observed,
            error
        );
    }

    #[test]
    fn test_and_keeps_every_joint_match() {
        let (index, ids) = loaded_index();
        let (hits, fp, error) = run(&index, &ids, "alpha AND beta", |i| (100..200).contains(&i));

        assert_eq!(hits, 100);
        assert!(error < 0.01, "AND composes errors multiplicatively");
        let observed = fp as f64 / (DOCS - 100) as f64;
        assert!(observed < 0.15, "Observed {}", observed);
    }

    #[test]
    fn test_or_keeps_every_match_of_either_side() {
        let (index, ids) = loaded_index();
        let (hits, fp, _) = run(&index, &ids, "alpha OR beta", |i| i < 300);

        assert_eq!(hits, 300);
        let observed = fp as f64 / (DOCS - 300) as f64;
        assert!(observed < 0.4, "Observed {}", observed);
    }

    #[test]
    fn test_overloaded_term_reports_high_error() {
        let (index, ids) = loaded_index();
        let (hits, _, error) = run(&index, &ids, "filler", |_| true);

        assert_eq!(hits, DOCS);
        let filler = index.search("filler").unwrap();
        assert_eq!(filler.len(), DOCS);
        assert!(
            error > 0.9,
            "10x over capacity should saturate the filter, got {}",
            error
        );
    }
}

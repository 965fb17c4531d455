//! # Privacy Properties
//!
//! What the index must and must not reveal:
//!
//! 1. **Salt binding**: digests only line up under the shared salt
//! 2. **Unlinkability**: alternates and pair digests are distinct identifiers
//! 3. **Frequency hiding**: every alternate answers identically
//! 4. **Correlation hiding**: allow-listed pairs have their own set
//! 5. **Noise**: decoys are drawn from the vocabulary and mixed in

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use veil_index::{
        ApproximateSet, Document, KeyedDigestOracle, PrivateIndex, PrivateSearchApi,
        PrivateSearchService, Salt,
    };

    use crate::integration::{fixture_config, small_corpus_service, FIXTURE_SALT};

    fn fixture_index(salt: [u8; 32]) -> PrivateIndex {
        let mut index = PrivateIndex::new(&fixture_config(), Salt::from_bytes(salt)).unwrap();
        index.index_document(&Document::new("d1", ["covid", "vaccine", "research"]));
        index.index_document(&Document::new("d2", ["security", "breach", "password"]));
        index.index_document(&Document::new("d3", ["covid", "treatment"]));
        index
    }

    // =============================================================================
    // SALT BINDING
    // =============================================================================

    #[test]
    fn test_mismatched_salt_misses_every_term() {
        let index = fixture_index(FIXTURE_SALT);
        let issuer = KeyedDigestOracle::new(Salt::from_bytes([0xa5; 32]));

        for term in ["covid", "vaccine", "research", "security", "breach", "treatment"] {
            assert!(
                index.terms().search_digest(&issuer.encode(term)).is_none(),
                "Foreign salt must not resolve {}",
                term
            );
        }
        assert!(index
            .terms()
            .search_digest(&index.oracle().encode("covid"))
            .is_some());
    }

    #[test]
    fn test_fingerprint_detects_salt_mismatch() {
        let builder = small_corpus_service(1);
        let matching =
            PrivateSearchService::new(fixture_config(), Salt::from_bytes(FIXTURE_SALT)).unwrap();
        let foreign =
            PrivateSearchService::new(fixture_config(), Salt::from_bytes([0xa5; 32])).unwrap();

        assert_eq!(builder.salt_fingerprint(), matching.salt_fingerprint());
        assert_ne!(builder.salt_fingerprint(), foreign.salt_fingerprint());
    }

    #[test]
    fn test_generated_salts_differ() {
        let mut rng = StdRng::seed_from_u64(99);
        let a = Salt::generate(&mut rng);
        let b = Salt::generate(&mut rng);
        assert_ne!(a, b);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    // =============================================================================
    // UNLINKABILITY
    // =============================================================================

    #[test]
    fn test_digest_identifiers_are_distinct() {
        let oracle = KeyedDigestOracle::new(Salt::from_bytes(FIXTURE_SALT));
        let mut digests = HashSet::new();

        assert!(digests.insert(oracle.encode("backdoor")));
        for digest in oracle.encode_multiple("backdoor", 50) {
            assert!(digests.insert(digest), "Alternate collides");
        }
        assert!(digests.insert(oracle.encode_pair("encryption", "backdoor")));
        assert!(digests.insert(oracle.encode("encryption")));
    }

    #[test]
    fn test_index_debug_output_has_no_untracked_plaintext() {
        let index = fixture_index(FIXTURE_SALT);
        let dump = format!("{:?}", index);
        for term in ["research", "treatment"] {
            assert!(!dump.contains(term), "{} leaked into index state", term);
        }
    }

    // =============================================================================
    // FREQUENCY HIDING
    // =============================================================================

    #[test]
    fn test_all_alternates_answer_identically() {
        let index = fixture_index(FIXTURE_SALT);
        let alternates = index.frequency().alternates("security").unwrap();
        assert_eq!(alternates.len(), 6, "floor(1 / 0.15) = 6");

        let canonical = index.search("security").unwrap();
        for digest in alternates {
            let set = index.terms().search_digest(digest).unwrap();
            assert_eq!(set, canonical, "Alternate set differs from canonical");
        }
    }

    #[test]
    fn test_uniform_lookups_spread_over_alternates() {
        let index = fixture_index(FIXTURE_SALT);
        let mut rng = StdRng::seed_from_u64(17);

        let distinct: HashSet<*const ApproximateSet> = (0..300)
            .map(|_| index.search_uniform("security", &mut rng).unwrap() as *const _)
            .collect();
        assert_eq!(distinct.len(), 6);
    }

    // =============================================================================
    // CORRELATION HIDING
    // =============================================================================

    #[test]
    fn test_pair_set_is_independent_of_term_sets() {
        let mut index = fixture_index(FIXTURE_SALT);
        index.index_document(&Document::new("d4", ["vaccine", "trial"]));
        let pair = index.search_pair("vaccine", "covid").unwrap();
        let covid = index.search("covid").unwrap();
        let vaccine = index.search("vaccine").unwrap();
        let intersection = covid.intersect(vaccine).unwrap();

        assert!(pair.contains("d1") && intersection.contains("d1"));
        assert!(!pair.contains("d4"));
        assert_eq!(pair.len(), 1);
        assert_eq!(intersection.len(), 2, "min(|covid|, |vaccine|)");
        assert_ne!(pair, &intersection, "Pair set is not a term intersection");
    }

    #[test]
    fn test_pairs_outside_allow_list_get_no_set() {
        let index = fixture_index(FIXTURE_SALT);
        assert!(index.search_pair("covid", "treatment").is_none());
        assert!(index.search_pair("breach", "password").is_none());
        assert_eq!(index.pairs().len(), 2);
    }

    // =============================================================================
    // NOISE
    // =============================================================================

    #[test]
    fn test_noise_batch_mixes_vocabulary_decoys() {
        let mut service = small_corpus_service(8);
        let vocabulary: HashSet<String> = service
            .index()
            .frequency()
            .vocabulary()
            .map(String::from)
            .collect();
        let real: Vec<String> = (0..20).map(|i| format!("real{:02}", i)).collect();

        let batch = service.noisy_batch(&real).unwrap();

        assert_eq!(batch.len(), 24, "20 real + floor(20 * 0.2) decoys");
        let decoys: Vec<&String> = batch.iter().filter(|q| !real.contains(q)).collect();
        assert_eq!(decoys.len(), 4);
        assert!(decoys.iter().all(|d| vocabulary.contains(*d)));
        let unique: HashSet<_> = decoys.iter().collect();
        assert_eq!(unique.len(), 4, "Decoys sampled without replacement");
        assert_ne!(&batch[..20], &real[..], "Batch is shuffled");
    }
}

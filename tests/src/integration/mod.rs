//! Integration scenarios
//!
//! Each module drives the public API of `veil-index` only.

pub mod accuracy;
pub mod end_to_end;
pub mod privacy;

use veil_index::{IndexConfig, IndexConfigBuilder, PrivateSearchApi, PrivateSearchService, Salt};

/// Salt shared by builder and issuer in the fixtures.
pub const FIXTURE_SALT: [u8; 32] = [0x5a; 32];

pub fn fixture_config() -> IndexConfig {
    IndexConfigBuilder::new()
        .expected_items_per_term(1000)
        .allow_pairs([
            ("covid", "vaccine"),
            ("security", "breach"),
            ("password", "leak"),
            ("data", "privacy"),
            ("encryption", "backdoor"),
        ])
        .term_frequencies([
            ("covid", 0.3),
            ("vaccine", 0.2),
            ("security", 0.15),
            ("breach", 0.1),
            ("password", 0.08),
            ("leak", 0.07),
            ("data", 0.25),
            ("privacy", 0.12),
            ("encryption", 0.05),
            ("backdoor", 0.02),
        ])
        .build()
        .expect("fixture config is valid")
}

/// Service over the three-document corpus, seeded for reproducibility.
pub fn small_corpus_service(seed: u64) -> PrivateSearchService {
    let mut service = PrivateSearchService::new(fixture_config(), Salt::from_bytes(FIXTURE_SALT))
        .expect("service builds")
        .with_seed(seed);
    service.add_document("d1", "covid vaccine research");
    service.add_document("d2", "security breach password");
    service.add_document("d3", "covid treatment");
    service
}

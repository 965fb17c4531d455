//! Veil Demo: progressive walkthrough of private document search
//!
//! Indexes a fixed corpus and runs a single-term query, an AND, an OR, an
//! allow-listed pair and a noise-padded batch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use veil_index::{IndexConfig, IndexConfigBuilder, PrivateSearchApi, PrivateSearchService, Salt};

const DOCUMENTS: &[(&str, &str)] = &[
    ("doc1", "COVID vaccine research shows promising results"),
    ("doc2", "Security breach exposes password database"),
    ("doc3", "Data privacy regulations in healthcare"),
    ("doc4", "Encryption backdoor discovered in software"),
    ("doc5", "COVID treatment options and vaccine efficacy"),
    ("doc6", "Password security best practices guide"),
    ("doc7", "Healthcare data breach affects millions"),
    ("doc8", "Privacy encryption tools for personal data"),
];

const PAIRS: &[(&str, &str)] = &[
    ("covid", "vaccine"),
    ("security", "breach"),
    ("password", "leak"),
    ("data", "privacy"),
    ("encryption", "backdoor"),
];

const FREQUENCIES: &[(&str, f64)] = &[
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
];

/// Veil Demo: private document search walkthrough
#[derive(Parser, Debug)]
#[command(name = "veil-demo")]
#[command(about = "Progressive walkthrough of the Veil private search index")]
struct Args {
    /// Log level used when RUST_LOG is not set
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Seed for the salt and query randomness (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON index configuration (built-in demo configuration when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log level")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let config = load_config(args.config.as_deref())?;

    let (salt, service_seed) = derive_seeds(args.seed);
    let mut service = PrivateSearchService::new(config, salt)
        .context("Failed to build search service")?
        .with_seed(service_seed);

    run(&mut service)
}

/// Salt and service seed drawn from one stream, so the service never replays
/// the bytes that produced the salt.
fn derive_seeds(seed: Option<u64>) -> (Salt, u64) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let salt = Salt::generate(&mut rng);
    (salt, rng.gen::<u64>())
}

fn load_config(path: Option<&Path>) -> Result<IndexConfig> {
    let Some(path) = path else {
        return IndexConfigBuilder::new()
            .term_frequencies(FREQUENCIES.iter().copied())
            .allow_pairs(PAIRS.iter().copied())
            .build()
            .context("Invalid built-in configuration");
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = IndexConfig::from_json(&json)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    info!(path = %path.display(), "Loaded index configuration");
    Ok(config)
}

fn run(service: &mut PrivateSearchService) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("Private Document Search - Progressive Demo");
    println!("{}", "=".repeat(60));
    println!("Salt fingerprint: {}", service.salt_fingerprint());

    for (id, text) in DOCUMENTS {
        service.add_document(id, text);
    }

    println!("\n1. Basic Search (Single Term):");
    show(service, "covid")?;

    println!("\n2. Boolean Search (AND):");
    show(service, "covid AND vaccine")?;

    println!("\n3. Boolean Search (OR):");
    show(service, "password OR encryption")?;

    println!("\n4. Correlation Hiding (Pair Encoding):");
    show(service, "encryption AND backdoor")?;
    println!("   (answered from the dedicated pair set)");

    println!("\n5. Frequency Hiding with Noise:");
    let real: Vec<String> = ["covid", "vaccine", "privacy"]
        .iter()
        .map(|q| q.to_string())
        .collect();
    let batch = service.noisy_batch(&real)?;
    println!("   Real queries: {:?}", real);
    println!("   With noise:   {:?}", batch);

    println!("\n{}", "=".repeat(60));
    Ok(())
}

fn show(service: &mut PrivateSearchService, query: &str) -> Result<()> {
    let matches = service
        .search(query)
        .with_context(|| format!("Query failed: {query}"))?;
    println!("   Query: '{}' -> {:?}", query, matches);
    Ok(())
}

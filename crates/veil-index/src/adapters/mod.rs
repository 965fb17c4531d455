//! Adapters Layer (Driven Adapters)
//!
//! Implementations of driven ports.
//!
//! - `StopWordTokenizer` - default keyword extraction

pub mod tokenizer;

pub use tokenizer::{StopWordTokenizer, DEFAULT_MIN_LEN, DEFAULT_STOP_WORDS};

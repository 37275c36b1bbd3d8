//! Syllable Network
//!
//! Quantifies how stereotyped a discrete symbol sequence (typically a bird's
//! song syllables) is.
//!
//! This library provides functionality for:
//! - Building first-order transition matrices from a sequence and an alphabet
//! - Compacting them into sparse transition networks
//! - Scoring transition entropy, sequence linearity, sequence consistency and
//!   song stereotypy
//! - Loading per-bird syllable records and rendering networks as Graphviz DOT
//!
//! ```
//! use syllable_network::network::analyze;
//! use syllable_network::sequence::Alphabet;
//!
//! let alphabet = Alphabet::from_chars("abc*").unwrap();
//! let song: Vec<char> = "abc*abc*".chars().collect();
//! let analysis = analyze(&song, &alphabet).unwrap();
//! assert_eq!(analysis.metrics.song_stereotypy, 1.0);
//! ```

pub mod cli;
pub mod config;
pub mod data_source;
pub mod error;
pub mod network;
pub mod sequence;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

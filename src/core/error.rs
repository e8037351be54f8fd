//! Error types for the short-circuit library
//!
//! Only failures that stop a caller are represented here. Malformed topology
//! rows, incomplete overlay records and decoration misses are recovered where
//! they happen and never surface as an `Error`; an unreachable destination is
//! a `None` route, not an error.

use std::path::PathBuf;

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

/// Main error type for short-circuit operations
#[derive(Debug, Error)]
pub enum Error {
    /// The bulk topology source is missing or unreadable
    #[error("failed to load topology from {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File I/O error outside of topology loading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A feed or decoration payload could not be decoded as a whole
    #[error("feed error: {0}")]
    Feed(String),

    /// Invalid configuration file
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A system name could not be resolved to an identifier
    #[error("unknown system '{name}'{}", suggestion_suffix(.suggestion))]
    UnknownSystem {
        name: String,
        suggestion: Option<String>,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Feed(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean '{s}'?"),
        None => String::new(),
    }
}

/// Convenience result type for short-circuit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimum blended similarity for a name suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Suggest the closest candidate for a misspelled name
///
/// Scores are 70% Jaro-Winkler (good at transpositions and shared prefixes)
/// plus 30% normalized Levenshtein (good at dropped letters). Comparison is
/// case-insensitive; an exact case-insensitive match yields no suggestion.
pub fn suggest_correction<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_lower = input.to_lowercase();
    let mut best: Option<(&str, f64)> = None;

    for candidate in candidates {
        let candidate_lower = candidate.to_lowercase();
        if candidate_lower == input_lower {
            return None;
        }

        let score = jaro_winkler(&input_lower, &candidate_lower) * 0.7
            + normalized_levenshtein(&input_lower, &candidate_lower) * 0.3;

        if score >= SUGGESTION_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }

    best.map(|(name, _)| name.to_string())
}

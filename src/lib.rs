//! # Bayesian n-gram language detection
//!
//! Identifies the natural language(s) of a short UTF-8 text using
//! per-language n-gram frequency profiles and a Monte-Carlo Bayesian
//! estimator. Detection is deterministic: the estimator's RNG is seeded
//! per call (default seed 0), so identical inputs produce bit-identical
//! probabilities.
//!
//! Profiles are resolved through a [`ProfileSource`] — a directory of
//! profile JSON files ([`DirSource`]) or an in-memory set
//! ([`StaticSource`]) — and merged into an immutable [`Vocabulary`].
//! Switching to another profile set rebuilds the vocabulary and swaps it
//! atomically, so concurrent detections are safe.
//!
//! # Example
//! ```rust
//! use langdetect::{Detector, DetectorConfig, LangProfile, StaticSource};
//!
//! let mut source = StaticSource::default();
//! for (code, training) in [("en", "a a a b b c c d e"), ("fr", "a b b c c c d d d")] {
//!     let mut profile = LangProfile::new(code);
//!     for token in training.split(' ') {
//!         profile.add(token);
//!     }
//!     source.insert(None, profile);
//! }
//!
//! let config = DetectorConfig::new().languages(["en", "fr"]);
//! let detector = Detector::new(source, config).unwrap();
//!
//! assert_eq!(detector.detect("b d").unwrap(), "fr");
//! let ranked = detector.detect_all("b d").unwrap();
//! assert_eq!(ranked[0].language, "fr");
//! ```

mod detector;
mod error;
mod gram_size;
mod language;
mod ngram;
mod profile;
mod source;
mod vocabulary;

pub use detector::{
    estimate, Detector, DetectorConfig, EstimatorParams, NoFeaturesPolicy, DEFAULT_LANGUAGES,
    UNKNOWN_LANGUAGE,
};
pub use error::DetectionError;
pub use gram_size::GramSize;
pub use language::{Detections, Language};
pub use ngram::{compose_vietnamese, extract_grams, normalize};
pub use profile::LangProfile;
pub use source::{DirSource, ProfileSource, StaticSource};
pub use vocabulary::Vocabulary;

use compact_str::CompactString;
use std::io;
use thiserror::Error;

/// Errors produced by profile loading and detection.
#[derive(Error, Debug)]
pub enum DetectionError {
    /// The tokenizer yielded zero vocabulary-known grams.
    #[error("no features in text")]
    NoFeatures,
    /// A profile with the same language code was already merged.
    #[error("duplicate of the same language profile: {0}")]
    DuplicateLanguage(CompactString),
    /// A supplied prior has a negative component or sums to zero.
    #[error("invalid prior: {0}")]
    InvalidPrior(&'static str),
    /// The profile source cannot resolve the requested code.
    #[error("language profile '{0}' not found")]
    ProfileNotFound(CompactString),
    /// A profile record was resolved but could not be decoded.
    #[error("invalid language profile '{0}'")]
    InvalidProfile(CompactString, #[source] serde_json::Error),
    /// A profile record has no language name.
    #[error("language profile has no name")]
    UnnamedProfile,
    #[error("failed to read language profile '{0}'")]
    ProfileRead(CompactString, #[source] io::Error),
}

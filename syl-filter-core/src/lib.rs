//! Heuristic syllable-count filtering for phonemic word corpora.
//!
//! This crate provides:
//! - Vowel sets, resolved from an in-memory list or a one-token-per-line file
//! - A pure syllable counter (number of phoneme tokens that are vowels)
//! - Order-preserving corpus filtering by one or more target counts
//! - Corpus loading with an optional binary snapshot cache
//!
//! The syllable count is an approximation: a word split on the configured
//! delimiter has as many syllables as it has tokens found in the vowel set.

/// Vowel sets, target counts, corpora and the syllable filter itself.
pub mod filter;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// I/O utilities (line reading, result writing, path helpers).
pub mod io;

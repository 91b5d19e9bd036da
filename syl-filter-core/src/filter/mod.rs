//! Top-level module for syllable-count filtering.
//!
//! This module provides:
//! - Vowel sources and resolved vowel sets (`VowelSource`, `VowelSet`)
//! - Normalized syllable count targets (`TargetCounts`)
//! - Word corpora with snapshot caching (`Corpus`)
//! - Filter construction parameters (`FilterConfig`)
//! - The counter and filter themselves (`count_syllables`, `filter_words`,
//!   `SyllableFilter`)

/// Filter construction parameters and their defaults.
pub mod config;

/// Ordered word lists, loaded from text files or postcard snapshots.
pub mod corpus;

/// Syllable counting and order-preserving corpus filtering.
///
/// Exposes the pure functions as well as `SyllableFilter`, which binds a
/// corpus to a vowel set and a delimiter.
pub mod syllable_filter;

/// Set of accepted syllable counts, built from one count, a collection
/// or a textual specification.
pub mod target_counts;

/// Vowel sources (in-memory list or file) and the resolved vowel set.
pub mod vowel_set;

pub use config::{FilterConfig, DEFAULT_DELIMITER};
pub use corpus::Corpus;
pub use syllable_filter::{count_syllables, filter_words, SyllableFilter};
pub use target_counts::TargetCounts;
pub use vowel_set::{VowelSet, VowelSource};

use serde::{Deserialize, Serialize};

use super::vowel_set::VowelSource;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = ".";

/// Construction parameters of a [`SyllableFilter`](super::syllable_filter::SyllableFilter).
///
/// - `vowels` is required and has no default.
/// - `delimiter` defaults to `"."`; an empty delimiter splits words into
///   single characters.
/// - `threads` bounds the workers of parallel filtering; `0` means one per
///   logical CPU, `1` forces sequential filtering.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FilterConfig {
	pub vowels: VowelSource,

	#[serde(default = "default_delimiter")]
	pub delimiter: String,

	#[serde(default)]
	pub threads: usize,
}

fn default_delimiter() -> String {
	DEFAULT_DELIMITER.to_owned()
}

impl FilterConfig {
	/// Creates a configuration with the default delimiter and thread count.
	pub fn new(vowels: impl Into<VowelSource>) -> Self {
		Self {
			vowels: vowels.into(),
			delimiter: default_delimiter(),
			threads: 0,
		}
	}

	pub fn with_delimiter(mut self, delimiter: &str) -> Self {
		self.delimiter = delimiter.to_owned();
		self
	}

	pub fn with_threads(mut self, threads: usize) -> Self {
		self.threads = threads;
		self
	}
}

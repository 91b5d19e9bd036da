use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::io::read_lines;

/// Where the vowel tokens of a filter come from.
///
/// # Variants
/// - `InMemory(Vec<String>)`: tokens supplied directly by the caller.
/// - `FromPath(PathBuf)`: a text file with one token per line.
///
/// A source is resolved exactly once, before any counting happens.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum VowelSource {
	InMemory(Vec<String>),
	FromPath(PathBuf),
}

impl VowelSource {
	/// Resolves the source into a [`VowelSet`].
	///
	/// # Errors
	/// - `Resource` if the vowel file cannot be read.
	/// - `Configuration` if the source yields no token at all.
	pub fn resolve(&self) -> Result<VowelSet> {
		let set: VowelSet = match self {
			VowelSource::InMemory(tokens) => tokens.iter().cloned().collect(),
			VowelSource::FromPath(path) => {
				let lines = read_lines(path).map_err(|e| FilterError::resource(path, e))?;
				debug!("Read {} vowel lines from {}", lines.len(), path.display());
				lines.into_iter().collect()
			}
		};

		if set.is_empty() {
			return Err(FilterError::Configuration(format!("{} provides no vowel", self)));
		}
		Ok(set)
	}
}

impl std::fmt::Display for VowelSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VowelSource::InMemory(_) => write!(f, "in-memory vowel list"),
			VowelSource::FromPath(path) => write!(f, "vowel file '{}'", path.display()),
		}
	}
}

impl From<Vec<String>> for VowelSource {
	fn from(tokens: Vec<String>) -> Self {
		VowelSource::InMemory(tokens)
	}
}

impl From<&[&str]> for VowelSource {
	fn from(tokens: &[&str]) -> Self {
		VowelSource::InMemory(tokens.iter().map(|t| (*t).to_owned()).collect())
	}
}

impl From<PathBuf> for VowelSource {
	fn from(path: PathBuf) -> Self {
		VowelSource::FromPath(path)
	}
}

impl From<&Path> for VowelSource {
	fn from(path: &Path) -> Self {
		VowelSource::FromPath(path.to_path_buf())
	}
}

/// Set of phoneme tokens counted as syllable nuclei.
///
/// Membership is an exact string comparison: no case folding, trimming
/// or Unicode normalization is applied to either side.
///
/// # Invariants
/// - `tokens` holds each member once, in first-seen order
/// - `lookup` contains exactly the members of `tokens`
#[derive(Clone, Debug, Default)]
pub struct VowelSet {
	/// Members in the order the source listed them (for display).
	tokens: Vec<String>,
	/// Hash index used for membership tests.
	lookup: HashSet<String>,
}

impl VowelSet {
	/// Returns `true` if `token` is a vowel.
	pub fn contains(&self, token: &str) -> bool {
		self.lookup.contains(token)
	}

	/// Number of distinct vowel tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Iterates over the vowels in source order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for VowelSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut set = VowelSet::default();
		for token in iter {
			let token = token.into();
			if set.lookup.insert(token.clone()) {
				set.tokens.push(token);
			}
		}
		set
	}
}

impl PartialEq for VowelSet {
	fn eq(&self, other: &Self) -> bool {
		self.lookup == other.lookup
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn duplicates_are_collapsed_in_source_order() {
		let set: VowelSet = ["AA", "EY", "AA", "IY"].into_iter().collect();
		assert_eq!(set.len(), 3);
		assert_eq!(set.iter().collect::<Vec<_>>(), vec!["AA", "EY", "IY"]);
	}

	#[test]
	fn membership_is_exact() {
		let set: VowelSet = ["AA"].into_iter().collect();
		assert!(set.contains("AA"));
		assert!(!set.contains("aa"));
		assert!(!set.contains(" AA"));
		assert!(!set.contains("AA1"));
	}

	#[test]
	fn resolve_in_memory() {
		let source = VowelSource::from(&["AA", "AE"][..]);
		let set = source.resolve().unwrap();
		assert!(set.contains("AE"));
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn resolve_from_file_keeps_last_line_whole() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("vowels.txt");
		fs::write(&path, "AA\nAE\nUW").unwrap();

		let set = VowelSource::from(path).resolve().unwrap();
		assert!(set.contains("UW"));
		assert!(!set.contains("U"));
	}

	#[test]
	fn empty_source_is_a_configuration_error() {
		let err = VowelSource::InMemory(Vec::new()).resolve().unwrap_err();
		assert!(matches!(err, FilterError::Configuration(_)));
	}

	#[test]
	fn unreadable_file_is_a_resource_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = VowelSource::from(dir.path().join("nope.txt")).resolve().unwrap_err();
		assert!(matches!(err, FilterError::Resource { .. }));
	}
}

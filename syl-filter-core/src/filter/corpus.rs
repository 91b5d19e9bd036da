use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::io::{read_lines, stem_name};

/// Size and modification time of a corpus text file.
///
/// A snapshot is only valid for the exact stamp it was built from; any
/// difference (older or newer mtime, other length) rebuilds it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct SourceStamp {
	len: u64,
	modified: SystemTime,
}

impl SourceStamp {
	fn of(path: &Path) -> std::io::Result<Self> {
		let metadata = fs::metadata(path)?;
		Ok(Self { len: metadata.len(), modified: metadata.modified()? })
	}
}

/// On-disk form of a corpus snapshot (`<stem>.bin`).
#[derive(Serialize, Deserialize)]
struct Snapshot<'a> {
	source: SourceStamp,
	corpus: Cow<'a, Corpus>,
}

/// Ordered list of candidate words, each a delimited pronunciation string.
///
/// A corpus is loaded once and never modified afterwards. Order and
/// duplicates of the source are preserved.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Corpus {
	/// Name of the corpus, usually the source file stem.
	name: String,
	words: Vec<String>,
}

impl Corpus {
	/// Creates a corpus from words already in memory.
	pub fn new<S: Into<String>>(name: &str, words: impl IntoIterator<Item = S>) -> Self {
		Self {
			name: name.to_owned(),
			words: words.into_iter().map(Into::into).collect(),
		}
	}

	/// Reads a corpus from a text file with one word per line.
	///
	/// Line terminators (`\n`, `\r\n`) are stripped; a last line without
	/// terminator is kept intact.
	///
	/// # Errors
	/// `Resource` if the file cannot be read.
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let path = filepath.as_ref();
		let words = read_lines(path).map_err(|e| FilterError::resource(path, e))?;
		let name = stem_name(path).map_err(|e| FilterError::resource(path, e))?;
		debug!("Read {} words from {}", words.len(), path.display());
		Ok(Self { name, words })
	}

	/// Loads a corpus, going through a binary snapshot when possible.
	///
	/// - The snapshot lives next to the text file with a `.bin` extension
	///   and records the length and mtime of the text file it was built from.
	/// - It is used only when both still match the text file exactly.
	/// - Otherwise the text file is read and the snapshot rewritten.
	///   Failing to write the snapshot is logged, not returned.
	///
	/// # Errors
	/// `Resource` if the text file cannot be read, `Snapshot` if an
	/// existing snapshot cannot be decoded.
	pub fn open<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let path = filepath.as_ref();
		let snapshot_path = path.with_extension("bin");
		let source = SourceStamp::of(path).map_err(|e| FilterError::resource(path, e))?;

		if snapshot_path.is_file() {
			let bytes = fs::read(&snapshot_path).map_err(|e| FilterError::resource(&snapshot_path, e))?;
			let snapshot: Snapshot = postcard::from_bytes(&bytes)?;
			if snapshot.source == source {
				let corpus = snapshot.corpus.into_owned();
				info!("Loaded corpus '{}' ({} words) from snapshot", corpus.name, corpus.len());
				return Ok(corpus);
			}
			debug!("Snapshot {} is stale, rebuilding", snapshot_path.display());
		}

		let corpus = Self::from_file(path)?;
		let snapshot = Snapshot { source, corpus: Cow::Borrowed(&corpus) };
		match postcard::to_stdvec(&snapshot) {
			Ok(bytes) => {
				if let Err(e) = fs::write(&snapshot_path, bytes) {
					warn!("Cannot write snapshot {}: {}", snapshot_path.display(), e);
				}
			}
			Err(e) => warn!("Cannot encode snapshot for '{}': {}", corpus.name, e),
		}
		info!("Loaded corpus '{}' ({} words) from text", corpus.name, corpus.len());
		Ok(corpus)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

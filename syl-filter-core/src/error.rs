use std::path::PathBuf;

/// Result type used throughout the crate.
///
/// Defaults to [`FilterError`] as the error type.
pub type Result<T, E = FilterError> = std::result::Result<T, E>;

/// Errors raised while configuring or running a syllable filter.
///
/// Counting and filtering themselves never fail; every variant is produced
/// at a boundary (construction, argument parsing, file access).
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
	/// The vowel set or filter configuration is unusable.
	#[error("configuration error: {0}")]
	Configuration(String),

	/// A caller-supplied argument has an unsupported shape.
	///
	/// Raised for target count specifications that are not an integer,
	/// a comma separated list of integers or an ascending `a-b` range.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A corpus, vowel or output file could not be read or written.
	#[error("cannot access '{}': {source}", path.display())]
	Resource {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A corpus snapshot could not be encoded or decoded.
	#[error("corpus snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),
}

impl FilterError {
	/// Wraps an I/O error with the path it happened on.
	pub fn resource<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
		Self::Resource { path: path.into(), source }
	}
}

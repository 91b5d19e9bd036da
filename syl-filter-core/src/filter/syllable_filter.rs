use std::sync::mpsc;
use std::thread;

use log::debug;

use super::config::FilterConfig;
use super::corpus::Corpus;
use super::target_counts::TargetCounts;
use super::vowel_set::VowelSet;
use crate::error::Result;

/// Number of chunks handed to each worker during parallel filtering.
const CHUNK_FACTOR: usize = 8;

/// Counts the syllables of `word`: the number of its phoneme tokens that
/// belong to `vowels`.
///
/// # Behavior
/// - `word` is split on `delimiter`; an empty delimiter yields one token
///   per character.
/// - Tokens are compared to the vowels as-is (exact string equality).
/// - An empty word split on a non-empty delimiter is a single empty token,
///   which only counts if `""` is itself a vowel.
pub fn count_syllables(word: &str, vowels: &VowelSet, delimiter: &str) -> usize {
	if delimiter.is_empty() {
		let mut buf = [0u8; 4];
		word.chars().filter(|c| vowels.contains(c.encode_utf8(&mut buf))).count()
	} else {
		word.split(delimiter).filter(|token| vowels.contains(token)).count()
	}
}

/// Returns the words of `corpus` whose syllable count is one of `targets`.
///
/// The result keeps the corpus order and its duplicates. `targets` may be a
/// single count or any collection accepted by [`TargetCounts`].
pub fn filter_words<S: AsRef<str>>(
	corpus: &[S],
	vowels: &VowelSet,
	delimiter: &str,
	targets: impl Into<TargetCounts>,
) -> Vec<String> {
	retain_matching(corpus, vowels, delimiter, &targets.into())
}

fn retain_matching<S: AsRef<str>>(
	words: &[S],
	vowels: &VowelSet,
	delimiter: &str,
	targets: &TargetCounts,
) -> Vec<String> {
	words
		.iter()
		.map(|word| word.as_ref())
		.filter(|word| targets.contains(count_syllables(word, vowels, delimiter)))
		.map(str::to_owned)
		.collect()
}

/// A corpus bound to a vowel set and a delimiter.
///
/// # Responsibilities
/// - Count syllables of arbitrary words with the bound vowels and delimiter
/// - Filter the whole corpus for one or more syllable counts
/// - Optionally spread filtering over several threads
///
/// # Invariants
/// - Corpus, vowels and delimiter never change after construction
/// - Every filtering call returns a fresh result; nothing is cached
#[derive(Clone, Debug)]
pub struct SyllableFilter {
	corpus: Corpus,
	vowels: VowelSet,
	delimiter: String,
	threads: usize,
}

impl SyllableFilter {
	/// Builds a filter from a corpus and a configuration.
	///
	/// The vowel source is resolved here, once.
	///
	/// # Errors
	/// - `Resource` if the vowel file cannot be read.
	/// - `Configuration` if the vowel source is empty.
	pub fn new(corpus: Corpus, config: &FilterConfig) -> Result<Self> {
		let vowels = config.vowels.resolve()?;
		debug!(
			"Filter on '{}': {} words, {} vowels, delimiter {:?}",
			corpus.name(),
			corpus.len(),
			vowels.len(),
			config.delimiter
		);
		Ok(Self {
			corpus,
			vowels,
			delimiter: config.delimiter.clone(),
			threads: config.threads,
		})
	}

	/// Builds a sequential filter from an already resolved vowel set.
	///
	/// No validation is performed: an empty vowel set is accepted and
	/// gives every word zero syllables.
	pub fn with_vowels(corpus: Corpus, vowels: VowelSet, delimiter: &str) -> Self {
		Self {
			corpus,
			vowels,
			delimiter: delimiter.to_owned(),
			threads: 1,
		}
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	pub fn vowels(&self) -> &VowelSet {
		&self.vowels
	}

	pub fn delimiter(&self) -> &str {
		&self.delimiter
	}

	/// Counts the syllables of `word` with this filter's vowels and delimiter.
	pub fn count_syllables(&self, word: &str) -> usize {
		count_syllables(word, &self.vowels, &self.delimiter)
	}

	/// Returns the corpus words whose syllable count is in `targets`.
	pub fn filter_words(&self, targets: impl Into<TargetCounts>) -> Vec<String> {
		retain_matching(self.corpus.words(), &self.vowels, &self.delimiter, &targets.into())
	}

	/// Same result as [`filter_words`](Self::filter_words), computed on
	/// several threads.
	///
	/// # Behavior
	/// - Splits the corpus into `workers * 8` chunks.
	/// - Worker `w` filters chunks `w`, `w + workers`, ... and sends
	///   `(chunk_index, matches)` through an MPSC channel.
	/// - Partial results are put back in chunk order, so the output order
	///   is the corpus order.
	///
	/// # Notes
	/// - `threads == 0` in the configuration means one worker per CPU.
	/// - Falls back to sequential filtering with a single worker or when
	///   the corpus has fewer words than chunks, which covers any absurd
	///   `threads` value.
	pub fn filter_words_parallel(&self, targets: impl Into<TargetCounts>) -> Vec<String> {
		let targets = targets.into();
		let words = self.corpus.words();
		let workers = if self.threads == 0 { num_cpus::get() } else { self.threads };
		let chunks = workers.saturating_mul(CHUNK_FACTOR);

		if workers <= 1 || words.len() < chunks {
			return retain_matching(words, &self.vowels, &self.delimiter, &targets);
		}

		let chunk_size = words.len().div_ceil(chunks);
		let slices: Vec<&[String]> = words.chunks(chunk_size).collect();
		debug!("Filtering {} words in {} chunks on {} threads", words.len(), slices.len(), workers);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for worker in 0..workers {
				let tx = tx.clone();
				let slices = &slices;
				let targets = &targets;
				scope.spawn(move || {
					for index in (worker..slices.len()).step_by(workers) {
						let matches = retain_matching(slices[index], &self.vowels, &self.delimiter, targets);
						if tx.send((index, matches)).is_err() {
							break;
						}
					}
				});
			}
		});
		drop(tx);

		let mut parts: Vec<(usize, Vec<String>)> = rx.iter().collect();
		parts.sort_unstable_by_key(|(index, _)| *index);
		parts.into_iter().flat_map(|(_, matches)| matches).collect()
	}
}

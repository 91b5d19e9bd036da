//! End-to-end runs over files on disk: load corpus and vowels, filter,
//! write the result the way the command line tool does.

use std::fs;

use syl_filter_core::error::FilterError;
use syl_filter_core::filter::{Corpus, FilterConfig, SyllableFilter, TargetCounts, VowelSource};
use syl_filter_core::io::{read_lines, write_lines};

const CORPUS: &str = "B.AA.T\nK.AE.T.AA.B\nS.IY\nT\nB.AA.T\nAH.B.AW.T\n";
const VOWELS: &str = "AA\nAE\nAH\nAW\nIY";

#[test]
fn monosyllabic_list_from_files() {
	let dir = tempfile::tempdir().unwrap();
	let corpus_path = dir.path().join("words.txt");
	let vowels_path = dir.path().join("vowels.txt");
	let output_path = dir.path().join("words_1syll.txt");
	fs::write(&corpus_path, CORPUS).unwrap();
	fs::write(&vowels_path, VOWELS).unwrap();

	let corpus = Corpus::open(&corpus_path).unwrap();
	let config = FilterConfig::new(VowelSource::from(vowels_path));
	let filter = SyllableFilter::new(corpus, &config).unwrap();

	let result = filter.filter_words(1);
	write_lines(&output_path, &result).unwrap();

	assert_eq!(fs::read_to_string(&output_path).unwrap(), "B.AA.T\nS.IY\nB.AA.T");
	assert_eq!(read_lines(&output_path).unwrap(), result);
}

#[test]
fn each_query_stands_alone() {
	let dir = tempfile::tempdir().unwrap();
	let corpus_path = dir.path().join("words.txt");
	fs::write(&corpus_path, CORPUS).unwrap();

	let corpus = Corpus::from_file(&corpus_path).unwrap();
	let vowels: Vec<String> = VOWELS.lines().map(str::to_owned).collect();
	let filter = SyllableFilter::new(corpus, &FilterConfig::new(vowels).with_threads(2)).unwrap();

	let two: TargetCounts = "2".parse().unwrap();
	let zero_or_two: TargetCounts = "0,2".parse().unwrap();
	assert_eq!(filter.filter_words_parallel(two.clone()), vec!["K.AE.T.AA.B", "AH.B.AW.T"]);
	assert_eq!(filter.filter_words(zero_or_two), vec!["K.AE.T.AA.B", "T", "AH.B.AW.T"]);
	assert_eq!(filter.filter_words(two), vec!["K.AE.T.AA.B", "AH.B.AW.T"]);
}

#[test]
fn character_level_corpus() {
	let dir = tempfile::tempdir().unwrap();
	let corpus_path = dir.path().join("ipa.txt");
	fs::write(&corpus_path, "kæt\r\nbætə\r\nst\r\n").unwrap();

	let corpus = Corpus::from_file(&corpus_path).unwrap();
	let config = FilterConfig::new(VowelSource::from(&["æ", "ə"][..])).with_delimiter("");
	let filter = SyllableFilter::new(corpus, &config).unwrap();

	assert_eq!(filter.filter_words(1), vec!["kæt"]);
	assert_eq!(filter.filter_words(2), vec!["bætə"]);
	assert_eq!(filter.filter_words(0), vec!["st"]);
}

#[test]
fn empty_vowel_file_fails_at_construction() {
	let dir = tempfile::tempdir().unwrap();
	let vowels_path = dir.path().join("vowels.txt");
	fs::write(&vowels_path, "").unwrap();

	let corpus = Corpus::new("inline", ["B.AA.T"]);
	let err = SyllableFilter::new(corpus, &FilterConfig::new(VowelSource::from(vowels_path))).unwrap_err();
	assert!(matches!(err, FilterError::Configuration(_)));
}

#[test]
fn malformed_target_spec_is_rejected() {
	let err = "one".parse::<TargetCounts>().unwrap_err();
	assert!(matches!(err, FilterError::InvalidArgument(_)));
}

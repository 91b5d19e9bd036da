use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use syl_filter_core::error::{FilterError, Result as FilterResult};
use syl_filter_core::filter::{Corpus, FilterConfig, SyllableFilter, TargetCounts, VowelSource};
use syl_filter_core::io::write_lines;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "syl-filter", about = "Keeps the words of a phonemic corpus that have the requested number of syllables")]
struct Args {
    /// Corpus file, one pronunciation per line
    #[arg(short, long, default_value = "../databases/iphod/iphod_words_phono_only.txt")]
    corpus: PathBuf,

    /// Vowel file, one phoneme per line
    #[arg(short, long, default_value = "../databases/iphod/cmu_vowels.txt", conflicts_with = "vowel_list")]
    vowels: PathBuf,

    /// Comma separated vowels, used instead of a vowel file
    #[arg(long, value_delimiter = ',')]
    vowel_list: Option<Vec<String>>,

    /// Phoneme delimiter, an empty string splits words into characters
    #[arg(short, long, default_value = ".")]
    delimiter: String,

    /// Syllable counts to keep: "1", "1,2" or "1-3". Repeat for several queries
    #[arg(short = 'n', long = "counts", default_value = "1")]
    counts: Vec<TargetCounts>,

    /// Output file (single query only)
    #[arg(short, long, default_value = "../databases/iphod/iphod_words_monosyllabic_phono_only.txt")]
    output: PathBuf,

    /// Output directory, one file per query (overrides --output)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Worker threads, 0 uses every core
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Always read the corpus text file, never the .bin snapshot
    #[arg(long)]
    no_cache: bool,
}

/// Output file of one query inside `dir`: `<corpus>_<counts>syll.txt`.
///
/// `<counts>` is the canonical form of the targets with `_` between items,
/// e.g. `1_3-5`.
fn query_output_path(dir: &Path, corpus: &str, targets: &TargetCounts) -> PathBuf {
    let label = targets.to_string().replace(',', "_");
    dir.join(format!("{}_{}syll.txt", corpus, label))
}

/// Writes one query result, naming `path` in the error.
fn save_words(path: &Path, words: &[String]) -> FilterResult<()> {
    write_lines(path, words).map_err(|e| FilterError::resource(path, e))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.output_dir.is_none() && args.counts.len() > 1 {
        return Err("several --counts queries need --output-dir".into());
    }

    // Either the inline list or the vowel file
    let vowels = match args.vowel_list {
        Some(list) => VowelSource::InMemory(list),
        None => VowelSource::FromPath(args.vowels),
    };
    let config = FilterConfig::new(vowels)
        .with_delimiter(&args.delimiter)
        .with_threads(args.threads);

    let corpus = if args.no_cache {
        Corpus::from_file(&args.corpus)?
    } else {
        Corpus::open(&args.corpus)?
    };
    let filter = SyllableFilter::new(corpus, &config)?;
    info!(
        "Corpus '{}': {} words, {} vowels",
        filter.corpus().name(),
        filter.corpus().len(),
        filter.vowels().len()
    );

    // Every query runs over the whole corpus
    for targets in &args.counts {
        let words = filter.filter_words_parallel(targets.clone());
        let path = match &args.output_dir {
            Some(dir) => query_output_path(dir, filter.corpus().name(), targets),
            None => args.output.clone(),
        };
        save_words(&path, &words)?;
        info!("{} words with {} syllable(s) -> {}", words.len(), targets, path.display());
    }

    Ok(())
}

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`, the terminator is never part of a line
/// - A last line without terminator is kept whole
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Writes `lines` joined by `\n`, without a trailing terminator.
///
/// An empty slice produces an empty file.
pub fn write_lines<P: AsRef<Path>, S: AsRef<str>>(filename: P, lines: &[S]) -> io::Result<()> {
	let mut contents = String::new();
	for (i, line) in lines.iter().enumerate() {
		if i > 0 {
			contents.push('\n');
		}
		contents.push_str(line.as_ref());
	}
	fs::write(filename, contents)
}

/// File stem of `path` as an owned string: `data/iphod.txt` gives `iphod`.
///
/// Used as the display name of a corpus.
pub fn stem_name<P: AsRef<Path>>(path: P) -> io::Result<String> {
	match path.as_ref().file_stem() {
		Some(stem) => Ok(stem.to_string_lossy().into_owned()),
		None => Err(io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")),
	}
}

/// Data folder given on the command line.
///
/// `.` and `./` become the working directory, so log lines show where
/// corpora are actually read from. Anything else is taken verbatim.
pub fn resolve_folder(input: &str) -> PathBuf {
	match input {
		"." | "./" => env::current_dir().unwrap_or_else(|_| PathBuf::from(input)),
		_ => PathBuf::from(input),
	}
}

/// Sorted names (not paths) of the regular files in `dir` ending in
/// `.<extension>`. Subdirectories are skipped, whatever their name.
pub fn files_with_extension<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut names = Vec::new();
	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
			continue;
		}
		if let Some(name) = path.file_name() {
			names.push(name.to_string_lossy().into_owned());
		}
	}
	names.sort();
	Ok(names)
}

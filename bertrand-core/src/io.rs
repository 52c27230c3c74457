use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::store::UserId;

/// Reads a text file and returns its non-blank lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Drops lines made only of whitespace
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(str::to_owned)
		.collect())
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/1234.txt"` → `"1234"`
/// - `"1234.txt"` → `"1234"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted so corpus loading is reproducible.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

/// Reads a corpus folder where each `<user id>.txt` file holds one message per line.
///
/// Files whose stem is not a numeric user id are skipped with a warning.
pub fn read_corpus<P: AsRef<Path>>(dir: P) -> io::Result<Vec<(UserId, Vec<String>)>> {
	let dir = dir.as_ref();
	let mut corpus = Vec::new();

	for file in list_files(dir, "txt")? {
		let stem = get_filename(&file)?;
		let Ok(user_id) = stem.parse::<UserId>() else {
			log::warn!("Ignoring corpus file '{}': not a user id", file);
			continue;
		};
		corpus.push((user_id, read_file(dir.join(&file))?));
	}

	Ok(corpus)
}

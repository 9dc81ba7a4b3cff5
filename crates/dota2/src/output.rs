//! Batch files on disk.
//!
//! Every batch lands in its own `{first}-{last}.json` file, where `first` and `last` are the
//! smallest and largest sequence number inside it. Which ranges have been captured can therefore
//! be read off the file names alone.

use {
	crate::{models::Match, Result},
	log::{debug, info},
	serde::Serialize,
	serde_json::ser::PrettyFormatter,
	std::{
		io::{BufWriter, Write},
		path::{Path, PathBuf},
	},
	tempfile::NamedTempFile,
};

pub fn file_name(first: u64, last: u64) -> String {
	format!("{first}-{last}.json")
}

/// Parses a file name produced by [`file_name`].
pub fn parse_file_name(name: &str) -> Option<(u64, u64)> {
	let (first, last) = name.strip_suffix(".json")?.split_once('-')?;
	let first = first.parse::<u64>().ok()?;
	let last = last.parse::<u64>().ok()?;

	(first <= last).then_some((first, last))
}

/// Smallest and largest sequence number in `matches`.
pub fn sequence_range(matches: &[Match]) -> Option<(u64, u64)> {
	let first = matches.iter().map(|m| m.sequence_number).min()?;
	let last = matches.iter().map(|m| m.sequence_number).max()?;
	Some((first, last))
}

/// Writes the raw payloads of `matches` into `directory` as a pretty printed JSON array with
/// sorted keys. Returns the path of the new file, or `None` if there was nothing to write.
///
/// The data goes into a temporary file next to the target first and is only renamed to
/// `{first}-{last}.json` once it has been flushed completely.
pub fn write_batch(directory: &Path, matches: &[Match]) -> Result<Option<PathBuf>> {
	let Some((first, last)) = sequence_range(matches) else {
		return Ok(None);
	};

	std::fs::create_dir_all(directory)?;
	let path = directory.join(file_name(first, last));

	let mut temp_file = NamedTempFile::new_in(directory)?;
	let mut buf_writer = BufWriter::new(temp_file.as_file_mut());
	let mut serializer =
		serde_json::Serializer::with_formatter(&mut buf_writer, PrettyFormatter::with_indent(b"    "));
	matches.serialize(&mut serializer)?;
	buf_writer.write_all(b"\n")?;
	buf_writer.flush()?;
	drop(buf_writer);
	debug!("Flushed `{}`.", temp_file.path().display());

	temp_file
		.persist(&path)
		.map_err(|why| why.error)?;

	info!("Processed ({}) matches from {first} to {last}.", matches.len());
	Ok(Some(path))
}

/// All `(first, last)` ranges found in `directory`, sorted. Files that don't follow the naming
/// scheme are ignored.
pub fn captured_ranges(directory: &Path) -> Result<Vec<(u64, u64)>> {
	let mut ranges = Vec::new();
	for entry in std::fs::read_dir(directory)? {
		let entry = entry?;
		if !entry.file_type()?.is_file() {
			continue;
		}

		if let Some(range) = entry
			.file_name()
			.to_str()
			.and_then(parse_file_name)
		{
			ranges.push(range);
		}
	}

	ranges.sort_unstable();
	Ok(ranges)
}

/// Sequence number to continue from: one past the largest captured sequence number. `None` if
/// nothing has been captured yet.
pub fn resume_cursor(directory: &Path) -> Result<Option<u64>> {
	if !directory.exists() {
		return Ok(None);
	}

	Ok(captured_ranges(directory)?
		.into_iter()
		.filter_map(|(_, last)| last.checked_add(1))
		.max())
}

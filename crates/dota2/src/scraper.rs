//! Walks the global match stream by sequence number and writes everything it sees to disk.

use {
	crate::{client::Dota2, models::Match, output, Result},
	async_trait::async_trait,
	log::{debug, error, info},
	std::{path::PathBuf, time::Duration},
	tokio::time::sleep,
};

/// Anything that can hand out pages of matches ordered by sequence number.
#[async_trait]
pub trait MatchSource {
	async fn matches_by_sequence(&self, start: Option<u64>, page_size: Option<u32>)
		-> Result<Vec<Match>>;
}

#[async_trait]
impl MatchSource for Dota2 {
	async fn matches_by_sequence(
		&self,
		start: Option<u64>,
		page_size: Option<u32>,
	) -> Result<Vec<Match>> {
		self.get_match_history_by_sequence(start, page_size)
			.await
	}
}

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
	/// Sequence number to start at. `None` lets the API decide.
	pub start: Option<u64>,
	/// Stop after this many matches.
	pub limit: usize,
	/// How many matches go into one file.
	pub matches_per_file: usize,
	/// Matches per request. `None` uses the API's default.
	pub page_size: Option<u32>,
	/// Pause between two requests.
	pub delay: Duration,
}

impl Default for ScrapeOptions {
	fn default() -> Self {
		Self {
			start: None,
			limit: 10_000_000,
			matches_per_file: 1000,
			page_size: None,
			delay: Duration::from_secs(1),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
	/// Matches fetched and written.
	pub matches: usize,
	pub files: Vec<PathBuf>,
	/// Where the next run should start to pick up right after this one.
	pub next_cursor: Option<u64>,
}

/// One past the largest sequence number in `page`.
pub fn next_cursor(page: &[Match]) -> Option<u64> {
	page.iter()
		.map(|m| m.sequence_number)
		.max()
		.and_then(|max| max.checked_add(1))
}

#[derive(Debug)]
pub struct Scraper<S> {
	source: S,
	directory: PathBuf,
	options: ScrapeOptions,
}

impl<S: MatchSource> Scraper<S> {
	pub fn new(source: S, directory: impl Into<PathBuf>, options: ScrapeOptions) -> Self {
		Self { source, directory: directory.into(), options }
	}

	/// Fetches pages until the API runs dry or `limit` matches have been collected.
	///
	/// Every time `matches_per_file` matches have piled up they are written to a new file.
	/// Whatever is left when the loop ends gets written as well. A failed request aborts the run,
	/// but only after the matches fetched so far have been written, so the logged cursor is a
	/// safe place to continue from.
	pub async fn run(&self) -> Result<ScrapeSummary> {
		let matches_per_file = self.options.matches_per_file.max(1);
		let mut summary = ScrapeSummary { next_cursor: self.options.start, ..Default::default() };
		let mut remaining = self.options.limit;
		let mut batch = Vec::with_capacity(matches_per_file);

		info!("Starting the requests...");
		while remaining > 0 {
			let mut page = match self
				.source
				.matches_by_sequence(summary.next_cursor, self.options.page_size)
				.await
			{
				Ok(page) => page,
				Err(why) => {
					match output::write_batch(&self.directory, &batch) {
						Ok(file) => summary.files.extend(file),
						Err(flush_error) => {
							error!("Failed to write {} pending matches: {flush_error}", batch.len())
						}
					}
					error!("Stopped at sequence number {:?}: {why}", summary.next_cursor);
					return Err(why);
				}
			};

			if page.is_empty() {
				info!("No more matches after {:?}.", summary.next_cursor);
				break;
			}

			// Don't overshoot the limit.
			page.truncate(remaining);

			let cursor = next_cursor(&page);
			summary.next_cursor = cursor;
			summary.matches += page.len();
			remaining -= page.len();
			debug!("Got {} matches, next cursor is {:?}.", page.len(), summary.next_cursor);

			batch.extend(page);
			while batch.len() >= matches_per_file {
				let rest = batch.split_off(matches_per_file);
				let full = std::mem::replace(&mut batch, rest);
				summary
					.files
					.extend(output::write_batch(&self.directory, &full)?);
			}

			info!("{} / {} matches.", summary.matches, self.options.limit);

			// Nothing can come after `u64::MAX`.
			if cursor.is_none() {
				info!("Reached the last possible sequence number.");
				break;
			}

			if remaining > 0 && !self.options.delay.is_zero() {
				sleep(self.options.delay).await;
			}
		}

		summary
			.files
			.extend(output::write_batch(&self.directory, &batch)?);

		Ok(summary)
	}
}

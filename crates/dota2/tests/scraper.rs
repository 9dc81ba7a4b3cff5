use {
	dota2::{
		output,
		scraper::{next_cursor, MatchSource, ScrapeOptions, Scraper},
		Error, Match, Result,
	},
	serde_json::{json, Value as JsonValue},
	std::{collections::VecDeque, path::Path, sync::Mutex, time::Duration},
	tempfile::TempDir,
};

fn raw_match(sequence_number: u64) -> JsonValue {
	json!({
		"match_id": sequence_number.wrapping_add(7_000_000_000),
		"match_seq_num": sequence_number,
		"start_time": 1672531200,
		"lobby_type": 0,
		"players": [
			{ "account_id": 11, "player_slot": 0, "hero_id": 1 },
			{ "account_id": 12, "player_slot": 128, "hero_id": 2 }
		]
	})
}

fn page(sequence_numbers: impl IntoIterator<Item = u64>) -> Vec<Match> {
	sequence_numbers
		.into_iter()
		.map(|n| Match::try_from(raw_match(n)).unwrap())
		.collect()
}

/// Hands out prepared pages in order, then empty pages forever.
#[derive(Default)]
struct FakeSource {
	pages: Mutex<VecDeque<Result<Vec<Match>>>>,
	requested: Mutex<Vec<Option<u64>>>,
}

impl FakeSource {
	fn new(pages: Vec<Result<Vec<Match>>>) -> Self {
		Self { pages: Mutex::new(pages.into()), ..Default::default() }
	}

	fn requested(&self) -> Vec<Option<u64>> {
		self.requested.lock().unwrap().clone()
	}
}

#[async_trait::async_trait]
impl<'a> MatchSource for &'a FakeSource {
	async fn matches_by_sequence(&self, start: Option<u64>, _: Option<u32>) -> Result<Vec<Match>> {
		self.requested.lock().unwrap().push(start);
		self.pages
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| Ok(Vec::new()))
	}
}

fn options(start: Option<u64>, limit: usize, matches_per_file: usize) -> ScrapeOptions {
	ScrapeOptions { start, limit, matches_per_file, page_size: None, delay: Duration::ZERO }
}

fn file_names(directory: &Path) -> Vec<String> {
	let mut names = std::fs::read_dir(directory)
		.map(|entries| {
			entries
				.map(|entry| entry.unwrap().file_name().into_string().unwrap())
				.collect::<Vec<_>>()
		})
		.unwrap_or_default();
	names.sort();
	names
}

fn sequence_numbers_in(path: &Path) -> Vec<u64> {
	let contents = std::fs::read_to_string(path).unwrap();
	serde_json::from_str::<Vec<JsonValue>>(&contents)
		.unwrap()
		.iter()
		.map(|m| m["match_seq_num"].as_u64().unwrap())
		.collect()
}

#[test]
fn cursor_is_one_past_the_largest_sequence_number() {
	assert_eq!(next_cursor(&page([5, 6, 7])), Some(8));
	assert_eq!(next_cursor(&page([7, 5, 6])), Some(8));
	assert_eq!(next_cursor(&page([u64::MAX])), None);
	assert_eq!(next_cursor(&[]), None);
}

#[tokio::test]
async fn advances_the_cursor_between_pages() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![Ok(page([5, 6, 7])), Ok(page([8, 9]))]);

	let summary = Scraper::new(&source, dir.path(), options(Some(5), 100, 1000))
		.run()
		.await
		.unwrap();

	assert_eq!(source.requested(), vec![Some(5), Some(8), Some(10)]);
	assert_eq!(summary.matches, 5);
	assert_eq!(summary.next_cursor, Some(10));
}

#[tokio::test]
async fn empty_page_stops_without_writing() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![Ok(Vec::new()), Ok(page([1, 2, 3]))]);

	let summary = Scraper::new(&source, dir.path(), options(None, 100, 2))
		.run()
		.await
		.unwrap();

	assert_eq!(source.requested(), vec![None]);
	assert_eq!(summary.matches, 0);
	assert!(summary.files.is_empty());
	assert_eq!(summary.next_cursor, None);
	assert!(file_names(dir.path()).is_empty());
}

#[tokio::test]
async fn stops_exactly_at_the_limit() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![
		Ok(page([1, 2, 3])),
		Ok(page([4, 5, 6])),
		Ok(page([7, 8, 9])),
		Ok(page([10, 11, 12])),
	]);

	let summary = Scraper::new(&source, dir.path(), options(Some(1), 7, 1000))
		.run()
		.await
		.unwrap();

	assert_eq!(source.requested().len(), 3);
	assert_eq!(summary.matches, 7);
	assert_eq!(summary.next_cursor, Some(8));
	assert_eq!(file_names(dir.path()), vec!["1-7.json"]);
	assert_eq!(sequence_numbers_in(&dir.path().join("1-7.json")), (1..=7).collect::<Vec<_>>());
}

#[tokio::test]
async fn writes_full_batches_and_the_remainder() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![Ok(page([1, 2, 3])), Ok(page([4, 5, 6])), Ok(page([7, 8, 9]))]);

	let summary = Scraper::new(&source, dir.path(), options(Some(1), 100, 4))
		.run()
		.await
		.unwrap();

	assert_eq!(summary.matches, 9);
	assert_eq!(summary.files.len(), 3);
	assert_eq!(file_names(dir.path()), vec!["1-4.json", "5-8.json", "9-9.json"]);

	// every file name matches what's inside
	for name in file_names(dir.path()) {
		let (first, last) = output::parse_file_name(&name).unwrap();
		let inside = sequence_numbers_in(&dir.path().join(&name));
		assert_eq!(inside.iter().min(), Some(&first));
		assert_eq!(inside.iter().max(), Some(&last));
	}
}

#[tokio::test]
async fn files_are_pretty_with_sorted_keys() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![Ok(page([3]))]);

	Scraper::new(&source, dir.path(), options(None, 100, 1000))
		.run()
		.await
		.unwrap();

	let contents = std::fs::read_to_string(dir.path().join("3-3.json")).unwrap();
	assert!(contents.starts_with("[\n    {\n        \"lobby_type\": 0,\n        \"match_id\""));
	assert_eq!(serde_json::from_str::<JsonValue>(&contents).unwrap(), json!([raw_match(3)]));
}

#[tokio::test]
async fn errors_abort_but_keep_written_files() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![
		Ok(page([1, 2])),
		Err(Error::Http { status: 503, url: String::from("http://localhost/") }),
		Ok(page([3, 4])),
	]);

	let why = Scraper::new(&source, dir.path(), options(Some(1), 100, 2))
		.run()
		.await
		.unwrap_err();

	assert!(matches!(why, Error::Http { status: 503, .. }));
	assert_eq!(source.requested(), vec![Some(1), Some(3)]);
	assert_eq!(file_names(dir.path()), vec!["1-2.json"]);
}

#[tokio::test]
async fn errors_write_pending_matches_first() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![
		Ok(page([1, 2, 3])),
		Err(Error::Http { status: 503, url: String::from("http://localhost/") }),
	]);

	let why = Scraper::new(&source, dir.path(), options(Some(1), 100, 5))
		.run()
		.await
		.unwrap_err();

	assert!(matches!(why, Error::Http { status: 503, .. }));
	assert_eq!(source.requested(), vec![Some(1), Some(4)]);
	assert_eq!(file_names(dir.path()), vec!["1-3.json"]);
	assert_eq!(sequence_numbers_in(&dir.path().join("1-3.json")), vec![1, 2, 3]);
	assert_eq!(output::resume_cursor(dir.path()).unwrap(), Some(4));
}

#[tokio::test]
async fn stops_after_the_last_sequence_number() {
	let dir = TempDir::new().unwrap();
	let source = FakeSource::new(vec![Ok(page([u64::MAX - 1, u64::MAX])), Ok(page([1, 2]))]);

	let summary = Scraper::new(&source, dir.path(), options(Some(u64::MAX - 1), 100, 10))
		.run()
		.await
		.unwrap();

	assert_eq!(source.requested(), vec![Some(u64::MAX - 1)]);
	assert_eq!(summary.matches, 2);
	assert_eq!(summary.next_cursor, None);
	assert_eq!(file_names(dir.path()), vec![format!("{}-{}.json", u64::MAX - 1, u64::MAX)]);
}

#[tokio::test]
async fn resumes_from_written_files() {
	let dir = TempDir::new().unwrap();
	assert_eq!(output::resume_cursor(dir.path()).unwrap(), None);

	let source = FakeSource::new(vec![Ok(page([10, 11])), Ok(page([12, 13])), Ok(page([14]))]);
	Scraper::new(&source, dir.path(), options(Some(10), 100, 2))
		.run()
		.await
		.unwrap();

	std::fs::write(dir.path().join("README.txt"), "not a batch").unwrap();

	assert_eq!(output::captured_ranges(dir.path()).unwrap(), vec![(10, 11), (12, 13), (14, 14)]);
	assert_eq!(output::resume_cursor(dir.path()).unwrap(), Some(15));
	assert_eq!(output::resume_cursor(&dir.path().join("missing")).unwrap(), None);
}

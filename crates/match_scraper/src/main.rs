#![deny(clippy::complexity, clippy::perf)]
#![warn(clippy::suspicious, clippy::style)]

mod config;

use {
	clap::{Parser, Subcommand},
	color_eyre::{eyre::eyre, Result as Eyre},
	config::Config,
	dota2::{output, Dota2, MatchHistoryQuery, ScrapeOptions, Scraper},
	log::{info, warn},
	std::{path::PathBuf, time::Duration},
};

/// Fetch Dota 2 matches from the Steam Web API.
#[derive(Debug, Parser)]
struct Args {
	/// Config file containing the Steam API key. `DOTA_API_KEY` takes precedence.
	#[arg(short, long = "config")]
	#[clap(default_value = "./config.toml")]
	config_path: PathBuf,

	/// Print no logs to stdout.
	#[arg(short, long)]
	#[clap(default_value = "false")]
	quiet: bool,

	/// Print debug information. This option overrides `quiet`.
	#[arg(long)]
	#[clap(default_value = "false")]
	debug: bool,

	/// What to do.
	#[command(subcommand)]
	mode: ExecutionMode,
}

#[derive(Debug, Subcommand)]
enum ExecutionMode {
	/// Walk the match stream by sequence number and save everything as JSON files.
	Scrape {
		/// The sequence number to start at. If not specified, the API picks one.
		#[arg(long)]
		start: Option<u64>,

		/// Continue where the files in `output_dir` left off. Ignored if `start` is given.
		#[arg(long)]
		#[clap(default_value = "false")]
		resume: bool,

		/// How many matches to fetch before stopping.
		#[arg(short, long)]
		#[clap(default_value = "10000000")]
		limit: usize,

		/// How many matches go into one file.
		#[arg(long)]
		#[clap(default_value = "1000")]
		per_file: usize,

		/// Matches per request. Max is 100.
		#[arg(long)]
		page_size: Option<u32>,

		/// Delay between each request in milliseconds.
		#[arg(long)]
		#[clap(default_value = "1000")]
		delay: u64,

		/// Directory for the output files.
		#[arg(short, long)]
		#[clap(default_value = "./matches")]
		output_dir: PathBuf,
	},

	/// Print recent matches.
	History {
		#[arg(long)]
		account_id: Option<u32>,

		#[arg(long)]
		hero_id: Option<u32>,

		#[arg(long)]
		start_at_match_id: Option<u64>,

		#[arg(short = 'n', long)]
		matches_requested: Option<u32>,
	},

	/// Print a single match as JSON.
	Match { match_id: u64 },

	/// Print all heroes.
	Heroes {
		/// e.g. `en_us`
		#[arg(long)]
		language: Option<String>,
	},

	/// Check whether the API key works.
	Validate,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Eyre<()> {
	let start = chrono::Utc::now().timestamp_millis();

	// setup error handling
	color_eyre::install()?;

	// parse cli args
	let args = Args::parse();

	// setup logging
	std::env::set_var(
		"RUST_LOG",
		if args.quiet { "match_scraper=ERROR,dota2=ERROR" } else { "match_scraper=INFO,dota2=INFO" },
	);
	if args.debug {
		std::env::set_var("RUST_LOG", "match_scraper=DEBUG,dota2=DEBUG");
	}
	env_logger::init();

	let config = Config::load(&args.config_path)?;
	let dota = Dota2::new(config.api_key()?);

	match args.mode {
		ExecutionMode::Scrape { start, resume, limit, per_file, page_size, delay, output_dir } => {
			let start = match (start, resume) {
				(Some(start), _) => Some(start),
				(None, true) => {
					let cursor = output::resume_cursor(&output_dir)?;
					match cursor {
						Some(cursor) => info!("Resuming at sequence number {cursor}."),
						None => warn!("Nothing to resume in `{}`.", output_dir.display()),
					}
					cursor
				}
				(None, false) => None,
			};

			let options = ScrapeOptions {
				start,
				limit,
				matches_per_file: per_file,
				page_size,
				delay: Duration::from_millis(delay),
			};

			let summary = Scraper::new(dota, output_dir, options)
				.run()
				.await?;

			info!("Scraped {} matches into {} files.", summary.matches, summary.files.len());
			if let Some(cursor) = summary.next_cursor {
				info!("Next run can start at sequence number {cursor}.");
			}
		}
		ExecutionMode::History { account_id, hero_id, start_at_match_id, matches_requested } => {
			let query = MatchHistoryQuery {
				account_id,
				hero_id,
				start_at_match_id,
				matches_requested,
				..Default::default()
			};

			let history = dota.find_match_history(&query).await?;
			info!("Fetched {} matches.", history.len());

			for m in history {
				println!(
					"{} | #{} | {} | {} | {} players",
					m.id,
					m.sequence_number,
					m.start_time.format("%Y-%m-%d %H:%M:%S"),
					m.lobby_type,
					m.players.len()
				);
			}
		}
		ExecutionMode::Match { match_id } => {
			let details = dota.find_match(match_id).await?;
			println!("{}", serde_json::to_string_pretty(&details)?);
		}
		ExecutionMode::Heroes { language } => {
			let heroes = dota.get_heroes(language.as_deref()).await?;
			info!("Fetched {} heroes.", heroes.len());

			for hero in heroes {
				println!("{}\t{}", hero.id, hero.display_name());
			}
		}
		ExecutionMode::Validate => {
			if !dota.is_valid().await? {
				return Err(eyre!("The API answered, but with an empty body."));
			}
			info!("API key is valid.");
		}
	}

	let took = chrono::Utc::now().timestamp_millis() - start;
	info!("Finished after {:.3} seconds.", took as f64 / 1000.0);
	Ok(())
}

#[cfg(test)]
mod tests {
	use {super::*, clap::CommandFactory};

	#[test]
	fn cli_is_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn scrape_defaults() {
		let args = Args::try_parse_from(["match_scraper", "scrape", "--start", "42"]).unwrap();
		let ExecutionMode::Scrape { start, resume, limit, per_file, page_size, delay, output_dir } =
			args.mode
		else {
			panic!("expected `scrape`");
		};

		assert_eq!(start, Some(42));
		assert!(!resume);
		assert_eq!(limit, 10_000_000);
		assert_eq!(per_file, 1000);
		assert_eq!(page_size, None);
		assert_eq!(delay, 1000);
		assert_eq!(output_dir, PathBuf::from("./matches"));
	}

	#[test]
	fn match_needs_an_id() {
		assert!(Args::try_parse_from(["match_scraper", "match"]).is_err());
		assert!(Args::try_parse_from(["match_scraper", "match", "7000000001"]).is_ok());
	}
}

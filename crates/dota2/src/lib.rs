//! Dota 2 match history through the Steam Web API, plus a scraper that walks the global match
//! stream by sequence number and checkpoints everything to JSON files.

mod error;
pub use error::{Error, Result};

pub mod client;
pub use client::{Api, Dota2, MatchHistoryQuery};

pub mod models;
pub use models::{Hero, LobbyType, Match, MatchDetails, Player, PlayerDetails};

pub mod output;

pub mod scraper;
pub use scraper::{MatchSource, ScrapeOptions, ScrapeSummary, Scraper};

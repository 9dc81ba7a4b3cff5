use {
	crate::{
		models::{APIResponse, Hero, HeroList, Match, MatchDetails, MatchList, Player, PlayerDetails},
		Error, Result,
	},
	log::debug,
	reqwest::StatusCode,
	serde::Serialize,
	serde_json::Value as JsonValue,
};

pub const STEAM_WEB_API: &str = "https://api.steampowered.com";

/// Interface serving match data.
pub const MATCH_INTERFACE: &str = "IDOTA2Match_570";

/// Interface serving static game data like heroes.
pub const ECON_INTERFACE: &str = "IEconDOTA2_570";

/// Query parameters for `GetMatchHistory`. Anything left as `None` is not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchHistoryQuery {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub account_id: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hero_id: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub skill: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_players: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub league_id: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start_at_match_id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub matches_requested: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct SequenceQuery {
	#[serde(skip_serializing_if = "Option::is_none")]
	start_at_match_seq_num: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	matches_requested: Option<u32>,
}

/// Raw access to the Steam Web API.
///
/// Every call to [`Api::get`] is exactly one HTTP request. Nothing is cached or retried.
#[derive(Clone)]
pub struct Api {
	client: reqwest::Client,
	base_url: String,
	api_key: String,
}

impl std::fmt::Debug for Api {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Api")
			.field("base_url", &self.base_url)
			.field("api_key", &"<redacted>")
			.finish()
	}
}

impl Api {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			base_url: String::from(STEAM_WEB_API),
			api_key: api_key.into(),
		}
	}

	/// Point the client somewhere other than the real Steam API.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url
			.into()
			.trim_end_matches('/')
			.to_owned();
		self
	}

	/// `{base}/{interface}/{resource}/V001/`, without the key so it can show up in errors.
	pub fn url(&self, interface: &str, resource: &str) -> String {
		format!("{}/{interface}/{resource}/V001/", self.base_url)
	}

	/// Requests `resource` of `interface` and returns the decoded JSON body.
	///
	/// `params` get appended to the query string next to the API key.
	pub async fn get<P>(&self, interface: &str, resource: &str, params: &P) -> Result<JsonValue>
	where
		P: Serialize + ?Sized,
	{
		let url = self.url(interface, resource);
		debug!("GET {url}");

		let response = self
			.client
			.get(&url)
			.query(&[("key", self.api_key.as_str())])
			.query(params)
			.send()
			.await?;

		let status = response.status();
		if status == StatusCode::UNAUTHORIZED {
			return Err(Error::Unauthorized { url });
		}
		if status.is_client_error() || status.is_server_error() {
			return Err(Error::Http { status: status.as_u16(), url });
		}

		let bytes = response.bytes().await?;
		debug!("Received {} bytes from {url}.", bytes.len());

		Ok(serde_json::from_slice(&bytes)?)
	}

	/// Checks the API key by requesting a single match from the match history.
	///
	/// Note that a rejected key does not produce `Ok(false)`: the `401` surfaces as
	/// [`Error::Unauthorized`]. `Ok(false)` only means the API answered with an empty body.
	pub async fn is_valid(&self) -> Result<bool> {
		let query = MatchHistoryQuery { matches_requested: Some(1), ..Default::default() };
		let body = self
			.get(MATCH_INTERFACE, "GetMatchHistory", &query)
			.await?;

		Ok(body
			.as_object()
			.map_or(false, |object| !object.is_empty()))
	}
}

fn decode_matches(body: JsonValue) -> Result<Vec<Match>> {
	let response = serde_json::from_value::<APIResponse<MatchList>>(body)?;
	response
		.result
		.matches
		.into_iter()
		.map(Match::try_from)
		.collect()
}

/// Dota 2 specific calls on top of [`Api`].
#[derive(Debug, Clone)]
pub struct Dota2 {
	api: Api,
}

impl From<Api> for Dota2 {
	fn from(api: Api) -> Self {
		Self { api }
	}
}

impl Dota2 {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self { api: Api::new(api_key) }
	}

	pub fn api(&self) -> &Api {
		&self.api
	}

	pub async fn is_valid(&self) -> Result<bool> {
		self.api.is_valid().await
	}

	pub async fn find_match(&self, match_id: u64) -> Result<MatchDetails> {
		let body = self
			.api
			.get(MATCH_INTERFACE, "GetMatchDetails", &[("match_id", match_id)])
			.await?;

		let response = serde_json::from_value::<APIResponse<JsonValue>>(body)?;
		MatchDetails::try_from(response.result)
	}

	pub async fn find_match_history(&self, query: &MatchHistoryQuery) -> Result<Vec<Match>> {
		let body = self
			.api
			.get(MATCH_INTERFACE, "GetMatchHistory", query)
			.await?;

		decode_matches(body)
	}

	/// `language` selects the language of `localized_name`, e.g. `"en_us"`.
	pub async fn get_heroes(&self, language: Option<&str>) -> Result<Vec<Hero>> {
		let params = language
			.map(|language| vec![("language", language)])
			.unwrap_or_default();

		let body = self
			.api
			.get(ECON_INTERFACE, "GetHeroes", &params)
			.await?;

		let response = serde_json::from_value::<APIResponse<HeroList>>(body)?;
		response
			.result
			.heroes
			.iter()
			.map(Hero::try_from)
			.collect()
	}

	/// Matches in the order they were recorded, starting at sequence number `start`. If `start`
	/// is `None`, the API picks where to start.
	pub async fn get_match_history_by_sequence(
		&self,
		start: Option<u64>,
		matches_requested: Option<u32>,
	) -> Result<Vec<Match>> {
		let query = SequenceQuery { start_at_match_seq_num: start, matches_requested };
		let body = self
			.api
			.get(MATCH_INTERFACE, "GetMatchHistoryBySequenceNum", &query)
			.await?;

		decode_matches(body)
	}

	/// Fetches `match_id` and returns the detailed entry for `player`.
	///
	/// Anonymous players are rejected before any request is made.
	pub async fn find_player_details(&self, player: &Player, match_id: u64) -> Result<PlayerDetails> {
		if player.is_anonymous() {
			return Err(Error::AnonymousPlayer);
		}

		let details = self.find_match(match_id).await?;
		details
			.players
			.into_iter()
			.find(|details| {
				details.player.player_slot == player.player_slot
					&& details.player.account_id == player.account_id
			})
			.ok_or(Error::PlayerNotFound { player_slot: player.player_slot, match_id })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn url_template() {
		let api = Api::new("secret").with_base_url("http://localhost:1234/");
		assert_eq!(
			api.url(MATCH_INTERFACE, "GetMatchHistory"),
			"http://localhost:1234/IDOTA2Match_570/GetMatchHistory/V001/"
		);
	}

	#[test]
	fn debug_hides_the_key() {
		let api = Api::new("secret");
		assert!(!format!("{api:?}").contains("secret"));
	}

	#[test]
	fn empty_query_values_are_skipped() {
		let query = MatchHistoryQuery { hero_id: Some(3), ..Default::default() };
		assert_eq!(serde_json::to_value(&query).unwrap(), serde_json::json!({ "hero_id": 3 }));
	}
}

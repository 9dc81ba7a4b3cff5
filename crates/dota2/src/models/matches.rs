use {
	super::{lookup_array, lookup_bool, lookup_i64, lookup_u32, lookup_u64, LobbyType, Player, PlayerDetails},
	crate::{Error, Result},
	chrono::{DateTime, TimeZone, Utc},
	serde::{Serialize, Serializer},
	serde_json::Value as JsonValue,
};

fn start_time(raw: &JsonValue) -> Result<DateTime<Utc>> {
	let seconds = lookup_i64(raw, "start_time")?;
	Utc.timestamp_opt(seconds, 0)
		.single()
		.ok_or(Error::InvalidAttribute { attribute: "start_time" })
}

/// A match as returned by `GetMatchHistory` and `GetMatchHistoryBySequenceNum`.
///
/// The payload the match was decoded from is kept around untouched so it can be written back
/// out as-is; serializing a `Match` yields exactly that payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
	pub id: u64,
	pub sequence_number: u64,
	pub start_time: DateTime<Utc>,
	pub lobby_type: LobbyType,
	pub players: Vec<Player>,
	raw: JsonValue,
}

impl Match {
	pub fn raw(&self) -> &JsonValue {
		&self.raw
	}

	pub fn into_raw(self) -> JsonValue {
		self.raw
	}
}

impl TryFrom<JsonValue> for Match {
	type Error = Error;

	fn try_from(raw: JsonValue) -> Result<Self> {
		let players = lookup_array(&raw, "players")?
			.iter()
			.map(Player::try_from)
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			id: lookup_u64(&raw, "match_id")?,
			sequence_number: lookup_u64(&raw, "match_seq_num")?,
			start_time: start_time(&raw)?,
			lobby_type: LobbyType::from(lookup_i64(&raw, "lobby_type")?),
			players,
			raw,
		})
	}
}

impl Serialize for Match {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		self.raw.serialize(serializer)
	}
}

/// A single match from `GetMatchDetails`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDetails {
	pub id: u64,
	pub sequence_number: u64,
	pub start_time: DateTime<Utc>,
	pub lobby_type: LobbyType,
	pub radiant_win: bool,
	/// In seconds.
	pub duration: u32,
	/// Seconds after the game started where first blood occurred.
	pub first_blood_time: u32,
	pub players: Vec<PlayerDetails>,
	raw: JsonValue,
}

impl MatchDetails {
	pub fn raw(&self) -> &JsonValue {
		&self.raw
	}

	pub fn player(&self, account_id: u32) -> Option<&PlayerDetails> {
		self.players
			.iter()
			.find(|details| details.player.account_id == Some(account_id))
	}
}

impl TryFrom<JsonValue> for MatchDetails {
	type Error = Error;

	fn try_from(raw: JsonValue) -> Result<Self> {
		let players = lookup_array(&raw, "players")?
			.iter()
			.map(PlayerDetails::try_from)
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			id: lookup_u64(&raw, "match_id")?,
			sequence_number: lookup_u64(&raw, "match_seq_num")?,
			start_time: start_time(&raw)?,
			lobby_type: LobbyType::from(lookup_i64(&raw, "lobby_type")?),
			radiant_win: lookup_bool(&raw, "radiant_win")?,
			duration: lookup_u32(&raw, "duration")?,
			first_blood_time: lookup_u32(&raw, "first_blood_time")?,
			players,
			raw,
		})
	}
}

impl Serialize for MatchDetails {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		self.raw.serialize(serializer)
	}
}

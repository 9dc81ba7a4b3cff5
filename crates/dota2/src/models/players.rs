use {
	super::{lookup_optional_u32, lookup_u32, Hero},
	crate::{Error, Result},
	serde::Serialize,
	serde_json::Value as JsonValue,
};

/// Account ID the API reports for players who hide their profile.
pub const ANONYMOUS_ACCOUNT_ID: u32 = 4294967295;

/// A player entry as it appears in match history responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
	/// Bots don't have an account.
	pub account_id: Option<u32>,
	/// `0` if the player never picked a hero.
	pub hero_id: u32,
	pub player_slot: u8,
}

impl Player {
	/// Radiant slots are `0..=4`, Dire slots are `128..=132`.
	pub fn is_radiant(&self) -> bool {
		self.player_slot & 0x80 == 0
	}

	/// Position inside the team, `0..=4`.
	pub fn position(&self) -> u8 {
		self.player_slot & 0x07
	}

	pub fn is_anonymous(&self) -> bool {
		self.account_id == Some(ANONYMOUS_ACCOUNT_ID)
	}

	pub fn hero<'h>(&self, heroes: &'h [Hero]) -> Option<&'h Hero> {
		heroes.iter().find(|hero| hero.id == self.hero_id)
	}
}

impl TryFrom<&JsonValue> for Player {
	type Error = Error;

	fn try_from(raw: &JsonValue) -> Result<Self> {
		let player_slot = u8::try_from(lookup_u32(raw, "player_slot")?)
			.map_err(|_| Error::InvalidAttribute { attribute: "player_slot" })?;

		Ok(Self {
			account_id: lookup_optional_u32(raw, "account_id")?,
			hero_id: lookup_u32(raw, "hero_id")?,
			player_slot,
		})
	}
}

/// A player entry from `GetMatchDetails`. Shares its identity with [`Player`] through
/// `account_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerDetails {
	#[serde(flatten)]
	pub player: Player,
	pub level: u32,
}

impl TryFrom<&JsonValue> for PlayerDetails {
	type Error = Error;

	fn try_from(raw: &JsonValue) -> Result<Self> {
		Ok(Self { player: Player::try_from(raw)?, level: lookup_u32(raw, "level")? })
	}
}

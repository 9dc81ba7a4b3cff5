//! Typed views over the Steam API's JSON payloads.
//!
//! Everything is decoded eagerly. If a payload lacks a required key, construction fails with
//! [`Error::AttributeNotAvailable`](crate::Error::AttributeNotAvailable) instead of blowing up
//! later on access.

use {
	crate::{Error, Result},
	serde::Deserialize,
	serde_json::Value as JsonValue,
};

mod heroes;
pub use heroes::Hero;

mod lobby;
pub use lobby::LobbyType;

mod matches;
pub use matches::{Match, MatchDetails};

mod players;
pub use players::{Player, PlayerDetails, ANONYMOUS_ACCOUNT_ID};

/// Every Steam API response wraps its payload in `{ "result": ... }`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct APIResponse<T> {
	pub result: T,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MatchList {
	pub matches: Vec<JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HeroList {
	pub heroes: Vec<JsonValue>,
}

pub(crate) fn lookup<'a>(raw: &'a JsonValue, attribute: &'static str) -> Result<&'a JsonValue> {
	raw.get(attribute)
		.filter(|value| !value.is_null())
		.ok_or(Error::AttributeNotAvailable { attribute })
}

pub(crate) fn lookup_u64(raw: &JsonValue, attribute: &'static str) -> Result<u64> {
	lookup(raw, attribute)?
		.as_u64()
		.ok_or(Error::InvalidAttribute { attribute })
}

pub(crate) fn lookup_i64(raw: &JsonValue, attribute: &'static str) -> Result<i64> {
	lookup(raw, attribute)?
		.as_i64()
		.ok_or(Error::InvalidAttribute { attribute })
}

pub(crate) fn lookup_u32(raw: &JsonValue, attribute: &'static str) -> Result<u32> {
	u32::try_from(lookup_u64(raw, attribute)?).map_err(|_| Error::InvalidAttribute { attribute })
}

pub(crate) fn lookup_optional_u32(raw: &JsonValue, attribute: &'static str) -> Result<Option<u32>> {
	match lookup_u32(raw, attribute) {
		Ok(value) => Ok(Some(value)),
		Err(Error::AttributeNotAvailable { .. }) => Ok(None),
		Err(why) => Err(why),
	}
}

/// The API isn't consistent about booleans; some endpoints send `0` / `1`.
pub(crate) fn lookup_bool(raw: &JsonValue, attribute: &'static str) -> Result<bool> {
	match lookup(raw, attribute)? {
		JsonValue::Bool(value) => Ok(*value),
		JsonValue::Number(num) if num.as_u64() == Some(1) => Ok(true),
		JsonValue::Number(num) if num.as_u64() == Some(0) => Ok(false),
		_ => Err(Error::InvalidAttribute { attribute }),
	}
}

pub(crate) fn lookup_array<'a>(
	raw: &'a JsonValue,
	attribute: &'static str,
) -> Result<&'a Vec<JsonValue>> {
	lookup(raw, attribute)?
		.as_array()
		.ok_or(Error::InvalidAttribute { attribute })
}

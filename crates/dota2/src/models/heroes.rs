use {
	super::{lookup, lookup_u32},
	crate::{Error, Result},
	serde::Serialize,
	serde_json::Value as JsonValue,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
	pub id: u32,
	/// Internal name, e.g. `npc_dota_hero_antimage`.
	pub name: String,
	/// Only present if the request asked for a language.
	pub localized_name: Option<String>,
}

impl Hero {
	/// `localized_name` if we have one, otherwise something readable derived from `name`.
	pub fn display_name(&self) -> String {
		if let Some(localized_name) = &self.localized_name {
			return localized_name.clone();
		}

		self.name
			.trim_start_matches("npc_dota_hero_")
			.replace('_', " ")
	}
}

impl TryFrom<&JsonValue> for Hero {
	type Error = Error;

	fn try_from(raw: &JsonValue) -> Result<Self> {
		let name = lookup(raw, "name")?
			.as_str()
			.ok_or(Error::InvalidAttribute { attribute: "name" })?
			.to_owned();

		let localized_name = raw
			.get("localized_name")
			.and_then(JsonValue::as_str)
			.map(String::from);

		Ok(Self { id: lookup_u32(raw, "id")?, name, localized_name })
	}
}

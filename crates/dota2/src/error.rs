use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("Failed to retrieve data: {status}. URL: {url}")]
	Http { status: u16, url: String },

	/// The Steam API answered with `401`. Usually means the API key is wrong.
	#[error("Unauthorized. Check your API key. URL: {url}")]
	Unauthorized { url: String },

	#[error("Failed to parse JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Attribute not available: {attribute}")]
	AttributeNotAvailable { attribute: &'static str },

	#[error("Attribute `{attribute}` has an unexpected value.")]
	InvalidAttribute { attribute: &'static str },

	/// Anonymous players can't be looked up, the API hides their account.
	#[error("Cannot look up details for an anonymous player.")]
	AnonymousPlayer,

	#[error("No player in slot `{player_slot}` of match `{match_id}`.")]
	PlayerNotFound { player_slot: u8, match_id: u64 },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// HTTP status code attached to this error, if there is one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } => Some(*status),
			Self::Unauthorized { .. } => Some(401),
			Self::Request(why) => why.status().map(|status| status.as_u16()),
			_ => None,
		}
	}
}

use {
	serde::{Deserialize, Serialize},
	std::fmt::Display,
};

/// Matchmaking context of a match, as reported by the `lobby_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum LobbyType {
	Invalid,
	PublicMatchmaking,
	Practice,
	Tournament,
	Tutorial,
	CoopWithBots,
	TeamMatch,
	SoloQueue,
	Ranked,
	SoloMid,
	Unknown(i64),
}

impl From<i64> for LobbyType {
	fn from(value: i64) -> Self {
		match value {
			-1 => Self::Invalid,
			0 => Self::PublicMatchmaking,
			1 => Self::Practice,
			2 => Self::Tournament,
			3 => Self::Tutorial,
			4 => Self::CoopWithBots,
			5 => Self::TeamMatch,
			6 => Self::SoloQueue,
			7 => Self::Ranked,
			8 => Self::SoloMid,
			code => Self::Unknown(code),
		}
	}
}

impl From<LobbyType> for i64 {
	fn from(value: LobbyType) -> Self {
		match value {
			LobbyType::Invalid => -1,
			LobbyType::PublicMatchmaking => 0,
			LobbyType::Practice => 1,
			LobbyType::Tournament => 2,
			LobbyType::Tutorial => 3,
			LobbyType::CoopWithBots => 4,
			LobbyType::TeamMatch => 5,
			LobbyType::SoloQueue => 6,
			LobbyType::Ranked => 7,
			LobbyType::SoloMid => 8,
			LobbyType::Unknown(code) => code,
		}
	}
}

impl Display for LobbyType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Invalid => f.write_str("Invalid"),
			Self::PublicMatchmaking => f.write_str("Public matchmaking"),
			Self::Practice => f.write_str("Practice"),
			Self::Tournament => f.write_str("Tournament"),
			Self::Tutorial => f.write_str("Tutorial"),
			Self::CoopWithBots => f.write_str("Co-op with bots"),
			Self::TeamMatch => f.write_str("Team match"),
			Self::SoloQueue => f.write_str("Solo queue"),
			Self::Ranked => f.write_str("Ranked"),
			Self::SoloMid => f.write_str("1v1 Mid"),
			Self::Unknown(code) => write!(f, "Unknown ({code})"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes() {
		assert_eq!(LobbyType::from(7), LobbyType::Ranked);
		assert_eq!(LobbyType::from(-1), LobbyType::Invalid);
		assert_eq!(LobbyType::from(42), LobbyType::Unknown(42));
		assert_eq!(i64::from(LobbyType::SoloMid), 8);
		assert_eq!(LobbyType::CoopWithBots.to_string(), "Co-op with bots");
	}
}

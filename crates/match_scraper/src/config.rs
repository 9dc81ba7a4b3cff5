use {
	color_eyre::{eyre::eyre, Result as Eyre},
	log::debug,
	serde::Deserialize,
	std::{io::ErrorKind::NotFound, path::Path},
};

/// Environment variable that takes precedence over `api_key` in the config file.
pub(crate) const API_KEY_VAR: &str = "DOTA_API_KEY";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
	pub api_key: Option<String>,
}

impl Config {
	/// Reads `path`. A missing file is fine, the key might come from the environment.
	pub fn load(path: &Path) -> Eyre<Self> {
		let config_file = match std::fs::read_to_string(path) {
			Ok(contents) => contents,
			Err(why) if why.kind() == NotFound => {
				debug!("No config file at `{}`.", path.display());
				return Ok(Self::default());
			}
			Err(why) => return Err(eyre!("Failed to read `{}`: {why}", path.display())),
		};

		Ok(toml::from_str(&config_file)?)
	}

	pub fn api_key(&self) -> Eyre<String> {
		Self::pick_api_key(std::env::var(API_KEY_VAR).ok(), self.api_key.as_deref())
	}

	fn pick_api_key(from_env: Option<String>, from_file: Option<&str>) -> Eyre<String> {
		from_env
			.filter(|key| !key.trim().is_empty())
			.or_else(|| from_file.map(String::from))
			.filter(|key| !key.trim().is_empty())
			.ok_or_else(|| {
				eyre!("No API key found. Set `{API_KEY_VAR}` or `api_key` in your config file.")
			})
	}
}

use std::path::PathBuf;
use std::result::Result as StdResult;

use anyhow::Context as _;
use logindetail_store::Deployment;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::detail::DisplayOptions;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub push: PushConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub reveal_password: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PushConfig {
    #[serde(default)]
    pub deployment: Deployment,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: Self::default_date_format(),
            reveal_password: false,
        }
    }
}

impl DisplayConfig {
    fn default_date_format() -> String {
        DisplayOptions::DEFAULT_DATE_FORMAT.to_owned()
    }

    pub fn options(&self) -> DisplayOptions {
        DisplayOptions::new(&self.date_format, self.reveal_password)
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "logindetail.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        String::from_utf8_lossy(file.data.as_ref()).into_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub async fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = tokio::fs::read_to_string(&filepath)
            .await
            .with_context(|| format!("Cannot read {:?}", filepath))?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }
}

use serde::Deserialize;
use std::path::PathBuf;

use anyhow::Context as _;
use logindetail_core::Config;

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "logindetail";

/// Config file + environment + command-line flags, in increasing priority.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    pub core: Config,
    pub store_path: PathBuf,
}

/// Environment overrides, read from `LOGINDETAIL_*` variables.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    store: Option<PathBuf>,
}

impl GlobalConfig {
    pub const STORE_FILENAME: &str = "logins.json";

    pub fn filepath() -> Option<PathBuf> {
        let dir = dirs::config_dir()?;
        Some(dir.join(APP_NAME).join(Config::FILENAME))
    }

    fn default_store_path() -> PathBuf {
        match dirs::data_dir() {
            Some(dir) => dir.join(APP_NAME).join(Self::STORE_FILENAME),
            None => PathBuf::from(Self::STORE_FILENAME),
        }
    }

    pub fn from_core(core: Config) -> Self {
        let store_path = core
            .store
            .path
            .clone()
            .map(util::expand_tilde)
            .unwrap_or_else(Self::default_store_path);
        Self { core, store_path }
    }

    pub async fn from_file_or_default() -> anyhow::Result<Self> {
        let core = match Self::filepath().filter(|path| path.is_file()) {
            Some(path) => {
                let shown = util::replace_homedir_to_tilde(&path);
                Config::from_toml_file(path)
                    .await
                    .with_context(|| format!("Invalid config '{:?}'", shown))?
            }
            None => Config::default(),
        };
        Ok(Self::from_core(core))
    }

    pub fn with_env(mut self) -> Self {
        match envy::prefixed("LOGINDETAIL_").from_env::<EnvOverrides>() {
            Ok(EnvOverrides { store: Some(path) }) => self.store_path = util::expand_tilde(path),
            Ok(_) => (),
            Err(e) => log::warn!("Ignoring LOGINDETAIL_* environment: {}", e),
        }
        self
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            store,
            verbose: _,
        } = args;

        if let Some(path) = store {
            self.store_path = path.clone();
        }
        self
    }

    pub async fn from_file_and_args(args: &GlobalArgs) -> anyhow::Result<Self> {
        let cfg = Self::from_file_or_default().await?.with_env().with_args(args);
        log::debug!(
            "Using store {:?}",
            util::replace_homedir_to_tilde(&cfg.store_path)
        );
        Ok(cfg)
    }
}

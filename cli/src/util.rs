use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use colored::Colorize as _;
use logindetail_core::style::ColorTheme as _;

pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "[{}] {}",
                level.to_string().color(level.color()),
                record.args()
            )
        })
        .init();
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// Expands a leading `~` into the user's home dir.
pub fn expand_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Ok(rest) = path.strip_prefix("~").map(Path::to_path_buf) else {
        return path
    };
    match ::dirs::home_dir() {
        Some(home_dir) => home_dir.join(rest),
        None => path,
    }
}

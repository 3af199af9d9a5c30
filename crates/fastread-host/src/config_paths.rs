//! Config locations for fastread.
//!
//! Everything lives under the platform config directory, e.g.
//! `~/.config/fastread/` on Linux.

use std::path::PathBuf;

const APP_DIR: &str = "fastread";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// `~/.config/fastread/history.json`
pub fn history_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("history.json"))
}

//! Command-line flags for the terminal reader.

use std::path::PathBuf;

use clap::Parser;
use fastread_core::playback::DEFAULT_WPM;

/// Terminal RSVP speed reader
#[derive(Parser, Debug)]
#[command(name = "fastread", version, about = "Terminal RSVP speed reader")]
pub(super) struct CliArgs {
    /// Text file to load at startup
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Initial reading rate in words per minute
    #[arg(long, value_name = "N", default_value_t = DEFAULT_WPM)]
    pub wpm: u16,

    /// Where saved sessions are kept (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Keep history in memory for this run only
    #[arg(long, conflicts_with = "history_file")]
    pub ephemeral: bool,
}

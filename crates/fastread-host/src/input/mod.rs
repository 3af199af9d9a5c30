mod command;
mod terminal;

pub use command::{HELP, ParseError, parse_command};
pub use terminal::{INPUT_QUEUE_DEPTH, InputChannel, TerminalInput, spawn_stdin_reader};

mod terminal;

pub use terminal::{FULL_TEXT_WIDTH, TerminalRenderer};

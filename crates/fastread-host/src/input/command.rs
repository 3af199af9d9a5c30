//! Line commands typed at the terminal, mapped onto reader controls.

use fastread_core::input::InputEvent;

pub const HELP: &str = "\
commands:
  <enter> | p         play / pause
  read <text>         load new text (10-5000 chars)
  g <n>               jump to word n
  f | b               skip forward / back
  + | -               faster / slower
  wpm <n>             set rate
  r                   reset to first word
  s                   save session to history
  t                   toggle full text
  open <id>           load a saved session
  rm <id>             remove a saved session
  clear               clear history
  q                   quit";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    UnknownCommand,
    MissingArgument(&'static str),
    InvalidNumber,
}

pub fn parse_command(line: &str) -> Result<InputEvent, ParseError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "" | "p" | "play" | "pause" => InputEvent::TogglePlay,
        "read" => InputEvent::Submit(required(rest, "text")?.to_string()),
        "g" | "seek" => {
            let word_number: isize = number(required(rest, "word number")?)?;
            InputEvent::Seek(word_number.saturating_sub(1))
        }
        "f" | "forward" => InputEvent::SkipForward,
        "b" | "back" => InputEvent::SkipBack,
        "+" | "faster" => InputEvent::RateUp,
        "-" | "slower" => InputEvent::RateDown,
        "wpm" => InputEvent::SetRate(number(required(rest, "words per minute")?)?),
        "r" | "reset" => InputEvent::Reset,
        "s" | "save" => InputEvent::Save,
        "t" | "text" => InputEvent::ToggleFullText,
        "open" => InputEvent::SelectHistory(required(rest, "history id")?.to_string()),
        "rm" | "remove" => InputEvent::RemoveHistory(required(rest, "history id")?.to_string()),
        "clear" => InputEvent::ClearHistory,
        "q" | "quit" | "exit" => InputEvent::Quit,
        _ => return Err(ParseError::UnknownCommand),
    };
    Ok(event)
}

fn required<'a>(rest: &'a str, name: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(name))
    } else {
        Ok(rest)
    }
}

fn number<T: core::str::FromStr>(raw: &str) -> Result<T, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidNumber)
}

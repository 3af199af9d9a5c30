//! Stdin-backed input provider.
//!
//! A reader thread parses lines and pushes events into a bounded channel;
//! the executor drains it through [`InputProvider::poll_event`].

use std::{
    io::{self, BufRead},
    thread,
};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use fastread_core::input::{InputEvent, InputProvider};
use log::{debug, warn};

use super::command::{HELP, parse_command};

pub const INPUT_QUEUE_DEPTH: usize = 16;

pub type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>;

pub struct TerminalInput {
    events: &'static InputChannel,
}

impl TerminalInput {
    pub const fn new(events: &'static InputChannel) -> Self {
        Self { events }
    }

    /// Resolves once an event is waiting.
    pub async fn ready(&self) {
        self.events.ready_to_receive().await
    }
}

impl InputProvider for TerminalInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.events.try_receive().ok())
    }
}

/// Forward parsed stdin lines into `events`. End of input becomes `Quit`.
pub fn spawn_stdin_reader(events: &'static InputChannel) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            forward_lines(io::stdin().lock(), events);
        })
}

fn forward_lines(reader: impl BufRead, events: &'static InputChannel) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("input: stdin read failed: {}", err);
                break;
            }
        };

        if matches!(line.trim(), "?" | "h" | "help") {
            eprintln!("{HELP}");
            continue;
        }

        match parse_command(&line) {
            Ok(event) => {
                debug!("input: {:?}", event);
                embassy_futures::block_on(events.send(event));
            }
            Err(err) => {
                warn!("input: {:?} in {:?}", err, line.trim());
                eprintln!("{HELP}");
            }
        }
    }

    embassy_futures::block_on(events.send(InputEvent::Quit));
}

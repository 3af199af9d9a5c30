use std::collections::VecDeque;

use super::{InputEvent, InputProvider};

/// Queue-backed input source for headless runs and tests.
#[derive(Default, Debug, Clone)]
pub struct MockInput {
    queue: VecDeque<InputEvent>,
}

impl MockInput {
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn is_drained(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.queue.pop_front())
    }
}

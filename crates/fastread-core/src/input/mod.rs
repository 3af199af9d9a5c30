//! Input abstraction layer.

pub mod mock;

/// Logical reader controls. Each maps to one engine or history operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Submit(String),
    TogglePlay,
    Seek(isize),
    SkipForward,
    SkipBack,
    SetRate(u16),
    RateUp,
    RateDown,
    Reset,
    Save,
    ToggleFullText,
    SelectHistory(String),
    RemoveHistory(String),
    ClearHistory,
    Quit,
}

/// Polled input provider.
pub trait InputProvider {
    type Error: core::fmt::Debug;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}

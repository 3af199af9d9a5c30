//! Platform-free RSVP reading core: tokenizer, playback scheduling, reading
//! history and the reader state machine driven by a host runtime.

pub mod app;
pub mod clock;
pub mod content;
pub mod history;
pub mod input;
pub mod playback;
pub mod render;
pub mod session;
pub mod storage;
pub mod text_policy;

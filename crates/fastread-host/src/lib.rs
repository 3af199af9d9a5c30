//! Desktop adapters for `fastread-core`: file-backed history storage,
//! terminal input and output, and the wall clock.

pub mod clock;
pub mod config_paths;
pub mod input;
pub mod render;
pub mod storage;

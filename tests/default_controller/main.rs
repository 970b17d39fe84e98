//! Default controller integration tests
//!
//! The default controller is process-wide, so every test here takes
//! `common::serial()` before touching it and installs its own sink.

mod common;

mod global_options;
mod global_wrap;

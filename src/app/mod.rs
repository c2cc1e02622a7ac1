// Logtail - app/mod.rs
//
// Application layer: line sources, one-shot and follow reading, run
// configuration and dispatch.
// Dependencies: core layer, ui::render for output.
// Must NOT depend on: CLI parsing or process exit handling.

pub mod config;
pub mod follow;
pub mod scan;
pub mod session;
pub mod source;

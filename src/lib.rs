// Logtail - lib.rs
//
// Library entry point, exposing the viewer's modules to the binary and to
// integration tests.

pub mod app;
pub mod core;
pub mod ui;
pub mod util;

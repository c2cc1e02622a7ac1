// Logtail - ui/mod.rs
//
// UI layer: terminal presentation only.
// Dependencies: core (read-only models), owo-colors.
// Must NOT depend on: app, direct I/O.

pub mod highlight;
pub mod render;
pub mod theme;

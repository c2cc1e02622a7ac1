// Logtail - core/mod.rs
//
// Core logic layer: classification, filtering, data model.
// Dependencies: standard library plus chrono/regex.
// Must NOT depend on: ui, app, or perform any I/O.

pub mod classifier;
pub mod filter;
pub mod model;

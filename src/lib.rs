// Library entry point for streaks-server
// Exposes modules for testing

pub mod aggregates;
pub mod api;
pub mod charts;
pub mod constants;
pub mod models;
pub mod prefs;
pub mod readiness;
pub mod store;
pub mod timeutil;
pub mod views;

//! Interactive terminal UI: app state, key controller and Ratatui views.

pub mod app;
pub mod controller;
pub mod ui;

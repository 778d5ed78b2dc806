//! cogbot - a plugin-based command framework for chat bots

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;

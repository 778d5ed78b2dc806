//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Key/value stores (memory, JSON file)
//! - Database: SQLite store
//! - Adapters: Platform integrations

pub mod adapters;
pub mod config;
pub mod database;
pub mod storage;

//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Exception: the bot exception taxonomy and its combinators
//! - Errors: process and collaborator errors
//! - Messaging: parsing, dispatch, execution context, reporting
//! - Services: per-message orchestration

pub mod errors;
pub mod exception;
pub mod messaging;
pub mod services;

//! Domain layer - Core business objects
//!
//! This layer contains:
//! - Entities: User, Message, Command, HelpPage, Plugin
//! - Traits: Abstractions for the transport and storage collaborators

pub mod entities;
pub mod traits;

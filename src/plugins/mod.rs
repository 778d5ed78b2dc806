//! Plugin system for cogbot
//!
//! Each plugin module exposes one `Plugin` value. The composer merges them
//! into the dispatch table at startup.

pub mod composer;
pub mod echo;
pub mod help;
pub mod notes;
pub mod pick;

pub use composer::{compose, Composition, LintWarning, PluginComposer};

use crate::domain::entities::Plugin;

/// Every bundled plugin, in registration order
pub fn builtin() -> Vec<Plugin> {
    vec![echo::plugin(), pick::plugin(), notes::plugin(), help::plugin()]
}

/// Bundled plugins filtered by name, keeping registration order.
///
/// `None` selects all of them.
pub fn selected(enabled: Option<&[String]>) -> Vec<Plugin> {
    builtin()
        .into_iter()
        .filter(|p| enabled.map_or(true, |names| names.iter().any(|n| n == p.name())))
        .collect()
}

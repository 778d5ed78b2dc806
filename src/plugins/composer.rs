//! Plugin composer - merges plugins into one dispatch table

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{info, warn};

use crate::application::errors::CompositionError;
use crate::application::messaging::{DispatchTable, HelpIndex, RegisteredCommand, Shadowed};
use crate::domain::entities::{Command, Plugin};

/// Non-fatal findings about the composed plugins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// Two siblings answer to the same name; only the first is reachable by it
    OverlappingName {
        plugin: String,
        parent: Option<String>,
        name: String,
    },
    /// A later plugin's help page hides an earlier one
    ShadowedHelpPage(Shadowed),
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::OverlappingName {
                plugin,
                parent: Some(parent),
                name,
            } => write!(
                f,
                "plugin '{}': subcommands of '{}' overlap on '{}', the first declared wins",
                plugin, parent, name
            ),
            LintWarning::OverlappingName {
                plugin,
                parent: None,
                name,
            } => write!(
                f,
                "plugin '{}': commands overlap on '{}', the first declared wins",
                plugin, name
            ),
            LintWarning::ShadowedHelpPage(s) => write!(
                f,
                "help page '{}' from '{}' is shadowed by '{}'",
                s.page, s.hidden, s.visible
            ),
        }
    }
}

/// Result of a successful composition
#[derive(Debug)]
pub struct Composition {
    pub table: DispatchTable,
    pub warnings: Vec<LintWarning>,
}

/// Collects plugins in order, then merges them once
#[derive(Debug, Default)]
pub struct PluginComposer {
    plugins: Vec<Plugin>,
    names: HashSet<String>,
}

impl PluginComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Plugin) -> Result<(), CompositionError> {
        let name = plugin.name().to_string();
        if !self.names.insert(name.clone()) {
            return Err(CompositionError::DuplicatePlugin(name));
        }
        info!("Registering plugin: {}", name);
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Merge every registered plugin.
    ///
    /// A command name or alias claimed by two plugins is fatal. Overlaps
    /// inside one plugin and shadowed help pages are only reported.
    pub fn compose(self) -> Result<Composition, CompositionError> {
        let mut commands: Vec<RegisteredCommand> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut plugin_names = Vec::with_capacity(self.plugins.len());
        let mut help = HelpIndex::new();
        let mut warnings = Vec::new();

        for plugin in self.plugins {
            let (plugin_name, plugin_commands, help_pages) = plugin.into_parts();
            validate_names(&plugin_name, &plugin_commands)?;
            lint_siblings(&plugin_name, None, &plugin_commands, &mut warnings);

            for command in plugin_commands {
                let position = commands.len();
                let mut claimed = false;
                for name in command.names() {
                    let key = name.to_ascii_lowercase();
                    match index.get(&key) {
                        Some(&existing) if commands[existing].plugin != plugin_name => {
                            return Err(CompositionError::DuplicateCommand {
                                name: name.to_string(),
                                first: commands[existing].plugin.clone(),
                                second: plugin_name,
                            });
                        }
                        // same plugin: already linted, first declared keeps it
                        Some(_) => {}
                        None => {
                            index.insert(key, position);
                            claimed = true;
                        }
                    }
                }
                if claimed {
                    commands.push(RegisteredCommand {
                        plugin: plugin_name.clone(),
                        command,
                    });
                }
            }

            for shadowed in help.insert(plugin_name.clone(), help_pages) {
                warnings.push(LintWarning::ShadowedHelpPage(shadowed));
            }
            plugin_names.push(plugin_name);
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        info!(
            "Composed {} commands from {} plugins",
            commands.len(),
            plugin_names.len()
        );

        Ok(Composition {
            table: DispatchTable::new(commands, index, plugin_names, help),
            warnings,
        })
    }
}

/// Register and merge `plugins` in order
pub fn compose(plugins: impl IntoIterator<Item = Plugin>) -> Result<Composition, CompositionError> {
    let mut composer = PluginComposer::new();
    for plugin in plugins {
        composer.register(plugin)?;
    }
    composer.compose()
}

/// Names must be a single non-empty token to be reachable at all
fn validate_names(plugin: &str, commands: &[Command]) -> Result<(), CompositionError> {
    for command in commands {
        for name in command.names() {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(CompositionError::InvalidName {
                    plugin: plugin.to_string(),
                    name: name.to_string(),
                });
            }
        }
        validate_names(plugin, &command.subcommands)?;
    }
    Ok(())
}

fn lint_siblings(
    plugin: &str,
    parent: Option<&str>,
    siblings: &[Command],
    warnings: &mut Vec<LintWarning>,
) {
    let mut seen = HashSet::new();
    for command in siblings {
        for name in command.names() {
            if !seen.insert(name.to_ascii_lowercase()) {
                warnings.push(LintWarning::OverlappingName {
                    plugin: plugin.to_string(),
                    parent: parent.map(String::from),
                    name: name.to_string(),
                });
            }
        }
        lint_siblings(plugin, Some(&command.name), &command.subcommands, warnings);
    }
}

//! Dispatch table - the merged, read-only command namespace

use std::collections::HashMap;

use crate::domain::entities::Command;

use super::help_index::HelpIndex;
use super::parser::split_token;

/// A top-level command and the plugin that declared it
#[derive(Debug)]
pub struct RegisteredCommand {
    pub plugin: String,
    pub command: Command,
}

/// A command located for some input text
#[derive(Debug)]
pub struct Resolution<'a> {
    pub plugin: &'a str,
    /// Names from the top-level command down to `command`
    pub path: Vec<&'a str>,
    pub command: &'a Command,
    /// Raw text left for the command's parser
    pub rest: &'a str,
}

impl Resolution<'_> {
    pub fn path_string(&self) -> String {
        self.path.join(" ")
    }
}

/// Built once by plugin composition, never mutated afterwards
#[derive(Debug, Default)]
pub struct DispatchTable {
    commands: Vec<RegisteredCommand>,
    index: HashMap<String, usize>,
    plugins: Vec<String>,
    help: HelpIndex,
}

impl DispatchTable {
    pub(crate) fn new(
        commands: Vec<RegisteredCommand>,
        index: HashMap<String, usize>,
        plugins: Vec<String>,
        help: HelpIndex,
    ) -> Self {
        Self {
            commands,
            index,
            plugins,
            help,
        }
    }

    /// Look up a top-level command by name or alias
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.index
            .get(&name.to_ascii_lowercase())
            .and_then(|&i| self.commands.get(i))
    }

    /// Find the command addressed by `text`, descending into subcommands.
    ///
    /// Siblings are tried in declaration order and the first match wins.
    pub fn resolve<'a>(&'a self, text: &'a str) -> Option<Resolution<'a>> {
        let (head, mut rest) = split_token(text)?;
        let entry = self.get(head)?;
        let mut command = &entry.command;
        let mut path = vec![command.name.as_str()];

        while let Some((token, after)) = split_token(rest) {
            match command.find_subcommand(token) {
                Some(sub) => {
                    command = sub;
                    path.push(sub.name.as_str());
                    rest = after;
                }
                None => break,
            }
        }

        Some(Resolution {
            plugin: &entry.plugin,
            path,
            command,
            rest,
        })
    }

    /// Top-level commands in registration order
    pub fn commands(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.iter()
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn help(&self) -> &HelpIndex {
        &self.help
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

use super::{Command, HelpPage};

/// A bundle of commands and help pages merged into the bot at startup
#[derive(Debug)]
pub struct Plugin {
    name: String,
    commands: Vec<Command>,
    help_pages: Vec<HelpPage>,
}

impl Plugin {
    pub fn builder(name: impl Into<String>) -> PluginBuilder {
        PluginBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn help_pages(&self) -> &[HelpPage] {
        &self.help_pages
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Command>, Vec<HelpPage>) {
        (self.name, self.commands, self.help_pages)
    }
}

/// Builds a [`Plugin`]; every resource list starts empty
#[derive(Debug)]
pub struct PluginBuilder {
    name: String,
    commands: Vec<Command>,
    help_pages: Vec<HelpPage>,
}

impl PluginBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            help_pages: Vec::new(),
        }
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    pub fn help(mut self, page: HelpPage) -> Self {
        self.help_pages.push(page);
        self
    }

    pub fn help_pages(mut self, pages: impl IntoIterator<Item = HelpPage>) -> Self {
        self.help_pages.extend(pages);
        self
    }

    pub fn build(self) -> Plugin {
        Plugin {
            name: self.name,
            commands: self.commands,
            help_pages: self.help_pages,
        }
    }
}

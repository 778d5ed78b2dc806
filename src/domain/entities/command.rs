use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::application::errors::HandlerError;
use crate::application::exception::ParseFailure;
use crate::application::messaging::Context;

/// Future returned by a running handler
pub type HandlerFuture = BoxFuture<'static, Result<(), HandlerError>>;

/// Handler bound to already-parsed arguments
pub type Handler = Box<dyn FnOnce(Context) -> HandlerFuture + Send>;

/// Parses the raw invocation text into a ready-to-run handler
pub type CommandParser = Arc<dyn Fn(&str) -> Result<Handler, ParseFailure> + Send + Sync>;

/// Wrap an async closure as a [`Handler`]
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: FnOnce(Context) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    Box::new(move |ctx| Box::pin(f(ctx)))
}

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    parser: Option<CommandParser>,
    /// Tried in declaration order; the first match wins
    pub subcommands: Vec<Command>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            parser: None,
            subcommands: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str) -> Result<Handler, ParseFailure> + Send + Sync + 'static,
    {
        self.parser = Some(Arc::new(parser));
        self
    }

    pub fn with_subcommand(mut self, command: Command) -> Self {
        self.subcommands.push(command);
        self
    }

    /// Name followed by aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn matches(&self, input: &str) -> bool {
        self.names().any(|n| n.eq_ignore_ascii_case(input))
    }

    pub fn find_subcommand(&self, token: &str) -> Option<&Command> {
        self.subcommands.iter().find(|c| c.matches(token))
    }

    pub fn has_parser(&self) -> bool {
        self.parser.is_some()
    }

    /// Run the parser on the raw remaining text.
    ///
    /// A group without its own parser rejects any text that did not select
    /// one of its subcommands.
    pub fn parse(&self, raw: &str) -> Result<Handler, ParseFailure> {
        match &self.parser {
            Some(parser) => parser(raw),
            None => {
                let choices: Vec<&str> = self.subcommands.iter().map(|c| c.name.as_str()).collect();
                Err(ParseFailure::new(format!(
                    "`{}` expects one of: {}",
                    self.name,
                    choices.join(", ")
                )))
            }
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("has_parser", &self.has_parser())
            .field("subcommands", &self.subcommands)
            .finish()
    }
}

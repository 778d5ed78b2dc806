//! Echo plugin - repeats a message with attribution

use crate::application::errors::HandlerError;
use crate::application::exception::{BotException, ParseFailure};
use crate::application::messaging::Context;
use crate::domain::entities::{handler, Command, Handler, HelpPage, Plugin};

pub const NAME: &str = "echo";

pub fn plugin() -> Plugin {
    Plugin::builder(NAME)
        .command(Command::new("say").with_parser(parse_say))
        .help(
            HelpPage::new("say", "Repeat a message, quoted and signed")
                .with_body("Usage: say <text>\nThe bot quotes your text and mentions you."),
        )
        .build()
}

/// Quote `text` and sign it with `author`
pub fn quote(text: &str, author: &str) -> String {
    format!("> {}\n - {}", text, author)
}

fn parse_say(raw: &str) -> Result<Handler, ParseFailure> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ParseFailure::new("say needs some text to repeat"));
    }
    let text = text.to_string();
    Ok(handler(move |ctx| say(ctx, text)))
}

async fn say(ctx: Context, text: String) -> Result<(), HandlerError> {
    let author = ctx
        .user()
        .map(|u| u.mention())
        .unwrap_or_else(|| "someone".to_string());
    ctx.reply(quote(&text, &author))
        .await
        .map_err(|e| BotException::message_send(format!("Could not repeat your message: {}", e)))?;
    Ok(())
}

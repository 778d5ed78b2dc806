//! Pick plugin - choose one of several options

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::application::exception::{raise, BotException, ExceptionResultExt, ParseFailure};
use crate::application::errors::HandlerError;
use crate::application::messaging::Context;
use crate::domain::entities::{handler, Command, Handler, HelpPage, Plugin};

pub const NAME: &str = "pick";

/// Source of random numbers for `pick random`
pub trait EntropySource: Send + Sync {
    fn next_u64(&self) -> Result<u64, String>;
}

/// Operating system entropy
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn next_u64(&self) -> Result<u64, String> {
        OsRng.try_next_u64().map_err(|e| e.to_string())
    }
}

pub fn plugin() -> Plugin {
    plugin_with_entropy(Arc::new(OsEntropy))
}

pub fn plugin_with_entropy(entropy: Arc<dyn EntropySource>) -> Plugin {
    let pick = Command::new("pick")
        .with_aliases(["choose"])
        .with_subcommand(Command::new("nth").with_parser(parse_nth))
        .with_subcommand(
            Command::new("random")
                .with_aliases(["any"])
                .with_parser(move |raw| parse_random(raw, entropy.clone())),
        );

    Plugin::builder(NAME)
        .command(pick)
        .help(
            HelpPage::new("pick", "Choose one of several options")
                .with_sub_page(
                    HelpPage::new("nth", "Pick the option at a 1-based position")
                        .with_body("Usage: pick nth <index> <option> [option...]"),
                )
                .with_sub_page(
                    HelpPage::new("random", "Pick an option at random")
                        .with_body("Usage: pick random <option> [option...]"),
                ),
        )
        .build()
}

fn options(raw: &str) -> Result<Vec<String>, ParseFailure> {
    let options: Vec<String> = raw.split_whitespace().map(String::from).collect();
    if options.is_empty() {
        return Err(ParseFailure::new("give at least one option to pick from"));
    }
    Ok(options)
}

/// Option at a 1-based `index`
pub fn nth(options: &[String], index: i64) -> Result<&str, BotException> {
    let high = options.len() as i64;
    if index < 1 || index > high {
        return raise(BotException::index_out_of_range(index, 1, high));
    }
    Ok(&options[(index - 1) as usize])
}

fn parse_nth(raw: &str) -> Result<Handler, ParseFailure> {
    let (index, rest) = raw
        .trim()
        .split_once(char::is_whitespace)
        .unwrap_or((raw.trim(), ""));
    let index: i64 = index
        .parse()
        .map_err(|_| ParseFailure::new(format!("`{}` is not a whole number", index)))?;
    let options = options(rest)?;
    Ok(handler(move |ctx| pick_nth(ctx, options, index)))
}

async fn pick_nth(ctx: Context, options: Vec<String>, index: i64) -> Result<(), HandlerError> {
    let choice = nth(&options, index)?;
    ctx.reply(format!("I pick: {}", choice)).await?;
    Ok(())
}

fn draw(entropy: &dyn EntropySource, count: usize) -> Result<usize, HandlerError> {
    match entropy.next_u64() {
        Ok(value) => Ok((value % count as u64) as usize),
        Err(e) => raise(BotException::random_source(e)),
    }
}

fn parse_random(raw: &str, entropy: Arc<dyn EntropySource>) -> Result<Handler, ParseFailure> {
    let options = options(raw)?;
    Ok(handler(move |ctx| pick_random(ctx, options, entropy)))
}

async fn pick_random(
    ctx: Context,
    options: Vec<String>,
    entropy: Arc<dyn EntropySource>,
) -> Result<(), HandlerError> {
    let position = draw(entropy.as_ref(), options.len()).map_exception(|e| {
        BotException::random_source(format!(
            "Could not pick among {} options: {}",
            options.len(),
            e.resolve().message
        ))
    })?;
    ctx.reply(format!("I pick: {}", options[position])).await?;
    Ok(())
}

//! Notes plugin - per-chat notes kept in the store

use crate::application::errors::HandlerError;
use crate::application::exception::{raise, BotException, ExceptionResultExt, ParseFailure};
use crate::application::messaging::Context;
use crate::domain::entities::{handler, Command, Handler, HelpPage, Permission, Plugin};

pub const NAME: &str = "notes";

pub fn plugin() -> Plugin {
    let note = Command::new("note")
        .with_aliases(["notes"])
        .with_subcommand(Command::new("set").with_aliases(["save"]).with_parser(parse_set))
        .with_subcommand(Command::new("get").with_parser(parse_get))
        .with_subcommand(
            Command::new("forget")
                .with_aliases(["delete"])
                .with_parser(parse_forget),
        );

    Plugin::builder(NAME)
        .command(note)
        .help(
            HelpPage::new("note", "Keep short notes for this chat")
                .with_sub_page(
                    HelpPage::new("set", "Save a note").with_body("Usage: note set <key> <text>"),
                )
                .with_sub_page(
                    HelpPage::new("get", "Show a note").with_body("Usage: note get <key>"),
                )
                .with_sub_page(
                    HelpPage::new("forget", "Remove a note")
                        .with_body("Usage: note forget <key>"),
                )
                .with_sub_page(
                    HelpPage::new("storage", "How notes are stored")
                        .with_body("Notes live under `note:<chat>:<key>` in the bot's store.")
                        .with_permission(Permission::Operator),
                ),
        )
        .build()
}

pub fn storage_key(chat_id: &str, key: &str) -> String {
    format!("note:{}:{}", chat_id, key.to_lowercase())
}

fn single_key(raw: &str) -> Result<String, ParseFailure> {
    let mut words = raw.split_whitespace();
    match (words.next(), words.next()) {
        (Some(key), None) => Ok(key.to_string()),
        (None, _) => Err(ParseFailure::new("which note? give a key")),
        (Some(_), Some(_)) => Err(ParseFailure::new("note keys are a single word")),
    }
}

fn not_found(key: &str) -> BotException {
    BotException::generic("NoteNotFound", format!("There is no note called `{}` here.", key))
}

/// Stored text for `key`, raising a bare lookup failure when absent
async fn lookup(ctx: &Context, key: &str) -> Result<String, HandlerError> {
    match ctx.transaction().get(&storage_key(ctx.chat_id(), key)).await? {
        Some(text) => Ok(text),
        None => raise(BotException::generic("KeyNotFound", key)),
    }
}

fn parse_set(raw: &str) -> Result<Handler, ParseFailure> {
    let (key, text) = raw
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| ParseFailure::new("usage: note set <key> <text>"))?;
    let key = key.to_string();
    let text = text.trim().to_string();
    Ok(handler(move |ctx| set_note(ctx, key, text)))
}

async fn set_note(ctx: Context, key: String, text: String) -> Result<(), HandlerError> {
    ctx.transaction().set(storage_key(ctx.chat_id(), &key), text)?;
    // confirm only once the note is stored
    ctx.transaction().commit().await?;
    ctx.reply(format!("Saved note `{}`.", key)).await?;
    Ok(())
}

fn parse_get(raw: &str) -> Result<Handler, ParseFailure> {
    let key = single_key(raw)?;
    Ok(handler(move |ctx| get_note(ctx, key)))
}

async fn get_note(ctx: Context, key: String) -> Result<(), HandlerError> {
    let text = lookup(&ctx, &key).await.replace_exception(not_found(&key))?;
    ctx.reply(format!("{}: {}", key, text)).await?;
    Ok(())
}

fn parse_forget(raw: &str) -> Result<Handler, ParseFailure> {
    let key = single_key(raw)?;
    Ok(handler(move |ctx| forget_note(ctx, key)))
}

async fn forget_note(ctx: Context, key: String) -> Result<(), HandlerError> {
    lookup(&ctx, &key).await.replace_exception(not_found(&key))?;
    ctx.transaction().delete(storage_key(ctx.chat_id(), &key))?;
    ctx.transaction().commit().await?;
    ctx.reply(format!("Forgot note `{}`.", key)).await?;
    Ok(())
}

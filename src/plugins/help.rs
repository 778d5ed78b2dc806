//! Help plugin - browse the merged help pages

use crate::application::errors::HandlerError;
use crate::application::exception::{raise, BotException, ParseFailure};
use crate::application::messaging::{Context, HelpIndex};
use crate::domain::entities::{handler, Command, Handler, HelpPage, Plugin};

pub const NAME: &str = "help";

pub fn plugin() -> Plugin {
    let help = Command::new("help")
        .with_aliases(["?"])
        .with_subcommand(Command::new("search").with_parser(parse_search))
        .with_parser(parse_help);

    Plugin::builder(NAME)
        .command(help)
        .help(
            HelpPage::new("help", "Browse help pages")
                .with_body("Usage: help [page] [sub-page...]")
                .with_sub_page(
                    HelpPage::new("search", "Search help pages")
                        .with_body("Usage: help search <words>"),
                ),
        )
        .build()
}

/// Plain-text listing of the visible top-level pages
pub fn render_list(index: &HelpIndex) -> String {
    let pages = index.list(false);
    if pages.is_empty() {
        return "No help pages are available.".to_string();
    }
    let mut out = String::from("**Help pages**");
    for (_, page) in pages {
        out.push_str(&format!("\n• {}: {}", page.name, page.short_description));
    }
    out
}

/// Plain-text rendering of one page and its visible sub-pages
pub fn render_page(page: &HelpPage) -> String {
    let mut out = format!("**{}**\n{}", page.name, page.short_description);
    if !page.long_description.is_empty() {
        out.push_str("\n\n");
        out.push_str(&page.long_description);
    }
    let subs: Vec<&HelpPage> = page.sub_pages.iter().filter(|p| p.is_visible(false)).collect();
    if !subs.is_empty() {
        out.push_str("\n\nSee also:");
        for sub in subs {
            out.push_str(&format!("\n• {} {}: {}", page.name, sub.name, sub.short_description));
        }
    }
    out
}

fn parse_help(raw: &str) -> Result<Handler, ParseFailure> {
    let path: Vec<String> = raw.split_whitespace().map(String::from).collect();
    Ok(handler(move |ctx| show_help(ctx, path)))
}

async fn show_help(ctx: Context, path: Vec<String>) -> Result<(), HandlerError> {
    let text = if path.is_empty() {
        render_list(ctx.help())
    } else {
        let names: Vec<&str> = path.iter().map(String::as_str).collect();
        match ctx.help().find(&names, false) {
            Some(page) => render_page(page),
            None => {
                return raise(BotException::generic(
                    "HelpNotFound",
                    format!("No help page matches `{}`.", path.join(" ")),
                ))
            }
        }
    };
    ctx.reply(text).await?;
    Ok(())
}

fn parse_search(raw: &str) -> Result<Handler, ParseFailure> {
    let query = raw.trim().to_string();
    if query.is_empty() {
        return Err(ParseFailure::new("what should I search for?"));
    }
    Ok(handler(move |ctx| search_help(ctx, query)))
}

async fn search_help(ctx: Context, query: String) -> Result<(), HandlerError> {
    let hits = ctx.help().search(&query, false);
    let text = if hits.is_empty() {
        format!("Nothing in the help pages mentions `{}`.", query)
    } else {
        let lines: Vec<String> = hits
            .iter()
            .map(|p| format!("• {}: {}", p.name, p.short_description))
            .collect();
        format!("**Results for `{}`**\n{}", query, lines.join("\n"))
    };
    ctx.reply(text).await?;
    Ok(())
}

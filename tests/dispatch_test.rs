//! End-to-end dispatch through the message service
//! Run with: cargo test --test dispatch_test

mod common;

use cogbot::application::exception::BotException;
use cogbot::application::messaging::Outcome;
use cogbot::domain::entities::{OutgoingMessage, RichMessage};
use cogbot::plugins;

use common::{message_from, Harness};

#[tokio::test]
async fn test_say_sends_exactly_one_quoted_message() {
    let h = Harness::builtin();
    let outcome = h
        .service
        .process(message_from("42", "general", "say hello world"))
        .await;

    assert_eq!(outcome, Ok(Outcome::Handled("say".to_string())));
    assert_eq!(
        h.bot.sent(),
        vec![(
            "general".to_string(),
            OutgoingMessage::Text("> hello world\n - <@42>".to_string())
        )]
    );
}

#[tokio::test]
async fn test_prefix_is_required_when_configured() {
    let h = Harness::new(plugins::builtin(), "!");
    let ignored = h.service.process(message_from("1", "c", "say hi")).await;
    assert_eq!(ignored, Ok(Outcome::Ignored));
    assert!(h.bot.sent().is_empty());

    let handled = h.service.process(message_from("1", "c", "!SAY hi")).await;
    assert_eq!(handled, Ok(Outcome::Handled("say".to_string())));
    assert_eq!(h.bot.texts(), vec!["> hi\n - <@1>".to_string()]);
}

#[tokio::test]
async fn test_unknown_command_is_ignored() {
    let h = Harness::builtin();
    let outcome = h.service.process(message_from("1", "c", "just chatting")).await;
    assert_eq!(outcome, Ok(Outcome::Ignored));
    assert!(h.bot.sent().is_empty());
}

#[tokio::test]
async fn test_parse_failure_is_reported_with_user_template() {
    let h = Harness::builtin();
    let outcome = h.service.process(message_from("1", "c", "say")).await;

    let expected = BotException::parse("say needs some text to repeat");
    assert_eq!(outcome, Err(expected.clone()));
    assert_eq!(
        h.bot.texts(),
        vec![concat!(
            "⚠ **ParseFailure** ⚠\n",
            "An error was encountered while resolving your command:\n",
            "> `say needs some text to repeat`"
        )
        .to_string()]
    );
    assert_eq!(h.bot.texts(), vec![expected.format_user()]);
}

#[tokio::test]
async fn test_index_out_of_range_reaches_the_chat() {
    let h = Harness::builtin();
    let outcome = h
        .service
        .process(message_from("1", "c", "pick nth 5 tea coffee water"))
        .await;
    assert_eq!(outcome, Err(BotException::index_out_of_range(5, 1, 3)));
    let texts = h.bot.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Index value of 5 is not in the valid range [1, 3]."));
}

#[tokio::test]
async fn test_subcommand_descent_and_alias() {
    let h = Harness::builtin();
    let outcome = h
        .service
        .process(message_from("1", "c", "choose nth 2 tea coffee"))
        .await;
    assert_eq!(outcome, Ok(Outcome::Handled("pick nth".to_string())));
    assert_eq!(h.bot.texts(), vec!["I pick: coffee".to_string()]);
}

#[tokio::test]
async fn test_group_without_match_is_a_parse_failure() {
    let h = Harness::builtin();
    let outcome = h.service.process(message_from("1", "c", "pick twice a b")).await;
    assert_eq!(
        outcome,
        Err(BotException::parse("`pick` expects one of: nth, random"))
    );
}

#[tokio::test]
async fn test_rich_error_display() {
    let h = Harness::rich(plugins::builtin(), "");
    let _ = h.service.process(message_from("1", "c", "pick nth zero a")).await;
    let sent = h.bot.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0].1 {
        OutgoingMessage::Rich(RichMessage { title, body, colour }) => {
            assert_eq!(title, "⚠ **ParseFailure** ⚠");
            assert_eq!(body, "`zero` is not a whole number");
            assert_eq!(*colour, Some(cogbot::application::exception::ERROR_COLOUR));
        }
        other => panic!("expected a rich message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_error_delivery_is_dropped() {
    let h = Harness::builtin();
    h.bot.fail_sends(true);
    // the handler's own send fails, then so does the report; neither panics
    let outcome = h.service.process(message_from("1", "c", "say hi")).await;
    match outcome {
        Err(BotException::MessageSendFailure { message }) => {
            assert!(message.contains("backend unreachable"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(h.bot.sent().is_empty());

    h.bot.fail_sends(false);
    let again = h.service.process(message_from("1", "c", "say hi")).await;
    assert_eq!(again, Ok(Outcome::Handled("say".to_string())));
}

#[tokio::test]
async fn test_help_lists_and_searches_pages() {
    let h = Harness::builtin();
    h.service
        .process(message_from("1", "c", "help"))
        .await
        .expect("help runs");
    let listing = h.bot.texts().remove(0);
    assert!(listing.contains("• say:"));
    assert!(listing.contains("• note:"));

    h.bot.clear();
    h.service
        .process(message_from("1", "c", "help note"))
        .await
        .expect("help page");
    let page = h.bot.texts().remove(0);
    assert!(page.contains("• note set: Save a note"));
    assert!(!page.contains("storage"));

    h.bot.clear();
    h.service
        .process(message_from("1", "c", "help search random"))
        .await
        .expect("help search");
    assert!(h.bot.texts()[0].contains("• random: Pick an option at random"));

    let missing = h.service.process(message_from("1", "c", "help nope")).await;
    assert_eq!(
        missing,
        Err(BotException::generic("HelpNotFound", "No help page matches `nope`."))
    );
}

#[tokio::test]
async fn test_messages_are_handled_concurrently() {
    let h = Harness::builtin();
    let handles: Vec<_> = (0..16)
        .map(|i| {
            h.service
                .spawn(message_from(&i.to_string(), "c", &format!("say message {}", i)))
        })
        .collect();
    for handle in handles {
        let outcome = handle.await.expect("task completes");
        assert_eq!(outcome, Ok(Outcome::Handled("say".to_string())));
    }
    let mut texts = h.bot.texts();
    texts.sort();
    assert_eq!(texts.len(), 16);
    assert!(texts.contains(&"> message 7\n - <@7>".to_string()));
}

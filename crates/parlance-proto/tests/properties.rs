//! Property tests for the tokenizer and the mask matcher.

use parlance_proto::mask::{glob, matches, Case};
use parlance_proto::{irc_to_lower, Message, MessageRef};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9#&.\\[\\]{}|_-]{1,16}"
}

fn text() -> impl Strategy<Value = String> {
    "[ -~]{0,80}"
}

proptest! {
    #[test]
    fn tokenizer_never_panics(line in "\\PC{0,600}") {
        let _ = MessageRef::parse(&line);
    }

    #[test]
    fn trailing_text_survives_serialization(target in word(), body in text()) {
        let wire = Message::privmsg(&target, &body).to_string();
        let parsed = MessageRef::parse(&wire).unwrap();
        prop_assert_eq!(parsed.command, "PRIVMSG");
        prop_assert_eq!(parsed.param(0), Some(target.as_str()));
        prop_assert_eq!(parsed.param(1), Some(body.as_str()));
        prop_assert!(parsed.trailing);
    }

    #[test]
    fn literal_pattern_matches_itself_folded(name in word()) {
        prop_assert!(matches(&name, &name));
        prop_assert!(matches(&name, &irc_to_lower(&name)));
        prop_assert!(matches(&irc_to_lower(&name), &name.to_uppercase()));
    }

    #[test]
    fn star_matches_everything(candidate in text()) {
        prop_assert!(matches("*", &candidate));
    }

    #[test]
    fn question_marks_match_same_length_only(candidate in word()) {
        let exact = "?".repeat(candidate.chars().count());
        prop_assert!(glob(&exact, &candidate, Case::Sensitive));
        let longer = format!("{exact}?");
        prop_assert!(!glob(&longer, &candidate, Case::Sensitive));
    }

    #[test]
    fn prefix_star_matches_any_extension(head in word(), tail in text()) {
        let pattern = format!("{head}*");
        let candidate = format!("{head}{tail}");
        prop_assert!(glob(&pattern, &candidate, Case::Sensitive));
    }
}

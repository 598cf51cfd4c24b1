//! PRIVMSG, NOTICE and AWAY.

mod common;

use common::Engine;

#[test]
fn private_message_between_users() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "PRIVMSG BOB :hi there");
    assert_eq!(bob.drain(), vec![":alice!alice@127.0.0.1 PRIVMSG BOB :hi there"]);
    assert!(alice.drain().is_empty());
}

#[test]
fn missing_recipient_or_text() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "PRIVMSG");
    engine.send(&mut alice, "PRIVMSG bob");
    engine.send(&mut alice, "PRIVMSG nobody :hello");
    assert_eq!(
        alice.drain(),
        vec![
            ":irc.test 411 alice :No recipient given (PRIVMSG)",
            ":irc.test 412 alice :No text to send",
            ":irc.test 401 alice nobody :No such nick/channel",
        ]
    );
}

#[test]
fn notice_never_answers() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "NOTICE");
    engine.send(&mut alice, "NOTICE nobody :hello");
    engine.send(&mut alice, "NOTICE #nowhere :hello");
    assert!(alice.drain().is_empty());

    engine.send(&mut bob, "AWAY :lunch");
    bob.drain();
    engine.send(&mut alice, "NOTICE bob :ping");
    assert!(alice.drain().is_empty(), "no RPL_AWAY for NOTICE");
    assert_eq!(bob.drain(), vec![":alice!alice@127.0.0.1 NOTICE bob :ping"]);
}

#[test]
fn away_status() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");

    engine.send(&mut bob, "AWAY :lunch");
    assert_eq!(bob.drain(), vec![":irc.test 306 bob :You have been marked as being away"]);

    engine.send(&mut alice, "PRIVMSG bob :are you there");
    assert_eq!(alice.drain(), vec![":irc.test 301 alice bob :lunch"]);

    engine.send(&mut bob, "AWAY");
    assert_eq!(
        bob.drain(),
        vec![
            ":alice!alice@127.0.0.1 PRIVMSG bob :are you there",
            ":irc.test 305 bob :You are no longer marked as being away",
        ]
    );
}

#[test]
fn duplicate_targets_are_refused() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "PRIVMSG bob,BOB :twice");
    assert_eq!(alice.drain_codes(), vec![407]);
    assert_eq!(bob.drain().len(), 1);
}

#[test]
fn multiple_targets() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    let mut carol = engine.register("carol");
    engine.send(&mut carol, "JOIN #c");
    carol.drain();

    engine.send(&mut alice, "PRIVMSG bob,#c :both");
    assert_eq!(bob.drain(), vec![":alice!alice@127.0.0.1 PRIVMSG bob :both"]);
    assert_eq!(carol.drain(), vec![":alice!alice@127.0.0.1 PRIVMSG #c :both"]);
}

#[test]
fn server_mask_broadcast_needs_operator() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");

    engine.send(&mut alice, "PRIVMSG $*.test :hello all");
    assert_eq!(alice.drain_codes(), vec![481]);

    engine.send(&mut alice, "OPER root hunter2");
    alice.drain();
    engine.send(&mut alice, "PRIVMSG $*.test :hello all");
    assert_eq!(bob.drain(), vec![":alice!alice@127.0.0.1 PRIVMSG $*.test :hello all"]);

    engine.send(&mut alice, "PRIVMSG $test :x");
    engine.send(&mut alice, "PRIVMSG $irc.* :x");
    let codes: Vec<u16> = alice
        .drain()
        .iter()
        .filter_map(|l| common::numeric_code(l))
        .collect();
    assert_eq!(codes, vec![413, 414]);
}

//! Channel membership, modes and channel messaging.

mod common;

use common::{Engine, Peer};

/// alice creates `#c` (and is its operator), bob joins after her.
fn pair(engine: &Engine) -> (Peer, Peer) {
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #c");
    engine.send(&mut bob, "JOIN #c");
    alice.drain();
    bob.drain();
    (alice, bob)
}

#[test]
fn join_creates_channel_with_operator() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "JOIN #Rust");
    assert_eq!(
        alice.drain(),
        vec![
            ":alice!alice@127.0.0.1 JOIN #Rust",
            ":irc.test 353 alice = #Rust :@alice",
            ":irc.test 366 alice #Rust :End of NAMES list",
        ]
    );
    let channel = engine.server.directory().find_channel("#rust").expect("channel exists");
    assert_eq!(channel.name(), "#Rust");
    assert!(channel.lock().is_operator(alice.talker.link_id().unwrap_or_default()));
}

#[test]
fn join_is_announced_to_members() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "JOIN #c");
    alice.drain();

    let mut bob = engine.register("bob");
    engine.send(&mut bob, "JOIN #C");
    assert_eq!(alice.drain(), vec![":bob!bob@127.0.0.1 JOIN #c"]);
    let lines = bob.drain();
    assert_eq!(lines[0], ":bob!bob@127.0.0.1 JOIN #c");
    assert_eq!(lines[1], ":irc.test 353 bob = #c :@alice bob");
}

#[test]
fn joining_twice_is_silent() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);
    engine.send(&mut bob, "JOIN #c");
    assert!(bob.drain().is_empty());
    assert!(alice.drain().is_empty());
}

#[test]
fn channel_disappears_with_its_last_member() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);

    engine.send(&mut bob, "PART #c :later");
    assert_eq!(alice.drain(), vec![":bob!bob@127.0.0.1 PART #c :later"]);
    assert_eq!(bob.drain(), vec![":bob!bob@127.0.0.1 PART #c :later"]);
    assert!(engine.server.directory().find_channel("#c").is_some());

    engine.send(&mut alice, "PART #c");
    assert!(engine.server.directory().find_channel("#c").is_none());

    engine.send(&mut alice, "PART #c");
    assert_eq!(alice.drain_codes(), vec![403]);
}

#[test]
fn kick_removes_member_and_empty_channel() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);

    engine.send(&mut bob, "KICK #c alice");
    assert_eq!(bob.drain(), vec![":irc.test 482 bob #c :You're not channel operator"]);

    engine.send(&mut alice, "KICK #c bob :behave");
    let expected = ":alice!alice@127.0.0.1 KICK #c bob :behave";
    assert_eq!(alice.drain(), vec![expected]);
    assert_eq!(bob.drain(), vec![expected]);

    engine.send(&mut alice, "KICK #c alice");
    alice.drain();
    assert!(engine.server.directory().find_channel("#c").is_none());
}

#[test]
fn quit_of_last_member_deletes_channel() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "JOIN #solo");
    engine.send(&mut alice, "QUIT");
    assert!(engine.server.directory().find_channel("#solo").is_none());
}

#[test]
fn join_zero_parts_everything() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "JOIN #a,#b");
    alice.drain();
    engine.send(&mut alice, "JOIN 0");
    let lines = alice.drain();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.contains(" PART #")));
    assert!(engine.server.directory().channels().is_empty());
}

#[test]
fn setting_a_mode_twice_echoes_twice() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);
    let echo = ":alice!alice@127.0.0.1 MODE #c +m";

    engine.send(&mut alice, "MODE #c +m");
    assert_eq!(alice.drain(), vec![echo]);
    assert_eq!(bob.drain(), vec![echo]);

    engine.send(&mut alice, "MODE #c +m");
    assert_eq!(alice.drain(), vec![echo]);
}

#[test]
fn missing_argument_rejects_only_that_flag() {
    let engine = Engine::new();
    let (mut alice, _bob) = pair(&engine);
    engine.send(&mut alice, "MODE #c +ov bob");
    let lines = alice.drain();
    assert_eq!(
        lines,
        vec![
            ":irc.test 472 alice v :is unknown mode char to me for #c",
            ":alice!alice@127.0.0.1 MODE #c +o bob",
        ]
    );
}

#[test]
fn non_operator_cannot_change_modes() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);
    engine.send(&mut bob, "MODE #c +mt");
    assert_eq!(bob.drain(), vec![":irc.test 482 bob #c :You're not channel operator"]);
    assert!(alice.drain().is_empty());
}

#[test]
fn mode_query_reports_flags() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);
    engine.send(&mut alice, "MODE #c +tk secret");
    alice.drain();
    bob.drain();

    engine.send(&mut bob, "MODE #c");
    assert_eq!(bob.drain(), vec![":irc.test 324 bob #c +tk secret"]);
}

#[test]
fn ban_list_query() {
    let engine = Engine::new();
    let (mut alice, _bob) = pair(&engine);
    engine.send(&mut alice, "MODE #c +b *!*@evil.example");
    alice.drain();
    engine.send(&mut alice, "MODE #c b");
    assert_eq!(
        alice.drain(),
        vec![
            ":irc.test 367 alice #c *!*@evil.example",
            ":irc.test 368 alice #c :End of channel ban list",
        ]
    );
}

#[test]
fn no_external_messages() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);
    let mut carol = engine.register("carol");
    engine.send(&mut alice, "MODE #c +n");
    alice.drain();
    bob.drain();

    engine.send(&mut carol, "PRIVMSG #c :hello from outside");
    assert_eq!(carol.drain(), vec![":irc.test 404 carol #c :Cannot send to channel"]);
    assert!(alice.drain().is_empty());

    engine.send(&mut bob, "PRIVMSG #c :hello from inside");
    assert_eq!(alice.drain(), vec![":bob!bob@127.0.0.1 PRIVMSG #c :hello from inside"]);
    assert!(bob.drain().is_empty(), "sender does not get its own message");
}

#[test]
fn moderated_channel_needs_voice() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);
    engine.send(&mut alice, "MODE #c +m");
    alice.drain();
    bob.drain();

    engine.send(&mut bob, "PRIVMSG #c :can I talk");
    assert_eq!(bob.drain(), vec![":irc.test 404 bob #c :Cannot send to channel"]);

    engine.send(&mut alice, "MODE #c +v bob");
    alice.drain();
    bob.drain();
    engine.send(&mut bob, "PRIVMSG #c :now I can");
    assert_eq!(alice.drain(), vec![":bob!bob@127.0.0.1 PRIVMSG #c :now I can"]);
}

#[test]
fn invite_only_and_invite() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #vip");
    engine.send(&mut alice, "MODE #vip +i");
    alice.drain();

    engine.send(&mut bob, "JOIN #vip");
    assert_eq!(bob.drain(), vec![":irc.test 473 bob #vip :Cannot join channel (+i)"]);

    engine.send(&mut alice, "INVITE bob #vip");
    assert_eq!(alice.drain(), vec![":irc.test 341 alice #vip bob"]);
    assert_eq!(bob.drain(), vec![":alice!alice@127.0.0.1 INVITE bob #vip"]);

    engine.send(&mut bob, "JOIN #vip");
    assert_eq!(bob.drain()[0], ":bob!bob@127.0.0.1 JOIN #vip");
}

#[test]
fn keyed_channel() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #k");
    engine.send(&mut alice, "MODE #k +k sesame");
    engine.send(&mut bob, "JOIN #k wrong");
    assert_eq!(bob.drain(), vec![":irc.test 475 bob #k :Cannot join channel (+k)"]);
    engine.send(&mut bob, "JOIN #k sesame");
    assert_eq!(bob.drain()[0], ":bob!bob@127.0.0.1 JOIN #k");
}

#[test]
fn topic_set_and_query() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);

    engine.send(&mut bob, "TOPIC #c");
    assert_eq!(bob.drain(), vec![":irc.test 331 bob #c :No topic is set"]);

    engine.send(&mut bob, "TOPIC #c :Rust things");
    let expected = ":bob!bob@127.0.0.1 TOPIC #c :Rust things";
    assert_eq!(alice.drain(), vec![expected]);
    assert_eq!(bob.drain(), vec![expected]);

    engine.send(&mut alice, "MODE #c +t");
    alice.drain();
    bob.drain();
    engine.send(&mut bob, "TOPIC #c :mine now");
    assert_eq!(bob.drain_codes(), vec![482]);

    engine.send(&mut bob, "TOPIC #c");
    assert_eq!(bob.drain()[0], ":irc.test 332 bob #c :Rust things");
}

#[test]
fn secret_channels_are_hidden_from_list() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #open,#hidden");
    engine.send(&mut alice, "MODE #hidden +s");
    alice.drain();

    engine.send(&mut bob, "LIST");
    let lines = bob.drain();
    assert!(lines.iter().any(|l| l.starts_with(":irc.test 322 bob #open 1")));
    assert!(!lines.iter().any(|l| l.contains("#hidden")));
    assert_eq!(lines.last().map(String::as_str), Some(":irc.test 323 bob :End of LIST"));
}

#[test]
fn anonymous_channel_masks_origin() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN &anon");
    engine.send(&mut alice, "MODE &anon +a");
    engine.send(&mut bob, "JOIN &anon");
    alice.drain();
    bob.drain();

    engine.send(&mut bob, "PRIVMSG &anon :who am I");
    assert_eq!(
        alice.drain(),
        vec![":anonymous!anonymous@anonymous. PRIVMSG &anon :who am I"]
    );
}

#[test]
fn restricted_operator_cannot_grant_privileges() {
    let engine = Engine::new();
    let (mut alice, mut bob) = pair(&engine);
    engine.send(&mut alice, "MODE alice +r");
    assert_eq!(alice.drain(), vec![":alice!alice@127.0.0.1 MODE alice :+r"]);

    for line in ["MODE #c +o bob", "MODE #c +v bob"] {
        engine.send(&mut alice, line);
        assert_eq!(
            alice.drain(),
            vec![":irc.test 484 alice :Your connection is restricted!"]
        );
    }
    assert!(bob.drain().is_empty());

    engine.send(&mut alice, "MODE #c +t");
    assert_eq!(alice.drain(), vec![":alice!alice@127.0.0.1 MODE #c +t"]);
    assert_eq!(bob.drain(), vec![":alice!alice@127.0.0.1 MODE #c +t"]);
}

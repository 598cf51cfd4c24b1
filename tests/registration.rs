//! Registration, nicknames and connection teardown.

mod common;

use common::{Engine, numeric_code};
use parlance::handlers::disconnect;

#[test]
fn welcome_burst_in_order() {
    let engine = Engine::new();
    let mut peer = engine.connect();

    engine.send(&mut peer, "NICK alice");
    assert!(peer.drain().is_empty(), "NICK alone must not answer");

    engine.send(&mut peer, "USER alice 0 * :Alice Liddell");
    let lines = peer.drain();
    let codes: Vec<u16> = lines.iter().filter_map(|l| numeric_code(l)).collect();
    assert_eq!(codes, vec![1, 2, 3, 4, 5, 375, 372, 376]);
    assert_eq!(
        lines[0],
        ":irc.test 001 alice :Welcome to the Internet Relay Network alice!alice@127.0.0.1"
    );
    assert_eq!(lines[6], ":irc.test 372 alice :- Test Server");
}

#[test]
fn user_before_nick_also_registers() {
    let engine = Engine::new();
    let mut peer = engine.connect();
    engine.send(&mut peer, "USER bob 8 * :Bob");
    assert!(peer.drain().is_empty());
    engine.send(&mut peer, "NICK bob");
    assert_eq!(peer.drain_codes().first(), Some(&1));
    assert!(peer.talker.is_registered());
}

#[test]
fn commands_before_registration_are_refused() {
    let engine = Engine::new();
    let mut peer = engine.connect();
    engine.send(&mut peer, "JOIN #rust");
    assert_eq!(peer.drain(), vec![":irc.test 451 * :You have not registered"]);
}

#[test]
fn nickname_collision_ignores_case() {
    let engine = Engine::new();
    let _alice = engine.register("alice");
    let mut other = engine.connect();

    engine.send(&mut other, "NICK ALICE");
    assert_eq!(
        other.drain(),
        vec![":irc.test 433 * ALICE :Nickname is already in use"]
    );

    engine.send(&mut other, "NICK Alice[1]");
    engine.send(&mut other, "USER a 0 * :A");
    assert_eq!(other.drain_codes().first(), Some(&1));
}

#[test]
fn failed_rename_keeps_old_nick() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #c");
    engine.send(&mut bob, "JOIN #c");
    alice.drain();
    bob.drain();

    engine.send(&mut bob, "NICK Alice");
    assert_eq!(
        bob.drain(),
        vec![":irc.test 433 bob Alice :Nickname is already in use"]
    );
    assert!(alice.drain().is_empty(), "no NICK broadcast after a failed rename");
    assert!(engine.server.directory().find_user("bob").is_some());
}

#[test]
fn rename_is_seen_by_channel_peers() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #c");
    engine.send(&mut bob, "JOIN #c");
    alice.drain();
    bob.drain();

    engine.send(&mut bob, "NICK robert");
    let expected = ":bob!bob@127.0.0.1 NICK robert";
    assert_eq!(bob.drain(), vec![expected]);
    assert_eq!(alice.drain(), vec![expected]);
    assert!(engine.server.directory().find_user("bob").is_none());
    assert!(engine.server.directory().find_user("ROBERT").is_some());
}

#[test]
fn renaming_to_the_same_nick_is_silent() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "NICK alice");
    assert!(alice.drain().is_empty());
}

#[test]
fn invalid_nicknames() {
    let engine = Engine::new();
    let mut peer = engine.connect();
    engine.send(&mut peer, "NICK");
    engine.send(&mut peer, "NICK 9lives");
    assert_eq!(
        peer.drain(),
        vec![
            ":irc.test 431 * :No nickname given",
            ":irc.test 432 * 9lives :Erroneous nickname",
        ]
    );
}

#[test]
fn second_user_is_rejected() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "USER again 0 * :Again");
    assert_eq!(alice.drain_codes(), vec![462]);
}

#[test]
fn unknown_command() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "FROB x");
    assert_eq!(alice.drain(), vec![":irc.test 421 alice FROB :Unknown command"]);
}

#[test]
fn foreign_prefix_is_dropped() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, ":bob PRIVMSG bob :spoofed");
    assert!(alice.drain().is_empty());
    assert!(bob.drain().is_empty());

    engine.send(&mut alice, ":alice PRIVMSG bob :honest");
    assert_eq!(bob.drain(), vec![":alice!alice@127.0.0.1 PRIVMSG bob :honest"]);
}

#[test]
fn ping_answers_with_pong() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "PING token");
    assert_eq!(alice.drain(), vec![":irc.test PONG irc.test :token"]);
    engine.send(&mut alice, "PING");
    assert_eq!(alice.drain_codes(), vec![409]);
}

#[test]
fn quit_reaches_shared_channels_and_frees_the_nick() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #c");
    engine.send(&mut bob, "JOIN #c");
    alice.drain();
    bob.drain();

    engine.send(&mut bob, "QUIT :gone fishing");
    assert_eq!(bob.drain(), vec!["ERROR :Closing Link: gone fishing"]);
    assert_eq!(alice.drain(), vec![":bob!bob@127.0.0.1 QUIT :gone fishing"]);
    assert!(engine.server.directory().find_user("bob").is_none());
    assert!(bob.talker.link().is_some_and(|l| l.is_closing()));

    let whowas = engine.server.directory().whowas("BOB", None);
    assert_eq!(whowas.len(), 1);
    assert_eq!(whowas[0].nickname, "bob");
}

#[test]
fn service_registration() {
    let engine = Engine::new();
    let mut svc = engine.connect();
    engine.send(&mut svc, "SERVICE dict * *.test 0 0 :Dictionary");
    let codes = svc.drain_codes();
    assert!(codes.contains(&383), "got {codes:?}");
    assert!(engine.server.directory().find_service("DICT").is_some());

    let mut alice = engine.register("alice");
    engine.send(&mut alice, "SQUERY dict :define parlance");
    assert!(alice.drain().is_empty());
    assert_eq!(
        svc.drain(),
        vec![":alice!alice@127.0.0.1 SQUERY dict :define parlance"]
    );

    engine.send(&mut alice, "SQUERY nobody :hello");
    assert_eq!(alice.drain_codes(), vec![408]);
}

#[test]
fn refused_service_keeps_the_reserved_nick() {
    let engine = Engine::new();
    let _bob = engine.register("bob");
    let mut carol = engine.connect();
    engine.send(&mut carol, "NICK carol");
    engine.send(&mut carol, "SERVICE bob * * svc 0 :info");
    assert_eq!(carol.drain_codes(), vec![433]);
    assert!(engine.server.directory().find_service("bob").is_none());

    engine.send(&mut carol, "USER carol 0 * :Carol");
    assert_eq!(carol.drain_codes().first(), Some(&1));
    assert!(engine.server.directory().find_user("carol").is_some());

    let mut impostor = engine.connect();
    engine.send(&mut impostor, "NICK CAROL");
    assert_eq!(
        impostor.drain(),
        vec![":irc.test 433 * CAROL :Nickname is already in use"]
    );
}

#[test]
fn user_mode_bits_set_wallops_and_invisible() {
    let engine = Engine::new();
    let mut bob = engine.connect();
    engine.send(&mut bob, "NICK bob");
    engine.send(&mut bob, "USER bob 12 * :Bob");
    bob.drain();
    engine.send(&mut bob, "MODE bob");
    assert_eq!(bob.drain(), vec![":irc.test 221 bob +iw"]);

    let mut eve = engine.connect();
    engine.send(&mut eve, "NICK eve");
    engine.send(&mut eve, "USER eve 8 * :Eve");
    eve.drain();
    engine.send(&mut eve, "MODE eve");
    assert_eq!(eve.drain(), vec![":irc.test 221 eve +i"]);
}

#[test]
fn restricted_user_keeps_its_nickname() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "MODE alice +r");
    alice.drain();

    engine.send(&mut alice, "NICK alicia");
    assert_eq!(
        alice.drain(),
        vec![":irc.test 484 alice :Your connection is restricted!"]
    );
    assert!(engine.server.directory().find_user("alice").is_some());
    assert!(engine.server.directory().find_user("alicia").is_none());
}

#[test]
fn racing_disconnects_announce_once() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #c");
    engine.send(&mut bob, "JOIN #c");
    alice.drain();
    bob.drain();

    disconnect(&engine.server, &bob.talker, "Killed (alice (spam))");
    disconnect(&engine.server, &bob.talker, "Connection closed");

    assert_eq!(alice.drain(), vec![":bob!bob@127.0.0.1 QUIT :Killed (alice (spam))"]);
    assert_eq!(bob.drain(), vec!["ERROR :Closing Link: Killed (alice (spam))"]);
    let whowas = engine.server.directory().whowas("bob", None);
    assert_eq!(whowas.len(), 1);
}

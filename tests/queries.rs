//! User and server queries.

mod common;

use common::{Engine, numeric_code};

#[test]
fn who_on_channel() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #c");
    engine.send(&mut bob, "JOIN #c");
    alice.drain();
    bob.drain();

    engine.send(&mut bob, "WHO #c");
    assert_eq!(
        bob.drain(),
        vec![
            ":irc.test 352 bob #c alice 127.0.0.1 irc.test alice H@ :0 alice Tester",
            ":irc.test 352 bob #c bob 127.0.0.1 irc.test bob H :0 bob Tester",
            ":irc.test 315 bob #c :End of WHO list",
        ]
    );
}

#[test]
fn who_hides_invisible_strangers() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut ghost = engine.register("ghost");
    engine.send(&mut ghost, "MODE ghost +i");
    ghost.drain();

    engine.send(&mut alice, "WHO *");
    let lines = alice.drain();
    assert!(lines.iter().any(|l| l.contains(" 352 alice * alice ")));
    assert!(!lines.iter().any(|l| l.contains(" ghost ")));

    engine.send(&mut alice, "WHO gh*");
    assert_eq!(alice.drain_codes(), vec![315]);
}

#[test]
fn whois_reports_user() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut alice, "JOIN #c");
    alice.drain();

    engine.send(&mut bob, "WHOIS alice");
    let lines = bob.drain();
    assert_eq!(lines[0], ":irc.test 311 bob alice alice 127.0.0.1 * :alice Tester");
    let codes: Vec<u16> = lines.iter().filter_map(|l| numeric_code(l)).collect();
    assert_eq!(codes, vec![311, 312, 319, 317, 318]);
    assert_eq!(lines[2], ":irc.test 319 bob alice :@#c");

    engine.send(&mut bob, "WHOIS nobody");
    assert_eq!(bob.drain_codes(), vec![401, 318]);
    engine.send(&mut bob, "WHOIS");
    assert_eq!(bob.drain_codes(), vec![431]);
}

#[test]
fn whowas_remembers_departed_nicks() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let mut bob = engine.register("bob");
    engine.send(&mut bob, "QUIT");

    engine.send(&mut alice, "WHOWAS bob");
    let lines = alice.drain();
    assert_eq!(lines[0], ":irc.test 314 alice bob bob 127.0.0.1 * :bob Tester");
    let codes: Vec<u16> = lines.iter().filter_map(|l| numeric_code(l)).collect();
    assert_eq!(codes, vec![314, 312, 369]);

    engine.send(&mut alice, "WHOWAS carol");
    assert_eq!(alice.drain_codes(), vec![406, 369]);
}

#[test]
fn ison_and_userhost() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let _bob = engine.register("bob");

    engine.send(&mut alice, "ISON BOB carol alice");
    assert_eq!(alice.drain(), vec![":irc.test 303 alice :bob alice"]);

    engine.send(&mut alice, "USERHOST bob");
    assert_eq!(alice.drain(), vec![":irc.test 302 alice :bob=+bob@127.0.0.1"]);
}

#[test]
fn lusers_counts() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    let _bob = engine.register("bob");
    let _pending = engine.connect();
    engine.send(&mut alice, "JOIN #c");
    alice.drain();

    engine.send(&mut alice, "LUSERS");
    assert_eq!(
        alice.drain(),
        vec![
            ":irc.test 251 alice :There are 2 users and 0 services on 1 servers",
            ":irc.test 253 alice 1 :unknown connection(s)",
            ":irc.test 254 alice 1 :channels formed",
            ":irc.test 255 alice :I have 2 clients and 0 servers",
        ]
    );
}

#[test]
fn server_info_queries() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");

    engine.send(&mut alice, "VERSION");
    let line = alice.drain().remove(0);
    assert!(line.starts_with(":irc.test 351 alice parlance-"), "{line}");

    engine.send(&mut alice, "TIME");
    assert_eq!(alice.drain_codes(), vec![391]);

    engine.send(&mut alice, "ADMIN");
    assert_eq!(alice.drain_codes(), vec![256, 257, 258, 259]);

    engine.send(&mut alice, "INFO");
    let codes = alice.drain_codes();
    assert_eq!(codes.last(), Some(&374));
    assert!(codes[..codes.len() - 1].iter().all(|c| *c == 371));

    engine.send(&mut alice, "MOTD");
    assert_eq!(alice.drain_codes(), vec![375, 372, 376]);

    engine.send(&mut alice, "LINKS");
    assert_eq!(
        alice.drain(),
        vec![
            ":irc.test 364 alice * irc.test :0 Test IRC Server",
            ":irc.test 365 alice * :End of LINKS list",
        ]
    );
}

#[test]
fn queries_for_unknown_servers() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "VERSION elsewhere.example");
    assert_eq!(
        alice.drain(),
        vec![":irc.test 402 alice elsewhere.example :No such server"]
    );
    engine.send(&mut alice, "TIME *.test");
    assert_eq!(alice.drain_codes(), vec![391]);
}

#[test]
fn stats_queries() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");

    engine.send(&mut alice, "STATS m");
    let lines = alice.drain();
    assert!(lines.iter().any(|l| l.starts_with(":irc.test 212 alice NICK 1 ")));
    assert_eq!(lines.last().map(String::as_str), Some(":irc.test 219 alice m :End of STATS report"));

    engine.send(&mut alice, "STATS o");
    assert_eq!(
        alice.drain(),
        vec![
            ":irc.test 243 alice O *@127.0.0.1 * root",
            ":irc.test 219 alice o :End of STATS report",
        ]
    );

    engine.send(&mut alice, "STATS u");
    let lines = alice.drain();
    assert!(lines[0].starts_with(":irc.test 242 alice :Server Up 0 days 0:00:"));

    engine.send(&mut alice, "STATS l");
    let codes = alice.drain_codes();
    assert_eq!(codes.iter().filter(|c| **c == 211).count(), 1);
}

#[test]
fn disabled_commands() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "SUMMON bob");
    engine.send(&mut alice, "USERS");
    assert_eq!(
        alice.drain(),
        vec![
            ":irc.test 445 alice :SUMMON has been disabled",
            ":irc.test 446 alice :USERS has been disabled",
        ]
    );
}

#[test]
fn servlist_is_empty_without_services() {
    let engine = Engine::new();
    let mut alice = engine.register("alice");
    engine.send(&mut alice, "SERVLIST");
    assert_eq!(alice.drain_codes(), vec![235]);
}

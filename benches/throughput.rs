//! Dispatch throughput: lines in, fan-out to member queues.
//!
//! Everything runs in memory; output queues are drained between
//! iterations so that none of them fills up and starts dropping.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use parlance::config::Config;
use parlance::handlers::Dispatcher;
use parlance::state::{CommandReport, Link, ServerContext, Talker, User};
use tokio::sync::mpsc;

const CONFIG: &str = r#"
[server]
name = "irc.bench"

[listen]
address = "127.0.0.1:0"
"#;

struct Client {
    talker: Talker,
    rx: mpsc::Receiver<CommandReport>,
}

impl Client {
    fn drain(&mut self) -> usize {
        let mut n = 0;
        while self.rx.try_recv().is_ok() {
            n += 1;
        }
        n
    }
}

fn setup() -> (Arc<ServerContext>, Dispatcher) {
    let config = Config::parse(CONFIG).expect("bench config");
    (Arc::new(ServerContext::new(config, None)), Dispatcher::new())
}

fn client(server: &ServerContext, dispatcher: &Dispatcher, nick: &str) -> Client {
    let (tx, rx) = mpsc::channel(4096);
    let link = Arc::new(Link::new(server.next_link_id(), None, "10.0.0.1".into(), tx));
    server.register_link(Arc::clone(&link));
    let mut talker = Talker::User(Arc::new(User::new(link, server.name())));
    dispatcher.dispatch(server, &mut talker, &format!("NICK {nick}"));
    dispatcher.dispatch(server, &mut talker, &format!("USER {nick} 0 * :{nick}"));
    let mut client = Client { talker, rx };
    client.drain();
    client
}

fn channel_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_privmsg");
    for members in [2usize, 16, 128] {
        let (server, dispatcher) = setup();
        let mut clients: Vec<Client> = (0..members)
            .map(|i| client(&server, &dispatcher, &format!("user{i}")))
            .collect();
        for client in &mut clients {
            dispatcher.dispatch(&server, &mut client.talker, "JOIN #bench");
        }
        for client in &mut clients {
            client.drain();
        }

        group.throughput(Throughput::Elements(members as u64 - 1));
        group.bench_with_input(BenchmarkId::from_parameter(members), &members, |b, _| {
            b.iter(|| {
                let (sender, rest) = clients.split_first_mut().expect("at least one member");
                dispatcher.dispatch(&server, &mut sender.talker, "PRIVMSG #bench :hello, world");
                let delivered: usize = rest.iter_mut().map(Client::drain).sum();
                black_box(delivered)
            })
        });
    }
    group.finish();
}

fn private_messages(c: &mut Criterion) {
    let (server, dispatcher) = setup();
    let mut alice = client(&server, &dispatcher, "alice");
    let mut bob = client(&server, &dispatcher, "bob");

    c.bench_function("privmsg/direct", |b| {
        b.iter(|| {
            dispatcher.dispatch(&server, &mut alice.talker, black_box("PRIVMSG bob :hi"));
            bob.drain()
        })
    });
}

fn rejected_lines(c: &mut Criterion) {
    let (server, dispatcher) = setup();
    let mut alice = client(&server, &dispatcher, "alice");

    let mut group = c.benchmark_group("rejected");
    for (name, line) in [
        ("unknown_command", "FROBNICATE x y z"),
        ("need_more_params", "KICK #nowhere"),
        ("no_such_channel", "PRIVMSG #nowhere :x"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                dispatcher.dispatch(&server, &mut alice.talker, black_box(line));
                alice.drain()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, channel_fanout, private_messages, rejected_lines);
criterion_main!(benches);

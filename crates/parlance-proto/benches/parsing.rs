//! Benchmarks for line tokenizing and mask matching.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parlance_proto::mask::matches;
use parlance_proto::mode::parse_channel_modes;
use parlance_proto::{Message, MessageRef, Prefix};

const PING: &str = "PING :irc.example.com";
const PRIVMSG: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";
const USER: &str = "USER guest 0 * :Ronnie Reagan";
const MODE: &str = "MODE #channel +ovl-b alice bob 25 *!*@spam.example.org";

fn tokenizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for (name, line) in [("ping", PING), ("privmsg", PRIVMSG), ("user", USER), ("mode", MODE)] {
        group.bench_function(name, |b| b.iter(|| MessageRef::parse(black_box(line))));
    }
    group.finish();
}

fn serializing(c: &mut Criterion) {
    let msg = Message::privmsg("#channel", "Hello, world!").with_prefix(Prefix::user("nick", "user", "host"));
    c.bench_function("serialize/privmsg", |b| b.iter(|| black_box(&msg).to_string()));
}

fn masks(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask");
    group.bench_function("host_suffix", |b| {
        b.iter(|| matches(black_box("*!*@*.example.org"), black_box("nick!user@a.b.example.org")))
    });
    group.bench_function("pathological", |b| {
        let text = "a".repeat(200);
        b.iter(|| matches(black_box("*a*a*a*a*a*b"), black_box(&text)))
    });
    group.finish();
}

fn modes(c: &mut Criterion) {
    let args = ["alice", "bob", "25", "*!*@spam.example.org"];
    c.bench_function("mode/channel", |b| {
        b.iter(|| parse_channel_modes(black_box("+ovl-b"), black_box(&args)))
    });
}

criterion_group!(benches, tokenizing, serializing, masks, modes);
criterion_main!(benches);

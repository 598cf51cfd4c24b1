//! End-to-end tests over TCP.

mod common;

use std::time::Duration;

use common::{TestClient, TestServer};

#[tokio::test]
async fn registration_over_tcp() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut client = TestClient::connect(&server.address(), "alice").await?;

    let lines = client.register().await?;
    assert!(lines[0].starts_with(":irc.test 001 alice :Welcome"), "{lines:?}");
    assert!(lines.last().is_some_and(|l| l.contains(" 376 ")));

    client.send_raw("PING :abc").await?;
    assert_eq!(client.recv().await?, ":irc.test PONG irc.test :abc");
    Ok(())
}

#[tokio::test]
async fn channel_message_over_tcp() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = TestClient::connect(&server.address(), "alice").await?;
    let mut bob = TestClient::connect(&server.address(), "bob").await?;
    alice.register().await?;
    bob.register().await?;

    alice.send_raw("JOIN #rust").await?;
    alice.recv_until(|l| l.contains(" 366 ")).await?;
    bob.send_raw("JOIN #rust").await?;
    bob.recv_until(|l| l.contains(" 366 ")).await?;
    assert_eq!(alice.recv().await?, ":bob!bob@127.0.0.1 JOIN #rust");

    bob.send_raw("PRIVMSG #rust :hello over the wire").await?;
    assert_eq!(
        alice.recv().await?,
        ":bob!bob@127.0.0.1 PRIVMSG #rust :hello over the wire"
    );
    Ok(())
}

#[tokio::test]
async fn quit_closes_the_connection() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut client = TestClient::connect(&server.address(), "alice").await?;
    client.register().await?;

    client.send_raw("QUIT :done").await?;
    assert_eq!(client.recv().await?, "ERROR :Closing Link: done");
    assert!(client.recv().await.is_err(), "socket should be closed");
    Ok(())
}

#[tokio::test]
async fn overlong_lines_are_dropped() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut client = TestClient::connect(&server.address(), "alice").await?;
    client.register().await?;

    let huge = format!("PRIVMSG alice :{}", "x".repeat(1024));
    client.send_raw(&huge).await?;
    client.send_raw("PING :still-here").await?;
    assert_eq!(client.recv().await?, ":irc.test PONG irc.test :still-here");
    Ok(())
}

#[tokio::test]
async fn registration_deadline() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut client = TestClient::connect(&server.address(), "slow").await?;
    client.send_raw("NICK slow").await?;

    let line = client.recv_timeout(Duration::from_secs(6)).await?;
    assert_eq!(line, "ERROR :Closing Link: Registration timeout");
    Ok(())
}

#[tokio::test]
async fn rehash_reloads_motd() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = TestClient::connect(&server.address(), "alice").await?;
    alice.register().await?;
    alice.send_raw("OPER root hunter2").await?;
    alice.recv_until(|l| l.contains(" 381 ")).await?;

    let updated = common::test_config("127.0.0.1:0").replace("Test Server", "Fresh MOTD");
    std::fs::write(server.config_path(), updated)?;

    alice.send_raw("REHASH").await?;
    let line = alice.recv().await?;
    assert!(line.starts_with(":irc.test 382 alice "), "{line}");

    alice.send_raw("MOTD").await?;
    let motd = alice.recv_until(|l| l.contains(" 376 ")).await?;
    assert!(motd.iter().any(|l| l == ":irc.test 372 alice :- Fresh MOTD"), "{motd:?}");
    Ok(())
}

#[tokio::test]
async fn die_stops_accepting() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = TestClient::connect(&server.address(), "alice").await?;
    alice.register().await?;
    alice.send_raw("OPER root hunter2").await?;
    alice.recv_until(|l| l.contains(" 381 ")).await?;

    alice.send_raw("DIE").await?;
    let notice = alice.recv().await?;
    assert_eq!(notice, ":irc.test NOTICE alice :Server terminating by request of alice");
    let lines = alice.recv_until(|l| l.starts_with("ERROR")).await?;
    assert_eq!(lines.last().map(String::as_str), Some("ERROR :Closing Link: Server shutting down"));
    assert!(server.context.is_down());
    Ok(())
}

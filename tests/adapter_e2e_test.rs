use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use matrix_shooter::adapter::{run_server, BroadcastNotifier, ServerConfig};
use matrix_shooter::core::{Milestone, Notifier};
use matrix_shooter::types::Button;

async fn start_server() -> (
    std::net::SocketAddr,
    mpsc::Receiver<Button>,
    mpsc::UnboundedSender<String>,
) {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_pending_commands: 8,
    };
    let (button_tx, button_rx) = mpsc::channel::<Button>(8);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<String>();
    let (ready_tx, ready_rx) = oneshot::channel();

    tokio::spawn(async move {
        let _ = run_server(config, button_tx, out_rx, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");
    (addr, button_rx, out_tx)
}

async fn recv_button(rx: &mut mpsc::Receiver<Button>) -> Button {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for button")
        .expect("button channel closed")
}

#[tokio::test]
async fn adapter_bytes_become_buttons() {
    let (addr, mut buttons, _out) = start_server().await;

    let mut stream = TcpStream::connect(addr).await.expect("connect failed");
    stream.write_all(b"L\nxR U").await.unwrap();
    stream.flush().await.unwrap();

    assert_eq!(recv_button(&mut buttons).await, Button::Left);
    assert_eq!(recv_button(&mut buttons).await, Button::Right);
    assert_eq!(recv_button(&mut buttons).await, Button::Fire);

    // Nothing else was queued.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(buttons.try_recv().is_err());
}

#[tokio::test]
async fn adapter_accepts_several_clients() {
    let (addr, mut buttons, _out) = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    a.write_all(b"L").await.unwrap();
    assert_eq!(recv_button(&mut buttons).await, Button::Left);
    b.write_all(b"R").await.unwrap();
    assert_eq!(recv_button(&mut buttons).await, Button::Right);
}

#[tokio::test]
async fn adapter_broadcasts_milestones_as_json_lines() {
    let (addr, mut buttons, out_tx) = start_server().await;

    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Round-trip one byte so the client is registered before broadcasting.
    write_half.write_all(b"U").await.unwrap();
    assert_eq!(recv_button(&mut buttons).await, Button::Fire);

    let mut notifier = BroadcastNotifier::new(out_tx);
    notifier.notify(Milestone::GameOver { score: 12 });

    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .expect("expected a notification line");
    assert_eq!(line, r#"{"type":"gameOver","score":12}"#);
    let v: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(v["score"], 12);
}

#[tokio::test]
async fn adapter_reports_bind_failure() {
    let (addr, _buttons, _out) = start_server().await;
    let config = ServerConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        max_pending_commands: 8,
    };
    let (button_tx, _rx) = mpsc::channel(1);
    let (_out_tx, out_rx) = mpsc::unbounded_channel();
    let result = run_server(config, button_tx, out_rx, None).await;
    assert!(result.is_err());
}

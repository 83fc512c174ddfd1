use std::future::Future;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use stevedore_engine::{MessageSeverity, SessionEvent, SessionHandle, SessionSettings};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

const EVENT_WAIT: Duration = Duration::from_secs(5);

type Backend = WebSocketStream<TcpStream>;

/// Run a fake import backend on its own thread and hand its url back.
/// The script gets the raw listener so tests can accept more than once.
fn spawn_backend<F, Fut>(script: F) -> String
where
    F: FnOnce(TcpListener) -> Fut + Send + 'static,
    Fut: Future<Output = ()>,
{
    let (addr_tx, addr_rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("backend runtime");
        runtime.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            let addr = listener.local_addr().expect("local addr");
            addr_tx.send(addr).expect("report addr");
            script(listener).await;
        });
    });
    let addr = addr_rx.recv().expect("backend addr");
    format!("ws://{addr}")
}

async fn accept(listener: &TcpListener) -> Backend {
    let (stream, _) = listener.accept().await.expect("accept");
    tokio_tungstenite::accept_async(stream)
        .await
        .expect("websocket handshake")
}

fn connect(url: String) -> SessionHandle {
    SessionHandle::connect(SessionSettings { socket_url: url })
}

fn next_event(handle: &SessionHandle) -> SessionEvent {
    handle.recv_timeout(EVENT_WAIT).expect("session event")
}

#[test]
fn session_opens_and_forwards_console_frames_until_stop() {
    let url = spawn_backend(|listener| async move {
        let mut backend = accept(&listener).await;
        backend
            .send(Message::Text(
                r#"{"type": "INFO", "message": "chunking a.txt"}"#.into(),
            ))
            .await
            .expect("send console frame");
        backend
            .send(Message::Text(r#"{"type": "STOP"}"#.into()))
            .await
            .expect("send stop frame");
        // Keep the connection up until the client has drained everything.
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let handle = connect(url);
    assert_eq!(next_event(&handle), SessionEvent::Opened);
    match next_event(&handle) {
        SessionEvent::Console(message) => {
            assert_eq!(message.severity, MessageSeverity::Info);
            assert_eq!(message.message, "chunking a.txt");
        }
        other => panic!("expected console event, got {other:?}"),
    }
    assert_eq!(next_event(&handle), SessionEvent::Finished);
}

#[test]
fn garbage_frames_produce_no_events() {
    let url = spawn_backend(|listener| async move {
        let mut backend = accept(&listener).await;
        backend
            .send(Message::Text("definitely not json".into()))
            .await
            .expect("send garbage");
        backend
            .send(Message::Text(
                r#"{"type": "SUCCESS", "message": "imported"}"#.into(),
            ))
            .await
            .expect("send console frame");
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let handle = connect(url);
    assert_eq!(next_event(&handle), SessionEvent::Opened);
    // The garbage frame is swallowed; the next event is the valid entry.
    match next_event(&handle) {
        SessionEvent::Console(message) => assert_eq!(message.message, "imported"),
        other => panic!("expected console event, got {other:?}"),
    }
}

#[test]
fn clean_close_is_reported_as_clean() {
    let url = spawn_backend(|listener| async move {
        let mut backend = accept(&listener).await;
        backend.close(None).await.expect("close handshake");
        tokio::time::sleep(Duration::from_millis(500)).await;
    });

    let handle = connect(url);
    assert_eq!(next_event(&handle), SessionEvent::Opened);
    assert_eq!(next_event(&handle), SessionEvent::Closed { clean: true });
}

#[test]
fn dropped_connection_is_reported_as_unclean() {
    let url = spawn_backend(|listener| async move {
        let backend = accept(&listener).await;
        // Drop without a close handshake.
        drop(backend);
    });

    let handle = connect(url);
    assert_eq!(next_event(&handle), SessionEvent::Opened);
    assert_eq!(next_event(&handle), SessionEvent::Closed { clean: false });
}

#[test]
fn send_after_close_fails_fast() {
    let url = spawn_backend(|listener| async move {
        let backend = accept(&listener).await;
        drop(backend);
    });

    let handle = connect(url);
    assert_eq!(next_event(&handle), SessionEvent::Opened);
    assert_eq!(next_event(&handle), SessionEvent::Closed { clean: false });

    handle.send(r#"{"config": {}}"#.to_string());
    assert_eq!(next_event(&handle), SessionEvent::SendFailed);
}

#[test]
fn explicit_reconnect_opens_a_fresh_socket() {
    let url = spawn_backend(|listener| async move {
        let backend = accept(&listener).await;
        drop(backend);

        // Second connection delivers a frame to prove it is live.
        let mut backend = accept(&listener).await;
        backend
            .send(Message::Text(
                r#"{"type": "INFO", "message": "back online"}"#.into(),
            ))
            .await
            .expect("send console frame");
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let handle = connect(url);
    assert_eq!(next_event(&handle), SessionEvent::Opened);
    assert_eq!(next_event(&handle), SessionEvent::Closed { clean: false });

    handle.reconnect();
    assert_eq!(next_event(&handle), SessionEvent::Opened);
    match next_event(&handle) {
        SessionEvent::Console(message) => assert_eq!(message.message, "back online"),
        other => panic!("expected console event, got {other:?}"),
    }
}

#[test]
fn import_payload_reaches_the_backend_verbatim() {
    let (payload_tx, payload_rx) = mpsc::channel::<String>();
    let url = spawn_backend(move |listener| async move {
        let mut backend = accept(&listener).await;
        if let Some(Ok(Message::Text(text))) = backend.next().await {
            payload_tx.send(text.to_string()).expect("forward payload");
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let handle = connect(url);
    assert_eq!(next_event(&handle), SessionEvent::Opened);

    handle.send(r#"{"config": {"RAG": {}}, "data": [], "textValues": []}"#.to_string());
    let received = payload_rx
        .recv_timeout(EVENT_WAIT)
        .expect("payload at backend");
    assert_eq!(
        received,
        r#"{"config": {"RAG": {}}, "data": [], "textValues": []}"#
    );
}

//! WebSocket push notifications.
//!
//! A [`PushSocket`] holds one callback. Every text frame is decoded as JSON
//! and handed to it; the event type given to [`PushSocket::on`] is recorded
//! for logging only and does not filter frames. Registering again replaces
//! the previous callback.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

use crate::error::Result;

type Callback = Arc<dyn Fn(Value) + Send + Sync>;

#[derive(Default)]
struct Slot {
    event_type: Option<String>,
    callback: Option<Callback>,
}

/// An open push connection.
///
/// Dropping the socket stops the reader and closes the connection.
pub struct PushSocket {
    uri: String,
    slot: Arc<Mutex<Slot>>,
    reader: JoinHandle<()>,
}

impl PushSocket {
    /// Open a WebSocket to `uri` and start reading from it.
    pub async fn connect(uri: &str) -> Result<Self> {
        let (mut stream, _) = connect_async(uri).await?;
        debug!(uri, "push socket connected");

        let slot = Arc::new(Mutex::new(Slot::default()));
        let reader_slot = Arc::clone(&slot);
        let reader_uri = uri.to_string();

        let reader = tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => deliver(&reader_slot, &text),
                    Ok(Message::Close(_)) => {
                        debug!(uri = %reader_uri, "push socket closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(uri = %reader_uri, error = %e, "push socket error");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            uri: uri.to_string(),
            slot,
            reader,
        })
    }

    /// Register the callback for incoming payloads, replacing any earlier one.
    pub fn on<F>(&self, event_type: &str, callback: F)
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.callback.is_some() {
            debug!(previous = ?slot.event_type, event_type, "replacing push callback");
        }
        slot.event_type = Some(event_type.to_string());
        slot.callback = Some(Arc::new(callback));
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// True once the server closed the connection or the reader failed.
    pub fn is_closed(&self) -> bool {
        self.reader.is_finished()
    }
}

impl fmt::Debug for PushSocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushSocket")
            .field("uri", &self.uri)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Drop for PushSocket {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

fn deliver(slot: &Mutex<Slot>, text: &str) {
    let payload: Value = match serde_json::from_str(text) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "skipping undecodable push message");
            return;
        }
    };

    // Invoke outside the lock so a callback may re-register.
    let callback = slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .callback
        .clone();
    match callback {
        Some(callback) => callback(payload),
        None => debug!("push message received before any callback was registered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::SinkExt;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::sync::{mpsc, oneshot};
    use tokio_tungstenite::accept_async;

    /// Serve one connection: wait for `go`, send `frames`, then close.
    async fn serve(frames: Vec<&'static str>) -> (String, oneshot::Sender<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (go_tx, go_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(tcp).await.unwrap();
            let _ = go_rx.await;
            for frame in frames {
                ws.send(Message::Text(frame.to_string())).await.unwrap();
            }
            let _ = ws.send(Message::Close(None)).await;
        });

        (format!("ws://{addr}"), go_tx)
    }

    #[tokio::test]
    async fn test_latest_callback_receives_every_message() {
        let (uri, go) = serve(vec![
            r#"{"type":"record","id":"r1"}"#,
            "not json",
            r#"{"type":"peer"}"#,
        ])
        .await;
        let socket = PushSocket::connect(&uri).await.unwrap();

        let first_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&first_calls);
        socket.on("record", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let (tx, mut rx) = mpsc::unbounded_channel();
        socket.on("peer", move |payload| {
            let _ = tx.send(payload);
        });
        go.send(()).unwrap();

        let mut received = Vec::new();
        for _ in 0..2 {
            let payload = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap();
            received.push(payload);
        }

        assert_eq!(
            received,
            vec![json!({"type": "record", "id": "r1"}), json!({"type": "peer"})]
        );
        assert_eq!(first_calls.load(Ordering::SeqCst), 0);
        assert_eq!(socket.uri(), uri);
    }

    #[tokio::test]
    async fn test_connect_failure_is_socket_error() {
        let err = PushSocket::connect("ws://127.0.0.1:1").await.err().unwrap();
        assert!(matches!(err, crate::error::ClientError::Socket(_)));
    }

    #[test]
    fn test_deliver_skips_invalid_json() {
        let slot = Mutex::new(Slot::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        slot.lock().unwrap().callback = Some(Arc::new(move |_: Value| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        deliver(&slot, "{broken");
        deliver(&slot, "[1,2]");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

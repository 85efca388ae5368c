//! Background feed subscriber.
//!
//! One thread per subscription. The thread owns the blocking HTTP stream,
//! frames it into SSE events, decodes each payload, and sends the result over
//! an mpsc channel. It exits when:
//! - a decode failure occurs (terminal),
//! - a transport failure occurs and reconnection is disabled,
//! - the receiver is dropped (UI teardown), or
//! - the shutdown flag is set.
//!
//! Transport failures otherwise trigger reconnection with capped exponential
//! backoff and full jitter.

use std::io::{BufRead, BufReader};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::model::{AssetSnapshot, FeedPayload};

use super::sse::EventParser;
use super::{FeedConfig, FeedError, FeedMessage};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const BACKOFF_BASE: Duration = Duration::from_secs(1);
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// Handle over a running subscription.
///
/// Dropping the handle (together with the receiver) requests shutdown without
/// blocking; the thread notices on its next send or shutdown check.
#[derive(Debug)]
pub struct FeedHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl FeedHandle {
    /// Requests shutdown and waits for the subscriber thread to exit.
    ///
    /// May wait for the current blocking read to return; `Drop` is the
    /// non-blocking alternative.
    pub fn stop(mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Handle with no thread behind it, for wiring providers to raw channels in
/// tests.
#[cfg(test)]
pub(crate) fn detached_handle() -> FeedHandle {
    FeedHandle {
        shutdown: Arc::new(AtomicBool::new(false)),
        thread: None,
    }
}

/// Spawns the subscriber thread for `config`.
pub fn spawn(config: FeedConfig) -> (FeedHandle, Receiver<FeedMessage>) {
    let (tx, rx) = mpsc::channel();
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    let thread = thread::spawn(move || run(config, tx, &flag));
    (
        FeedHandle {
            shutdown,
            thread: Some(thread),
        },
        rx,
    )
}

fn run(config: FeedConfig, tx: Sender<FeedMessage>, shutdown: &AtomicBool) {
    // The default client timeout would cut a long-lived stream; disable it
    // and bound only the connect phase.
    let client = match reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(None)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            let _ = tx.send(FeedMessage::Failed(err.into()));
            return;
        }
    };

    let mut attempt: u32 = 0;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return;
        }
        match stream_events(&client, &config.url, &tx, shutdown, &mut attempt) {
            Ok(()) => return,
            Err(err) if err.is_terminal() || !config.reconnect => {
                warn!("feed subscription ended: {err}");
                let _ = tx.send(FeedMessage::Failed(err));
                return;
            }
            Err(err) => {
                attempt += 1;
                let delay = backoff_delay(attempt);
                warn!(attempt, ?delay, "feed transport dropped: {err}");
                if tx.send(FeedMessage::Reconnecting { attempt, delay }).is_err() {
                    return;
                }
                if !sleep_interruptible(delay, shutdown) {
                    return;
                }
            }
        }
    }
}

/// Streams one connection until it drops, shutdown is requested, or the
/// receiver goes away. Resets `attempt` once the endpoint has answered.
fn stream_events(
    client: &reqwest::blocking::Client,
    url: &str,
    tx: &Sender<FeedMessage>,
    shutdown: &AtomicBool,
    attempt: &mut u32,
) -> Result<(), FeedError> {
    debug!(url, "connecting to feed");
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status));
    }
    *attempt = 0;
    info!(url, "feed connected");

    let reader = BufReader::new(response);
    let mut parser = EventParser::new();
    for line in reader.lines() {
        if shutdown.load(Ordering::Relaxed) {
            return Ok(());
        }
        let line = line?;
        let Some(payload) = parser.push_line(&line) else {
            continue;
        };
        let decoded: FeedPayload = serde_json::from_str(&payload)?;
        if tx
            .send(FeedMessage::Snapshot(AssetSnapshot::now(decoded.data)))
            .is_err()
        {
            // Receiver dropped: the UI has torn down.
            return Ok(());
        }
    }
    Err(FeedError::StreamClosed)
}

/// Exponential backoff with full jitter: uniform over
/// `0..=min(base * 2^(attempt-1), cap)`.
fn backoff_delay(attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    let ceiling = BACKOFF_BASE
        .saturating_mul(1u32 << exp)
        .min(BACKOFF_CAP)
        .as_millis() as u64;
    Duration::from_millis(rand::rng().random_range(0..=ceiling))
}

/// Sleeps in short slices so shutdown interrupts the wait.
/// Returns `false` if shutdown was requested.
fn sleep_interruptible(delay: Duration, shutdown: &AtomicBool) -> bool {
    const SLICE: Duration = Duration::from_millis(100);
    let mut remaining = delay;
    while !remaining.is_zero() {
        if shutdown.load(Ordering::Relaxed) {
            return false;
        }
        let step = remaining.min(SLICE);
        thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
    !shutdown.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::time::Duration;

    const RECV_TIMEOUT: Duration = Duration::from_secs(10);

    fn read_request(stream: &mut TcpStream) {
        let mut buf = [0u8; 1024];
        let mut request = Vec::new();
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                return;
            }
        }
    }

    fn write_header(stream: &mut TcpStream) {
        stream
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  Content-Type: text/event-stream\r\n\
                  Connection: close\r\n\r\n",
            )
            .unwrap();
    }

    /// Serves one connection: sends `events` (already SSE-framed) then closes.
    fn serve_events(events: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            write_header(&mut stream);
            for event in events {
                stream.write_all(event.as_bytes()).unwrap();
            }
        });
        format!("http://{addr}/api/crypto/assets")
    }

    fn snapshot_event(json: &str) -> String {
        format!("data: {json}\n\n")
    }

    #[test]
    fn delivers_each_snapshot_then_reports_stream_close() {
        let url = serve_events(vec![
            snapshot_event(r#"{"data":[{"name":"Bitcoin","priceUsd":"1.5"}]}"#),
            snapshot_event(r#"{"data":[{"name":"Ethereum","priceUsd":"0.25"}]}"#),
        ]);
        let (_handle, rx) = spawn(FeedConfig {
            url,
            reconnect: false,
        });

        let first = rx.recv_timeout(RECV_TIMEOUT).unwrap();
        match first {
            FeedMessage::Snapshot(s) => assert_eq!(s.assets[0].name, "Bitcoin"),
            other => panic!("expected snapshot, got {other:?}"),
        }
        let second = rx.recv_timeout(RECV_TIMEOUT).unwrap();
        match second {
            FeedMessage::Snapshot(s) => assert_eq!(s.assets[0].name, "Ethereum"),
            other => panic!("expected snapshot, got {other:?}"),
        }
        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            FeedMessage::Failed(FeedError::StreamClosed) => {}
            other => panic!("expected stream-closed failure, got {other:?}"),
        }
    }

    #[test]
    fn decode_failure_is_terminal_even_with_reconnect_enabled() {
        let url = serve_events(vec![
            snapshot_event("this is not json"),
            snapshot_event(r#"{"data":[{"name":"Bitcoin"}]}"#),
        ]);
        let (_handle, rx) = spawn(FeedConfig {
            url,
            reconnect: true,
        });

        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            FeedMessage::Failed(err) => assert!(err.is_terminal()),
            other => panic!("expected terminal failure, got {other:?}"),
        }
        // The thread stopped: the well-formed event that followed is never
        // delivered and the channel closes.
        assert!(matches!(
            rx.recv_timeout(RECV_TIMEOUT),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn http_error_status_reported_without_reconnect() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            stream
                .write_all(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\n\r\n")
                .unwrap();
        });

        let (_handle, rx) = spawn(FeedConfig {
            url: format!("http://{addr}/api/crypto/assets"),
            reconnect: false,
        });
        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            FeedMessage::Failed(FeedError::Status(status)) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[test]
    fn dropped_receiver_stops_the_thread() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            write_header(&mut stream);
            // Keep sending until the subscriber goes away.
            loop {
                let event = snapshot_event(r#"{"data":[]}"#);
                if stream.write_all(event.as_bytes()).is_err() {
                    return;
                }
                thread::sleep(Duration::from_millis(10));
            }
        });

        let (handle, rx) = spawn(FeedConfig {
            url: format!("http://{addr}/api/crypto/assets"),
            reconnect: true,
        });
        // Wait for the stream to be up, then tear down the receiving side.
        let _ = rx.recv_timeout(RECV_TIMEOUT).unwrap();
        drop(rx);

        // stop() joins: completes only because the thread exits on send error.
        handle.stop();
    }

    #[test]
    fn backoff_stays_within_cap() {
        for attempt in 1..10 {
            for _ in 0..32 {
                let delay = backoff_delay(attempt);
                assert!(delay <= BACKOFF_CAP);
            }
        }
        // First attempt is bounded by the base.
        for _ in 0..32 {
            assert!(backoff_delay(1) <= BACKOFF_BASE);
        }
    }
}

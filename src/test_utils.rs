//! Test helpers: a single-connection HTTP stub for exercising the upstream clients.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Accepts one connection on a random local port, records the request head,
/// and answers with a canned response (or never answers, for timeout tests).
pub struct StubServer {
    pub base_url: String,
    requests: Receiver<String>,
}

impl StubServer {
    /// Reply once with `status` and a JSON `body`, then close the connection
    pub fn respond(status: u16, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {status} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        Self::spawn(Some(response), Duration::ZERO)
    }

    /// Read the request and then stay silent for `hold` before closing
    pub fn silent(hold: Duration) -> Self {
        Self::spawn(None, hold)
    }

    fn spawn(response: Option<String>, hold: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let head = read_request_head(&mut stream);
            let _ = tx.send(head);
            match response {
                Some(response) => {
                    let _ = stream.write_all(response.as_bytes());
                    let _ = stream.flush();
                }
                None => thread::sleep(hold),
            }
        });

        StubServer {
            base_url: format!("http://{addr}"),
            requests: rx,
        }
    }

    /// Request line and headers of the request the stub received
    pub fn request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub server received no request")
    }
}

fn read_request_head(stream: &mut impl Read) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

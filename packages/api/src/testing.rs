//! Fakes shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::client::HardRedirect;
use crate::error::ApiError;
use crate::models::UserUpsert;
use crate::retry::Sleep;
use crate::session::SessionBackend;

#[derive(Clone, Default)]
pub struct RecordingRedirect {
    paths: Rc<RefCell<Vec<String>>>,
}

impl RecordingRedirect {
    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }
}

impl HardRedirect for RecordingRedirect {
    fn hard_redirect(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_string());
    }
}

/// Returns immediately, remembering how long it was asked to wait.
#[derive(Clone, Default)]
pub struct RecordingSleep {
    delays: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleep {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> {
        self.delays.borrow_mut().push(duration);
        std::future::ready(())
    }
}

/// Backend whose token exchange replays a script; an empty script fails.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    tokens: Rc<RefCell<VecDeque<Result<String, ApiError>>>>,
    upserts: Rc<RefCell<Vec<UserUpsert>>>,
    exchanges: Rc<Cell<u32>>,
    fail_upserts: bool,
}

impl ScriptedBackend {
    pub fn tokens<'a>(self, script: impl IntoIterator<Item = Result<&'a str, ApiError>>) -> Self {
        self.tokens
            .borrow_mut()
            .extend(script.into_iter().map(|r| r.map(str::to_string)));
        self
    }

    pub fn failing_upserts(mut self) -> Self {
        self.fail_upserts = true;
        self
    }

    pub fn upserts(&self) -> Vec<UserUpsert> {
        self.upserts.borrow().clone()
    }

    pub fn exchanges(&self) -> u32 {
        self.exchanges.get()
    }
}

impl SessionBackend for ScriptedBackend {
    async fn upsert_user(&self, user: &UserUpsert) -> Result<(), ApiError> {
        self.upserts.borrow_mut().push(user.clone());
        if self.fail_upserts {
            return Err(ApiError::Status {
                status: 500,
                message: "database unavailable".to_string(),
            });
        }
        Ok(())
    }

    async fn exchange_token(&self, _email: &str) -> Result<String, ApiError> {
        self.exchanges.set(self.exchanges.get() + 1);
        let next = self.tokens.borrow_mut().pop_front();
        next.unwrap_or_else(|| Err(ApiError::Network("connection refused".to_string())))
    }
}

/// A one-shot HTTP server on localhost that answers each connection with the
/// next scripted `(status, body)` pair and records the request targets.
#[cfg(not(target_arch = "wasm32"))]
pub struct ScriptedHttp {
    pub base_url: String,
    targets: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ScriptedHttp {
    pub async fn serve(replies: Vec<(u16, &'static str)>) -> Self {
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let targets = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = targets.clone();

        tokio::spawn(async move {
            for (status, body) in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                let target = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or_default()
                    .to_string();
                seen.lock().unwrap().push(target);

                let response = format!(
                    "HTTP/1.1 {status} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            targets,
        }
    }

    /// Request targets (path and query) in arrival order.
    pub fn paths(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    use tokio::io::AsyncReadExt;

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#![expect(dead_code)]

use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

/// One canned answer.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: body.to_owned(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_owned(),
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Routes keyed by `"METHOD /path"` or `"/path"`. Each route replays its
/// replies in order and keeps repeating the last one. Unknown routes answer
/// `200 null`, like the real service.
#[derive(Debug, Default)]
pub struct Script {
    routes: HashMap<String, Vec<Reply>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, key: &str, replies: Vec<Reply>) -> Self {
        self.routes.insert(key.to_owned(), replies);
        self
    }
}

#[derive(Debug, Default)]
struct State {
    script: Script,
    hits: HashMap<String, usize>,
}

pub struct ServerHandle {
    base_url: String,
    state: Arc<Mutex<State>>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ServerHandle {
    /// Base URL including the `/v0` prefix.
    pub fn base_url(&self) -> String {
        format!("{}/v0", self.base_url)
    }

    /// Requests seen for `path` (any method).
    pub fn hits(&self, path: &str) -> usize {
        self.state
            .lock()
            .map(|state| state.hits.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a scripted HTTP server for tests.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_scripted_server(script: Script) -> Result<ServerHandle, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let state = Arc::new(Mutex::new(State {
        script,
        hits: HashMap::new(),
    }));
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let server_state = Arc::clone(&state);
    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let state = Arc::clone(&server_state);
                    thread::spawn(move || handle_client(stream, &state));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok(ServerHandle {
        base_url: format!("http://{}", addr),
        state,
        shutdown: shutdown_tx,
        thread: Some(handle),
    })
}

/// Like [`spawn_scripted_server`], but skips when sockets are not permitted.
///
/// # Errors
///
/// Returns an error if the server fails for any other reason.
pub fn spawn_scripted_server_or_skip(script: Script) -> Result<Option<ServerHandle>, String> {
    match spawn_scripted_server(script) {
        Ok(server) => Ok(Some(server)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(stream: TcpStream, state: &Mutex<State>) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Some((method, path)) = read_request(&stream) else {
        return;
    };
    let reply = next_reply(state, &method, &path);
    if !reply.delay.is_zero() {
        thread::sleep(reply.delay);
    }
    write_reply(stream, &reply);
}

fn read_request(stream: &TcpStream) -> Option<(String, String)> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_owned();
    let path = parts.next()?.to_owned();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).ok()?;
        if read == 0 || line == "\r\n" || line == "\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.trim().eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).ok()?;
    }
    Some((method, path))
}

fn next_reply(state: &Mutex<State>, method: &str, path: &str) -> Reply {
    let Ok(mut state) = state.lock() else {
        return Reply::text(500, "poisoned");
    };
    let seen = {
        let counter = state.hits.entry(path.to_owned()).or_insert(0);
        *counter = counter.saturating_add(1);
        *counter
    };
    let keyed = format!("{} {}", method, path);
    let replies = state
        .script
        .routes
        .get(&keyed)
        .or_else(|| state.script.routes.get(path));
    match replies {
        Some(replies) => replies
            .get(seen.saturating_sub(1))
            .or_else(|| replies.last())
            .cloned()
            .unwrap_or_else(|| Reply::json(200, "null")),
        None => Reply::json(200, "null"),
    }
}

fn write_reply(mut stream: TcpStream, reply: &Reply) {
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reason(reply.status),
        reply.content_type,
        reply.body.len()
    );
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    if stream.write_all(reply.body.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        410 => "Gone",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Run the `hnprobe` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_hnprobe<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = hnprobe_bin()?;
    let mut command = Command::new(bin);
    for var in [
        "HNPROBE_ENV",
        "HNPROBE_BASE_URL",
        "HNPROBE_TIMEOUT",
        "HNPROBE_RETRIES",
        "HNPROBE_BACKOFF",
        "HNPROBE_CONFIG",
        "HNPROBE_JOBS",
        "HNPROBE_REPORT_DIR",
        "HNPROBE_REPORT_FORMAT",
    ] {
        command.env_remove(var);
    }
    command
        .args(args)
        .env("HNPROBE_LOG", "error")
        .output()
        .map_err(|err| format!("run hnprobe failed: {}", err))
}

fn hnprobe_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_hnprobe").map_or_else(
        || Err("CARGO_BIN_EXE_hnprobe missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

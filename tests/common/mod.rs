#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use webshell_harness::api::{ApiClient, routes};
use webshell_harness::harness::Fixtures;
use webshell_harness::http::HttpClient;
use webshell_harness::{Credentials, HarnessConfig, SessionClient};

pub const SESSION_KEY: &str = "key-0123456789";
pub const HOME_PATH: &str = "/home/root";
pub const PASSWORD: &str = "hunter2";

/// Logged-out client pointed at `server`, without connect retries.
pub fn client_for(server: &MockServer) -> SessionClient {
    let http = HttpClient::with_timeout(Duration::from_secs(5)).unwrap();
    SessionClient::with_api(ApiClient::with_http(&server.uri(), http, 0))
}

/// Logged-out client for `base_url` whose requests time out after `timeout`.
pub fn client_with_timeout(base_url: &str, timeout: Duration) -> SessionClient {
    let http = HttpClient::with_timeout(timeout).unwrap();
    SessionClient::with_api(ApiClient::with_http(base_url, http, 0))
}

/// Serve one connection by hand: read the request head, then write each
/// chunk after its delay and close. Returns the base URL.
pub fn serve_raw(chunks: Vec<(Duration, Vec<u8>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while find(&head, b"\r\n\r\n", 0).is_none() {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        for (delay, bytes) in chunks {
            thread::sleep(delay);
            if stream.write_all(&bytes).and_then(|_| stream.flush()).is_err() {
                return;
            }
        }
    });
    format!("http://{addr}")
}

/// Response head advertising `length` body bytes.
pub fn response_head(length: usize) -> Vec<u8> {
    format!("HTTP/1.1 200 OK\r\nContent-Length: {length}\r\nConnection: close\r\n\r\n")
        .into_bytes()
}

pub fn credentials() -> Credentials {
    Credentials::new("default", "root", PASSWORD, "127.0.0.1")
}

pub fn config_for(server: &MockServer, local_dir: &std::path::Path) -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.server.base_url = server.uri();
    config.ssh = credentials();
    config.test_paths.upload_source = local_dir.join("pic.png");
    config.test_paths.download_target = local_dir.join("downloaded_test.txt");
    config
}

pub fn fixtures_for(config: &HarnessConfig) -> Fixtures {
    Fixtures::from_config(config)
}

/// Route paths of every request the server saw, in order.
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

pub fn header<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

fn query(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Body of the multipart field `name`.
pub fn multipart_field(request: &Request, name: &str) -> Option<Vec<u8>> {
    let content_type = header(request, "content-type")?;
    let boundary = content_type.split("boundary=").nth(1)?.trim_matches('"');
    let delimiter = format!("--{boundary}");
    let marker = format!("name=\"{name}\"");
    let body = &request.body;

    let mut cursor = find(body, delimiter.as_bytes(), 0)?;
    loop {
        let start = cursor + delimiter.len();
        let next = find(body, delimiter.as_bytes(), start)?;
        let part = &body[start..next];
        if let Some(split) = find(part, b"\r\n\r\n", 0) {
            let headers = String::from_utf8_lossy(&part[..split]);
            if headers.contains(&marker) {
                let content = &part[split + 4..];
                let content = content.strip_suffix(b"\r\n").unwrap_or(content);
                return Some(content.to_vec());
            }
        }
        cursor = next;
    }
}

fn error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "error": message }))
}

fn ok(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "message": message }))
}

#[derive(Default)]
struct Store {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    session_open: bool,
}

/// In-memory stand-in for the webshell service.
///
/// Accepts only [`PASSWORD`], issues [`SESSION_KEY`] and rejects file
/// operations that do not carry it.
#[derive(Clone, Default)]
pub struct FakeWebshell {
    store: Arc<Mutex<Store>>,
}

impl FakeWebshell {
    pub async fn mount(server: &MockServer) -> Self {
        let fake = Self::default();
        Mock::given(any())
            .respond_with(fake.clone())
            .mount(server)
            .await;
        fake
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.store.lock().unwrap().files.get(path).cloned()
    }

    pub fn put_file(&self, path: &str, data: &[u8]) {
        self.store
            .lock()
            .unwrap()
            .files
            .insert(path.to_string(), data.to_vec());
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.store.lock().unwrap().dirs.contains(path)
    }

    pub fn session_open(&self) -> bool {
        self.store.lock().unwrap().session_open
    }

    fn login(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        if body["password"] != PASSWORD {
            return error(401, "authentication failed");
        }
        self.store.lock().unwrap().session_open = true;
        ResponseTemplate::new(201).set_body_json(json!({
            "session_key": SESSION_KEY,
            "home_path": HOME_PATH,
        }))
    }

    fn logout(&self, request: &Request) -> ResponseTemplate {
        let mut store = self.store.lock().unwrap();
        if header(request, routes::LOGOUT_SESSION_HEADER) != Some(SESSION_KEY) || !store.session_open {
            return error(401, "invalid session");
        }
        store.session_open = false;
        ok("logout success")
    }

    fn files(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let path = body["path"].as_str().unwrap_or_default().to_string();
        let mut store = self.store.lock().unwrap();

        match request.method.as_str() {
            "GET" => {
                let dir = query(request, "path").unwrap_or_default();
                let prefix = format!("{}/", dir.trim_end_matches('/'));
                let entries: Vec<&String> = store
                    .files
                    .keys()
                    .chain(store.dirs.iter())
                    .filter(|p| p.starts_with(&prefix))
                    .collect();
                ResponseTemplate::new(200).set_body_json(json!({ "files": entries }))
            }
            "POST" => {
                if body["type"] == "dir" {
                    store.dirs.insert(path);
                } else {
                    store.files.entry(path).or_default();
                }
                ok("created")
            }
            "DELETE" => {
                let removed = if body["type"] == "dir" {
                    store.dirs.remove(&path)
                } else {
                    store.files.remove(&path).is_some()
                };
                if removed {
                    ok("deleted")
                } else {
                    error(404, "file not found")
                }
            }
            "PUT" => {
                let old = body["old_path"].as_str().unwrap_or_default();
                let new = body["new_path"].as_str().unwrap_or_default();
                match store.files.remove(old) {
                    Some(data) => {
                        store.files.insert(new.to_string(), data);
                        ok("renamed")
                    }
                    None => error(404, "file not found"),
                }
            }
            _ => error(405, "method not allowed"),
        }
    }

    fn transfer(&self, request: &Request, keep_source: bool) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let src = body["src_path"].as_str().unwrap_or_default();
        let dst = body["dst_path"].as_str().unwrap_or_default().to_string();
        let mut store = self.store.lock().unwrap();
        let data = if keep_source {
            store.files.get(src).cloned()
        } else {
            store.files.remove(src)
        };
        match data {
            Some(data) => {
                store.files.insert(dst, data);
                ok("done")
            }
            None => error(404, "file not found"),
        }
    }

    fn content(&self, request: &Request) -> ResponseTemplate {
        let mut store = self.store.lock().unwrap();
        if request.method.as_str() == "POST" {
            let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
            let path = body["path"].as_str().unwrap_or_default().to_string();
            let content = body["content"].as_str().unwrap_or_default();
            store.files.insert(path, content.as_bytes().to_vec());
            return ok("written");
        }
        let path = query(request, "path").unwrap_or_default();
        match store.files.get(&path) {
            Some(data) => ResponseTemplate::new(200).set_body_json(json!({
                "content": String::from_utf8_lossy(data),
            })),
            None => error(404, "file not found"),
        }
    }

    fn upload(&self, request: &Request) -> ResponseTemplate {
        let field = |name: &str| {
            multipart_field(request, name)
                .map(|v| String::from_utf8_lossy(&v).into_owned())
                .unwrap_or_default()
        };
        let path = field("path");
        let offset: usize = field("offset").parse().unwrap_or(0);
        let update = field("update") == "true";
        let Some(data) = multipart_field(request, "file") else {
            return error(400, "missing file part");
        };

        let mut store = self.store.lock().unwrap();
        if store.files.contains_key(&path) && !update {
            return error(409, "file exists");
        }
        let existing = store.files.entry(path.clone()).or_default();
        existing.truncate(offset);
        existing.extend_from_slice(&data);
        ResponseTemplate::new(200).set_body_json(json!({
            "message": "upload success",
            "path": path,
            "size": existing.len(),
        }))
    }

    fn download(&self, request: &Request) -> ResponseTemplate {
        let path = query(request, "path").unwrap_or_default();
        match self.store.lock().unwrap().files.get(&path) {
            Some(data) => ResponseTemplate::new(200).set_body_bytes(data.clone()),
            None => error(404, "file not found"),
        }
    }

    fn attr(&self, request: &Request) -> ResponseTemplate {
        let path = query(request, "path").unwrap_or_default();
        match self.store.lock().unwrap().files.get(&path) {
            Some(data) => ResponseTemplate::new(200).set_body_json(json!({
                "path": path,
                "size": data.len(),
                "type": "file",
            })),
            None => error(404, "file not found"),
        }
    }
}

impl Respond for FakeWebshell {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match request.url.path() {
            routes::LOGIN => return self.login(request),
            routes::LOGOUT => return self.logout(request),
            _ => {}
        }
        if header(request, routes::SESSION_HEADER) != Some(SESSION_KEY) || !self.session_open() {
            return error(401, "invalid session");
        }

        match request.url.path() {
            routes::FILES => self.files(request),
            routes::COPY => self.transfer(request, true),
            routes::MOVE => self.transfer(request, false),
            routes::CONTENT => self.content(request),
            routes::TRANSMISSION => self.upload(request),
            routes::DOWNLOAD => self.download(request),
            routes::ATTR => self.attr(request),
            routes::CHMOD | routes::CHOWN | routes::EXECUTE => ok("done"),
            routes::QUOTA => ResponseTemplate::new(200).set_body_json(json!({
                "used": 1024,
                "total": 1048576,
            })),
            _ => error(404, "no such route"),
        }
    }
}

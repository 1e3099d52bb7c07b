use phishcheck::config::{AppConfig, AuthConfig, ServerConfig};
use phishcheck::web::ShutdownHandle;
use phishcheck::WebServer;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl HttpResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn start_server() -> (SocketAddr, ShutdownHandle, thread::JoinHandle<()>) {
    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        auth: AuthConfig {
            username: "analyst".to_string(),
            password: Some("t0ps3cret".to_string()),
        },
    };
    let server = WebServer::bind(&config).unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let handle = thread::spawn(move || server.run());
    (addr, shutdown, handle)
}

fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    cookie: Option<&str>,
    body: &str,
) -> HttpResponse {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let mut raw = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nContent-Length: {}\r\n",
        method,
        path,
        addr,
        body.len()
    );
    if !body.is_empty() {
        raw.push_str("Content-Type: application/x-www-form-urlencoded\r\n");
    }
    if let Some(cookie) = cookie {
        raw.push_str(&format!("Cookie: {}\r\n", cookie));
    }
    raw.push_str("\r\n");
    raw.push_str(body);
    stream.write_all(raw.as_bytes()).unwrap();

    read_response(&mut stream)
}

fn read_response(stream: &mut TcpStream) -> HttpResponse {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let status: u16 = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let body =
        String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();
    HttpResponse {
        status,
        headers,
        body,
    }
}

fn session_cookie(response: &HttpResponse) -> String {
    let set_cookie = response.header("Set-Cookie").expect("Set-Cookie header");
    set_cookie.split(';').next().unwrap().to_string()
}

#[test]
fn login_scan_logout_over_http() {
    let (addr, shutdown, handle) = start_server();

    let response = request(addr, "GET", "/detector", None, "");
    assert_eq!(response.status, 302);
    assert_eq!(response.header("Location"), Some("/"));

    let response = request(addr, "POST", "/", None, "username=analyst&password=nope");
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Invalid username or password"));

    let response = request(addr, "POST", "/", None, "username=analyst&password=t0ps3cret");
    assert_eq!(response.status, 302);
    assert_eq!(response.header("Location"), Some("/detector"));
    let cookie = session_cookie(&response);

    let email = "email=Please+login+immediately+at+http%3A%2F%2Fsecure-login.example.com%2Freset";
    let response = request(addr, "POST", "/detector", Some(cookie.as_str()), email);
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Suspicious URLs"));
    assert!(response.body.contains("immediately, login"));
    assert!(response.body.contains("MEDIUM"));
    assert!(response
        .header("Content-Type")
        .unwrap()
        .starts_with("text/html"));

    let response = request(addr, "GET", "/logout", Some(cookie.as_str()), "");
    assert_eq!(response.status, 302);

    let response = request(addr, "GET", "/detector", Some(cookie.as_str()), "");
    assert_eq!(response.status, 302);

    shutdown.shutdown();
    handle.join().unwrap();
}

#[test]
fn unknown_path_is_not_found() {
    let (addr, shutdown, handle) = start_server();

    let response = request(addr, "GET", "/missing?x=1", None, "");
    assert_eq!(response.status, 404);

    shutdown.shutdown();
    handle.join().unwrap();
}

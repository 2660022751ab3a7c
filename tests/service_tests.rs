//! The translation service over a real socket.

use std::net::SocketAddr;
use std::time::Duration;

use pyjs::service::{self, CompileRequest, CompileResponse, ServiceConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start(config: ServiceConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServiceConfig { addr, ..config };
    tokio::spawn(service::serve_listener(listener, config));
    addr
}

async fn start_default() -> SocketAddr {
    start(ServiceConfig {
        timeout: Duration::from_secs(5),
        ..ServiceConfig::default()
    })
    .await
}

struct Reply {
    status: u16,
    /// Lowercased status line and headers.
    head: String,
    body: String,
}

impl Reply {
    fn frame(&self) -> CompileResponse {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Send one HTTP/1.1 request and read the whole reply.
async fn send(addr: SocketAddr, method: &str, headers: &[&str], body: &str) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let mut request = format!(
        "{method} /compile HTTP/1.1\r\n\
         Host: localhost\r\n\
         Connection: close\r\n\
         Content-Length: {}\r\n",
        body.len()
    );
    for header in headers {
        request.push_str(header);
        request.push_str("\r\n");
    }
    request.push_str("\r\n");
    request.push_str(body);
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    Reply {
        status,
        head: head.to_ascii_lowercase(),
        body: body.to_string(),
    }
}

async fn compile(addr: SocketAddr, body: &str) -> Reply {
    send(addr, "POST", &["Content-Type: application/json"], body).await
}

#[tokio::test]
async fn compile_endpoint() {
    let addr = start_default().await;

    let ok = compile(addr, r#"{"code": "x = 5\nprint(x)\n"}"#).await;
    assert_eq!(ok.status, 200);
    assert_eq!(
        ok.frame(),
        CompileResponse::success("let x = 5;\nconsole.log(x);\n".to_string())
    );

    let rejected = compile(addr, r#"{"code": "print(y)\n"}"#).await;
    assert_eq!(rejected.status, 200);
    let rejected = rejected.frame();
    assert_eq!(rejected.output_code, "");
    assert_eq!(
        rejected.error.as_deref(),
        Some("<input>:1:7: undefined name 'y'")
    );
}

#[tokio::test]
async fn malformed_bodies_get_an_error_frame() {
    let addr = start_default().await;

    let malformed = compile(addr, "{not json").await.frame();
    assert!(malformed.error.unwrap().starts_with("malformed request"));

    let again = compile(addr, r#"{"code": "pass\n"}"#).await.frame();
    assert!(again.is_success());
}

#[tokio::test]
async fn oversized_bodies_are_refused() {
    let addr = start(ServiceConfig {
        max_body_bytes: 64,
        ..ServiceConfig::default()
    })
    .await;

    let code = "x = 1\\n".repeat(40);
    let reply = compile(addr, &format!(r#"{{"code": "{code}"}}"#)).await;
    assert_eq!(reply.status, 413);
    assert!(reply.frame().error.unwrap().starts_with("request rejected"));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let addr = start_default().await;

    let reply = send(
        addr,
        "POST",
        &["Content-Type: application/json", "Origin: http://localhost:3000"],
        r#"{"code": "pass\n"}"#,
    )
    .await;
    assert_eq!(reply.status, 200);
    assert!(reply.head.contains("access-control-allow-origin: *"));

    let preflight = send(
        addr,
        "OPTIONS",
        &[
            "Origin: http://localhost:3000",
            "Access-Control-Request-Method: POST",
            "Access-Control-Request-Headers: content-type",
        ],
        "",
    )
    .await;
    assert_eq!(preflight.status, 200);
    assert!(preflight.head.contains("access-control-allow-origin: *"));
}

#[tokio::test]
async fn requests_are_independent() {
    let addr = start_default().await;

    let a = compile(addr, r#"{"code": "a = 1\n"}"#).await.frame();
    let b = compile(addr, r#"{"code": "print(a)\n"}"#).await.frame();
    assert!(a.is_success());
    assert!(!b.is_success());
}

#[tokio::test]
async fn only_post_is_routed() {
    let addr = start_default().await;
    let reply = send(addr, "GET", &[], "").await;
    assert_eq!(reply.status, 405);
}

#[test]
fn translation_errors_use_the_error_display() {
    let response = service::handle(&CompileRequest {
        code: "for a, b in []:\n    pass\n".to_string(),
    });
    assert_eq!(response.output_code, "");
    assert!(response.error.unwrap().contains("unsupported construct"));
}

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use watchly_models::{MediaKind, MediaType};
use watchly_sources::{RemoteCatalogClient, TransportError, WatchmodeClient};

/// Accept one connection, capture the request head, answer with a canned response.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1/", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).to_string()
    });

    (base_url, handle)
}

fn client(base_url: &str, timeout: Duration) -> WatchmodeClient {
    WatchmodeClient::new(base_url, "test-key".to_string(), timeout, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_list_items_sends_type_and_api_key() {
    let body = r#"{"titles":[{"id":10,"title":"Heat","year":1995,"type":"movie"},{"id":11,"title":"Ronin","year":1998,"type":"movie"}],"page":1,"total_pages":1,"total_results":2}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let items = client(&base_url, Duration::from_secs(5))
        .list_items(MediaKind::Movie)
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 10);
    assert_eq!(items[1].title, "Ronin");
    assert_eq!(items[1].media_type, MediaType::Movie);

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /v1/list-titles?"), "{}", request_line);
    assert!(request_line.contains("types=movie"));
    assert!(request_line.contains("apiKey=test-key"));
}

#[tokio::test]
async fn test_list_items_tv_series_query() {
    let (base_url, server) = serve_once("200 OK", r#"{"titles":[]}"#).await;

    let items = client(&base_url, Duration::from_secs(5))
        .list_items(MediaKind::TvSeries)
        .await
        .unwrap();
    assert!(items.is_empty());

    let request = server.await.unwrap();
    assert!(request.lines().next().unwrap().contains("types=tv_series"));
}

#[tokio::test]
async fn test_detail_path_and_parse() {
    let body = r#"{"id":42,"title":"The Answer","type":"movie","runtime_minutes":90,"user_rating":7.5}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let detail = client(&base_url, Duration::from_secs(5)).get_item_detail(42).await.unwrap();
    assert_eq!(detail.id, 42);
    assert_eq!(detail.runtime_minutes, Some(90));
    assert_eq!(detail.user_rating, Some(7.5));

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /v1/title/42/details?apiKey=test-key"));
}

#[tokio::test]
async fn test_detail_http_status_is_reported() {
    let (base_url, _server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let err = client(&base_url, Duration::from_secs(5)).get_item_detail(42).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    match err {
        TransportError::Http { body, .. } => assert!(body.contains("boom")),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limited_status() {
    let (base_url, _server) = serve_once("429 Too Many Requests", "{}").await;

    let err = client(&base_url, Duration::from_secs(5))
        .list_items(MediaKind::Movie)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(429));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (base_url, _server) = serve_once("200 OK", "not json").await;

    let err = client(&base_url, Duration::from_secs(5)).get_item_detail(1).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)), "{:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_io() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1/", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base_url, Duration::from_secs(5))
        .list_items(MediaKind::Movie)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Io(_)), "{:?}", err);
}

#[tokio::test]
async fn test_unresolvable_host_is_unreachable() {
    let err = client("http://watchly-test.invalid/v1/", Duration::from_secs(5))
        .list_items(MediaKind::Movie)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Unreachable(_)), "{:?}", err);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1/", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let err = client(&base_url, Duration::from_millis(200))
        .get_item_detail(1)
        .await
        .unwrap_err();
    assert_eq!(err, TransportError::Timeout);
}

const SECRET_KEY: &str = "SECRET-KEY-1234";

fn assert_key_hidden(err: &TransportError) {
    let rendered = format!("{} / {:?}", err, err);
    assert!(!rendered.contains(SECRET_KEY), "api key leaked: {}", rendered);
    assert!(!rendered.contains("apiKey="), "query string leaked: {}", rendered);
}

#[tokio::test]
async fn test_connection_error_does_not_expose_api_key() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1/", listener.local_addr().unwrap());
    drop(listener);

    let err = WatchmodeClient::new(&base_url, SECRET_KEY.to_string(), Duration::from_secs(5), Duration::from_secs(2))
        .unwrap()
        .list_items(MediaKind::Movie)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Io(_)), "{:?}", err);
    assert_key_hidden(&err);
}

#[tokio::test]
async fn test_redirect_loop_does_not_expose_api_key() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1/", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                // send the client straight back to the url it asked for, query included
                let head = String::from_utf8_lossy(&request).to_string();
                let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let response = format!(
                    "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    target
                );
                socket.write_all(response.as_bytes()).await.ok();
                socket.shutdown().await.ok();
            });
        }
    });

    let err = WatchmodeClient::new(&base_url, SECRET_KEY.to_string(), Duration::from_secs(5), Duration::from_secs(2))
        .unwrap()
        .get_item_detail(42)
        .await
        .unwrap_err();
    assert_key_hidden(&err);
}

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use wake_order::detector::StaticCart;
use wake_order::lifecycle::WakeOrderConnector;
use wake_order::model::{NotificationRequest, Trigger};
use wake_order::notifier::{DeliveryError, DeliveryReport, HttpNotifier, Notifier};
use wake_order::settings::ConnectorConfig;

/// What the test server saw.
struct CapturedRequest {
    head: String,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

/// Accepts one connection, captures the request and answers with the given response.
async fn serve_once(
    status: u16,
    content_type: &'static str,
    response_body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let head_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let captured = CapturedRequest {
            head,
            body: String::new(),
        };
        let content_length: usize = captured
            .header("content-length")
            .map(|v| v.parse().unwrap())
            .unwrap_or(0);

        while buf.len() < head_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[head_end..head_end + content_length]).to_string();

        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            response_body.len(),
            response_body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        CapturedRequest { body, ..captured }
    });

    (format!("http://{}/cart/update-wake-order", addr), handle)
}

fn config_for(api_url: String) -> ConnectorConfig {
    ConnectorConfig {
        api_url,
        request_timeout_ms: 5_000,
        ..ConnectorConfig::default()
    }
}

/// Full path: ready cart -> connector -> real HTTP notifier -> wire.
#[tokio::test]
async fn test_ready_cart_posts_exact_payload() {
    let (url, server) = serve_once(200, "application/json", r#"{"status":"ok"}"#).await;
    let config = config_for(url);
    let notifier = HttpNotifier::new(&config).unwrap();

    let cart = StaticCart::new(json!({
        "Carrinho": { "PedidoId": "ORD123", "Metadados": { "conector_benova": "CART456" } }
    }));
    let connector = WakeOrderConnector::new(config, Arc::new(cart), Arc::new(notifier));

    let outcome = connector.on_trigger(Trigger::DomReady).await.unwrap();
    assert_eq!(outcome.attempts(), 1);
    let report = outcome.into_delivery().unwrap().report().await;
    assert_eq!(report, DeliveryReport::Delivered(json!({ "status": "ok" })));

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("POST /cart/update-wake-order HTTP/1.1"));
    assert_eq!(captured.header("content-type").as_deref(), Some("application/json"));
    assert_eq!(captured.body, r#"{"wake_cart_id":"CART456","wake_order":"ORD123"}"#);
}

#[tokio::test]
async fn test_numeric_order_id_goes_out_as_a_number() {
    let (url, server) = serve_once(200, "application/json", "{}").await;
    let notifier = HttpNotifier::new(&config_for(url)).unwrap();

    let result = notifier
        .notify(NotificationRequest::new("CART456", 1234u64))
        .await;
    assert_eq!(result, Ok(json!({})));

    let captured = server.await.unwrap();
    assert_eq!(captured.body, r#"{"wake_cart_id":"CART456","wake_order":1234}"#);
}

#[tokio::test]
async fn test_non_success_status_is_a_delivery_error() {
    let (url, server) = serve_once(500, "text/plain", "boom").await;
    let notifier = HttpNotifier::new(&config_for(url)).unwrap();

    let result = notifier.notify(NotificationRequest::new("a", "b")).await;
    assert_eq!(
        result,
        Err(DeliveryError::Status {
            status: 500,
            body: "boom".into()
        })
    );
    server.await.unwrap();
}

#[tokio::test]
async fn test_broken_json_response_is_malformed() {
    let (url, server) = serve_once(200, "application/json", "{ nope").await;
    let notifier = HttpNotifier::new(&config_for(url)).unwrap();

    let result = notifier.notify(NotificationRequest::new("a", "b")).await;
    assert!(matches!(result, Err(DeliveryError::MalformedResponse(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn test_plain_text_and_empty_responses_are_accepted() {
    let (url, server) = serve_once(200, "text/plain", "OK").await;
    let notifier = HttpNotifier::new(&config_for(url)).unwrap();
    let result = notifier.notify(NotificationRequest::new("a", "b")).await;
    assert_eq!(result, Ok(Value::String("OK".into())));
    server.await.unwrap();

    let (url, server) = serve_once(204, "application/json", "").await;
    let notifier = HttpNotifier::new(&config_for(url)).unwrap();
    let result = notifier.notify(NotificationRequest::new("a", "b")).await;
    assert_eq!(result, Ok(Value::Null));
    server.await.unwrap();
}

/// A refused connection is logged by the loop and never escapes it.
#[tokio::test]
async fn test_unreachable_endpoint_is_reported_not_raised() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = config_for(format!("http://{}/cart/update-wake-order", addr));
    let notifier = HttpNotifier::new(&config).unwrap();
    let cart = StaticCart::new(json!({
        "Carrinho": { "PedidoId": 9, "Metadados": { "conector_benova": "CART456" } }
    }));
    let connector = WakeOrderConnector::new(config, Arc::new(cart), Arc::new(notifier));

    let outcome = connector.on_trigger(Trigger::WindowLoad).await.unwrap();
    assert!(outcome.is_dispatched());
    let report = outcome.into_delivery().unwrap().report().await;
    assert!(matches!(report, DeliveryReport::Failed(DeliveryError::Transport(_))));
}

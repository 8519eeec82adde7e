use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;
use upload_sink::SinkConfig;

async fn spawn_sink(config: SinkConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        upload_sink::server::serve(listener, config).await.unwrap();
    });
    format!("http://{}", addr)
}

fn file_part(bytes: &[u8], name: &str) -> Part {
    Part::bytes(bytes.to_vec()).file_name(name.to_string())
}

#[tokio::test]
async fn test_upload_returns_receipt() {
    let base = spawn_sink(SinkConfig::default()).await;

    let form = Form::new()
        .part("file", file_part(b"hello world", "hello.txt"))
        .text("folder", "inbox")
        .text("tag", "q3");

    let resp = reqwest::Client::new()
        .post(format!("{}/api/upload", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "hello.txt");
    assert_eq!(body["size"], 11);
    assert_eq!(body["field"], "file");
    assert_eq!(body["fields"]["folder"], "inbox");
    assert_eq!(body["fields"]["tag"], "q3");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_missing_file_is_bad_request() {
    let base = spawn_sink(SinkConfig::default()).await;

    let form = Form::new().text("folder", "inbox");
    let resp = reqwest::Client::new()
        .post(format!("{}/api/upload", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let base = spawn_sink(SinkConfig {
        max_bytes: 4,
        ..SinkConfig::default()
    })
    .await;

    let form = Form::new().part("file", file_part(b"0123456789", "big.bin"));
    let resp = reqwest::Client::new()
        .post(format!("{}/api/upload", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_custom_field_name() {
    let base = spawn_sink(SinkConfig {
        field: "attachment".to_string(),
        ..SinkConfig::default()
    })
    .await;

    let form = Form::new().part("attachment", file_part(b"abc", "a.pdf"));
    let resp = reqwest::Client::new()
        .post(format!("{}/api/upload", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["field"], "attachment");
    assert_eq!(body["size"], 3);
}

#[tokio::test]
async fn test_health() {
    let base = spawn_sink(SinkConfig::default()).await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "upload-sink");
}

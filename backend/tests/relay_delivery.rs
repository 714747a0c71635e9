//! End-to-end delivery tests against local mock endpoints.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use devpay::{
    run_checkout, server, CheckoutError, CheckoutRequest, HttpSubmissionClient, NotifyTarget, ProofFile,
    MAX_PROOF_SIZE,
};
use devpay_core::{FormError, PaymentDirectory, PaymentMethod, QrisCode, SubmissionError, SubmissionPayload, WalletAccount};
use serde_json::Value;

/// One multipart request as seen by the mock.
#[derive(Debug, Default, Clone)]
struct Captured {
    fields: HashMap<String, String>,
    files: HashMap<String, (String, Vec<u8>)>,
}

#[derive(Clone)]
struct Mock {
    requests: Arc<Mutex<Vec<Captured>>>,
    status: StatusCode,
    body: &'static str,
}

async fn capture(State(mock): State<Mock>, mut multipart: Multipart) -> (StatusCode, &'static str) {
    let mut captured = Captured::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or("").to_string();
        match field.file_name().map(|s| s.to_string()) {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap().to_vec();
                captured.files.insert(name, (file_name, bytes));
            }
            None => {
                captured.fields.insert(name, field.text().await.unwrap());
            }
        }
    }
    mock.requests.lock().unwrap().push(captured);
    (mock.status, mock.body)
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a mock endpoint answering `status` / `body` on `path`.
async fn mock_endpoint(path: &str, status: StatusCode, body: &'static str) -> (SocketAddr, Arc<Mutex<Vec<Captured>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let mock = Mock {
        requests: requests.clone(),
        status,
        body,
    };
    let app = Router::new().route(path, post(capture)).with_state(mock);
    (spawn(app).await, requests)
}

fn client(target: NotifyTarget) -> HttpSubmissionClient {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    HttpSubmissionClient::new(http, target)
}

fn telegram_target(addr: SocketAddr) -> NotifyTarget {
    NotifyTarget::Telegram {
        api_base: format!("http://{}", addr),
        bot_token: "TESTTOKEN".into(),
        chat_id: "4242".into(),
    }
}

fn proof() -> ProofFile {
    ProofFile::in_memory("bukti.jpg", Some("image/jpeg".into()), vec![0xFF, 0xD8, 0xFF, 0xE0])
}

fn directory() -> PaymentDirectory {
    PaymentDirectory {
        wallet: WalletAccount {
            provider: "DANA_WALLET".into(),
            number: "088100000000".into(),
            owner: "MAUL STORE".into(),
        },
        qris: QrisCode {
            image_url: "http://127.0.0.1/qris.jpg".into(),
            nmid: "ID1024361924573 A01".into(),
            merchant: "MAUL STORE".into(),
        },
    }
}

#[tokio::test]
async fn test_relay_profile_fields() {
    let (addr, requests) = mock_endpoint("/api/proof", StatusCode::OK, "{}").await;
    let client = client(NotifyTarget::Relay {
        url: format!("http://{}/api/proof", addr),
    });

    let file = proof();
    let payload = SubmissionPayload {
        file: &file,
        product_name: "SCRIPT BUG".into(),
        amount: "20000".into(),
        note: Some("MAUL GANTENG".into()),
        method: PaymentMethod::Dana,
    };
    client.deliver(&payload).await.unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.fields["productName"], "SCRIPT BUG");
    assert_eq!(req.fields["amount"], "20000");
    assert_eq!(req.fields["note"], "MAUL GANTENG");
    assert_eq!(req.fields["method"], "dana");
    assert!(req.fields["caption"].contains("Amount  : Rp 20000"));
    let (name, bytes) = &req.files["file"];
    assert_eq!(name, "bukti.jpg");
    assert_eq!(bytes.len(), 4);
}

#[tokio::test]
async fn test_relay_error_status_is_failure() {
    let (addr, requests) =
        mock_endpoint("/api/proof", StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"disk full"}"#).await;
    let client = client(NotifyTarget::Relay {
        url: format!("http://{}/api/proof", addr),
    });

    let file = proof();
    let payload = SubmissionPayload {
        file: &file,
        product_name: "SCRIPT BUG".into(),
        amount: "20000".into(),
        note: None,
        method: PaymentMethod::Qris,
    };
    let err = client.deliver(&payload).await.unwrap_err();
    assert_eq!(err, SubmissionError::Status { status: 500, message: "disk full".into() });
    assert_eq!(requests.lock().unwrap()[0].fields["note"], "");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(NotifyTarget::Relay {
        url: format!("http://{}/api/proof", addr),
    });
    let file = proof();
    let payload = SubmissionPayload {
        file: &file,
        product_name: "SCRIPT BUG".into(),
        amount: "1".into(),
        note: None,
        method: PaymentMethod::Dana,
    };
    assert!(matches!(client.deliver(&payload).await, Err(SubmissionError::Network(_))));
}

#[tokio::test]
async fn test_telegram_profile_and_rejection() {
    let (addr, requests) = mock_endpoint("/botTESTTOKEN/sendPhoto", StatusCode::OK, r#"{"ok":true}"#).await;
    let file = proof();
    let payload = SubmissionPayload {
        file: &file,
        product_name: "SCRIPT BUG".into(),
        amount: "20.000".into(),
        note: None,
        method: PaymentMethod::Qris,
    };
    client(telegram_target(addr)).deliver(&payload).await.unwrap();

    {
        let requests = requests.lock().unwrap();
        let req = &requests[0];
        assert_eq!(req.fields["chat_id"], "4242");
        assert!(req.fields["caption"].starts_with("NEW PAYMENT PROOF\nProduct : SCRIPT BUG"));
        assert!(req.fields["caption"].ends_with("Note    : -"));
        assert!(req.files.contains_key("photo"));
    }

    let (addr, _) = mock_endpoint(
        "/botTESTTOKEN/sendPhoto",
        StatusCode::OK,
        r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#,
    )
    .await;
    let err = client(telegram_target(addr)).deliver(&payload).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Rejected(ref m) if m.contains("blocked")));
}

#[tokio::test]
async fn test_cli_checkout_through_relay() {
    let (addr, requests) = mock_endpoint("/api/proof", StatusCode::OK, "{}").await;
    let client = client(NotifyTarget::Relay {
        url: format!("http://{}/api/proof", addr),
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bukti.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

    let mut out: Vec<u8> = Vec::new();
    let request = CheckoutRequest {
        method: PaymentMethod::Qris,
        product_name: "  SCRIPT BUG ".into(),
        amount: "20000".into(),
        note: Some("   ".into()),
        attachment: path,
    };
    let summary = run_checkout(&mut out, &directory(), &client, request).await.unwrap();
    assert_eq!(summary.product_name, "SCRIPT BUG");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].fields["productName"], "SCRIPT BUG");
    assert_eq!(requests[0].fields["method"], "qris");
    assert_eq!(requests[0].files["file"].0, "bukti.png");
    assert!(String::from_utf8(out).unwrap().contains("SUCCESSFULLY"));
}

#[tokio::test]
async fn test_cli_checkout_missing_attachment_is_transport_error() {
    let (addr, requests) = mock_endpoint("/api/proof", StatusCode::OK, "{}").await;
    let client = client(NotifyTarget::Relay {
        url: format!("http://{}/api/proof", addr),
    });

    let request = CheckoutRequest {
        method: PaymentMethod::Dana,
        product_name: "SCRIPT BUG".into(),
        amount: "20000".into(),
        note: None,
        attachment: "/nonexistent/bukti.jpg".into(),
    };
    let err = run_checkout(&mut Vec::<u8>::new(), &directory(), &client, request).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Form(FormError::Transport(SubmissionError::File(_)))));
    assert!(requests.lock().unwrap().is_empty());
}

// =============================================================================
// Relay server
// =============================================================================

fn relay_form(amount: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("productName", "SCRIPT BUG")
        .text("amount", amount.to_string())
        .text("note", "MAUL GANTENG")
        .text("method", "dana")
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFF, 0xD8])
                .file_name("bukti.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        )
}

#[tokio::test]
async fn test_relay_server_forwards_to_telegram() {
    let (tg_addr, tg_requests) = mock_endpoint("/botTESTTOKEN/sendPhoto", StatusCode::OK, r#"{"ok":true}"#).await;
    let relay = spawn(server::router(client(telegram_target(tg_addr)))).await;

    let http = reqwest::Client::new();
    let response = http
        .post(format!("http://{}/api/proof", relay))
        .multipart(relay_form("20000"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "sent");
    assert_eq!(body["productName"], "SCRIPT BUG");
    assert_eq!(body["method"], "dana");

    let requests = tg_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].fields["chat_id"], "4242");
    assert!(requests[0].fields["caption"].contains("Note    : MAUL GANTENG"));
    assert_eq!(requests[0].files["photo"].1, vec![0xFF, 0xD8]);
}

#[tokio::test]
async fn test_relay_server_rejects_invalid_proof() {
    let (tg_addr, tg_requests) = mock_endpoint("/botTESTTOKEN/sendPhoto", StatusCode::OK, r#"{"ok":true}"#).await;
    let relay = spawn(server::router(client(telegram_target(tg_addr)))).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/proof", relay))
        .multipart(relay_form(" "))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "Missing required argument: --amount");
    assert!(tg_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_relay_server_rejects_oversize_proof() {
    let (tg_addr, tg_requests) = mock_endpoint("/botTESTTOKEN/sendPhoto", StatusCode::OK, r#"{"ok":true}"#).await;
    let relay = spawn(server::router(client(telegram_target(tg_addr)))).await;

    let form = reqwest::multipart::Form::new()
        .text("productName", "SCRIPT BUG")
        .text("amount", "20000")
        .text("method", "dana")
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0u8; MAX_PROOF_SIZE + 1])
                .file_name("bukti.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        );
    let response = reqwest::Client::new()
        .post(format!("http://{}/api/proof", relay))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Attachment too large"));
    assert!(tg_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_relay_server_reports_upstream_failure() {
    let (tg_addr, _) = mock_endpoint(
        "/botTESTTOKEN/sendPhoto",
        StatusCode::UNAUTHORIZED,
        r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
    )
    .await;
    let relay = spawn(server::router(client(telegram_target(tg_addr)))).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/proof", relay))
        .multipart(relay_form("20000"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);

    let health: Value = reqwest::get(format!("http://{}/health", relay)).await.unwrap().json().await.unwrap();
    assert_eq!(health["status"], "ok");
}

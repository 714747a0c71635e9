//! HTTP server for the proof relay.
//!
//! Accepts proofs from the web frontend and forwards each one, once, through
//! the configured [`HttpSubmissionClient`]. The browser never sees the bot
//! token.
//!
//! # API Endpoints
//!
//! | Method | Path         | Description                            |
//! |--------|--------------|----------------------------------------|
//! | GET    | `/health`    | Health check                           |
//! | POST   | `/api/proof` | Multipart proof: `file` + metadata      |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use devpay_core::{check_file_size, validate_fields, PaymentMethod, SubmissionPayload};
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;

use super::types::{error_response, ProofReceipt};
use crate::config::MAX_PROOF_SIZE;
use crate::error::{ServerError, ServerResult};
use crate::notify::HttpSubmissionClient;
use crate::proof::ProofFile;

/// Shared handler state.
#[derive(Clone)]
struct RelayState {
    client: Arc<HttpSubmissionClient>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::BadRequest(_) | ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::Forward(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Build the relay router.
pub fn router(client: HttpSubmissionClient) -> Router {
    // Permissive CORS: the frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let state = RelayState {
        client: Arc::new(client),
    };

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/proof", post(receive_proof))
        .layer(DefaultBodyLimit::max(MAX_PROOF_SIZE + 64 * 1024))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(port: u16, client: HttpSubmissionClient) -> Result<(), Box<dyn std::error::Error>> {
    let target = client.target().describe();
    let app = router(client);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 DevPay relay running on http://localhost:{}", port);
    println!("   POST /api/proof - Submit payment proof");
    println!("   GET  /health    - Health check");
    println!();
    println!("📝 Forwarding proofs to {}", target);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "devpay",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "proof": "POST /api/proof"
        }
    }))
}

/// Fields collected from the multipart body.
#[derive(Default)]
struct ProofForm {
    file: Option<ProofFile>,
    product_name: String,
    amount: String,
    note: String,
    method: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> ServerResult<ProofForm> {
    let mut form = ProofForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or("proof.jpg").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            check_file_size(bytes.len() as u64, MAX_PROOF_SIZE as u64)?;
            if !bytes.is_empty() {
                form.file = Some(ProofFile::in_memory(file_name, content_type, bytes.to_vec()));
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
        match name.as_str() {
            "productName" => form.product_name = text,
            "amount" => form.amount = text,
            "note" => form.note = text,
            "method" => form.method = Some(text),
            // caption is rebuilt from the fields
            _ => {}
        }
    }

    Ok(form)
}

/// Proof submission endpoint
async fn receive_proof(
    State(state): State<RelayState>,
    multipart: Multipart,
) -> ServerResult<Json<ProofReceipt>> {
    let form = read_form(multipart).await?;

    validate_fields(form.file.is_some(), &form.product_name, &form.amount)?;
    let method: PaymentMethod = form
        .method
        .as_deref()
        .ok_or_else(|| ServerError::BadRequest("Missing field: method".to_string()))?
        .parse()
        .map_err(ServerError::BadRequest)?;
    let file = form
        .file
        .ok_or(ServerError::Validation(devpay_core::ValidationError::MissingFile))?;

    let note = form.note.trim();
    let payload = SubmissionPayload {
        file: &file,
        product_name: form.product_name.trim().to_string(),
        amount: form.amount.trim().to_string(),
        note: (!note.is_empty()).then(|| note.to_string()),
        method,
    };

    log::info!(
        "📄 Proof received: '{}' {} via {} ({})",
        payload.product_name,
        payload.amount,
        method,
        file.file_name()
    );

    state.client.deliver(&payload).await.map_err(|e| {
        log::error!("❌ Forwarding failed: {}", e);
        ServerError::from(e)
    })?;

    log::info!("✅ Proof forwarded for '{}'", payload.product_name);
    Ok(Json(ProofReceipt::sent(payload.product_name, method)))
}

//! # HTTP API
//!
//! | Method | Path      | Description                                  |
//! |--------|-----------|----------------------------------------------|
//! | GET    | `/`       | All blocks, genesis first                    |
//! | POST   | `/`       | Append a checkout record                     |
//! | POST   | `/new`    | Echo a book back with its derived id         |
//! | GET    | `/verify` | Re-validate the whole chain                  |
//! | GET    | `/health` | Liveness check                               |

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bookchain::{AppendOutcome, Block, Book, Chain, ChainError, CheckoutRecord};
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<Chain>,
}

/// Build the router with all routes and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_blocks).post(write_block))
        .route("/new", post(new_book))
        .route("/verify", get(verify_chain))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON body returned with every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, error: &str, reason: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            reason,
        }),
    )
}

/// `GET /`
async fn list_blocks(State(state): State<AppState>) -> Json<Vec<Block>> {
    Json(state.chain.snapshot())
}

/// `POST /`
async fn write_block(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<Block>), ApiError> {
    let Json(record) = payload.map_err(|e| {
        tracing::warn!(error = %e, "could not decode checkout");
        api_error(
            StatusCode::BAD_REQUEST,
            "could not create a block",
            Some(e.body_text()),
        )
    })?;

    match state.chain.append(record) {
        Ok(AppendOutcome::Accepted(block)) => Ok((StatusCode::CREATED, Json(block))),
        Ok(AppendOutcome::Rejected(reason)) => Err(api_error(
            StatusCode::CONFLICT,
            "chain validation failed",
            Some(reason.to_string()),
        )),
        Err(ChainError::MalformedPayload(msg)) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "could not create a block",
            Some(msg),
        )),
        Err(e) => {
            tracing::error!(error = %e, "could not build block");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "could not create a block",
                None,
            ))
        }
    }
}

/// `POST /new`
async fn new_book(payload: Result<Json<Book>, JsonRejection>) -> Result<Json<Book>, ApiError> {
    let Json(book) = payload.map_err(|e| {
        tracing::warn!(error = %e, "could not decode book");
        api_error(
            StatusCode::BAD_REQUEST,
            "could not create new book",
            Some(e.body_text()),
        )
    })?;

    let book = book.with_derived_id();
    tracing::debug!(id = %book.id, isbn = %book.isbn, "book id derived");
    Ok(Json(book))
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    ok: bool,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// `GET /verify`
async fn verify_chain(State(state): State<AppState>) -> Json<VerifyReport> {
    let result = state.chain.verify();
    if let Err(e) = &result {
        tracing::error!(error = %e, "chain verification failed");
    }

    Json(VerifyReport {
        ok: result.is_ok(),
        length: state.chain.len(),
        error: result.err().map(|e| e.to_string()),
    })
}

/// `GET /health`
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use bookchain::{derive_book_id, ChainConfig};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let chain = Chain::with_config(ChainConfig {
            genesis_timestamp: Some(1_736_870_400_000),
        })
        .unwrap();
        create_router(AppState {
            chain: Arc::new(chain),
        })
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    async fn get(router: &Router, path: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        send(router, req).await
    }

    async fn post_raw(router: &Router, path: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, req).await
    }

    async fn post_json(
        router: &Router,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        post_raw(router, path, &body.to_string()).await
    }

    #[tokio::test]
    async fn test_fresh_chain_lists_genesis() {
        let router = test_router();
        let (status, body) = get(&router, "/").await;

        assert_eq!(status, StatusCode::OK);
        let blocks = body.as_array().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["position"], 0);
        assert_eq!(blocks[0]["previous_hash"], "");
        assert_eq!(blocks[0]["payload"]["is_genesis"], true);
    }

    #[tokio::test]
    async fn test_post_checkout_appends_block() {
        let router = test_router();
        let (status, block) = post_json(
            &router,
            "/",
            serde_json::json!({
                "book_id": "b-1",
                "user": "ada",
                "checkout_date": "2024-01-01"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(block["position"], 1);
        assert_eq!(block["payload"]["user"], "ada");

        let (_, body) = get(&router, "/").await;
        let blocks = body.as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1]["previous_hash"], blocks[0]["content_hash"]);
    }

    #[tokio::test]
    async fn test_malformed_checkout_is_bad_request() {
        let router = test_router();
        let (status, body) = post_raw(&router, "/", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "could not create a block");

        let (_, body) = get(&router, "/").await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let router = test_router();

        let (status, _) =
            post_json(&router, "/", serde_json::json!({ "book_id": "b", "user": "u" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(&router, "/new", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get(&router, "/").await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_genesis_flag_is_bad_request() {
        let router = test_router();
        let (status, _) = post_json(
            &router,
            "/",
            serde_json::json!({
                "book_id": "b-1",
                "user": "ada",
                "checkout_date": "2024-01-01",
                "is_genesis": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_new_book_derives_id() {
        let router = test_router();
        let (status, book) = post_json(
            &router,
            "/new",
            serde_json::json!({
                "title": "Dune",
                "author": "Frank Herbert",
                "published_date": "1965-08-01",
                "isbn": "9780441013593"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(book["id"], derive_book_id("9780441013593", "1965-08-01"));
        assert_eq!(book["title"], "Dune");
    }

    #[tokio::test]
    async fn test_new_book_does_not_touch_chain() {
        let router = test_router();
        post_json(
            &router,
            "/new",
            serde_json::json!({
                "title": "t", "author": "a", "published_date": "p", "isbn": "i"
            }),
        )
        .await;

        let (_, body) = get(&router, "/").await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_verify_reports_ok() {
        let router = test_router();
        post_json(
            &router,
            "/",
            serde_json::json!({ "book_id": "b", "user": "u", "checkout_date": "d" }),
        )
        .await;

        let (status, body) = get(&router, "/verify").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["length"], 2);
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router();
        let (status, body) = get(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}

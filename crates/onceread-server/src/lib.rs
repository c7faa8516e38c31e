//! HTTP gateway for onceread.
//!
//! A thin JSON layer over [`onceread_store::Vault`]: content goes through
//! the gate on the way in, keys are screened on the way out, and storage
//! failures surface as a generic 500.
//!
//! | Method | Path                | Result                                   |
//! |--------|---------------------|------------------------------------------|
//! | POST   | `/v1/entries`       | `201 {"key","url"}` or `400`             |
//! | GET    | `/v1/entries/:key`  | `200 {"content"}` once, then `404`       |
//! | GET    | `/v1/health`        | `200 {"status":"ok"}`                    |
//! | GET    | `/v1/info`          | name, version, backend, limits           |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{BackendConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::OnceReadServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        router::build_router(AppState::in_memory())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/entries")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(&app(), get("/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = send(&app(), get("/v1/info")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "memory");
        assert_eq!(body["max_chars"], 10_000);
    }

    #[tokio::test]
    async fn create_then_read_once() {
        let app = app();
        let (status, created) = send(&app, post_json(json!({ "content": "hello" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let url = created["url"].as_str().unwrap().to_owned();
        assert!(url.ends_with(created["key"].as_str().unwrap()));

        let response = app.clone().oneshot(get(&url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

        let (status, body) = send(&app, get(&url)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found");
    }

    #[tokio::test]
    async fn content_comes_back_escaped() {
        let app = app();
        let (_, created) = send(
            &app,
            post_json(json!({ "content": "  <script>alert(1)</script> " })),
        )
        .await;
        let (status, body) = send(&app, get(created["url"].as_str().unwrap())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[tokio::test]
    async fn rejects_bad_content() {
        let app = app();
        for body in [
            json!({ "content": "   " }),
            json!({ "content": 42 }),
            json!({ "other": "x" }),
            json!({ "content": "a".repeat(10_001) }),
        ] {
            let (status, reply) = send(&app, post_json(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(reply["error"].is_string());
        }
    }

    #[tokio::test]
    async fn rejects_non_json_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/entries")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(vec![0xff, 0xfe]))
            .unwrap();
        let (status, _) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn accepts_content_at_limit() {
        let (status, _) = send(&app(), post_json(json!({ "content": "a".repeat(10_000) }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn markup_at_limit_is_delivered_whole() {
        let app = app();
        let (status, created) =
            send(&app, post_json(json!({ "content": "<".repeat(10_000) }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(&app, get(created["url"].as_str().unwrap())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "&lt;".repeat(10_000));
    }

    #[tokio::test]
    async fn malformed_and_unknown_keys_look_the_same() {
        let app = app();
        let (s1, b1) = send(&app, get("/v1/entries/not-a-real-token")).await;
        let (s2, b2) = send(
            &app,
            get("/v1/entries/3f2b8c1e-9d4a-4c7b-8e21-5a6f0d9c3b7e"),
        )
        .await;
        assert_eq!(s1, StatusCode::NOT_FOUND);
        assert_eq!((s1, b1), (s2, b2));
    }

    #[tokio::test]
    async fn concurrent_reads_deliver_once() {
        let app = app();
        let (_, created) = send(&app, post_json(json!({ "content": "secret" }))).await;
        let url = created["url"].as_str().unwrap().to_owned();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let app = app.clone();
                let url = url.clone();
                tokio::spawn(async move { send(&app, get(&url)).await })
            })
            .collect();
        let mut delivered = 0;
        for task in tasks {
            let (status, body) = task.await.unwrap();
            if status == StatusCode::OK {
                assert_eq!(body["content"], "secret");
                delivered += 1;
            } else {
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
        }
        assert_eq!(delivered, 1);
    }

    #[tokio::test]
    async fn storage_failure_is_generic_500() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("entries");
        let server = OnceReadServer::new(ServerConfig {
            backend: BackendConfig::File { root: root.clone() },
            ..Default::default()
        })
        .unwrap();
        let app = server.router();
        std::fs::remove_dir_all(&root).unwrap();

        let (status, body) = send(&app, post_json(json!({ "content": "x" }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
        assert!(!body.to_string().contains(root.to_str().unwrap()));
    }
}

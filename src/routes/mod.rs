// src/routes/mod.rs
pub mod chat;

use std::any::Any;

use crate::{error::internal_error_response, state::SharedState};
use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chat::chat_handler;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Routes relative to the chat mount point.
pub fn create_router() -> Router<SharedState> {
    Router::new().route(
        "/",
        post(chat_handler).fallback(|| async { StatusCode::NOT_FOUND }),
    )
}

/// The full application: chat routes under `mount_path`, health check at the
/// root, and the middleware stack wrapped around all of it.
pub fn create_app(state: SharedState, mount_path: Option<&str>) -> Router {
    let chat = create_router().with_state(state);

    let router = match mount_path {
        Some(path) => Router::new().nest(path, chat),
        None => chat,
    };

    with_middleware(router.route("/health", get(|| async { "OK" })))
}

fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn cors_middleware(req: Request, next: Next) -> Response {
    // Preflight never reaches a handler.
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!("An unexpected error occurred: handler panicked: {detail}");

    internal_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn panics_become_generic_500_with_cors() {
        async fn boom() -> &'static str {
            panic!("secret detail")
        }

        let app = with_middleware(Router::new().route("/boom", get(boom)));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/boom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            ALLOW_ORIGIN
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"error":"An unexpected error occurred."}"#);
    }
}

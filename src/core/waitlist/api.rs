//! Waitlist API endpoints
//!
//! - POST /api/waitlist - Join the waitlist
//! - GET /api/waitlist/stats - Displayed waitlist size

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::store::WaitlistStore;
use super::{
    ApiError, JOIN_PATH, JoinRequest, JoinResponse, STATS_PATH, WaitlistError, WaitlistStats,
};

impl WaitlistError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WaitlistError::InvalidEmail => StatusCode::BAD_REQUEST,
            WaitlistError::Full => StatusCode::SERVICE_UNAVAILABLE,
            WaitlistError::Network(_) => StatusCode::BAD_GATEWAY,
            WaitlistError::Server { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Convert WaitlistError to API response
impl IntoResponse for WaitlistError {
    fn into_response(self) -> Response {
        let body = ApiError::new(self.to_string(), self.code());
        (self.status_code(), Json(body)).into_response()
    }
}

/// Create the waitlist API router
pub fn waitlist_router(store: WaitlistStore) -> Router {
    Router::new()
        .route(JOIN_PATH, post(join_handler))
        .route(STATS_PATH, get(stats_handler))
        .with_state(store)
}

/// POST /api/waitlist
/// 201 for a new signup, 200 when the email was already on the list
async fn join_handler(
    State(store): State<WaitlistStore>,
    Json(request): Json<JoinRequest>,
) -> Result<(StatusCode, Json<JoinResponse>), WaitlistError> {
    let response = store.join(&request.email).inspect_err(|e| {
        tracing::debug!("Waitlist join rejected: {}", e);
    })?;

    if response.created {
        tracing::info!(
            position = response.position,
            total = response.total,
            "New waitlist signup"
        );
        Ok((StatusCode::CREATED, Json(response)))
    } else {
        tracing::debug!(position = response.position, "Repeated waitlist signup");
        Ok((StatusCode::OK, Json(response)))
    }
}

/// GET /api/waitlist/stats
async fn stats_handler(State(store): State<WaitlistStore>) -> Json<WaitlistStats> {
    Json(store.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn join_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/waitlist")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_join_new_email_returns_created() {
        let app = waitlist_router(WaitlistStore::new(None, 850));

        let response = app
            .oneshot(join_request(r#"{"email":"dev@example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: JoinResponse = read_json(response).await;
        assert_eq!(body.position, 851);
        assert_eq!(body.total, 851);
        assert!(body.created);
    }

    #[tokio::test]
    async fn test_join_duplicate_returns_ok() {
        let store = WaitlistStore::default();
        store.join("dev@example.com").unwrap();
        let app = waitlist_router(store);

        let response = app
            .oneshot(join_request(r#"{"email":"DEV@example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: JoinResponse = read_json(response).await;
        assert_eq!(body.position, 1);
        assert!(!body.created);
    }

    #[tokio::test]
    async fn test_join_invalid_email_returns_bad_request() {
        let app = waitlist_router(WaitlistStore::default());

        let response = app
            .oneshot(join_request(r#"{"email":"   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["code"], "INVALID_EMAIL");
    }

    #[tokio::test]
    async fn test_join_full_returns_service_unavailable() {
        let store = WaitlistStore::new(Some(1), 0);
        store.join("first@example.com").unwrap();
        let app = waitlist_router(store);

        let response = app
            .oneshot(join_request(r#"{"email":"second@example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["code"], "WAITLIST_FULL");
        assert_eq!(body["error"], "The waitlist is full");
    }

    #[tokio::test]
    async fn test_stats_counts_signups() {
        let store = WaitlistStore::new(None, 850);
        store.join("a@example.com").unwrap();
        store.join("b@example.com").unwrap();
        let app = waitlist_router(store);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/waitlist/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: WaitlistStats = read_json(response).await;
        assert_eq!(body.total, 852);
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(WaitlistError::InvalidEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(WaitlistError::Full.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            WaitlistError::Server {
                status: 9999,
                message: String::new()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("The waitlist is full", "WAITLIST_FULL");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("The waitlist is full"));
        assert!(json.contains("WAITLIST_FULL"));
    }
}

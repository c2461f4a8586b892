//! Development API server
//!
//! In-memory backend speaking the same contract the forms submit to, built
//! with Axum.
//!
//! # Endpoints
//!
//! ## Customers
//! - `POST /customers` - Validate and store a customer
//!
//! ## Appointments
//! - `POST /appointments` - Book an appointment
//! - `GET /appointments/:from-:to` - Appointments in a time range
//! - `GET /availableTimeSlots` - Free slots for the coming week
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use appointments::api::{serve, AppState};
//! use appointments::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::new(&config)?;
//!     serve(state, &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use store::Directory;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let booking_routes = Router::new()
        .route("/customers", post(routes::customers::create_customer))
        .route("/appointments", post(routes::appointments::create_appointment))
        .route("/appointments/:range", get(routes::appointments::list_appointments))
        .route("/availableTimeSlots", get(routes::time_slots::available));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(booking_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Appointments API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Appointments API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Customer, CustomerField, RecordId};
    use crate::client::HttpTransport;
    use crate::config::{ClientConfig, Config};
    use crate::form::{Form, FormRecord, SubmissionController, SubmissionOutcome};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(&Config::default()).unwrap();
        build_router(state)
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["customers"], 0);
    }

    #[tokio::test]
    async fn test_create_customer() {
        let response = post_json(
            create_test_app(),
            "/customers",
            r#"{"firstName": "Ashley", "lastName": "Smith", "phoneNumber": "1234567890"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["firstName"], "Ashley");
    }

    #[tokio::test]
    async fn test_create_customer_validation_error() {
        let response = post_json(
            create_test_app(),
            "/customers",
            r#"{"firstName": "", "lastName": "Smith", "phoneNumber": "1234567890"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["fields"]["firstName"], "First name is required");
    }

    #[tokio::test]
    async fn test_create_customer_invalid_json() {
        let response = post_json(create_test_app(), "/customers", "not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_appointments_bad_range() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/appointments/yesterday")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_available_time_slots() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/availableTimeSlots")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await.is_array());
    }

    #[tokio::test]
    async fn test_customer_form_against_live_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_test_app()).await.unwrap();
        });

        let client_config = ClientConfig {
            base_url: format!("http://{}", addr),
            ..ClientConfig::default()
        };
        let transport = Arc::new(HttpTransport::new(&client_config).unwrap());
        let validator = Customer::validator(&Config::default().validation).unwrap();
        let mut form = Form::new(
            Customer::default(),
            validator,
            SubmissionController::new(transport),
        );

        form.change(CustomerField::FirstName, "Ashley");
        form.change(CustomerField::LastName, "Smith");
        form.change(CustomerField::PhoneNumber, "1234567890");

        match form.submit().await {
            SubmissionOutcome::Saved(customer) => {
                assert_eq!(customer.id, Some(RecordId::Number(1)));
                assert_eq!(customer.full_name(), "Ashley Smith");
            }
            other => panic!("expected saved customer, got {:?}", other),
        }
    }
}

//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                     - Liveness check
//! GET    /health/ready                               - BigCommerce reachability
//!
//! # Products
//! GET    /api/products?page=&limit=                  - Product list
//! GET    /api/products/{pid}                         - Product with metafields
//! PUT    /api/products/{pid}                         - Save product or translation
//! GET    /api/products/{pid}/translations/{locale}   - Localized field values
//! DELETE /api/products/{pid}/metafields/{id}         - Delete one metafield
//! GET    /api/products/{pid}/orphans                 - Metafields of the unused layout
//!
//! # Locales
//! GET    /api/locale                                 - Store locale from BigCommerce
//! GET    /api/locales                                - Available locales
//! PUT    /api/locales                                - Add or relabel a locale
//!
//! # Settings
//! GET    /api/settings/storage                       - Storage mode
//! PUT    /api/settings/storage                       - Switch storage mode
//! ```

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};

use crate::state::AppState;

pub mod locales;
pub mod products;
pub mod settings;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // Products
        .route("/api/products", get(products::index))
        .route(
            "/api/products/{pid}",
            get(products::show).put(products::update),
        )
        .route(
            "/api/products/{pid}/translations/{locale}",
            get(products::translations),
        )
        .route(
            "/api/products/{pid}/metafields/{id}",
            delete(products::delete_metafield),
        )
        .route("/api/products/{pid}/orphans", get(products::orphans))
        // Locales
        .route("/api/locale", get(locales::store_locale))
        .route("/api/locales", get(locales::index).put(locales::upsert))
        // Settings
        .route(
            "/api/settings/storage",
            get(settings::storage).put(settings::update_storage),
        )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the BigCommerce API accepts our credentials.
/// Returns 503 Service Unavailable otherwise.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.bigcommerce().get_store_locale().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::AdminConfig;

    pub fn app() -> Router {
        let state = AppState::new(AdminConfig::for_tests()).unwrap();
        routes().with_state(state)
    }

    pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        app.oneshot(request.unwrap()).await.unwrap()
    }

    pub async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = send(app(), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = send(app(), "GET", "/api/nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

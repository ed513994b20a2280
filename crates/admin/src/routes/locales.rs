//! Locale route handlers.

use axum::{Json, extract::State};
use multilingual_core::{Locale, LocaleSettings};
use tracing::instrument;

use crate::{bigcommerce::StoreLocale, error::AppError, state::AppState};

/// The store's own locale settings from BigCommerce.
#[instrument(skip(state))]
pub async fn store_locale(State(state): State<AppState>) -> Result<Json<StoreLocale>, AppError> {
    Ok(Json(state.bigcommerce().get_store_locale().await?))
}

/// Locales offered in the editor.
pub async fn index(State(state): State<AppState>) -> Json<LocaleSettings> {
    Json(state.settings().locales().await)
}

/// Add a locale, or relabel one with the same code.
#[instrument(skip(state))]
pub async fn upsert(
    State(state): State<AppState>,
    Json(mut locale): Json<Locale>,
) -> Result<Json<LocaleSettings>, AppError> {
    locale.label = locale.label.trim().to_owned();
    if locale.label.is_empty() {
        return Err(AppError::BadRequest("locale label is required".to_string()));
    }

    Ok(Json(state.settings().add_locale(locale).await))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::tests::{app, json_body, send};

    #[tokio::test]
    async fn lists_configured_locales() {
        let response = send(app(), "GET", "/api/locales", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["default_locale"], "en");
        assert_eq!(
            json["available"],
            json!([
                {"code": "en", "label": "English"},
                {"code": "es", "label": "Spanish"},
                {"code": "fr", "label": "French"}
            ])
        );
    }

    #[tokio::test]
    async fn added_locale_is_listed() {
        let app = app();

        let response = send(
            app.clone(),
            "PUT",
            "/api/locales",
            Some(json!({"code": "de", "label": " German "})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(send(app, "GET", "/api/locales", None).await).await;
        assert_eq!(json["available"][3], json!({"code": "de", "label": "German"}));
    }

    #[tokio::test]
    async fn blank_label_is_rejected() {
        let response = send(
            app(),
            "PUT",
            "/api/locales",
            Some(json!({"code": "de", "label": "  "})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_code_is_unprocessable() {
        let response = send(
            app(),
            "PUT",
            "/api/locales",
            Some(json!({"code": "de de", "label": "German"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

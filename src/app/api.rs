// JSON REST API under /api/personas

use super::state::AppState;
use crate::core::service::DEFAULT_PAGE_SIZE;
use crate::domain::model::{Persona, PersonaInput};
use crate::utils::error::{AgendaError, ErrorCategory};
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

impl AgendaError {
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Conflict => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Network => StatusCode::BAD_GATEWAY,
            ErrorCategory::Configuration | ErrorCategory::Storage | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AgendaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                "Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
        }

        let body = Json(serde_json::json!({
            "error": self.user_friendly_message()
        }));
        (status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, AgendaError>;

/// 非數字的 id 也回 {"error": ...}
fn persona_id(path: std::result::Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|e| {
        tracing::debug!("Rejected persona id: {}", e.body_text());
        AgendaError::validation("id", "El identificador debe ser un número entero")
    })
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Bienvenido a la API de Agenda de Contactos",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.service.count().await {
        Ok(total) => Json(serde_json::json!({
            "status": "healthy",
            "message": "API funcionando correctamente",
            "personas": total,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unhealthy",
                    "message": e.user_friendly_message(),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })),
            )
                .into_response()
        }
    }
}

pub async fn create_persona(
    State(state): State<AppState>,
    Json(input): Json<PersonaInput>,
) -> ApiResult<(StatusCode, Json<Persona>)> {
    let persona = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

pub async fn list_personas(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Persona>>> {
    let personas = state.service.list(page.skip, page.limit).await?;
    Ok(Json(personas))
}

pub async fn get_persona(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Persona>> {
    Ok(Json(state.service.get(persona_id(id)?).await?))
}

pub async fn find_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Response {
    match state.service.get_by_email(&query.email).await {
        Ok(Some(persona)) => Json(persona).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Persona no encontrada" })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_persona(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    Json(input): Json<PersonaInput>,
) -> ApiResult<Json<Persona>> {
    Ok(Json(state.service.update(persona_id(id)?, input).await?))
}

pub async fn delete_persona(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    state.service.delete(persona_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

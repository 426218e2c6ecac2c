// Server-rendered pages under /web, rendered with Askama

use super::state::AppState;
use crate::domain::model::{Persona, PersonaInput};
use crate::utils::error::{AgendaError, ErrorCategory, Result};
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

pub const WEB_ROOT: &str = "/web/";

/// 模板用的欄位；空字串代表沒有值
#[derive(Debug, Clone, Default)]
pub struct PersonaView {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub direccion: String,
}

impl From<&Persona> for PersonaView {
    fn from(persona: &Persona) -> Self {
        Self {
            id: persona.id,
            nombre: persona.nombre.clone(),
            apellido: persona.apellido.clone(),
            email: persona.email.clone(),
            telefono: persona.telefono.clone().unwrap_or_default(),
            direccion: persona.direccion.clone().unwrap_or_default(),
        }
    }
}

impl From<&PersonaInput> for PersonaView {
    fn from(input: &PersonaInput) -> Self {
        Self {
            id: 0,
            nombre: input.nombre.clone(),
            apellido: input.apellido.clone(),
            email: input.email.clone(),
            telefono: input.telefono.clone().unwrap_or_default(),
            direccion: input.direccion.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub personas: Vec<PersonaView>,
    pub mensaje: String,
    pub error: String,
}

#[derive(Template)]
#[template(path = "formulario.html")]
pub struct FormularioTemplate {
    pub accion: String,
    pub action_url: String,
    pub persona: PersonaView,
    pub error: String,
}

#[derive(Template)]
#[template(path = "detalle.html")]
pub struct DetalleTemplate {
    pub persona: PersonaView,
    pub nombre_completo: String,
}

/// 透過查詢字串傳遞的一次性訊息
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub mensaje: Option<String>,
    pub error: Option<String>,
}

fn redirect_with(kind: &str, text: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(kind, text)
        .finish();
    Redirect::to(&format!("{}?{}", WEB_ROOT, query)).into_response()
}

fn render<T: Template>(status: StatusCode, template: T) -> Result<Response> {
    Ok((status, Html(template.render()?)).into_response())
}

fn formulario(accion: &str, action_url: String, persona: PersonaView, error: String) -> FormularioTemplate {
    FormularioTemplate {
        accion: accion.to_string(),
        action_url,
        persona,
        error,
    }
}

/// 驗證與 email 重複時帶著原本的輸入重新顯示表單，其餘錯誤回列表
fn form_failure(err: AgendaError, accion: &str, action_url: String, input: &PersonaInput) -> Result<Response> {
    match err.category() {
        ErrorCategory::Validation | ErrorCategory::Conflict => render(
            StatusCode::BAD_REQUEST,
            formulario(accion, action_url, input.into(), err.user_friendly_message()),
        ),
        ErrorCategory::NotFound => Ok(redirect_with("error", &err.user_friendly_message())),
        _ => {
            tracing::error!("Failed to save persona: {}", err);
            Ok(redirect_with(
                "error",
                &format!("Error al guardar: {}", err.user_friendly_message()),
            ))
        }
    }
}

pub async fn index(State(state): State<AppState>, Query(flash): Query<Flash>) -> Result<Response> {
    let personas = state.service.list_all().await?;
    render(
        StatusCode::OK,
        IndexTemplate {
            personas: personas.iter().map(PersonaView::from).collect(),
            mensaje: flash.mensaje.unwrap_or_default(),
            error: flash.error.unwrap_or_default(),
        },
    )
}

pub async fn nuevo(Query(flash): Query<Flash>) -> Result<Response> {
    render(
        StatusCode::OK,
        formulario(
            "Crear",
            "/web/guardar".to_string(),
            PersonaView::default(),
            flash.error.unwrap_or_default(),
        ),
    )
}

pub async fn guardar(State(state): State<AppState>, Form(input): Form<PersonaInput>) -> Result<Response> {
    match state.service.create(input.clone()).await {
        Ok(_) => Ok(redirect_with("mensaje", "Persona guardada exitosamente")),
        Err(e) => form_failure(e, "Crear", "/web/guardar".to_string(), &input),
    }
}

pub async fn editar(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    match state.service.find(id).await? {
        Some(persona) => render(
            StatusCode::OK,
            formulario(
                "Editar",
                format!("/web/actualizar/{}", id),
                PersonaView::from(&persona),
                String::new(),
            ),
        ),
        None => Ok(redirect_with("error", "Persona no encontrada")),
    }
}

pub async fn actualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(input): Form<PersonaInput>,
) -> Result<Response> {
    match state.service.update(id, input.clone()).await {
        Ok(_) => Ok(redirect_with("mensaje", "Persona actualizada exitosamente")),
        Err(e) => form_failure(e, "Editar", format!("/web/actualizar/{}", id), &input),
    }
}

pub async fn eliminar(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.service.delete(id).await {
        Ok(()) => redirect_with("mensaje", "Persona eliminada exitosamente"),
        Err(AgendaError::NotFound { .. }) => redirect_with("error", "Persona no encontrada"),
        Err(e) => {
            tracing::error!("Failed to delete persona {}: {}", id, e);
            redirect_with(
                "error",
                &format!("Error al eliminar: {}", e.user_friendly_message()),
            )
        }
    }
}

pub async fn ver(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    match state.service.find(id).await? {
        Some(persona) => render(
            StatusCode::OK,
            DetalleTemplate {
                nombre_completo: persona.nombre_completo(),
                persona: PersonaView::from(&persona),
            },
        ),
        None => Ok(redirect_with("error", "Persona no encontrada")),
    }
}

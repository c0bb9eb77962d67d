//! HTTP surface for the filler.
//!
//! `GET /gerar_pdf` returns the filled PDF as an attachment,
//! `GET /listar_contratos` lists the templates on disk and `GET /health`
//! answers `ok`. Errors are JSON objects of the form `{"error": "..."}`.

use crate::core::filler::ContractFiller;
use crate::utils::error::{FillError, Result};
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use unicode_normalization::UnicodeNormalization;

pub const ATTACHMENT_NAME: &str = "Contrato_Preenchido.pdf";

#[derive(Clone)]
pub struct HttpState {
    pub filler: ContractFiller,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub contrato: Option<String>,
    pub observacao: Option<String>,
}

/// JSON error body with a status derived from the failure.
pub struct ApiError(pub FillError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            FillError::InvalidContractIdError { .. } => StatusCode::BAD_REQUEST,
            FillError::TemplateNotFoundError { .. } | FillError::LayoutNotFoundError { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn router(filler: ContractFiller) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/gerar_pdf", get(generate_handler))
        .route("/listar_contratos", get(list_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(HttpState { filler })
}

pub async fn serve(addr: SocketAddr, filler: ContractFiller) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, router(filler)).await?;
    Ok(())
}

pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

pub async fn generate_handler(
    State(state): State<HttpState>,
    Query(params): Query<GenerateParams>,
) -> Response {
    let Some(contract_id) = params.contrato.filter(|id| !id.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Contract not specified." })),
        )
            .into_response();
    };

    // Query has already been percent-decoded; compose accents so "a" + U+0301
    // and "á" are drawn the same way.
    let observation: String = params.observacao.unwrap_or_default().nfc().collect();
    tracing::debug!(contract = %contract_id, observation = %observation, "Generate request");

    match state.filler.generate(&contract_id, &observation).await {
        Ok(pdf) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", ATTACHMENT_NAME),
                ),
            ],
            pdf,
        )
            .into_response(),
        Err(err) => {
            tracing::warn!("Failed to fill contract '{}': {}", contract_id, err);
            ApiError(err).into_response()
        }
    }
}

pub async fn list_handler(State(state): State<HttpState>) -> Response {
    match state.filler.store().list_contracts().await {
        Ok(contracts) => Json(json!({ "contratos": contracts })).into_response(),
        Err(err) => {
            tracing::error!("Failed to list contracts: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to list contracts." })),
            )
                .into_response()
        }
    }
}

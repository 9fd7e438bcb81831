//! Web page with the viewer area and export buttons.
//!
//! Routes:
//! - `GET /` - the page
//! - `GET /api/mesh` - [`MeshView`] JSON, or the load error as plain text (422)
//! - `GET /api/export/{format}` - the exported file as an attachment

use std::net::SocketAddr;
use std::sync::Arc;

use airframe::{pipeline, AirframeConfig, ExportError, ExportFormat, LoadError, MeshView, PointSource};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const PAGE: &str = include_str!("page.html");
const BUTTONS: &str = "<!-- export buttons -->";

#[derive(Clone)]
pub struct AppState {
    pub source: PointSource,
    pub config: Arc<AirframeConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/mesh", get(mesh))
        .route("/api/export/{format}", get(export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

/// An error response with a plain-text body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}

impl From<LoadError> for ApiError {
    fn from(e: LoadError) -> Self {
        error!("error loading or processing data: {e}");
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: format!("Error: {e}"),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        let status = match e {
            ExportError::UnknownFormat(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("export failed: {e}");
        Self {
            status,
            message: format!("Error: {e}"),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!("build task failed: {e}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Error: build task failed".into(),
        }
    }
}

async fn index() -> Html<String> {
    let buttons: Vec<String> = ExportFormat::ALL
        .iter()
        .map(|f| format!("<button onclick=\"exportAs('{}')\">Export as {f}</button>", f.name()))
        .collect();
    Html(PAGE.replace(BUTTONS, &buttons.join("\n    ")))
}

async fn mesh(State(state): State<AppState>) -> Result<Json<MeshView>, ApiError> {
    let points = airframe::load(&state.source).await?;
    let config = state.config.clone();
    let view =
        tokio::task::spawn_blocking(move || MeshView::from_model(&pipeline::build(&points, &config)))
            .await?;
    Ok(Json(view))
}

async fn export(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse()?;
    let points = airframe::load(&state.source).await?;
    let config = state.config.clone();
    let bytes =
        tokio::task::spawn_blocking(move || pipeline::serialize(&points, &config, format)).await??;
    info!(%format, bytes = bytes.len(), "serving export");

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        bytes,
    )
        .into_response())
}

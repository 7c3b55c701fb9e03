//! HTTP surface of the dashboard.
//!
//! Every control change arrives as an independent `POST /api/update`
//! carrying the full control state and the ids of the controls that changed.
//! The handler runs the affected graph nodes to completion and answers with
//! one entry per recomputed output; a failed output carries an error message
//! in place of its figure while the other outputs still render.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::catalog::{SiteCatalog, SiteSelection};
use crate::chart::Figure;
use crate::config::Config;
use crate::dataset::{LaunchTable, PayloadRange};
use crate::error::{Error, Result};
use crate::layout::{render_page, DashboardLayout};
use crate::reactive::{ControlState, Dashboard, InputId, OutputId, OutputUpdate};

/// Shared, read-only server state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Graph driver over the launch table.
    pub dashboard: Arc<Dashboard>,
    /// Page description.
    pub layout: Arc<DashboardLayout>,
}

impl AppState {
    /// Assemble the state for `table` under `config`.
    #[must_use]
    pub fn build(table: LaunchTable, config: &Config) -> Self {
        let catalog = SiteCatalog::from_table(&table);
        let layout = DashboardLayout::build(&table, &catalog, &config.ui);
        info!(
            records = table.len(),
            sites = catalog.len(),
            "Dashboard assembled"
        );
        Self {
            dashboard: Arc::new(Dashboard::new(Arc::new(table), config.pie_style())),
            layout: Arc::new(layout),
        }
    }
}

/// Body of `POST /api/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Ids of the controls whose value changed.
    pub changed: Vec<String>,
    /// Current dropdown value.
    pub site: SiteSelection,
    /// Current slider value, `[low, high]`.
    pub payload: [f64; 2],
}

/// One recomputed output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutputBody {
    /// The new figure.
    Figure {
        /// Chart description.
        figure: Figure,
    },
    /// The output could not be rendered.
    Error {
        /// What went wrong.
        error: String,
    },
}

/// Response of `/api/update` and `/api/initial`.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Recomputed outputs keyed by graph id.
    pub outputs: BTreeMap<OutputId, OutputBody>,
}

impl From<Vec<OutputUpdate>> for UpdateResponse {
    fn from(updates: Vec<OutputUpdate>) -> Self {
        let outputs = updates
            .into_iter()
            .map(|update| {
                let body = match update.result {
                    Ok(figure) => OutputBody::Figure { figure },
                    Err(err) => OutputBody::Error {
                        error: err.to_string(),
                    },
                };
                (update.output, body)
            })
            .collect();
        Self { outputs }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownControl(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Rejected request: {self}");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/layout", get(layout))
        .route("/api/initial", get(initial))
        .route("/api/update", post(update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the dashboard on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Dashboard running on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C, running until killed: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.layout))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "records": state.dashboard.table().len(),
    }))
}

async fn layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

async fn initial(State(state): State<AppState>) -> Json<UpdateResponse> {
    Json(state.dashboard.initial_render().into())
}

async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>> {
    let changed = request
        .changed
        .iter()
        .map(|id| id.parse::<InputId>())
        .collect::<Result<Vec<_>>>()?;
    let [low, high] = request.payload;
    let control = ControlState {
        site: request.site,
        payload: PayloadRange::new(low, high)?,
    };
    Ok(Json(state.dashboard.on_change(&changed, &control).into()))
}

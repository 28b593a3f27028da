use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use dispatch_core::{
    MatchError, MatchMode, MatchResult, MatchingConfig, MatchingService, PartnerSet,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;

pub const BANNER: &str = "Partner dispatch service\n\
POST /closest-partner with [{\"userid\": 1, \"userlocation\": [lat, lon]}]\n";

#[derive(Clone, Debug)]
pub struct AppState {
    live: Arc<MatchingService>,
    tester: Arc<MatchingService>,
    /// Partners of the most recently completed match, replaced wholesale.
    latest_partners: Arc<RwLock<PartnerSet>>,
}

impl AppState {
    /// Live service with `matching` as given, tester service without latency.
    pub fn new(matching: MatchingConfig) -> Self {
        let tester = MatchingService::new(matching.clone().without_latency());
        Self::with_services(MatchingService::new(matching), tester)
    }

    pub fn with_services(live: MatchingService, tester: MatchingService) -> Self {
        Self {
            live: Arc::new(live),
            tester: Arc::new(tester),
            latest_partners: Arc::new(RwLock::new(PartnerSet::default())),
        }
    }

    pub async fn latest_partners(&self) -> PartnerSet {
        self.latest_partners.read().await.clone()
    }
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/all-partners", get(all_partners))
        .route("/partner/{partner_id}", get(partner_by_id))
        .route("/closest-partner", post(closest_partner))
        .route("/closest-partner-tester", post(closest_partner_tester))
        .route("/nearest-partners", post(nearest_partners))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = app_router(AppState::new(config.matching));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("dispatch_server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn home() -> &'static str {
    BANNER
}

async fn all_partners(State(state): State<AppState>) -> Json<PartnerSet> {
    Json(state.latest_partners().await)
}

/// Partner with the given id from the latest match, or an empty body.
async fn partner_by_id(
    Path(partner_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let Ok(partner_id) = partner_id.parse::<u32>() else {
        warn!(%partner_id, "partner id is not a number");
        return StatusCode::OK.into_response();
    };

    let partners = state.latest_partners.read().await;
    match partners.get(partner_id) {
        Some(partner) => Json(*partner).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

async fn closest_partner(State(state): State<AppState>, body: Bytes) -> Response {
    run_match(&state, &state.live, &body, MatchMode::Simulated).await
}

async fn closest_partner_tester(State(state): State<AppState>, body: Bytes) -> Response {
    run_match(&state, &state.tester, &body, MatchMode::Simulated).await
}

async fn nearest_partners(State(state): State<AppState>, body: Bytes) -> Response {
    run_match(&state, &state.tester, &body, MatchMode::Nearest).await
}

async fn run_match(
    state: &AppState,
    service: &MatchingService,
    body: &[u8],
    mode: MatchMode,
) -> Response {
    let outcome = match service.match_request_body(body, mode).await {
        Ok(outcome) => outcome,
        Err(err) => return error_response(&err),
    };

    *state.latest_partners.write().await = outcome.partners;
    match outcome.result {
        MatchResult::Accepted { candidate, .. } => Json(candidate.partner).into_response(),
        MatchResult::Ranked(ranked) => Json(ranked).into_response(),
    }
}

fn error_response(err: &MatchError) -> Response {
    let status = match err {
        MatchError::MalformedRequest { .. } | MatchError::OutOfServiceArea { .. } => {
            StatusCode::BAD_REQUEST
        }
        MatchError::NoPartnerAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    warn!(error = %err, status = status.as_u16(), "match request failed");
    (status, Json(err.client_message())).into_response()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use airlift_api::{
    AddManifestEntryResponse, AllocatePassengerRequest, AllocatePassengerResponse, ApiError,
    CompatibleEntriesResponse, CreateMissionRequest, CreateMissionResponse,
    ImportCsvWaitlistRequest, ImportCsvWaitlistResponse, ListMissionsResponse,
    ListWaitlistRequest, ListWaitlistResponse, MissionDetailResponse, PassengerRequest,
    PreviewCsvWaitlistRequest, PreviewCsvWaitlistResponse, PriorityTableResponse,
    RankTableResponse, RegisterWaitlistEntryResponse, RemoveManifestEntryResponse,
    RemoveWaitlistEntryResponse, add_manifest_entry, allocate_passenger, create_mission,
    get_mission, get_priority_table, get_rank_table, import_csv_waitlist,
    list_compatible_entries, list_missions, list_waitlist, preview_csv_waitlist,
    register_waitlist_entry, remove_manifest_entry, remove_waitlist_entry,
};
use airlift_domain::RankTable;
use airlift_persistence::Persistence;
use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Airlift Server - HTTP server for the Airlift waitlist allocation office
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Comma-separated rank codes, highest precedence first.
    /// Replaces the built-in rank table.
    #[arg(short, long, env = "AIRLIFT_RANKS")]
    ranks: Option<String>,
}

/// Application state shared across handlers.
///
/// Every request that touches storage holds the persistence lock for its
/// whole load-apply-commit cycle, so writes are serialized.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// The configured rank table.
    ranks: Arc<RankTable>,
}

impl AppState {
    fn new(persistence: Persistence, ranks: RankTable) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            ranks: Arc::new(ranks),
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok`.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } | ApiError::InvalidInput { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::AllocationConflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidCsvFormat { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for GET `/reference/ranks`.
async fn handle_get_ranks(AxumState(app_state): AxumState<AppState>) -> Json<RankTableResponse> {
    Json(get_rank_table(&app_state.ranks))
}

/// Handler for GET `/reference/priorities`.
async fn handle_get_priorities() -> Json<PriorityTableResponse> {
    Json(get_priority_table())
}

/// Handler for GET `/stations/{station}/waitlist`.
///
/// Lists the waitlist in passenger order; `?include_allocated=true` also
/// returns allocated entries.
async fn handle_list_waitlist(
    AxumState(app_state): AxumState<AppState>,
    Path(station): Path<String>,
    Query(query): Query<ListWaitlistRequest>,
) -> Result<Json<ListWaitlistResponse>, HttpError> {
    info!(
        station = %station,
        include_allocated = query.include_allocated,
        "Handling list_waitlist request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListWaitlistResponse =
        list_waitlist(&mut persistence, &app_state.ranks, &station, query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/stations/{station}/waitlist`.
async fn handle_register_waitlist_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(station): Path<String>,
    Json(request): Json<PassengerRequest>,
) -> Result<Json<RegisterWaitlistEntryResponse>, HttpError> {
    info!(station = %station, "Handling register_waitlist_entry request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterWaitlistEntryResponse = register_waitlist_entry(
        &mut persistence,
        &station,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/stations/{station}/waitlist/{entry_id}`.
async fn handle_remove_waitlist_entry(
    AxumState(app_state): AxumState<AppState>,
    Path((station, entry_id)): Path<(String, i64)>,
) -> Result<Json<RemoveWaitlistEntryResponse>, HttpError> {
    info!(station = %station, entry_id, "Handling remove_waitlist_entry request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RemoveWaitlistEntryResponse =
        remove_waitlist_entry(&mut persistence, &station, entry_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/stations/{station}/waitlist/import/preview`.
///
/// Validates CSV rows without writing anything.
async fn handle_preview_csv_waitlist(
    Path(station): Path<String>,
    Json(request): Json<PreviewCsvWaitlistRequest>,
) -> Result<Json<PreviewCsvWaitlistResponse>, HttpError> {
    info!(station = %station, "Handling preview_csv_waitlist request");

    Ok(Json(preview_csv_waitlist(&station, &request)?))
}

/// Handler for POST `/stations/{station}/waitlist/import`.
async fn handle_import_csv_waitlist(
    AxumState(app_state): AxumState<AppState>,
    Path(station): Path<String>,
    Json(request): Json<ImportCsvWaitlistRequest>,
) -> Result<Json<ImportCsvWaitlistResponse>, HttpError> {
    info!(
        station = %station,
        selected = request.selected_row_indices.len(),
        "Handling import_csv_waitlist request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportCsvWaitlistResponse = import_csv_waitlist(
        &mut persistence,
        &station,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/stations/{station}/missions`.
async fn handle_list_missions(
    AxumState(app_state): AxumState<AppState>,
    Path(station): Path<String>,
) -> Result<Json<ListMissionsResponse>, HttpError> {
    info!(station = %station, "Handling list_missions request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListMissionsResponse = list_missions(&mut persistence, &station)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/stations/{station}/missions`.
async fn handle_create_mission(
    AxumState(app_state): AxumState<AppState>,
    Path(station): Path<String>,
    Json(request): Json<CreateMissionRequest>,
) -> Result<Json<CreateMissionResponse>, HttpError> {
    info!(
        station = %station,
        mission_number = %request.mission_number,
        "Handling create_mission request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateMissionResponse = create_mission(&mut persistence, &station, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/missions/{mission_id}`.
async fn handle_get_mission(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<i64>,
) -> Result<Json<MissionDetailResponse>, HttpError> {
    info!(mission_id, "Handling get_mission request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MissionDetailResponse =
        get_mission(&mut persistence, &app_state.ranks, mission_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/missions/{mission_id}/compatible`.
async fn handle_list_compatible(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<i64>,
) -> Result<Json<CompatibleEntriesResponse>, HttpError> {
    info!(mission_id, "Handling list_compatible request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CompatibleEntriesResponse =
        list_compatible_entries(&mut persistence, &app_state.ranks, mission_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/missions/{mission_id}/allocations`.
async fn handle_allocate_passenger(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<i64>,
    Json(request): Json<AllocatePassengerRequest>,
) -> Result<Json<AllocatePassengerResponse>, HttpError> {
    info!(
        mission_id,
        entry_id = request.entry_id,
        "Handling allocate_passenger request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<AllocatePassengerResponse, ApiError> =
        allocate_passenger(&mut persistence, mission_id, request);
    drop(persistence);

    if let Err(ApiError::AllocationConflict { entry_id, .. }) = &result {
        warn!(mission_id, entry_id, "Allocation lost to a concurrent writer");
    }

    Ok(Json(result?))
}

/// Handler for POST `/missions/{mission_id}/manifest`.
async fn handle_add_manifest_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<i64>,
    Json(request): Json<PassengerRequest>,
) -> Result<Json<AddManifestEntryResponse>, HttpError> {
    info!(mission_id, "Handling add_manifest_entry request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AddManifestEntryResponse =
        add_manifest_entry(&mut persistence, mission_id, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/missions/{mission_id}/manifest/{manifest_entry_id}`.
async fn handle_remove_manifest_entry(
    AxumState(app_state): AxumState<AppState>,
    Path((mission_id, manifest_entry_id)): Path<(i64, i64)>,
) -> Result<Json<RemoveManifestEntryResponse>, HttpError> {
    info!(
        mission_id,
        manifest_entry_id,
        "Handling remove_manifest_entry request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RemoveManifestEntryResponse =
        remove_manifest_entry(&mut persistence, mission_id, manifest_entry_id)?;
    drop(persistence);

    Ok(Json(response))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/reference/ranks", get(handle_get_ranks))
        .route("/reference/priorities", get(handle_get_priorities))
        .route(
            "/stations/{station}/waitlist",
            get(handle_list_waitlist).post(handle_register_waitlist_entry),
        )
        .route(
            "/stations/{station}/waitlist/{entry_id}",
            delete(handle_remove_waitlist_entry),
        )
        .route(
            "/stations/{station}/waitlist/import/preview",
            post(handle_preview_csv_waitlist),
        )
        .route(
            "/stations/{station}/waitlist/import",
            post(handle_import_csv_waitlist),
        )
        .route(
            "/stations/{station}/missions",
            get(handle_list_missions).post(handle_create_mission),
        )
        .route("/missions/{mission_id}", get(handle_get_mission))
        .route(
            "/missions/{mission_id}/compatible",
            get(handle_list_compatible),
        )
        .route(
            "/missions/{mission_id}/allocations",
            post(handle_allocate_passenger),
        )
        .route(
            "/missions/{mission_id}/manifest",
            post(handle_add_manifest_entry),
        )
        .route(
            "/missions/{mission_id}/manifest/{manifest_entry_id}",
            delete(handle_remove_manifest_entry),
        )
        .with_state(app_state)
}

/// Builds the rank table from the command line, falling back to the
/// built-in table when none is given.
fn configured_ranks(raw: Option<&str>) -> RankTable {
    match raw.map(RankTable::parse_delimited) {
        Some(table) if !table.is_empty() => {
            info!(count = table.len(), "Using configured rank table");
            table
        }
        Some(_) => {
            warn!("Configured rank table is empty; using the built-in table");
            RankTable::default()
        }
        None => RankTable::default(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Airlift Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState::new(persistence, configured_ranks(args.ranks.as_deref()));

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler resolves the station it works in, loads that station's
//! state through the core, and translates every failure into an
//! [`ApiError`].

use airlift::{Command, Executed, StateChange, StationState, StationStore, execute};
use airlift_domain::{
    ManifestEntry, Mission, PassengerDetails, PriorityLevel, PriorityTier, RankTable, Route,
    Station, WaitlistEntry, Weights, ordered, priority_levels, validate_station,
};
use airlift_persistence::{Persistence, PersistenceError};
use std::collections::HashSet;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::csv_import::{
    CsvPreviewResult, CsvRowResult, parse_csv_row, preview_csv_waitlist as preview_csv_impl,
    read_records,
};
use crate::error::{
    ApiError, translate_domain_error, translate_execute_error, translate_persistence_error,
};
use crate::request_response::{
    AddManifestEntryResponse, AllocatePassengerRequest, AllocatePassengerResponse,
    CompatibleEntriesResponse, CreateMissionRequest, CreateMissionResponse, CsvImportRowResult,
    CsvImportRowStatus, CsvRowPreview, ImportCsvWaitlistRequest, ImportCsvWaitlistResponse,
    ListMissionsResponse, ListWaitlistRequest, ListWaitlistResponse, ManifestEntryInfo,
    MissionDetailResponse, MissionInfo, PassengerRequest, PreviewCsvWaitlistRequest,
    PreviewCsvWaitlistResponse, PriorityInfo, PriorityTableResponse, RankTableResponse,
    RegisterWaitlistEntryResponse, RemoveManifestEntryResponse, RemoveWaitlistEntryResponse,
    WaitlistEntryInfo,
};

// ============================================================================
// Conversions
// ============================================================================

fn parse_station(code: &str) -> Result<Station, ApiError> {
    let station: Station = Station::new(code);
    validate_station(&station).map_err(translate_domain_error)?;
    Ok(station)
}

fn load_state(persistence: &mut Persistence, station: &Station) -> Result<StationState, ApiError> {
    persistence
        .load_state(station)
        .map_err(translate_persistence_error)
}

/// Finds the station that owns a mission.
fn resolve_mission_station(
    persistence: &mut Persistence,
    mission_id: i64,
) -> Result<Station, ApiError> {
    persistence
        .mission_station(mission_id)
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Mission"),
                message: format!("Mission {mission_id} does not exist"),
            },
            other => translate_persistence_error(other),
        })
}

/// Builds passenger details from a request, trimming every text field the
/// way CSV import does.
fn passenger_from_request(request: &PassengerRequest) -> Result<PassengerDetails, ApiError> {
    let priority: PriorityTier =
        PriorityTier::new(request.priority_tier).map_err(translate_domain_error)?;

    Ok(PassengerDetails {
        rank: request.rank.trim().to_string(),
        name: request.name.trim().to_string(),
        identity_document: request
            .identity_document
            .as_ref()
            .map(|doc| doc.trim().to_string())
            .filter(|doc| !doc.is_empty()),
        destination: request.destination.trim().to_string(),
        weights: Weights::new(
            request.weight_person,
            request.weight_checked_baggage,
            request.weight_carry_on,
        ),
        priority,
        registered_by: request.registered_by.trim().to_string(),
        relationship: request.relationship.trim().to_string(),
    })
}

fn missing_id(record: &str) -> ApiError {
    ApiError::Internal {
        message: format!("Stored {record} has no identifier"),
    }
}

fn waitlist_entry_info(entry: &WaitlistEntry) -> Result<WaitlistEntryInfo, ApiError> {
    let entry_id: i64 = entry.entry_id.ok_or_else(|| missing_id("waitlist entry"))?;
    let registered_at: String = entry
        .registered_at
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format registration time: {e}"),
        })?;

    Ok(WaitlistEntryInfo {
        entry_id,
        station: entry.station.code().to_string(),
        rank: entry.passenger.rank.clone(),
        name: entry.passenger.name.clone(),
        identity_document: entry.passenger.identity_document.clone(),
        destination: entry.passenger.destination.clone(),
        weights: entry.passenger.weights,
        priority_tier: entry.passenger.priority.value(),
        registered_by: entry.passenger.registered_by.clone(),
        relationship: entry.passenger.relationship.clone(),
        registered_at,
        allocated_mission_id: entry.allocated_mission_id(),
    })
}

fn waitlist_infos(entries: &[&WaitlistEntry]) -> Result<Vec<WaitlistEntryInfo>, ApiError> {
    entries.iter().map(|e| waitlist_entry_info(e)).collect()
}

fn manifest_entry_info(entry: &ManifestEntry) -> Result<ManifestEntryInfo, ApiError> {
    Ok(ManifestEntryInfo {
        manifest_entry_id: entry
            .manifest_entry_id
            .ok_or_else(|| missing_id("manifest entry"))?,
        mission_id: entry.mission_id.ok_or_else(|| missing_id("manifest entry"))?,
        rank: entry.passenger.rank.clone(),
        name: entry.passenger.name.clone(),
        identity_document: entry.passenger.identity_document.clone(),
        destination: entry.passenger.destination.clone(),
        weights: entry.passenger.weights,
        priority_tier: entry.passenger.priority.value(),
        registered_by: entry.passenger.registered_by.clone(),
        relationship: entry.passenger.relationship.clone(),
        from_waitlist: entry.from_waitlist(),
        source: entry.source,
    })
}

fn mission_info(mission: &Mission) -> Result<MissionInfo, ApiError> {
    Ok(MissionInfo {
        mission_id: mission.mission_id.ok_or_else(|| missing_id("mission"))?,
        station: mission.station.code().to_string(),
        mission_number: mission.mission_number.clone(),
        aircraft: mission.aircraft.clone(),
        departure_date: mission.departure_date.map(|d| d.to_string()),
        route: mission.route.stops().to_vec(),
        totals: mission.totals(),
    })
}

fn unexpected_change(change: &StateChange) -> ApiError {
    ApiError::Internal {
        message: format!("Unexpected state change: {change:?}"),
    }
}

// ============================================================================
// Waitlist
// ============================================================================

/// Lists the waitlist of a station in passenger order.
///
/// Only unallocated entries are listed unless `include_allocated` is set.
///
/// # Errors
///
/// Returns an error if the station code is invalid or storage fails.
pub fn list_waitlist(
    persistence: &mut Persistence,
    ranks: &RankTable,
    station: &str,
    request: ListWaitlistRequest,
) -> Result<ListWaitlistResponse, ApiError> {
    let station: Station = parse_station(station)?;
    let state: StationState = load_state(persistence, &station)?;

    let entries: Vec<&WaitlistEntry> = if request.include_allocated {
        ordered(&state.waitlist, ranks)
    } else {
        state.active_waitlist(ranks)
    };
    let waiting_count: usize = state.waitlist.iter().filter(|e| !e.is_allocated()).count();

    Ok(ListWaitlistResponse {
        station: station.code().to_string(),
        entries: waitlist_infos(&entries)?,
        waiting_count,
    })
}

/// Registers a passenger on a station waitlist.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `station` - The station code
/// * `request` - The passenger to register
/// * `registered_at` - The registration time
///
/// # Errors
///
/// Returns an error if:
/// - The station code is invalid
/// - A passenger field fails validation
/// - Storage fails
pub fn register_waitlist_entry(
    persistence: &mut Persistence,
    station: &str,
    request: &PassengerRequest,
    registered_at: OffsetDateTime,
) -> Result<RegisterWaitlistEntryResponse, ApiError> {
    let station: Station = parse_station(station)?;
    let passenger: PassengerDetails = passenger_from_request(request)?;

    let executed: Executed = execute(
        persistence,
        &station,
        Command::RegisterWaitlistEntry {
            passenger,
            registered_at,
        },
    )
    .map_err(translate_execute_error)?;

    let StateChange::WaitlistEntryRegistered(entry) = &executed.change else {
        return Err(unexpected_change(&executed.change));
    };

    info!(
        station = %station,
        entry_id = ?entry.entry_id,
        "Registered waitlist entry"
    );

    Ok(RegisterWaitlistEntryResponse {
        entry: waitlist_entry_info(entry)?,
        message: format!("Registered {} on the {station} waitlist", entry.passenger.name),
    })
}

/// Removes an entry from a station waitlist.
///
/// Allocated entries may be removed too; their manifest rows are kept.
///
/// # Errors
///
/// Returns an error if the entry does not exist at the station or storage fails.
pub fn remove_waitlist_entry(
    persistence: &mut Persistence,
    station: &str,
    entry_id: i64,
) -> Result<RemoveWaitlistEntryResponse, ApiError> {
    let station: Station = parse_station(station)?;

    execute(
        persistence,
        &station,
        Command::RemoveWaitlistEntry { entry_id },
    )
    .map_err(translate_execute_error)?;

    info!(station = %station, entry_id, "Removed waitlist entry");

    Ok(RemoveWaitlistEntryResponse {
        entry_id,
        message: format!("Removed waitlist entry {entry_id}"),
    })
}

// ============================================================================
// Missions
// ============================================================================

/// Lists the missions of a station.
///
/// # Errors
///
/// Returns an error if the station code is invalid or storage fails.
pub fn list_missions(
    persistence: &mut Persistence,
    station: &str,
) -> Result<ListMissionsResponse, ApiError> {
    let station: Station = parse_station(station)?;
    let missions: Vec<Mission> = persistence
        .load_missions(&station)
        .map_err(translate_persistence_error)?;

    Ok(ListMissionsResponse {
        station: station.code().to_string(),
        missions: missions.iter().map(mission_info).collect::<Result<_, _>>()?,
    })
}

fn parse_departure_date(raw: Option<&str>) -> Result<Option<Date>, ApiError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Date::parse(s, &Iso8601::DEFAULT).map_err(|e| ApiError::InvalidInput {
                field: String::from("departure_date"),
                message: format!("Failed to parse date '{s}': {e}"),
            })
        })
        .transpose()
}

/// Registers a mission at a station.
///
/// The route may be an array of stops or a comma-separated string.
/// Anything else is stored as the empty route.
///
/// # Errors
///
/// Returns an error if:
/// - The station code is invalid
/// - The mission number is blank
/// - The departure date is not an ISO 8601 date
/// - Storage fails
pub fn create_mission(
    persistence: &mut Persistence,
    station: &str,
    request: &CreateMissionRequest,
) -> Result<CreateMissionResponse, ApiError> {
    let station: Station = parse_station(station)?;
    let departure_date: Option<Date> = parse_departure_date(request.departure_date.as_deref())?;
    let route: Route = Route::from_value(&request.route);

    if route.is_empty() {
        warn!(
            station = %station,
            mission_number = %request.mission_number,
            "Mission created with an empty route"
        );
    }

    let executed: Executed = execute(
        persistence,
        &station,
        Command::CreateMission {
            mission_number: request.mission_number.clone(),
            aircraft: request.aircraft.clone(),
            departure_date,
            route,
        },
    )
    .map_err(translate_execute_error)?;

    let StateChange::MissionCreated(mission) = &executed.change else {
        return Err(unexpected_change(&executed.change));
    };

    info!(
        station = %station,
        mission_id = ?mission.mission_id,
        mission_number = %mission.mission_number,
        "Created mission"
    );

    Ok(CreateMissionResponse {
        mission: mission_info(mission)?,
        message: format!("Created mission {}", mission.mission_number),
    })
}

/// Returns a mission with its manifest in passenger order.
///
/// # Errors
///
/// Returns an error if the mission does not exist or storage fails.
pub fn get_mission(
    persistence: &mut Persistence,
    ranks: &RankTable,
    mission_id: i64,
) -> Result<MissionDetailResponse, ApiError> {
    let station: Station = resolve_mission_station(persistence, mission_id)?;
    let state: StationState = load_state(persistence, &station)?;

    let mission: &Mission = state.mission(mission_id).map_err(translate_domain_error)?;
    let manifest: Vec<&ManifestEntry> = state
        .ordered_manifest(mission_id, ranks)
        .map_err(translate_domain_error)?;

    Ok(MissionDetailResponse {
        mission: mission_info(mission)?,
        manifest: manifest
            .into_iter()
            .map(manifest_entry_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Lists the waitlist entries that can be placed on a mission.
///
/// # Errors
///
/// Returns an error if the mission does not exist or storage fails.
pub fn list_compatible_entries(
    persistence: &mut Persistence,
    ranks: &RankTable,
    mission_id: i64,
) -> Result<CompatibleEntriesResponse, ApiError> {
    let station: Station = resolve_mission_station(persistence, mission_id)?;
    let state: StationState = load_state(persistence, &station)?;

    let entries: Vec<&WaitlistEntry> = state
        .compatible_entries(mission_id, ranks)
        .map_err(translate_domain_error)?;

    debug!(mission_id, count = entries.len(), "Matched waitlist entries");

    Ok(CompatibleEntriesResponse {
        mission_id,
        entries: waitlist_infos(&entries)?,
    })
}

// ============================================================================
// Allocation and manifests
// ============================================================================

/// Moves a waitlist entry onto a mission manifest.
///
/// The entry must belong to the mission's station. Compatibility is not
/// checked, so an operator may place any waiting passenger.
///
/// # Errors
///
/// Returns an error if:
/// - The mission or entry does not exist in the mission's station
/// - The entry is already allocated
/// - Another request allocated the entry first
/// - Storage fails
pub fn allocate_passenger(
    persistence: &mut Persistence,
    mission_id: i64,
    request: AllocatePassengerRequest,
) -> Result<AllocatePassengerResponse, ApiError> {
    let station: Station = resolve_mission_station(persistence, mission_id)?;

    let executed: Executed = execute(
        persistence,
        &station,
        Command::AllocatePassenger {
            entry_id: request.entry_id,
            mission_id,
        },
    )
    .map_err(translate_execute_error)?;

    let StateChange::PassengerAllocated(result) = &executed.change else {
        return Err(unexpected_change(&executed.change));
    };

    info!(
        station = %station,
        entry_id = result.waitlist_entry_id,
        mission_id = result.mission_id,
        manifest_entry_id = ?result.manifest_entry.manifest_entry_id,
        "Allocated passenger"
    );

    Ok(AllocatePassengerResponse {
        entry: waitlist_entry_info(&result.updated_entry)?,
        manifest_entry: manifest_entry_info(&result.manifest_entry)?,
        message: format!(
            "Allocated {} to mission {mission_id}",
            result.updated_entry.passenger.name
        ),
    })
}

/// Adds a passenger straight to a mission manifest.
///
/// # Errors
///
/// Returns an error if the mission does not exist, a passenger field fails
/// validation, or storage fails.
pub fn add_manifest_entry(
    persistence: &mut Persistence,
    mission_id: i64,
    request: &PassengerRequest,
) -> Result<AddManifestEntryResponse, ApiError> {
    let station: Station = resolve_mission_station(persistence, mission_id)?;
    let passenger: PassengerDetails = passenger_from_request(request)?;

    let executed: Executed = execute(
        persistence,
        &station,
        Command::AddManifestEntry {
            mission_id,
            passenger,
        },
    )
    .map_err(translate_execute_error)?;

    let StateChange::ManifestEntryAdded(entry) = &executed.change else {
        return Err(unexpected_change(&executed.change));
    };

    info!(
        mission_id,
        manifest_entry_id = ?entry.manifest_entry_id,
        "Added manifest entry"
    );

    Ok(AddManifestEntryResponse {
        manifest_entry: manifest_entry_info(entry)?,
        message: format!("Added {} to mission {mission_id}", entry.passenger.name),
    })
}

/// Removes a passenger from a mission manifest.
///
/// The originating waitlist entry, if any, stays allocated.
///
/// # Errors
///
/// Returns an error if the mission or manifest entry does not exist or
/// storage fails.
pub fn remove_manifest_entry(
    persistence: &mut Persistence,
    mission_id: i64,
    manifest_entry_id: i64,
) -> Result<RemoveManifestEntryResponse, ApiError> {
    let station: Station = resolve_mission_station(persistence, mission_id)?;

    execute(
        persistence,
        &station,
        Command::RemoveManifestEntry {
            mission_id,
            manifest_entry_id,
        },
    )
    .map_err(translate_execute_error)?;

    info!(mission_id, manifest_entry_id, "Removed manifest entry");

    Ok(RemoveManifestEntryResponse {
        mission_id,
        manifest_entry_id,
        message: format!("Removed manifest entry {manifest_entry_id} from mission {mission_id}"),
    })
}

// ============================================================================
// Reference data
// ============================================================================

/// Returns the rank table in precedence order.
#[must_use]
pub fn get_rank_table(ranks: &RankTable) -> RankTableResponse {
    RankTableResponse {
        ranks: ranks.ranks().to_vec(),
    }
}

/// Returns the priority tiers with their descriptions.
#[must_use]
pub fn get_priority_table() -> PriorityTableResponse {
    PriorityTableResponse {
        priorities: priority_levels()
            .into_iter()
            .map(|level: PriorityLevel| PriorityInfo {
                tier: level.tier.value(),
                description: level.description.to_string(),
            })
            .collect(),
    }
}

// ============================================================================
// CSV import
// ============================================================================

/// Validates CSV waitlist rows without writing anything.
///
/// # Errors
///
/// Returns an error if the station code is invalid or the CSV headers are
/// unreadable or incomplete.
pub fn preview_csv_waitlist(
    station: &str,
    request: &PreviewCsvWaitlistRequest,
) -> Result<PreviewCsvWaitlistResponse, ApiError> {
    let station: Station = parse_station(station)?;
    let preview: CsvPreviewResult = preview_csv_impl(&request.csv_content)?;

    Ok(PreviewCsvWaitlistResponse {
        station: station.code().to_string(),
        rows: preview
            .rows
            .into_iter()
            .map(|row: CsvRowResult| CsvRowPreview {
                row_number: row.row_number,
                rank: row.rank,
                name: row.name,
                destination: row.destination,
                priority_tier: row.priority_tier,
                status: row.status,
                errors: row.errors,
            })
            .collect(),
        total_rows: preview.total_rows,
        valid_count: preview.valid_count,
        invalid_count: preview.invalid_count,
    })
}

fn failed_row(row_index: usize, name: Option<String>, error: String) -> CsvImportRowResult {
    CsvImportRowResult {
        row_index,
        row_number: row_index + 1,
        name,
        entry_id: None,
        status: CsvImportRowStatus::Failed,
        error: Some(error),
    }
}

/// Registers the selected CSV rows on a station waitlist.
///
/// Each row is registered independently; a failing row does not stop the
/// others. A row selected more than once is registered once and each
/// repeat is reported as failed.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `station` - The station code
/// * `request` - The CSV content and the zero-based rows to import
/// * `registered_at` - The registration time recorded for every row
///
/// # Errors
///
/// Returns an error if the station code is invalid or the CSV headers are
/// unreadable or incomplete.
pub fn import_csv_waitlist(
    persistence: &mut Persistence,
    station: &str,
    request: &ImportCsvWaitlistRequest,
    registered_at: OffsetDateTime,
) -> Result<ImportCsvWaitlistResponse, ApiError> {
    let station: Station = parse_station(station)?;
    let (header_map, records) = read_records(&request.csv_content)?;

    let mut results: Vec<CsvImportRowResult> = Vec::new();
    let mut seen: HashSet<usize> = HashSet::new();

    for &row_index in &request.selected_row_indices {
        if !seen.insert(row_index) {
            results.push(failed_row(
                row_index,
                None,
                String::from("Row already selected"),
            ));
            continue;
        }

        let record = match records.get(row_index) {
            None => {
                results.push(failed_row(
                    row_index,
                    None,
                    String::from("Row index out of bounds"),
                ));
                continue;
            }
            Some(Err(error)) => {
                results.push(failed_row(row_index, None, error.clone()));
                continue;
            }
            Some(Ok(record)) => record,
        };

        let row: CsvRowResult = parse_csv_row(row_index + 1, record, &header_map);
        let Some(passenger) = row.passenger else {
            results.push(failed_row(row_index, row.name, row.errors.join("; ")));
            continue;
        };

        match execute(
            persistence,
            &station,
            Command::RegisterWaitlistEntry {
                passenger,
                registered_at,
            },
        ) {
            Ok(executed) => results.push(CsvImportRowResult {
                row_index,
                row_number: row_index + 1,
                name: row.name,
                entry_id: executed.assigned_id,
                status: CsvImportRowStatus::Success,
                error: None,
            }),
            Err(err) => {
                let error: ApiError = translate_execute_error(err);
                warn!(station = %station, row_index, %error, "CSV row import failed");
                results.push(failed_row(row_index, row.name, error.to_string()));
            }
        }
    }

    let successful_count: usize = results
        .iter()
        .filter(|r| r.status == CsvImportRowStatus::Success)
        .count();
    let failed_count: usize = results.len() - successful_count;

    info!(
        station = %station,
        successful_count,
        failed_count,
        "Imported CSV waitlist rows"
    );

    Ok(ImportCsvWaitlistResponse {
        station: station.code().to_string(),
        total_selected: request.selected_row_indices.len(),
        successful_count,
        failed_count,
        results,
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use airlift_domain::{ManifestSource, ManifestTotals, Weights};
use serde_json::Value;

/// Passenger fields shared by waitlist registration and direct manifest adds.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PassengerRequest {
    /// Military rank code.
    pub rank: String,
    /// Passenger name.
    pub name: String,
    /// Optional identity document number.
    #[serde(default)]
    pub identity_document: Option<String>,
    /// Intended destination location code.
    #[serde(default)]
    pub destination: String,
    /// Body weight.
    pub weight_person: f64,
    /// Checked baggage weight.
    pub weight_checked_baggage: f64,
    /// Carry-on weight.
    pub weight_carry_on: f64,
    /// Priority tier (1-13).
    pub priority_tier: i64,
    /// Who registered the passenger.
    #[serde(default)]
    pub registered_by: String,
    /// Relationship of the passenger to the sponsor.
    #[serde(default)]
    pub relationship: String,
}

/// API request to list a station waitlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ListWaitlistRequest {
    /// Also return entries that were already allocated.
    #[serde(default)]
    pub include_allocated: bool,
}

/// Waitlist entry information.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaitlistEntryInfo {
    /// The entry identifier.
    pub entry_id: i64,
    /// The owning station.
    pub station: String,
    /// Military rank code.
    pub rank: String,
    /// Passenger name.
    pub name: String,
    /// Optional identity document number.
    pub identity_document: Option<String>,
    /// Intended destination.
    pub destination: String,
    /// Declared weights.
    pub weights: Weights,
    /// Priority tier.
    pub priority_tier: u8,
    /// Who registered the passenger.
    pub registered_by: String,
    /// Relationship of the passenger to the sponsor.
    pub relationship: String,
    /// Registration time (RFC 3339).
    pub registered_at: String,
    /// The mission the entry was allocated to, if any.
    pub allocated_mission_id: Option<i64>,
}

/// API response for listing a waitlist.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListWaitlistResponse {
    /// The station code.
    pub station: String,
    /// Entries in passenger order.
    pub entries: Vec<WaitlistEntryInfo>,
    /// The number of unallocated entries.
    pub waiting_count: usize,
}

/// API response for a successful waitlist registration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegisterWaitlistEntryResponse {
    /// The registered entry.
    pub entry: WaitlistEntryInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful waitlist removal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoveWaitlistEntryResponse {
    /// The removed entry.
    pub entry_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to create a mission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateMissionRequest {
    /// The operational mission number.
    pub mission_number: String,
    /// Optional aircraft designation.
    #[serde(default)]
    pub aircraft: Option<String>,
    /// Optional departure date (ISO 8601, `YYYY-MM-DD`).
    #[serde(default)]
    pub departure_date: Option<String>,
    /// The route, as an array of stops or a comma-separated string.
    #[serde(default)]
    pub route: Value,
}

/// Mission information without its manifest.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissionInfo {
    /// The mission identifier.
    pub mission_id: i64,
    /// The owning station.
    pub station: String,
    /// The operational mission number.
    pub mission_number: String,
    /// Aircraft designation.
    pub aircraft: Option<String>,
    /// Departure date (ISO 8601).
    pub departure_date: Option<String>,
    /// Route stops, origin first.
    pub route: Vec<String>,
    /// Manifest totals.
    pub totals: ManifestTotals,
}

/// API response for listing missions.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListMissionsResponse {
    /// The station code.
    pub station: String,
    /// Missions in creation order.
    pub missions: Vec<MissionInfo>,
}

/// API response for a successful mission creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateMissionResponse {
    /// The created mission.
    pub mission: MissionInfo,
    /// A success message.
    pub message: String,
}

/// Manifest entry information.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ManifestEntryInfo {
    /// The manifest entry identifier.
    pub manifest_entry_id: i64,
    /// The mission holding the entry.
    pub mission_id: i64,
    /// Military rank code.
    pub rank: String,
    /// Passenger name.
    pub name: String,
    /// Optional identity document number.
    pub identity_document: Option<String>,
    /// Destination.
    pub destination: String,
    /// Declared weights.
    pub weights: Weights,
    /// Priority tier.
    pub priority_tier: u8,
    /// Who registered the passenger.
    pub registered_by: String,
    /// Relationship of the passenger to the sponsor.
    pub relationship: String,
    /// Whether the passenger was moved from the waitlist.
    pub from_waitlist: bool,
    /// The originating waitlist entry, if any.
    pub source: ManifestSource,
}

/// API response for a mission with its ordered manifest.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissionDetailResponse {
    /// The mission.
    pub mission: MissionInfo,
    /// The manifest in passenger order.
    pub manifest: Vec<ManifestEntryInfo>,
}

/// API response for the compatibility view of a mission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompatibleEntriesResponse {
    /// The mission queried.
    pub mission_id: i64,
    /// Waitlist entries that can be placed on the mission, in passenger order.
    pub entries: Vec<WaitlistEntryInfo>,
}

/// API request to allocate a waitlist entry to a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocatePassengerRequest {
    /// The waitlist entry to allocate.
    pub entry_id: i64,
}

/// API response for a successful allocation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AllocatePassengerResponse {
    /// The allocated waitlist entry, now carrying its mission.
    pub entry: WaitlistEntryInfo,
    /// The manifest entry created for the passenger.
    pub manifest_entry: ManifestEntryInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful direct manifest add.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AddManifestEntryResponse {
    /// The created manifest entry.
    pub manifest_entry: ManifestEntryInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful manifest removal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoveManifestEntryResponse {
    /// The mission that held the entry.
    pub mission_id: i64,
    /// The removed entry.
    pub manifest_entry_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for the rank table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RankTableResponse {
    /// Rank codes, highest precedence first.
    pub ranks: Vec<String>,
}

/// A priority tier and its description.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PriorityInfo {
    /// The tier number.
    pub tier: u8,
    /// Display description.
    pub description: String,
}

/// API response for the priority table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PriorityTableResponse {
    /// Tiers, highest precedence first.
    pub priorities: Vec<PriorityInfo>,
}

/// API request to preview a CSV waitlist upload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewCsvWaitlistRequest {
    /// The raw CSV content.
    pub csv_content: String,
}

/// Status of a CSV row validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvRowStatus {
    /// Row is valid and can be imported.
    Valid,
    /// Row has validation errors and cannot be imported.
    Invalid,
}

/// Preview of a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CsvRowPreview {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The parsed rank (if present).
    pub rank: Option<String>,
    /// The parsed name (if present).
    pub name: Option<String>,
    /// The parsed destination (if present).
    pub destination: Option<String>,
    /// The parsed priority tier (if valid).
    pub priority_tier: Option<u8>,
    /// The row status.
    pub status: CsvRowStatus,
    /// Zero or more validation errors.
    pub errors: Vec<String>,
}

/// API response for a CSV preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewCsvWaitlistResponse {
    /// The station the rows would be registered at.
    pub station: String,
    /// Per-row results.
    pub rows: Vec<CsvRowPreview>,
    /// Total number of rows.
    pub total_rows: usize,
    /// Number of valid rows.
    pub valid_count: usize,
    /// Number of invalid rows.
    pub invalid_count: usize,
}

/// API request to import selected CSV rows.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportCsvWaitlistRequest {
    /// The raw CSV content.
    pub csv_content: String,
    /// Zero-based indices of the data rows to import.
    pub selected_row_indices: Vec<usize>,
}

/// Status of a single CSV row import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvImportRowStatus {
    /// Row was successfully imported.
    Success,
    /// Row import failed.
    Failed,
}

/// Result of importing a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CsvImportRowResult {
    /// Zero-based row index.
    pub row_index: usize,
    /// Row number (1-based, excluding header).
    pub row_number: usize,
    /// The passenger name, if present.
    pub name: Option<String>,
    /// The created waitlist entry, on success.
    pub entry_id: Option<i64>,
    /// The import status.
    pub status: CsvImportRowStatus,
    /// Error message if the import failed.
    pub error: Option<String>,
}

/// API response for a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportCsvWaitlistResponse {
    /// The station imported into.
    pub station: String,
    /// Total number of rows selected for import.
    pub total_selected: usize,
    /// Number of rows imported.
    pub successful_count: usize,
    /// Number of rows that failed.
    pub failed_count: usize,
    /// Per-row results.
    pub results: Vec<CsvImportRowResult>,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Airlift allocation office.
//!
//! Request and response types are plain DTOs, distinct from the domain
//! types. Handlers are synchronous and take the persistence layer and the
//! configured rank table as arguments; the HTTP server owns both.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod csv_import;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_import::{CsvPreviewResult, CsvRowResult};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_execute_error,
    translate_persistence_error,
};
pub use handlers::{
    add_manifest_entry, allocate_passenger, create_mission, get_mission, get_priority_table,
    get_rank_table, import_csv_waitlist, list_compatible_entries, list_missions, list_waitlist,
    preview_csv_waitlist, register_waitlist_entry, remove_manifest_entry, remove_waitlist_entry,
};
pub use request_response::{
    AddManifestEntryResponse, AllocatePassengerRequest, AllocatePassengerResponse,
    CompatibleEntriesResponse, CreateMissionRequest, CreateMissionResponse, CsvImportRowResult,
    CsvImportRowStatus, CsvRowPreview, CsvRowStatus, ImportCsvWaitlistRequest,
    ImportCsvWaitlistResponse, ListMissionsResponse, ListWaitlistRequest, ListWaitlistResponse,
    ManifestEntryInfo, MissionDetailResponse, MissionInfo, PassengerRequest,
    PreviewCsvWaitlistRequest, PreviewCsvWaitlistResponse, PriorityInfo, PriorityTableResponse,
    RankTableResponse, RegisterWaitlistEntryResponse, RemoveManifestEntryResponse,
    RemoveWaitlistEntryResponse, WaitlistEntryInfo,
};

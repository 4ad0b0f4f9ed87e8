// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV parsing and validation for bulk waitlist import.
//!
//! Parsing never touches storage. The import handler re-parses the rows it
//! was asked to import and registers each one through the core.

use airlift_domain::{PassengerDetails, PriorityTier, Weights, validate_passenger_details};
use csv::StringRecord;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::request_response::CsvRowStatus;

/// A single row result from CSV validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRowResult {
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
    /// The passenger, when the row is valid.
    pub passenger: Option<PassengerDetails>,
    /// The row status.
    pub status: CsvRowStatus,
    /// Zero or more validation errors.
    pub errors: Vec<String>,
}

/// Result of CSV validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvPreviewResult {
    /// Per-row validation results.
    pub rows: Vec<CsvRowResult>,
    /// Total number of rows.
    pub total_rows: usize,
    /// Number of valid rows.
    pub valid_count: usize,
    /// Number of invalid rows.
    pub invalid_count: usize,
}

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &[
    "rank",
    "name",
    "destination",
    "weight_person",
    "weight_checked_baggage",
    "weight_carry_on",
    "priority_tier",
];

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, ApiError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), idx);
    }

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !header_map.contains_key(*required))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Normalized header positions plus every data record, in file order.
pub type CsvRecords = (HashMap<String, usize>, Vec<Result<StringRecord, String>>);

/// Reads the headers and every data record of a CSV document.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the headers are unreadable or
/// incomplete.
pub fn read_records(csv_content: &str) -> Result<CsvRecords, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let records: Vec<Result<StringRecord, String>> = reader
        .records()
        .map(|r| r.map_err(|e| format!("CSV parse error: {e}")))
        .collect();

    Ok((header_map, records))
}

#[allow(clippy::option_if_let_else)]
fn parse_weight(
    get_field: &impl Fn(&str) -> Option<String>,
    field_name: &str,
    errors: &mut Vec<String>,
) -> f64 {
    match get_field(field_name) {
        Some(raw) => raw.parse::<f64>().unwrap_or_else(|_| {
            errors.push(format!("{field_name}: invalid number '{raw}'"));
            0.0
        }),
        None => {
            errors.push(format!("{field_name}: required field is missing or empty"));
            0.0
        }
    }
}

/// Validates one CSV record and builds the passenger it describes.
#[must_use]
pub fn parse_csv_row(
    row_number: usize,
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> CsvRowResult {
    let mut errors: Vec<String> = Vec::new();

    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let rank: Option<String> = get_field("rank");
    let name: Option<String> = get_field("name");
    // A blank destination is allowed; the entry is simply never matched.
    let destination: Option<String> = get_field("destination");

    if rank.is_none() {
        errors.push(String::from("rank: required field is missing or empty"));
    }
    if name.is_none() {
        errors.push(String::from("name: required field is missing or empty"));
    }

    let weight_person: f64 = parse_weight(&get_field, "weight_person", &mut errors);
    let weight_checked_baggage: f64 =
        parse_weight(&get_field, "weight_checked_baggage", &mut errors);
    let weight_carry_on: f64 = parse_weight(&get_field, "weight_carry_on", &mut errors);

    let priority: Option<PriorityTier> = match get_field("priority_tier") {
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) => match PriorityTier::new(value) {
                Ok(tier) => Some(tier),
                Err(e) => {
                    errors.push(format!("priority_tier: {e}"));
                    None
                }
            },
            Err(_) => {
                errors.push(format!("priority_tier: invalid number '{raw}'"));
                None
            }
        },
        None => {
            errors.push(String::from(
                "priority_tier: required field is missing or empty",
            ));
            None
        }
    };

    let passenger: Option<PassengerDetails> = match (&rank, &name, priority) {
        (Some(rank), Some(name), Some(priority)) if errors.is_empty() => {
            let passenger: PassengerDetails = PassengerDetails {
                rank: rank.clone(),
                name: name.clone(),
                identity_document: get_field("identity_document"),
                destination: destination.clone().unwrap_or_default(),
                weights: Weights::new(weight_person, weight_checked_baggage, weight_carry_on),
                priority,
                registered_by: get_field("registered_by").unwrap_or_default(),
                relationship: get_field("relationship").unwrap_or_default(),
            };
            match validate_passenger_details(&passenger) {
                Ok(()) => Some(passenger),
                Err(e) => {
                    errors.push(format!("validation: {e}"));
                    None
                }
            }
        }
        _ => None,
    };

    let status: CsvRowStatus = if passenger.is_some() {
        CsvRowStatus::Valid
    } else {
        CsvRowStatus::Invalid
    };

    CsvRowResult {
        row_number,
        rank,
        name,
        destination,
        priority_tier: priority.map(PriorityTier::value),
        passenger,
        status,
        errors,
    }
}

fn unreadable_row(row_number: usize, error: String) -> CsvRowResult {
    CsvRowResult {
        row_number,
        rank: None,
        name: None,
        destination: None,
        priority_tier: None,
        passenger: None,
        status: CsvRowStatus::Invalid,
        errors: vec![error],
    }
}

/// Previews and validates CSV waitlist data without persisting.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV content as a string
///
/// # Returns
///
/// * `Ok(CsvPreviewResult)` with per-row validation results
/// * `Err(ApiError)` if the CSV headers are invalid
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the headers cannot be read or
/// a required header is missing.
pub fn preview_csv_waitlist(csv_content: &str) -> Result<CsvPreviewResult, ApiError> {
    let (header_map, records) = read_records(csv_content)?;

    let rows: Vec<CsvRowResult> = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| match record {
            Ok(record) => parse_csv_row(idx + 1, &record, &header_map),
            Err(error) => unreadable_row(idx + 1, error),
        })
        .collect();

    let total_rows: usize = rows.len();
    let valid_count: usize = rows
        .iter()
        .filter(|r| r.status == CsvRowStatus::Valid)
        .count();

    Ok(CsvPreviewResult {
        rows,
        total_rows,
        valid_count,
        invalid_count: total_rows - valid_count,
    })
}

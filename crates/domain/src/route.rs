// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission route normalization.
//!
//! A route arrives either as an ordered list of location codes or as a
//! single delimited string (`"SBSM, SBRF"`). Both normalize to the same
//! flat stop sequence: segments are trimmed, blank segments are dropped,
//! and order is preserved. Normalization never fails; anything that cannot
//! be read as a route becomes the empty route.

use serde::Serialize;
use serde_json::Value;

/// Delimiter used by the string form of a route.
pub const ROUTE_DELIMITER: char = ',';

/// A normalized mission route (origin first).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Route {
    stops: Vec<String>,
}

impl Route {
    /// Builds a route from an already split sequence of stops.
    ///
    /// Each stop is trimmed and blank stops are dropped. Stops are not
    /// split further.
    #[must_use]
    pub fn from_stops<I, S>(stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stops: stops
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Builds a route from its delimited string form.
    #[must_use]
    pub fn parse_delimited(raw: &str) -> Self {
        Self::from_stops(raw.split(ROUTE_DELIMITER))
    }

    /// Builds a route from a loosely typed JSON value.
    ///
    /// - an array contributes its string elements (other elements are skipped)
    /// - a string is parsed as the delimited form
    /// - anything else (null, numbers, objects) is the empty route
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::from_stops(items.iter().filter_map(Value::as_str)),
            Value::String(raw) => Self::parse_delimited(raw),
            _ => Self::default(),
        }
    }

    /// Builds a route from its stored text form.
    ///
    /// Stored routes are JSON; text that is not valid JSON is read as the
    /// delimited form.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        serde_json::from_str::<Value>(raw)
            .map_or_else(|_| Self::parse_delimited(raw), |v| Self::from_value(&v))
    }

    /// Returns the stored text form (a JSON array of stops).
    #[must_use]
    pub fn to_stored(&self) -> String {
        Value::Array(self.stops.iter().cloned().map(Value::String).collect()).to_string()
    }

    /// Returns the stops in order.
    #[must_use]
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Returns the origin, if the route has any stops.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.stops.first().map(String::as_str)
    }

    /// Returns whether the route has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns whether `destination` appears anywhere on the route.
    ///
    /// Exact, case-sensitive match only.
    #[must_use]
    pub fn reaches(&self, destination: &str) -> bool {
        self.stops.iter().any(|stop| stop == destination)
    }

    /// Returns the route joined with the delimiter (e.g. `"SBSM, SBRF"`).
    #[must_use]
    pub fn to_delimited(&self) -> String {
        self.stops.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delimited_and_sequence_normalize_identically() {
        let from_string: Route = Route::parse_delimited("SBSM, SBRF");
        let from_sequence: Route = Route::from_stops(["SBSM", "SBRF"]);

        assert_eq!(from_string, from_sequence);
        assert_eq!(from_string.stops(), ["SBSM", "SBRF"]);
    }

    #[test]
    fn test_blank_segments_are_dropped() {
        let route: Route = Route::parse_delimited(" SBSM ,, ,SBRF,");
        assert_eq!(route.stops(), ["SBSM", "SBRF"]);

        let route: Route = Route::from_stops(["", "  ", "SBGL"]);
        assert_eq!(route.stops(), ["SBGL"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let route: Route = Route::parse_delimited("SBCO,SBBR,SBMN,SBBR");
        assert_eq!(route.stops(), ["SBCO", "SBBR", "SBMN", "SBBR"]);
        assert_eq!(route.origin(), Some("SBCO"));
    }

    #[test]
    fn test_malformed_values_degrade_to_empty() {
        assert!(Route::from_value(&Value::Null).is_empty());
        assert!(Route::from_value(&json!(42)).is_empty());
        assert!(Route::from_value(&json!({"stops": ["SBSM"]})).is_empty());
        assert!(Route::parse_delimited("").is_empty());
        assert!(Route::parse_delimited(" , ,").is_empty());
    }

    #[test]
    fn test_array_skips_non_string_items() {
        let route: Route = Route::from_value(&json!(["SBSM", 7, null, " SBRF "]));
        assert_eq!(route.stops(), ["SBSM", "SBRF"]);
    }

    #[test]
    fn test_string_value_is_parsed_as_delimited() {
        let route: Route = Route::from_value(&json!("SBSM, SBRF"));
        assert_eq!(route, Route::from_stops(["SBSM", "SBRF"]));
    }

    #[test]
    fn test_stored_form_reads_json_and_legacy_text() {
        let route: Route = Route::from_stops(["SBSM", "SBRF"]);
        let stored: String = route.to_stored();

        assert_eq!(Route::from_stored(&stored), route);
        assert_eq!(Route::from_stored("SBSM, SBRF"), route);
        assert!(Route::from_stored("").is_empty());
    }

    #[test]
    fn test_reaches_is_exact_match() {
        let route: Route = Route::from_stops(["SBSM", "SBRF"]);

        assert!(route.reaches("SBSM"));
        assert!(route.reaches("SBRF"));
        assert!(!route.reaches("sbrf"));
        assert!(!route.reaches("SBR"));
        assert!(!route.reaches(""));
    }
}

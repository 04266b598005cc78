//! Request bodies for the shopping and calendar-grid endpoints.
//!
//! Both endpoints take a `f.req=`-prefixed form body holding a
//! percent-encoded `[null, "<json>"]` wrapper, where the inner JSON is
//! a positional array. Field meaning is carried entirely by position,
//! so the builders below emit every placeholder slot explicitly.

use serde_json::{json, Value};

use crate::model::FlightResult;
use crate::query::{FlightSegment, SearchFilters};

/// One segment row of the shopping request.
///
/// An already-chosen outbound itinerary goes into the selected-flight
/// slot (index 8), one row per leg, which makes the follow-up call
/// return matching inbound flights instead of outbound ones.
fn segment_row(
    filters: &SearchFilters,
    segment: &FlightSegment,
    selected: Option<&FlightResult>,
) -> Value {
    let airlines = match &filters.airlines {
        Some(codes) => {
            let mut sorted = codes.clone();
            sorted.sort();
            json!(sorted)
        }
        None => Value::Null,
    };

    let selected_rows = match selected {
        Some(flight) => Value::Array(
            flight
                .legs
                .iter()
                .map(|leg| {
                    json!([
                        leg.airline.code,
                        leg.departure_datetime.date().format("%Y-%m-%d").to_string(),
                        leg.departure_airport.code,
                        leg.arrival_airport.code,
                        leg.flight_number,
                    ])
                })
                .collect(),
        ),
        None => Value::Null,
    };

    let max_duration = match filters.max_duration {
        Some(minutes) => json!([minutes]),
        None => Value::Null,
    };

    let layover_airports = match &filters.layover_airports {
        Some(codes) => json!(codes),
        None => Value::Null,
    };

    json!([
        [[[segment.origin, 0]]],
        [[[segment.destination, 0]]],
        Value::Null, // time restrictions
        filters.stops.wire_value(),
        airlines,
        Value::Null,
        segment.date,
        max_duration,
        selected_rows,
        layover_airports,
        Value::Null,
        Value::Null,
        filters.layover_max_duration,
        Value::Null, // emissions
        3,
    ])
}

/// The shared inner filter block (slot 1 of both outer shapes).
fn inner_block(filters: &SearchFilters, selected: Option<&FlightResult>) -> Value {
    let segments: Vec<Value> = filters
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            // Only the first segment carries the selected itinerary.
            let sel = if i == 0 { selected } else { None };
            segment_row(filters, segment, sel)
        })
        .collect();

    let price_limit = match filters.max_price {
        Some(max) => json!([Value::Null, max]),
        None => Value::Null,
    };

    json!([
        Value::Null,
        Value::Null,
        filters.trip.wire_value(),
        Value::Null,
        [],
        filters.cabin.wire_value(),
        [
            filters.passengers.adults,
            filters.passengers.children,
            filters.passengers.infants_on_lap,
            filters.passengers.infants_in_seat,
        ],
        price_limit,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        segments,
        Value::Null,
        Value::Null,
        Value::Null,
        1,
    ])
}

/// Full positional structure for the shopping endpoint.
pub fn format(filters: &SearchFilters, selected: Option<&FlightResult>) -> Value {
    json!([
        [],
        inner_block(filters, selected),
        filters.sort_by.wire_value(),
        0,
        0,
        2,
    ])
}

/// Full positional structure for the calendar-grid endpoint: same
/// inner block, but the outer array trades the sort/constants tail for
/// the search date range.
pub fn format_calendar(filters: &SearchFilters, from_date: &str, to_date: &str) -> Value {
    json!([Value::Null, inner_block(filters, None), [from_date, to_date]])
}

/// Compact-serialize, wrap as `[null, "<json>"]`, percent-encode.
/// The caller prepends `f.req=`.
fn encode_formatted(formatted: &Value) -> String {
    let inner = serde_json::to_string(formatted).expect("filters serialize");
    let wrapped = serde_json::to_string(&json!([Value::Null, inner])).expect("wrapper serialize");
    urlencoding::encode(&wrapped).into_owned()
}

pub fn encode(filters: &SearchFilters, selected: Option<&FlightResult>) -> String {
    encode_formatted(&format(filters, selected))
}

pub fn encode_calendar(filters: &SearchFilters, from_date: &str, to_date: &str) -> String {
    encode_formatted(&format_calendar(filters, from_date, to_date))
}

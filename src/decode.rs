//! Envelope unwrapping and positional decoding for the shopping and
//! calendar-grid payloads.
//!
//! The payloads are deeply nested heterogeneous arrays with meaning
//! carried by index. The paths below were recorded from live traffic
//! and are not guaranteed stable; every read goes through `seek`/`pick`
//! so a layout shift is contained to the path tables.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::warn;

use crate::codes;
use crate::error::FlightError;
use crate::model::{Airport, DatePrice, FlightLeg, FlightResult, Price};

const XSSI_GUARD: &str = ")]}'";

/// Price lives at `[1][0][-1]` in the enhanced layout and `[1][0][1]`
/// in the basic one.
const PRICE_PATHS: &[&[i64]] = &[&[1, 0, -1], &[1, 0, 1]];
const DURATION_PATHS: &[&[i64]] = &[&[0, 9]];
/// Airline code slots, most reliable first.
const AIRLINE_PATHS: &[&[i64]] = &[&[22, 0], &[0, 0], &[1, 0]];
const FLIGHT_NUMBER_PATHS: &[&[i64]] = &[&[22, 1]];
const CALENDAR_PRICE_PATHS: &[&[i64]] = &[&[2, 0, 1]];

/// Strip the anti-hijacking guard and reach the inner payload: the
/// outer response is a JSON array whose `[0][2]` slot holds a further
/// JSON-encoded string containing the actual flight data. A null or
/// empty slot means the backend had no results, which is not an error.
pub fn unwrap_envelope(text: &str) -> Result<Option<Value>, FlightError> {
    let body = text.trim_start();
    let body = body.strip_prefix(XSSI_GUARD).unwrap_or(body);

    let outer: Value = serde_json::from_str(body.trim_start())
        .map_err(|e| FlightError::MalformedEnvelope(format!("outer array: {e}")))?;

    let inner_text = match seek(&outer, &[0, 2]) {
        None | Some(Value::Null) => return Ok(None),
        Some(slot) => slot.as_str().ok_or_else(|| {
            FlightError::MalformedEnvelope("payload slot [0][2] is not a string".into())
        })?,
    };

    if inner_text.is_empty() {
        return Ok(None);
    }

    let inner: Value = serde_json::from_str(inner_text)
        .map_err(|e| FlightError::MalformedEnvelope(format!("inner payload: {e}")))?;
    Ok(Some(inner))
}

/// Walk one index path into nested arrays. Negative indices count from
/// the end of the enclosing array.
pub fn seek<'a>(value: &'a Value, path: &[i64]) -> Option<&'a Value> {
    let mut current = value;
    for &idx in path {
        let arr = current.as_array()?;
        let i = if idx < 0 {
            arr.len().checked_sub(idx.unsigned_abs() as usize)?
        } else {
            idx as usize
        };
        current = arr.get(i)?;
    }
    Some(current)
}

/// First candidate path holding a non-null value.
pub fn pick<'a>(value: &'a Value, paths: &[&[i64]]) -> Option<&'a Value> {
    paths
        .iter()
        .find_map(|path| seek(value, path).filter(|v| !v.is_null()))
}

fn pick_f64(value: &Value, paths: &[&[i64]]) -> Option<f64> {
    paths
        .iter()
        .find_map(|path| seek(value, path).and_then(Value::as_f64))
}

fn pick_u32(value: &Value, paths: &[&[i64]], default: u32) -> u32 {
    paths
        .iter()
        .find_map(|path| seek(value, path).and_then(Value::as_u64))
        .map(|v| v as u32)
        .unwrap_or(default)
}

fn pick_str<'a>(value: &'a Value, paths: &[&[i64]]) -> Option<&'a str> {
    paths
        .iter()
        .find_map(|path| seek(value, path).and_then(Value::as_str))
}

/// Fixed fallback for unparseable timestamps. Decoding must be
/// deterministic, so the wall clock is never consulted.
pub(crate) fn sentinel_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid sentinel datetime")
}

/// Date arrives as `[year, month, day]`, time as `[hour, minute]`.
/// Minute-less times are common; missing month/day default to 1.
fn parse_datetime(date_arr: Option<&Value>, time_arr: Option<&Value>) -> NaiveDateTime {
    let date = date_arr.and_then(|d| {
        let year = seek(d, &[0])?.as_i64()?;
        let month = seek(d, &[1]).and_then(Value::as_u64).unwrap_or(1);
        let day = seek(d, &[2]).and_then(Value::as_u64).unwrap_or(1);
        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
    });

    let (hour, minute) = time_arr
        .map(|t| {
            (
                seek(t, &[0]).and_then(Value::as_u64).unwrap_or(0) as u32,
                seek(t, &[1]).and_then(Value::as_u64).unwrap_or(0) as u32,
            )
        })
        .unwrap_or((0, 0));

    date.and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_else(sentinel_datetime)
}

/// Airport code for a leg: the documented index first, then a scan of
/// the nearby slots for anything shaped like an IATA code. The same
/// scan serves both ends of the leg, as observed in live payloads.
fn airport_at(leg: &Value, index: i64) -> Airport {
    if let Some(code) = seek(leg, &[index]).and_then(Value::as_str) {
        if !code.is_empty() {
            return codes::airport(code);
        }
    }
    for alt in 3..=7 {
        if let Some(code) = seek(leg, &[alt]).and_then(Value::as_str) {
            if code.len() == 3 {
                return codes::airport(code);
            }
        }
    }
    codes::airport("")
}

fn decode_leg(leg: &Value) -> Option<FlightLeg> {
    leg.as_array()?;

    let airline_code = pick_str(leg, AIRLINE_PATHS).unwrap_or("");
    let flight_number = pick_str(leg, FLIGHT_NUMBER_PATHS)
        .unwrap_or("")
        .to_string();

    Some(FlightLeg {
        airline: codes::airline(airline_code),
        flight_number,
        departure_airport: airport_at(leg, 3),
        arrival_airport: airport_at(leg, 6),
        departure_datetime: parse_datetime(seek(leg, &[20]), seek(leg, &[8])),
        arrival_datetime: parse_datetime(seek(leg, &[21]), seek(leg, &[10])),
        duration_minutes: pick_u32(leg, &[&[11]], 0),
    })
}

/// Decode one `[flight, price]` record. Field failures degrade to
/// defaults; a record is dropped only when its leg list is absent or
/// nothing in it decodes.
pub fn decode_record(data: &Value) -> Option<FlightResult> {
    let legs_data = seek(data, &[0, 2]).and_then(Value::as_array)?;
    if legs_data.is_empty() {
        return None;
    }

    let legs: Vec<FlightLeg> = legs_data
        .iter()
        .filter_map(|leg| {
            let decoded = decode_leg(leg);
            if decoded.is_none() {
                warn!("skipping malformed flight leg");
            }
            decoded
        })
        .collect();

    if legs.is_empty() {
        warn!("record has no decodable legs, dropping");
        return None;
    }

    let price = Price::from_amount(pick_f64(data, PRICE_PATHS));
    let duration_minutes = pick_u32(data, DURATION_PATHS, 0);

    Some(FlightResult::new(legs, price, duration_minutes))
}

/// Flight records live under inner indices 2 and 3, each wrapping its
/// record list one level down.
pub fn decode_payload(inner: &Value) -> Vec<FlightResult> {
    let mut results = Vec::new();
    for idx in [2i64, 3] {
        let Some(group) = seek(inner, &[idx, 0]).and_then(Value::as_array) else {
            continue;
        };
        for item in group {
            match decode_record(item) {
                Some(result) => results.push(result),
                None => warn!("dropping undecodable flight record"),
            }
        }
    }
    results
}

/// Calendar-grid rows sit in the inner payload's last element: date
/// string at `[0]`, price at `[2][0][1]`. Malformed rows are skipped.
pub fn decode_calendar(inner: &Value) -> Vec<DatePrice> {
    let Some(rows) = seek(inner, &[-1]).and_then(Value::as_array) else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let date_str = seek(row, &[0]).and_then(Value::as_str)?;
            let Some(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok() else {
                warn!("skipping calendar row with malformed date {date_str}");
                return None;
            };
            let Some(price) = pick_f64(row, CALENDAR_PRICE_PATHS) else {
                warn!("skipping calendar row for {date_str} without a price");
                return None;
            };
            Some(DatePrice { date, price })
        })
        .collect()
}

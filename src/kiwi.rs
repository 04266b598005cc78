//! Kiwi.com umbrella GraphQL client and decoder.
//!
//! Unlike the shopping endpoint, this backend returns named (if deeply
//! nested) objects: itinerary → sector → sectorSegments → segment with
//! source/destination/hiddenDestination sub-objects. A non-empty
//! `hiddenDestination` marks a hidden-city fare whose last leg the
//! traveler discards.

use chrono::NaiveDateTime;
use serde_json::{json, Value};
use tracing::warn;

use crate::codes;
use crate::decode::sentinel_datetime;
use crate::error::FlightError;
use crate::fetch::{self, FetchOptions};
use crate::model::{Airport, FlightLeg, FlightResult, HiddenCity, Price};
use crate::query::{SearchFilters, TripType};

pub const GRAPHQL_ENDPOINT: &str = "https://api.skypicker.com/umbrella/v2/graphql";

/// Backend-side result cap; callers narrow further with their own limit.
const RESULT_LIMIT: usize = 30;

/// Session identifiers recorded from the web client. The endpoint
/// rejects requests without them.
const HEADERS: &[(&str, &str)] = &[
    ("content-type", "application/json"),
    (
        "kw-skypicker-visitor-uniqid",
        "b500f05c-8234-4a94-82a7-fb5dc02340a9",
    ),
    (
        "kw-umbrella-token",
        "0d23674b463dadee841cc65da51e34fe47bbbe895ae13b69d42ece267c7a2f51",
    ),
    ("kw-x-rand-id", "07d338ea"),
    ("origin", "https://www.kiwi.com"),
    ("referer", "https://www.kiwi.com/en/search/tiles/--/--/anytime/anytime"),
];

const ONEWAY_QUERY: &str = r#"
query SearchOneWayItinerariesQuery(
  $search: SearchOnewayInput
  $filter: ItinerariesFilterInput
  $options: ItinerariesOptionsInput
) {
  onewayItineraries(search: $search, filter: $filter, options: $options) {
    __typename
    ... on AppError {
      error: message
    }
    ... on Itineraries {
      metadata {
        itinerariesCount
        hasMorePending
      }
      itineraries {
        __typename
        ... on ItineraryOneWay {
          id
          price {
            amount
          }
          priceEur {
            amount
          }
          duration
          travelHack {
            isTrueHiddenCity
            isThrowawayTicket
          }
          sector {
            sectorSegments {
              segment {
                source {
                  localTime
                  station {
                    code
                    name
                  }
                }
                destination {
                  localTime
                  station {
                    code
                    name
                  }
                }
                hiddenDestination {
                  code
                  name
                }
                carrier {
                  code
                  name
                }
                code
                duration
              }
            }
          }
        }
      }
    }
  }
}
"#;

const RETURN_QUERY: &str = r#"
query SearchReturnItinerariesQuery(
  $search: SearchReturnInput
  $filter: ItinerariesFilterInput
  $options: ItinerariesOptionsInput
) {
  returnItineraries(search: $search, filter: $filter, options: $options) {
    __typename
    ... on AppError {
      error: message
    }
    ... on Itineraries {
      metadata {
        itinerariesCount
        hasMorePending
      }
      itineraries {
        __typename
        ... on ItineraryReturn {
          id
          price {
            amount
          }
          priceEur {
            amount
          }
          duration
          travelHack {
            isTrueHiddenCity
            isThrowawayTicket
          }
          outbound {
            duration
            sectorSegments {
              segment {
                source {
                  localTime
                  station {
                    code
                    name
                  }
                }
                destination {
                  localTime
                  station {
                    code
                    name
                  }
                }
                hiddenDestination {
                  code
                  name
                }
                carrier {
                  code
                  name
                }
                code
                duration
              }
            }
          }
          inbound {
            duration
            sectorSegments {
              segment {
                source {
                  localTime
                  station {
                    code
                    name
                  }
                }
                destination {
                  localTime
                  station {
                    code
                    name
                  }
                }
                hiddenDestination {
                  code
                  name
                }
                carrier {
                  code
                  name
                }
                code
                duration
              }
            }
          }
        }
      }
    }
  }
}
"#;

fn station_id(code: &str) -> String {
    format!("Station:airport:{}", code.to_ascii_uppercase())
}

fn day_range(date: &str) -> Value {
    json!({
        "start": format!("{date}T00:00:00"),
        "end": format!("{date}T23:59:59"),
    })
}

/// GraphQL variables for a one-way search. The hidden-city, throwaway
/// and self-transfer switches are what make this backend interesting,
/// so they are always on.
pub fn build_variables(filters: &SearchFilters, limit: usize) -> Value {
    let segment = &filters.segments[0];

    let mut variables = json!({
        "search": {
            "itinerary": {
                "source": { "ids": [station_id(&segment.origin)] },
                "destination": { "ids": [station_id(&segment.destination)] },
                "outboundDepartureDate": day_range(&segment.date),
            },
            "passengers": {
                "adults": filters.passengers.adults,
                "children": filters.passengers.children,
                "infants": filters.passengers.infants_in_seat + filters.passengers.infants_on_lap,
                "adultsHoldBags": [0],
                "adultsHandBags": [1],
            },
            "cabinClass": {
                "cabinClass": filters.cabin.kiwi_name(),
                "applyMixedClasses": false,
            },
        },
        "filter": {
            "allowDifferentStationConnection": true,
            "enableSelfTransfer": true,
            "enableThrowAwayTicketing": true,
            "enableTrueHiddenCity": true,
            "transportTypes": ["FLIGHT"],
            "contentProviders": ["KIWI"],
            "limit": limit,
        },
        "options": {
            "sortBy": "PRICE",
            "currency": filters.currency.to_ascii_lowercase(),
            "locale": filters.language,
            "partner": "skypicker",
            "partnerMarket": filters.region.to_ascii_lowercase(),
            "storeSearch": false,
            "serverToken": Value::Null,
        },
    });

    if let Some(max_stops) = filters.stops.stop_count() {
        variables["filter"]["maxStopsCount"] = json!(max_stops);
    }

    variables
}

/// Variables for a return search: adds the inbound date window and the
/// change-of-station switches the web client sends for round trips.
pub fn build_return_variables(filters: &SearchFilters, limit: usize) -> Value {
    let mut variables = build_variables(filters, limit);

    if let Some(ret) = filters.segments.get(1) {
        variables["search"]["itinerary"]["inboundDepartureDate"] = day_range(&ret.date);
    }
    variables["filter"]["allowReturnFromDifferentCity"] = json!(true);
    variables["filter"]["allowChangeInboundDestination"] = json!(true);
    variables["filter"]["allowChangeInboundSource"] = json!(true);

    variables
}

/// Walk `data.<root>` and discriminate on `__typename`: `Itineraries`
/// is the success arm, `AppError` carries a message, anything else is
/// schema drift.
pub fn unwrap_itineraries<'a>(body: &'a Value, root: &str) -> Result<&'a Value, FlightError> {
    let data = body
        .get("data")
        .ok_or_else(|| FlightError::MalformedEnvelope("response has no data field".into()))?;

    let node = data.get(root).filter(|v| !v.is_null()).ok_or_else(|| {
        FlightError::UnexpectedShape(format!("response has no {root} field"))
    })?;

    match node["__typename"].as_str() {
        Some("Itineraries") => Ok(node),
        Some("AppError") => {
            let message = node["error"]
                .as_str()
                .unwrap_or("unknown application error");
            Err(FlightError::Backend(message.to_string()))
        }
        Some(other) => Err(FlightError::UnexpectedShape(format!(
            "unexpected __typename {other}"
        ))),
        None => Err(FlightError::UnexpectedShape(
            format!("{root} has no __typename"),
        )),
    }
}

/// Amount fields arrive as either a JSON number or a numeric string.
fn amount_of(price: &Value) -> Option<f64> {
    let amount = &price["amount"];
    amount
        .as_f64()
        .or_else(|| amount.as_str().and_then(|s| s.parse().ok()))
}

fn parse_local_time(raw: &str) -> NaiveDateTime {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%SZ",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .unwrap_or_else(sentinel_datetime)
}

fn decode_segment(segment: &Value) -> Option<FlightLeg> {
    let dep_code = segment["source"]["station"]["code"].as_str()?;
    let arr_code = segment["destination"]["station"]["code"].as_str()?;

    let duration_seconds = segment["duration"].as_u64().unwrap_or(0);

    Some(FlightLeg {
        airline: codes::airline(segment["carrier"]["code"].as_str().unwrap_or("")),
        flight_number: segment["code"].as_str().unwrap_or("").to_string(),
        departure_airport: codes::airport(dep_code),
        arrival_airport: codes::airport(arr_code),
        departure_datetime: parse_local_time(segment["source"]["localTime"].as_str().unwrap_or("")),
        arrival_datetime: parse_local_time(
            segment["destination"]["localTime"].as_str().unwrap_or(""),
        ),
        duration_minutes: (duration_seconds / 60) as u32,
    })
}

/// Decode every segment into a leg and pull the hidden-city annotation
/// from the first segment that carries a non-empty `hiddenDestination`.
fn collect_legs(segments: &[Value], is_throwaway: bool) -> (Vec<FlightLeg>, Option<HiddenCity>) {
    let mut legs = Vec::new();
    let mut hidden = None;

    for wrapper in segments {
        let segment = &wrapper["segment"];
        let Some(leg) = decode_segment(segment) else {
            warn!("skipping sector segment without station codes");
            continue;
        };

        if hidden.is_none() {
            if let Some(code) = segment["hiddenDestination"]["code"].as_str() {
                if !code.is_empty() {
                    hidden = Some(HiddenCity {
                        destination: Airport {
                            code: code.to_string(),
                            name: segment["hiddenDestination"]["name"]
                                .as_str()
                                .unwrap_or("")
                                .to_string(),
                        },
                        is_throwaway,
                    });
                }
            }
        }

        legs.push(leg);
    }

    (legs, hidden)
}

/// Decode one one-way itinerary. Dropped when it has no decodable
/// segments; there is nothing usable to return in that case.
pub fn decode_itinerary(itinerary: &Value) -> Option<FlightResult> {
    let segments = itinerary["sector"]["sectorSegments"].as_array()?;
    if segments.is_empty() {
        return None;
    }

    let is_throwaway = itinerary["travelHack"]["isThrowawayTicket"]
        .as_bool()
        .unwrap_or(false);

    let (legs, hidden) = collect_legs(segments, is_throwaway);
    if legs.is_empty() {
        warn!("itinerary has no decodable segments, dropping");
        return None;
    }

    let amount = amount_of(&itinerary["price"]).or_else(|| amount_of(&itinerary["priceEur"]));
    let duration_minutes = (itinerary["duration"].as_u64().unwrap_or(0) / 60) as u32;

    Some(
        FlightResult::new(legs, Price::from_amount(amount), duration_minutes)
            .with_hidden_city(hidden),
    )
}

fn decode_direction(
    direction: &Value,
    amount: Option<f64>,
    is_throwaway: bool,
) -> Option<FlightResult> {
    let segments = direction["sectorSegments"].as_array()?;
    if segments.is_empty() {
        return None;
    }

    let (legs, hidden) = collect_legs(segments, is_throwaway);
    if legs.is_empty() {
        return None;
    }

    let duration_minutes = (direction["duration"].as_u64().unwrap_or(0) / 60) as u32;

    Some(
        FlightResult::new(legs, Price::from_amount(amount), duration_minutes)
            .with_hidden_city(hidden),
    )
}

/// Decode a return itinerary into its outbound and inbound halves.
/// The backend prices the whole round trip; the amount is split evenly
/// across the directions.
pub fn decode_return_itinerary(itinerary: &Value) -> Option<(FlightResult, FlightResult)> {
    let total = amount_of(&itinerary["price"]).or_else(|| amount_of(&itinerary["priceEur"]));
    let half = total.map(|amount| amount / 2.0);

    let is_throwaway = itinerary["travelHack"]["isThrowawayTicket"]
        .as_bool()
        .unwrap_or(false);

    let outbound = decode_direction(&itinerary["outbound"], half, is_throwaway)?;
    let inbound = decode_direction(&itinerary["inbound"], half, is_throwaway)?;
    Some((outbound, inbound))
}

async fn run_query(
    feature: &str,
    query: &str,
    variables: Value,
    root: &str,
    options: &FetchOptions,
) -> Result<Vec<Value>, FlightError> {
    let payload = json!({ "query": query, "variables": variables });
    let url = format!("{GRAPHQL_ENDPOINT}?featureName={feature}");

    let text = fetch::post_json(&url, HEADERS, &payload, options).await?;
    let body: Value = serde_json::from_str(&text)
        .map_err(|e| FlightError::MalformedEnvelope(format!("graphql body: {e}")))?;

    let node = unwrap_itineraries(&body, root)?;
    Ok(node["itineraries"].as_array().cloned().unwrap_or_default())
}

/// One-way hidden-city search: decoded itineraries that carry a
/// hidden-destination annotation, cheapest-first as the backend sorts
/// them, capped at `limit`.
pub async fn search_hidden_city(
    filters: &SearchFilters,
    limit: usize,
    options: &FetchOptions,
) -> Result<Vec<FlightResult>, FlightError> {
    filters.validate()?;

    let itineraries = run_query(
        "SearchOneWayItinerariesQuery",
        ONEWAY_QUERY,
        build_variables(filters, RESULT_LIMIT),
        "onewayItineraries",
        options,
    )
    .await?;

    Ok(itineraries
        .iter()
        .filter_map(decode_itinerary)
        .filter(|flight| flight.hidden_city.is_some())
        .take(limit)
        .collect())
}

/// Round-trip hidden-city search: pairs of outbound and inbound
/// results for itineraries flagged as hidden-city on either direction.
pub async fn search_round_trip_hidden_city(
    filters: &SearchFilters,
    limit: usize,
    options: &FetchOptions,
) -> Result<Vec<(FlightResult, FlightResult)>, FlightError> {
    filters.validate()?;

    if filters.trip != TripType::RoundTrip || filters.segments.len() < 2 {
        return Err(FlightError::Validation(
            "round-trip search requires a return segment".into(),
        ));
    }

    let itineraries = run_query(
        "SearchReturnItinerariesQuery",
        RETURN_QUERY,
        build_return_variables(filters, RESULT_LIMIT),
        "returnItineraries",
        options,
    )
    .await?;

    Ok(itineraries
        .iter()
        .filter_map(decode_return_itinerary)
        .filter(|(outbound, inbound)| {
            outbound.hidden_city.is_some() || inbound.hidden_city.is_some()
        })
        .take(limit)
        .collect())
}

use serde_json::{json, Value};
use skiplag::error::FlightError;
use skiplag::kiwi::{
    build_return_variables, build_variables, decode_itinerary, decode_return_itinerary,
    unwrap_itineraries,
};
use skiplag::model::Price;
use skiplag::query::{Cabin, MaxStops, SearchFilters};

fn make_segment(
    from: &str,
    to: &str,
    carrier: &str,
    hidden: Option<(&str, &str)>,
) -> Value {
    let hidden_destination = match hidden {
        Some((code, name)) => json!({ "code": code, "name": name }),
        None => Value::Null,
    };

    json!({
        "segment": {
            "source": {
                "localTime": "2026-03-15T08:30:00",
                "station": { "code": from, "name": "" }
            },
            "destination": {
                "localTime": "2026-03-15T12:45:00",
                "station": { "code": to, "name": "" }
            },
            "hiddenDestination": hidden_destination,
            "carrier": { "code": carrier, "name": "" },
            "code": "1234",
            "duration": 15300
        }
    })
}

fn make_itinerary(segments: Vec<Value>, price: Value) -> Value {
    json!({
        "id": "itinerary-1",
        "price": price,
        "priceEur": { "amount": "81.00" },
        "duration": 27000,
        "travelHack": { "isTrueHiddenCity": true, "isThrowawayTicket": true },
        "sector": { "sectorSegments": segments }
    })
}

#[test]
fn variables_carry_station_ids_and_day_range() {
    let filters = SearchFilters::one_way("LHR", "PEK", "2026-03-15");
    let variables = build_variables(&filters, 30);

    assert_eq!(
        variables["search"]["itinerary"]["source"]["ids"],
        json!(["Station:airport:LHR"])
    );
    assert_eq!(
        variables["search"]["itinerary"]["destination"]["ids"],
        json!(["Station:airport:PEK"])
    );
    assert_eq!(
        variables["search"]["itinerary"]["outboundDepartureDate"],
        json!({ "start": "2026-03-15T00:00:00", "end": "2026-03-15T23:59:59" })
    );
}

#[test]
fn variables_enable_travel_hacks() {
    let filters = SearchFilters::one_way("LHR", "PEK", "2026-03-15");
    let variables = build_variables(&filters, 30);

    assert_eq!(variables["filter"]["enableTrueHiddenCity"], json!(true));
    assert_eq!(variables["filter"]["enableThrowAwayTicketing"], json!(true));
    assert_eq!(variables["filter"]["enableSelfTransfer"], json!(true));
    assert_eq!(variables["filter"]["transportTypes"], json!(["FLIGHT"]));
    assert_eq!(variables["filter"]["contentProviders"], json!(["KIWI"]));
    assert_eq!(variables["filter"]["limit"], json!(30));
    assert_eq!(variables["options"]["sortBy"], json!("PRICE"));
    assert_eq!(variables["options"]["partner"], json!("skypicker"));
}

#[test]
fn cabin_and_stops_map_to_kiwi_terms() {
    let mut filters = SearchFilters::one_way("LHR", "PEK", "2026-03-15");
    filters.cabin = Cabin::Business;
    filters.stops = MaxStops::NonStop;

    let variables = build_variables(&filters, 30);
    assert_eq!(
        variables["search"]["cabinClass"],
        json!({ "cabinClass": "BUSINESS", "applyMixedClasses": false })
    );
    assert_eq!(variables["filter"]["maxStopsCount"], json!(0));
}

#[test]
fn any_stops_omits_max_stops_count() {
    let filters = SearchFilters::one_way("LHR", "PEK", "2026-03-15");
    let variables = build_variables(&filters, 30);
    assert!(variables["filter"].get("maxStopsCount").is_none());
}

#[test]
fn premium_economy_maps_down_to_economy() {
    let mut filters = SearchFilters::one_way("LHR", "PEK", "2026-03-15");
    filters.cabin = Cabin::PremiumEconomy;

    let variables = build_variables(&filters, 30);
    assert_eq!(variables["search"]["cabinClass"]["cabinClass"], json!("ECONOMY"));
}

#[test]
fn return_variables_add_inbound_window() {
    let filters = SearchFilters::round_trip("LHR", "PEK", "2026-03-15", "2026-03-22");
    let variables = build_return_variables(&filters, 30);

    assert_eq!(
        variables["search"]["itinerary"]["inboundDepartureDate"],
        json!({ "start": "2026-03-22T00:00:00", "end": "2026-03-22T23:59:59" })
    );
    assert_eq!(variables["filter"]["allowReturnFromDifferentCity"], json!(true));
    assert_eq!(variables["filter"]["allowChangeInboundDestination"], json!(true));
    assert_eq!(variables["filter"]["allowChangeInboundSource"], json!(true));
}

#[test]
fn unwrap_surfaces_app_error_message() {
    let body = json!({
        "data": {
            "onewayItineraries": {
                "__typename": "AppError",
                "error": "Invalid search input"
            }
        }
    });

    match unwrap_itineraries(&body, "onewayItineraries") {
        Err(FlightError::Backend(message)) => assert_eq!(message, "Invalid search input"),
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[test]
fn unwrap_accepts_itineraries() {
    let body = json!({
        "data": {
            "onewayItineraries": {
                "__typename": "Itineraries",
                "itineraries": []
            }
        }
    });

    let node = unwrap_itineraries(&body, "onewayItineraries").unwrap();
    assert_eq!(node["itineraries"], json!([]));
}

#[test]
fn unwrap_rejects_unknown_typename() {
    let body = json!({
        "data": { "onewayItineraries": { "__typename": "Surprise" } }
    });

    assert!(matches!(
        unwrap_itineraries(&body, "onewayItineraries"),
        Err(FlightError::UnexpectedShape(_))
    ));
}

#[test]
fn unwrap_rejects_missing_data() {
    let body = json!({ "errors": [] });
    assert!(matches!(
        unwrap_itineraries(&body, "onewayItineraries"),
        Err(FlightError::MalformedEnvelope(_))
    ));
}

#[test]
fn decode_hidden_city_itinerary() {
    let itinerary = make_itinerary(
        vec![
            make_segment("PEK", "FRA", "CA", None),
            make_segment("FRA", "LHR", "CA", Some(("MAN", "Manchester"))),
        ],
        json!({ "amount": "89.50" }),
    );

    let flight = decode_itinerary(&itinerary).unwrap();
    assert_eq!(flight.legs.len(), 2);
    assert_eq!(flight.stops, 1);
    assert_eq!(flight.price, Price::Known(89.5));
    assert_eq!(flight.duration_minutes, 450);

    let hidden = flight.hidden_city.as_ref().unwrap();
    assert_eq!(hidden.destination.code, "MAN");
    assert_eq!(hidden.destination.name, "Manchester");
    assert!(hidden.is_throwaway);

    assert_eq!(flight.legs[0].departure_airport.code, "PEK");
    assert_eq!(flight.legs[0].airline.code, "CA");
    assert_eq!(flight.legs[0].duration_minutes, 255);
    assert_eq!(
        flight.legs[0].departure_datetime.to_string(),
        "2026-03-15 08:30:00"
    );
}

#[test]
fn no_hidden_destination_means_no_annotation() {
    let itinerary = make_itinerary(
        vec![make_segment("LHR", "PEK", "CA", None)],
        json!({ "amount": 120.0 }),
    );

    let flight = decode_itinerary(&itinerary).unwrap();
    assert!(flight.hidden_city.is_none());
}

#[test]
fn empty_hidden_destination_code_means_no_annotation() {
    let itinerary = make_itinerary(
        vec![make_segment("LHR", "PEK", "CA", Some(("", "")))],
        json!({ "amount": 120.0 }),
    );

    let flight = decode_itinerary(&itinerary).unwrap();
    assert!(flight.hidden_city.is_none());
}

#[test]
fn numeric_price_accepted() {
    let itinerary = make_itinerary(
        vec![make_segment("LHR", "PEK", "CA", None)],
        json!({ "amount": 120.0 }),
    );

    let flight = decode_itinerary(&itinerary).unwrap();
    assert_eq!(flight.price, Price::Known(120.0));
}

#[test]
fn price_falls_back_to_eur() {
    let itinerary = make_itinerary(
        vec![make_segment("LHR", "PEK", "CA", None)],
        json!({}),
    );

    let flight = decode_itinerary(&itinerary).unwrap();
    assert_eq!(flight.price, Price::Known(81.0));
}

#[test]
fn missing_prices_decode_as_unavailable() {
    let mut itinerary = make_itinerary(
        vec![make_segment("LHR", "PEK", "CA", None)],
        json!({}),
    );
    itinerary["priceEur"] = json!({});

    let flight = decode_itinerary(&itinerary).unwrap();
    assert_eq!(flight.price, Price::Unavailable);
    assert_eq!(flight.price.value(), 0.0);
}

#[test]
fn empty_segments_drop_itinerary() {
    let itinerary = make_itinerary(vec![], json!({ "amount": "50" }));
    assert!(decode_itinerary(&itinerary).is_none());
}

#[test]
fn segment_without_stations_is_skipped() {
    let broken = json!({ "segment": { "source": {}, "destination": {} } });
    let itinerary = make_itinerary(
        vec![broken, make_segment("LHR", "PEK", "CA", None)],
        json!({ "amount": "50" }),
    );

    let flight = decode_itinerary(&itinerary).unwrap();
    assert_eq!(flight.legs.len(), 1);
    assert_eq!(flight.stops, 0);
}

#[test]
fn decode_return_itinerary_splits_price() {
    let itinerary = json!({
        "id": "rt-1",
        "price": { "amount": "200" },
        "priceEur": { "amount": "180" },
        "duration": 54000,
        "travelHack": { "isTrueHiddenCity": true, "isThrowawayTicket": false },
        "outbound": {
            "duration": 27000,
            "sectorSegments": [make_segment("LHR", "PEK", "CA", Some(("PVG", "Shanghai Pudong")))]
        },
        "inbound": {
            "duration": 25200,
            "sectorSegments": [make_segment("PEK", "LHR", "CA", None)]
        }
    });

    let (outbound, inbound) = decode_return_itinerary(&itinerary).unwrap();
    assert_eq!(outbound.price, Price::Known(100.0));
    assert_eq!(inbound.price, Price::Known(100.0));
    assert_eq!(outbound.duration_minutes, 450);
    assert_eq!(inbound.duration_minutes, 420);

    assert!(outbound.hidden_city.is_some());
    assert!(inbound.hidden_city.is_none());
    assert_eq!(
        outbound.hidden_city.as_ref().unwrap().destination.code,
        "PVG"
    );
}

#[test]
fn return_itinerary_without_inbound_is_dropped() {
    let itinerary = json!({
        "price": { "amount": "200" },
        "travelHack": {},
        "outbound": {
            "duration": 27000,
            "sectorSegments": [make_segment("LHR", "PEK", "CA", None)]
        },
        "inbound": {}
    });

    assert!(decode_return_itinerary(&itinerary).is_none());
}

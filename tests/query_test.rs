use skiplag::query::{Cabin, Passengers, SearchFilters, TripType};

fn make_valid_filters() -> SearchFilters {
    SearchFilters::one_way("LHR", "PEK", "2026-03-01")
}

#[test]
fn valid_one_way_passes() {
    assert!(make_valid_filters().validate().is_ok());
}

#[test]
fn valid_round_trip_passes() {
    let filters = SearchFilters::round_trip("LHR", "PEK", "2026-03-01", "2026-03-10");
    assert!(filters.validate().is_ok());
}

#[test]
fn rejects_lowercase_airport() {
    let mut filters = make_valid_filters();
    filters.segments[0].origin = "lhr".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_too_short_airport() {
    let mut filters = make_valid_filters();
    filters.segments[0].origin = "LH".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_too_long_airport() {
    let mut filters = make_valid_filters();
    filters.segments[0].origin = "LHRX".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_numeric_airport() {
    let mut filters = make_valid_filters();
    filters.segments[0].origin = "L4R".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_same_origin_and_destination() {
    let mut filters = make_valid_filters();
    filters.segments[0].destination = "LHR".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_invalid_date_format() {
    let mut filters = make_valid_filters();
    filters.segments[0].date = "03-01-2026".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_invalid_month() {
    let mut filters = make_valid_filters();
    filters.segments[0].date = "2026-13-01".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_feb_30() {
    let mut filters = make_valid_filters();
    filters.segments[0].date = "2026-02-30".into();
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_apr_31() {
    let mut filters = make_valid_filters();
    filters.segments[0].date = "2026-04-31".into();
    assert!(filters.validate().is_err());
}

#[test]
fn accepts_feb_28_non_leap() {
    let mut filters = make_valid_filters();
    filters.segments[0].date = "2027-02-28".into();
    assert!(filters.validate().is_ok());
}

#[test]
fn rejects_feb_29_non_leap() {
    let mut filters = make_valid_filters();
    filters.segments[0].date = "2027-02-29".into();
    assert!(filters.validate().is_err());
}

#[test]
fn accepts_feb_29_leap() {
    let mut filters = make_valid_filters();
    filters.segments[0].date = "2028-02-29".into();
    assert!(filters.validate().is_ok());
}

#[test]
fn rejects_too_many_passengers() {
    let mut filters = make_valid_filters();
    filters.passengers = Passengers {
        adults: 5,
        children: 3,
        infants_in_seat: 2,
        infants_on_lap: 0,
    };
    assert!(filters.validate().is_err());
}

#[test]
fn accepts_nine_passengers() {
    let mut filters = make_valid_filters();
    filters.passengers = Passengers {
        adults: 5,
        children: 2,
        infants_in_seat: 1,
        infants_on_lap: 1,
    };
    assert!(filters.validate().is_ok());
}

#[test]
fn rejects_zero_passengers() {
    let mut filters = make_valid_filters();
    filters.passengers = Passengers {
        adults: 0,
        children: 0,
        infants_in_seat: 0,
        infants_on_lap: 0,
    };
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_infants_exceeding_adults() {
    let mut filters = make_valid_filters();
    filters.passengers = Passengers {
        adults: 1,
        children: 0,
        infants_in_seat: 0,
        infants_on_lap: 2,
    };
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_empty_segments() {
    let mut filters = make_valid_filters();
    filters.segments.clear();
    assert!(filters.validate().is_err());
}

#[test]
fn round_trip_requires_return_segment() {
    let mut filters = make_valid_filters();
    filters.trip = TripType::RoundTrip;
    assert!(filters.validate().is_err());
}

#[test]
fn rejects_return_before_departure() {
    let filters = SearchFilters::round_trip("LHR", "PEK", "2026-03-10", "2026-03-01");
    assert!(filters.validate().is_err());
}

#[test]
fn trip_type_from_str() {
    assert!(matches!(
        TripType::from_str_loose("one-way"),
        Ok(TripType::OneWay)
    ));
    assert!(matches!(
        TripType::from_str_loose("round-trip"),
        Ok(TripType::RoundTrip)
    ));
    assert!(TripType::from_str_loose("multi-city").is_err());
}

#[test]
fn cabin_from_str() {
    assert!(matches!(Cabin::from_str_loose("economy"), Ok(Cabin::Economy)));
    assert!(matches!(
        Cabin::from_str_loose("premium-economy"),
        Ok(Cabin::PremiumEconomy)
    ));
    assert!(matches!(Cabin::from_str_loose("business"), Ok(Cabin::Business)));
    assert!(matches!(Cabin::from_str_loose("first"), Ok(Cabin::First)));
    assert!(Cabin::from_str_loose("coach").is_err());
}

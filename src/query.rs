use crate::error::FlightError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripType {
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn from_str_loose(s: &str) -> Result<Self, FlightError> {
        match s {
            "one-way" => Ok(Self::OneWay),
            "round-trip" => Ok(Self::RoundTrip),
            _ => Err(FlightError::Validation(format!("invalid trip type: {s}"))),
        }
    }

    /// Wire value in the shopping request (round-trip 1, one-way 2).
    pub fn wire_value(&self) -> u64 {
        match self {
            Self::RoundTrip => 1,
            Self::OneWay => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cabin {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl Cabin {
    pub fn from_str_loose(s: &str) -> Result<Self, FlightError> {
        match s {
            "economy" => Ok(Self::Economy),
            "premium-economy" => Ok(Self::PremiumEconomy),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            _ => Err(FlightError::Validation(format!("invalid cabin class: {s}"))),
        }
    }

    pub fn wire_value(&self) -> u64 {
        match self {
            Self::Economy => 1,
            Self::PremiumEconomy => 2,
            Self::Business => 3,
            Self::First => 4,
        }
    }

    /// Cabin-class name in Kiwi's GraphQL schema. Kiwi has no premium
    /// economy tier, so it maps down to economy.
    pub fn kiwi_name(&self) -> &'static str {
        match self {
            Self::Economy | Self::PremiumEconomy => "ECONOMY",
            Self::Business => "BUSINESS",
            Self::First => "FIRST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxStops {
    #[default]
    Any,
    NonStop,
    OneOrFewer,
    TwoOrFewer,
}

impl MaxStops {
    pub fn wire_value(&self) -> u64 {
        match self {
            Self::Any => 0,
            Self::NonStop => 1,
            Self::OneOrFewer => 2,
            Self::TwoOrFewer => 3,
        }
    }

    /// Upper bound on stop count, as Kiwi's `maxStopsCount` expects.
    pub fn stop_count(&self) -> Option<u64> {
        match self {
            Self::Any => None,
            Self::NonStop => Some(0),
            Self::OneOrFewer => Some(1),
            Self::TwoOrFewer => Some(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    None,
    TopFlights,
    Cheapest,
    DepartureTime,
    ArrivalTime,
    Duration,
}

impl SortBy {
    pub fn wire_value(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::TopFlights => 1,
            Self::Cheapest => 2,
            Self::DepartureTime => 3,
            Self::ArrivalTime => 4,
            Self::Duration => 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Passengers {
    pub adults: u32,
    pub children: u32,
    pub infants_in_seat: u32,
    pub infants_on_lap: u32,
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants_in_seat: 0,
            infants_on_lap: 0,
        }
    }
}

/// One flown portion of the journey: origin, destination, travel date.
/// A one-way search has one segment, a round-trip two.
#[derive(Debug, Clone)]
pub struct FlightSegment {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub trip: TripType,
    pub segments: Vec<FlightSegment>,
    pub passengers: Passengers,
    pub cabin: Cabin,
    pub stops: MaxStops,
    pub airlines: Option<Vec<String>>,
    pub max_price: Option<u32>,
    pub max_duration: Option<u32>,
    pub layover_airports: Option<Vec<String>>,
    pub layover_max_duration: Option<u32>,
    pub sort_by: SortBy,
    pub language: String,
    pub region: String,
    pub currency: String,
}

impl SearchFilters {
    pub fn one_way(origin: &str, destination: &str, date: &str) -> Self {
        Self {
            trip: TripType::OneWay,
            segments: vec![FlightSegment {
                origin: origin.to_string(),
                destination: destination.to_string(),
                date: date.to_string(),
            }],
            passengers: Passengers::default(),
            cabin: Cabin::Economy,
            stops: MaxStops::Any,
            airlines: None,
            max_price: None,
            max_duration: None,
            layover_airports: None,
            layover_max_duration: None,
            sort_by: SortBy::Cheapest,
            language: "en".to_string(),
            region: "US".to_string(),
            currency: "USD".to_string(),
        }
    }

    pub fn round_trip(origin: &str, destination: &str, depart: &str, ret: &str) -> Self {
        let mut filters = Self::one_way(origin, destination, depart);
        filters.trip = TripType::RoundTrip;
        filters.segments.push(FlightSegment {
            origin: destination.to_string(),
            destination: origin.to_string(),
            date: ret.to_string(),
        });
        filters
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        if self.segments.is_empty() {
            return Err(FlightError::Validation(
                "at least one flight segment required".into(),
            ));
        }

        if self.trip == TripType::RoundTrip && self.segments.len() < 2 {
            return Err(FlightError::Validation(
                "round-trip search requires a return segment".into(),
            ));
        }

        for segment in &self.segments {
            validate_airport(&segment.origin)?;
            validate_airport(&segment.destination)?;
            validate_date(&segment.date)?;

            if segment.origin == segment.destination {
                return Err(FlightError::Validation(format!(
                    "origin and destination must differ ({})",
                    segment.origin
                )));
            }
        }

        // ISO dates compare correctly as strings.
        if self.segments.len() >= 2 && self.segments[1].date < self.segments[0].date {
            return Err(FlightError::Validation(
                "return date cannot be before the departure date".into(),
            ));
        }

        let total = self.passengers.adults
            + self.passengers.children
            + self.passengers.infants_in_seat
            + self.passengers.infants_on_lap;

        if total > 9 {
            return Err(FlightError::Validation(format!(
                "total passengers ({total}) exceeds maximum of 9"
            )));
        }

        if total == 0 {
            return Err(FlightError::Validation(
                "at least one passenger required".into(),
            ));
        }

        if self.passengers.infants_on_lap > self.passengers.adults {
            return Err(FlightError::Validation(
                "infants on lap cannot exceed number of adults".into(),
            ));
        }

        Ok(())
    }
}

fn validate_airport(code: &str) -> Result<(), FlightError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(FlightError::InvalidAirport(code.to_string()));
    }
    Ok(())
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year.is_multiple_of(4) && !year.is_multiple_of(100)) || year.is_multiple_of(400) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub(crate) fn validate_date(date: &str) -> Result<(), FlightError> {
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() != 3 {
        return Err(FlightError::InvalidDate(date.to_string()));
    }
    let year: u32 = parts[0]
        .parse()
        .map_err(|_| FlightError::InvalidDate(date.to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| FlightError::InvalidDate(date.to_string()))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| FlightError::InvalidDate(date.to_string()))?;

    if year < 2000 || !(1..=12).contains(&month) {
        return Err(FlightError::InvalidDate(date.to_string()));
    }

    if day < 1 || day > days_in_month(year, month) {
        return Err(FlightError::InvalidDate(date.to_string()));
    }

    Ok(())
}

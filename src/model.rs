use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airline {
    pub code: String,
    pub name: String,
}

/// Price of an itinerary. The backends report prices as plain numbers
/// with no way to tell "free" apart from "missing", so a literal zero
/// and an absent field are kept as distinct states. Neither ever means
/// a free fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum Price {
    Known(f64),
    /// The backend returned a literal 0.
    Zero,
    /// No price field was present in the payload.
    Unavailable,
}

impl Price {
    /// Collapse to a plain amount. `Zero` and `Unavailable` both come
    /// out as 0.0, which downstream must read as "price unavailable".
    pub fn value(&self) -> f64 {
        match self {
            Self::Known(amount) => *amount,
            Self::Zero | Self::Unavailable => 0.0,
        }
    }

    pub fn from_amount(amount: Option<f64>) -> Self {
        match amount {
            Some(a) if a == 0.0 => Self::Zero,
            Some(a) if a > 0.0 => Self::Known(a),
            // Negative amounts are payload noise, not prices.
            _ => Self::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightLeg {
    pub airline: Airline,
    pub flight_number: String,
    pub departure_airport: Airport,
    pub arrival_airport: Airport,
    pub departure_datetime: NaiveDateTime,
    pub arrival_datetime: NaiveDateTime,
    pub duration_minutes: u32,
}

/// The true (discarded) destination of a hidden-city itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiddenCity {
    pub destination: Airport,
    pub is_throwaway: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightResult {
    pub legs: Vec<FlightLeg>,
    pub price: Price,
    pub duration_minutes: u32,
    pub stops: u32,
    pub hidden_city: Option<HiddenCity>,
}

impl FlightResult {
    /// Stops are always derived from the legs actually decoded, never
    /// read out of the payload.
    pub fn new(legs: Vec<FlightLeg>, price: Price, duration_minutes: u32) -> Self {
        let stops = legs.len().saturating_sub(1) as u32;
        Self {
            legs,
            price,
            duration_minutes,
            stops,
            hidden_city: None,
        }
    }

    pub fn with_hidden_city(mut self, hidden_city: Option<HiddenCity>) -> Self {
        self.hidden_city = hidden_city;
        self
    }
}

/// One cell of the calendar price grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatePrice {
    pub date: NaiveDate,
    pub price: f64,
}

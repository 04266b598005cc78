//! Canonical airline and airport code tables.
//!
//! Raw codes arrive as free-form strings in backend payloads. Lookup is
//! by IATA code; codes that start with a digit are stored under a `_`
//! prefix so the table keys stay valid identifiers, matching how the
//! upstream code lists are generated. Unknown codes resolve to the
//! sentinel entries rather than failing the whole record.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::{Airline, Airport};

pub const UNKNOWN_AIRLINE_CODE: &str = "??";
pub const UNKNOWN_AIRPORT_CODE: &str = "???";

static AIRLINE_NAMES: &[(&str, &str)] = &[
    ("AA", "American Airlines"),
    ("AC", "Air Canada"),
    ("AF", "Air France"),
    ("AI", "Air India"),
    ("AM", "Aeromexico"),
    ("AS", "Alaska Airlines"),
    ("AV", "Avianca"),
    ("AY", "Finnair"),
    ("AZ", "ITA Airways"),
    ("BA", "British Airways"),
    ("BR", "EVA Air"),
    ("CA", "Air China"),
    ("CI", "China Airlines"),
    ("CM", "Copa Airlines"),
    ("CX", "Cathay Pacific"),
    ("CZ", "China Southern Airlines"),
    ("DE", "Condor"),
    ("DL", "Delta Air Lines"),
    ("EK", "Emirates"),
    ("ET", "Ethiopian Airlines"),
    ("EY", "Etihad Airways"),
    ("FI", "Icelandair"),
    ("FR", "Ryanair"),
    ("GA", "Garuda Indonesia"),
    ("HA", "Hawaiian Airlines"),
    ("HU", "Hainan Airlines"),
    ("IB", "Iberia"),
    ("JL", "Japan Airlines"),
    ("KE", "Korean Air"),
    ("KL", "KLM Royal Dutch Airlines"),
    ("LA", "LATAM Airlines"),
    ("LH", "Lufthansa"),
    ("LO", "LOT Polish Airlines"),
    ("LX", "Swiss International Air Lines"),
    ("MF", "Xiamen Airlines"),
    ("MH", "Malaysia Airlines"),
    ("MU", "China Eastern Airlines"),
    ("NH", "All Nippon Airways"),
    ("NK", "Spirit Airlines"),
    ("NZ", "Air New Zealand"),
    ("OS", "Austrian Airlines"),
    ("OZ", "Asiana Airlines"),
    ("PR", "Philippine Airlines"),
    ("QF", "Qantas"),
    ("QR", "Qatar Airways"),
    ("SA", "South African Airways"),
    ("SK", "Scandinavian Airlines"),
    ("SN", "Brussels Airlines"),
    ("SQ", "Singapore Airlines"),
    ("SU", "Aeroflot"),
    ("SV", "Saudia"),
    ("TG", "Thai Airways"),
    ("TK", "Turkish Airlines"),
    ("TP", "TAP Air Portugal"),
    ("UA", "United Airlines"),
    ("UX", "Air Europa"),
    ("VA", "Virgin Australia"),
    ("VN", "Vietnam Airlines"),
    ("VS", "Virgin Atlantic"),
    ("VY", "Vueling"),
    ("WN", "Southwest Airlines"),
    ("WS", "WestJet"),
    ("U2", "easyJet"),
    ("W6", "Wizz Air"),
    ("B6", "JetBlue Airways"),
    ("D8", "Norwegian Air"),
    ("G4", "Allegiant Air"),
    ("_3U", "Sichuan Airlines"),
    ("_5J", "Cebu Pacific"),
    ("_6E", "IndiGo"),
    ("_7C", "Jeju Air"),
    ("_9C", "Spring Airlines"),
    ("_9W", "Jet Airways"),
];

static AIRPORT_NAMES: &[(&str, &str)] = &[
    ("AMS", "Amsterdam Airport Schiphol"),
    ("ARN", "Stockholm Arlanda Airport"),
    ("ATL", "Hartsfield-Jackson Atlanta International Airport"),
    ("AUH", "Abu Dhabi International Airport"),
    ("BCN", "Barcelona-El Prat Airport"),
    ("BKK", "Suvarnabhumi Airport"),
    ("BOM", "Chhatrapati Shivaji Maharaj International Airport"),
    ("BOS", "Boston Logan International Airport"),
    ("BRU", "Brussels Airport"),
    ("CAN", "Guangzhou Baiyun International Airport"),
    ("CDG", "Paris Charles de Gaulle Airport"),
    ("CGK", "Soekarno-Hatta International Airport"),
    ("CPH", "Copenhagen Airport"),
    ("CTU", "Chengdu Shuangliu International Airport"),
    ("DEL", "Indira Gandhi International Airport"),
    ("DEN", "Denver International Airport"),
    ("DFW", "Dallas/Fort Worth International Airport"),
    ("DOH", "Hamad International Airport"),
    ("DUB", "Dublin Airport"),
    ("DXB", "Dubai International Airport"),
    ("EWR", "Newark Liberty International Airport"),
    ("FCO", "Rome Fiumicino Airport"),
    ("FRA", "Frankfurt Airport"),
    ("GRU", "São Paulo/Guarulhos International Airport"),
    ("GVA", "Geneva Airport"),
    ("HEL", "Helsinki-Vantaa Airport"),
    ("HKG", "Hong Kong International Airport"),
    ("HND", "Tokyo Haneda Airport"),
    ("IAD", "Washington Dulles International Airport"),
    ("IAH", "George Bush Intercontinental Airport"),
    ("ICN", "Incheon International Airport"),
    ("IST", "Istanbul Airport"),
    ("JFK", "John F. Kennedy International Airport"),
    ("JNB", "O. R. Tambo International Airport"),
    ("KEF", "Keflavík International Airport"),
    ("KIX", "Kansai International Airport"),
    ("KUL", "Kuala Lumpur International Airport"),
    ("LAS", "Harry Reid International Airport"),
    ("LAX", "Los Angeles International Airport"),
    ("LGW", "London Gatwick Airport"),
    ("LHR", "London Heathrow Airport"),
    ("LIS", "Lisbon Airport"),
    ("MAD", "Adolfo Suárez Madrid-Barajas Airport"),
    ("MAN", "Manchester Airport"),
    ("MEL", "Melbourne Airport"),
    ("MEX", "Mexico City International Airport"),
    ("MIA", "Miami International Airport"),
    ("MNL", "Ninoy Aquino International Airport"),
    ("MSP", "Minneapolis-Saint Paul International Airport"),
    ("MUC", "Munich Airport"),
    ("MXP", "Milan Malpensa Airport"),
    ("NRT", "Narita International Airport"),
    ("ORD", "Chicago O'Hare International Airport"),
    ("OSL", "Oslo Airport"),
    ("PEK", "Beijing Capital International Airport"),
    ("PKX", "Beijing Daxing International Airport"),
    ("PHX", "Phoenix Sky Harbor International Airport"),
    ("PRG", "Václav Havel Airport Prague"),
    ("PVG", "Shanghai Pudong International Airport"),
    ("SCL", "Santiago International Airport"),
    ("SEA", "Seattle-Tacoma International Airport"),
    ("SFO", "San Francisco International Airport"),
    ("SIN", "Singapore Changi Airport"),
    ("SYD", "Sydney Kingsford Smith Airport"),
    ("SZX", "Shenzhen Bao'an International Airport"),
    ("TPE", "Taiwan Taoyuan International Airport"),
    ("TXL", "Berlin Brandenburg Airport"),
    ("VIE", "Vienna International Airport"),
    ("WAW", "Warsaw Chopin Airport"),
    ("YUL", "Montréal-Trudeau International Airport"),
    ("YVR", "Vancouver International Airport"),
    ("YYZ", "Toronto Pearson International Airport"),
    ("ZRH", "Zurich Airport"),
];

static AIRLINES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| AIRLINE_NAMES.iter().copied().collect());

static AIRPORTS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| AIRPORT_NAMES.iter().copied().collect());

/// Table key for a raw code: uppercased, `_`-prefixed when it starts
/// with a digit.
fn canonical_key(raw: &str) -> String {
    let upper = raw.trim().to_ascii_uppercase();
    match upper.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{upper}"),
        _ => upper,
    }
}

/// Resolve a raw airline code to its canonical record. Unknown codes
/// degrade to the sentinel entry.
pub fn airline(raw: &str) -> Airline {
    let key = canonical_key(raw);
    match AIRLINES.get(key.as_str()) {
        Some(name) => Airline {
            code: key.trim_start_matches('_').to_string(),
            name: (*name).to_string(),
        },
        None => Airline {
            code: UNKNOWN_AIRLINE_CODE.to_string(),
            name: "Unknown airline".to_string(),
        },
    }
}

/// Resolve a raw airport code to its canonical record. Unknown codes
/// degrade to the sentinel entry.
pub fn airport(raw: &str) -> Airport {
    let key = canonical_key(raw);
    match AIRPORTS.get(key.as_str()) {
        Some(name) => Airport {
            code: key,
            name: (*name).to_string(),
        },
        None => Airport {
            code: UNKNOWN_AIRPORT_CODE.to_string(),
            name: "Unknown airport".to_string(),
        },
    }
}

pub mod codes;
pub mod dates;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod kiwi;
pub mod model;
pub mod query;

use error::FlightError;
use fetch::FetchOptions;
use model::FlightResult;
use query::{SearchFilters, TripType};

pub use dates::search_dates;

const SHOPPING_URL: &str = "https://www.google.com/_/FlightsFrontendUi/data/travel.frontend.flights.FlightsFrontendService/GetShoppingResults";

fn shopping_url(filters: &SearchFilters) -> String {
    format!(
        "{SHOPPING_URL}?hl={}&gl={}&curr={}",
        filters.language, filters.region, filters.currency
    )
}

async fn fetch_shopping(
    filters: &SearchFilters,
    selected: Option<&FlightResult>,
    options: &FetchOptions,
) -> Result<Vec<FlightResult>, FlightError> {
    let encoded = filters::encode(filters, selected);
    let text = fetch::post_form(
        &shopping_url(filters),
        format!("f.req={encoded}"),
        options,
    )
    .await?;

    match decode::unwrap_envelope(&text)? {
        Some(inner) => Ok(decode::decode_payload(&inner)),
        None => Ok(Vec::new()),
    }
}

/// One-way search against the shopping endpoint. An empty result list
/// means the backend reported no flights for the route and date.
pub async fn search(
    filters: &SearchFilters,
    options: &FetchOptions,
) -> Result<Vec<FlightResult>, FlightError> {
    filters.validate()?;
    fetch_shopping(filters, None, options).await
}

/// Round-trip search as a sequential fan-out: fetch the outbound
/// candidates, then for each of the top `top_n` issue one follow-up
/// call with that outbound re-encoded as the selected flight, and pair
/// it with every inbound flight returned. A failed follow-up call
/// surfaces as the search error.
pub async fn search_round_trip(
    filters: &SearchFilters,
    top_n: usize,
    options: &FetchOptions,
) -> Result<Vec<(FlightResult, FlightResult)>, FlightError> {
    filters.validate()?;

    if filters.trip != TripType::RoundTrip {
        return Err(FlightError::Validation(
            "round-trip search requires round-trip filters".into(),
        ));
    }

    let outbound = fetch_shopping(filters, None, options).await?;

    let mut pairs = Vec::new();
    for selected in outbound.into_iter().take(top_n) {
        let inbound = fetch_shopping(filters, Some(&selected), options).await?;
        for ret in inbound {
            pairs.push((selected.clone(), ret));
        }
    }

    Ok(pairs)
}

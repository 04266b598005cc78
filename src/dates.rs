//! Calendar-grid search: the cheapest fare per day across a date
//! range, for finding which day to fly.

use crate::decode;
use crate::error::FlightError;
use crate::fetch::{self, FetchOptions};
use crate::filters;
use crate::model::DatePrice;
use crate::query::{self, SearchFilters};

const BASE_URL: &str = "https://www.google.com/_/FlightsFrontendUi/data/travel.frontend.flights.FlightsFrontendService/GetCalendarGrid";

pub async fn search_dates(
    filters: &SearchFilters,
    from_date: &str,
    to_date: &str,
    options: &FetchOptions,
) -> Result<Vec<DatePrice>, FlightError> {
    filters.validate()?;
    query::validate_date(from_date)?;
    query::validate_date(to_date)?;

    // ISO dates compare correctly as strings.
    if from_date > to_date {
        return Err(FlightError::Validation(
            "date range start cannot be after its end".into(),
        ));
    }

    let encoded = filters::encode_calendar(filters, from_date, to_date);
    let url = format!(
        "{BASE_URL}?hl={}&gl={}&curr={}",
        filters.language, filters.region, filters.currency
    );

    let text = fetch::post_form(&url, format!("f.req={encoded}"), options).await?;

    match decode::unwrap_envelope(&text)? {
        Some(inner) => Ok(decode::decode_calendar(&inner)),
        None => Ok(Vec::new()),
    }
}

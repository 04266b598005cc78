use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use wreq::cookie::Jar;
use wreq::Client;
use wreq_util::Emulation;

use crate::error::{self, FlightError};

#[derive(Clone)]
pub struct FetchOptions {
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: 30,
        }
    }
}

fn build_client(options: &FetchOptions, consent_cookies: bool) -> Result<Client, FlightError> {
    let mut builder = Client::builder()
        .emulation(Emulation::Chrome137)
        .timeout(Duration::from_secs(options.timeout));

    if consent_cookies {
        let jar = Arc::new(Jar::default());
        let url: wreq::Uri = "https://www.google.com".parse().unwrap();
        jar.add("SOCS=CAESEwgDEgk2MjA5NDM1NjAaAmVuIAEaBgiA_Le-Bg", &url);
        jar.add("CONSENT=PENDING+987", &url);
        builder = builder.cookie_provider(jar);
    }

    if let Some(ref proxy) = options.proxy {
        builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
    }

    builder.build().map_err(error::from_http_error)
}

fn check_status(status: u16) -> Result<(), FlightError> {
    match status {
        200 => Ok(()),
        429 => Err(FlightError::RateLimited),
        403 | 503 => Err(FlightError::Blocked(status)),
        s if s >= 400 => Err(FlightError::HttpStatus(s)),
        _ => Ok(()),
    }
}

/// POST a form-encoded body to a shopping-frontend endpoint. The
/// consent cookies keep the request clear of the cookie wall.
pub async fn post_form(
    url: &str,
    body: String,
    options: &FetchOptions,
) -> Result<String, FlightError> {
    let client = build_client(options, true)?;

    let response = client
        .post(url)
        .header(
            "content-type",
            "application/x-www-form-urlencoded;charset=UTF-8",
        )
        .body(body)
        .send()
        .await
        .map_err(error::from_http_error)?;

    check_status(response.status().as_u16())?;
    response.text().await.map_err(error::from_http_error)
}

/// POST a JSON body with caller-supplied headers (GraphQL endpoint).
pub async fn post_json(
    url: &str,
    headers: &[(&str, &str)],
    body: &Value,
    options: &FetchOptions,
) -> Result<String, FlightError> {
    let client = build_client(options, false)?;

    let mut request = client.post(url);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = request
        .json(body)
        .send()
        .await
        .map_err(error::from_http_error)?;

    check_status(response.status().as_u16())?;
    response.text().await.map_err(error::from_http_error)
}

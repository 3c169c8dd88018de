//! Blocking HTTP sources: the Open-Meteo daily forecast and wiki article scraping.
//!
//! Each source has a `fetch_*` function that does the request and a `parse_*`
//! function that works on the response body alone.

use crate::error::{PipelineError, Result};
use crate::structs::{ForecastPoint, ForecastQuery, PageSummary};
use log::debug;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_PAGE_URL: &str = "https://en.wikipedia.org/wiki/Web_scraping";

/// Requests the daily maximum temperature forecast and returns its first day.
///
/// # Errors
///
/// Returns `PipelineError::Http` on transport failure or a non-success status,
/// otherwise whatever [`parse_forecast`] reports.
pub fn fetch_forecast(query: &ForecastQuery) -> Result<ForecastPoint> {
    debug!(
        "Requesting forecast for ({}, {}) in {}",
        query.latitude, query.longitude, query.timezone
    );
    let client = Client::new();
    let body: Value = client
        .get(FORECAST_URL)
        .query(&[
            ("latitude", query.latitude.to_string()),
            ("longitude", query.longitude.to_string()),
            ("daily", "temperature_2m_max".to_string()),
            ("timezone", query.timezone.clone()),
        ])
        .send()?
        .error_for_status()?
        .json()?;
    parse_forecast(&body)
}

/// Extracts the first date and maximum temperature from a forecast response.
pub fn parse_forecast(body: &Value) -> Result<ForecastPoint> {
    let daily = body
        .get("daily")
        .ok_or_else(|| PipelineError::MissingField("daily".to_string()))?;

    let date = first_entry(daily, "time")?;
    let date = date
        .as_str()
        .ok_or_else(|| PipelineError::Data(format!("Forecast date is not a string: {}", date)))?
        .to_string();

    let temp = first_entry(daily, "temperature_2m_max")?;
    let temperature_2m_max = temp
        .as_f64()
        .ok_or_else(|| PipelineError::invalid_numeric("temperature_2m_max", temp))?;

    Ok(ForecastPoint {
        date,
        temperature_2m_max,
    })
}

fn first_entry<'a>(daily: &'a Value, key: &str) -> Result<&'a Value> {
    daily
        .get(key)
        .and_then(Value::as_array)
        .and_then(|values| values.first())
        .ok_or_else(|| PipelineError::MissingField(format!("daily.{}", key)))
}

/// Downloads a page and returns its body as text.
pub fn fetch_page(url: &str) -> Result<String> {
    debug!("Fetching page: {}", url);
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    debug!("Fetched {} bytes", body.len());
    Ok(body)
}

/// Pulls the article title and the first sentence of its lead paragraph.
///
/// The lead paragraph is the first non-blank `<p>` that is a direct child of
/// the first `div.mw-parser-output`. The sentence is the text before its
/// first `.`, with the `.` restored. A page without such a paragraph yields an
/// empty sentence.
///
/// # Errors
///
/// Returns `PipelineError::MissingField` if there is no `h1#firstHeading`.
pub fn parse_page(html: &str) -> Result<PageSummary> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("h1#firstHeading")?)
        .next()
        .ok_or_else(|| PipelineError::MissingField("h1#firstHeading".to_string()))?
        .text()
        .collect::<String>();

    let content = document.select(&selector("div.mw-parser-output")?).next();
    let lead = content.and_then(|div| {
        div.children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "p")
            .map(|p| p.text().collect::<String>())
            .find(|text| !text.trim().is_empty())
    });

    let first_sentence = match lead {
        Some(text) => format!("{}.", text.trim_start().split('.').next().unwrap_or("")),
        None => String::new(),
    };

    Ok(PageSummary {
        title,
        first_sentence,
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| PipelineError::Data(format!("Invalid selector {}: {}", css, e)))
}

use crate::error::{PipelineError, Result};
use crate::extract::read_daily_records;
use crate::structs::{
    AggregateSummary, ClassificationRecord, RAIN_LIMIT_MM, RawDailyRecord, TEMP_SWING_LIMIT,
    Thresholds, WeatherSummary,
};
use log::debug;
use std::path::Path;

/// Loads a daily weather JSON file and classifies every day in it.
///
/// # Arguments
///
/// * `file_path` - Path to a JSON document with a top-level `daily` array
/// * `thresholds` - Hot / windy / humid limits applied to each day
///
/// # Returns
///
/// One `ClassificationRecord` per input day, in input order.
///
/// # Errors
///
/// Returns `PipelineError` if the file cannot be read or any day is malformed.
/// A single bad day fails the whole run.
pub fn process_daily_file(
    file_path: &Path,
    thresholds: &Thresholds,
) -> Result<Vec<ClassificationRecord>> {
    let days = read_daily_records(file_path)?;
    debug!(
        "Classifying {} days | Hot>{} Windy>{} Humid>{}",
        days.len(),
        thresholds.hot_temperature,
        thresholds.windy_speed,
        thresholds.humid_percent
    );
    Ok(classify_days(&days, thresholds))
}

/// Classifies a single day against the given thresholds.
///
/// Pure and total: the same record and thresholds always give the same result.
///
/// # Classification Rules
///
/// - **hot_day**: max temperature above `thresholds.hot_temperature`
/// - **has_temp_swing**: max minus min above `TEMP_SWING_LIMIT`
/// - **windy_day**: wind speed above `thresholds.windy_speed`
/// - **uncomfortable**: humidity above `thresholds.humid_percent`
/// - **rainy_day**: precipitation above `RAIN_LIMIT_MM`
pub fn classify_day(day: &RawDailyRecord, thresholds: &Thresholds) -> ClassificationRecord {
    let temp_swing = day.max_temperature - day.min_temperature;

    ClassificationRecord {
        date: day.date.clone(),
        description: day.weather_description.clone(),
        max_temp: day.max_temperature,
        min_temp: day.min_temperature,
        temp_swing,
        hot_day: day.max_temperature > thresholds.hot_temperature,
        has_temp_swing: temp_swing > TEMP_SWING_LIMIT,
        wind_speed: day.wind_speed,
        windy_day: day.wind_speed > thresholds.windy_speed,
        humidity: day.humidity,
        uncomfortable: day.humidity > thresholds.humid_percent,
        rainy_day: day.precipitation > RAIN_LIMIT_MM,
        precipitation: day.precipitation,
    }
}

pub fn classify_days(days: &[RawDailyRecord], thresholds: &Thresholds) -> Vec<ClassificationRecord> {
    days.iter().map(|day| classify_day(day, thresholds)).collect()
}

/// Renders one classified day as a multi-line report.
///
/// The precipitation line is always last and is either the rainy line or the
/// no-precipitation line, never both.
pub fn generate_daily_report(day: &ClassificationRecord) -> String {
    let mut report = vec![
        format!("Date: {}", day.date),
        format!("Weather: {}", day.description),
        format!("Temperature: Max {}°C, Min {}°C", day.max_temp, day.min_temp),
    ];

    if day.hot_day {
        report.push("It was a hot day.".to_string());
    }
    if day.windy_day {
        report.push("It was a windy day.".to_string());
    }
    if day.uncomfortable {
        report.push("The humidity made the day uncomfortable.".to_string());
    }
    if day.rainy_day {
        report.push(format!(
            "It was a rainy day with {} mm of precipitation.",
            day.precipitation
        ));
    } else {
        report.push("There was no precipitation.".to_string());
    }

    report.join("\n")
}

/// Finds the hottest, windiest, most humid and rainiest day.
///
/// Each pick is an independent arg-max; on ties the earliest day wins.
///
/// # Errors
///
/// Returns `PipelineError::EmptyInput` if `days` is empty.
pub fn summarize_days(days: &[ClassificationRecord]) -> Result<WeatherSummary> {
    if days.is_empty() {
        return Err(PipelineError::EmptyInput("weather summary".to_string()));
    }

    Ok(WeatherSummary {
        hottest: first_max_by(days, |d| d.max_temp).clone(),
        windiest: first_max_by(days, |d| d.wind_speed).clone(),
        most_humid: first_max_by(days, |d| d.humidity).clone(),
        rainiest: first_max_by(days, |d| d.precipitation).clone(),
    })
}

// Caller guarantees `days` is non-empty.
fn first_max_by<F>(days: &[ClassificationRecord], key: F) -> &ClassificationRecord
where
    F: Fn(&ClassificationRecord) -> f64,
{
    days[1..].iter().fold(&days[0], |best, day| {
        if key(day) > key(best) { day } else { best }
    })
}

pub fn render_summary(summary: &WeatherSummary) -> String {
    [
        format!(
            "Hottest day: {} with a maximum temperature of {}°C",
            summary.hottest.date, summary.hottest.max_temp
        ),
        format!(
            "Windiest day: {} with wind speeds of {} km/h",
            summary.windiest.date, summary.windiest.wind_speed
        ),
        format!(
            "Most humid day: {} with a humidity level of {}%",
            summary.most_humid.date, summary.most_humid.humidity
        ),
        format!(
            "Rainiest day: {} with {} mm of precipitation",
            summary.rainiest.date, summary.rainiest.precipitation
        ),
    ]
    .join("\n")
}

/// Computes means, precipitation total and threshold day counts over raw days.
///
/// Day counts reuse `classify_day`, so they always agree with the per-day flags.
///
/// # Errors
///
/// Returns `PipelineError::EmptyInput` if `days` is empty, rather than dividing by zero.
pub fn aggregate_days(days: &[RawDailyRecord], thresholds: &Thresholds) -> Result<AggregateSummary> {
    if days.is_empty() {
        return Err(PipelineError::EmptyInput("aggregate summary".to_string()));
    }

    let mut total_max_temp = 0.0;
    let mut total_min_temp = 0.0;
    let mut total_precipitation = 0.0;
    let mut total_wind_speed = 0.0;
    let mut total_humidity = 0.0;
    let mut hot_days = 0;
    let mut windy_days = 0;
    let mut rainy_days = 0;

    for day in days {
        total_max_temp += day.max_temperature;
        total_min_temp += day.min_temperature;
        total_precipitation += day.precipitation;
        total_wind_speed += day.wind_speed;
        total_humidity += day.humidity;

        let flags = classify_day(day, thresholds);
        hot_days += u32::from(flags.hot_day);
        windy_days += u32::from(flags.windy_day);
        rainy_days += u32::from(flags.rainy_day);
    }

    let num_days = days.len() as f64;
    debug!(
        "Aggregated {} days: {} hot, {} windy, {} rainy",
        days.len(),
        hot_days,
        windy_days,
        rainy_days
    );

    Ok(AggregateSummary {
        average_max_temp: total_max_temp / num_days,
        average_min_temp: total_min_temp / num_days,
        total_precipitation,
        average_wind_speed: total_wind_speed / num_days,
        average_humidity: total_humidity / num_days,
        hot_days,
        windy_days,
        rainy_days,
    })
}

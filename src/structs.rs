use crate::error::{PipelineError, Result};
use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default maximum temperature (°C) above which a day counts as hot.
pub const DEFAULT_HOT_TEMPERATURE: f64 = 30.0;
/// Default wind speed (km/h) above which a day counts as windy.
pub const DEFAULT_WINDY_SPEED: f64 = 15.0;
/// Default relative humidity (%) above which a day counts as uncomfortable.
pub const DEFAULT_HUMID_PERCENT: f64 = 70.0;
/// Max/min temperature spread (°C) above which a day has a notable swing.
pub const TEMP_SWING_LIMIT: f64 = 10.0;
/// Precipitation (mm) above which a day counts as rainy.
pub const RAIN_LIMIT_MM: f64 = 0.0;

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// One day of unprocessed weather measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDailyRecord {
    pub date: String,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub weather_description: String,
}

impl RawDailyRecord {
    /// Builds a record from one entry of a `daily` JSON array.
    ///
    /// This is the only place field defaults are applied: an absent
    /// `precipitation` becomes `0.0`. Every other field is required.
    ///
    /// # Errors
    ///
    /// - `PipelineError::MissingField` if a required key is absent
    /// - `PipelineError::InvalidNumeric` if a numeric key holds anything but a number
    ///   (an explicit `null` precipitation included)
    /// - `PipelineError::Data` if the entry is not an object or a text field is not a string
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| PipelineError::Data(format!("Daily entry is not an object: {}", value)))?;

        let precipitation = match obj.get("precipitation") {
            None => 0.0,
            Some(v) => v
                .as_f64()
                .ok_or_else(|| PipelineError::invalid_numeric("precipitation", v))?,
        };

        Ok(Self {
            date: required_str(obj, "date")?,
            max_temperature: required_f64(obj, "max_temperature")?,
            min_temperature: required_f64(obj, "min_temperature")?,
            precipitation,
            wind_speed: required_f64(obj, "wind_speed")?,
            humidity: required_f64(obj, "humidity")?,
            weather_description: required_str(obj, "weather_description")?,
        })
    }
}

fn required_f64(obj: &Map<String, Value>, field: &str) -> Result<f64> {
    let value = obj
        .get(field)
        .ok_or_else(|| PipelineError::MissingField(field.to_string()))?;
    value
        .as_f64()
        .ok_or_else(|| PipelineError::invalid_numeric(field, value))
}

fn required_str(obj: &Map<String, Value>, field: &str) -> Result<String> {
    let value = obj
        .get(field)
        .ok_or_else(|| PipelineError::MissingField(field.to_string()))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PipelineError::Data(format!("Field {} is not a string: {}", field, value)))
}

/// Threshold configuration for day classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub hot_temperature: f64,
    pub windy_speed: f64,
    pub humid_percent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hot_temperature: DEFAULT_HOT_TEMPERATURE,
            windy_speed: DEFAULT_WINDY_SPEED,
            humid_percent: DEFAULT_HUMID_PERCENT,
        }
    }
}

/// A raw day plus the flags derived from threshold comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub date: String,
    pub description: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub temp_swing: f64,
    pub hot_day: bool,
    pub has_temp_swing: bool,
    pub wind_speed: f64,
    pub windy_day: bool,
    pub humidity: f64,
    pub uncomfortable: bool,
    pub rainy_day: bool,
    pub precipitation: f64,
}

/// Extremal days across a run of classified days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub hottest: ClassificationRecord,
    pub windiest: ClassificationRecord,
    pub most_humid: ClassificationRecord,
    pub rainiest: ClassificationRecord,
}

/// Means, totals and day counts over a run of raw days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub average_max_temp: f64,
    pub average_min_temp: f64,
    pub total_precipitation: f64,
    pub average_wind_speed: f64,
    pub average_humidity: f64,
    pub hot_days: u32,
    pub windy_days: u32,
    pub rainy_days: u32,
}

/// One `<day>` element of an XML observation feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub date: String,
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
}

/// Location and timezone for an Open-Meteo daily forecast request
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl Default for ForecastQuery {
    fn default() -> Self {
        Self {
            latitude: 35.6895,
            longitude: 139.6917,
            timezone: "Asia/Tokyo".to_string(),
        }
    }
}

/// First day of a daily maximum-temperature forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub temperature_2m_max: f64,
}

/// Title and lead sentence scraped from a wiki article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub title: String,
    pub first_sentence: String,
}

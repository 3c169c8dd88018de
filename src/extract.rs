use crate::error::{PipelineError, Result};
use crate::structs::{Observation, RawDailyRecord};
use chrono::NaiveDate;
use log::{debug, warn};
use serde_json::Value;
use std::{fs::File, io::BufReader, io::Read, path::Path};
use xml::reader::{EventReader, XmlEvent};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads a daily weather JSON file into raw records.
///
/// The document must have a top-level `daily` array; see [`parse_daily_records`].
///
/// # Errors
///
/// Returns error if the file cannot be opened, is not valid JSON, or any day is malformed.
pub fn read_daily_records(file_path: &Path) -> Result<Vec<RawDailyRecord>> {
    debug!("Reading daily weather file: {}", file_path.display());
    let file = File::open(file_path)?;
    let document: Value = serde_json::from_reader(BufReader::new(file))?;
    parse_daily_records(&document)
}

/// Converts the `daily` array of a parsed document into raw records, in order.
///
/// # Errors
///
/// - `PipelineError::MissingField` if the document has no `daily` key
/// - `PipelineError::Data` if `daily` is not an array
/// - any error from [`RawDailyRecord::from_json`] for the first bad day
pub fn parse_daily_records(document: &Value) -> Result<Vec<RawDailyRecord>> {
    let daily = document
        .get("daily")
        .ok_or_else(|| PipelineError::MissingField("daily".to_string()))?
        .as_array()
        .ok_or_else(|| PipelineError::Data("Field daily is not an array".to_string()))?;

    let mut records = Vec::with_capacity(daily.len());
    for entry in daily {
        let record = RawDailyRecord::from_json(entry)?;
        check_date(&record.date);
        records.push(record);
    }

    debug!("Loaded {} daily records", records.len());
    Ok(records)
}

fn check_date(date: &str) {
    if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
        warn!("Date '{}' is not in {} format", date, DATE_FORMAT);
    }
}

pub fn read_weather_xml(file_path: &Path) -> Result<Vec<Observation>> {
    debug!("Reading weather XML file: {}", file_path.display());
    let file = File::open(file_path)?;
    parse_weather_xml(BufReader::new(file))
}

/// Parses `<day>` elements directly under the document root into observations.
///
/// Each day needs `date`, `temperature`, `humidity` and `precipitation` children.
/// When a child appears more than once, the first one is used.
///
/// # Errors
///
/// - `PipelineError::Xml` if the document is not well-formed
/// - `PipelineError::MissingField` if a day lacks one of its children
/// - `PipelineError::InvalidNumeric` if a numeric child does not parse as a float
pub fn parse_weather_xml<R: Read>(reader: R) -> Result<Vec<Observation>> {
    let mut observations = Vec::new();
    let mut depth = 0usize;
    let mut current_day: Option<DayFields> = None;
    let mut current_element: Option<String> = None;
    let mut text = String::new();

    for event in EventReader::new(reader) {
        match event? {
            XmlEvent::StartElement { name, .. } => {
                depth += 1;
                if depth == 2 && name.local_name == "day" {
                    current_day = Some(DayFields::default());
                } else if depth == 3 && current_day.is_some() {
                    current_element = Some(name.local_name);
                    text.clear();
                }
            }
            XmlEvent::Characters(val) | XmlEvent::CData(val) => {
                if current_element.is_some() {
                    text.push_str(&val);
                }
            }
            XmlEvent::EndElement { name } => {
                if depth == 3 {
                    if let (Some(day), Some(element)) = (current_day.as_mut(), current_element.take()) {
                        day.set(&element, text.trim());
                    }
                } else if depth == 2 && name.local_name == "day" {
                    if let Some(day) = current_day.take() {
                        observations.push(day.into_observation()?);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    debug!("Parsed {} XML observations", observations.len());
    Ok(observations)
}

#[derive(Default)]
struct DayFields {
    date: Option<String>,
    temperature: Option<String>,
    humidity: Option<String>,
    precipitation: Option<String>,
}

impl DayFields {
    fn set(&mut self, element: &str, value: &str) {
        let slot = match element {
            "date" => &mut self.date,
            "temperature" => &mut self.temperature,
            "humidity" => &mut self.humidity,
            "precipitation" => &mut self.precipitation,
            _ => return,
        };
        slot.get_or_insert_with(|| value.to_string());
    }

    fn into_observation(self) -> Result<Observation> {
        let date = self
            .date
            .ok_or_else(|| PipelineError::MissingField("day/date".to_string()))?;
        check_date(&date);

        Ok(Observation {
            date,
            temperature: parse_number("temperature", self.temperature)?,
            humidity: parse_number("humidity", self.humidity)?,
            precipitation: parse_number("precipitation", self.precipitation)?,
        })
    }
}

fn parse_number(field: &str, raw: Option<String>) -> Result<f64> {
    let raw = raw.ok_or_else(|| PipelineError::MissingField(format!("day/{}", field)))?;
    raw.parse::<f64>()
        .map_err(|_| PipelineError::invalid_numeric(field, raw))
}

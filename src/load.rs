use crate::error::Result;
use crate::structs::{ClassificationRecord, Observation};
use arrow_array::{BooleanArray, Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use csv::Writer;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use std::{fs::File, path::Path, sync::Arc};

/// Writes classified days to a CSV file, one row per day.
///
/// # Arguments
/// * `days` - Slice of classified days
/// * `output_path` - Path where the CSV file will be created
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_csv(days: &[ClassificationRecord], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "Date",
        "Max Temperature",
        "Min Temperature",
        "Precipitation",
        "Wind Speed",
        "Humidity",
        "Weather Description",
        "Is Hot Day",
        "Is Windy Day",
        "Is Rainy Day",
    ])?;

    for day in days {
        writer.write_record(&[
            day.date.to_string(),
            day.max_temp.to_string(),
            day.min_temp.to_string(),
            day.precipitation.to_string(),
            day.wind_speed.to_string(),
            day.humidity.to_string(),
            day.description.to_string(),
            day.hot_day.to_string(),
            day.windy_day.to_string(),
            day.rainy_day.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes XML observations to a CSV file with a capitalized header.
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_observations_csv(observations: &[Observation], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["Date", "Temperature", "Humidity", "Precipitation"])?;
    for obs in observations {
        writer.write_record(&[
            obs.date.to_string(),
            obs.temperature.to_string(),
            obs.humidity.to_string(),
            obs.precipitation.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes any serializable value to a pretty-formatted JSON file.
///
/// # Errors
/// Returns error if file cannot be created or serialization fails.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Writes classified days to a columnar Parquet file using Arrow format.
///
/// # Errors
/// Returns error if file cannot be created, schema is invalid, or Arrow operations fail.
pub fn write_parquet(days: &[ClassificationRecord], output_path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Utf8, false),
        Field::new("description", DataType::Utf8, false),
        Field::new("max_temp", DataType::Float64, false),
        Field::new("min_temp", DataType::Float64, false),
        Field::new("temp_swing", DataType::Float64, false),
        Field::new("hot_day", DataType::Boolean, false),
        Field::new("has_temp_swing", DataType::Boolean, false),
        Field::new("wind_speed", DataType::Float64, false),
        Field::new("windy_day", DataType::Boolean, false),
        Field::new("humidity", DataType::Float64, false),
        Field::new("uncomfortable", DataType::Boolean, false),
        Field::new("rainy_day", DataType::Boolean, false),
        Field::new("precipitation", DataType::Float64, false),
    ]));

    let dates = StringArray::from_iter_values(days.iter().map(|d| d.date.as_str()));
    let descriptions = StringArray::from_iter_values(days.iter().map(|d| d.description.as_str()));
    let max_temps: Float64Array = days.iter().map(|d| d.max_temp).collect();
    let min_temps: Float64Array = days.iter().map(|d| d.min_temp).collect();
    let swings: Float64Array = days.iter().map(|d| d.temp_swing).collect();
    let hot: BooleanArray = days.iter().map(|d| Some(d.hot_day)).collect();
    let has_swing: BooleanArray = days.iter().map(|d| Some(d.has_temp_swing)).collect();
    let wind_speeds: Float64Array = days.iter().map(|d| d.wind_speed).collect();
    let windy: BooleanArray = days.iter().map(|d| Some(d.windy_day)).collect();
    let humidity: Float64Array = days.iter().map(|d| d.humidity).collect();
    let uncomfortable: BooleanArray = days.iter().map(|d| Some(d.uncomfortable)).collect();
    let rainy: BooleanArray = days.iter().map(|d| Some(d.rainy_day)).collect();
    let precipitation: Float64Array = days.iter().map(|d| d.precipitation).collect();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(dates),
            Arc::new(descriptions),
            Arc::new(max_temps),
            Arc::new(min_temps),
            Arc::new(swings),
            Arc::new(hot),
            Arc::new(has_swing),
            Arc::new(wind_speeds),
            Arc::new(windy),
            Arc::new(humidity),
            Arc::new(uncomfortable),
            Arc::new(rainy),
            Arc::new(precipitation),
        ],
    )?;

    let file = File::create(output_path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::{RawDailyRecord, Thresholds};
    use crate::transform::classify_days;
    use parquet::file::reader::FileReader;
    use parquet::file::serialized_reader::SerializedFileReader;
    use tempfile::TempDir;

    fn sample_days() -> Vec<ClassificationRecord> {
        let raw = vec![
            RawDailyRecord {
                date: "2024-01-01".to_string(),
                max_temperature: 28.0,
                min_temperature: 18.0,
                precipitation: 0.0,
                wind_speed: 10.0,
                humidity: 60.0,
                weather_description: "Partly cloudy, mild".to_string(),
            },
            RawDailyRecord {
                date: "2024-01-02".to_string(),
                max_temperature: 33.5,
                min_temperature: 21.0,
                precipitation: 5.0,
                wind_speed: 20.0,
                humidity: 80.0,
                weather_description: "Thunderstorms".to_string(),
            },
        ];
        classify_days(&raw, &Thresholds::default())
    }

    #[test]
    fn should_write_export_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("days.csv");
        write_csv(&sample_days(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Max Temperature,Min Temperature,Precipitation,Wind Speed,Humidity,Weather Description,Is Hot Day,Is Windy Day,Is Rainy Day"
        );
        assert_eq!(lines[1], "2024-01-01,28,18,0,10,60,\"Partly cloudy, mild\",false,false,false");
        assert_eq!(lines[2], "2024-01-02,33.5,21,5,20,80,Thunderstorms,true,true,true");
    }

    #[test]
    fn should_write_observations_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("obs.csv");
        let observations = vec![Observation {
            date: "2024-03-01".to_string(),
            temperature: 12.5,
            humidity: 60.0,
            precipitation: 0.0,
        }];
        write_observations_csv(&observations, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Date,Temperature,Humidity,Precipitation\n2024-03-01,12.5,60,0\n");
    }

    #[test]
    fn should_write_json_that_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("days.json");
        let days = sample_days();
        write_json(&days, &path).unwrap();

        let file = File::open(&path).unwrap();
        let back: Vec<ClassificationRecord> = serde_json::from_reader(file).unwrap();
        assert_eq!(back, days);
    }

    #[test]
    fn should_write_parquet_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("days.parquet");
        write_parquet(&sample_days(), &path).unwrap();

        let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
        let metadata = reader.metadata();
        assert_eq!(metadata.file_metadata().num_rows(), 2);
        assert_eq!(metadata.file_metadata().schema_descr().num_columns(), 13);
    }
}

use std::fs;

use serde_json::json;
use tempfile::TempDir;
use weather_digest::{
    PipelineError, RawDailyRecord, Thresholds, aggregate_days, classify_day, generate_daily_report,
    process_daily_file, read_daily_records, render_summary, summarize_days, write_csv,
};

fn write_daily_file(dir: &TempDir, document: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("daily.json");
    fs::write(&path, serde_json::to_vec_pretty(&document).unwrap()).unwrap();
    path
}

fn tokyo_week() -> serde_json::Value {
    json!({
        "daily": [
            {"date": "2024-07-01", "max_temperature": 32, "min_temperature": 20,
             "precipitation": 0, "wind_speed": 10, "humidity": 50,
             "weather_description": "Sunny"},
            {"date": "2024-07-02", "max_temperature": 29.5, "min_temperature": 23,
             "precipitation": 12.4, "wind_speed": 22, "humidity": 88,
             "weather_description": "Heavy rain"},
            {"date": "2024-07-03", "max_temperature": 32, "min_temperature": 25,
             "wind_speed": 8, "humidity": 71,
             "weather_description": "Humid and hazy"}
        ]
    })
}

#[test]
fn should_report_and_summarize_a_daily_file() {
    let dir = TempDir::new().unwrap();
    let path = write_daily_file(&dir, tokyo_week());

    let days = process_daily_file(&path, &Thresholds::default()).unwrap();
    assert_eq!(days.len(), 3);

    let report = generate_daily_report(&days[2]);
    assert!(report.contains("It was a hot day."));
    assert!(report.contains("The humidity made the day uncomfortable."));
    assert!(report.ends_with("There was no precipitation."));

    let summary = summarize_days(&days).unwrap();
    // 07-01 and 07-03 tie on max temperature; the earlier day wins.
    assert_eq!(summary.hottest.date, "2024-07-01");
    assert_eq!(summary.windiest.date, "2024-07-02");
    assert_eq!(summary.most_humid.date, "2024-07-02");
    assert_eq!(summary.rainiest.date, "2024-07-02");

    let text = render_summary(&summary);
    assert!(text.starts_with("Hottest day: 2024-07-01 with a maximum temperature of 32°C"));
    assert!(text.ends_with("Rainiest day: 2024-07-02 with 12.4 mm of precipitation"));
}

#[test]
fn should_classify_missing_precipitation_as_dry() {
    let dir = TempDir::new().unwrap();
    let path = write_daily_file(&dir, tokyo_week());
    let raw = read_daily_records(&path).unwrap();

    let explicit = RawDailyRecord {
        precipitation: 0.0,
        ..raw[2].clone()
    };
    let thresholds = Thresholds::default();
    assert_eq!(classify_day(&raw[2], &thresholds), classify_day(&explicit, &thresholds));
}

#[test]
fn should_aggregate_with_shared_classifier() {
    let dir = TempDir::new().unwrap();
    let path = write_daily_file(&dir, tokyo_week());
    let raw = read_daily_records(&path).unwrap();

    let aggregate = aggregate_days(&raw, &Thresholds::default()).unwrap();
    assert_eq!(aggregate.hot_days, 2);
    assert_eq!(aggregate.windy_days, 1);
    assert_eq!(aggregate.rainy_days, 1);
    assert_eq!(aggregate.total_precipitation, 12.4);
    assert_eq!(aggregate.average_min_temp, 68.0 / 3.0);
}

#[test]
fn should_reject_empty_day_set() {
    let dir = TempDir::new().unwrap();
    let path = write_daily_file(&dir, json!({"daily": []}));

    let days = process_daily_file(&path, &Thresholds::default()).unwrap();
    assert!(days.is_empty());
    assert!(matches!(summarize_days(&days), Err(PipelineError::EmptyInput(_))));

    let raw = read_daily_records(&path).unwrap();
    assert!(matches!(
        aggregate_days(&raw, &Thresholds::default()),
        Err(PipelineError::EmptyInput(_))
    ));
}

#[test]
fn should_export_classified_days_to_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_daily_file(&dir, tokyo_week());
    let days = process_daily_file(&path, &Thresholds::default()).unwrap();

    let csv_path = dir.path().join("export.csv");
    write_csv(&days, &csv_path).unwrap();

    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert!(content.contains("2024-07-02,29.5,23,12.4,22,88,Heavy rain,false,true,true"));
}

pub mod error;
pub mod extract;
pub mod fetch;
pub mod load;
pub mod structs;
pub mod transform;

// Re-export public API
pub use error::{PipelineError, Result};
pub use extract::{parse_daily_records, parse_weather_xml, read_daily_records, read_weather_xml};
pub use fetch::{fetch_forecast, fetch_page, parse_forecast, parse_page};
pub use load::{write_csv, write_json, write_observations_csv, write_parquet};
pub use structs::{
    AggregateSummary, ClassificationRecord, ForecastPoint, ForecastQuery, Observation,
    PageSummary, RawDailyRecord, SimpleLogger, Thresholds, WeatherSummary,
};
pub use transform::{
    aggregate_days, classify_day, classify_days, generate_daily_report, process_daily_file,
    render_summary, summarize_days,
};

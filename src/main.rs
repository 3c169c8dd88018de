use clap::{Args, Parser, Subcommand};
use log::debug;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use weather_digest::fetch::DEFAULT_PAGE_URL;
use weather_digest::{
    ForecastQuery, PipelineError, SimpleLogger, Thresholds, aggregate_days, classify_days,
    fetch_forecast, fetch_page, generate_daily_report, parse_page, process_daily_file,
    read_daily_records, read_weather_xml, render_summary, summarize_days, write_csv, write_json,
    write_observations_csv, write_parquet,
};

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level for output
    #[arg(long, global = true, default_value = "false")]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a report for every day in a daily weather JSON file, then a summary
    Report {
        /// Daily weather JSON file with a top-level "daily" array
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
    /// Summarize a daily weather JSON file and export the classified days
    Export {
        /// Daily weather JSON file with a top-level "daily" array
        #[arg(short, long)]
        input: PathBuf,

        /// Output base name (will create dir containing .csv, .json, and .parquet files)
        #[arg(short, long, default_value = "tokyo_weather_summary")]
        output: String,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
    /// Convert an XML observation feed to CSV
    Xml {
        /// XML file with <day> elements under the root
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = "parsed_weather_data.csv")]
        output: PathBuf,
    },
    /// Fetch the first day of the Open-Meteo maximum temperature forecast
    Forecast {
        #[arg(long)]
        latitude: Option<f64>,

        #[arg(long)]
        longitude: Option<f64>,

        #[arg(long)]
        timezone: Option<String>,

        #[arg(short, long, default_value = "tokyo_weather.json")]
        output: PathBuf,
    },
    /// Scrape the title and lead sentence of a wiki article
    Scrape {
        #[arg(short, long, default_value = DEFAULT_PAGE_URL)]
        url: String,

        #[arg(short, long, default_value = "extracted_wikipedia_data.json")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ThresholdArgs {
    /// Maximum temperature (°C) above which a day is hot
    #[arg(long)]
    temp_threshold: Option<f64>,

    /// Wind speed (km/h) above which a day is windy
    #[arg(long)]
    wind_threshold: Option<f64>,

    /// Humidity (%) above which a day is uncomfortable
    #[arg(long)]
    humidity_threshold: Option<f64>,
}

impl ThresholdArgs {
    fn resolve(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            hot_temperature: self.temp_threshold.unwrap_or(defaults.hot_temperature),
            windy_speed: self.wind_threshold.unwrap_or(defaults.windy_speed),
            humid_percent: self.humidity_threshold.unwrap_or(defaults.humid_percent),
        }
    }
}

fn main() -> Result<(), PipelineError> {
    // Initialize timer and logger
    let total_start = Instant::now();
    log::set_logger(&LOGGER)
        .map_err(|e| PipelineError::Data(format!("Logger already set: {}", e)))?;

    // Acquire CLI args
    let cli = Cli::parse();
    if cli.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    match cli.command {
        Command::Report { input, thresholds } => run_report(input, thresholds.resolve())?,
        Command::Export {
            input,
            output,
            thresholds,
        } => run_export(input, &output, thresholds.resolve())?,
        Command::Xml { input, output } => {
            let observations = read_weather_xml(&input)?;
            write_observations_csv(&observations, &output)?;
            println!(
                "Parsed {} days and saved them to {}",
                observations.len(),
                output.display()
            );
        }
        Command::Forecast {
            latitude,
            longitude,
            timezone,
            output,
        } => {
            let defaults = ForecastQuery::default();
            let query = ForecastQuery {
                latitude: latitude.unwrap_or(defaults.latitude),
                longitude: longitude.unwrap_or(defaults.longitude),
                timezone: timezone.unwrap_or(defaults.timezone),
            };
            let point = fetch_forecast(&query)?;
            write_json(&point, &output)?;
            println!(
                "Forecast for {}: max {}°C | saved to {}",
                point.date,
                point.temperature_2m_max,
                output.display()
            );
        }
        Command::Scrape { url, output } => {
            let page = parse_page(&fetch_page(&url)?)?;
            println!("Extracted Data: {:?}", page);
            write_json(&page, &output)?;
            println!("Data successfully saved to {}", output.display());
        }
    }

    println!("\nTotal runtime: {:.2?}", total_start.elapsed());
    Ok(())
}

fn run_report(input: PathBuf, thresholds: Thresholds) -> Result<(), PipelineError> {
    debug!("Input file: {} | Thresholds: {:?}", input.display(), thresholds);
    let days = process_daily_file(&input, &thresholds)?;

    for day in &days {
        println!("{}\n", generate_daily_report(day));
    }

    let summary = summarize_days(&days)?;
    println!("{}", render_summary(&summary));
    Ok(())
}

fn run_export(input: PathBuf, output: &str, thresholds: Thresholds) -> Result<(), PipelineError> {
    debug!("Input file: {} | Thresholds: {:?}", input.display(), thresholds);

    println!("Starting data processing...");
    let processing_start = Instant::now();
    let raw_days = read_daily_records(&input)?;
    let aggregate = aggregate_days(&raw_days, &thresholds)?;
    let days = classify_days(&raw_days, &thresholds);
    println!(
        "Data processing completed in {:.2?} | Processed {} records",
        processing_start.elapsed(),
        days.len()
    );

    println!("Weather Data Summary:");
    println!("average_max_temp: {}", aggregate.average_max_temp);
    println!("average_min_temp: {}", aggregate.average_min_temp);
    println!("total_precipitation: {}", aggregate.total_precipitation);
    println!("average_wind_speed: {}", aggregate.average_wind_speed);
    println!("average_humidity: {}", aggregate.average_humidity);
    println!("hot_days: {}", aggregate.hot_days);
    println!("windy_days: {}", aggregate.windy_days);
    println!("rainy_days: {}", aggregate.rainy_days);

    // Create output directory
    let output_dir = PathBuf::from(format!("./output/{}", output));
    fs::create_dir_all(&output_dir)?;
    println!(
        "Created output directory: {} | Writing output files...",
        output_dir.display()
    );
    let io_start = Instant::now();

    // Extract just the directory name for the file names (remove path separators)
    let output_name = output.split(['/', '\\']).next_back().unwrap_or(output);
    let csv_path = output_dir.join(format!("{}.csv", output_name));
    let json_path = output_dir.join(format!("{}.json", output_name));
    let parquet_path = output_dir.join(format!("{}.parquet", output_name));
    let summary_path = output_dir.join(format!("{}_summary.json", output_name));

    write_csv(&days, &csv_path)?;
    write_json(&days, &json_path)?;
    write_parquet(&days, &parquet_path)?;
    write_json(&aggregate, &summary_path)?;

    println!("All files took {:.2?}", io_start.elapsed());
    println!("\nWrote files to directory: {}", output_dir.display());
    debug!("  - {}", csv_path.display());
    debug!("  - {}", json_path.display());
    debug!("  - {}", parquet_path.display());
    debug!("  - {}", summary_path.display());
    Ok(())
}

//! Timetable parser CLI
//!
//! Fetches or parses timetable data and prints it as JSON.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use timetable_parser::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, SessionQuery},
    services::SessionParser,
    utils::{calendar, http},
};

/// Timetable Parser - University Timetable Scraper
#[derive(Parser, Debug)]
#[command(
    name = "timetable",
    version,
    about = "Scrape and parse a university course timetable"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "timetable.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and list courses, departments and levels
    Courses {
        /// Date selecting the academic year (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Fetch the sessions of one course
    Sessions {
        /// Department id, e.g. CM010
        #[arg(long)]
        dept: String,

        /// Course id, e.g. BSCCS-S/10AA/1/FT
        #[arg(long)]
        course: String,

        /// Level name, e.g. "Undergraduate Year 1"
        #[arg(long)]
        level: String,

        /// Date selecting the academic year and term (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Parse a saved course metadata script
    ParseCourses {
        /// Path to data_autogen.js
        file: PathBuf,
    },

    /// Parse a saved timetable page
    ParseSessions {
        /// Path to the timetable HTML
        file: PathBuf,
    },

    /// Show the academic year and estimated term for a date
    Term {
        /// Date to inspect (default: today)
        date: Option<NaiveDate>,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Serialize)]
struct TermInfo {
    date: NaiveDate,
    academic_year: String,
    estimated_term: u8,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Using configuration from {}", cli.config.display());

    match cli.command {
        Command::Courses { date } => {
            let client = http::create_client(&config.source)?;
            let date = date.unwrap_or_else(calendar::today);
            let response = pipeline::fetch_courses(&config, &client, date).await?;
            print_json(&response)?;
        }

        Command::Sessions {
            dept,
            course,
            level,
            date,
        } => {
            let client = http::create_client(&config.source)?;
            let date = date.unwrap_or_else(calendar::today);
            let query = SessionQuery::new(dept, course, level);
            let response = pipeline::fetch_sessions(&config, &client, &query, date).await?;
            print_json(&response)?;
        }

        Command::ParseCourses { file } => {
            let bytes = std::fs::read(&file)?;
            log::info!("Parsing course metadata from {}", file.display());
            print_json(&timetable_parser::parse_course_document(bytes)?)?;
        }

        Command::ParseSessions { file } => {
            let html = std::fs::read_to_string(&file)?;
            log::info!("Parsing timetable from {}", file.display());
            let parser = SessionParser::new(&config.timetable)?;
            print_json(&parser.parse(&html)?)?;
        }

        Command::Term { date } => {
            let date = date.unwrap_or_else(calendar::today);
            let info = TermInfo {
                date,
                academic_year: config.calendar.academic_year_string(date),
                estimated_term: config.calendar.estimated_term(date)?,
            };
            print_json(&info)?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            for selector in [
                &config.timetable.table_selector,
                &config.timetable.course_name_selector,
                &config.timetable.date_range_selector,
            ] {
                if let Err(e) = timetable_parser::utils::parse_selector(selector) {
                    log::error!("{e}");
                    return Err(AppError::config(format!("Invalid selector: {selector}")));
                }
            }
            log::info!("Config OK");
        }
    }

    Ok(())
}

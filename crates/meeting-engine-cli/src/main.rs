//! `meet`: command-line front end for the meeting-engine.
//!
//! Every command prints JSON on stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`, or `debug` with `--verbose`).

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use meeting_engine::{
    compute_overlap, google_calendar_url, outlook_calendar_url, project_all, to_ics, Meeting,
    MeetingInstant, MeetingRequest, SchedulerConfig, SchedulingValidator, TimeZoneId,
    ZoneSelection,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meet")]
#[command(about = "Find and book meeting slots across timezones", version)]
struct Cli {
    /// JSON configuration file (working hours, holidays, zone cap)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ZoneArgs {
    /// Participant zones, comma-separated IANA names
    #[arg(long, value_delimiter = ',', required = true)]
    zones: Vec<TimeZoneId>,

    /// Zone to express hours in (default: first of --zones)
    #[arg(long)]
    reference: Option<TimeZoneId>,

    /// Override "today" (default: current date in the reference zone)
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Command {
    /// Common working window of the zones on a date
    Overlap {
        #[arg(long)]
        date: NaiveDate,
        #[command(flatten)]
        zones: ZoneArgs,
    },

    /// Classify a date (AVAILABLE, HOLIDAY, PAST, WEEKEND_ADVISORY, LIMITED_OVERLAP)
    Classify {
        #[arg(long)]
        date: NaiveDate,
        #[command(flatten)]
        zones: ZoneArgs,
    },

    /// Decide whether a date and time can be booked, with per-zone times
    CanBook {
        #[arg(long)]
        date: NaiveDate,
        /// Proposed time in the reference zone (HH:MM)
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        #[command(flatten)]
        zones: ZoneArgs,
    },

    /// Classify every day of a month
    Month {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[command(flatten)]
        zones: ZoneArgs,
    },

    /// Render a meeting time in other zones
    Project {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        /// Authoritative zone of the meeting
        #[arg(long)]
        zone: TimeZoneId,
        #[arg(long, default_value = "60")]
        duration: u32,
        /// Target zones, comma-separated (default: the meeting's own zone)
        #[arg(long, value_delimiter = ',')]
        to: Vec<TimeZoneId>,
    },

    /// Validate and admit a meeting request (JSON file, or - for stdin)
    Book {
        #[arg(long)]
        meeting: PathBuf,
        /// Participant zones (default: the meeting's own zone)
        #[arg(long, value_delimiter = ',')]
        zones: Vec<TimeZoneId>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Google Calendar and Outlook links for a meeting request
    Links {
        #[arg(long)]
        meeting: PathBuf,
    },

    /// iCalendar document for a meeting request
    Ics {
        #[arg(long)]
        meeting: PathBuf,
        #[arg(long)]
        uid: String,
        /// DTSTAMP (RFC 3339, default: now)
        #[arg(long)]
        stamp: Option<DateTime<Utc>>,
    },
}

#[derive(Serialize)]
struct BookingOutput<'a> {
    meeting: &'a Meeting,
    participants: Vec<meeting_engine::ProjectedTime>,
    google_calendar_url: String,
    outlook_calendar_url: String,
}

#[derive(Serialize)]
struct LinksOutput {
    google_calendar_url: String,
    outlook_calendar_url: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => SchedulerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    let policy = config.working_hours;
    tracing::debug!(config = ?cli.config, ?policy, "configuration ready");

    match cli.command {
        Command::Overlap { date, zones } => {
            let window = compute_overlap(date, &zones.zones, zones.reference(), &policy)?;
            print_json(&window)
        }
        Command::Classify { date, zones } => {
            let classification =
                zones
                    .validator(&config)
                    .classify(date, &zones.zones, zones.reference(), &policy)?;
            print_json(&serde_json::json!({
                "date": date,
                "classification": classification,
                "bookable": classification.is_bookable(),
            }))
        }
        Command::CanBook { date, time, zones } => {
            let assessment =
                zones
                    .validator(&config)
                    .assess(date, time, &zones.zones, zones.reference(), &policy)?;
            print_json(&assessment)
        }
        Command::Month { year, month, zones } => {
            let days = zones.validator(&config).classify_month(
                year,
                month,
                &zones.zones,
                zones.reference(),
                &policy,
            )?;
            print_json(&days)
        }
        Command::Project {
            date,
            time,
            zone,
            duration,
            to,
        } => {
            let instant = MeetingInstant::new(date, time, zone, duration)?;
            let targets = if to.is_empty() { vec![zone] } else { to };
            print_json(&project_all(&instant, &targets, &policy))
        }
        Command::Book {
            meeting,
            zones,
            today: today_override,
        } => {
            let request = read_request(&meeting)?;
            let draft = request.validate()?;
            let zones = if zones.is_empty() {
                vec![*draft.instant.zone()]
            } else {
                zones
            };
            let selection =
                ZoneSelection::from_zones(&zones, Some(*draft.instant.zone()), config.max_zones)
                    .context("invalid --zones for this meeting")?;
            let validator = SchedulingValidator::new(
                &config.holidays,
                today(today_override, selection.primary()),
            );
            let booked = Meeting::book(&request, &validator, selection.zones(), &policy)?;
            tracing::info!(title = %booked.title, start = %booked.instant.start_utc(), "meeting admitted");
            print_json(&BookingOutput {
                participants: project_all(&booked.instant, selection.zones(), &policy),
                google_calendar_url: google_calendar_url(&booked),
                outlook_calendar_url: outlook_calendar_url(&booked),
                meeting: &booked,
            })
        }
        Command::Links { meeting } => {
            let meeting = read_request(&meeting)?.validate()?;
            print_json(&LinksOutput {
                google_calendar_url: google_calendar_url(&meeting),
                outlook_calendar_url: outlook_calendar_url(&meeting),
            })
        }
        Command::Ics {
            meeting,
            uid,
            stamp,
        } => {
            let meeting = read_request(&meeting)?.validate()?;
            print!("{}", to_ics(&meeting, &uid, stamp.unwrap_or_else(Utc::now)));
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

impl ZoneArgs {
    fn reference(&self) -> &TimeZoneId {
        self.reference.as_ref().unwrap_or(&self.zones[0])
    }

    fn validator<'a>(&self, config: &'a SchedulerConfig) -> SchedulingValidator<'a> {
        SchedulingValidator::new(&config.holidays, today(self.today, self.reference()))
    }
}

/// "Today" as a civil date in `zone`, unless overridden.
fn today(overridden: Option<NaiveDate>, zone: &TimeZoneId) -> NaiveDate {
    overridden.unwrap_or_else(|| Utc::now().with_timezone(&zone.tz()).date_naive())
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM, got '{s}': {e}"))
}

fn read_request(path: &Path) -> Result<MeetingRequest> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading meeting from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading meeting {}", path.display()))?
    };
    serde_json::from_str(&contents).context("parsing meeting JSON")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

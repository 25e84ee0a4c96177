mod report;

use chrono::{DateTime, NaiveDateTime, Utc};
use meetzone::{Context, Options, WorkHours, zone_report_with};
use std::io::{self, IsTerminal};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MEETZONE_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    debug!(zones = ?config.zones, reference = %config.reference, work = ?config.work_hours, "resolved cli config");

    let ctx = Context { reference: config.reference };
    let opts = Options { work_hours: config.work_hours };
    match zone_report_with(&config.zones, &ctx, &opts) {
        Ok(report) => report::print_report(&report, config.color),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    zones: Vec<String>,
    reference: DateTime<Utc>,
    work_hours: WorkHours,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut zones: Vec<String> = Vec::new();
    let mut reference = Utc::now();
    let mut work_hours = WorkHours::STANDARD;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("meetzone {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--at" => {
                let value = args.next().ok_or_else(|| "error: --at expects a value".to_string())?;
                reference = parse_reference(&value)?;
            }
            "--work" => {
                let value = args.next().ok_or_else(|| "error: --work expects a value".to_string())?;
                work_hours = parse_work_hours(&value)?;
            }
            "--" => {
                zones.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--at=") => {
                reference = parse_reference(arg.trim_start_matches("--at="))?;
            }
            _ if arg.starts_with("--work=") => {
                work_hours = parse_work_hours(arg.trim_start_matches("--work="))?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => zones.push(arg),
        }
    }

    if zones.is_empty() {
        return Err(format!("error: no time zones provided\n\n{}", help_text()));
    }

    Ok(CliConfig { zones, reference, work_hours, color })
}

/// RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS` read as UTC, or English such as
/// `"next friday 3pm"` relative to now.
fn parse_reference(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    chrono_english::parse_date_string(value, Utc::now(), chrono_english::Dialect::Us)
        .map_err(|_| format!("error: invalid --at '{value}' (expected RFC 3339, YYYY-MM-DDTHH:MM:SS or a phrase)"))
}

fn parse_work_hours(value: &str) -> Result<WorkHours, String> {
    let invalid = || format!("error: invalid --work '{value}' (expected START-END, e.g. 9-17)");
    let (start, end) = value.split_once('-').ok_or_else(invalid)?;
    let start: u32 = start.trim().parse().map_err(|_| invalid())?;
    let end: u32 = end.trim().parse().map_err(|_| invalid())?;
    WorkHours::new(start, end).map_err(|err| format!("error: {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "meetzone {version}

Time-zone converter and meeting planner.

Usage:
  meetzone [OPTIONS] [--] <zone...>

  One zone prints a city summary, two add the pair conversion table, and
  two to eight add the working-hours overlap and meeting ranking.

Options:
  --at <when>           Reference instant: RFC 3339, YYYY-MM-DDTHH:MM:SS (UTC)
                        or an English phrase like \"tomorrow 9am\". Default: now.
  --work <start-end>    Local working hours. Default: 9-17.
  --color               Force ANSI color output.
  --no-color            Disable ANSI color output.
  -h, --help            Show this help message.
  -V, --version         Print version information.

Environment:
  {log_env}           Log filter (e.g. debug). Default: warn.

Exit codes:
  0  Success.
  1  Unknown zone or invalid zone count.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}

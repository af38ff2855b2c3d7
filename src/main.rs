use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use clap::{Args, Parser, Subcommand};
use log::warn;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

use training_plan::email::{compose_weekly_email, MailConfig};
use training_plan::model::{day_name, format_time, Slot, Week};
use training_plan::pipeline::{build_week_plan, Profile, WeekPlan};
use training_plan::report::{fetch_report, read_report_csv, RawTable, ReportSource};
use training_plan::venue::write_venue_workbook;
use training_plan::xlsx::write_plan_workbook;

#[derive(Parser)]
#[command(name = "training-plan")]
#[command(about = "Weekly training schedule and venue usage reports", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Base URL of the reporting endpoint
    #[arg(long, env = "PLAN_REPORT_URL")]
    url: Option<String>,

    /// Endpoint username
    #[arg(long, env = "PLAN_REPORT_USER")]
    username: Option<String>,

    /// Endpoint password
    #[arg(long, env = "PLAN_REPORT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Report name passed to the endpoint
    #[arg(long, env = "PLAN_REPORT_NAME", default_value = "TRAINING_PLAN")]
    report: String,

    /// Read the raw table from a CSV file instead of fetching
    #[arg(long, value_name = "FILE")]
    from_csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the weekly plan workbook
    Plan {
        /// Week start date (conventionally a Sunday), e.g. 2025-02-16
        date: NaiveDate,

        /// Output file; defaults to a name derived from the week
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate the venue usage workbook
    Venues {
        /// Week start date (conventionally a Sunday)
        date: NaiveDate,

        /// Output file; defaults to a name derived from the week
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate the plan workbook and compose the weekly email draft
    Email {
        /// Week start date (conventionally a Sunday)
        date: NaiveDate,

        /// Workbook output file; defaults to a name derived from the week
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sender address
        #[arg(long, env = "PLAN_MAIL_FROM")]
        sender: String,

        /// Recipient addresses, comma separated
        #[arg(long, env = "PLAN_MAIL_TO", value_delimiter = ',')]
        recipients: Vec<String>,

        /// Write the draft here instead of stdout
        #[arg(long, value_name = "FILE")]
        draft: Option<PathBuf>,
    },

    /// Print the normalized sessions and the pivot grid as CSV
    Inspect {
        /// Week start date (conventionally a Sunday)
        date: NaiveDate,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { date, output } => plan(&cli.source, date, output)?,
        Commands::Venues { date, output } => venues(&cli.source, date, output)?,
        Commands::Email { date, output, sender, recipients, draft } => {
            email(&cli.source, date, output, sender, recipients, draft)?;
        }
        Commands::Inspect { date } => inspect(&cli.source, date)?,
    }

    Ok(())
}

fn load_table(source: &SourceArgs) -> Result<RawTable> {
    if let Some(path) = &source.from_csv {
        return read_report_csv(path)
            .with_context(|| format!("Failed to read report CSV {}", path.display()));
    }

    let url = source
        .url
        .as_deref()
        .context("--url (or PLAN_REPORT_URL) is required unless --from-csv is given")?;
    let username = source
        .username
        .as_deref()
        .context("--username (or PLAN_REPORT_USER) is required unless --from-csv is given")?;
    let password = source
        .password
        .as_deref()
        .context("--password (or PLAN_REPORT_PASSWORD) is required unless --from-csv is given")?;

    let report_source = ReportSource {
        url: url.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    };
    fetch_report(&report_source, &source.report).context("Failed to fetch report")
}

fn week_for(date: NaiveDate) -> Week {
    if date.weekday() != Weekday::Sun {
        warn!(
            "{} is a {}; the window still covers the 7 days from it",
            date,
            day_name(date.weekday())
        );
    }
    Week::starting(date)
}

fn build_plan(source: &SourceArgs, week: Week) -> Result<WeekPlan> {
    let table = load_table(source)?;
    build_week_plan(&table, week, &Profile::default()).context("Failed to build weekly plan")
}

fn plan(source: &SourceArgs, date: NaiveDate, output: Option<PathBuf>) -> Result<()> {
    let week = week_for(date);
    let plan = build_plan(source, week)?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.xlsx", week.file_stem())));
    write_plan_workbook(&plan.sheet, &path).context("Failed to write Excel file")?;

    println!("Wrote {}", path.display());
    report_missing(&plan);
    Ok(())
}

fn venues(source: &SourceArgs, date: NaiveDate, output: Option<PathBuf>) -> Result<()> {
    let week = week_for(date);
    let plan = build_plan(source, week)?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!("Venue_Usage_{}.xlsx", week.start().format("%d%b%Y")))
    });
    write_venue_workbook(&plan.sessions, &week, &path).context("Failed to write Excel file")?;

    println!("Wrote {}", path.display());
    Ok(())
}

fn email(
    source: &SourceArgs,
    date: NaiveDate,
    output: Option<PathBuf>,
    sender: String,
    recipients: Vec<String>,
    draft: Option<PathBuf>,
) -> Result<()> {
    let week = week_for(date);
    let plan = build_plan(source, week)?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.xlsx", week.file_stem())));
    write_plan_workbook(&plan.sheet, &path).context("Failed to write Excel file")?;
    println!("Wrote {}", path.display());

    let config = MailConfig { sender, recipients };
    let message = compose_weekly_email(&config, &week, &path, &plan.missing);

    match draft {
        Some(draft_path) => {
            std::fs::write(&draft_path, message.to_text())
                .with_context(|| format!("Failed to write draft {}", draft_path.display()))?;
            println!("Wrote {}", draft_path.display());
        }
        None => println!("{}", message.to_text()),
    }

    report_missing(&plan);
    Ok(())
}

#[derive(Serialize)]
struct SessionRecord<'a> {
    sport: &'a str,
    training_group: &'a str,
    venue: &'a str,
    date: String,
    start: String,
    finish: String,
    session_type: &'a str,
    half_day: &'a str,
    coach: &'a str,
}

fn inspect(source: &SourceArgs, date: NaiveDate) -> Result<()> {
    let week = week_for(date);
    let plan = build_plan(source, week)?;

    let mut sessions = csv::Writer::from_writer(io::stdout());
    for s in &plan.sessions {
        sessions.serialize(SessionRecord {
            sport: &s.sport,
            training_group: &s.training_group,
            venue: &s.venue,
            date: s.date.to_string(),
            start: format_time(s.start),
            finish: format_time(s.finish),
            session_type: &s.session_type,
            half_day: s.half_day.as_str(),
            coach: &s.coach,
        })?;
    }
    sessions.flush()?;

    println!();

    let mut grid = csv::Writer::from_writer(io::stdout());
    let mut header = vec!["Sport".to_string(), "Training_Group".to_string()];
    header.extend(Slot::ALL.iter().map(|slot| slot.label()));
    grid.write_record(&header)?;
    for row in &plan.grid.rows {
        let mut record = vec![row.sport.clone(), row.training_group.clone()];
        record.extend(row.cells.iter().cloned());
        grid.write_record(&record)?;
    }
    grid.flush()?;

    report_missing(&plan);
    Ok(())
}

fn report_missing(plan: &WeekPlan) {
    for notice in &plan.missing {
        println!("No data: {}", notice);
    }
}

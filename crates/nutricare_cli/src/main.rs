//! NutriCare command-line entry point.
//!
//! # Responsibility
//! - Expose grade/section resolution, BMI classification, status
//!   recalculation and grade reports over a local record store.
//! - Resolve settings from flags, environment and `nutricare.yaml`.

mod settings;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use nutricare_core::db::local_today;
use nutricare_core::model::student::is_calendar_date;
use nutricare_core::service::report_service::StatusFilter;
use nutricare_core::{
    classify, normalize_grade_section, open_db, ApplyOptions, GradeKey, NutritionService,
    NutritionStatus, ReportFilter, ReportService, SqliteAttendanceRepository, SqliteBmiRepository,
    SqliteStudentRepository,
};
use settings::{Settings, DEFAULT_SETTINGS_FILE};

#[derive(Parser)]
#[command(name = "nutricare")]
#[command(about = "School nutrition records: grade/section resolution and BMI status")]
struct Cli {
    /// Settings file base name or path, without extension
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the core library is linked
    Ping,

    /// Print the canonical grade/section for each raw value
    Normalize {
        #[arg(required = true)]
        raw: Vec<String>,
    },

    /// Print the nutrition status for each BMI value
    Classify {
        #[arg(required = true, allow_negative_numbers = true)]
        bmi: Vec<f64>,
    },

    /// Recompute stored statuses from each student's latest BMI
    Recalc {
        /// Record store path
        #[arg(long)]
        db: Option<String>,
        /// Writes per group
        #[arg(long)]
        batch_size: Option<usize>,
        /// Plan and report without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Summarize nutrition status and attendance
    Report {
        /// Record store path
        #[arg(long)]
        db: Option<String>,
        /// Grade to summarize, e.g. `K1`, `3`, `Grade 3`
        #[arg(long)]
        grade: Option<String>,
        /// Attendance day, `YYYY-MM-DD`; defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Only list rows in this section
        #[arg(long)]
        section: Option<String>,
        /// Only list rows with this status, or `unknown`
        #[arg(long)]
        status: Option<String>,
        /// Only list rows whose name or grade/section contains this text
        #[arg(long)]
        search: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => {
            println!("nutricare_core ping={}", nutricare_core::ping());
            println!("nutricare_core version={}", nutricare_core::core_version());
            Ok(())
        }
        Command::Normalize { raw } => {
            for value in raw {
                println!("{value}\t{}", normalize_grade_section(&value));
            }
            Ok(())
        }
        Command::Classify { bmi } => {
            for value in bmi {
                let label = classify(value).map_or("-", NutritionStatus::label);
                println!("{value}\t{label}");
            }
            Ok(())
        }
        Command::Recalc {
            db,
            batch_size,
            dry_run,
        } => {
            let settings = load_settings(&cli.config)?.with_overrides(db, batch_size);
            recalc(&settings, dry_run)
        }
        Command::Report {
            db,
            grade,
            date,
            section,
            status,
            search,
        } => {
            let settings = load_settings(&cli.config)?.with_overrides(db, None);
            let filter = ReportFilter {
                grade: grade.as_deref().map(parse_grade).transpose()?,
                section,
                status: status.as_deref().map(parse_status).transpose()?,
                search,
            };
            report(&settings, &filter, date)
        }
    }
}

fn load_settings(file: &str) -> Result<Settings> {
    let settings = Settings::load(file)?;
    if let Some(log_dir) = settings.log_dir.as_deref() {
        nutricare_core::init_logging(&settings.log_level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to start logging")?;
    }
    Ok(settings)
}

fn recalc(settings: &Settings, dry_run: bool) -> Result<()> {
    let conn = open_db(&settings.db_path)
        .with_context(|| format!("failed to open record store `{}`", settings.db_path))?;
    let service = NutritionService::new(
        SqliteStudentRepository::new(&conn),
        SqliteBmiRepository::new(&conn),
    );
    let options = ApplyOptions {
        batch_size: settings.batch_size,
        dry_run,
    };

    let plan = service
        .plan_recalculation()
        .context("failed to plan recalculation")?;
    let report = service.apply_updates(&plan.updates, &options, |progress| {
        info!(
            "event=recalc_progress module=cli status=ok completed_groups={} total_groups={}",
            progress.completed_groups, progress.total_groups
        );
        true
    });

    println!(
        "scanned={} planned={} succeeded={} failed={} skipped={} dry_run={}",
        plan.scanned,
        report.planned,
        report.succeeded,
        report.failed_count(),
        report.skipped(),
        report.dry_run
    );
    for failure in &report.failed {
        println!(
            "failed record={} student={} reason={}",
            failure.record_id, failure.student_id, failure.reason
        );
    }
    if !report.failed.is_empty() {
        bail!("{} status updates failed", report.failed_count());
    }
    Ok(())
}

fn report(settings: &Settings, filter: &ReportFilter, date: Option<String>) -> Result<()> {
    let conn = open_db(&settings.db_path)
        .with_context(|| format!("failed to open record store `{}`", settings.db_path))?;
    let date = match date {
        Some(date) if is_calendar_date(&date) => date,
        Some(date) => bail!("--date must be YYYY-MM-DD, got `{date}`"),
        None => local_today(&conn).context("failed to read current date")?,
    };

    let service = ReportService::new(
        SqliteStudentRepository::new(&conn),
        SqliteBmiRepository::new(&conn),
        SqliteAttendanceRepository::new(&conn),
    );
    let report = service
        .grade_report(filter, &date)
        .context("failed to build report")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to encode report")?
    );
    Ok(())
}

fn parse_grade(value: &str) -> Result<GradeKey> {
    GradeKey::parse_label(value).with_context(|| format!("unknown grade `{value}`"))
}

fn parse_status(value: &str) -> Result<StatusFilter> {
    if value.trim().eq_ignore_ascii_case("unknown") {
        return Ok(StatusFilter::Missing);
    }
    NutritionStatus::parse_label(value)
        .map(StatusFilter::Is)
        .with_context(|| format!("unknown nutrition status `{value}`"))
}

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::{CommandFactory, FromArgMatches};
use tracing::{info, warn};

use hnprobe::args::CliArgs;
use hnprobe::config::{load_config, resolve_settings};
use hnprobe::error::AppResult;
use hnprobe::report::{ReportFormat, RunReport, render_report, write_report};
use hnprobe::suite::{TestCase, run_cases, select_cases};

pub(crate) fn run() -> AppResult<ExitCode> {
    let matches = CliArgs::command().get_matches();
    let args = CliArgs::from_arg_matches(&matches)?;

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let cases = select_cases(&args.categories, args.filter.as_deref());
    if args.list {
        print_cases(&cases);
        return Ok(ExitCode::SUCCESS);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, cases))
}

fn print_cases(cases: &[TestCase]) {
    for case in cases {
        println!("{:<12} {}", case.category.as_str(), case.name);
    }
}

async fn run_async(args: CliArgs, cases: Vec<TestCase>) -> AppResult<ExitCode> {
    let file = load_config(args.config.as_deref())?;
    let settings = resolve_settings(args.overrides(), file.as_ref())?.shared();

    if cases.is_empty() {
        warn!("No cases match the selected categories and filter");
        return Ok(ExitCode::FAILURE);
    }

    info!(
        environment = %settings.environment,
        base_url = %settings.base_url,
        cases = cases.len(),
        jobs = settings.jobs,
        "Starting run"
    );
    let started_at = Utc::now();
    let results = run_cases(&cases, Arc::clone(&settings)).await?;
    let report = RunReport {
        started_at,
        environment: settings.environment.clone(),
        base_url: settings.base_url.clone(),
        results,
    };

    print!("{}", render_report(&report, ReportFormat::Text)?);
    if !args.no_report {
        write_report(&report, &settings.report_dir, settings.report_format).await?;
    }

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

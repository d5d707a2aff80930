pub mod auditor;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod html_report;
pub mod http_client;
pub mod models;
pub mod pdf;
pub mod recommendations;
pub mod reporter;

use anyhow::{Result, bail};
use auditor::{AuditOutcome, Auditor};
use cli::Cli;
use colored::*;
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use reporter::Reporter;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Applies the config file (explicit `--config` or a default location) under the CLI flags.
pub fn resolve_args(args: Cli) -> Result<Cli> {
    match Config::load(args.config.as_deref())? {
        Some(config) => Ok(config.merge_with_cli(&args)),
        None => Ok(args),
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.output != "text" && args.output != "json" {
        bail!("Output format must be text or json");
    }

    let text_output = args.output == "text";
    if text_output {
        println!("{}", "pageaudit - On-Page SEO Auditor".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_blue());
        println!();
    }

    let mut auditor = Auditor::new(args.audit_config()?)?;

    match args.url.clone() {
        Some(url) => {
            let outcome = audit_with_progress(&mut auditor, &url, text_output).await?;
            emit(&outcome, &args)
        }
        None => {
            let stdin = std::io::stdin();
            run_interactive(&mut auditor, stdin.lock(), &args).await
        }
    }
}

/// Prompts for URLs until one audit succeeds.
///
/// Invalid URLs and network failures print the error and ask again; an empty
/// line or end of input stops without a report.
pub async fn run_interactive<R: BufRead>(
    auditor: &mut Auditor,
    mut input: R,
    args: &Cli,
) -> Result<()> {
    let text_output = args.output == "text";

    loop {
        // JSON mode keeps stdout for the report alone
        if text_output {
            print!("Enter the URL to analyze: ");
            std::io::stdout().flush()?;
        } else {
            eprint!("Enter the URL to analyze: ");
            std::io::stderr().flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
            if text_output {
                println!();
            } else {
                eprintln!();
            }
            bail!("No URL provided");
        }

        match audit_with_progress(auditor, line.trim(), text_output).await {
            Ok(outcome) => return emit(&outcome, args),
            Err(e) if e.is_retryable() => {
                eprintln!("{} {}", "Error:".bright_red().bold(), e);
                eprintln!("{}", "Try another URL, or press Enter to quit.".dimmed());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn audit_with_progress(
    auditor: &mut Auditor,
    url: &str,
    show_spinner: bool,
) -> error::Result<AuditOutcome> {
    let spinner = show_spinner.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.cyan} {msg}")
                .expect("Progress bar template should be valid"),
        );
        pb.set_message(format!("Analyzing {}", url.trim()));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = auditor.run(url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

fn emit(outcome: &AuditOutcome, args: &Cli) -> Result<()> {
    match args.output.as_str() {
        "json" => println!("{}", Reporter::to_json(&outcome.report)?),
        _ => Reporter::print_outcome(outcome),
    }

    if let Some(filename) = &args.save {
        Reporter::save_json_report(&outcome.report, filename)?;
        if args.output != "json" {
            println!("Report saved to: {}", filename.bright_green());
        }
    }

    Ok(())
}

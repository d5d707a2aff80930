use crate::auditor::AuditOutcome;
use crate::catalog::Metric;
use crate::html_report::metric_value;
use crate::models::AuditReport;
use crate::recommendations::RecommendationEngine;
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    pub fn print_text_report(report: &AuditReport) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "SEO Analysis Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "URL".bright_white().bold(), report.url);
        println!(
            "{}: {}",
            "Timestamp".bright_white().bold(),
            report.timestamp
        );
        println!();

        let Some(metrics) = &report.metrics else {
            println!("{}", "No metrics available".bright_red().bold());
            println!();
            println!("{}", "=".repeat(80).bright_blue());
            return;
        };

        println!("{}", "Metrics".bright_yellow().bold().underline());
        for metric in Metric::ALL {
            let value = metric_value(metric, metrics);
            let value = if RecommendationEngine::is_good(metric, metrics) {
                value.bright_green()
            } else {
                value.yellow()
            };
            println!("  {:<18} {}", format!("{}:", metric.name()), value);
        }
        println!();

        println!("{}", "Recommendations".bright_yellow().bold().underline());
        if report.recommendations.is_empty() {
            println!("  {}", "No issues found".bright_green());
        } else {
            for recommendation in &report.recommendations {
                println!("  {} {}", "-".yellow(), recommendation.message);
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_outcome(outcome: &AuditOutcome) {
        Self::print_text_report(&outcome.report);
        if let Some(path) = &outcome.pdf_path {
            println!(
                "{} {}",
                "PDF report saved to:".bright_white().bold(),
                path.display().to_string().bright_green()
            );
        }
    }

    pub fn to_json(report: &AuditReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize report")
    }

    pub fn save_json_report(report: &AuditReport, filename: &str) -> Result<()> {
        let json = Self::to_json(report)?;
        let mut file = File::create(filename)
            .with_context(|| format!("Failed to create report file: {}", filename))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

//! Audit command - run the audit engine over invoice files.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use finaudit_core::audit::rules::parse_invoice_date;
use finaudit_core::models::config::AuditConfig;
use finaudit_core::models::report::{AuditReport, Severity};
use finaudit_core::{Auditor, RawInvoice};

use crate::input::load_invoices;

/// Arguments for the audit command.
#[derive(Args)]
pub struct AuditArgs {
    /// Input files or glob patterns (.json or .csv)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reference date for future-date checks (YYYY-MM-DD, default: today)
    #[arg(long)]
    as_of: Option<String>,

    /// Arithmetic-mismatch tolerance in currency units
    #[arg(long)]
    tolerance: Option<String>,

    /// Minimum occurrences for a repeated-item pattern
    #[arg(long)]
    repeat_threshold: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON report
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: AuditArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = if let Some(path) = config_path {
        AuditConfig::from_file(std::path::Path::new(path))?
    } else {
        AuditConfig::default()
    };

    if let Some(tolerance) = &args.tolerance {
        config.tolerance = Decimal::from_str(tolerance)
            .map_err(|e| anyhow::anyhow!("invalid --tolerance {}: {}", tolerance, e))?;
    }
    if let Some(threshold) = args.repeat_threshold {
        config.repeat_threshold = threshold;
    }

    // The core never reads a clock; today's date enters here.
    let as_of = match &args.as_of {
        Some(raw) => parse_invoice_date(raw)
            .ok_or_else(|| anyhow::anyhow!("invalid --as-of date: {}", raw))?,
        None => chrono::Local::now().date_naive(),
    };

    // Expand inputs and merge all records into one invoice set
    let files = expand_inputs(&args.inputs)?;
    info!("Auditing {} input file(s) as of {}", files.len(), as_of);

    let mut invoices: Vec<RawInvoice> = Vec::new();
    for path in &files {
        let mut loaded = load_invoices(path)?;
        debug!("{}: {} invoice(s)", path.display(), loaded.len());
        invoices.append(&mut loaded);
    }

    let auditor = Auditor::with_config(as_of, config)?;
    let report = auditor.run(&invoices);

    // Format output
    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Text => format_text(&report),
    };

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    Ok(())
}

/// Expand glob patterns; a pattern with no matches is an error rather than a
/// silently empty audit.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let matches: Vec<PathBuf> = glob::glob(input)?.filter_map(|r| r.ok()).collect();
        if matches.is_empty() {
            anyhow::bail!("No matching files found for: {}", input);
        }
        files.extend(matches);
    }

    Ok(files)
}

fn severity_label(severity: Severity) -> console::StyledObject<&'static str> {
    match severity {
        Severity::High => style("high").red(),
        Severity::Medium => style("medium").yellow(),
        Severity::Low => style("low").dim(),
    }
}

fn format_text(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", style("Audit summary").bold()));
    out.push_str(&format!(
        "  Invoices: {}  Vendors: {}\n",
        report.summary.total_invoices, report.summary.vendors
    ));
    if let (Some(start), Some(end)) = (
        report.summary.date_range.start,
        report.summary.date_range.end,
    ) {
        out.push_str(&format!("  Date range: {start} to {end}\n"));
    }

    out.push_str(&format!("\n{}\n", style("Issues").bold()));
    if report.issues.is_empty() {
        out.push_str("  none\n");
    }
    for issue in &report.issues {
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            severity_label(issue.severity),
            issue.description,
            issue.invoice_id.as_deref().unwrap_or("unidentified invoice")
        ));
    }

    let flags = &report.compliance_flags;
    out.push_str(&format!("\n{}\n", style("Compliance flags").bold()));
    for flag in &flags.missing_fields {
        out.push_str(&format!(
            "  missing {} ({})\n",
            flag.field,
            flag.invoice_id.as_deref().unwrap_or("unidentified invoice")
        ));
    }
    for flag in &flags.invalid_gstin {
        out.push_str(&format!(
            "  invalid GSTIN {} ({})\n",
            flag.gstin,
            flag.invoice_id.as_deref().unwrap_or("unidentified invoice")
        ));
    }
    for flag in &flags.future_dates {
        out.push_str(&format!(
            "  future date {} ({})\n",
            flag.date,
            flag.invoice_id.as_deref().unwrap_or("unidentified invoice")
        ));
    }
    if flags.missing_fields.is_empty()
        && flags.invalid_gstin.is_empty()
        && flags.future_dates.is_empty()
    {
        out.push_str("  none\n");
    }

    out.push_str(&format!("\n{}\n", style("Vendors").bold()));
    for vendor in &report.vendor_summary {
        let name = if vendor.vendor.is_empty() {
            "(no vendor)"
        } else {
            vendor.vendor.as_str()
        };
        out.push_str(&format!(
            "  {}: {} invoice(s), {} billed\n",
            name, vendor.invoice_count, vendor.total_billed
        ));
    }

    let patterns = &report.invoice_patterns;
    if !patterns.duplicate_amounts.is_empty() || !patterns.repeated_items.is_empty() {
        out.push_str(&format!("\n{}\n", style("Patterns").bold()));
        for group in &patterns.duplicate_amounts {
            out.push_str(&format!(
                "  amount {} on {}\n",
                group.amount,
                group.invoice_ids.join(", ")
            ));
        }
        for item in &patterns.repeated_items {
            out.push_str(&format!(
                "  item \"{}\" ×{}\n",
                item.item, item.occurrences
            ));
        }
    }

    out
}

//! Extract command - read a bill-of-entry workbook into a section record.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use boemap_core::formats::{VALUE_SEPARATOR, load_profiles, save_record};
use boemap_core::{BoemapConfig, ExtractionResult, SectionRecord, extract_record, read_workbook};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input workbook (default: configured workbook path)
    workbook: Option<PathBuf>,

    /// Rule mapping file
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Output file (default: configured record path for ini, stdout otherwise)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "ini")]
    format: RecordFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordFormat {
    /// Section record file read by `populate`
    Ini,
    /// JSON document
    Json,
    /// One row per section and key
    Csv,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let workbook = args.workbook.unwrap_or_else(|| config.paths.workbook.clone());
    let mapping = args.mapping.unwrap_or_else(|| config.paths.rule_mapping.clone());
    let result = extract_stage(&workbook, &mapping, &config)?;

    match (args.format, args.output) {
        (RecordFormat::Ini, output) => {
            let output = output.unwrap_or_else(|| config.paths.record.clone());
            save_record(&result.record, &output)?;
            report(&result, &output);
        }
        (format, Some(output)) => {
            fs::write(&output, format_record(&result.record, format)?)?;
            report(&result, &output);
        }
        (format, None) => {
            println!("{}", format_record(&result.record, format)?);
        }
    }

    Ok(())
}

/// Load the workbook and rule mapping, then run extraction.
pub fn extract_stage(
    workbook: &Path,
    mapping: &Path,
    config: &BoemapConfig,
) -> anyhow::Result<ExtractionResult> {
    if !workbook.exists() {
        anyhow::bail!("Input workbook not found: {}", workbook.display());
    }

    info!("Extracting from {}", workbook.display());
    let profiles = load_profiles(mapping)?;
    let sheets = read_workbook(workbook)?;

    Ok(extract_record(&sheets, &profiles, &config.layout))
}

fn report(result: &ExtractionResult, output: &Path) {
    println!(
        "{} Extracted {} fields from {} sheets to {}",
        style("✓").green(),
        result.record.field_count(),
        result.sheets_processed,
        output.display()
    );
    if !result.warnings.is_empty() {
        println!(
            "{} {} sheets skipped",
            style("⚠").yellow(),
            result.warnings.len()
        );
        for warning in &result.warnings {
            println!("  {}", style(warning).dim());
        }
    }
}

pub fn format_record(record: &SectionRecord, format: RecordFormat) -> anyhow::Result<String> {
    match format {
        RecordFormat::Ini => Ok(record.to_ini()),
        RecordFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        RecordFormat::Csv => format_csv(record),
    }
}

fn format_csv(record: &SectionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["section", "key", "values"])?;

    for section in record.sections() {
        for field in &section.fields {
            wtr.write_record([
                section.name.as_str(),
                field.key.as_str(),
                &field.values.join(VALUE_SEPARATOR),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

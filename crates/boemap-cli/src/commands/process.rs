//! Process command - extract a workbook and populate the template in one run.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use boemap_core::formats::save_record;

use super::extract::extract_stage;
use super::load_config;
use super::populate::{Targets, populate_stage};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input workbook (default: configured workbook path)
    workbook: Option<PathBuf>,

    /// Rule mapping file
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Where to keep the intermediate record
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Cell location file
    #[arg(short, long)]
    locations: Option<PathBuf>,

    /// Template workbook
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output workbook
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let workbook = args.workbook.unwrap_or_else(|| config.paths.workbook.clone());
    let mapping = args.mapping.unwrap_or_else(|| config.paths.rule_mapping.clone());
    let record_path = args.record.unwrap_or_else(|| config.paths.record.clone());
    let targets = Targets::resolve(&config, args.locations, args.template, args.output);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Extracting workbook...");
    pb.set_position(10);
    let result = extract_stage(&workbook, &mapping, &config)?;

    pb.set_message("Writing record...");
    pb.set_position(50);
    save_record(&result.record, &record_path)?;

    pb.set_message("Populating template...");
    pb.set_position(70);
    let report = match populate_stage(&result.record, &targets, &config) {
        Ok(report) => report,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e);
        }
    };

    pb.finish_with_message("Done");

    println!(
        "{} {} fields from {} sheets, {} cells written to {}",
        style("✓").green(),
        result.record.field_count(),
        result.sheets_processed,
        report.cells_written,
        targets.output.display()
    );
    if !result.warnings.is_empty() {
        println!("{} {} sheets skipped", style("⚠").yellow(), result.warnings.len());
    }
    println!("{}", style("Successful").bold());

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

//! Populate command - write a section record onto the output template.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use boemap_core::formats::{load_cell_locations, load_record};
use boemap_core::{
    BoemapConfig, PopulateReport, SectionRecord, TemplateDocument, populate_template,
    write_template,
};

use super::load_config;

/// Arguments for the populate command.
#[derive(Args)]
pub struct PopulateArgs {
    /// Record file (.ini, or .json as written by `extract -f json`)
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

pub fn run(args: PopulateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let record_path = args.record.unwrap_or_else(|| config.paths.record.clone());
    let record = read_record(&record_path)?;

    let targets = Targets::resolve(&config, args.locations, args.template, args.output);
    populate_stage(&record, &targets, &config)?;

    println!("{}", style("Successful").bold());
    Ok(())
}

/// Files the population stage reads and writes.
pub struct Targets {
    pub locations: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Targets {
    pub fn resolve(
        config: &BoemapConfig,
        locations: Option<PathBuf>,
        template: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            locations: locations.unwrap_or_else(|| config.paths.cell_locations.clone()),
            template: template.unwrap_or_else(|| config.paths.template.clone()),
            output: output.unwrap_or_else(|| config.paths.output.clone()),
        }
    }
}

fn read_record(path: &Path) -> anyhow::Result<SectionRecord> {
    if !path.exists() {
        anyhow::bail!("Record file not found: {}", path.display());
    }

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    } else {
        Ok(load_record(path)?)
    }
}

/// Populate the active sheet of the template from `record` and save the
/// result as a copy.
///
/// Nothing is written when the record holds no values.
pub fn populate_stage(
    record: &SectionRecord,
    targets: &Targets,
    config: &BoemapConfig,
) -> anyhow::Result<PopulateReport> {
    let locations = load_cell_locations(&targets.locations)?;
    if !targets.template.exists() {
        anyhow::bail!("Template not found: {}", targets.template.display());
    }
    let mut doc = TemplateDocument::default();

    let report = populate_template(record, &locations, &config.summary, &mut doc)?;

    if let Some(parent) = targets.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_template(&doc, &targets.template, &targets.output)?;

    info!(
        "Wrote {} cells and summary at row {} to {}",
        report.cells_written,
        report.summary.anchor_row,
        targets.output.display()
    );
    Ok(report)
}

use clap::Parser;
use labelgrid::{InMemoryLineageStore, PipelineBuilder, PipelineError, TemplateKind, parse_records};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

// Many small, short-lived allocations per page; mimalloc keeps them cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Lays out product records as printable label sheets.
#[derive(Parser, Debug)]
#[command(name = "labelgrid", version, about)]
struct Cli {
    /// Directory holding the template assets.
    #[arg(long, default_value = "templates")]
    templates: PathBuf,

    /// JSON array of flat product records.
    #[arg(long)]
    records: PathBuf,

    /// Label kind: a|b|c|d or horizontal|mini|double|inventory.
    #[arg(long)]
    kind: Option<TemplateKind>,

    /// JSON run settings; command-line options take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON object mapping strain names to lineages.
    #[arg(long)]
    lineage: Option<PathBuf>,

    /// Where to write the composed document (XML).
    #[arg(long, default_value = "labels.xml")]
    output: PathBuf,

    /// Where to write the run report (JSON).
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut builder = PipelineBuilder::new();
    if let Some(path) = &cli.config {
        log::info!("Loading settings from {}", path.display());
        builder = builder.with_config_file(path)?;
    }
    if let Some(kind) = cli.kind {
        builder = builder.with_kind(kind);
    }
    if let Some(path) = &cli.lineage {
        let entries: HashMap<String, String> = serde_json::from_str(&fs::read_to_string(path)?)?;
        log::info!("Loaded {} lineage entries from {}", entries.len(), path.display());
        builder = builder.with_lineage_lookup(Arc::new(entries.into_iter().collect::<InMemoryLineageStore>()));
    }
    let pipeline = builder.with_template_dir(&cli.templates).build()?;

    log::info!("Loading records from {}", cli.records.display());
    let mut source = parse_records(&fs::read_to_string(&cli.records)?)?;
    let output = pipeline.run_source(&mut source)?;

    fs::write(&cli.output, output.document.to_xml().map_err(labelgrid::RenderError::from)?)?;
    log::info!("Wrote {} page(s) to {}", output.report.pages, cli.output.display());

    if let Some(path) = &cli.report {
        fs::write(path, output.report.to_json()?)?;
        log::info!("Wrote run report to {}", path.display());
    }
    Ok(())
}

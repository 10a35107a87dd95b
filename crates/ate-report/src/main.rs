use std::path::PathBuf;

use anyhow::{Context, Result};
use ate_report_core::{
    aggregate::aggregate_means,
    dictionary::{LABELS, VARIABLE_NAMES},
    pipeline,
    selection::{effect_rows, select_target, EffectRow},
    table::{dedup_file, deduplicate, load_results},
    ReportConfig,
};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use polars::prelude::{AnyValue, DataFrame};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Average treatment effect report tooling", long_about = None)]
struct Cli {
    /// TOML file overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Results CSV to read (and deduplicate in place)
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    /// Directory the chart and table images are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deduplicate the input, aggregate it, and render both charts and the dictionary table
    Run,
    /// Remove duplicate rows from the input file in place
    Dedup,
    /// Print the aggregated table and per-target subsets without writing anything
    Summarize,
    /// Render only the variable dictionary table
    Dictionary,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Run => handle_run(&config),
        Command::Dedup => handle_dedup(&config),
        Command::Summarize => handle_summarize(&config),
        Command::Dictionary => handle_dictionary(&config),
    }
}

fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ReportConfig::default(),
    };

    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }

    Ok(config)
}

fn handle_run(config: &ReportConfig) -> Result<()> {
    print_dictionary_lengths(config);

    let report = pipeline::run_with(config, |dedup| {
        println!("Duplicates removed successfully!");
        println!(
            "  {} rows read, {} duplicates removed",
            dedup.rows_before,
            dedup.removed()
        );
    })
    .with_context(|| format!("failed to build report from {}", config.input.display()))?;

    print_columns(&report.averages);

    for target in &report.targets {
        println!("\n--- {} ---", target.target);
        println!("{}", frame_table(&target.subset)?);
        print_effects(&target.rows);
        println!("Saved chart to {}", target.image_path.display());
    }

    println!("\nSaved variable dictionary to {}", report.dictionary_path.display());
    Ok(())
}

fn handle_dedup(config: &ReportConfig) -> Result<()> {
    let (_, summary) = dedup_file(&config.input)
        .with_context(|| format!("failed to deduplicate {}", config.input.display()))?;

    println!("Duplicates removed successfully!");
    println!(
        "  {} rows read, {} duplicates removed, {} rows written",
        summary.rows_before,
        summary.removed(),
        summary.rows_after
    );
    Ok(())
}

fn handle_summarize(config: &ReportConfig) -> Result<()> {
    let raw = load_results(&config.input)
        .with_context(|| format!("failed to load {}", config.input.display()))?;
    let deduped = deduplicate(&raw)?;
    let averages = aggregate_means(&deduped).context("failed to aggregate results")?;

    info!(rows = raw.height(), unique_rows = deduped.height(), "Summarizing results");
    print_columns(&averages);

    for spec in &config.charts {
        let subset = select_target(&averages, &spec.target)?;
        println!("\n--- {} ---", spec.target);
        println!("{}", frame_table(&subset)?);
        print_effects(&effect_rows(&subset)?);
    }
    Ok(())
}

fn handle_dictionary(config: &ReportConfig) -> Result<()> {
    print_dictionary_lengths(config);

    let dictionary = config
        .variable_dictionary()
        .context("invalid variable dictionary")?;
    let path = pipeline::render_dictionary(&dictionary, config)?;

    println!("Saved variable dictionary to {}", path.display());
    Ok(())
}

fn print_dictionary_lengths(config: &ReportConfig) {
    let (codes, labels) = match &config.dictionary {
        Some(source) => (source.codes.len(), source.labels.len()),
        None => (VARIABLE_NAMES.len(), LABELS.len()),
    };
    println!("{codes}");
    println!("{labels}");
}

fn print_columns(df: &DataFrame) {
    let names: Vec<&str> = df.get_column_names().iter().map(|name| name.as_str()).collect();
    println!("Columns: [{}]", names.join(", "));
}

fn print_effects(rows: &[EffectRow]) {
    for row in rows {
        println!("{}: {}", row.label(), row.ate);
    }
}

fn frame_table(df: &DataFrame) -> Result<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(df.get_column_names().iter().map(|name| name.to_string()));

    for idx in 0..df.height() {
        let mut cells = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            cells.push(format_value(column.get(idx)?));
        }
        table.add_row(cells);
    }
    Ok(table)
}

fn format_value(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

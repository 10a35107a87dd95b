use std::path::PathBuf;

use polars::prelude::DataFrame;
use tracing::info;

use crate::aggregate::aggregate_means;
use crate::config::{ChartSpec, ReportConfig};
use crate::dictionary::VariableDictionary;
use crate::error::Result;
use crate::render::{self, dictionary_table, errorbar};
use crate::selection::{effect_rows, select_target, EffectRow};
use crate::table::{dedup_file, DedupSummary};

/// Everything produced for one target variable.
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub target: String,
    pub subset: DataFrame,
    pub rows: Vec<EffectRow>,
    pub image_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub dedup: DedupSummary,
    pub averages: DataFrame,
    pub targets: Vec<TargetReport>,
    pub dictionary: VariableDictionary,
    pub dictionary_path: PathBuf,
}

/// Selects one target from the aggregated table and writes its error-bar chart.
pub fn render_target(
    averages: &DataFrame,
    spec: &ChartSpec,
    config: &ReportConfig,
) -> Result<TargetReport> {
    let subset = select_target(averages, &spec.target)?;
    let rows = effect_rows(&subset)?;

    let chart = errorbar::ErrorBarChart::for_target(spec, &rows, config.error_bars);
    let svg = errorbar::render(&chart)?;
    let image_path = config.output_path(&spec.file_name);
    render::save(&svg, &image_path, config.dpi)?;

    info!(
        target = %spec.target,
        rows = rows.len(),
        path = %image_path.display(),
        "Wrote error-bar chart"
    );

    Ok(TargetReport {
        target: spec.target.clone(),
        subset,
        rows,
        image_path,
    })
}

pub fn render_dictionary(dictionary: &VariableDictionary, config: &ReportConfig) -> Result<PathBuf> {
    let svg = dictionary_table::render(dictionary);
    let path = config.output_path(&config.dictionary_file);
    render::save(&svg, &path, config.dpi)?;
    info!(entries = dictionary.len(), path = %path.display(), "Wrote variable dictionary table");
    Ok(path)
}

/// Runs every stage in order: dedup the input in place, aggregate, chart each configured
/// target, then render the variable dictionary.
pub fn run(config: &ReportConfig) -> Result<RunReport> {
    run_with(config, |_| {})
}

/// Same as [`run`], calling `on_dedup` once the input file has been rewritten and before any
/// later stage can fail.
pub fn run_with<F>(config: &ReportConfig, mut on_dedup: F) -> Result<RunReport>
where
    F: FnMut(&DedupSummary),
{
    // Validate the dictionary before touching the input file.
    let dictionary = config.variable_dictionary()?;

    let (deduped, dedup) = dedup_file(&config.input)?;
    on_dedup(&dedup);

    let averages = aggregate_means(&deduped)?;

    let targets = config
        .charts
        .iter()
        .map(|spec| render_target(&averages, spec, config))
        .collect::<Result<Vec<_>>>()?;

    let dictionary_path = render_dictionary(&dictionary, config)?;

    Ok(RunReport {
        dedup,
        averages,
        targets,
        dictionary,
        dictionary_path,
    })
}

//! Subcommand implementations.

use anyhow::{Context, Result};
use tracing::info_span;

use hxp_clean::{TableSource, clean, load_spec};
use hxp_ingest::ingest;
use hxp_model::IngestConfig;

use crate::cli::{CleanArgs, IngestArgs, RunArgs};
use hxp_cli::summary::{RunSummary, StageSummary};

pub fn run_ingest(args: &IngestArgs) -> Result<RunSummary> {
    let span = info_span!("ingest", selector = %args.selector);
    let _guard = span.enter();

    let config = IngestConfig::new(&args.source, &args.duplicate, &args.table, &args.selector);
    let artifacts = ingest(&config)
        .with_context(|| format!("ingest {}", args.source.display()))?;

    let mut summary = RunSummary::default();
    summary.push(StageSummary {
        stage: "ingest",
        rows: artifacts.frame.height(),
        columns: artifacts.frame.width(),
        artifact: Some(artifacts.table_path),
    });
    Ok(summary)
}

pub fn run_clean(args: &CleanArgs) -> Result<RunSummary> {
    let span = info_span!("clean");
    let _guard = span.enter();

    let ops = load_spec(&args.spec)
        .with_context(|| format!("load cleaning spec {}", args.spec.display()))?;
    let frame = clean(
        TableSource::Path(args.input.clone()),
        &ops,
        Some(&args.output),
    )
    .with_context(|| format!("clean {}", args.input.display()))?;

    let mut summary = RunSummary::default();
    summary.push(StageSummary {
        stage: "clean",
        rows: frame.height(),
        columns: frame.width(),
        artifact: Some(args.output.clone()),
    });
    Ok(summary)
}

/// Ingest then clean in one process, handing the in-memory frame
/// straight to the cleaner instead of re-reading the table file.
pub fn run_pipeline(args: &RunArgs) -> Result<RunSummary> {
    let ops = load_spec(&args.spec)
        .with_context(|| format!("load cleaning spec {}", args.spec.display()))?;

    let mut summary = RunSummary::default();

    let artifacts = {
        let span = info_span!("ingest", selector = %args.selector);
        let _guard = span.enter();
        let config =
            IngestConfig::new(&args.source, &args.duplicate, &args.table, &args.selector);
        ingest(&config).with_context(|| format!("ingest {}", args.source.display()))?
    };
    summary.push(StageSummary {
        stage: "ingest",
        rows: artifacts.frame.height(),
        columns: artifacts.frame.width(),
        artifact: Some(artifacts.table_path.clone()),
    });

    let frame = {
        let span = info_span!("clean");
        let _guard = span.enter();
        clean(
            TableSource::Frame(artifacts.frame),
            &ops,
            Some(&args.output),
        )
        .with_context(|| format!("clean {}", artifacts.table_path.display()))?
    };
    summary.push(StageSummary {
        stage: "clean",
        rows: frame.height(),
        columns: frame.width(),
        artifact: Some(args.output.clone()),
    });

    Ok(summary)
}

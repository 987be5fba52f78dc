//! Assess many observation files at once

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tokio::task::JoinSet;

use super::assess::read_input;
use super::{evaluate, KindArg};
use crate::output::{format_report, summary_table, to_json, OutputFormat, Report};
use crate::AppContext;
use apiary_core::{EntityKind, Summary};

#[derive(Args)]
pub struct BatchArgs {
    /// Kind of observation in every file
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Observation files (JSON)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Report failing files and carry on instead of aborting
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Serialize)]
struct FileResult {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    assessment: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct BatchOutput {
    results: Vec<FileResult>,
    summary: Summary,
}

type Outcome = anyhow::Result<(Option<Report>, Summary)>;

async fn assess_file(kind: EntityKind, path: PathBuf) -> Outcome {
    let raw = read_input(&path).await?;
    let mut summary = Summary::new();
    let report = evaluate(kind, &raw, &mut summary)?;
    Ok((report, summary))
}

pub async fn run(args: &BatchArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let kind: EntityKind = args.kind.into();
    tracing::debug!("Assessing {} {} observations", args.files.len(), kind);

    // Observations are independent, so each one runs on its own task.
    let mut tasks = JoinSet::new();
    for (index, path) in args.files.iter().cloned().enumerate() {
        tasks.spawn(async move { (index, assess_file(kind, path).await) });
    }

    let mut outcomes: Vec<Option<Outcome>> = args.files.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined?;
        outcomes[index] = Some(outcome);
    }

    let mut summary = Summary::new();
    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = 0usize;
    for (path, outcome) in args.files.iter().zip(outcomes) {
        let file = path.display().to_string();
        match outcome {
            Some(Ok((report, partial))) => {
                summary.merge(&partial);
                results.push(FileResult {
                    file,
                    assessment: report,
                    error: None,
                });
            }
            Some(Err(e)) => {
                if !args.keep_going {
                    return Err(e.context(format!("Failed to assess {}", file)));
                }
                tracing::warn!("Skipping {}: {:#}", file, e);
                failures += 1;
                results.push(FileResult {
                    file,
                    assessment: None,
                    error: Some(format!("{:#}", e)),
                });
            }
            None => anyhow::bail!("Lost result for {}", file),
        }
    }

    tracing::info!(
        "Assessed {} files, {} need attention, {} failed",
        summary.total,
        summary.needs_attention,
        failures
    );

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&BatchOutput { results, summary })),
        OutputFormat::Table => {
            for result in &results {
                println!("== {}", result.file);
                match &result.error {
                    Some(e) => println!("Error: {}", e),
                    None => println!("{}", format_report(result.assessment.as_ref(), ctx.format)),
                }
                println!();
            }
            println!("{}", summary_table(&summary));
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files could not be assessed", failures, args.files.len());
    }
    Ok(())
}

mod context;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use crate::context::{AlertLevel, ReviewContext, load_tableau};
use crate::error::HeatgridError;
use crate::input::{load_rounds, load_tableau_payload};
use crate::model::SortOrder;
use crate::pipeline::stage1_validate::{RoundFilter, ValidationMode, select_rounds};
use crate::pipeline::stage3_classify::DisplayMode;
use crate::pipeline::stage5_report::{ReportFormat, write_reports};
use crate::pipeline::{RoundParams, run_round};
use crate::report::SummaryData;

#[derive(Debug, Parser)]
#[command(name = "review-heatgrid", version)]
#[command(about = "Aggregate peer review scores and classify them into heat-grid color classes")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate a rounds fixture of rubric rows
    Grid(GridArgs),
    /// Group a review tableau payload by round, then aggregate each round
    Tableau(TableauArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Input JSON file, optionally gzip-compressed (.gz)
    #[arg(long)]
    input: PathBuf,

    /// Output directory for reports
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = SortOrder::None)]
    sort: SortOrder,

    /// Fail on empty, ragged or out-of-range rows instead of tolerating them
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum, default_value_t = ReportFormat::All)]
    format: ReportFormat,

    #[arg(long, value_enum, default_value_t = DisplayMode::Heatgrid)]
    display: DisplayMode,
}

#[derive(Debug, Args)]
struct GridArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Only process this round (1-based)
    #[arg(long, conflicts_with = "all_rounds")]
    round: Option<usize>,

    #[arg(long)]
    all_rounds: bool,
}

#[derive(Debug, Args)]
struct TableauArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long)]
    assignment_id: Option<String>,

    #[arg(long)]
    participant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RunKind {
    Grid {
        filter: RoundFilter,
    },
    Tableau {
        assignment_id: Option<String>,
        participant_id: Option<String>,
    },
}

#[derive(Debug, Clone)]
struct RunConfig {
    kind: RunKind,
    input: PathBuf,
    out_dir: PathBuf,
    format: ReportFormat,
    params: RoundParams,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = build_config(cli.command);
    if let Err(err) = run(&config) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn build_config(command: Command) -> RunConfig {
    let (kind, common) = match command {
        Command::Grid(args) => {
            let filter = match args.round {
                Some(n) if !args.all_rounds => RoundFilter::Only(n),
                _ => RoundFilter::All,
            };
            (RunKind::Grid { filter }, args.common)
        }
        Command::Tableau(args) => (
            RunKind::Tableau {
                assignment_id: args.assignment_id,
                participant_id: args.participant_id,
            },
            args.common,
        ),
    };

    RunConfig {
        kind,
        input: common.input,
        out_dir: common.out,
        format: common.format,
        params: RoundParams {
            sort_order: common.sort,
            validation: if common.strict {
                ValidationMode::Strict
            } else {
                ValidationMode::Permissive
            },
            display: common.display,
        },
    }
}

fn run(config: &RunConfig) -> Result<(), HeatgridError> {
    let mut ctx = match &config.kind {
        RunKind::Grid { .. } => ReviewContext::default(),
        RunKind::Tableau {
            assignment_id,
            participant_id,
        } => ReviewContext::new(assignment_id.clone(), participant_id.clone()),
    };

    let rounds = match &config.kind {
        RunKind::Grid { filter } => {
            let rounds = load_rounds(&config.input)?;
            let mut reports = Vec::new();
            for (number, round) in select_rounds(&rounds, *filter)? {
                reports.push(run_round(number, None, round, &config.params)?);
            }
            reports
        }
        RunKind::Tableau { .. } => {
            ctx.require_params()?;
            let payload = load_tableau_payload(&config.input)?;
            let groups = load_tableau(&mut ctx, &payload).into_result()?;
            let mut reports = Vec::with_capacity(groups.len());
            for group in &groups {
                let round = group.to_round();
                let name = (!group.name.is_empty()).then(|| group.name.clone());
                reports.push(run_round(
                    group.round_number as usize,
                    name,
                    &round,
                    &config.params,
                )?);
            }
            reports
        }
    };

    for round in &rounds {
        if round.validation_issues > 0 {
            ctx.alert(
                AlertLevel::Warning,
                format!(
                    "round {} has {} malformed row(s)",
                    round.round_number, round.validation_issues
                ),
            );
        }
    }

    info!(
        rounds = rounds.len(),
        sort = config.params.sort_order.as_str(),
        "aggregated review rounds"
    );

    let summary = SummaryData {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input: config.input.display().to_string(),
        sort_order: config.params.sort_order,
        validation: config.params.validation,
        display: config.params.display,
        rounds,
        alerts: ctx.alerts.iter().map(|a| a.to_string()).collect(),
    };

    write_reports(&summary, &config.out_dir, config.format)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

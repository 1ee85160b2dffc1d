use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::SortOrder;
use crate::pipeline::stage1_validate::ValidationMode;
use crate::pipeline::stage3_classify::{DisplayMode, GridRow};
use crate::report::{RoundReport, SummaryData};

#[derive(Serialize)]
struct JsonSummary<'a> {
    tool: ToolMeta<'a>,
    config: ConfigEcho<'a>,
    rounds: Vec<JsonRound<'a>>,
    alerts: &'a [String],
}

#[derive(Serialize)]
struct ToolMeta<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct ConfigEcho<'a> {
    input: &'a str,
    sort: SortOrder,
    validation: ValidationMode,
    display: DisplayMode,
}

#[derive(Serialize)]
struct JsonRound<'a> {
    round: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    average_peer_review_score: &'a str,
    column_averages: &'a [f64],
    n_rows: usize,
    n_reviewers: usize,
    validation_issues: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    weakest_item: Option<&'a str>,
    color_classes: BTreeMap<&'static str, usize>,
    rows: &'a [GridRow],
}

fn json_round(round: &RoundReport) -> JsonRound<'_> {
    let color_classes = round
        .grid
        .class_histogram()
        .into_iter()
        .map(|(class, count)| (class.as_str(), count))
        .collect();
    JsonRound {
        round: round.round_number,
        name: round.name.as_deref(),
        average_peer_review_score: &round.average_peer_review_score,
        column_averages: &round.column_averages,
        n_rows: round.grid.rows.len(),
        n_reviewers: round.grid.reviewer_count(),
        validation_issues: round.validation_issues,
        weakest_item: round.grid.weakest_row().map(|r| r.item_number.as_str()),
        color_classes,
        rows: &round.grid.rows,
    }
}

pub fn render_summary_json(data: &SummaryData) -> Result<String, serde_json::Error> {
    let summary = JsonSummary {
        tool: ToolMeta {
            name: &data.tool_name,
            version: &data.tool_version,
        },
        config: ConfigEcho {
            input: &data.input,
            sort: data.sort_order,
            validation: data.validation,
            display: data.display,
        },
        rounds: data.rounds.iter().map(json_round).collect(),
        alerts: &data.alerts,
    };
    let mut out = serde_json::to_string_pretty(&summary)?;
    out.push('\n');
    Ok(out)
}

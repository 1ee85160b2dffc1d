pub mod json;
pub mod text;

use crate::model::SortOrder;
use crate::pipeline::stage1_validate::ValidationMode;
use crate::pipeline::stage3_classify::{DisplayMode, HeatGrid};

#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round_number: usize,
    pub name: Option<String>,
    pub average_peer_review_score: String,
    pub column_averages: Vec<f64>,
    pub grid: HeatGrid,
    pub validation_issues: usize,
}

#[derive(Debug, Clone)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub input: String,
    pub sort_order: SortOrder,
    pub validation: ValidationMode,
    pub display: DisplayMode,
    pub rounds: Vec<RoundReport>,
    pub alerts: Vec<String>,
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

/// Whole numbers print without decimals, anything else with two.
pub fn format_score(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{}", v as i64)
    } else {
        format_f64_2(v)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;

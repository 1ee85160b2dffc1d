pub mod stage1_validate;
pub mod stage2_averages;
pub mod stage3_classify;
pub mod stage4_group;
pub mod stage5_report;

use crate::error::ValidationError;
use crate::model::{Round, SortOrder};
use crate::report::RoundReport;
use stage1_validate::{ValidationMode, validate_round};
use stage2_averages::calculate_averages;
use stage3_classify::{DisplayMode, build_heatgrid};

#[derive(Debug, Clone, Copy, Default)]
pub struct RoundParams {
    pub sort_order: SortOrder,
    pub validation: ValidationMode,
    pub display: DisplayMode,
}

/// Validate, aggregate and classify one round.
pub fn run_round(
    round_number: usize,
    name: Option<String>,
    round: &Round,
    params: &RoundParams,
) -> Result<RoundReport, ValidationError> {
    let issues = validate_round(round_number, round, params.validation)?;
    let averages = calculate_averages(round, params.sort_order);
    let grid = build_heatgrid(&averages.sorted_data, params.display);

    Ok(RoundReport {
        round_number,
        name,
        average_peer_review_score: averages.average_peer_review_score,
        column_averages: averages.column_averages,
        grid,
        validation_issues: issues.len(),
    })
}

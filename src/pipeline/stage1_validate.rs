use serde::Serialize;
use tracing::warn;

use crate::error::ValidationError;
use crate::model::Round;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Accepts malformed rows; empty rows average to 0 and short rows count 0
    /// for the missing reviewer columns.
    #[default]
    Permissive,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundFilter {
    #[default]
    All,
    /// 1-based round number.
    Only(usize),
}

/// Returns the selected rounds paired with their 1-based round numbers.
pub fn select_rounds(
    rounds: &[Round],
    filter: RoundFilter,
) -> Result<Vec<(usize, &Round)>, ValidationError> {
    match filter {
        RoundFilter::All => Ok(rounds.iter().enumerate().map(|(i, r)| (i + 1, r)).collect()),
        RoundFilter::Only(n) => {
            if n == 0 || n > rounds.len() {
                return Err(ValidationError::RoundOutOfRange {
                    requested: n,
                    available: rounds.len(),
                });
            }
            Ok(vec![(n, &rounds[n - 1])])
        }
    }
}

/// Checks one round against the aggregation contract. In permissive mode the
/// problems are logged and `Ok` is returned; the issues found are still
/// reported back so callers can count them.
pub fn validate_round(
    round_number: usize,
    round: &Round,
    mode: ValidationMode,
) -> Result<Vec<ValidationError>, ValidationError> {
    let mut issues = Vec::new();
    let expected = round.first().map(|r| r.reviews.len()).unwrap_or(0);

    for row in round {
        let item = row.item.item_number.clone();
        if !(row.item.max_score > 0.0) {
            issues.push(ValidationError::NonPositiveMax {
                round: round_number,
                item: item.clone(),
            });
        }
        if row.answered_scores().next().is_none() {
            issues.push(ValidationError::EmptyReviews {
                round: round_number,
                item: item.clone(),
            });
        } else if row.reviews.len() != expected {
            issues.push(ValidationError::RaggedRow {
                round: round_number,
                item: item.clone(),
                expected,
                found: row.reviews.len(),
            });
        }
        for score in row.answered_scores() {
            if !(score >= 0.0 && score <= row.item.max_score) {
                issues.push(ValidationError::ScoreOutOfRange {
                    round: round_number,
                    item: item.clone(),
                    score,
                    max: row.item.max_score,
                });
            }
        }
    }

    match mode {
        ValidationMode::Strict => {
            if let Some(first) = issues.into_iter().next() {
                return Err(first);
            }
            Ok(Vec::new())
        }
        ValidationMode::Permissive => {
            for issue in &issues {
                warn!("{issue}");
            }
            Ok(issues)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;

use serde::Serialize;

use crate::model::{ReviewRow, SortOrder};

/// Column averages are shown on a fixed five point scale.
pub const COLUMN_SCALE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Averages {
    pub average_peer_review_score: String,
    pub column_averages: Vec<f64>,
    pub sorted_data: Vec<ReviewRow>,
}

/// Mean over answered slots only; a row with no answered slot averages 0.
pub fn row_average(row: &ReviewRow) -> f64 {
    let (sum, count) = row
        .answered_scores()
        .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

pub fn calculate_averages(rows: &[ReviewRow], sort_order: SortOrder) -> Averages {
    let mut data = rows.to_vec();
    for row in &mut data {
        row.row_avg = row_average(row);
    }

    let total_avg: f64 = data.iter().map(|r| r.row_avg).sum();
    let total_max: f64 = data.iter().map(|r| r.item.max_score).sum();

    let average_peer_review_score = format_percentage(total_avg, total_max);
    let column_averages = column_averages(&data, total_max);

    match sort_order {
        SortOrder::Asc => data.sort_by(|a, b| a.row_avg.total_cmp(&b.row_avg)),
        SortOrder::Desc => data.sort_by(|a, b| b.row_avg.total_cmp(&a.row_avg)),
        SortOrder::None => {}
    }

    Averages {
        average_peer_review_score,
        column_averages,
        sorted_data: data,
    }
}

fn format_percentage(achieved: f64, possible: f64) -> String {
    let pct = (achieved / possible) * 100.0;
    if pct.is_finite() && pct > 0.0 {
        format!("{:.2}", pct)
    } else {
        "0.00".to_string()
    }
}

fn column_averages(rows: &[ReviewRow], total_max: f64) -> Vec<f64> {
    let n_columns = rows.first().map(|r| r.reviews.len()).unwrap_or(0);
    let mut sums = vec![0.0f64; n_columns];
    for row in rows {
        for (col, sum) in sums.iter_mut().enumerate() {
            if let Some(score) = row.reviews.get(col).and_then(|r| r.score) {
                *sum += score;
            }
        }
    }
    if !(total_max > 0.0) {
        return vec![0.0; n_columns];
    }
    sums.into_iter()
        .map(|s| (s / total_max) * COLUMN_SCALE)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_averages.rs"]
mod tests;

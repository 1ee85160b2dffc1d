use serde::Serialize;

use crate::model::color::class_order;
use crate::model::{ColorClass, ReviewRow, get_color_class};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Scores and color classes only.
    #[default]
    Heatgrid,
    /// Heat grid plus the reviewer comments behind underlined cells.
    Tableau,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    /// `None` for an unanswered slot, which has no color class either.
    pub score: Option<f64>,
    pub color: Option<ColorClass>,
    pub checkmark: bool,
    pub underlined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub item_number: String,
    pub item_text: String,
    pub max_score: f64,
    pub row_avg: f64,
    pub row_color: ColorClass,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatGrid {
    pub display: DisplayMode,
    pub rows: Vec<GridRow>,
}

impl HeatGrid {
    pub fn reviewer_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Row with the lowest average class; ties keep the first row.
    pub fn weakest_row(&self) -> Option<&GridRow> {
        self.rows
            .iter()
            .filter(|r| r.row_color != ColorClass::Cf)
            .min_by_key(|r| r.row_color.rank())
    }

    /// Count of cells per color class, in `class_order`.
    pub fn class_histogram(&self) -> Vec<(ColorClass, usize)> {
        class_order()
            .iter()
            .map(|&class| {
                let count = self
                    .rows
                    .iter()
                    .flat_map(|r| r.cells.iter())
                    .filter(|c| c.color == Some(class))
                    .count();
                (class, count)
            })
            .collect()
    }
}

/// Expects rows whose `row_avg` was filled by `calculate_averages`.
pub fn build_heatgrid(rows: &[ReviewRow], display: DisplayMode) -> HeatGrid {
    let rows = rows
        .iter()
        .map(|row| {
            let max = row.item.max_score;
            let checkmark = row.item.is_binary();
            let cells = row
                .reviews
                .iter()
                .map(|review| GridCell {
                    score: review.score,
                    color: review.score.map(|s| get_color_class(s, max)),
                    checkmark,
                    underlined: review.is_underlined(),
                    comment: match display {
                        DisplayMode::Tableau if review.is_underlined() => review.comment.clone(),
                        _ => None,
                    },
                })
                .collect();
            GridRow {
                item_number: row.item.item_number.clone(),
                item_text: row.item.item_text.clone(),
                max_score: max,
                row_avg: row.row_avg,
                row_color: get_color_class(row.row_avg, max),
                cells,
            }
        })
        .collect();

    HeatGrid { display, rows }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_classify.rs"]
mod tests;

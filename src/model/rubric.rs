use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricItem {
    pub item_number: String,
    pub item_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub max_score: f64,
}

impl RubricItem {
    /// Checklist items score 0 or 1 and render as a checkmark.
    pub fn is_binary(&self) -> bool {
        self.max_score == 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `None` marks a reviewer slot that was left unanswered; the slot keeps
    /// its column position.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
impl Review {
    pub fn new(score: f64) -> Self {
        Self {
            name: None,
            score: Some(score),
            comment: None,
        }
    }

    pub fn with_comment(score: f64, comment: &str) -> Self {
        Self {
            name: None,
            score: Some(score),
            comment: Some(comment.to_string()),
        }
    }

    pub fn unanswered() -> Self {
        Self {
            name: None,
            score: None,
            comment: None,
        }
    }
}

impl Review {
    pub fn is_underlined(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRow {
    #[serde(flatten)]
    pub item: RubricItem,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Always recomputed by the aggregation pass; input values are discarded.
    #[serde(rename = "RowAvg", default)]
    pub row_avg: f64,
}

impl ReviewRow {
    pub fn new(item: RubricItem, reviews: Vec<Review>) -> Self {
        Self {
            item,
            reviews,
            row_avg: 0.0,
        }
    }

    pub fn answered_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.reviews.iter().filter_map(|r| r.score)
    }
}

pub type Round = Vec<ReviewRow>;

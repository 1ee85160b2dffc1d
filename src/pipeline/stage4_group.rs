use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::model::payload::{Answers, ItemResponses, RubricInfo, TableauPayload};
use crate::model::{Review, ReviewRow, Round, RubricItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedItem {
    pub item_id: String,
    pub description: String,
    pub question_type: Option<String>,
    pub max_score: f64,
    pub min_score: f64,
    /// Answer array lengths as received, before padding to the reviewer count.
    #[serde(skip)]
    pub n_values: usize,
    #[serde(skip)]
    pub n_comments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAnswer {
    pub item_id: String,
    pub value: Option<f64>,
    pub comment: Option<String>,
}

/// All answers one reviewer gave in a round, in rubric item order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerResponses {
    pub reviewer: usize,
    pub responses: Vec<ItemAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundGroup {
    pub round_id: String,
    pub round_number: u32,
    pub name: String,
    pub rubric: Vec<GroupedItem>,
    pub reviews: Vec<ReviewerResponses>,
}

impl RoundGroup {
    /// Item-major rows for the aggregation pass. Every row has one slot per
    /// reviewer, so column `k` is always reviewer `k`; unanswered slots carry
    /// no score.
    pub fn to_round(&self) -> Round {
        self.rubric
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let reviews = self
                    .reviews
                    .iter()
                    .map(|reviewer| {
                        let answer = reviewer.responses.get(idx);
                        Review {
                            name: Some(format!("Review {}", reviewer.reviewer + 1)),
                            score: answer.and_then(|a| a.value),
                            comment: answer.and_then(|a| a.comment.clone()),
                        }
                    })
                    .collect();
                ReviewRow::new(
                    RubricItem {
                        item_number: item.item_id.clone(),
                        item_text: item.description.clone(),
                        item_type: item.question_type.clone(),
                        max_score: item.max_score,
                    },
                    reviews,
                )
            })
            .collect()
    }
}

/// Numeric ids sort numerically, anything else after them lexically.
fn compare_item_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

pub fn group_rounds(payload: &TableauPayload) -> Vec<RoundGroup> {
    let mut rubrics: Vec<&RubricInfo> = payload.rubrics.iter().collect();
    rubrics.sort_by_key(|r| r.round_number);

    let mut groups = Vec::new();
    for rubric in rubrics {
        let Some(items) = payload.responses.get(&rubric.round_id) else {
            debug!(round_id = %rubric.round_id, "rubric has no responses");
            continue;
        };
        groups.push(group_round(rubric, items));
    }

    for round_id in payload.responses.keys() {
        if !payload.rubrics.iter().any(|r| &r.round_id == round_id) {
            debug!(round_id = %round_id, "dropping round without rubric");
        }
    }

    groups
}

fn group_round(rubric: &RubricInfo, items: &BTreeMap<String, ItemResponses>) -> RoundGroup {
    let mut ordered: Vec<(&String, &ItemResponses)> = items.iter().collect();
    ordered.sort_by(|a, b| compare_item_ids(a.0, b.0));

    let n_reviewers = ordered
        .iter()
        .map(|(_, r)| r.answers.values.len().max(r.answers.comments.len()))
        .max()
        .unwrap_or(0);

    let rubric_items = ordered
        .iter()
        .map(|(id, r)| GroupedItem {
            item_id: (*id).clone(),
            description: r.description.clone(),
            question_type: r.question_type.clone(),
            max_score: rubric.max_answer_value,
            min_score: rubric.min_answer_value,
            n_values: r.answers.values.len(),
            n_comments: r.answers.comments.len(),
        })
        .collect();

    let reviews = (0..n_reviewers)
        .map(|k| ReviewerResponses {
            reviewer: k,
            responses: ordered
                .iter()
                .map(|(id, r)| ItemAnswer {
                    item_id: (*id).clone(),
                    value: r.answers.values.get(k).copied().flatten(),
                    comment: r.answers.comments.get(k).cloned().flatten(),
                })
                .collect(),
        })
        .collect();

    RoundGroup {
        round_id: rubric.round_id.clone(),
        round_number: rubric.round_number,
        name: rubric.name.clone(),
        rubric: rubric_items,
        reviews,
    }
}

/// Transposes a group back to item-major answers, cut back to the array
/// lengths each item arrived with.
pub fn ungroup_round(group: &RoundGroup) -> BTreeMap<String, ItemResponses> {
    let mut out = BTreeMap::new();
    for (idx, item) in group.rubric.iter().enumerate() {
        let mut values = Vec::with_capacity(group.reviews.len());
        let mut comments = Vec::with_capacity(group.reviews.len());
        for reviewer in &group.reviews {
            let answer = reviewer.responses.get(idx);
            values.push(answer.and_then(|a| a.value));
            comments.push(answer.and_then(|a| a.comment.clone()));
        }
        values.truncate(item.n_values);
        comments.truncate(item.n_comments);
        out.insert(
            item.item_id.clone(),
            ItemResponses {
                description: item.description.clone(),
                question_type: item.question_type.clone(),
                answers: Answers { values, comments },
            },
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_group.rs"]
mod tests;

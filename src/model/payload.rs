use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Review tableau response as served by the reviews endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableauPayload {
    #[serde(default)]
    pub rubrics: Vec<RubricInfo>,
    /// round id -> item id -> responses
    #[serde(default)]
    pub responses: BTreeMap<String, BTreeMap<String, ItemResponses>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricInfo {
    pub round_id: String,
    pub round_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub min_answer_value: f64,
    pub max_answer_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponses {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub answers: Answers,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    #[serde(default)]
    pub values: Vec<Option<f64>>,
    #[serde(default)]
    pub comments: Vec<Option<String>>,
}

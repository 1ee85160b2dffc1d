use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing input: {0}")]
    Missing(String),
    #[error("invalid input: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("round {round}, item {item}: no reviews")]
    EmptyReviews { round: usize, item: String },
    #[error("round {round}, item {item}: expected {expected} reviews, found {found}")]
    RaggedRow {
        round: usize,
        item: String,
        expected: usize,
        found: usize,
    },
    #[error("round {round}, item {item}: score {score} outside [0, {max}]")]
    ScoreOutOfRange {
        round: usize,
        item: String,
        score: f64,
        max: f64,
    },
    #[error("round {round}, item {item}: max score must be positive")]
    NonPositiveMax { round: usize, item: String },
    #[error("round {requested} requested but only {available} available")]
    RoundOutOfRange { requested: usize, available: usize },
}

#[derive(Debug, Error)]
pub enum HeatgridError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("view has not finished loading")]
    NotReady,
    #[error("report error: {0}")]
    Report(#[from] std::io::Error),
    #[error("report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

use super::*;
use crate::model::payload::{Answers, ItemResponses, RubricInfo};

fn payload() -> TableauPayload {
    let mut items = std::collections::BTreeMap::new();
    items.insert(
        "1".to_string(),
        ItemResponses {
            description: "Q1".to_string(),
            question_type: None,
            answers: Answers {
                values: vec![Some(3.0), Some(5.0)],
                comments: vec![],
            },
        },
    );
    let mut responses = std::collections::BTreeMap::new();
    responses.insert("r1".to_string(), items);
    TableauPayload {
        rubrics: vec![RubricInfo {
            round_id: "r1".to_string(),
            round_number: 1,
            name: "Round one".to_string(),
            min_answer_value: 0.0,
            max_answer_value: 5.0,
        }],
        responses,
    }
}

#[test]
fn test_missing_assignment_enters_error() {
    let mut ctx = ReviewContext::new(None, Some("42".to_string()));
    let state = load_tableau(&mut ctx, &payload());
    assert!(matches!(
        state,
        ViewState::Error(HeatgridError::MissingParameter("assignment_id"))
    ));
    assert_eq!(ctx.alerts.len(), 1);
    assert_eq!(ctx.alerts[0].level, AlertLevel::Error);
}

#[test]
fn test_blank_participant_enters_error() {
    let mut ctx = ReviewContext::new(Some("7".to_string()), Some("  ".to_string()));
    let state = load_tableau(&mut ctx, &payload());
    assert!(matches!(
        state,
        ViewState::Error(HeatgridError::MissingParameter("participant_id"))
    ));
}

#[test]
fn test_present_params_succeed() {
    let mut ctx = ReviewContext::new(Some("7".to_string()), Some("42".to_string()));
    let state = load_tableau(&mut ctx, &payload());
    let groups = state.into_result().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].reviews.len(), 2);
    assert_eq!(ctx.alerts[0].level, AlertLevel::Info);
}

#[test]
fn test_loading_is_not_a_result() {
    let state: ViewState<()> = ViewState::Loading;
    assert!(matches!(state.into_result(), Err(HeatgridError::NotReady)));
}

#[test]
fn test_alert_display() {
    let alert = Alert {
        level: AlertLevel::Warning,
        message: "round 2 has no rubric".to_string(),
    };
    assert_eq!(alert.to_string(), "warning: round 2 has no rubric");
}

#[test]
fn test_require_params_returns_ids() {
    let ctx = ReviewContext::new(Some("a1".to_string()), Some("p9".to_string()));
    let (a, p) = ctx.require_params().unwrap();
    assert_eq!((a, p), ("a1", "p9"));
}

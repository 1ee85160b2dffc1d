use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::{Review, ReviewRow, RubricItem, SortOrder};
use crate::pipeline::stage1_validate::ValidationMode;
use crate::pipeline::stage3_classify::DisplayMode;
use crate::pipeline::{RoundParams, run_round};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("review_heatgrid_report_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn build_summary() -> SummaryData {
    let round = vec![
        ReviewRow::new(
            RubricItem {
                item_number: "1".to_string(),
                item_text: "Design\tquality".to_string(),
                item_type: None,
                max_score: 5.0,
            },
            vec![Review::new(4.0), Review::new(1.0), Review::new(5.0)],
        ),
        ReviewRow::new(
            RubricItem {
                item_number: "2".to_string(),
                item_text: "Documentation".to_string(),
                item_type: None,
                max_score: 5.0,
            },
            vec![Review::new(2.0), Review::new(2.0)],
        ),
    ];
    let params = RoundParams {
        sort_order: SortOrder::Desc,
        validation: ValidationMode::Permissive,
        display: DisplayMode::Heatgrid,
    };
    let report = run_round(1, None, &round, &params).unwrap();
    SummaryData {
        tool_name: "review-heatgrid".to_string(),
        tool_version: "0.1.0".to_string(),
        input: "fixture.json".to_string(),
        sort_order: params.sort_order,
        validation: params.validation,
        display: params.display,
        rounds: vec![report],
        alerts: Vec::new(),
    }
}

#[test]
fn test_write_all_reports() {
    let dir = make_temp_dir();
    write_reports(&build_summary(), &dir, ReportFormat::All).unwrap();
    assert!(dir.join("heatgrid.tsv").exists());
    assert!(dir.join("summary.json").exists());
    assert!(dir.join("report.txt").exists());
}

#[test]
fn test_single_format() {
    let dir = make_temp_dir();
    write_reports(&build_summary(), &dir, ReportFormat::Json).unwrap();
    assert!(dir.join("summary.json").exists());
    assert!(!dir.join("heatgrid.tsv").exists());
    assert!(!dir.join("report.txt").exists());
}

#[test]
fn test_heatgrid_tsv_rows() {
    let dir = make_temp_dir();
    write_reports(&build_summary(), &dir, ReportFormat::Tsv).unwrap();
    let tsv = std::fs::read_to_string(dir.join("heatgrid.tsv")).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(
        lines[0],
        "round\titem_number\titem_text\tmax_score\trow_avg\trow_class\treview_1\treview_2\treview_3"
    );
    // sorted descending by row average: 10/3 before 2
    assert_eq!(
        lines[1],
        "1\t1\tDesign quality\t5\t3.33\tc4\t4:c5\t1:c2\t5:c5"
    );
    assert_eq!(lines[2], "1\t2\tDocumentation\t5\t2.00\tc3\t2:c3\t2:c3\t");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_validation_issue_count_carried() {
    let summary = build_summary();
    assert_eq!(summary.rounds[0].validation_issues, 1);
}

#[test]
fn test_unanswered_cell_keeps_tsv_position() {
    let reviews = vec![Review::new(3.0), Review::unanswered(), Review::new(5.0)];
    let round = vec![ReviewRow::new(
        RubricItem {
            item_number: "1".to_string(),
            item_text: "Design".to_string(),
            item_type: None,
            max_score: 5.0,
        },
        reviews,
    )];
    let report = run_round(1, None, &round, &RoundParams::default()).unwrap();
    let mut summary = build_summary();
    summary.rounds = vec![report];

    let dir = make_temp_dir();
    write_reports(&summary, &dir, ReportFormat::Tsv).unwrap();
    let tsv = std::fs::read_to_string(dir.join("heatgrid.tsv")).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines[1], "1\t1\tDesign\t5\t4.00\tc5\t3:c4\t\t5:c5");
}

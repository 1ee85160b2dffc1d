use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("review_heatgrid_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const ROUNDS: &str = r#"{
  "rounds": [
    [
      { "itemNumber": "1", "itemText": "Clear structure", "itemType": "Scale", "maxScore": 5,
        "reviews": [ { "name": "Review 1", "score": 4 }, { "score": 2, "comment": "missing intro" } ],
        "RowAvg": 0 },
      { "itemNumber": "2", "itemText": "Has references", "maxScore": 1,
        "reviews": [ { "score": 1 }, { "score": 0 } ] }
    ]
  ]
}"#;

#[test]
fn test_parse_wrapped_rounds() {
    let rounds = parse_rounds(ROUNDS.as_bytes()).unwrap();
    assert_eq!(rounds.len(), 1);
    let row = &rounds[0][0];
    assert_eq!(row.item.item_number, "1");
    assert_eq!(row.item.item_type.as_deref(), Some("Scale"));
    assert_eq!(row.item.max_score, 5.0);
    assert_eq!(row.reviews[0].name.as_deref(), Some("Review 1"));
    assert_eq!(row.reviews[1].comment.as_deref(), Some("missing intro"));
    assert!(rounds[0][1].item.is_binary());
    assert_eq!(rounds[0][1].item.item_type, None);
}

#[test]
fn test_parse_bare_rounds() {
    let bare = r#"[[{ "itemNumber": "1", "itemText": "Q", "maxScore": 5, "reviews": [{ "score": 3 }] }]]"#;
    let rounds = parse_rounds(bare.as_bytes()).unwrap();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0][0].reviews[0].score, Some(3.0));
}

#[test]
fn test_empty_rounds_rejected() {
    let err = parse_rounds(r#"{ "rounds": [] }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, InputError::Invalid(_)));
}

#[test]
fn test_malformed_json_is_json_error() {
    let err = parse_rounds("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, InputError::Json(_)));
}

#[test]
fn test_load_plain_and_gz() {
    let dir = make_temp_dir();
    let plain = dir.join("rounds.json");
    fs::write(&plain, ROUNDS).unwrap();
    let gz = dir.join("rounds.json.gz");
    write_gz(&gz, ROUNDS);

    let a = load_rounds(&plain).unwrap();
    let b = load_rounds(&gz).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_missing_file() {
    let dir = make_temp_dir();
    let err = load_rounds(&dir.join("absent.json")).unwrap_err();
    assert!(matches!(err, InputError::Missing(_)));
}

#[test]
fn test_load_tableau_payload_gz() {
    let dir = make_temp_dir();
    let path = dir.join("tableau.json.gz");
    write_gz(
        &path,
        r#"{ "rubrics": [ { "round_id": "7", "round_number": 1, "max_answer_value": 5 } ],
             "responses": { "7": { "1": { "description": "Q1", "answers": { "values": [4, null] } } } } }"#,
    );
    let payload = load_tableau_payload(&path).unwrap();
    assert_eq!(payload.rubrics[0].min_answer_value, 0.0);
    assert_eq!(
        payload.responses["7"]["1"].answers.values,
        vec![Some(4.0), None]
    );
    assert!(payload.responses["7"]["1"].answers.comments.is_empty());
}

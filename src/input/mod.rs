use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

pub mod gz;

use gz::open_maybe_gz;

use crate::error::InputError;
use crate::model::Round;
use crate::model::payload::TableauPayload;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoundsFile {
    Wrapped { rounds: Vec<Round> },
    Bare(Vec<Round>),
}

pub fn load_rounds(path: &Path) -> Result<Vec<Round>, InputError> {
    ensure_exists(path)?;
    let reader = open_maybe_gz(path)?;
    let rounds = parse_rounds(reader)?;
    info!(
        path = %path.display(),
        rounds = rounds.len(),
        "loaded review rounds"
    );
    Ok(rounds)
}

pub fn parse_rounds<R: std::io::Read>(reader: R) -> Result<Vec<Round>, InputError> {
    let parsed: RoundsFile = serde_json::from_reader(reader)?;
    let rounds = match parsed {
        RoundsFile::Wrapped { rounds } => rounds,
        RoundsFile::Bare(rounds) => rounds,
    };
    if rounds.is_empty() {
        return Err(InputError::Invalid("rounds file holds no rounds".to_string()));
    }
    for (idx, round) in rounds.iter().enumerate() {
        debug!(round = idx + 1, rows = round.len(), "parsed round");
    }
    Ok(rounds)
}

pub fn load_tableau_payload(path: &Path) -> Result<TableauPayload, InputError> {
    ensure_exists(path)?;
    let reader = open_maybe_gz(path)?;
    let payload = parse_tableau_payload(reader)?;
    info!(
        path = %path.display(),
        rubrics = payload.rubrics.len(),
        rounds = payload.responses.len(),
        "loaded tableau payload"
    );
    Ok(payload)
}

pub fn parse_tableau_payload<R: std::io::Read>(reader: R) -> Result<TableauPayload, InputError> {
    Ok(serde_json::from_reader(reader)?)
}

fn ensure_exists(path: &Path) -> Result<(), InputError> {
    if !path.is_file() {
        return Err(InputError::Missing(path.display().to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;

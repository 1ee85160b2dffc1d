use tracing::{info, warn};

use crate::error::HeatgridError;
use crate::model::payload::TableauPayload;
use crate::pipeline::stage4_group::{RoundGroup, group_rounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.level.as_str(), self.message)
    }
}

/// Request-scoped state handed to the pipeline instead of global lookups.
#[derive(Debug, Clone, Default)]
pub struct ReviewContext {
    pub assignment_id: Option<String>,
    pub participant_id: Option<String>,
    pub alerts: Vec<Alert>,
}

impl ReviewContext {
    pub fn new(assignment_id: Option<String>, participant_id: Option<String>) -> Self {
        Self {
            assignment_id,
            participant_id,
            ..Self::default()
        }
    }

    pub fn alert(&mut self, level: AlertLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            AlertLevel::Info => info!("{message}"),
            AlertLevel::Warning | AlertLevel::Error => warn!("{message}"),
        }
        self.alerts.push(Alert { level, message });
    }

    /// Both ids must be present and non-blank before a tableau is loaded.
    pub fn require_params(&self) -> Result<(&str, &str), HeatgridError> {
        let assignment = non_blank(self.assignment_id.as_deref())
            .ok_or(HeatgridError::MissingParameter("assignment_id"))?;
        let participant = non_blank(self.participant_id.as_deref())
            .ok_or(HeatgridError::MissingParameter("participant_id"))?;
        Ok((assignment, participant))
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

#[derive(Debug)]
pub enum ViewState<T> {
    Loading,
    Error(HeatgridError),
    Success(T),
}

impl<T> ViewState<T> {
    pub fn into_result(self) -> Result<T, HeatgridError> {
        match self {
            ViewState::Success(v) => Ok(v),
            ViewState::Error(err) => Err(err),
            ViewState::Loading => Err(HeatgridError::NotReady),
        }
    }
}

pub fn load_tableau(
    ctx: &mut ReviewContext,
    payload: &TableauPayload,
) -> ViewState<Vec<RoundGroup>> {
    let (assignment, participant) = match ctx.require_params() {
        Ok((a, p)) => (a.to_string(), p.to_string()),
        Err(err) => {
            ctx.alert(AlertLevel::Error, err.to_string());
            return ViewState::Error(err);
        }
    };

    let groups = group_rounds(payload);
    ctx.alert(
        AlertLevel::Info,
        format!(
            "loaded {} review round(s) for assignment {assignment}, participant {participant}",
            groups.len()
        ),
    );
    ViewState::Success(groups)
}

#[cfg(test)]
#[path = "../tests/src_inline/context.rs"]
mod tests;

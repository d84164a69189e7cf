use serde::Deserialize;

use crate::error::LoggerError;
use crate::tracker::{parse_rotation, Action, LogEvent, Team};

/// Log form submission from the frontend or the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct LogActionRequest {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub player: String,
    pub team: String,
    pub action: String,
    pub rotation: Option<String>,
}

/// Validates a form submission and turns it into an event
///
/// Team and action must be one of the known labels. Timestamp, player and
/// rotation contents are free text.
pub fn validate_submission(req: &LogActionRequest) -> Result<LogEvent, LoggerError> {
    let team: Team = req.team.parse()?;
    let action: Action = req.action.parse()?;

    // a blank rotation field means "keep the current one"
    let rotation = req
        .rotation
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .map(parse_rotation);

    Ok(LogEvent {
        timestamp: req.timestamp.trim().to_string(),
        player: req.player.trim().to_string(),
        team,
        action,
        rotation,
    })
}

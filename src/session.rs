use tracing::{info, warn};

use crate::error::LoggerError;
use crate::form::{log_to_csv, validate_submission, LogActionRequest};
use crate::store::LogStore;
use crate::tracker::{restore_state, EventRecord, MatchState};

/// The selected log, its rows and the state derived from them
#[derive(Debug, Clone)]
pub struct MatchSession {
    pub log_name: String,
    pub entries: Vec<EventRecord>,
    pub state: MatchState,
}

impl MatchSession {
    /// Loads a log and rebuilds its match state
    pub fn open(store: &LogStore, name: &str) -> Result<Self, LoggerError> {
        let log_name = LogStore::normalize_name(name)?;
        let entries = store.load(&log_name)?;
        let state = restore_state(&entries);
        info!(log = %log_name, rows = entries.len(), rally = state.rally, "selected match log");
        Ok(MatchSession { log_name, entries, state })
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, LoggerError> {
        log_to_csv(&self.entries)
    }
}

/// Replaces whatever session is active with a fresh load of `name`
///
/// On failure the previous session is left untouched.
pub fn select(active: &mut Option<MatchSession>, store: &LogStore, name: &str) -> Result<(), LoggerError> {
    let session = MatchSession::open(store, name)?;
    *active = Some(session);
    Ok(())
}

/// Logs one action into the active session and saves the full log
///
/// Without an active session nothing is mutated. A failed save keeps the new
/// row in memory; the next successful save writes it out.
pub fn log_action(
    active: &mut Option<MatchSession>,
    store: &LogStore,
    req: &LogActionRequest,
) -> Result<EventRecord, LoggerError> {
    let session = active.as_mut().ok_or(LoggerError::NoActiveLog)?;
    let event = validate_submission(req)?;

    let (state, record) = session.state.clone().apply(event);
    session.state = state;
    session.entries.push(record.clone());

    if let Err(e) = store.save(&session.log_name, &session.entries) {
        warn!(log = %session.log_name, error = %e, "failed to save match log");
        return Err(e);
    }

    info!(
        log = %session.log_name,
        action = %record.action,
        team = %record.team,
        rally = record.rally,
        score_a = record.score_a,
        score_b = record.score_b,
        "action logged"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::load_log;
    use crate::tracker::Team;

    fn request(team: &str, action: &str) -> LogActionRequest {
        LogActionRequest {
            timestamp: "00:30".to_string(),
            player: "#4".to_string(),
            team: team.to_string(),
            action: action.to_string(),
            rotation: None,
        }
    }

    #[test]
    fn logging_without_active_log_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        let mut active = None;

        let result = log_action(&mut active, &store, &request("Team A", "Serve"));
        assert!(matches!(result, Err(LoggerError::NoActiveLog)));
        assert!(active.is_none());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn logged_actions_are_persisted_and_scored() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        store.create(Some("game")).unwrap();
        let mut active = None;
        select(&mut active, &store, "game").unwrap();

        log_action(&mut active, &store, &request("Team A", "Serve")).unwrap();
        log_action(&mut active, &store, &request("Team B", "Serve")).unwrap();
        let last = log_action(&mut active, &store, &request("Team B", "Serve")).unwrap();

        assert_eq!((last.score_a, last.score_b), (0, 2));
        let session = active.as_ref().unwrap();
        assert_eq!(session.state.serve_team, Some(Team::B));
        assert_eq!(load_log(dir.path().join("game.csv")).unwrap(), session.entries);
    }

    #[test]
    fn invalid_submission_leaves_session_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        store.create(Some("game")).unwrap();
        let mut active = None;
        select(&mut active, &store, "game").unwrap();

        assert!(log_action(&mut active, &store, &request("Team Q", "Serve")).is_err());
        let session = active.as_ref().unwrap();
        assert!(session.entries.is_empty());
        assert_eq!(session.state, MatchState::new());
    }

    #[test]
    fn selecting_another_log_discards_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        store.create(Some("first")).unwrap();
        store.create(Some("second")).unwrap();
        let mut active = None;

        select(&mut active, &store, "first").unwrap();
        log_action(&mut active, &store, &request("Team A", "Serve")).unwrap();
        log_action(&mut active, &store, &request("Team A", "Serve")).unwrap();

        select(&mut active, &store, "second").unwrap();
        let session = active.as_ref().unwrap();
        assert_eq!(session.log_name, "second.csv");
        assert!(session.entries.is_empty());
        assert_eq!(session.state, MatchState::new());

        log_action(&mut active, &store, &request("Team B", "Block")).unwrap();
        assert_eq!(store.load("first").unwrap().len(), 2);
        assert_eq!(store.load("second").unwrap().len(), 1);
    }

    #[test]
    fn failed_select_keeps_current_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        store.create(Some("game")).unwrap();
        let mut active = None;
        select(&mut active, &store, "game").unwrap();

        assert!(select(&mut active, &store, "missing").is_err());
        assert_eq!(active.as_ref().unwrap().log_name, "game.csv");
    }

    #[test]
    fn serving_from_a_log_at_the_counter_limit_does_not_wrap() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        std::fs::write(
            dir.path().join("long.csv"),
            "Timestamp,Player,Team,Action,Rally,Rotation,Score A,Score B\n\
             00:01,#1,Team A,Serve,4294967295,,4294967295,0\n",
        )
        .unwrap();
        let mut active = None;
        select(&mut active, &store, "long").unwrap();

        let record = log_action(&mut active, &store, &request("Team A", "Serve")).unwrap();
        assert_eq!(record.rally, u32::MAX);
        assert_eq!((record.score_a, record.score_b), (u32::MAX, 0));

        let rows = store.load("long").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.windows(2).all(|w| w[1].rally >= w[0].rally && w[1].score_a >= w[0].score_a));
    }

    #[test]
    fn failed_save_keeps_row_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        store.create(Some("game")).unwrap();
        let mut active = None;
        select(&mut active, &store, "game").unwrap();

        // a directory where the file should be makes the rewrite fail
        std::fs::remove_file(dir.path().join("game.csv")).unwrap();
        std::fs::create_dir(dir.path().join("game.csv")).unwrap();

        let result = log_action(&mut active, &store, &request("Team A", "Block"));
        assert!(matches!(result, Err(LoggerError::Io(_))));
        assert_eq!(active.as_ref().unwrap().entries.len(), 1);
    }
}

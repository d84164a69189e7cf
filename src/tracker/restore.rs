use super::state::MatchState;
use super::types::{Action, EventRecord, Score};

/// Rebuilds match state from a loaded log, best effort
///
/// Rally and score come from the last row. Serve pointers are replayed from the
/// Serve and Start Rally rows. Each team's rotation is the snapshot on its
/// latest Serve or Rotation Init row, empty or not.
pub fn restore_state(records: &[EventRecord]) -> MatchState {
    let mut state = MatchState::new();

    let Some(last) = records.last() else {
        return state;
    };

    state.rally = last.rally;
    state.score = Score {
        team_a: last.score_a,
        team_b: last.score_b,
    };

    for record in records {
        match record.action {
            Action::Serve => {
                state.prev_serve_team = state.serve_team;
                state.serve_team = Some(record.team);
            }
            Action::StartRally => state.serve_team = None,
            _ => {}
        }
        if record.action.carries_rotation() {
            state.set_rotation(record.team, record.rotation.clone());
        }
    }

    state
}

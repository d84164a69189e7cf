use std::collections::BTreeMap;
use serde::Serialize;
use super::types::{Action, EventRecord, Score, Team};

/// Running rally/serve/score state for one match log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchState {
    pub rally: u32,
    pub serve_team: Option<Team>,
    pub prev_serve_team: Option<Team>,
    pub rotations: BTreeMap<Team, Vec<String>>,
    pub score: Score,
}

/// A validated form submission, ready to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub timestamp: String,
    pub player: String,
    pub team: Team,
    pub action: Action,
    pub rotation: Option<Vec<String>>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        MatchState {
            rally: 1,
            serve_team: None,
            prev_serve_team: None,
            rotations: Team::ALL.iter().map(|&t| (t, Vec::new())).collect(),
            score: Score::default(),
        }
    }

    /// Applies sideout scoring for a serve by `team`
    ///
    /// A change of server awards the point to the new server; the same team
    /// serving twice in a row scores for the continuation. The first serve
    /// after the serve is cleared establishes the server without scoring.
    pub fn record_serve(&mut self, team: Team) {
        if let Some(current) = self.serve_team {
            if current != team {
                self.score.add_point(team);
            }
        }

        self.rally = self.rally.saturating_add(1);
        self.prev_serve_team = self.serve_team;
        self.serve_team = Some(team);

        if self.prev_serve_team == Some(team) {
            self.score.add_point(team);
        }
    }

    /// Manual rally override; leaves the score alone
    pub fn start_rally(&mut self) {
        self.rally = self.rally.saturating_add(1);
        self.serve_team = None;
    }

    pub fn set_rotation(&mut self, team: Team, players: Vec<String>) {
        self.rotations.insert(team, players);
    }

    pub fn rotation(&self, team: Team) -> &[String] {
        self.rotations.get(&team).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Consumes the state and one event, producing the next state and the row to log
    pub fn apply(mut self, event: LogEvent) -> (MatchState, EventRecord) {
        match event.action {
            Action::Serve => {
                if let Some(players) = event.rotation {
                    self.set_rotation(event.team, players);
                }
                self.record_serve(event.team);
            }
            Action::RotationInit => {
                self.set_rotation(event.team, event.rotation.unwrap_or_default());
            }
            Action::StartRally => self.start_rally(),
            Action::FirstTouch | Action::SecondTouch | Action::ThirdTouch | Action::Block => {}
        }

        let rotation = if event.action.carries_rotation() {
            self.rotation(event.team).to_vec()
        } else {
            Vec::new()
        };

        let record = EventRecord {
            timestamp: event.timestamp,
            player: event.player,
            team: event.team,
            action: event.action,
            rally: self.rally,
            rotation,
            score_a: self.score.team_a,
            score_b: self.score.team_b,
        };

        (self, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(team: Team, action: Action) -> LogEvent {
        LogEvent {
            timestamp: "00:10".to_string(),
            player: "#5".to_string(),
            team,
            action,
            rotation: None,
        }
    }

    #[test]
    fn first_serve_scores_nothing_then_sideout_then_continuation() {
        let mut state = MatchState::new();

        state.record_serve(Team::A);
        assert_eq!((state.score.team_a, state.score.team_b), (0, 0));
        assert_eq!(state.serve_team, Some(Team::A));

        state.record_serve(Team::B);
        assert_eq!((state.score.team_a, state.score.team_b), (0, 1));
        assert_eq!(state.serve_team, Some(Team::B));
        assert_eq!(state.prev_serve_team, Some(Team::A));

        state.record_serve(Team::B);
        assert_eq!((state.score.team_a, state.score.team_b), (0, 2));
        assert_eq!(state.rally, 4);
    }

    #[test]
    fn every_serve_after_the_first_scores_exactly_once() {
        let mut state = MatchState::new();
        state.record_serve(Team::A);
        let serves = [Team::B, Team::A, Team::A, Team::B, Team::B, Team::A];
        for team in serves {
            let before = state.score;
            let rally_before = state.rally;
            state.record_serve(team);
            let gained = (state.score.team_a - before.team_a) + (state.score.team_b - before.team_b);
            assert_eq!(gained, 1);
            assert_eq!(state.score.get(team), before.get(team) + 1);
            assert_eq!(state.rally, rally_before + 1);
        }
    }

    #[test]
    fn start_rally_clears_server_without_scoring() {
        let mut state = MatchState::new();
        state.record_serve(Team::A);
        state.record_serve(Team::A);
        assert_eq!(state.score.team_a, 1);

        state.start_rally();
        assert_eq!(state.rally, 4);
        assert_eq!(state.serve_team, None);
        assert_eq!(state.score.team_a, 1);

        // serve after a manual rally start re-establishes the server
        state.record_serve(Team::B);
        assert_eq!((state.score.team_a, state.score.team_b), (1, 0));
    }

    #[test]
    fn set_rotation_replaces_without_validation() {
        let mut state = MatchState::new();
        state.set_rotation(Team::A, vec!["1".into(), "2".into()]);
        state.set_rotation(Team::A, vec![]);
        assert!(state.rotation(Team::A).is_empty());
        assert!(state.rotation(Team::B).is_empty());
    }

    #[test]
    fn apply_snapshots_score_and_rotation_after_the_action() {
        let state = MatchState::new();
        let mut init = event(Team::A, Action::RotationInit);
        init.rotation = Some(vec!["1".into(), "2".into(), "3".into()]);
        let (state, record) = state.apply(init);
        assert_eq!(record.rotation, vec!["1", "2", "3"]);
        assert_eq!(record.rally, 1);

        let (state, record) = state.apply(event(Team::A, Action::Serve));
        assert_eq!(record.rally, 2);
        assert_eq!(record.rotation, vec!["1", "2", "3"]);

        let mut serve_b = event(Team::B, Action::Serve);
        serve_b.rotation = Some(vec!["9".into(), "8".into()]);
        let (state, record) = state.apply(serve_b);
        assert_eq!((record.score_a, record.score_b), (0, 1));
        assert_eq!(record.rotation, vec!["9", "8"]);

        let (state, record) = state.apply(event(Team::A, Action::Block));
        assert!(record.rotation.is_empty());
        assert_eq!(record.rally, 3);
        assert_eq!(state.serve_team, Some(Team::B));
    }

    #[test]
    fn counters_saturate_instead_of_wrapping() {
        let mut state = MatchState::new();
        state.rally = u32::MAX;
        state.score.team_a = u32::MAX;
        state.serve_team = Some(Team::A);

        state.record_serve(Team::A);
        assert_eq!(state.rally, u32::MAX);
        assert_eq!(state.score.team_a, u32::MAX);

        state.start_rally();
        assert_eq!(state.rally, u32::MAX);
    }

    #[test]
    fn fresh_state_has_an_empty_rotation_per_team() {
        let state = MatchState::new();
        assert_eq!(state.rotations.len(), 2);
        assert!(Team::ALL.iter().all(|&t| state.rotation(t).is_empty()));
    }

    #[test]
    fn apply_start_rally_advances_rally() {
        let (state, record) = MatchState::new().apply(event(Team::B, Action::StartRally));
        assert_eq!(record.rally, 2);
        assert_eq!(state.serve_team, None);
        assert_eq!((record.score_a, record.score_b), (0, 0));
    }
}

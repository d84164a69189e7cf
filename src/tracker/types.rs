use std::fmt;
use std::str::FromStr;
use serde::Serialize;
use crate::error::LoggerError;

/// One of the two sides in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Team {
    #[serde(rename = "Team A")]
    A,
    #[serde(rename = "Team B")]
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::A => "Team A",
            Team::B => "Team B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Team {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Team A" => Ok(Team::A),
            "Team B" => Ok(Team::B),
            other => Err(LoggerError::UnknownTeam(other.to_string())),
        }
    }
}

/// Actions an operator can log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Serve,
    #[serde(rename = "First Touch")]
    FirstTouch,
    #[serde(rename = "Second Touch")]
    SecondTouch,
    #[serde(rename = "Third Touch")]
    ThirdTouch,
    Block,
    #[serde(rename = "Rotation Init")]
    RotationInit,
    #[serde(rename = "Start Rally")]
    StartRally,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Serve,
        Action::FirstTouch,
        Action::SecondTouch,
        Action::ThirdTouch,
        Action::Block,
        Action::RotationInit,
        Action::StartRally,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Serve => "Serve",
            Action::FirstTouch => "First Touch",
            Action::SecondTouch => "Second Touch",
            Action::ThirdTouch => "Third Touch",
            Action::Block => "Block",
            Action::RotationInit => "Rotation Init",
            Action::StartRally => "Start Rally",
        }
    }

    /// Whether records of this action carry a rotation snapshot
    pub fn carries_rotation(&self) -> bool {
        matches!(self, Action::Serve | Action::RotationInit)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Action {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == trimmed)
            .ok_or_else(|| LoggerError::UnknownAction(trimmed.to_string()))
    }
}

/// A single logged row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub timestamp: String,
    pub player: String,
    pub team: Team,
    pub action: Action,
    pub rally: u32,
    pub rotation: Vec<String>,
    pub score_a: u32,
    pub score_b: u32,
}

/// Per-team point tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub team_a: u32,
    pub team_b: u32,
}

impl Score {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }

    pub fn add_point(&mut self, team: Team) {
        match team {
            Team::A => self.team_a = self.team_a.saturating_add(1),
            Team::B => self.team_b = self.team_b.saturating_add(1),
        }
    }
}

/// Splits a comma-joined rotation into player identifiers, dropping blanks
pub fn parse_rotation(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

/// Joins player identifiers back into the stored column format
pub fn join_rotation(players: &[String]) -> String {
    players.join(",")
}

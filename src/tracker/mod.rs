pub mod types;
pub mod state;
pub mod restore;

pub use types::{Action, EventRecord, Score, Team, parse_rotation, join_rotation};
pub use state::{LogEvent, MatchState};
pub use restore::restore_state;

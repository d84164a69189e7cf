use crate::tracker::{join_rotation, EventRecord, MatchState, Team};

/// One-line score summary, e.g. "Team A 3 - 5 Team B"
pub fn format_score(state: &MatchState) -> String {
    format!(
        "{} {} - {} {}",
        Team::A,
        state.score.get(Team::A),
        state.score.get(Team::B),
        Team::B
    )
}

/// Formats the serving team, or a dash if no one is serving
pub fn format_server(team: Option<Team>) -> String {
    team.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Formats a single record as a table row
pub fn format_record(record: &EventRecord) -> String {
    format!(
        "{:<10} {:<8} {:<7} {:<13} {:>5}  {:>3}-{:<3} {}",
        record.timestamp,
        record.player,
        record.team,
        record.action,
        record.rally,
        record.score_a,
        record.score_b,
        join_rotation(&record.rotation)
    )
}

/// Prints a log and its derived state in a readable format
pub fn print_log(log_name: &str, entries: &[EventRecord], state: &MatchState) {
    println!("\n=== {} ===", log_name);

    if entries.is_empty() {
        println!("No entries yet.");
    } else {
        println!(
            "{:<10} {:<8} {:<7} {:<13} {:>5}  {:^7} {}",
            "Timestamp", "Player", "Team", "Action", "Rally", "Score", "Rotation"
        );
        for record in entries {
            println!("{}", format_record(record));
        }
    }

    println!("\nRally: {}", state.rally);
    println!("Score: {}", format_score(state));
    println!("Serving: {} (previous: {})", format_server(state.serve_team), format_server(state.prev_serve_team));
    for team in Team::ALL {
        let rotation = state.rotation(team);
        if !rotation.is_empty() {
            println!("Rotation {}: {}", team, rotation.join(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Action;

    #[test]
    fn score_and_server_formatting() {
        let mut state = MatchState::new();
        state.record_serve(Team::A);
        state.record_serve(Team::B);
        assert_eq!(format_score(&state), "Team A 0 - 1 Team B");
        assert_eq!(format_server(state.serve_team), "Team B");
        assert_eq!(format_server(None), "-");
    }

    #[test]
    fn record_row_contains_every_field() {
        let row = format_record(&EventRecord {
            timestamp: "00:12".to_string(),
            player: "#5".to_string(),
            team: Team::B,
            action: Action::Serve,
            rally: 4,
            rotation: vec!["1".to_string(), "2".to_string()],
            score_a: 2,
            score_b: 3,
        });
        for part in ["00:12", "#5", "Team B", "Serve", "4", "2-3", "1,2"] {
            assert!(row.contains(part), "{row:?} missing {part}");
        }
    }
}

use std::io::Read;
use std::path::Path;
use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::error::LoggerError;
use crate::tracker::{parse_rotation, Action, EventRecord, Team};

pub const HEADERS: [&str; 8] = [
    "Timestamp",
    "Player",
    "Team",
    "Action",
    "Rally",
    "Rotation",
    "Score A",
    "Score B",
];

/// Column positions found in a log header; older logs lack some of them
struct Columns {
    timestamp: Option<usize>,
    player: Option<usize>,
    team: Option<usize>,
    action: Option<usize>,
    rally: Option<usize>,
    rotation: Option<usize>,
    score_a: Option<usize>,
    score_b: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        Columns {
            timestamp: find("Timestamp"),
            player: find("Player"),
            team: find("Team"),
            action: find("Action"),
            rally: find("Rally"),
            rotation: find("Rotation"),
            score_a: find("Score A"),
            score_b: find("Score B"),
        }
    }
}

fn field<'a>(record: &'a StringRecord, col: Option<usize>) -> &'a str {
    col.and_then(|c| record.get(c)).unwrap_or("")
}

/// Parses a number, falling back to `default` if empty or invalid
fn parse_number(value: &str, default: u32) -> u32 {
    value.trim().parse().unwrap_or(default)
}

/// Loads every record of a log file
pub fn load_log<P: AsRef<Path>>(csv_path: P) -> Result<Vec<EventRecord>, LoggerError> {
    let file = std::fs::File::open(csv_path)?;
    read_log(file)
}

/// Reads log records from any CSV source
///
/// Missing Rally defaults to 1, missing scores to 0 and a missing rotation to
/// empty. Rows whose team or action can't be parsed are skipped.
pub fn read_log<R: Read>(source: R) -> Result<Vec<EventRecord>, LoggerError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
    let columns = Columns::from_headers(reader.headers()?);

    let mut entries = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let team = match field(&record, columns.team).parse::<Team>() {
            Ok(team) => team,
            Err(e) => {
                warn!(row = line + 1, error = %e, "skipping log row");
                continue;
            }
        };
        let action = match field(&record, columns.action).parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                warn!(row = line + 1, error = %e, "skipping log row");
                continue;
            }
        };

        entries.push(EventRecord {
            timestamp: field(&record, columns.timestamp).to_string(),
            player: field(&record, columns.player).to_string(),
            team,
            action,
            rally: parse_number(field(&record, columns.rally), 1),
            rotation: parse_rotation(field(&record, columns.rotation)),
            score_a: parse_number(field(&record, columns.score_a), 0),
            score_b: parse_number(field(&record, columns.score_b), 0),
        });
    }

    Ok(entries)
}

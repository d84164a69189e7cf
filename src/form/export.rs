use std::io::Write;
use std::path::Path;
use csv::WriterBuilder;

use crate::error::LoggerError;
use crate::parser::HEADERS;
use crate::tracker::{join_rotation, EventRecord};

/// Writes the header row followed by every record
pub fn write_log<W: Write>(writer: W, entries: &[EventRecord]) -> Result<(), LoggerError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(HEADERS)?;
    for entry in entries {
        let rally = entry.rally.to_string();
        let rotation = join_rotation(&entry.rotation);
        let score_a = entry.score_a.to_string();
        let score_b = entry.score_b.to_string();

        wtr.write_record([
            entry.timestamp.as_str(),
            entry.player.as_str(),
            entry.team.as_str(),
            entry.action.as_str(),
            rally.as_str(),
            rotation.as_str(),
            score_a.as_str(),
            score_b.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Rewrites the whole log file with `entries`
pub fn save_log(csv_path: &Path, entries: &[EventRecord]) -> Result<(), LoggerError> {
    let file = std::fs::File::create(csv_path)?;
    write_log(file, entries)
}

/// Renders the log as CSV bytes for download
pub fn log_to_csv(entries: &[EventRecord]) -> Result<Vec<u8>, LoggerError> {
    let mut buffer = Vec::new();
    write_log(&mut buffer, entries)?;
    Ok(buffer)
}

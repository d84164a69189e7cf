use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("No active log file selected")]
    NoActiveLog,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid log name: {0:?}")]
    InvalidLogName(String),

    #[error("Log not found: {0}")]
    LogNotFound(String),

    #[error("Log already exists: {0}")]
    LogExists(String),

    #[error("Unknown team: {0:?}")]
    UnknownTeam(String),

    #[error("Unknown action: {0:?}")]
    UnknownAction(String),
}

impl LoggerError {
    /// Bad operator input, as opposed to a storage failure
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidLogName(_) | LoggerError::UnknownTeam(_) | LoggerError::UnknownAction(_)
        )
    }
}

pub mod submission;
pub mod export;

pub use submission::{LogActionRequest, validate_submission};
pub use export::{log_to_csv, save_log};

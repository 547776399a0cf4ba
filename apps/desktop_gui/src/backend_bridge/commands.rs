//! Backend commands queued from UI to backend worker.

use shared::protocol::Submission;

pub enum BackendCommand {
    Calculate { submission: Submission },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Calculate { .. } => "calculate",
        }
    }
}

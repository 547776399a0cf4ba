//! Command orchestration helpers from UI actions to backend command queue.

use client_core::CalculationError;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), CalculationError> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(CalculationError::Unavailable(
            "UI command queue is full".to_string(),
        )),
        Err(TrySendError::Disconnected(_)) => Err(CalculationError::Unavailable(
            "backend command processor disconnected".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::protocol::Submission;

    fn calculate() -> BackendCommand {
        BackendCommand::Calculate {
            submission: Submission::new().with("flights", "2"),
        }
    }

    #[test]
    fn queues_command_when_worker_is_listening() {
        let (cmd_tx, cmd_rx) = bounded(1);
        dispatch_backend_command(&cmd_tx, calculate()).expect("queued");
        let BackendCommand::Calculate { submission } = cmd_rx.try_recv().expect("command");
        assert_eq!(submission.get("flights"), Some("2"));
    }

    #[test]
    fn full_queue_and_disconnect_report_unavailable() {
        let (cmd_tx, cmd_rx) = bounded(1);
        dispatch_backend_command(&cmd_tx, calculate()).expect("first");
        assert!(matches!(
            dispatch_backend_command(&cmd_tx, calculate()),
            Err(CalculationError::Unavailable(_))
        ));

        drop(cmd_rx);
        assert!(matches!(
            dispatch_backend_command(&cmd_tx, calculate()),
            Err(CalculationError::Unavailable(_))
        ));
    }
}

//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command without blocking the UI thread. Failures are reported
/// through `status`; the command is dropped.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup failure); restart the panel"
                    .to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::ProductListController;
    use crossbeam_channel::bounded;

    fn refresh_command() -> BackendCommand {
        BackendCommand::RefreshProducts {
            ticket: ProductListController::new().begin_refresh(),
        }
    }

    #[test]
    fn queues_command_when_capacity_allows() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(&tx, refresh_command(), &mut status));

        assert!(status.is_empty());
        assert_eq!(rx.try_recv().map(|cmd| cmd.name()), Ok("refresh_products"));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded::<BackendCommand>(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, refresh_command(), &mut status);

        assert!(!dispatch_backend_command(&tx, refresh_command(), &mut status));

        assert_eq!(status, "UI command queue is full; please retry");
    }

    #[test]
    fn reports_disconnected_backend() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        drop(rx);
        let mut status = String::new();

        assert!(!dispatch_backend_command(&tx, refresh_command(), &mut status));

        assert!(status.contains("disconnected"));
    }
}

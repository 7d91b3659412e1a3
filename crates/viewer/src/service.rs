use crate::coordinator::RefreshCoordinator;
use crate::error::{Result, ViewerError};
use crate::events::ChangeEvent;
use crate::host::Workspace;
use ftags_graph::TagOracle;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;

const INITIAL_REASON: &str = "startup";

#[derive(Debug, Clone)]
pub struct RefreshUpdate {
    pub completed_at: SystemTime,
    pub reason: String,
    pub views_rendered: usize,
}

/// Runs a [`RefreshCoordinator`] on its own task.
///
/// Events are processed one at a time in arrival order, so two render passes
/// never overlap. Dropping the last handle stops the task and strips all
/// chips.
#[derive(Clone)]
pub struct RefreshService {
    inner: Arc<RefreshServiceInner>,
}

struct RefreshServiceInner {
    command_tx: mpsc::Sender<ServiceCommand>,
    update_tx: broadcast::Sender<RefreshUpdate>,
}

enum ServiceCommand {
    Event(ChangeEvent),
    Refresh { reason: String },
    Shutdown { ack: Option<oneshot::Sender<()>> },
}

impl RefreshService {
    /// Spawn the refresh loop. Chips are injected once right away.
    pub fn start<O, W>(coordinator: RefreshCoordinator<O>, workspace: W) -> Self
    where
        O: TagOracle + Send + 'static,
        W: Workspace + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel(256);
        let (update_tx, _) = broadcast::channel(32);

        spawn_refresh_loop(coordinator, workspace, command_rx, update_tx.clone());

        Self {
            inner: Arc::new(RefreshServiceInner {
                command_tx,
                update_tx,
            }),
        }
    }

    pub async fn notify(&self, event: ChangeEvent) -> Result<()> {
        self.send(ServiceCommand::Event(event)).await
    }

    /// Force a pass regardless of debounce state
    pub async fn refresh(&self, reason: impl Into<String>) -> Result<()> {
        self.send(ServiceCommand::Refresh {
            reason: reason.into(),
        })
        .await
    }

    /// Stop the loop and wait until every fragment has been removed
    pub async fn shutdown(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(ServiceCommand::Shutdown { ack: Some(ack_tx) })
            .await?;
        ack_rx
            .await
            .map_err(|e| ViewerError::ServiceClosed(format!("no shutdown ack: {e}")))
    }

    #[must_use]
    pub fn subscribe_updates(&self) -> broadcast::Receiver<RefreshUpdate> {
        self.inner.update_tx.subscribe()
    }

    async fn send(&self, command: ServiceCommand) -> Result<()> {
        self.inner
            .command_tx
            .send(command)
            .await
            .map_err(|e| ViewerError::ServiceClosed(format!("failed to send command: {e}")))
    }
}

impl Drop for RefreshService {
    fn drop(&mut self) {
        if Arc::strong_count(&self.inner) == 1 {
            let _ = self
                .inner
                .command_tx
                .try_send(ServiceCommand::Shutdown { ack: None });
        }
    }
}

fn spawn_refresh_loop<O, W>(
    mut coordinator: RefreshCoordinator<O>,
    mut workspace: W,
    mut command_rx: mpsc::Receiver<ServiceCommand>,
    update_tx: broadcast::Sender<RefreshUpdate>,
) where
    O: TagOracle + Send + 'static,
    W: Workspace + Send + 'static,
{
    tokio::spawn(async move {
        let rendered = coordinator.refresh_all(&mut workspace);
        publish(&update_tx, INITIAL_REASON, rendered);

        while let Some(command) = command_rx.recv().await {
            match command {
                ServiceCommand::Event(event) => {
                    // tokio's clock so paused-time tests drive the debounce
                    let now = Instant::now().into_std();
                    if let Some(rendered) = coordinator.handle(&event, &mut workspace, now) {
                        publish(&update_tx, event.reason(), rendered);
                    }
                }
                ServiceCommand::Refresh { reason } => {
                    let rendered = coordinator.refresh_all(&mut workspace);
                    publish(&update_tx, &reason, rendered);
                }
                ServiceCommand::Shutdown { ack } => {
                    coordinator.teardown(&mut workspace);
                    if let Some(ack) = ack {
                        let _ = ack.send(());
                    }
                    break;
                }
            }
        }
        log::debug!("refresh loop stopped");
    });
}

fn publish(update_tx: &broadcast::Sender<RefreshUpdate>, reason: &str, views_rendered: usize) {
    let _ = update_tx.send(RefreshUpdate {
        completed_at: SystemTime::now(),
        reason: reason.to_string(),
        views_rendered,
    });
}

//! Background heartbeat supervision.
//!
//! At most one heartbeat task runs per client. The task owns a per-start
//! alive flag: `stop()` clears the flag and returns without joining, and the
//! task exits at its next wake point. Because every start gets a fresh flag,
//! a stale task from a previous start can never be confused with the
//! current one.

use crate::client::ClientCore;
use crate::error::{ClientError, ClientResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Callback invoked with every heartbeat failure.
pub type HeartbeatCallback = Arc<dyn Fn(&ClientError) + Send + Sync>;

/// Supervises the periodic heartbeat task for one client.
#[derive(Default)]
pub(crate) struct HeartbeatSupervisor {
    task: Mutex<Option<Arc<AtomicBool>>>,
}

impl HeartbeatSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the periodic heartbeat task.
    ///
    /// Fails if a task is already running. Each cycle sleeps `interval`,
    /// then issues one heartbeat; failures are routed to `on_error` and the
    /// loop stops itself only when authentication is lost.
    pub fn start(
        &self,
        core: Arc<ClientCore>,
        interval: Duration,
        on_error: Option<HeartbeatCallback>,
    ) -> ClientResult<()> {
        let mut slot = self.task.lock().unwrap();
        if slot.as_ref().is_some_and(|alive| alive.load(Ordering::SeqCst)) {
            return Err(ClientError::configuration("heartbeat already running"));
        }

        let alive = Arc::new(AtomicBool::new(true));
        *slot = Some(alive.clone());
        drop(slot);

        info!(interval_secs = interval.as_secs(), "starting heartbeat task");
        tokio::spawn(run_loop(core, interval, on_error, alive));
        Ok(())
    }

    /// Signals the running task to stop, without blocking on it. Idempotent.
    ///
    /// After this returns no new cycle will begin; a cycle already past its
    /// wake point may still complete once.
    pub fn stop(&self) {
        let mut slot = self.task.lock().unwrap();
        if let Some(alive) = slot.take() {
            if alive.swap(false, Ordering::SeqCst) {
                info!("heartbeat task stopping");
            }
        }
    }

    /// Advisory snapshot of the task state; may lag the actual task.
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|alive| alive.load(Ordering::SeqCst))
    }
}

async fn run_loop(
    core: Arc<ClientCore>,
    interval: Duration,
    on_error: Option<HeartbeatCallback>,
    alive: Arc<AtomicBool>,
) {
    loop {
        tokio::time::sleep(interval).await;
        if !alive.load(Ordering::SeqCst) {
            break;
        }

        match core.heartbeat().await {
            Ok(()) => debug!("heartbeat ok"),
            Err(err) => {
                warn!("heartbeat failed: {err}");
                if let Some(callback) = &on_error {
                    callback(&err);
                }
                if err.is_authentication() {
                    warn!("authentication lost, heartbeat task stopping itself");
                    alive.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }
    }
    debug!("heartbeat task exited");
}

//! Scoped resources owned by a mounted player.
//!
//! Both types release what they hold on drop, so every exit path of a mount
//! (including a failed setup step) tears down what was already acquired.

use crate::error::{HostResult, PlayerError, PlayerResult};
use crate::event::ListenerSpec;
use crate::host::{ListenerId, PlayerHost};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// A repeating task running on the current tokio runtime, aborted on drop.
#[derive(Debug)]
pub struct IntervalTask {
    task: JoinHandle<()>,
}

impl IntervalTask {
    /// Calls `on_tick` every `period`, starting one period from now.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> PlayerResult<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| PlayerError::NoRuntime)?;
        let task = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                on_tick();
            }
        });
        Ok(Self { task })
    }

    /// Whether the task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        self.task.abort();
        debug!("interval task stopped");
    }
}

/// A host listener that is removed when this handle drops.
pub struct ListenerHandle {
    host: Arc<dyn PlayerHost>,
    id: ListenerId,
    spec: ListenerSpec,
}

impl ListenerHandle {
    /// Installs `spec` on `host`.
    pub fn install(host: Arc<dyn PlayerHost>, spec: ListenerSpec) -> HostResult<Self> {
        let id = host.add_listener(spec)?;
        debug!("listener {id} installed: {:?}", spec);
        Ok(Self { host, id, spec })
    }

    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    #[must_use]
    pub fn spec(&self) -> ListenerSpec {
        self.spec
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("id", &self.id)
            .field("spec", &self.spec)
            .finish()
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.host.remove_listener(self.id);
        debug!("listener {} removed", self.id);
    }
}

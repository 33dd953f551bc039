//! Child process supervision.
//!
//! # Responsibilities
//! - Spawn the child web process with its port injected via `PORT`
//! - Relay child stdout/stderr into the log stream
//! - Track the child's lifecycle phase
//! - Detect unexpected child exit
//! - Terminate the child on shutdown (SIGTERM, then SIGKILL after a grace
//!   period)

use std::process::Stdio;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{broadcast, Mutex};
use tokio::time;

use crate::config::ChildConfig;

/// Error type for child process operations.
#[derive(Debug, Error)]
pub enum ChildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("child process already started")]
    AlreadyStarted,
}

/// Lifecycle phase of the supervised child process.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildPhase {
    /// Not yet spawned.
    Idle = 0,
    /// Spawned; startup delay still running.
    Starting = 1,
    /// Startup delay elapsed; assumed ready.
    Running = 2,
    /// Terminated by the supervisor.
    Stopped = 3,
    /// Exited on its own.
    Exited = 4,
}

impl From<u8> for ChildPhase {
    fn from(val: u8) -> Self {
        match val {
            1 => ChildPhase::Starting,
            2 => ChildPhase::Running,
            3 => ChildPhase::Stopped,
            4 => ChildPhase::Exited,
            _ => ChildPhase::Idle,
        }
    }
}

/// Owner of the child process handle for the lifetime of the bridge.
pub struct ChildSupervisor {
    config: ChildConfig,
    /// The handle is taken out exactly once, by `stop` or the exit watcher.
    handle: Mutex<Option<Child>>,
    phase: AtomicU8,
    pid: AtomicU32,
}

impl ChildSupervisor {
    /// Create a supervisor for the configured child. Nothing is spawned yet.
    pub fn new(config: ChildConfig) -> Self {
        Self {
            config,
            handle: Mutex::new(None),
            phase: AtomicU8::new(ChildPhase::Idle as u8),
            pid: AtomicU32::new(0),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ChildPhase {
        self.phase.load(Ordering::SeqCst).into()
    }

    /// OS process ID of the child, if it has been spawned.
    pub fn pid(&self) -> Option<u32> {
        match self.pid.load(Ordering::SeqCst) {
            0 => None,
            pid => Some(pid),
        }
    }

    /// Spawn the child process and begin the startup countdown.
    pub async fn start(self: &Arc<Self>) -> Result<(), ChildError> {
        let mut guard = self.handle.lock().await;
        if guard.is_some() {
            return Err(ChildError::AlreadyStarted);
        }

        let mut command = Command::new(&self.config.command);
        command
            .args(&self.config.args)
            .envs(&self.config.env)
            .env("PORT", self.config.port.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn()?;

        let pid = child.id().unwrap_or(0);
        self.pid.store(pid, Ordering::SeqCst);

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(relay_output(stdout, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(relay_output(stderr, "stderr"));
        }

        *guard = Some(child);
        drop(guard);
        self.phase.store(ChildPhase::Starting as u8, Ordering::SeqCst);

        tracing::info!(
            pid,
            command = %self.config.command,
            port = self.config.port,
            startup_delay_secs = self.config.startup_delay_secs,
            "Child process spawned"
        );

        // Readiness is a timer: after the configured delay the child is
        // assumed up. Stop/exit in the meantime wins the exchange.
        let supervisor = self.clone();
        let delay = Duration::from_secs(self.config.startup_delay_secs);
        tokio::spawn(async move {
            time::sleep(delay).await;
            let flipped = supervisor
                .phase
                .compare_exchange(
                    ChildPhase::Starting as u8,
                    ChildPhase::Running as u8,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_ok();
            if flipped {
                tracing::info!(
                    port = supervisor.config.port,
                    "Startup delay elapsed, child assumed ready"
                );
            }
        });

        Ok(())
    }

    /// Watch for the child exiting on its own. Runs until shutdown fires or
    /// the child is gone.
    pub async fn watch(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = time::interval(Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.check_exited().await {
                        break;
                    }
                }
                _ = shutdown.recv() => {
                    break;
                }
            }
        }
    }

    async fn check_exited(&self) -> bool {
        let mut guard = self.handle.lock().await;
        let Some(child) = guard.as_mut() else {
            return true;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                tracing::error!(%status, "Child process exited unexpectedly");
                guard.take();
                self.phase.store(ChildPhase::Exited as u8, Ordering::SeqCst);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to poll child process");
                false
            }
        }
    }

    /// Terminate the child: SIGTERM, wait out the grace period, then SIGKILL.
    ///
    /// Idempotent; a second call is a no-op.
    pub async fn stop(&self) {
        let Some(mut child) = self.handle.lock().await.take() else {
            return;
        };

        terminate(&mut child);

        let grace = Duration::from_secs(self.config.shutdown_grace_secs);
        match time::timeout(grace, child.wait()).await {
            Ok(Ok(status)) => {
                tracing::info!(%status, "Child process terminated");
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Failed to reap child process");
            }
            Err(_) => {
                tracing::warn!(
                    grace_secs = self.config.shutdown_grace_secs,
                    "Child ignored SIGTERM, killing"
                );
                if let Err(e) = child.kill().await {
                    tracing::error!(error = %e, "Failed to kill child process");
                }
            }
        }

        self.phase.store(ChildPhase::Stopped as u8, Ordering::SeqCst);
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    if let Some(pid) = child.id() {
        if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            tracing::warn!(pid, error = %e, "Failed to signal child process");
        }
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) {
    // No SIGTERM equivalent; hard-kill is the only option.
    let _ = child.start_kill();
}

async fn relay_output<R>(reader: R, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        tracing::info!(target: "app_bridge::child", %stream, "{line}");
    }
}

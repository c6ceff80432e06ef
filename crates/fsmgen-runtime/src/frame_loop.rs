//! Host-driven frame loop
//!
//! Stands in for the engine's per-frame callbacks: one task ticks the
//! shared machine on a fixed period until [`FrameLoop::shutdown`], which
//! cancels the update, fixed-update and late-update ticks together.

use crate::error::RuntimeResult;
use crate::machine::StateMachine;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Machine shared between the frame loop and its owner
pub type SharedMachine = Arc<Mutex<StateMachine>>;

/// Running frame loop
#[derive(Debug)]
pub struct FrameLoop {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl FrameLoop {
    /// Start ticking `machine` every `period`.
    ///
    /// The first frame runs immediately. Must be called within a tokio
    /// runtime.
    #[must_use]
    pub fn spawn(machine: SharedMachine, period: Duration) -> Self {
        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(run(machine, period, rx));
        Self { shutdown, task }
    }

    /// Stop all ticks and wait for the loop to finish.
    ///
    /// Returns the number of frames that ran.
    ///
    /// # Errors
    /// [`RuntimeError::Join`](crate::RuntimeError::Join) if a state hook
    /// panicked inside the loop
    pub async fn shutdown(self) -> RuntimeResult<u64> {
        // Receiver already gone means the task has exited
        let _ = self.shutdown.send(true);
        let frames = self.task.await?;
        tracing::debug!(frames, "Frame loop stopped");
        Ok(frames)
    }
}

async fn run(machine: SharedMachine, period: Duration, mut shutdown: watch::Receiver<bool>) -> u64 {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0u64;

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                machine.lock().run_frame();
                frames += 1;
            }
        }
    }
    frames
}

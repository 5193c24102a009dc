//! Phase timers. The session awaits a window; it never polls.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Window {
    Night { night: u32 },
    Vote { night: u32 },
}

#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Resolve once the window has elapsed.
    async fn wait(&self, window: Window, duration: Duration);
}

/// Real timers, optionally scaled down (simulations).
#[derive(Debug, Clone, Copy)]
pub struct TokioScheduler {
    scale: f64,
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl TokioScheduler {
    pub fn scaled(scale: f64) -> Self {
        Self {
            scale: scale.max(0.0),
        }
    }
}

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn wait(&self, _window: Window, duration: Duration) {
        tokio::time::sleep(duration.mul_f64(self.scale)).await;
    }
}

/// Windows close immediately. Tests drive submissions before stepping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

#[async_trait]
impl Scheduler for ImmediateScheduler {
    async fn wait(&self, _window: Window, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

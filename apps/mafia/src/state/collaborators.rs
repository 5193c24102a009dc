use std::sync::Arc;

use crate::adapters::{InMemoryResults, InMemorySessionStore};
use crate::messaging::memory::RecordingMessenger;
use crate::messaging::Messenger;
use crate::repos::{ResultsRepository, SessionStore};
use crate::scheduling::{ImmediateScheduler, Scheduler};

/// External services a session talks to. Cloning shares the same instances.
#[derive(Clone)]
pub struct Collaborators {
    pub messenger: Arc<dyn Messenger>,
    pub results: Arc<dyn ResultsRepository>,
    pub scheduler: Arc<dyn Scheduler>,
    pub store: Arc<dyn SessionStore>,
}

impl Collaborators {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        results: Arc<dyn ResultsRepository>,
        scheduler: Arc<dyn Scheduler>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            messenger,
            results,
            scheduler,
            store,
        }
    }

    /// Everything in memory with windows that close immediately.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(RecordingMessenger::new()),
            Arc::new(InMemoryResults::new()),
            Arc::new(ImmediateScheduler),
            Arc::new(InMemorySessionStore::new()),
        )
    }
}

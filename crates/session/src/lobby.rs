use super::*;
use log::info;
use pd_core::*;
use pd_engine::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc;

/// Concurrent session table.
///
/// The lobby is the only state shared across request handlers. Each entry
/// owns one session's consumer-side endpoints; the worker runs detached
/// and signals completion so a cleanup task can drop the entry.
#[derive(Default)]
pub struct Lobby {
    sessions: RwLock<HashMap<ID<Session>, SessionHandle>>,
}

impl Lobby {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Validate the configuration, register a session, and spawn its worker.
    /// The worker idles until the first subscriber attaches.
    pub async fn create(
        self: &Arc<Self>,
        config: SimulationConfig,
    ) -> Result<ID<Session>, SessionError> {
        config
            .validate()
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;
        let id = ID::new();
        let mut channels = SessionHandle::pair(id);
        let worker = Orchestrator::new(
            id,
            config,
            Arc::clone(&channels.lifecycle),
            channels.events,
        );
        let start = channels.start;
        let done_tx = channels.done_tx;
        let done_rx = channels.done_rx;
        self.sessions.write().await.insert(id, channels.handle);
        tokio::spawn(worker.run(start, done_tx));
        let lobby = Arc::clone(self);
        tokio::spawn(async move {
            let _ = done_rx.await;
            lobby.close(id).await;
            info!("[lobby] session {} cleaned up", id);
        });
        info!("[lobby] session {} created", id);
        Ok(id)
    }

    /// Claim the session's event stream. The first successful call fires the
    /// start signal; later calls fail since the stream is single-consumer.
    pub async fn subscribe(
        &self,
        id: ID<Session>,
    ) -> Result<mpsc::Receiver<StreamEvent>, SessionError> {
        let mut sessions = self.sessions.write().await;
        let handle = sessions.get_mut(&id).ok_or(SessionError::NotFound)?;
        let events = handle.events.take().ok_or(SessionError::StreamTaken)?;
        if let Some(start) = handle.start.take() {
            let _ = start.send(());
        }
        Ok(events)
    }

    /// Request cooperative cancellation. Also wakes a worker still waiting
    /// for a subscriber so it can exit promptly.
    pub async fn cancel(&self, id: ID<Session>) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let handle = sessions.get_mut(&id).ok_or(SessionError::NotFound)?;
        handle.lifecycle.stop();
        drop(handle.start.take());
        info!("[lobby] session {} cancel requested", id);
        Ok(())
    }

    pub async fn status(&self, id: ID<Session>) -> Result<Status, SessionError> {
        let sessions = self.sessions.read().await;
        let handle = sessions.get(&id).ok_or(SessionError::NotFound)?;
        Ok(handle.lifecycle.status())
    }

    async fn close(&self, id: ID<Session>) {
        self.sessions.write().await.remove(&id);
    }
}

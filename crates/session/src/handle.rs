use super::*;
use pd_core::*;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

/// Lobby-side endpoints for one session.
///
/// The event receiver is claimed at most once by the consumer; the start
/// sender wakes the worker when that consumer attaches.
pub struct SessionHandle {
    pub id: ID<Session>,
    pub created: SystemTime,
    pub lifecycle: Arc<Lifecycle>,
    pub events: Option<mpsc::Receiver<StreamEvent>>,
    pub start: Option<oneshot::Sender<()>>,
}

/// Worker-side endpoints paired with a [`SessionHandle`].
pub struct SessionChannels {
    pub handle: SessionHandle,
    pub events: mpsc::Sender<StreamEvent>,
    pub lifecycle: Arc<Lifecycle>,
    pub start: oneshot::Receiver<()>,
    pub done_tx: oneshot::Sender<()>,
    pub done_rx: oneshot::Receiver<()>,
}

impl SessionHandle {
    /// Create the paired endpoints for a new session.
    pub fn pair(id: ID<Session>) -> SessionChannels {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (start_tx, start_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        let lifecycle = Arc::new(Lifecycle::new());
        SessionChannels {
            handle: SessionHandle {
                id,
                created: SystemTime::now(),
                lifecycle: Arc::clone(&lifecycle),
                events: Some(event_rx),
                start: Some(start_tx),
            },
            events: event_tx,
            lifecycle,
            start: start_rx,
            done_tx,
            done_rx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_shares_one_lifecycle() {
        let channels = SessionHandle::pair(ID::new());
        channels.lifecycle.stop();
        assert!(channels.handle.lifecycle.stopped());
    }
    #[tokio::test]
    async fn start_signal_reaches_worker_side() {
        let mut channels = SessionHandle::pair(ID::new());
        channels
            .handle
            .start
            .take()
            .expect("start sender")
            .send(())
            .expect("send start");
        assert!(channels.start.await.is_ok());
    }
}

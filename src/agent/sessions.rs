//! In-memory investigation sessions
//!
//! The store owns every session's status and event buffer and fans events
//! out to live subscribers. Appending an event and registering a subscriber
//! take the same per-session lock, so a subscriber sees each event exactly
//! once: either in its replay or on its live channel.
//!
//! Sessions are evicted by a background reaper once they are older than
//! [`SESSION_TTL`], whatever their status.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::events::{AgentEvent, RecordedEvent};
use super::prompts::InvestigationRequest;
use crate::metrics::SESSIONS_ACTIVE;

/// Sessions older than this are evicted
pub const SESSION_TTL: Duration = Duration::from_secs(5 * 60);

/// How often the reaper sweeps
pub const REAP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Running,
    Done,
    Error,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Done | SessionStatus::Error)
    }

    /// Allowed moves: pending → running → done | error
    fn can_become(&self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (SessionStatus::Pending, SessionStatus::Running)
                | (SessionStatus::Running, SessionStatus::Done)
                | (SessionStatus::Running, SessionStatus::Error)
        )
    }
}

/// Error type for session lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NotFound(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NotFound(id) => write!(f, "Session not found: {}", id),
        }
    }
}

impl std::error::Error for SessionError {}

/// One investigation
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub subject: InvestigationRequest,
    pub status: SessionStatus,
    pub events: Vec<RecordedEvent>,
    listeners: Vec<mpsc::UnboundedSender<RecordedEvent>>,
    created_at: Instant,
}

impl Session {
    fn new(id: String, subject: InvestigationRequest) -> Self {
        Self {
            id,
            subject,
            status: SessionStatus::Pending,
            events: Vec::new(),
            listeners: Vec::new(),
            created_at: Instant::now(),
        }
    }

    /// No more events will be appended
    fn is_closed(&self) -> bool {
        self.status.is_terminal() || self.events.last().is_some_and(RecordedEvent::is_end)
    }

    fn push(&mut self, event: &AgentEvent) -> RecordedEvent {
        let recorded = RecordedEvent::record(event, Utc::now());
        self.events.push(recorded.clone());

        // Failed sends mean the subscriber went away
        self.listeners
            .retain(|listener| listener.send(recorded.clone()).is_ok());
        if recorded.is_end() {
            self.listeners.clear();
        }
        recorded
    }

    fn transition(&mut self, next: SessionStatus) -> bool {
        if self.status.can_become(next) {
            self.status = next;
            true
        } else {
            warn!(
                session_id = %self.id,
                from = ?self.status,
                to = ?next,
                "Ignoring invalid session status transition"
            );
            false
        }
    }
}

/// Buffered history plus, for sessions still running, a live feed
#[derive(Debug)]
pub struct Subscription {
    pub replay: Vec<RecordedEvent>,
    /// `None` if the session had already finished
    pub live: Option<mpsc::UnboundedReceiver<RecordedEvent>>,
}

type SessionHandle = Arc<Mutex<Session>>;

/// Process-wide session registry
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending session and return its id
    pub fn create(&self, subject: InvestigationRequest) -> String {
        let id = uuid::Uuid::now_v7().to_string();
        let session = Arc::new(Mutex::new(Session::new(id.clone(), subject)));
        self.write_map().insert(id.clone(), session);
        SESSIONS_ACTIVE.inc();
        debug!(session_id = %id, "Session created");
        id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read_map().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status(&self, id: &str) -> Option<SessionStatus> {
        let session = self.get(id)?;
        let status = lock(&session).status;
        Some(status)
    }

    /// Snapshot of the buffered events
    pub fn events(&self, id: &str) -> Option<Vec<RecordedEvent>> {
        let session = self.get(id)?;
        let events = lock(&session).events.clone();
        Some(events)
    }

    /// Move a session forward; invalid or backward moves are ignored
    pub fn set_status(&self, id: &str, status: SessionStatus) -> bool {
        let Some(session) = self.get(id) else {
            return false;
        };
        let moved = lock(&session).transition(status);
        moved
    }

    /// Append an event and deliver it to live subscribers.
    ///
    /// Returns `None` if the session is gone (e.g. reaped mid-investigation).
    pub fn emit(&self, id: &str, event: impl Into<AgentEvent>) -> Option<RecordedEvent> {
        let session = self.get(id)?;
        let event = event.into();
        let mut session = lock(&session);
        Some(session.push(&event))
    }

    /// Set a terminal status and append the closing `end` event in one step
    pub fn finish(&self, id: &str, status: SessionStatus, end: AgentEvent) {
        let Some(session) = self.get(id) else {
            return;
        };
        let mut session = lock(&session);
        session.transition(status);
        session.push(&end);
    }

    /// Report a failure unless the session already finished.
    ///
    /// Returns `false` if the session was already closed or is gone.
    pub fn fail(&self, id: &str, message: &str) -> bool {
        let Some(session) = self.get(id) else {
            return false;
        };
        let mut session = lock(&session);
        if session.is_closed() {
            return false;
        }
        if session.status == SessionStatus::Pending {
            session.transition(SessionStatus::Running);
        }
        session.push(&AgentEvent::error(message));
        session.transition(SessionStatus::Error);
        session.push(&AgentEvent::End(None));
        true
    }

    /// Replay buffered events and, if still running, register a live listener
    pub fn subscribe(&self, id: &str) -> Result<Subscription, SessionError> {
        let session = self
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        let mut session = lock(&session);

        let replay = session.events.clone();
        if session.is_closed() {
            return Ok(Subscription { replay, live: None });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        session.listeners.push(tx);
        Ok(Subscription {
            replay,
            live: Some(rx),
        })
    }

    /// Evict sessions older than [`SESSION_TTL`] as of `now`
    pub fn reap(&self, now: Instant) -> usize {
        let mut map = self.write_map();
        let before = map.len();
        map.retain(|id, session| {
            let age = now.saturating_duration_since(lock(session).created_at);
            let keep = age <= SESSION_TTL;
            if !keep {
                debug!(session_id = %id, age_secs = age.as_secs(), "Reaping session");
            }
            keep
        });
        let removed = before - map.len();
        if removed > 0 {
            SESSIONS_ACTIVE.sub(removed as i64);
        }
        removed
    }

    /// Sweep expired sessions every `interval` until the handle is stopped
    pub fn spawn_reaper(self: &Arc<Self>, interval: Duration) -> ReaperHandle {
        let store = Arc::clone(self);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = store.reap(Instant::now());
                        if removed > 0 {
                            info!(removed, remaining = store.len(), "Reaped expired sessions");
                        }
                    }
                    _ = &mut stop_rx => break,
                }
            }
            debug!("Session reaper stopped");
        });

        ReaperHandle {
            stop: Some(stop_tx),
            task,
        }
    }

    fn get(&self, id: &str) -> Option<SessionHandle> {
        self.read_map().get(id).cloned()
    }

    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock(session: &SessionHandle) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Stops the background reaper
#[derive(Debug)]
pub struct ReaperHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "Session reaper task failed");
        }
    }
}

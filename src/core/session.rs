use super::definition::{DerivedDefinition, WorkflowDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use tracing::warn;

/// Opaque identifier of a workflow template
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(String);

impl WorkflowId {
    pub fn new(id: impl Into<String>) -> Self {
        WorkflowId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkflowId {
    fn from(id: &str) -> Self {
        WorkflowId::new(id)
    }
}

impl From<u64> for WorkflowId {
    fn from(id: u64) -> Self {
        WorkflowId::new(id.to_string())
    }
}

/// Form fields of a workflow that live outside its definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDetails {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
}

/// State of one open edit dialog
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    pub definition: WorkflowDefinition,
    pub details: WorkflowDetails,
    /// Last derived definition, refreshed after every mutation
    pub current: Option<DerivedDefinition>,
    /// Set while a save request is in flight
    pub saving: bool,
}

impl EditSession {
    pub fn new(definition: WorkflowDefinition, details: WorkflowDetails) -> Self {
        Self {
            definition,
            details,
            current: None,
            saving: false,
        }
    }
}

/// Owns the open edit sessions, keyed by workflow id.
pub trait SessionStore: Send + Sync {
    /// Stores a session, replacing any session already open for the id
    fn open(&self, id: WorkflowId, session: EditSession);

    /// Drops a session; returns whether one was open
    fn close(&self, id: &WorkflowId) -> bool;

    /// Runs `f` against the session; returns `false` when no session is open
    fn update(&self, id: &WorkflowId, f: &mut dyn FnMut(&mut EditSession)) -> bool;

    /// Copy of the session's current state
    fn snapshot(&self, id: &WorkflowId) -> Option<EditSession>;

    fn contains(&self, id: &WorkflowId) -> bool {
        self.snapshot(id).is_some()
    }

    /// Ids of every open session
    fn ids(&self) -> Vec<WorkflowId>;
}

/// Session store backed by a lock-guarded map
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<WorkflowId, EditSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn open(&self, id: WorkflowId, session: EditSession) {
        let mut guard = match self.sessions.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Session store lock poisoned, recovering...");
                poisoned.into_inner()
            }
        };
        guard.insert(id, session);
    }

    fn close(&self, id: &WorkflowId) -> bool {
        let mut guard = match self.sessions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(id).is_some()
    }

    fn update(&self, id: &WorkflowId, f: &mut dyn FnMut(&mut EditSession)) -> bool {
        let mut guard = match self.sessions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.get_mut(id) {
            Some(session) => {
                f(session);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self, id: &WorkflowId) -> Option<EditSession> {
        let guard = match self.sessions.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(id).cloned()
    }

    fn ids(&self) -> Vec<WorkflowId> {
        let guard = match self.sessions.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut ids: Vec<_> = guard.keys().cloned().collect();
        ids.sort();
        ids
    }
}

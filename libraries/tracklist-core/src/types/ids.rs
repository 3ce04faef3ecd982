/// ID types for Tracklist entities
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Track identifier
///
/// Server ids and provisional (client-generated) ids live in separate
/// variants, so they can never compare equal no matter what strings the
/// server hands out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackId {
    /// Assigned by the backend
    Server(String),
    /// Placeholder for an optimistic insert awaiting confirmation
    Provisional(Uuid),
}

impl TrackId {
    /// Create a server track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self::Server(id.into())
    }

    /// Generate a fresh provisional ID
    pub fn provisional() -> Self {
        Self::Provisional(Uuid::new_v4())
    }

    /// Whether this id still awaits server confirmation
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }

    /// The server-side id, if this is one
    pub fn server_id(&self) -> Option<&str> {
        match self {
            Self::Server(id) => Some(id),
            Self::Provisional(_) => None,
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(id) => write!(f, "{}", id),
            Self::Provisional(uuid) => write!(f, "provisional-{}", uuid),
        }
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self::Server(id)
    }
}

impl Serialize for TrackId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Anything coming from the wire is a server id.
impl<'de> Deserialize<'de> for TrackId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Server)
    }
}

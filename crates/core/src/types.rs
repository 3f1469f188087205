use std::fmt;

/// Server-assigned entity identifiers are opaque strings.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The kinds of versioned entities managed through the admin client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Centre,
    Study,
    User,
    Membership,
    Shipment,
    CollectionEventType,
    Participant,
}

impl EntityKind {
    /// Lower-case human readable name, used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Centre => "centre",
            Self::Study => "study",
            Self::User => "user",
            Self::Membership => "membership",
            Self::Shipment => "shipment",
            Self::CollectionEventType => "collection event type",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

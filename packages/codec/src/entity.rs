use serde::{Deserialize, Serialize};

/// 32-byte identifier used for both event ids and public keys.
pub type Id32 = [u8; 32];

/// Reference to another author's public key, with optional relay hints
/// telling the reader where that author's records are likely to be found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PubkeyRef {
    pub pubkey: Id32,
    pub relay_hints: Vec<String>,
}

impl PubkeyRef {
    pub fn new(pubkey: Id32) -> Self {
        Self {
            pubkey,
            relay_hints: Vec::new(),
        }
    }

    pub fn with_relays(pubkey: Id32, relay_hints: Vec<String>) -> Self {
        Self { pubkey, relay_hints }
    }
}

/// Reference to a single immutable event by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRef {
    pub id: Id32,
    pub relay_hints: Vec<String>,
}

impl EventRef {
    pub fn new(id: Id32) -> Self {
        Self {
            id,
            relay_hints: Vec::new(),
        }
    }

    pub fn with_relays(id: Id32, relay_hints: Vec<String>) -> Self {
        Self { id, relay_hints }
    }
}

/// Reference to an addressable record: identified by the
/// (kind, author, identifier) triple rather than a content hash, so newer
/// records with the same triple supersede older ones.
///
/// `identifier` may be the empty string — that is a valid coordinate,
/// distinct from a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRef {
    pub kind: u32,
    pub pubkey: Id32,
    pub identifier: String,
    pub relay_hints: Vec<String>,
}

impl AddressRef {
    pub fn new(kind: u32, pubkey: Id32, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            pubkey,
            identifier: identifier.into(),
            relay_hints: Vec::new(),
        }
    }

    pub fn with_relays(
        kind: u32,
        pubkey: Id32,
        identifier: impl Into<String>,
        relay_hints: Vec<String>,
    ) -> Self {
        Self {
            kind,
            pubkey,
            identifier: identifier.into(),
            relay_hints,
        }
    }

    /// Deduplication key for serializer accumulators.
    pub fn coordinate(&self) -> (u32, Id32, &str) {
        (self.kind, self.pubkey, self.identifier.as_str())
    }
}

/// A decoded protocol identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Identifier {
    Pubkey(PubkeyRef),
    Event(EventRef),
    Address(AddressRef),
}

impl Identifier {
    /// Relay hints carried by any identifier kind.
    pub fn relay_hints(&self) -> &[String] {
        match self {
            Identifier::Pubkey(p) => &p.relay_hints,
            Identifier::Event(e) => &e.relay_hints,
            Identifier::Address(a) => &a.relay_hints,
        }
    }
}

impl From<PubkeyRef> for Identifier {
    fn from(value: PubkeyRef) -> Self {
        Identifier::Pubkey(value)
    }
}

impl From<EventRef> for Identifier {
    fn from(value: EventRef) -> Self {
        Identifier::Event(value)
    }
}

impl From<AddressRef> for Identifier {
    fn from(value: AddressRef) -> Self {
        Identifier::Address(value)
    }
}

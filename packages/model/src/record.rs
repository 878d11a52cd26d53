//! Wire-shaped protocol records and their string-array tags.

use quill_codec::Id32;
use serde::{Deserialize, Serialize};

/// Wrapper for a protocol tag expressed as an array of strings.
///
/// Tags are small arrays where the first element names the type and the rest
/// hold data, e.g. `["p", <pubkey>]`, `["t", "news"]`,
/// `["emoji", "pepe", "https://…/pepe.png"]`. Each tag is stored verbatim so
/// uncommon or custom tags survive a round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag(pub Vec<String>);

impl Tag {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Tag type marker (the first element).
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

/// An immutable signed protocol message.
///
/// Ids, keys, and signatures stay hex strings here — this is the wire shape;
/// the codec owns the binary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Event identifier (hex of SHA-256 hash).
    pub id: String,
    /// Author public key (hex).
    pub pubkey: String,
    /// Kind number.
    pub kind: u32,
    /// Unix timestamp of creation.
    pub created_at: u64,
    /// Verbatim string-array tags.
    pub tags: Vec<Tag>,
    /// Content body.
    pub content: String,
    /// Schnorr signature over the event hash.
    pub sig: String,
}

impl Record {
    /// Image URL for a custom emoji shortcode declared by this record's tags.
    pub fn find_emoji_tag(&self, shortcode: &str) -> Option<&str> {
        find_emoji_tag(&self.tags, shortcode)
    }

    /// Author key as raw bytes, when the hex field is well-formed.
    pub fn author_key(&self) -> Option<Id32> {
        let mut key = [0u8; 32];
        hex::decode_to_slice(&self.pubkey, &mut key).ok()?;
        Some(key)
    }
}

/// Tag-reader contract consumed by the parser's emoji pass: look up the image
/// URL a record declares for a `:shortcode:`.
pub fn find_emoji_tag<'a>(tags: &'a [Tag], shortcode: &str) -> Option<&'a str> {
    tags.iter().find_map(|tag| match tag.0.as_slice() {
        [name, code, url, ..] if name == "emoji" && code == shortcode => Some(url.as_str()),
        _ => None,
    })
}

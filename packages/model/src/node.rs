use quill_codec::{AddressRef, EventRef, Identifier, PubkeyRef};
use serde::{Deserialize, Serialize};

/// Byte range in the source content a parsed node was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both inputs.
    pub fn join(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A value paired with the source span it was produced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

/// One element of a rendered or composed content sequence.
///
/// The sum is closed: renderers dispatch with a plain `match` and the
/// serializer is total over every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Plain text run.
    Text { value: String },

    /// `#topic` hashtag, stored without the leading `#`.
    Hashtag { tag: String },

    /// Reference to another author's key.
    Mention {
        target: PubkeyRef,
        display_label: String,
    },

    /// Generic web link.
    Link { href: String },

    /// Emoji, either a literal unicode character or a custom image.
    Emoji {
        shortcode: String,
        source: EmojiSource,
    },

    /// Consolidated run of media links rendered as one unit.
    ///
    /// Only ever holds URLs classified as image, video, or audio; a media
    /// link never stays a [`Node::Link`].
    Gallery { links: Vec<String> },

    /// Embedded reference to another record, rendered as a quote.
    EventEmbed { target: EmbedTarget },

    /// Reference to a numbered protocol document.
    ProtocolDocRef { number: u32 },

    /// Uploaded binary attachment.
    BlobAttachment(BlobAttachment),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// A single-space text node, used to keep spliced entities apart.
    pub fn space() -> Self {
        Node::text(" ")
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    /// Whitespace-only text node; these may be absorbed between gallery
    /// members during consolidation.
    pub fn is_whitespace_text(&self) -> bool {
        match self {
            Node::Text { value } => !value.is_empty() && value.chars().all(char::is_whitespace),
            _ => false,
        }
    }
}

/// Where an emoji node draws its glyph from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EmojiSource {
    /// Literal unicode character (or character sequence).
    Unicode { character: String },

    /// Custom emoji backed by an image; serialization emits the shortcode
    /// and an emoji tag pointing at the image.
    Custom { image_url: String },
}

/// Target of an embedded-record reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EmbedTarget {
    Event(EventRef),
    Address(AddressRef),
}

impl EmbedTarget {
    pub fn as_identifier(&self) -> Identifier {
        match self {
            EmbedTarget::Event(event) => Identifier::Event(event.clone()),
            EmbedTarget::Address(address) => Identifier::Address(address.clone()),
        }
    }
}

/// Uploaded blob referenced from a composed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobAttachment {
    pub url: String,
    /// SHA-256 of the blob, lowercase hex. Deduplication key.
    pub content_hash: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<u64>,
    pub origin_server: Option<String>,
}

impl BlobAttachment {
    pub fn new(url: impl Into<String>, content_hash: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_hash: content_hash.into(),
            mime_type: None,
            size_bytes: None,
            origin_server: None,
        }
    }
}

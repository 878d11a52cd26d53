//! Compose path: editor document to canonical `content` + derived tags.

use std::collections::HashSet;

use quill_codec::{encode, AddressRef, Id32, Identifier, URI_SCHEME};
use quill_model::{BlobAttachment, Document, EmbedTarget, EmojiSource, Node};
use serde::{Deserialize, Serialize};

/// Custom-emoji tag material derived from serialized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiTag {
    pub shortcode: String,
    pub url: String,
}

/// Canonical compose-path output: content text plus the tag material that
/// cannot be re-derived from it downstream.
///
/// The three accumulator lists are insertion-ordered and duplicate-free under
/// their stated keys, so serializing the same document twice is
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRecord {
    pub text: String,
    /// Unique by shortcode, in first-use order.
    pub emoji_tags: Vec<EmojiTag>,
    /// Unique by content hash, in first-use order.
    pub blob_attachments: Vec<BlobAttachment>,
    /// Unique by (kind, pubkey, identifier), in first-use order.
    pub address_refs: Vec<AddressRef>,
}

/// Serialize an edit-session document.
///
/// Blocks join with a single newline; the joined text is trimmed once, at the
/// end, never per block. Total: every node kind emits something, and every
/// failure mode degrades to readable text instead of erroring.
pub fn serialize(document: &Document) -> SerializedRecord {
    let mut acc = Accumulators::default();
    let mut block_texts = Vec::with_capacity(document.blocks.len());

    for block in &document.blocks {
        let mut text = String::new();
        for node in &block.nodes {
            emit_node(node, &mut text, &mut acc);
        }
        block_texts.push(text);
    }

    SerializedRecord {
        text: block_texts.join("\n").trim().to_string(),
        emoji_tags: acc.emoji_tags,
        blob_attachments: acc.blob_attachments,
        address_refs: acc.address_refs,
    }
}

/// Deduplicating accumulators, local to one serialization call.
#[derive(Default)]
struct Accumulators {
    emoji_tags: Vec<EmojiTag>,
    seen_shortcodes: HashSet<String>,
    blob_attachments: Vec<BlobAttachment>,
    seen_hashes: HashSet<String>,
    address_refs: Vec<AddressRef>,
    seen_coordinates: HashSet<(u32, Id32, String)>,
}

impl Accumulators {
    fn push_emoji(&mut self, shortcode: &str, url: &str) {
        if self.seen_shortcodes.insert(shortcode.to_string()) {
            self.emoji_tags.push(EmojiTag {
                shortcode: shortcode.to_string(),
                url: url.to_string(),
            });
        }
    }

    fn push_blob(&mut self, blob: &BlobAttachment) {
        if self.seen_hashes.insert(blob.content_hash.clone()) {
            self.blob_attachments.push(blob.clone());
        }
    }

    fn push_address(&mut self, address: &AddressRef) {
        let key = (address.kind, address.pubkey, address.identifier.clone());
        if self.seen_coordinates.insert(key) {
            self.address_refs.push(address.clone());
        }
    }
}

fn emit_node(node: &Node, text: &mut String, acc: &mut Accumulators) {
    match node {
        Node::Text { value } => text.push_str(value),
        Node::Hashtag { tag } => {
            text.push('#');
            text.push_str(tag);
        }
        Node::Mention {
            target,
            display_label,
        } => match encode(&Identifier::Pubkey(target.clone())) {
            Ok(token) => {
                text.push_str(URI_SCHEME);
                text.push_str(&token);
            }
            // Mandatory fallback: a failed encode degrades to a readable
            // label, never a failed serialization.
            Err(_) => {
                text.push('@');
                text.push_str(display_label);
            }
        },
        Node::Link { href } => text.push_str(href),
        Node::Emoji { shortcode, source } => match source {
            EmojiSource::Unicode { character } => text.push_str(character),
            EmojiSource::Custom { image_url } => {
                text.push(':');
                text.push_str(shortcode);
                text.push(':');
                acc.push_emoji(shortcode, image_url);
            }
        },
        Node::Gallery { links } => {
            for (i, link) in links.iter().enumerate() {
                if i > 0 {
                    text.push(' ');
                }
                text.push_str(link);
            }
        }
        Node::EventEmbed { target } => {
            if let EmbedTarget::Address(address) = target {
                // Addressable-record tags cannot be recovered from the text
                // form downstream; they must travel explicitly.
                acc.push_address(address);
            }
            match encode(&target.as_identifier()) {
                Ok(token) => {
                    text.push_str(URI_SCHEME);
                    text.push_str(&token);
                }
                Err(_) => text.push_str(&fallback_embed_text(target)),
            }
        }
        Node::ProtocolDocRef { number } => {
            text.push_str(&format!("NIP-{number:02}"));
        }
        Node::BlobAttachment(blob) => {
            text.push_str(&blob.url);
            acc.push_blob(blob);
        }
    }
}

/// Plain-text stand-in for an embed whose token could not be encoded.
fn fallback_embed_text(target: &EmbedTarget) -> String {
    match target {
        EmbedTarget::Event(event) => hex::encode(event.id),
        EmbedTarget::Address(address) => format!(
            "{}:{}:{}",
            address.kind,
            hex::encode(address.pubkey),
            address.identifier
        ),
    }
}

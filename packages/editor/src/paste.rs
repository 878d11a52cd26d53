//! Paste-time entity resolution.
//!
//! Clipboard text is scanned for protocol identifier tokens. When at least
//! one decodes, the whole payload is rebuilt as a node list — typed nodes for
//! the identifiers, verbatim text for everything else — for the session to
//! splice at the cursor. When nothing decodes, the resolver reports no match
//! and the caller falls back to default paste-as-text handling.

use quill_codec::{decode, placeholder_label, Id32, Identifier, TOKEN_PATTERN};
use quill_model::{EmbedTarget, Node};
use regex::Regex;

/// Synchronous display-name lookup used to label pasted mentions.
///
/// The contract is total and non-blocking: implementations answer from a
/// local cache and must never perform network I/O. A miss is `None`, not an
/// error.
pub trait DisplayNameCache {
    fn lookup(&self, pubkey: &Id32) -> Option<String>;
}

/// Cache that knows no names; every mention gets the placeholder label.
pub struct NoNameCache;

impl DisplayNameCache for NoNameCache {
    fn lookup(&self, _pubkey: &Id32) -> Option<String> {
        None
    }
}

/// Scan a clipboard payload for identifier tokens.
///
/// Returns the node list to splice, or `None` when the payload contains no
/// decodable token — a normal outcome, not an error. Tokens count only when
/// bounded by whitespace or the string edge on both sides, so an identifier
/// embedded in a longer run (inside a URL, say) never corrupts the paste.
/// A bounded token that fails to decode is re-inserted verbatim as text.
pub fn resolve_paste(clipboard: &str, names: &dyn DisplayNameCache) -> Option<Vec<Node>> {
    if clipboard.is_empty() {
        return None;
    }

    let token = Regex::new(TOKEN_PATTERN).unwrap();
    let mut nodes = Vec::new();
    let mut resolved_any = false;
    let mut cursor = 0;

    for found in token.find_iter(clipboard) {
        if !bounded(clipboard, found.start(), found.end()) {
            continue;
        }
        if found.start() > cursor {
            nodes.push(Node::text(&clipboard[cursor..found.start()]));
        }
        match decode(found.as_str()) {
            Ok(identifier) => {
                nodes.push(entity_node(identifier, names));
                // One space after every spliced entity keeps adjacent
                // entities from merging lexically.
                nodes.push(Node::space());
                resolved_any = true;
            }
            Err(error) => {
                tracing::debug!(token = found.as_str(), %error, "pasted token failed to decode");
                nodes.push(Node::text(found.as_str()));
            }
        }
        cursor = found.end();
    }

    if !resolved_any {
        return None;
    }
    if cursor < clipboard.len() {
        nodes.push(Node::text(&clipboard[cursor..]));
    }
    Some(nodes)
}

fn entity_node(identifier: Identifier, names: &dyn DisplayNameCache) -> Node {
    match identifier {
        Identifier::Pubkey(target) => {
            let display_label = names
                .lookup(&target.pubkey)
                .unwrap_or_else(|| placeholder_label(&target.pubkey));
            Node::Mention {
                target,
                display_label,
            }
        }
        Identifier::Event(event) => Node::EventEmbed {
            target: EmbedTarget::Event(event),
        },
        Identifier::Address(address) => Node::EventEmbed {
            target: EmbedTarget::Address(address),
        },
    }
}

/// Canonical paste boundary rule: whitespace or string edge on both sides.
/// Punctuation is deliberately not a boundary.
fn bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    let after_ok = text[end..].chars().next().map_or(true, char::is_whitespace);
    before_ok && after_ok
}

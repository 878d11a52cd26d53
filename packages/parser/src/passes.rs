//! Transformer passes of the parse pipeline.
//!
//! Pass order is significant: earlier passes have priority, and a later pass
//! never re-splits a region an earlier one claimed. The default pipeline runs
//! the protocol-identifier pass before the URL pass so `nostr:`-prefixed
//! tokens are not swallowed as plain links.

use std::ops::Range;

use quill_codec::{decode, placeholder_label, Identifier, TOKEN_PATTERN};
use quill_model::{find_emoji_tag, EmbedTarget, EmojiSource, Node, Tag};
use regex::Regex;

/// Per-call context shared by every pass: the record's own tags.
pub struct ParseContext<'a> {
    pub tags: &'a [Tag],
}

/// A claimed span within one unclaimed region, with the node replacing it.
/// The range is relative to the region the pass was handed.
pub struct PassMatch {
    pub range: Range<usize>,
    pub node: Node,
}

impl PassMatch {
    pub fn new(range: Range<usize>, node: Node) -> Self {
        Self { range, node }
    }
}

/// One transformer in the parse pipeline.
///
/// A pass only ever sees text no earlier pass has claimed. It returns
/// non-overlapping matches ordered by start offset; everything it leaves
/// unmatched stays available to later passes.
pub trait TransformPass {
    fn name(&self) -> &'static str;

    fn scan(&self, region: &str, ctx: &ParseContext<'_>) -> Vec<PassMatch>;
}

/// The standard pipeline, in priority order.
pub fn default_pipeline() -> Vec<Box<dyn TransformPass>> {
    vec![
        Box::new(EntityPass::new()),
        Box::new(HashtagPass::new()),
        Box::new(UrlPass::new()),
        Box::new(EmojiShortcodePass::new()),
        Box::new(DocRefPass::new()),
    ]
}

/// Canonical boundary rule shared with the paste resolver: a token counts
/// only when flanked by whitespace or the text edge. Punctuation is not a
/// boundary, so a token embedded in a longer run (say, inside a URL) never
/// matches.
pub(crate) fn whitespace_bounded(region: &str, start: usize, end: usize) -> bool {
    let before_ok = region[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    let after_ok = region[end..].chars().next().map_or(true, char::is_whitespace);
    before_ok && after_ok
}

/// Protocol-identifier pass: `nostr:`-prefixed or bare bech32 tokens become
/// mentions and embeds. A span that fails to decode stays ordinary text
/// rather than aborting the parse.
pub struct EntityPass {
    token: Regex,
}

impl EntityPass {
    pub fn new() -> Self {
        Self {
            token: Regex::new(TOKEN_PATTERN).unwrap(),
        }
    }
}

impl Default for EntityPass {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformPass for EntityPass {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn scan(&self, region: &str, _ctx: &ParseContext<'_>) -> Vec<PassMatch> {
        let mut matches = Vec::new();
        for found in self.token.find_iter(region) {
            if !whitespace_bounded(region, found.start(), found.end()) {
                continue;
            }
            let node = match decode(found.as_str()) {
                Ok(Identifier::Pubkey(target)) => {
                    let display_label = placeholder_label(&target.pubkey);
                    Node::Mention {
                        target,
                        display_label,
                    }
                }
                Ok(Identifier::Event(event)) => Node::EventEmbed {
                    target: EmbedTarget::Event(event),
                },
                Ok(Identifier::Address(address)) => Node::EventEmbed {
                    target: EmbedTarget::Address(address),
                },
                Err(error) => {
                    tracing::debug!(token = found.as_str(), %error, "undecodable token left as text");
                    continue;
                }
            };
            matches.push(PassMatch::new(found.range(), node));
        }
        matches
    }
}

/// `#topic` hashtags: letters, digits, and underscore, opened at the start of
/// the region or after whitespace.
pub struct HashtagPass {
    hashtag: Regex,
}

impl HashtagPass {
    pub fn new() -> Self {
        Self {
            hashtag: Regex::new(r"#[\p{L}\p{N}_]+").unwrap(),
        }
    }
}

impl Default for HashtagPass {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformPass for HashtagPass {
    fn name(&self) -> &'static str {
        "hashtag"
    }

    fn scan(&self, region: &str, _ctx: &ParseContext<'_>) -> Vec<PassMatch> {
        let mut matches = Vec::new();
        for found in self.hashtag.find_iter(region) {
            let preceded_ok = region[..found.start()]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if !preceded_ok {
                continue;
            }
            let tag = found.as_str()[1..].to_string();
            matches.push(PassMatch::new(found.range(), Node::Hashtag { tag }));
        }
        matches
    }
}

/// Generic web links. Trailing sentence punctuation stays text.
pub struct UrlPass {
    url: Regex,
}

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '"', '\''];

impl UrlPass {
    pub fn new() -> Self {
        Self {
            url: Regex::new(r"https?://[^\s]+").unwrap(),
        }
    }
}

impl Default for UrlPass {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformPass for UrlPass {
    fn name(&self) -> &'static str {
        "url"
    }

    fn scan(&self, region: &str, _ctx: &ParseContext<'_>) -> Vec<PassMatch> {
        let mut matches = Vec::new();
        for found in self.url.find_iter(region) {
            let trimmed = found.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            let rest = trimmed
                .strip_prefix("https://")
                .or_else(|| trimmed.strip_prefix("http://"));
            // A bare scheme is not a link.
            if rest.map_or(true, str::is_empty) {
                continue;
            }
            let range = found.start()..found.start() + trimmed.len();
            matches.push(PassMatch::new(
                range,
                Node::Link {
                    href: trimmed.to_string(),
                },
            ));
        }
        matches
    }
}

/// `:shortcode:` custom emoji. A shortcode resolves only when the record's
/// own tags declare a matching emoji tag; anything else stays literal text.
pub struct EmojiShortcodePass {
    shortcode: Regex,
}

impl EmojiShortcodePass {
    pub fn new() -> Self {
        Self {
            shortcode: Regex::new(r":([A-Za-z0-9_+-]+):").unwrap(),
        }
    }
}

impl Default for EmojiShortcodePass {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformPass for EmojiShortcodePass {
    fn name(&self) -> &'static str {
        "emoji-shortcode"
    }

    fn scan(&self, region: &str, ctx: &ParseContext<'_>) -> Vec<PassMatch> {
        let mut matches = Vec::new();
        for captures in self.shortcode.captures_iter(region) {
            let whole = captures.get(0).expect("capture group 0 always present");
            let shortcode = &captures[1];
            let Some(url) = find_emoji_tag(ctx.tags, shortcode) else {
                continue;
            };
            matches.push(PassMatch::new(
                whole.range(),
                Node::Emoji {
                    shortcode: shortcode.to_string(),
                    source: EmojiSource::Custom {
                        image_url: url.to_string(),
                    },
                },
            ));
        }
        matches
    }
}

/// `NIP-XX` protocol-document references.
pub struct DocRefPass {
    doc_ref: Regex,
}

impl DocRefPass {
    pub fn new() -> Self {
        Self {
            doc_ref: Regex::new(r"NIP-([0-9]{1,4})").unwrap(),
        }
    }
}

impl Default for DocRefPass {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformPass for DocRefPass {
    fn name(&self) -> &'static str {
        "doc-ref"
    }

    fn scan(&self, region: &str, _ctx: &ParseContext<'_>) -> Vec<PassMatch> {
        let mut matches = Vec::new();
        for captures in self.doc_ref.captures_iter(region) {
            let whole = captures.get(0).expect("capture group 0 always present");
            let preceded_ok = region[..whole.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            let followed_ok = region[whole.end()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            if !preceded_ok || !followed_ok {
                continue;
            }
            let Ok(number) = captures[1].parse::<u32>() else {
                continue;
            };
            matches.push(PassMatch::new(whole.range(), Node::ProtocolDocRef { number }));
        }
        matches
    }
}

//! Bidirectional content transform: flat `content` text to typed nodes and
//! back.
//!
//! The display path runs a priority-ordered pipeline of [`TransformPass`]es
//! over the raw string: each pass claims spans out of the not-yet-claimed
//! regions left by its predecessors, and whatever survives every pass stays
//! plain text. The compose path walks an editor [`Document`] and emits the
//! canonical text plus the tag material that cannot be re-derived from it.
//!
//! Both directions are pure functions; parsing the same `(content, tags)` or
//! serializing the same document twice yields identical output.
//!
//! [`Document`]: quill_model::Document

pub mod media;
pub mod parser;
pub mod passes;
pub mod serializer;

pub use media::{classify_url, is_media_url, MediaKind};
pub use parser::{parse, parse_spanned, parse_spanned_with, parse_with};
pub use passes::{
    default_pipeline, DocRefPass, EmojiShortcodePass, EntityPass, HashtagPass, ParseContext,
    PassMatch, TransformPass, UrlPass,
};
pub use serializer::{serialize, EmojiTag, SerializedRecord};

#[cfg(test)]
mod tests_parser;
#[cfg(test)]
mod tests_serializer;

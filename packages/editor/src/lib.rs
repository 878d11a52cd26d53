//! Compose-side editing engine.
//!
//! An [`EditSession`] owns the structured [`Document`] a user is writing,
//! applies validated [`Mutation`]s to it, and hosts the paste entity
//! resolver: pasted plain text is scanned for protocol identifiers and, when
//! any decode, spliced into the document as typed nodes instead of raw text.
//!
//! Display names for pasted mentions come from an injected
//! [`DisplayNameCache`] — a total, synchronous, non-blocking capability; a
//! cache miss falls back to a truncated-identifier placeholder rather than
//! any network round trip.
//!
//! [`Document`]: quill_model::Document

mod mutations;
mod paste;
mod session;

pub use mutations::{Mutation, MutationError};
pub use paste::{resolve_paste, DisplayNameCache, NoNameCache};
pub use session::{Cursor, EditSession};

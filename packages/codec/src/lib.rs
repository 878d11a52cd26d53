//! Entity codec for protocol identifiers.
//!
//! Every reference that can appear inside a record — another author's key, a
//! specific event, or an addressable record coordinate — has a compact
//! checksummed textual form. This crate owns those value types and the
//! bidirectional conversion:
//!
//! - [`encode`] turns an [`Identifier`] into its canonical token
//!   (`npub1…`, `note1…`, `nprofile1…`, `nevent1…`, `naddr1…`)
//! - [`decode`] parses a token back, returning a recoverable [`DecodeError`]
//!   on malformed input instead of panicking
//!
//! Both directions are pure and lossless: `decode(encode(x)) == x` for every
//! well-formed identifier.

pub mod codec;
pub mod entity;
pub mod error;

pub use codec::{abbrev, decode, encode, placeholder_label, strip_scheme, TOKEN_PATTERN, URI_SCHEME};
pub use entity::{AddressRef, EventRef, Id32, Identifier, PubkeyRef};
pub use error::{DecodeError, EncodeError};

#[cfg(test)]
mod tests_roundtrip;

//! Display-path rendering support: depth-bounded quote resolution.
//!
//! An embedded-record reference renders by resolving the referenced record
//! and re-entering the content parser on its `content` — which may surface
//! further embeds, recursively. Records can reference each other cyclically,
//! so expansion is bounded by an explicit depth accumulator handed down the
//! recursion instead of any global guard state: [`QuoteView`] expands below
//! the cutoff, collapses to a one-line summary at it, and a manual toggle
//! overrides the cutoff for one level only.
//!
//! Resolution itself is the only asynchronous edge of the engine. A
//! [`RecordLookup`] subscription may emit zero, one, or many records (a
//! record can arrive late, or be superseded); each emission re-renders the
//! quote without re-running the outer parse, and dropping the subscription
//! is the unsubscribe.

mod lookup;
mod quote;

pub use lookup::{RecordLookup, RecordStream};
pub use quote::{embedded_targets, QuoteState, QuoteSubscription, QuoteView, MAX_QUOTE_DEPTH};

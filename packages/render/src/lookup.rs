//! Record-lookup collaborator boundary.

use futures_util::stream::BoxStream;
use quill_codec::Identifier;
use quill_model::Record;

/// Subscription to resolutions of one identifier.
///
/// Emissions arrive in whatever order the collaborator produces them; a
/// later emission supersedes an earlier one. The stream may end without ever
/// emitting — the protocol offers no existence guarantee.
pub type RecordStream = BoxStream<'static, Record>;

/// External record store the quote resolver subscribes against.
///
/// Fire-and-forget: implementations start whatever relay or cache machinery
/// they need when `resolve` is called and tear it down when the returned
/// stream is dropped.
pub trait RecordLookup {
    fn resolve(&self, target: &Identifier) -> RecordStream;
}
